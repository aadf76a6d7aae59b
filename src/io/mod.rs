mod format;
mod input;
mod output;

pub use format::DocumentFormat;
pub use input::{
    field_options_from_str, messages_from_value, parse_document_str, read_document,
    symbol_tables_from_value,
};
pub use output::serialize_value;
