use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;
use crate::field::FieldOptions;
use crate::locale::{JsonMessages, SymbolTables};

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            toml::from_str::<Value>(contents).with_context(|| "failed to parse TOML document")
        }
    }
}

/// Read a document from disk, choosing the format from its extension
/// (JSON when the extension is missing or unknown).
pub fn read_document(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let format = DocumentFormat::from_path(path).unwrap_or(DocumentFormat::Json);
    parse_document_str(&contents, format)
        .with_context(|| format!("failed to load {}", path.display()))
}

/// Field options from a block-definition argument such as `{"date": "2020-02-20"}`.
pub fn field_options_from_str(contents: &str, format: DocumentFormat) -> Result<FieldOptions> {
    let value = parse_document_str(contents, format)?;
    FieldOptions::from_json(&value).context("invalid date field options")
}

/// Symbol tables keyed by name, in document order.
pub fn symbol_tables_from_value(value: Value) -> Result<SymbolTables> {
    serde_json::from_value(value).context("invalid locale symbol tables")
}

pub fn messages_from_value(value: Value) -> Result<JsonMessages> {
    anyhow::ensure!(value.is_object(), "message catalog must be an object");
    Ok(JsonMessages::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{MessageCatalog, SymbolCatalog};
    use serde_json::json;

    #[test]
    fn parse_json_documents() {
        let parsed = parse_document_str("{\"date\":\"2020-01-01\"}", DocumentFormat::Json)
            .expect("json");
        assert_eq!(parsed["date"], json!("2020-01-01"));
    }

    #[test]
    fn reports_malformed_documents() {
        let err = parse_document_str("{date", DocumentFormat::Json).unwrap_err();
        assert!(err.to_string().contains("failed to parse JSON document"));
    }

    #[test]
    fn loads_field_options() {
        let options = field_options_from_str(
            "{\"type\": \"field_date\", \"date\": \"2020-02-20\"}",
            DocumentFormat::Json,
        )
        .expect("options");
        assert_eq!(options.date.as_deref(), Some("2020-02-20"));

        let err = field_options_from_str("[1, 2]", DocumentFormat::Json).unwrap_err();
        assert_eq!(err.to_string(), "invalid date field options");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn loads_yaml_field_options() {
        let options =
            field_options_from_str("date: \"2020-02-20\"\nname: DAY", DocumentFormat::Yaml)
                .expect("options");
        assert_eq!(options.date.as_deref(), Some("2020-02-20"));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn loads_toml_field_options() {
        let options =
            field_options_from_str("date = \"2020-02-20\"", DocumentFormat::Toml).expect("options");
        assert_eq!(options.date.as_deref(), Some("2020-02-20"));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_catalogs_keep_document_order() {
        let document = r#"
[DateTimeSymbols_zh]
months = ["一月"]
short_weekdays = ["周日"]

[DateTimeSymbols_af]
months = ["Januarie"]
short_weekdays = ["So."]
"#;
        let value = parse_document_str(document, DocumentFormat::Toml).expect("toml");
        let tables = symbol_tables_from_value(value).expect("tables");
        assert_eq!(
            tables.table_names(),
            vec![
                "DateTimeSymbols_zh".to_string(),
                "DateTimeSymbols_af".to_string()
            ]
        );
    }

    #[test]
    fn loads_catalogs() {
        let tables = symbol_tables_from_value(json!({
            "DateTimeSymbols_fr": {"months": ["janvier"], "short_weekdays": ["dim."]}
        }))
        .expect("tables");
        assert_eq!(tables.table_names(), vec!["DateTimeSymbols_fr".to_string()]);

        let messages = messages_from_value(json!({"fr": {"TODAY": "Aujourd'hui"}}))
            .expect("messages");
        assert!(messages.contains("fr"));
        assert!(messages_from_value(json!([])).is_err());
    }
}
