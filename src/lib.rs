#![deny(rust_2018_idioms)]
//! A calendar date field for block-based editors.
//!
//! [`DateField`] holds a canonical `YYYY-MM-DD` value and opens a calendar
//! overlay through the [`OverlayController`] its host provides. Rendering,
//! geometry and the change bus all come from the host via the traits in
//! [`host`].

pub mod date;
mod field;
pub mod host;
pub mod io;
pub mod locale;
mod overlay;
pub mod style;

pub use date::{format_canonical, parse_canonical, validate};
pub use field::{DateField, Field, FieldOptions, OptionsError, ValueValidator};
pub use host::{
    BlockRef, CalendarOptions, CalendarWidget, ChangeBus, Clock, EditorHost, FieldChange, FieldId,
    FixedClock, OverlayHost, SubscriptionToken, SystemClock,
};
pub use locale::{LocaleResolver, LocaleState};
pub use overlay::{OverlayController, OverlayState, placement};

pub mod prelude {
    pub use super::{
        BlockRef, ChangeBus, Clock, DateField, EditorHost, Field, FieldOptions, OverlayController,
        OverlayHost, OverlayState,
    };
}
