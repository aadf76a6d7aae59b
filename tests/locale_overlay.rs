mod common;

use std::sync::Arc;

use blockdate::{
    DateField, LocaleResolver, LocaleState, OverlayController,
    locale::{JsonMessages, SymbolTable, SymbolTables},
};
use common::{FakeHost, clock};
use serde_json::json;

fn table(first_month: &str) -> SymbolTable {
    SymbolTable {
        months: vec![first_month.to_string()],
        short_weekdays: Vec::new(),
        first_day_of_week: 0,
    }
}

fn resolver(messages: serde_json::Value, state: &LocaleState) -> LocaleResolver {
    let symbols = SymbolTables::new()
        .with_table("DateTimeSymbols_de", table("Januar"))
        .with_table("DateTimeSymbols_fr_CA", table("janvier"));
    LocaleResolver::new(Arc::new(symbols), Arc::new(JsonMessages::new(messages)))
        .with_state(state.clone())
}

#[test]
fn calendar_is_created_with_the_resolved_table() {
    let state = LocaleState::new();
    let mut overlay =
        OverlayController::with_resolver(FakeHost::default(), resolver(json!({"de": true}), &state));
    let mut field = DateField::new(Some("2024-03-01"), &clock());

    field.activate(&mut overlay);

    assert_eq!(overlay.locale_state().active_name().as_deref(), Some("DateTimeSymbols_de"));
    assert_eq!(overlay.host().calendars()[0].first_month, "Januar");
}

#[test]
fn unresolved_locale_uses_english() {
    let state = LocaleState::new();
    let mut overlay =
        OverlayController::with_resolver(FakeHost::default(), resolver(json!({}), &state));
    let mut field = DateField::new(Some("2024-03-01"), &clock());

    field.activate(&mut overlay);

    assert!(state.active().is_none());
    assert_eq!(overlay.host().calendars()[0].first_month, "January");
}

#[test]
fn selection_outlives_the_field_that_triggered_it() {
    let state = LocaleState::new();
    let mut first = OverlayController::with_resolver(
        FakeHost::default(),
        resolver(json!({"fr": {"ca": "oui"}}), &state),
    );
    let mut field = DateField::new(None, &clock());
    field.activate(&mut first);
    field.dispose(&mut first);

    // A later controller whose catalog matches nothing still sees the choice.
    let mut second =
        OverlayController::with_resolver(FakeHost::default(), resolver(json!({}), &state));
    let mut other = DateField::new(None, &clock());
    other.activate(&mut second);

    assert_eq!(state.active_name().as_deref(), Some("DateTimeSymbols_fr_CA"));
    assert_eq!(second.host().calendars()[0].first_month, "janvier");
}
