mod options;

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use crate::{
    date::{format_canonical, validate},
    host::{BlockRef, ChangeBus, Clock, EditorHost, FieldChange, FieldId},
    overlay::{OverlayController, OverlayState},
};

pub use options::{FieldOptions, OptionsError};

/// Extra validation supplied by the block definition. It receives a canonical
/// date and returns the value to store, or `None` to reject the change.
pub type ValueValidator = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// The operations a block holds its fields to.
pub trait Field {
    fn value(&self) -> Option<&str>;

    fn validate(&self, candidate: Option<&str>) -> Option<String>;

    fn set_value(&mut self, candidate: Option<&str>, bus: &mut dyn ChangeBus) -> bool;

    fn activate<H: EditorHost>(&mut self, overlay: &mut OverlayController<H>) -> bool;

    fn dispose<H: EditorHost>(&mut self, overlay: &mut OverlayController<H>);
}

/// An editable calendar date on a block.
pub struct DateField {
    id: FieldId,
    name: Option<String>,
    value: Option<String>,
    validator: Option<ValueValidator>,
    owner: Option<BlockRef>,
    disposed: bool,
}

impl DateField {
    /// Creates a field holding `initial`, or today's date when `initial` is
    /// missing or not a canonical date. The external validator is not
    /// consulted here.
    pub fn new(initial: Option<&str>, clock: &dyn Clock) -> Self {
        let value = validate(initial).unwrap_or_else(|| format_canonical(clock.today()));
        Self {
            id: FieldId::next(),
            name: None,
            value: Some(value),
            validator: None,
            owner: None,
            disposed: false,
        }
    }

    pub fn from_options(options: &FieldOptions, clock: &dyn Clock) -> Self {
        Self::new(options.date.as_deref(), clock)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_owner(mut self, owner: BlockRef) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_validator(
        mut self,
        validator: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn set_owner(&mut self, owner: BlockRef) {
        self.owner = Some(owner);
    }

    pub fn set_validator(&mut self, validator: Option<ValueValidator>) {
        self.validator = validator;
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn owner(&self) -> Option<&BlockRef> {
        self.owner.as_ref()
    }

    pub fn is_rtl(&self) -> bool {
        self.owner.as_ref().is_some_and(|owner| owner.rtl)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_serializable(&self) -> bool {
        true
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Text shown on the block.
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    pub fn to_options(&self) -> FieldOptions {
        FieldOptions {
            date: self.value.clone(),
        }
    }

    pub fn overlay_state<H: EditorHost>(&self, overlay: &OverlayController<H>) -> OverlayState {
        overlay.state_of(self.id)
    }

    /// Canonical form of `candidate` after the installed validator, if any.
    pub fn validate(&self, candidate: Option<&str>) -> Option<String> {
        let canonical = validate(candidate)?;
        match &self.validator {
            Some(validator) => validate(validator(&canonical).as_deref()),
            None => Some(canonical),
        }
    }

    /// Stores `candidate` when it validates. Returns whether the value
    /// changed; a change fires one notification to the owning block.
    pub fn set_value(&mut self, candidate: Option<&str>, bus: &mut dyn ChangeBus) -> bool {
        let Some(next) = self.validate(candidate) else {
            trace!(field = %self.id, ?candidate, "rejected date value");
            return false;
        };
        if self.value.as_deref() == Some(next.as_str()) {
            return false;
        }
        let previous = self.value.replace(next.clone());
        if let Some(owner) = &self.owner
            && bus.events_enabled()
        {
            bus.fire(FieldChange {
                block_id: owner.block_id.clone(),
                field_name: self.name.clone(),
                old_value: previous,
                new_value: next,
            });
        }
        true
    }

    pub fn activate<H: EditorHost>(&mut self, overlay: &mut OverlayController<H>) -> bool {
        if self.disposed {
            trace!(field = %self.id, "activate ignored on a disposed field");
            return false;
        }
        overlay.open(self)
    }

    /// `Enter` or `Space` opens the calendar, `Esc` closes it.
    pub fn handle_key<H: EditorHost>(
        &mut self,
        key: &KeyEvent,
        overlay: &mut OverlayController<H>,
    ) -> bool {
        if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(overlay),
            KeyCode::Esc => overlay.close(self.id),
            _ => false,
        }
    }

    /// Closes any overlay this field owns and detaches it from its block.
    pub fn dispose<H: EditorHost>(&mut self, overlay: &mut OverlayController<H>) {
        if self.disposed {
            return;
        }
        overlay.dispose(self.id);
        self.owner = None;
        self.validator = None;
        self.disposed = true;
    }
}

/// A copy is a new field: it gets its own [`FieldId`] and never shares the
/// original's overlay.
impl Clone for DateField {
    fn clone(&self) -> Self {
        Self {
            id: FieldId::next(),
            name: self.name.clone(),
            value: self.value.clone(),
            validator: self.validator.clone(),
            owner: self.owner.clone(),
            disposed: self.disposed,
        }
    }
}

impl Field for DateField {
    fn value(&self) -> Option<&str> {
        DateField::value(self)
    }

    fn validate(&self, candidate: Option<&str>) -> Option<String> {
        DateField::validate(self, candidate)
    }

    fn set_value(&mut self, candidate: Option<&str>, bus: &mut dyn ChangeBus) -> bool {
        DateField::set_value(self, candidate, bus)
    }

    fn activate<H: EditorHost>(&mut self, overlay: &mut OverlayController<H>) -> bool {
        DateField::activate(self, overlay)
    }

    fn dispose<H: EditorHost>(&mut self, overlay: &mut OverlayController<H>) {
        DateField::dispose(self, overlay)
    }
}

impl std::fmt::Debug for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateField")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("value", &self.value)
            .field("validator", &self.validator.is_some())
            .field("owner", &self.owner)
            .field("disposed", &self.disposed)
            .finish()
    }
}
