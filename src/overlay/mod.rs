//! Lifecycle of the calendar overlay.
//!
//! One [`OverlayController`] serves every date field of a host editor. It
//! holds the only live calendar widget together with the single change
//! subscription registered on it, so a field is open exactly when the
//! controller holds a token for it.

pub mod placement;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::{
    date::{format_canonical, parse_canonical},
    field::DateField,
    host::{CalendarOptions, CalendarWidget, EditorHost, FieldId, SubscriptionToken},
    locale::{LocaleResolver, LocaleState},
    style,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    Open,
}

struct ActiveOverlay {
    owner: FieldId,
    token: Option<SubscriptionToken>,
    widget: Box<dyn CalendarWidget>,
}

pub struct OverlayController<H: EditorHost> {
    host: H,
    resolver: LocaleResolver,
    calendar: CalendarOptions,
    active: Option<ActiveOverlay>,
}

impl<H: EditorHost> OverlayController<H> {
    /// A controller without locale tables; calendars use the process-wide
    /// active table (English until something activates another one).
    pub fn new(host: H) -> Self {
        Self::with_resolver(host, LocaleResolver::empty())
    }

    pub fn with_resolver(mut host: H, resolver: LocaleResolver) -> Self {
        style::register(&mut host);
        Self {
            host,
            resolver,
            calendar: CalendarOptions::default(),
            active: None,
        }
    }

    pub fn with_calendar_options(mut self, options: CalendarOptions) -> Self {
        self.calendar = options;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn locale_state(&self) -> &LocaleState {
        self.resolver.state()
    }

    pub fn owner(&self) -> Option<FieldId> {
        self.active.as_ref().map(|active| active.owner)
    }

    pub fn live_token(&self) -> Option<SubscriptionToken> {
        self.active.as_ref().and_then(|active| active.token)
    }

    pub fn state_of(&self, field: FieldId) -> OverlayState {
        match &self.active {
            Some(active) if active.owner == field && active.token.is_some() => OverlayState::Open,
            _ => OverlayState::Closed,
        }
    }

    /// Shows the calendar for `field`, closing whatever overlay was open
    /// before, including one this field already owned.
    pub fn open(&mut self, field: &DateField) -> bool {
        let id = field.id();
        if let Some(previous) = self.owner() {
            self.close(previous);
        }
        if !self.host.acquire_slot(id) {
            trace!(field = %id, "host refused the overlay slot");
            return false;
        }

        let anchor = self.host.field_bounds(id);
        let viewport = self.host.viewport_bounds();
        self.resolver.resolve();
        let symbols = self.resolver.state().table();

        let mut widget = self.host.create_calendar(&symbols);
        widget.configure(&self.calendar);
        widget.set_date(field.value().and_then(parse_canonical));
        widget.render();
        let area = self
            .host
            .position_with_anchor(viewport, anchor, widget.size(), field.is_rtl());
        widget.place(area);
        let token = widget.subscribe_change();

        debug!(field = %id, ?area, "calendar overlay opened");
        self.active = Some(ActiveOverlay {
            owner: id,
            token: Some(token),
            widget,
        });
        true
    }

    /// Applies a pick reported by the calendar widget.
    ///
    /// Returns `false` when the event does not belong to the live
    /// subscription of `field`. Otherwise the overlay is closed before the
    /// new value reaches the field, so listeners notified by the value
    /// change never see the overlay still open.
    pub fn handle_change(
        &mut self,
        field: &mut DateField,
        token: SubscriptionToken,
        picked: Option<NaiveDate>,
    ) -> bool {
        let id = field.id();
        if self.owner() != Some(id) || self.live_token() != Some(token) {
            trace!(field = %id, token = token.get(), "ignoring stale calendar change");
            return false;
        }
        let value = picked.map(format_canonical).unwrap_or_default();
        self.close(id);
        field.set_value(Some(value.as_str()), &mut self.host);
        true
    }

    /// Closes the overlay if `field` owns it; a no-op otherwise.
    pub fn close(&mut self, field: FieldId) -> bool {
        if self.owner() != Some(field) {
            trace!(field = %field, "close ignored: not the overlay owner");
            return false;
        }
        let Some(mut active) = self.active.take() else {
            return false;
        };
        if let Some(token) = active.token.take()
            && !active.widget.unsubscribe(token)
        {
            trace!(field = %field, token = token.get(), "change listener was already gone");
        }
        self.host.set_group(false);
        // Another widget may have taken the slot from under us; its content
        // stays untouched.
        if self.host.slot_owner() == Some(field) {
            self.host.clear_container();
            self.host.release_slot(field);
        }
        debug!(field = %field, "calendar overlay closed");
        true
    }

    /// External dismissal (click-away, the host hiding its overlay).
    pub fn dismiss(&mut self) -> bool {
        match self.owner() {
            Some(owner) => self.close(owner),
            None => false,
        }
    }

    /// Teardown for a destroyed field.
    pub fn dispose(&mut self, field: FieldId) -> bool {
        self.close(field)
    }
}

impl<H: EditorHost + std::fmt::Debug> std::fmt::Debug for OverlayController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayController")
            .field("host", &self.host)
            .field("owner", &self.owner())
            .field("token", &self.live_token())
            .finish()
    }
}
