//! Capabilities the surrounding block editor supplies.
//!
//! The date field never renders anything itself. It asks the host for the
//! single overlay slot, for geometry, for a calendar widget and for the
//! change-notification bus, all through the traits in this module.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDate};
use ratatui::layout::{Rect, Size};

use crate::locale::SymbolTable;
use crate::overlay::placement;

/// Process-unique identity of a field, used for slot ownership and geometry
/// queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u64);

static NEXT_FIELD_ID: AtomicU64 = AtomicU64::new(1);

impl FieldId {
    pub(crate) fn next() -> Self {
        FieldId(NEXT_FIELD_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

/// Opaque handle for one change-listener registration on a calendar widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

impl SubscriptionToken {
    pub fn new(raw: u64) -> Self {
        SubscriptionToken(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Non-owning reference to the block that contains a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRef {
    pub block_id: String,
    pub rtl: bool,
}

impl BlockRef {
    pub fn new(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            rtl: false,
        }
    }

    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }
}

/// One accepted value change, addressed to the owning block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub block_id: String,
    pub field_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: String,
}

/// The editor's change-notification bus (and its undo grouping switch).
pub trait ChangeBus {
    /// Hosts silence the bus while loading documents or replaying undo.
    fn events_enabled(&self) -> bool {
        true
    }

    fn fire(&mut self, change: FieldChange);

    /// Starts or ends a group of events that undo as one step.
    fn set_group(&mut self, grouped: bool);
}

/// Options the field applies to every calendar it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarOptions {
    pub allow_none: bool,
    pub show_week_numbers: bool,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            allow_none: false,
            show_week_numbers: false,
        }
    }
}

/// The external calendar widget, rendered inside the host overlay container.
pub trait CalendarWidget {
    fn configure(&mut self, options: &CalendarOptions);

    fn set_date(&mut self, date: Option<NaiveDate>);

    fn date(&self) -> Option<NaiveDate>;

    fn render(&mut self);

    /// Size of the rendered widget; only meaningful after [`render`](Self::render).
    fn size(&self) -> Size;

    fn place(&mut self, area: Rect);

    /// Registers the one change listener; the host reports picks with this token.
    fn subscribe_change(&mut self) -> SubscriptionToken;

    /// Returns `false` when `token` was not (or no longer) registered.
    fn unsubscribe(&mut self, token: SubscriptionToken) -> bool;
}

/// Overlay container, geometry and widget factory of the host editor.
pub trait OverlayHost {
    /// Claims the process-wide overlay slot for `owner`.
    ///
    /// The controller is not told when something else takes the slot later.
    /// A host that hands the slot to another widget must call
    /// [`OverlayController::dismiss`](crate::OverlayController::dismiss)
    /// first, otherwise the displaced field keeps reporting an open overlay
    /// and a live token until it is closed.
    fn acquire_slot(&mut self, owner: FieldId) -> bool;

    /// Gives the slot back; ignored unless `owner` holds it.
    fn release_slot(&mut self, owner: FieldId);

    fn slot_owner(&self) -> Option<FieldId>;

    fn clear_container(&mut self);

    fn field_bounds(&self, field: FieldId) -> Rect;

    fn viewport_bounds(&self) -> Rect;

    fn create_calendar(&mut self, symbols: &SymbolTable) -> Box<dyn CalendarWidget>;

    fn position_with_anchor(&self, viewport: Rect, anchor: Rect, size: Size, rtl: bool) -> Rect {
        placement::position_with_anchor(viewport, anchor, size, rtl)
    }

    /// Injects a style sheet; hosts are expected to ignore repeated prefixes.
    fn register_styles(&mut self, prefix: &str, rules: &[&str]) {
        let _ = (prefix, rules);
    }
}

/// Everything the overlay controller needs from its host.
pub trait EditorHost: OverlayHost + ChangeBus {}

impl<T> EditorHost for T where T: OverlayHost + ChangeBus {}

/// Source of "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local-time-zone wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen on one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
