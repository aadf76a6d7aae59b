#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use blockdate::{
    CalendarOptions, CalendarWidget, ChangeBus, FieldChange, FieldId, FixedClock, OverlayHost,
    SubscriptionToken, locale::SymbolTable,
};
use chrono::NaiveDate;
use ratatui::layout::{Rect, Size};

pub const CALENDAR_SIZE: Size = Size {
    width: 22,
    height: 9,
};

pub fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2023, 7, 14).expect("valid date"))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[derive(Debug, Clone)]
pub struct CalendarRecord {
    pub first_month: String,
    pub options: Option<CalendarOptions>,
    pub seed: Option<NaiveDate>,
    pub rendered: bool,
    pub placed: Option<Rect>,
}

/// State shared between the fake host and the widgets it hands out.
#[derive(Debug, Default)]
pub struct WidgetLog {
    pub next_token: u64,
    pub live_tokens: BTreeSet<u64>,
    pub calendars: Vec<CalendarRecord>,
    pub container: Vec<String>,
}

#[derive(Debug)]
pub struct FakeWidget {
    index: usize,
    date: Option<NaiveDate>,
    log: Rc<RefCell<WidgetLog>>,
}

impl CalendarWidget for FakeWidget {
    fn configure(&mut self, options: &CalendarOptions) {
        self.log.borrow_mut().calendars[self.index].options = Some(*options);
    }

    fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
        self.log.borrow_mut().calendars[self.index].seed = date;
    }

    fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn render(&mut self) {
        let mut log = self.log.borrow_mut();
        log.calendars[self.index].rendered = true;
        let label = format!("calendar#{}", self.index);
        log.container.push(label);
    }

    fn size(&self) -> Size {
        CALENDAR_SIZE
    }

    fn place(&mut self, area: Rect) {
        self.log.borrow_mut().calendars[self.index].placed = Some(area);
    }

    fn subscribe_change(&mut self) -> SubscriptionToken {
        let mut log = self.log.borrow_mut();
        log.next_token += 1;
        let token = log.next_token;
        log.live_tokens.insert(token);
        SubscriptionToken::new(token)
    }

    fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        self.log.borrow_mut().live_tokens.remove(&token.get())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired {
    pub change: FieldChange,
    pub overlay_open: bool,
}

#[derive(Debug)]
pub struct FakeHost {
    pub slot: Option<FieldId>,
    pub refuse_slot: bool,
    pub events_enabled: bool,
    pub fired: Vec<Fired>,
    pub group_resets: usize,
    pub styles: Vec<String>,
    pub bounds: HashMap<FieldId, Rect>,
    pub viewport: Rect,
    pub widgets: Rc<RefCell<WidgetLog>>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            slot: None,
            refuse_slot: false,
            events_enabled: true,
            fired: Vec::new(),
            group_resets: 0,
            styles: Vec::new(),
            bounds: HashMap::new(),
            viewport: Rect::new(0, 0, 80, 24),
            widgets: Rc::new(RefCell::new(WidgetLog::default())),
        }
    }
}

impl FakeHost {
    pub fn live_tokens(&self) -> usize {
        self.widgets.borrow().live_tokens.len()
    }

    pub fn container(&self) -> Vec<String> {
        self.widgets.borrow().container.clone()
    }

    pub fn calendars(&self) -> Vec<CalendarRecord> {
        self.widgets.borrow().calendars.clone()
    }

    pub fn changes(&self) -> Vec<FieldChange> {
        self.fired.iter().map(|fired| fired.change.clone()).collect()
    }
}

impl OverlayHost for FakeHost {
    fn acquire_slot(&mut self, owner: FieldId) -> bool {
        if self.refuse_slot {
            return false;
        }
        if self.slot.is_some() && self.slot != Some(owner) {
            self.widgets.borrow_mut().container.clear();
        }
        self.slot = Some(owner);
        true
    }

    fn release_slot(&mut self, owner: FieldId) {
        if self.slot == Some(owner) {
            self.slot = None;
        }
    }

    fn slot_owner(&self) -> Option<FieldId> {
        self.slot
    }

    fn clear_container(&mut self) {
        self.widgets.borrow_mut().container.clear();
    }

    fn field_bounds(&self, field: FieldId) -> Rect {
        self.bounds
            .get(&field)
            .copied()
            .unwrap_or(Rect::new(4, 2, 12, 1))
    }

    fn viewport_bounds(&self) -> Rect {
        self.viewport
    }

    fn create_calendar(&mut self, symbols: &SymbolTable) -> Box<dyn CalendarWidget> {
        let mut log = self.widgets.borrow_mut();
        let index = log.calendars.len();
        log.calendars.push(CalendarRecord {
            first_month: symbols.months.first().cloned().unwrap_or_default(),
            options: None,
            seed: None,
            rendered: false,
            placed: None,
        });
        Box::new(FakeWidget {
            index,
            date: None,
            log: Rc::clone(&self.widgets),
        })
    }

    fn register_styles(&mut self, prefix: &str, _rules: &[&str]) {
        if !self.styles.iter().any(|known| known == prefix) {
            self.styles.push(prefix.to_string());
        }
    }
}

impl ChangeBus for FakeHost {
    fn events_enabled(&self) -> bool {
        self.events_enabled
    }

    fn fire(&mut self, change: FieldChange) {
        let overlay_open = self.slot.is_some() || !self.widgets.borrow().container.is_empty();
        self.fired.push(Fired {
            change,
            overlay_open,
        });
    }

    fn set_group(&mut self, grouped: bool) {
        if !grouped {
            self.group_resets += 1;
        }
    }
}
