use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Month and weekday names plus week layout for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    pub months: Vec<String>,
    pub short_weekdays: Vec<String>,
    /// 0 = Monday, matching `chrono::Weekday::num_days_from_monday`.
    #[serde(default)]
    pub first_day_of_week: u8,
}

impl SymbolTable {
    pub fn english() -> Self {
        let months = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        let weekdays = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        Self {
            months: months.iter().map(|name| name.to_string()).collect(),
            short_weekdays: weekdays.iter().map(|name| name.to_string()).collect(),
            first_day_of_week: 6,
        }
    }
}

/// The process's collection of locale symbol tables.
pub trait SymbolCatalog {
    /// Table names in the catalog's natural enumeration order.
    fn table_names(&self) -> Vec<String>;

    fn table(&self, name: &str) -> Option<Arc<SymbolTable>>;
}

/// The host's message catalog, addressed by dotted keys.
pub trait MessageCatalog {
    fn contains(&self, dotted_key: &str) -> bool;
}

/// Symbol tables keyed by name; insertion order is enumeration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTables {
    tables: IndexMap<String, Arc<SymbolTable>>,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: impl Into<String>, table: SymbolTable) -> Self {
        self.insert(name, table);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, table: SymbolTable) {
        self.tables.insert(name.into(), Arc::new(table));
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl SymbolCatalog for SymbolTables {
    fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    fn table(&self, name: &str) -> Option<Arc<SymbolTable>> {
        self.tables.get(name).cloned()
    }
}

/// Message catalog backed by a JSON document of nested objects.
#[derive(Debug, Clone, Default)]
pub struct JsonMessages {
    root: Value,
}

impl JsonMessages {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn lookup(&self, dotted_key: &str) -> Option<&Value> {
        dotted_key
            .split('.')
            .try_fold(&self.root, |node, segment| node.as_object()?.get(segment))
    }
}

impl MessageCatalog for JsonMessages {
    fn contains(&self, dotted_key: &str) -> bool {
        self.lookup(dotted_key).is_some_and(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(num) => num.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
