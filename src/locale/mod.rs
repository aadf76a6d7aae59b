//! Locale selection for the calendar overlay.
//!
//! Before every overlay is created the [`LocaleResolver`] scans the symbol
//! catalog for tables named `DateTimeSymbols_<code>` and activates the ones
//! whose code the host's message catalog knows. The active table lives in a
//! [`LocaleState`]; the default one is process-wide and is never reset, so a
//! table chosen for one field is used by every calendar created afterwards.
//!
//! When several tables match, the last one in the catalog's enumeration order
//! wins. That order is whatever the catalog reports; callers wanting a
//! stable winner should use an ordered catalog such as [`SymbolTables`].

mod catalog;

use std::sync::{Arc, LazyLock, RwLock};

use regex::Regex;
use tracing::{debug, trace};

pub use catalog::{JsonMessages, MessageCatalog, SymbolCatalog, SymbolTable, SymbolTables};

static TABLE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^DateTimeSymbols_([A-Za-z0-9_]+)$").expect("valid symbol table pattern")
});

static GLOBAL_STATE: LazyLock<LocaleState> = LazyLock::new(LocaleState::new);

#[derive(Debug, Clone)]
pub struct ActiveLocale {
    pub name: String,
    pub table: Arc<SymbolTable>,
}

/// Holder of the active locale symbol table.
#[derive(Debug, Clone, Default)]
pub struct LocaleState {
    active: Arc<RwLock<Option<ActiveLocale>>>,
}

impl LocaleState {
    /// A state detached from the process-wide one.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide state every resolver uses unless told otherwise.
    pub fn global() -> Self {
        GLOBAL_STATE.clone()
    }

    pub fn active(&self) -> Option<ActiveLocale> {
        match self.active.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn active_name(&self) -> Option<String> {
        self.active().map(|locale| locale.name)
    }

    /// The table calendars should be built with: the active one, or English.
    pub fn table(&self) -> Arc<SymbolTable> {
        self.active()
            .map(|locale| locale.table)
            .unwrap_or_else(|| Arc::new(SymbolTable::english()))
    }

    fn set(&self, locale: ActiveLocale) {
        let mut guard = match self.active.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(locale);
    }
}

/// Maps a symbol table name to the message catalog key it corresponds to.
///
/// `DateTimeSymbols_en_GB` becomes `en.gb`: the code is lowercased and its
/// first underscore turned into a dot. Names without the prefix yield `None`.
pub fn catalog_key(table_name: &str) -> Option<String> {
    let captures = TABLE_NAME.captures(table_name)?;
    let code = captures.get(1)?.as_str().to_lowercase();
    Some(code.replacen('_', ".", 1))
}

#[derive(Clone)]
pub struct LocaleResolver {
    symbols: Arc<dyn SymbolCatalog>,
    messages: Arc<dyn MessageCatalog>,
    state: LocaleState,
}

impl std::fmt::Debug for LocaleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleResolver")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl LocaleResolver {
    pub fn new(symbols: Arc<dyn SymbolCatalog>, messages: Arc<dyn MessageCatalog>) -> Self {
        Self {
            symbols,
            messages,
            state: LocaleState::global(),
        }
    }

    /// A resolver with no tables; it never changes the active locale.
    pub fn empty() -> Self {
        Self::new(
            Arc::new(SymbolTables::new()),
            Arc::new(JsonMessages::default()),
        )
    }

    pub fn with_state(mut self, state: LocaleState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &LocaleState {
        &self.state
    }

    /// Activates the last catalog table whose code the message catalog knows.
    pub fn resolve(&self) {
        let mut selected = None;
        for name in self.symbols.table_names() {
            let Some(key) = catalog_key(&name) else {
                continue;
            };
            if !self.messages.contains(&key) {
                trace!(table = %name, key = %key, "no messages for symbol table");
                continue;
            }
            if let Some(table) = self.symbols.table(&name) {
                selected = Some(ActiveLocale { name, table });
            }
        }
        match selected {
            Some(locale) => {
                debug!(table = %locale.name, "activating calendar locale");
                self.state.set(locale);
            }
            None => trace!("no calendar locale matched; keeping the active one"),
        }
    }
}
