use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration object a date field is built from, e.g. `{"date": "2020-02-20"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl FieldOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Reads the options from a block definition argument; keys other than
    /// `date` are ignored.
    pub fn from_json(value: &Value) -> Result<Self, OptionsError> {
        if !value.is_object() {
            return Err(OptionsError::new("", "field options must be an object"));
        }
        // `date` is the only recognized key, so any remaining failure is about it.
        serde_json::from_value(value.clone())
            .map_err(|err| OptionsError::new("date", err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsError {
    pub key: String,
    pub message: String,
}

impl OptionsError {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.key, self.message)
        }
    }
}

impl std::error::Error for OptionsError {}
