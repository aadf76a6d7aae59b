use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;

/// Serialize a value for printing or persisting in the given format.
pub fn serialize_value(value: &Value, format: DocumentFormat, pretty: bool) -> Result<String> {
    match format {
        DocumentFormat::Json => {
            if pretty {
                serde_json::to_string_pretty(value).context("failed to serialize JSON")
            } else {
                serde_json::to_string(value).context("failed to serialize JSON")
            }
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(value).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            if pretty {
                toml::to_string_pretty(value).context("failed to serialize TOML")
            } else {
                toml::to_string(value).context("failed to serialize TOML")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_and_pretty_json() {
        let value = json!({"date": "2020-02-20"});
        assert_eq!(
            serialize_value(&value, DocumentFormat::Json, false).expect("json"),
            "{\"date\":\"2020-02-20\"}"
        );
        assert!(
            serialize_value(&value, DocumentFormat::Json, true)
                .expect("json")
                .contains("\n")
        );
    }
}
