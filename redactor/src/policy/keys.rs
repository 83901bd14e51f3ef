//! Sensitive-key extraction for map fields.
//!
//! A flagged map field's extension payload names *which keys* inside the map
//! are sensitive. The caller supplies a [`KeyExtractor`] to read that
//! payload; [`common_sensitive_keys`] covers the payload shapes this crate
//! defines itself, via the [`SensitiveKeys`] capability.

use std::collections::{BTreeMap, HashSet};

use redactor_reflect::ExtensionValue;

/// Name of the record entry that holds the sensitive key list in the common
/// payload shape built by [`map_keys_extension`].
pub const MAP_KEYS_FIELD: &str = "map_keys_to_redact";

/// Derives the set of sensitive map keys from a map field's extension
/// payload.
///
/// Called once per flagged map field during a walk; the result is never
/// cached. An empty set means "nothing to redact in this map."
pub type KeyExtractor = Box<dyn Fn(&ExtensionValue) -> HashSet<String> + Send + Sync>;

/// Capability for extension payloads that can name their sensitive map keys.
pub trait SensitiveKeys {
    /// Returns the sensitive key set, or `None` when the payload carries no
    /// keys (including an empty list).
    fn sensitive_keys(&self) -> Option<HashSet<String>>;
}

impl SensitiveKeys for ExtensionValue {
    fn sensitive_keys(&self) -> Option<HashSet<String>> {
        let keys: HashSet<String> = match self {
            ExtensionValue::StringList(keys) => keys.iter().cloned().collect(),
            ExtensionValue::Record(_) => self
                .get(MAP_KEYS_FIELD)?
                .as_string_list()?
                .iter()
                .cloned()
                .collect(),
            _ => return None,
        };

        if keys.is_empty() { None } else { Some(keys) }
    }
}

/// The default key extractor.
///
/// Reads the payload shapes covered by [`SensitiveKeys`] and yields no keys
/// for anything else, so unrelated payloads leave their maps untouched.
pub fn common_sensitive_keys(payload: &ExtensionValue) -> HashSet<String> {
    payload.sensitive_keys().unwrap_or_default()
}

/// Builds the common map-field payload carrying a sensitive key list.
pub fn map_keys_extension<I, S>(keys: I) -> ExtensionValue
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ExtensionValue::Record(BTreeMap::from([(
        MAP_KEYS_FIELD.to_string(),
        ExtensionValue::StringList(keys.into_iter().map(Into::into).collect()),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_list_payload_yields_its_keys() {
        let payload = ExtensionValue::StringList(vec!["email".to_string(), "phone".to_string()]);
        let keys = common_sensitive_keys(&payload);
        assert_eq!(keys, HashSet::from(["email".to_string(), "phone".to_string()]));
    }

    #[test]
    fn record_payload_yields_the_named_list() {
        let payload = map_keys_extension(["email", "phone"]);
        let keys = common_sensitive_keys(&payload);
        assert_eq!(keys, HashSet::from(["email".to_string(), "phone".to_string()]));
    }

    #[test]
    fn unrelated_payloads_yield_no_keys() {
        assert!(common_sensitive_keys(&ExtensionValue::Bool(true)).is_empty());
        assert!(common_sensitive_keys(&ExtensionValue::String("x".to_string())).is_empty());
        assert!(
            common_sensitive_keys(&ExtensionValue::Record(BTreeMap::new())).is_empty()
        );
    }

    #[test]
    fn empty_key_lists_yield_no_keys() {
        assert!(ExtensionValue::StringList(Vec::new()).sensitive_keys().is_none());
        assert!(map_keys_extension(Vec::<String>::new()).sensitive_keys().is_none());
    }
}
