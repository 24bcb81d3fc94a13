//! Configuration types deserialized from `aion-tags.toml`.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The top-level configuration parsed from `aion-tags.toml`.
///
/// Controls the two knobs spec.md calls out for tag extraction: whether the
/// "qualified tags" extra is on, and which tag kinds are enabled, starting
/// from each language's default table and overridden per kind by name.
#[derive(Debug, Default, Deserialize)]
pub struct TagsConfig {
    /// Tag-emission settings.
    #[serde(default)]
    pub tags: TagSettings,
}

/// Settings under the `[tags]` table of `aion-tags.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct TagSettings {
    /// Emit a second, fully dot-qualified tag for every tag found inside a
    /// scope, in addition to the unqualified one.
    #[serde(default)]
    pub qualified: bool,
    /// Per-kind overrides of the language's default enabled-by-default
    /// table, keyed by the kind's long name (e.g. `"prototype"`,
    /// `"module"`) as listed by `aion tags --list-kinds`.
    #[serde(default)]
    pub kinds: BTreeMap<String, bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    #[test]
    fn empty_config_has_defaults() {
        let config = load_config_from_str("").unwrap();
        assert!(!config.tags.qualified);
        assert!(config.tags.kinds.is_empty());
    }

    #[test]
    fn qualified_flag_and_kind_overrides() {
        let toml = r#"
[tags]
qualified = true

[tags.kinds]
prototype = true
module = false
"#;
        let config = load_config_from_str(toml).unwrap();
        assert!(config.tags.qualified);
        assert_eq!(config.tags.kinds.get("prototype"), Some(&true));
        assert_eq!(config.tags.kinds.get("module"), Some(&false));
    }
}
