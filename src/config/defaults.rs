//! Reserved key names
//!
//! Plain layered trees carry their merge instructions under these keys.

use serde::{Deserialize, Serialize};

/// Key in the global tree listing locked dotted paths
pub const GLOBAL_LOCK_KEY: &str = "globalLock";

/// Key in the secondary tree holding the override fragment
pub const GLOBAL_OVERRIDE_KEY: &str = "globalOverride";

/// Key in the client tree holding the merge fragment
pub const CONFIG_MERGE_KEY: &str = "configMerge";

/// Key in the client tree holding the replace map
pub const CONFIG_REPLACE_KEY: &str = "configReplace";

/// Replacement value that deletes the addressed key.
///
/// A legitimate replacement value equal to this string cannot be expressed.
pub const DELETE_SENTINEL: &str = "undefined";

/// Names of the reserved keys sniffed out of plain layered trees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReservedKeys {
    /// Lock list in the global tree (default: "globalLock")
    pub lock: String,

    /// Override fragment in the secondary tree (default: "globalOverride")
    pub global_override: String,

    /// Merge fragment in the client tree (default: "configMerge")
    pub merge: String,

    /// Replace map in the client tree (default: "configReplace")
    pub replace: String,

    /// Replacement value meaning "delete" (default: "undefined")
    pub delete_sentinel: String,
}

impl Default for ReservedKeys {
    fn default() -> Self {
        Self {
            lock: GLOBAL_LOCK_KEY.to_string(),
            global_override: GLOBAL_OVERRIDE_KEY.to_string(),
            merge: CONFIG_MERGE_KEY.to_string(),
            replace: CONFIG_REPLACE_KEY.to_string(),
            delete_sentinel: DELETE_SENTINEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let keys = ReservedKeys::default();
        assert_eq!(keys.lock, "globalLock");
        assert_eq!(keys.global_override, "globalOverride");
        assert_eq!(keys.merge, "configMerge");
        assert_eq!(keys.replace, "configReplace");
        assert_eq!(keys.delete_sentinel, "undefined");
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let keys: ReservedKeys =
            serde_json::from_str(r#"{"globalOverride": "lambdaOverride"}"#).unwrap();

        assert_eq!(keys.global_override, "lambdaOverride");
        assert_eq!(keys.lock, "globalLock");
        assert_eq!(keys.delete_sentinel, "undefined");
    }
}
