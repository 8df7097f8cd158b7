//! Configuration holder
//!
//! [`Config`] keeps one resolved tree and answers reads with an optional
//! per-call client override. [`SharedConfig`] is a cloneable handle to one
//! holder, and [`ConfigSlot`] hands out the same handle to every caller
//! that initializes it: the first initialization wins.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde_json::{Map, Value};

use crate::config::{ConfigBuilder, ReservedKeys};

/// Holds one configuration tree
#[derive(Debug, Clone)]
pub struct Config {
    config: Value,
    builder: ConfigBuilder,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Value::Object(Map::new()))
    }
}

impl Config {
    /// Hold `config`. Anything but an object is replaced by an empty tree.
    pub fn new(config: Value) -> Self {
        Self {
            config: tree_or_empty(config),
            builder: ConfigBuilder::new(),
        }
    }

    /// Hold `config`, reading client instructions under custom reserved keys
    pub fn with_keys(config: Value, keys: ReservedKeys) -> Self {
        Self {
            config: tree_or_empty(config),
            builder: ConfigBuilder::with_keys(keys),
        }
    }

    /// Replace the held tree wholesale
    pub fn update(&mut self, config: Value) {
        self.config = tree_or_empty(config);
    }

    /// The held tree
    pub fn current(&self) -> &Value {
        &self.config
    }

    /// Return the config, letting a non-empty client tree override it.
    ///
    /// The client tree is merged with the held tree as global. If its
    /// instructions cannot be decoded the failure is logged and the held
    /// tree is returned unchanged.
    pub fn get(&self, overrides: Option<&Value>) -> Value {
        let Some(client) = overrides.filter(|v| v.as_object().is_some_and(|m| !m.is_empty()))
        else {
            return self.config.clone();
        };

        match self.builder.safe_merge(&self.config, None, Some(client)) {
            Ok(merged) => merged,
            Err(e) => {
                tracing::warn!(field = %e.field(), error = %e, "Config.get() with client config");
                self.config.clone()
            }
        }
    }
}

fn tree_or_empty(config: Value) -> Value {
    match config {
        Value::Object(_) => config,
        _ => Value::Object(Map::new()),
    }
}

/// Cloneable handle to one shared [`Config`]
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<Config>>,
}

impl SharedConfig {
    pub fn new(config: Value) -> Self {
        Self::from(Config::new(config))
    }

    /// See [`Config::get`]
    pub fn get(&self, overrides: Option<&Value>) -> Value {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(overrides)
    }

    /// See [`Config::update`]; visible through every clone of the handle
    pub fn update(&self, config: Value) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .update(config);
    }

    /// Copy of the held tree
    pub fn snapshot(&self) -> Value {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current()
            .clone()
    }

    /// Whether both handles refer to the same holder
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<Config> for SharedConfig {
    fn from(config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }
}

/// Context object owning at most one [`SharedConfig`].
///
/// Pass the slot to the call sites that need the shared configuration.
#[derive(Debug, Default)]
pub struct ConfigSlot {
    shared: OnceLock<SharedConfig>,
}

impl ConfigSlot {
    pub const fn new() -> Self {
        Self {
            shared: OnceLock::new(),
        }
    }

    /// Return the shared config, creating it from `config` on first use.
    ///
    /// Later calls ignore their argument and return the existing handle.
    pub fn get_or_init(&self, config: Value) -> SharedConfig {
        self.shared
            .get_or_init(|| SharedConfig::new(config))
            .clone()
    }

    /// The shared config, if initialized
    pub fn get(&self) -> Option<SharedConfig> {
        self.shared.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_defaults_non_tree() {
        assert_eq!(Config::new(json!("This is not an object.")).get(None), json!({}));
        assert_eq!(Config::new(Value::Null).get(None), json!({}));
        assert_eq!(Config::default().get(None), json!({}));
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let mut config = Config::new(json!({"constructed": "yes"}));
        config.update(json!({"update": "yes"}));

        assert_eq!(config.get(None), json!({"update": "yes"}));

        config.update(json!(42));
        assert_eq!(config.get(None), json!({}));
    }

    #[test]
    fn test_get_merges_client() {
        let config = Config::new(json!({"get": "it"}));
        let client = json!({"configMerge": {"got": "them"}});

        assert_eq!(config.get(Some(&client)), json!({"get": "it", "got": "them"}));
        assert_eq!(config.current(), &json!({"get": "it"}));
    }

    #[test]
    fn test_get_with_empty_client_returns_held() {
        let config = Config::new(json!({"get": "it"}));
        assert_eq!(config.get(Some(&json!({}))), json!({"get": "it"}));
        assert_eq!(config.get(Some(&json!("text"))), json!({"get": "it"}));
    }

    #[test]
    fn test_get_swallows_parse_error() {
        let config = Config::new(json!({"get": "it"}));
        let client = json!({"configReplace": "Not a JS Object or a JSON String"});

        assert_eq!(config.get(Some(&client)), json!({"get": "it"}));
    }

    #[test]
    fn test_shared_update_visible_to_clones() {
        let first = SharedConfig::new(json!({"name": "config1"}));
        let second = first.clone();

        second.update(json!({"name": "updated"}));

        assert!(first.ptr_eq(&second));
        assert_eq!(first.snapshot(), json!({"name": "updated"}));
    }

    #[test]
    fn test_slot_first_init_wins() {
        let slot = ConfigSlot::new();
        assert!(slot.get().is_none());

        let first = slot.get_or_init(json!({"name": "singleton1"}));
        let second = slot.get_or_init(json!({"name": "singleton2"}));

        assert!(first.ptr_eq(&second));
        assert_eq!(second.get(None)["name"], "singleton1");
    }
}
