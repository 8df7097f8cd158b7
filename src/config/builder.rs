//! Merge engine
//!
//! Resolves one configuration from three layers:
//! 1. Global (lowest priority, may lock paths)
//! 2. Secondary override fragment
//! 3. Client merge and replace instructions
//!
//! followed by the secondary tree as a whole. Locked paths are stripped
//! from every instruction before it is applied, so the global value at a
//! locked path always survives.

use serde_json::{Map, Value};

use super::defaults::ReservedKeys;
use super::error::MergeError;
use super::lock::LockSet;
use super::merge::{merge_all, merge_into};
use super::paths::replace_path;
use super::request::{Instructions, MergeRequest};
use super::resolved::{FilteredPath, InstructionSource, ResolvedConfig};

/// Merges layered configuration trees that carry reserved keys
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    keys: ReservedKeys,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use different reserved key names
    pub fn with_keys(keys: ReservedKeys) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &ReservedKeys {
        &self.keys
    }

    /// Safely merge the three layers into a new tree.
    ///
    /// The inputs are never modified. Fails only when `configMerge` or
    /// `configReplace` is a string that is not valid JSON.
    pub fn safe_merge(
        &self,
        global: &Value,
        secondary: Option<&Value>,
        client: Option<&Value>,
    ) -> Result<Value, MergeError> {
        self.resolve(global, secondary, client)
            .map(ResolvedConfig::into_value)
    }

    /// Like [`safe_merge`](Self::safe_merge), keeping the lock provenance
    pub fn resolve(
        &self,
        global: &Value,
        secondary: Option<&Value>,
        client: Option<&Value>,
    ) -> Result<ResolvedConfig, MergeError> {
        let request = MergeRequest::from_layers(global, secondary, client, &self.keys)?;
        Ok(request.resolve())
    }
}

/// Merge with the default reserved keys
pub fn safe_merge(
    global: &Value,
    secondary: Option<&Value>,
    client: Option<&Value>,
) -> Result<Value, MergeError> {
    ConfigBuilder::new().safe_merge(global, secondary, client)
}

impl MergeRequest {
    /// Run the merge.
    ///
    /// Order of operations:
    /// 1. Strip locked paths from the override, merge and replace instructions
    /// 2. Apply replacements directly to the global tree
    /// 3. Deep-merge override then merge fragment into the global tree
    /// 4. Deep-merge the secondary tree, with the filtered override, on top
    pub fn resolve(self) -> ResolvedConfig {
        let MergeRequest {
            mut global,
            locks,
            mut secondary,
            global_override,
            instructions: Instructions { merge, replace },
            keys,
        } = self;

        let mut global_override = global_override.map(Value::Object);
        let mut merge = merge.map(Value::Object);
        let mut replace = replace.unwrap_or_default();
        let mut filtered = Vec::new();

        if !locks.is_empty() {
            if let Some(tree) = merge.as_mut() {
                record(&mut filtered, InstructionSource::Merge, locks.remove_locked(tree));
            }
            let mut locked = Vec::new();
            replace.retain(|path, _| {
                let keep = !locks.contains(path);
                if !keep {
                    locked.push(path.clone());
                }
                keep
            });
            record(&mut filtered, InstructionSource::Replace, locked);
            if let Some(tree) = global_override.as_mut() {
                record(&mut filtered, InstructionSource::Override, locks.remove_locked(tree));
            }
        }

        // Entries apply in the order the caller wrote them.
        let mut applied = Vec::with_capacity(replace.len());
        for (path, value) in replace {
            let replacement = match value {
                Value::String(s) if s == keys.delete_sentinel => None,
                value => Some(value),
            };
            if replace_path(&mut global, &path, replacement) {
                applied.push(path);
            } else {
                tracing::debug!(path = %path, "replace path does not address a node, skipped");
            }
        }

        // Fragments merged over the replaced tree may not undo a replacement.
        let replaced = LockSet::new(applied);
        let sources = global_override
            .iter()
            .cloned()
            .chain(merge)
            .map(|mut tree| {
                replaced.remove_locked(&mut tree);
                tree
            });
        merge_all(&mut global, sources);

        if let Some(tree) = global_override {
            secondary.insert(keys.global_override.clone(), tree);
        }
        merge_into(&mut global, Value::Object(secondary));

        if !filtered.is_empty() {
            tracing::debug!(count = filtered.len(), "locked paths filtered from instructions");
        }

        ResolvedConfig {
            config: global,
            filtered,
        }
    }
}

fn record(filtered: &mut Vec<FilteredPath>, source: InstructionSource, paths: Vec<String>) {
    filtered.extend(paths.into_iter().map(|path| FilteredPath { source, path }));
}

impl From<Value> for MergeRequest {
    fn from(global: Value) -> Self {
        Self::new(global)
    }
}

impl From<Map<String, Value>> for MergeRequest {
    fn from(global: Map<String, Value>) -> Self {
        Self::new(Value::Object(global))
    }
}
