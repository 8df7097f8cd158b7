//! Locked key paths
//!
//! The global tree may declare dotted paths that no override, merge or
//! replace instruction is allowed to touch. Locks are matched by exact
//! string equality against the paths produced by [`flatten`].

use std::collections::BTreeSet;

use serde_json::Value;

use super::paths::{array_index, flatten, remove_path, PATH_SEPARATOR};

/// Set of locked dotted paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockSet {
    paths: BTreeSet<String>,
}

impl LockSet {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Read a lock list value. Anything but an array of strings yields no
    /// locks; non-string members are skipped.
    pub fn from_value(value: Option<&Value>) -> Self {
        let paths = value
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self { paths }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Delete every locked node from an override tree.
    ///
    /// Deleting a node discards everything beneath it. When a locked path
    /// runs through an array, the whole array is dropped instead: arrays
    /// merge wholesale, so any remnant would still overwrite the locked
    /// element. Returns the paths actually removed.
    pub fn remove_locked(&self, tree: &mut Value) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }

        let mut removed = Vec::new();
        for path in flatten(tree) {
            if !self.contains(&path) {
                continue;
            }
            let target = removal_target(tree, &path);
            if remove_path(tree, &target).is_some() {
                tracing::debug!(path = %path, removed = %target, "dropped path from instruction");
                removed.push(target);
            }
        }
        removed
    }
}

impl<S: Into<String>> FromIterator<S> for LockSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// The node to delete so that `path` no longer reaches the merge: the path
/// itself, or the outermost array it runs through.
fn removal_target(tree: &Value, path: &str) -> String {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    let mut current = tree;
    for (depth, segment) in segments.iter().enumerate() {
        let next = match current {
            Value::Object(map) => map.get(*segment),
            Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
            _ => None,
        };
        let Some(next) = next else {
            break;
        };
        if next.is_array() && depth + 1 < segments.len() {
            return segments[..=depth].join(".");
        }
        current = next;
    }
    path.to_string()
}
