//! Dotted key paths over configuration trees
//!
//! A path such as `menuConfig.initial.audios.1` walks nested keys in
//! order. Numeric segments index into arrays. There is no escaping, so a
//! key that itself contains `.` cannot be addressed.

use serde_json::{Map, Value};

/// Separator between path segments
pub const PATH_SEPARATOR: char = '.';

/// Flatten a tree into the dotted path of every node beneath it.
///
/// Intermediate objects and arrays are listed before their children, and
/// array elements contribute their index as a segment.
pub fn flatten(value: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    flatten_recursive(value, "", &mut paths);
    paths
}

fn flatten_recursive(value: &Value, prefix: &str, paths: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                visit(key, child, prefix, paths);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                visit(&i.to_string(), child, prefix, paths);
            }
        }
        _ => {}
    }
}

fn visit(key: &str, child: &Value, prefix: &str, paths: &mut Vec<String>) {
    let current = join(prefix, key);
    paths.push(current.clone());
    if is_container(child) {
        flatten_recursive(child, &current, paths);
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", prefix, PATH_SEPARATOR, key)
    }
}

/// Objects and arrays can be walked into
pub fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

/// Parse a segment as an array index (digits only)
pub fn array_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => items.get(array_index(segment)?),
        _ => None,
    }
}

fn child_mut<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => items.get_mut(array_index(segment)?),
        _ => None,
    }
}

/// Get a value by dotted path
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split(PATH_SEPARATOR)
        .try_fold(root, |current, segment| child(current, segment))
}

/// Remove the node at `path`, returning it if it existed.
///
/// Removing an array element shifts the elements after it.
pub fn remove_path(root: &mut Value, path: &str) -> Option<Value> {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    let (last, parents) = segments.split_last()?;

    let mut current = root;
    for segment in parents {
        current = child_mut(current, segment)?;
    }

    match current {
        Value::Object(map) => map.remove(*last),
        Value::Array(items) => {
            let index = array_index(last)?;
            (index < items.len()).then(|| items.remove(index))
        }
        _ => None,
    }
}

/// Directly replace the node at `path`, or delete it when `replacement` is `None`.
///
/// Missing or scalar intermediate nodes are replaced by empty objects.
/// An array index one past the end appends. Returns false when the path
/// cannot be walked: a non-numeric segment against an array, an index
/// beyond the end of an array, or a scalar root.
pub fn replace_path(root: &mut Value, path: &str, replacement: Option<Value>) -> bool {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };

    let mut current = root;
    for segment in parents {
        current = match current {
            Value::Object(map) => {
                let slot = map
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                vivify(slot);
                slot
            }
            Value::Array(items) => {
                let Some(index) = array_index(segment).filter(|i| *i <= items.len()) else {
                    return false;
                };
                if index == items.len() {
                    items.push(Value::Null);
                }
                let slot = &mut items[index];
                vivify(slot);
                slot
            }
            _ => return false,
        };
    }

    match (current, replacement) {
        (Value::Object(map), Some(value)) => {
            map.insert(last.to_string(), value);
            true
        }
        (Value::Object(map), None) => {
            map.remove(*last);
            true
        }
        (Value::Array(items), replacement) => {
            let Some(index) = array_index(last).filter(|i| *i <= items.len()) else {
                return false;
            };
            match replacement {
                Some(value) if index == items.len() => items.push(value),
                Some(value) => items[index] = value,
                None if index < items.len() => {
                    items.remove(index);
                }
                None => {}
            }
            true
        }
        _ => false,
    }
}

fn vivify(slot: &mut Value) {
    if !is_container(slot) {
        *slot = Value::Object(Map::new());
    }
}
