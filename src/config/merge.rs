//! Deep merge of configuration trees
//!
//! Later sources win:
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars and null: override (last wins)

use serde_json::Value;

/// Merge `overlay` into `target` in place.
///
/// Merge semantics:
/// - Objects: deep-merge by key (recursive)
/// - Arrays: REPLACE (overlay wins entirely, no element-wise merge)
/// - Scalars: override (overlay wins)
/// - Null: override (an explicit null replaces any value)
pub fn merge_into(target: &mut Value, overlay: Value) {
    match (target, overlay) {
        (Value::Object(target_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match target_map.get_mut(&key) {
                    Some(existing) => merge_into(existing, overlay_value),
                    None => {
                        target_map.insert(key, overlay_value);
                    }
                }
            }
        }
        (target, overlay) => *target = overlay,
    }
}

/// Deep merge two values, returning the result.
pub fn deep_merge(mut base: Value, overlay: Value) -> Value {
    merge_into(&mut base, overlay);
    base
}

/// Merge sources left to right into `target`.
pub fn merge_all<I>(target: &mut Value, sources: I)
where
    I: IntoIterator<Item = Value>,
{
    for source in sources {
        merge_into(target, source);
    }
}
