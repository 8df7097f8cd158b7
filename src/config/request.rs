//! Typed merge parameters
//!
//! A [`MergeRequest`] carries everything one merge needs as named fields.
//! Client instructions enter through one of two boundaries:
//! [`Instructions::from_json_text`] for JSON text and
//! [`Instructions::from_structured`] for already-parsed trees.
//! [`MergeRequest::from_layers`] adapts plain layered trees that carry their
//! instructions under reserved keys.

use serde_json::{Map, Value};

use super::defaults::ReservedKeys;
use super::error::{InstructionField, MergeError};
use super::lock::LockSet;

/// Dotted path → replacement value, applied in insertion order
pub type ReplaceMap = Map<String, Value>;

/// Client merge and replace instructions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instructions {
    /// Tree deep-merged into the global configuration
    pub merge: Option<Map<String, Value>>,

    /// Direct replacements applied to the global configuration
    pub replace: Option<ReplaceMap>,
}

impl Instructions {
    /// Decode instructions delivered as JSON text.
    ///
    /// Text that is valid JSON but not an object is treated as absent.
    pub fn from_json_text(merge: Option<&str>, replace: Option<&str>) -> Result<Self, MergeError> {
        Ok(Self {
            merge: merge
                .map(|text| decode_object(text, InstructionField::Merge))
                .transpose()?
                .flatten(),
            replace: replace
                .map(|text| decode_object(text, InstructionField::Replace))
                .transpose()?
                .flatten(),
        })
    }

    /// Accept already-structured instructions
    pub fn from_structured(merge: Option<Map<String, Value>>, replace: Option<ReplaceMap>) -> Self {
        Self { merge, replace }
    }

    pub fn is_empty(&self) -> bool {
        self.merge.is_none() && self.replace.is_none()
    }
}

fn decode_object(text: &str, field: InstructionField) -> Result<Option<Map<String, Value>>, MergeError> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| MergeError::Parse { field, source })?;
    Ok(match value {
        Value::Object(map) => Some(map),
        _ => None,
    })
}

/// Read one client instruction, dispatching on how it was delivered
fn layered_instruction(
    value: Option<&Value>,
    field: InstructionField,
) -> Result<Option<Map<String, Value>>, MergeError> {
    match value {
        Some(Value::String(text)) => decode_object(text, field),
        Some(Value::Object(map)) => Ok(Some(map.clone())),
        _ => Ok(None),
    }
}

/// Parameters of a single merge
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRequest {
    pub(crate) global: Value,
    pub(crate) locks: LockSet,
    pub(crate) secondary: Map<String, Value>,
    pub(crate) global_override: Option<Map<String, Value>>,
    pub(crate) instructions: Instructions,
    pub(crate) keys: ReservedKeys,
}

impl MergeRequest {
    /// Start a request from the global tree. A non-object tree is replaced
    /// by an empty one.
    pub fn new(global: Value) -> Self {
        Self {
            global: object_or_empty(global),
            locks: LockSet::default(),
            secondary: Map::new(),
            global_override: None,
            instructions: Instructions::default(),
            keys: ReservedKeys::default(),
        }
    }

    /// Paths that override, merge and replace instructions may not touch
    pub fn with_locks(mut self, locks: LockSet) -> Self {
        self.locks = locks;
        self
    }

    /// Secondary fields merged over the result as a whole
    pub fn with_secondary(mut self, secondary: Map<String, Value>) -> Self {
        self.secondary = secondary;
        self
    }

    /// Override fragment merged into the global tree and kept in the result
    pub fn with_override(mut self, global_override: Map<String, Value>) -> Self {
        self.global_override = Some(global_override);
        self
    }

    pub fn with_instructions(mut self, instructions: Instructions) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn with_merge(mut self, merge: Map<String, Value>) -> Self {
        self.instructions.merge = Some(merge);
        self
    }

    pub fn with_replace(mut self, replace: ReplaceMap) -> Self {
        self.instructions.replace = Some(replace);
        self
    }

    /// Use different reserved key names and deletion sentinel
    pub fn with_keys(mut self, keys: ReservedKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Build a request from plain layered trees carrying reserved keys.
    ///
    /// All three trees are copied; the caller's values are left untouched.
    /// Reserved keys of the wrong type are ignored, except that instruction
    /// text which is not valid JSON fails with [`MergeError::Parse`].
    pub fn from_layers(
        global: &Value,
        secondary: Option<&Value>,
        client: Option<&Value>,
        keys: &ReservedKeys,
    ) -> Result<Self, MergeError> {
        let global = object_or_empty(global.clone());
        let locks = LockSet::from_value(global.get(&keys.lock));

        let mut secondary = match secondary {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        let global_override = match secondary.get(&keys.global_override) {
            Some(Value::Object(_)) => match secondary.remove(&keys.global_override) {
                Some(Value::Object(map)) => Some(map),
                _ => None,
            },
            _ => None,
        };

        let client = client.and_then(Value::as_object);
        let instructions = Instructions {
            merge: layered_instruction(
                client.and_then(|c| c.get(&keys.merge)),
                InstructionField::Merge,
            )?,
            replace: layered_instruction(
                client.and_then(|c| c.get(&keys.replace)),
                InstructionField::Replace,
            )?,
        };

        Ok(Self {
            global,
            locks,
            secondary,
            global_override,
            instructions,
            keys: keys.clone(),
        })
    }

    pub fn locks(&self) -> &LockSet {
        &self.locks
    }

    pub fn instructions(&self) -> &Instructions {
        &self.instructions
    }
}

fn object_or_empty(value: Value) -> Value {
    match value {
        Value::Object(_) => value,
        _ => Value::Object(Map::new()),
    }
}
