//! Merge errors

use std::fmt;

/// Client instruction that failed to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionField {
    /// `configMerge`
    Merge,
    /// `configReplace`
    Replace,
}

impl fmt::Display for InstructionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge => write!(f, "configMerge"),
            Self::Replace => write!(f, "configReplace"),
        }
    }
}

/// Errors raised by the merge engine.
///
/// Only JSON text that fails to parse is surfaced; every other irregular
/// input is normalised by defaulting.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("Unable to parse to JSON.")]
    Parse {
        field: InstructionField,
        #[source]
        source: serde_json::Error,
    },
}

impl MergeError {
    /// The instruction that could not be decoded
    pub fn field(&self) -> InstructionField {
        match self {
            Self::Parse { field, .. } => *field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_error_message() {
        let source = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let err = MergeError::Parse {
            field: InstructionField::Merge,
            source,
        };

        assert_eq!(err.to_string(), "Unable to parse to JSON.");
        assert_eq!(err.field(), InstructionField::Merge);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_field_display() {
        assert_eq!(InstructionField::Merge.to_string(), "configMerge");
        assert_eq!(InstructionField::Replace.to_string(), "configReplace");
    }
}
