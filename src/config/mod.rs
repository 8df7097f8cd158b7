//! Layered configuration merge
//!
//! Resolves one configuration from three layers:
//! 1. Global config (may lock dotted paths via `globalLock`)
//! 2. Secondary config (override fragment under `globalOverride`)
//! 3. Client config (`configMerge` and `configReplace` instructions)

mod builder;
mod defaults;
mod error;
mod lock;
mod merge;
mod paths;
mod request;
mod resolved;

pub use builder::{safe_merge, ConfigBuilder};
pub use defaults::{
    ReservedKeys, CONFIG_MERGE_KEY, CONFIG_REPLACE_KEY, DELETE_SENTINEL, GLOBAL_LOCK_KEY,
    GLOBAL_OVERRIDE_KEY,
};
pub use error::{InstructionField, MergeError};
pub use lock::LockSet;
pub use merge::{deep_merge, merge_all, merge_into};
pub use paths::{flatten, get_path, remove_path, replace_path, PATH_SEPARATOR};
pub use request::{Instructions, MergeRequest, ReplaceMap};
pub use resolved::{FilteredPath, InstructionSource, ResolvedConfig};
