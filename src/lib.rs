//! Layered Config - lock-aware configuration merging
//!
//! This crate resolves one configuration tree from a global base, a
//! secondary override fragment and client merge/replace instructions,
//! while the base may lock dotted key paths against override.

pub mod config;
pub mod holder;

pub use config::{
    safe_merge, ConfigBuilder, Instructions, LockSet, MergeError, MergeRequest, ReplaceMap,
    ReservedKeys, ResolvedConfig,
};
pub use holder::{Config, ConfigSlot, SharedConfig};
