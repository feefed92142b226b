//! Tiered memory loading.
//!
//! Discovers memory files for three tiers (global, extension, project),
//! reads them concurrently and publishes deterministic per-tier buffers.
//! File access can additionally pull in nearby memory files just in time.
//!
//! # Components
//!
//! - [`PathDiscoverer`]: enumerates candidate paths per tier
//! - [`ContentLoader`]: reads files, tolerating failures
//! - [`Categorizer`]: tier attribution and buffer assembly
//! - [`JitTraverser`]: bounded upward walk from an accessed file
//! - [`MemoryManager`]: orchestrator owning the loaded-path set

mod categorize;
mod discovery;
mod error;
mod extension;
mod jit;
mod loader;
mod manager;
mod types;

pub use categorize::{path_depth, sort_files, CategorizedFile, Categorizer, TierCandidates};
pub use discovery::PathDiscoverer;
pub use error::MemoryError;
pub use extension::{ConfigExtensionRegistry, ExtensionRegistry};
pub use jit::{normalize_path, JitTraverser};
pub use loader::{ContentLoader, LoadedFile};
pub use manager::{MemoryManager, DEFAULT_EVENT_CHANNEL_CAPACITY};
pub use types::*;
