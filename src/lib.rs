//! Type-indexed asset registry for real-time renderers
//!
//! This crate provides:
//! - Per-type asset tables with shared/exclusive locking
//! - Opaque handles and RAII scoped references
//! - A registry with explicit teardown ordering
//! - RON-loadable configuration

pub mod assets;
pub mod core;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::assets::{
        Asset, AssetError, AssetHandle, AssetRef, AssetRegistry, AssetTable, TableStats,
    };
    pub use crate::core::{ConfigError, RegistryConfig, ReplacePolicy};
}
