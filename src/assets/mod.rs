//! Asset and resource management system
//!
//! Provides handle-based resource management with:
//! - One table per asset type, owning every live instance
//! - Opaque, copyable handles resolved through their table
//! - Lock-holding scoped references for concurrent readers
//! - A registry with explicit, idempotent teardown

mod asset;
mod asset_ref;
mod error;
mod handle;
pub mod registry;
mod table;

pub use asset::Asset;
pub use asset_ref::AssetRef;
pub use error::AssetError;
pub use handle::AssetHandle;
pub use registry::{AssetRegistry, TableStats, global, global_table, teardown_all};
pub use table::AssetTable;
