//! Registry of per-type asset tables
//!
//! The registry keeps one strong reference to each type's table so a table
//! survives between lookups. [`AssetRegistry::teardown_all`] severs those
//! references and must run while whatever the asset destructors depend on
//! (typically the rendering context) is still alive.

use std::any::{Any, TypeId};
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::asset::Asset;
use super::table::AssetTable;
use crate::core::RegistryConfig;

/// Type-erased view of an `AssetTable<T>`
trait ErasedTable: Send + Sync {
    fn asset_name(&self) -> &'static str;
    fn live_count(&self) -> usize;
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Asset> ErasedTable for AssetTable<T> {
    fn asset_name(&self) -> &'static str {
        T::asset_name()
    }

    fn live_count(&self) -> usize {
        self.len()
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Snapshot of one table for debug output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStats {
    /// Asset type name
    pub asset: &'static str,
    /// Number of live assets
    pub live: usize,
}

/// Owner of one lazily created [`AssetTable`] per asset type
pub struct AssetRegistry {
    config: RegistryConfig,
    tables: RwLock<FxHashMap<TypeId, Arc<dyn ErasedTable>>>,
}

impl AssetRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            tables: RwLock::new(FxHashMap::default()),
        }
    }

    /// Config applied to newly created tables
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Get the table for `T`, creating it on first use.
    ///
    /// Every call returns the same table until [`teardown_all`] runs.
    ///
    /// [`teardown_all`]: Self::teardown_all
    pub fn table<T: Asset>(&self) -> Arc<AssetTable<T>> {
        let type_id = TypeId::of::<T>();

        let existing = self.tables.read().get(&type_id).cloned();
        let erased = match existing {
            Some(table) => table,
            None => Arc::clone(self.tables.write().entry(type_id).or_insert_with(|| {
                log::debug!("Creating asset table for {}", T::asset_name());
                Arc::new(AssetTable::<T>::with_config(&self.config))
            })),
        };

        erased
            .into_any()
            .downcast::<AssetTable<T>>()
            .unwrap_or_else(|_| panic!("Type mismatch in asset table for {}", T::asset_name()))
    }

    /// Drop every table reference held by the registry.
    ///
    /// Tables not referenced elsewhere are destroyed along with their
    /// assets. The next [`table`](Self::table) call creates a fresh, empty
    /// table. Calling this again is a no-op.
    ///
    /// Returns the number of tables released.
    pub fn teardown_all(&self) -> usize {
        let tables = std::mem::take(&mut *self.tables.write());
        if tables.is_empty() {
            return 0;
        }

        let count = tables.len();
        for table in tables.values() {
            // One reference is ours
            let external = Arc::strong_count(table) - 1;
            if external > 0 && self.config.warn_on_shared_teardown {
                log::warn!(
                    "{} table still has {external} external owner(s) at teardown",
                    table.asset_name()
                );
            }
        }

        // Asset destructors run here, outside the registry lock
        drop(tables);
        log::info!("Tore down {count} asset table(s)");

        count
    }

    /// Get the number of tables currently held
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.read().len()
    }

    /// Per-table asset counts, sorted by type name
    #[must_use]
    pub fn stats(&self) -> Vec<TableStats> {
        let tables: Vec<_> = self.tables.read().values().cloned().collect();
        let mut stats: Vec<_> = tables
            .iter()
            .map(|table| TableStats {
                asset: table.asset_name(),
                live: table.live_count(),
            })
            .collect();
        stats.sort_by(|a, b| a.asset.cmp(b.asset));
        stats
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl Drop for AssetRegistry {
    fn drop(&mut self) {
        let remaining = self.tables.get_mut().len();
        if remaining > 0 {
            log::warn!("Asset registry dropped with {remaining} table(s) not torn down");
        }
    }
}

impl std::fmt::Debug for AssetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetRegistry")
            .field("config", &self.config)
            .field("tables", &self.stats())
            .finish()
    }
}

static GLOBAL: LazyLock<AssetRegistry> = LazyLock::new(AssetRegistry::default);

/// The process-wide registry
#[must_use]
pub fn global() -> &'static AssetRegistry {
    &GLOBAL
}

/// Get the process-wide table for `T`, creating it on first use
#[must_use]
pub fn global_table<T: Asset>() -> Arc<AssetTable<T>> {
    GLOBAL.table::<T>()
}

/// Tear down every process-wide table.
///
/// Call once during shutdown, after the last asset operation and before the
/// rendering context goes away.
pub fn teardown_all() -> usize {
    GLOBAL.teardown_all()
}
