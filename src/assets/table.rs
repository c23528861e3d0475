//! Per-type asset storage
//!
//! An [`AssetTable`] is the single owner of every live instance of one asset
//! type. Mutations are serialized behind an exclusive lock, reads share it.

use std::collections::hash_map::Entry;

use parking_lot::{RwLock, RwLockReadGuard};
use rustc_hash::FxHashMap;

use super::asset::Asset;
use super::asset_ref::AssetRef;
use super::error::AssetError;
use super::handle::{self, AssetHandle};
use crate::core::{RegistryConfig, ReplacePolicy};

/// Exclusive owner of all instances of asset type `T`, indexed by handle
pub struct AssetTable<T: Asset> {
    /// Live instances by handle id
    slots: RwLock<FxHashMap<u64, T>>,
    /// Behavior of `replace` on missing slots
    replace_policy: ReplacePolicy,
}

impl<T: Asset> AssetTable<T> {
    /// Create a new empty table with the default config
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&RegistryConfig::default())
    }

    /// Create a new empty table
    #[must_use]
    pub fn with_config(config: &RegistryConfig) -> Self {
        Self {
            slots: RwLock::new(FxHashMap::with_capacity_and_hasher(
                config.initial_capacity,
                Default::default(),
            )),
            replace_policy: config.replace_policy,
        }
    }

    /// Take ownership of an asset and return a new handle to it.
    ///
    /// The id is allocated before the exclusive lock is taken, so concurrent
    /// callers never collide. Ids come from a process-wide counter and are
    /// never reissued, not even by a table created after teardown.
    pub fn init(&self, asset: T) -> AssetHandle<T> {
        let id = handle::next_id();
        debug_assert_ne!(id, AssetHandle::<T>::UNBOUND_ID, "asset id space exhausted");

        let mut slots = self.slots.write();
        let slot = slots.entry(id);
        debug_assert!(
            matches!(slot, Entry::Vacant(_)),
            "{}: slot {id} already occupied",
            T::asset_name()
        );
        slot.or_insert(asset);
        drop(slots);
        log::trace!("{}: init slot {id}", T::asset_name());

        AssetHandle::from_raw(id)
    }

    /// Swap the asset behind `handle` for a new one.
    ///
    /// The previous instance is dropped while the exclusive lock is held.
    /// If the slot does not exist, [`ReplacePolicy::Upsert`] inserts it and
    /// [`ReplacePolicy::Strict`] fails.
    ///
    /// # Errors
    ///
    /// Returns an error for unbound handles, and for missing slots under
    /// [`ReplacePolicy::Strict`].
    pub fn replace(&self, handle: AssetHandle<T>, asset: T) -> Result<(), AssetError> {
        let id = Self::bound_id(handle)?;
        let mut slots = self.slots.write();

        if let Some(slot) = slots.get_mut(&id) {
            *slot = asset;
            log::trace!("{}: replaced slot {id}", T::asset_name());
            return Ok(());
        }

        match self.replace_policy {
            ReplacePolicy::Upsert => {
                log::warn!(
                    "{}: replace on missing slot {id}, inserting a new one",
                    T::asset_name()
                );
                // The id was issued by `init` earlier, so no pending `init` can hold it
                slots.insert(id, asset);
                Ok(())
            }
            ReplacePolicy::Strict => Err(Self::out_of_range(id)),
        }
    }

    /// Resolve a handle into a scoped reference.
    ///
    /// The returned reference holds the table's shared lock until dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is unbound or its slot does not exist.
    pub fn get(&self, handle: AssetHandle<T>) -> Result<AssetRef<'_, T>, AssetError> {
        let id = Self::bound_id(handle)?;

        RwLockReadGuard::try_map(self.slots.read(), |slots| slots.get(&id))
            .map(AssetRef::new)
            .map_err(|_| Self::out_of_range(id))
    }

    /// Remove and drop the asset behind `handle`.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is unbound or already released.
    pub fn release(&self, handle: AssetHandle<T>) -> Result<(), AssetError> {
        let id = Self::bound_id(handle)?;
        let mut slots = self.slots.write();

        // Dropped before the guard
        let removed = slots.remove(&id).ok_or_else(|| Self::out_of_range(id))?;
        drop(removed);
        log::trace!("{}: released slot {id}", T::asset_name());

        Ok(())
    }

    /// Check if the handle currently resolves
    #[must_use]
    pub fn contains(&self, handle: AssetHandle<T>) -> bool {
        !handle.is_unbound() && self.slots.read().contains_key(&handle.id())
    }

    /// Get the number of live assets
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// Check if the table holds no assets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    fn bound_id(handle: AssetHandle<T>) -> Result<u64, AssetError> {
        if handle.is_unbound() {
            Err(AssetError::Unbound {
                asset: T::asset_name(),
            })
        } else {
            Ok(handle.id())
        }
    }

    fn out_of_range(id: u64) -> AssetError {
        AssetError::OutOfRange {
            asset: T::asset_name(),
            id,
        }
    }
}

impl<T: Asset> Default for AssetTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Asset> std::fmt::Debug for AssetTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetTable")
            .field("asset", &T::asset_name())
            .field("len", &self.len())
            .finish()
    }
}
