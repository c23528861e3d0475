//! Asset handle implementation
//!
//! Provides type-safe handles for referencing assets without owning them.

use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use super::asset::Asset;
use super::error::AssetError;
use super::registry;

/// Global counter for generating unique asset IDs.
///
/// Shared by every table and never reset, so an id is issued at most once
/// per run even across registry teardown.
static NEXT_ASSET_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a new unique asset ID
pub(crate) fn next_id() -> u64 {
    NEXT_ASSET_ID.fetch_add(1, Ordering::Relaxed)
}

/// An opaque handle to an asset of type `T` stored in an [`AssetTable`].
///
/// A handle carries no data; it only identifies a slot and has to be
/// resolved through the table that issued it. The default handle is the
/// unbound sentinel and never resolves.
///
/// [`AssetTable`]: super::AssetTable
pub struct AssetHandle<T> {
    /// Slot identifier, `UNBOUND_ID` for the sentinel
    id: u64,
    /// Ties the handle to its asset type without owning a `T`
    _marker: PhantomData<fn() -> T>,
}

impl<T> AssetHandle<T> {
    /// Raw id reserved for unbound handles
    pub const UNBOUND_ID: u64 = u64::MAX;

    /// The unbound sentinel handle
    #[must_use]
    pub const fn unbound() -> Self {
        Self::from_raw(Self::UNBOUND_ID)
    }

    pub(crate) const fn from_raw(id: u64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Get the raw id of this handle
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Check whether this is the unbound sentinel
    #[must_use]
    pub const fn is_unbound(&self) -> bool {
        self.id == Self::UNBOUND_ID
    }
}

impl<T: Asset> AssetHandle<T> {
    /// Resolve this handle through the process-wide table for `T`.
    ///
    /// `f` runs while the table's shared lock is held.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is unbound or its slot is gone.
    pub fn read_global<R>(self, f: impl FnOnce(&T) -> R) -> Result<R, AssetError> {
        let table = registry::global_table::<T>();
        let asset = table.get(self)?;
        Ok(f(&asset))
    }
}

impl<T> Default for AssetHandle<T> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for AssetHandle<T> {}

impl<T> Hash for AssetHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> std::fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unbound() {
            write!(f, "AssetHandle(unbound)")
        } else {
            write!(f, "AssetHandle({})", self.id)
        }
    }
}
