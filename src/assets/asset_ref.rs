//! Scoped, lock-holding references into an asset table

use std::ops::Deref;

use parking_lot::MappedRwLockReadGuard;

/// Read access to one asset slot.
///
/// Holds the owning table's shared lock until dropped, so the slot cannot be
/// replaced or released while this reference exists. `init`, `replace` and
/// `release` on the same table block until every outstanding reference is
/// gone; keep references short-lived (one frame at most).
///
/// Resolving a second handle of the same table while holding a reference
/// can deadlock if a writer is queued in between. Resolve, use, drop.
#[must_use = "dropping the reference releases the lock immediately"]
pub struct AssetRef<'a, T: ?Sized> {
    guard: MappedRwLockReadGuard<'a, T>,
}

impl<'a, T: ?Sized> AssetRef<'a, T> {
    pub(crate) fn new(guard: MappedRwLockReadGuard<'a, T>) -> Self {
        Self { guard }
    }

    /// Narrow the reference to part of the asset, keeping the same lock.
    pub fn map<U: ?Sized>(this: Self, f: impl FnOnce(&T) -> &U) -> AssetRef<'a, U> {
        AssetRef {
            guard: MappedRwLockReadGuard::map(this.guard, f),
        }
    }
}

impl<T: ?Sized> Deref for AssetRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T: ?Sized + std::fmt::Debug> std::fmt::Debug for AssetRef<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AssetRef").field(&&*self.guard).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::{RwLock, RwLockReadGuard};

    fn map_first(lock: &RwLock<Vec<String>>) -> AssetRef<'_, String> {
        AssetRef::new(RwLockReadGuard::map(lock.read(), |v| &v[0]))
    }

    #[test]
    fn test_holds_shared_lock() {
        let lock = RwLock::new(vec!["shader".to_string()]);
        let asset = map_first(&lock);

        assert_eq!(&*asset, "shader");
        assert!(lock.try_write().is_none());
        // Other readers are not blocked
        assert!(lock.try_read().is_some());

        drop(asset);
        assert!(lock.try_write().is_some());
    }

    #[test]
    fn test_move_keeps_single_lock() {
        let lock = RwLock::new(vec!["mesh".to_string()]);
        let asset = map_first(&lock);

        let moved = asset;
        let boxed = Box::new(moved);
        assert_eq!(boxed.len(), 4);
        assert!(lock.try_write().is_none());

        drop(boxed);
        assert!(lock.try_write().is_some());
    }

    #[test]
    fn test_map_narrows_without_releasing() {
        let lock = RwLock::new(vec!["framebuffer".to_string()]);
        let asset = map_first(&lock);
        let bytes: AssetRef<'_, str> = AssetRef::map(asset, |s| &s[..5]);

        assert_eq!(&*bytes, "frame");
        assert!(lock.try_write().is_none());

        drop(bytes);
        assert!(lock.try_write().is_some());
    }

    #[test]
    fn test_released_on_unwind() {
        let lock = RwLock::new(vec!["target".to_string()]);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _asset = map_first(&lock);
            panic!("render pass failed");
        }));

        assert!(result.is_err());
        assert!(lock.try_write().is_some());
    }
}
