//! Marker trait for managed resources

/// A resource owned by an [`AssetTable`](super::AssetTable).
///
/// Implementors opt in explicitly. Values are moved into a table and never
/// cloned by it; readers on several threads share `&Self`, hence the
/// `Send + Sync` bound.
pub trait Asset: Send + Sync + 'static {
    /// Human readable name used in errors and log output
    fn asset_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}
