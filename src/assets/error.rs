//! Errors raised when resolving or mutating asset handles

/// Errors that can occur during asset table operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The handle is the unbound sentinel and was never issued by a table
    Unbound {
        /// Name of the asset type
        asset: &'static str,
    },
    /// The handle's slot does not exist in the table (released or never created)
    OutOfRange {
        /// Name of the asset type
        asset: &'static str,
        /// Raw handle id that failed to resolve
        id: u64,
    },
}

impl AssetError {
    /// Name of the asset type the failing handle belongs to
    #[must_use]
    pub const fn asset(&self) -> &'static str {
        match self {
            Self::Unbound { asset } | Self::OutOfRange { asset, .. } => asset,
        }
    }
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unbound { asset } => write!(f, "Unbound {asset} handle"),
            Self::OutOfRange { asset, id } => {
                write!(f, "{asset} handle {id} is out of range")
            }
        }
    }
}

impl std::error::Error for AssetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AssetError::OutOfRange {
            asset: "Shader",
            id: 3,
        };
        assert_eq!(err.to_string(), "Shader handle 3 is out of range");
        assert_eq!(err.asset(), "Shader");

        let err = AssetError::Unbound { asset: "Mesh" };
        assert_eq!(err.to_string(), "Unbound Mesh handle");
    }
}
