//! Registry error taxonomy

use std::fmt;

use thiserror::Error;

/// Why a move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryReason {
    /// Nothing is selected
    NoSelection,

    /// The selected component is pinned
    Pinned,

    /// The target slot is past either end of the sequence
    OutOfBounds,

    /// The target slot holds a pinned component
    PinnedNeighbor,
}

impl fmt::Display for BoundaryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryReason::NoSelection => write!(f, "no component is selected"),
            BoundaryReason::Pinned => write!(f, "pinned components cannot be moved"),
            BoundaryReason::OutOfBounds => write!(f, "already at the edge of the list"),
            BoundaryReason::PinnedNeighbor => {
                write!(f, "cannot move across a pinned component")
            }
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Component already exists: {0}")]
    DuplicateName(String),

    #[error("Component name must not be empty")]
    BlankName,

    #[error("Component not found: {0}")]
    NotFound(String),

    #[error("Component '{0}' is protected: {1}")]
    ProtectedComponent(String, &'static str),

    #[error("Invalid snapshot: {0}")]
    Format(String),

    #[error("Cannot move: {0}")]
    Boundary(BoundaryReason),
}

impl RegistryError {
    /// Returns true for errors that are reported as a notice rather than a failure
    pub fn is_notice(&self) -> bool {
        matches!(self, RegistryError::Boundary(_))
    }
}
