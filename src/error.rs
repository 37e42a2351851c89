//! Error types for patch editing.
//!
//! None of these are fatal. The interaction layer absorbs every one of them
//! and logs it, so a failed operation simply leaves the patch unchanged.

use crate::graph::ModuleId;

/// Errors produced while resolving or mutating the patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchError {
    /// The referenced module is not in the patch.
    ModuleNotFound(ModuleId),
    /// The module exists but has no port with this name, or the port
    /// has no rendered element.
    PortNotFound {
        module: ModuleId,
        port: &'static str,
    },
    /// The module has no parameter at this index.
    ParameterNotFound {
        module: ModuleId,
        index: usize,
    },
    /// Attempting to connect a module to itself.
    SelfConnection,
    /// The destination input already has a cable.
    InputOccupied {
        module: ModuleId,
        port: &'static str,
    },
    /// The signal backend refused the link.
    LinkRejected(String),
    /// A gesture completion arrived with no gesture in progress.
    StaleGesture,
}

impl PatchError {
    /// Returns true for resolution failures (the operation should silently no-op).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PatchError::ModuleNotFound(_)
                | PatchError::PortNotFound { .. }
                | PatchError::ParameterNotFound { .. }
        )
    }
}

impl std::fmt::Display for PatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatchError::ModuleNotFound(id) => write!(f, "Module {} not found", id),
            PatchError::PortNotFound { module, port } => {
                write!(f, "Port '{}' not found on {}", port, module)
            }
            PatchError::ParameterNotFound { module, index } => {
                write!(f, "Parameter {} not found on {}", index, module)
            }
            PatchError::SelfConnection => write!(f, "Cannot connect a module to itself"),
            PatchError::InputOccupied { module, port } => {
                write!(f, "Input '{}' on {} is already connected", port, module)
            }
            PatchError::LinkRejected(reason) => write!(f, "Connection failed: {}", reason),
            PatchError::StaleGesture => write!(f, "No gesture in progress"),
        }
    }
}

impl std::error::Error for PatchError {}
