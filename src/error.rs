//! Error types for quantum-state validation

use thiserror::Error;

/// An invalid (n, l, m) triple. Raised before any numeric work is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantumStateError {
    #[error("invalid quantum state: n must be >= 1, got {n}")]
    PrincipalTooSmall { n: i32 },

    #[error("invalid quantum state: l must be >= 0, got {l}")]
    NegativeAzimuthal { l: i32 },

    #[error("invalid quantum state: l must be < n, got l={l}, n={n}")]
    AzimuthalTooLarge { n: i32, l: i32 },

    #[error("invalid quantum state: m must satisfy -l <= m <= l, got m={m}, l={l}")]
    MagneticOutOfRange { l: i32, m: i32 },
}

pub type Result<T> = std::result::Result<T, QuantumStateError>;
