//! Error types for Pauli decomposition.

use thiserror::Error;

/// Result type alias for decomposition operations.
pub type Result<T> = std::result::Result<T, DecomposeError>;

/// Everything that can stop a decomposition.
///
/// Decomposition is all-or-nothing: any of these aborts the whole call and no
/// partial [`PauliSum`](crate::operator::PauliSum) is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecomposeError {
    /// Matrix has a different number of rows and columns.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Row count
        rows: usize,
        /// Column count
        cols: usize,
    },

    /// Side length is not a power of two of at least 2.
    #[error("side length {size} is not a power of two >= 2 (pad the matrix first)")]
    NotPowerOfTwo {
        /// Offending side length
        size: usize,
    },

    /// NaN or infinite entry.
    #[error("non-finite entry at ({row}, {col})")]
    NonFinite {
        /// Row of the entry
        row: usize,
        /// Column of the entry
        col: usize,
    },

    /// 2x2 block that is not one of the 16 boolean patterns.
    #[error("2x2 block {entries:?} at qubit {qubit} is not a 0/1 pattern")]
    UnmatchedPattern {
        /// Qubit index the block would have been placed on
        qubit: u32,
        /// Block entries in row-major order
        entries: [f64; 4],
    },

    /// Laplacian diagonal entry that is not an integer degree.
    #[error("Laplacian diagonal entry {index} is not an integer degree: {value}")]
    NonIntegerDegree {
        /// Diagonal position
        index: usize,
        /// Entry value
        value: f64,
    },

    /// Matrix exceeds the configured qubit limit.
    #[error("side length {size} exceeds the limit of {max_qubits} qubits")]
    TooLarge {
        /// Offending side length
        size: usize,
        /// Configured limit
        max_qubits: u32,
    },

    /// Term acts on a qubit outside the requested register.
    #[error("term acts on qubit {qubit} but the register has {num_qubits} qubits")]
    QubitOutOfRange {
        /// Qubit index found in a term
        qubit: u32,
        /// Register size requested
        num_qubits: u32,
    },

    /// Graph generation parameters out of range.
    #[error("invalid graph parameters: {0}")]
    InvalidGraph(String),
}
