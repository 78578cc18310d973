//! # pauli_builder
//!
//! Converts graph adjacency and Laplacian matrices into weighted sums of
//! Pauli tensor products.
//!
//! A `2^n × 2^n` matrix is written as a linear combination of n-fold tensor
//! products over qubits `0..n`, built from four elementary single-qubit
//! operators (the matrix units `E_00, E_01, E_10, E_11` expressed in I, X, Z).
//! The decomposition recurses on quadrants, placing the outermost split on
//! the highest qubit, and finishes 2x2 blocks with a closed-form table.
//!
//! ## Usage
//!
//! ```
//! use pauli_builder::prelude::*;
//!
//! // 4-cycle style adjacency on 4 vertices (2 qubits)
//! let adjacency = Matrix::from_row_slice(4, 4, &[
//!     0.0, 0.0, 0.0, 1.0,
//!     0.0, 0.0, 1.0, 1.0,
//!     0.0, 1.0, 0.0, 0.0,
//!     1.0, 1.0, 0.0, 0.0,
//! ]);
//! let sum = decompose(&adjacency).unwrap();
//! let back = sum.to_matrix(2).unwrap().map(|v| v.re);
//! assert_eq!(back, adjacency);
//! ```

pub mod error;
pub mod pauli;
pub mod operator;
pub mod basis;
pub mod matrix;
pub mod decompose;
pub mod graph;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::pauli::*;
    pub use crate::operator::*;
    pub use crate::basis::*;
    pub use crate::matrix::*;
    pub use crate::decompose::*;
    pub use crate::graph::*;
}
