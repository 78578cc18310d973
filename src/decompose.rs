//! Matrix → Pauli sum decomposition.
//!
//! A `2^n` square matrix `M` is split into quadrants `A B / C D`. With
//! `n' = n - 1` the qubit of the current split,
//!
//! ```text
//! M = basis_1(n')·Dec(A) + basis_2(n')·Dec(B) + basis_3(n')·Dec(C) + basis_4(n')·Dec(D)
//! ```
//!
//! and the recursion bottoms out on 2x2 blocks, which are looked up in a
//! closed-form table over the 16 boolean patterns. Because each quadrant's
//! decomposition only touches qubits below `n'`, the products are tensor
//! placements and the sum reconstructs `M` exactly.
//!
//! Laplacians `L = D - A` are handled by decomposing the recovered 0/1
//! adjacency `A`, negating, and adding each degree times the diagonal unit
//! `E_ii`, which is built directly as a product of `basis_1`/`basis_4` over
//! the bits of `i`.

use log::{debug, trace};

use crate::basis::{basis_1, basis_2, basis_3, basis_4, diagonal_unit, identity, sx, zero};
use crate::error::{DecomposeError, Result};
use crate::matrix::{
    adjacency_from_laplacian, block_entries, quadrants, qubit_index, validate, Matrix,
};
use crate::operator::PauliSum;

/// Configuration for a [`Decomposer`].
#[derive(Debug, Clone)]
pub struct DecomposerConfig {
    /// Merge identical labels and drop vanishing terms in the final result.
    pub simplify: bool,
    /// Coefficient magnitude at or below which merged terms are dropped.
    pub tolerance: f64,
    /// Largest accepted register; bigger matrices are rejected up front.
    pub max_qubits: u32,
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self {
            simplify: true,
            tolerance: 1e-12,
            max_qubits: 10,
        }
    }
}

/// Decomposes adjacency and Laplacian matrices into [`PauliSum`]s.
#[derive(Debug, Clone, Default)]
pub struct Decomposer {
    config: DecomposerConfig,
}

impl Decomposer {
    pub fn new(config: DecomposerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecomposerConfig {
        &self.config
    }

    /// Decompose a 0/1-valued matrix with power-of-two side.
    pub fn decompose(&self, matrix: &Matrix) -> Result<PauliSum> {
        let num_qubits = self.check(matrix)?;
        debug!("decomposing {0}x{0} matrix on {1} qubits", matrix.nrows(), num_qubits);
        let raw = decompose_recursive(matrix, self.config.tolerance)?;
        Ok(self.finish(raw))
    }

    /// Decompose a graph Laplacian `L = D - A`.
    ///
    /// Off-diagonal entries must be 0 or -1 and diagonal entries integers.
    /// The caller's matrix is never modified.
    pub fn decompose_laplacian(&self, laplacian: &Matrix) -> Result<PauliSum> {
        let num_qubits = self.check(laplacian)?;
        let size = laplacian.nrows();
        for index in 0..size {
            let value = laplacian[(index, index)];
            if value.fract() != 0.0 {
                return Err(DecomposeError::NonIntegerDegree { index, value });
            }
        }
        debug!("decomposing {0}x{0} Laplacian on {1} qubits", size, num_qubits);

        let adjacency = adjacency_from_laplacian(laplacian);
        let mut total = -decompose_recursive(&adjacency, self.config.tolerance)?;

        for index in 0..size {
            let degree = laplacian[(index, index)];
            if degree == 0.0 {
                continue;
            }
            total += diagonal_unit(index, num_qubits) * degree;
        }
        Ok(self.finish(total))
    }

    fn check(&self, matrix: &Matrix) -> Result<u32> {
        let num_qubits = validate(matrix)?;
        if num_qubits > self.config.max_qubits {
            return Err(DecomposeError::TooLarge {
                size: matrix.nrows(),
                max_qubits: self.config.max_qubits,
            });
        }
        Ok(num_qubits)
    }

    fn finish(&self, raw: PauliSum) -> PauliSum {
        if !self.config.simplify {
            debug!("decomposition produced {} unmerged terms", raw.len());
            return raw;
        }
        let merged = raw.simplify(self.config.tolerance);
        debug!("merged {} terms into {}", raw.len(), merged.len());
        merged
    }
}

/// Decompose with the default configuration.
pub fn decompose(matrix: &Matrix) -> Result<PauliSum> {
    Decomposer::default().decompose(matrix)
}

/// Decompose a Laplacian with the default configuration.
pub fn decompose_laplacian(laplacian: &Matrix) -> Result<PauliSum> {
    Decomposer::default().decompose_laplacian(laplacian)
}

/// Core recursion on an already validated matrix.
///
/// Each quadrant's decomposition is merged before it is multiplied by its
/// basis operator, which keeps every level at most `4^(qubit)` terms per
/// quadrant. Only the four products of the outermost split are left
/// unmerged; the `simplify` setting decides whether to fold them.
fn decompose_recursive(matrix: &Matrix, tolerance: f64) -> Result<PauliSum> {
    let size = matrix.nrows();
    let qubit = qubit_index(size);
    if matrix.shape() == (2, 2) {
        return decompose_block(matrix, qubit);
    }
    trace!("splitting {}x{} block at qubit {}", size, size, qubit);

    let [a, b, c, d] = quadrants(matrix);
    let mut sum = PauliSum::new();
    for (basis, quadrant) in [
        (basis_1(qubit), a),
        (basis_2(qubit), b),
        (basis_3(qubit), c),
        (basis_4(qubit), d),
    ] {
        let inner = decompose_recursive(&quadrant, tolerance)?.simplify(tolerance);
        sum += basis.mul_sum(&inner);
    }
    Ok(sum)
}

fn as_bit(value: f64) -> Option<bool> {
    if value == 0.0 {
        Some(false)
    } else if value == 1.0 {
        Some(true)
    } else {
        None
    }
}

/// Closed-form decomposition of a boolean 2x2 block placed on `qubit`.
///
/// Every 0/1 pattern maps to a fixed combination of `I`, `X` and the four
/// basis operators. Any other entry is an [`DecomposeError::UnmatchedPattern`].
pub fn decompose_block(block: &Matrix, qubit: u32) -> Result<PauliSum> {
    if block.shape() != (2, 2) {
        let (rows, cols) = block.shape();
        return Err(if rows != cols {
            DecomposeError::NotSquare { rows, cols }
        } else {
            DecomposeError::NotPowerOfTwo { size: rows }
        });
    }
    let entries = block_entries(block);
    let unmatched = || DecomposeError::UnmatchedPattern { qubit, entries };
    let bits = [
        as_bit(entries[0]).ok_or_else(unmatched)?,
        as_bit(entries[1]).ok_or_else(unmatched)?,
        as_bit(entries[2]).ok_or_else(unmatched)?,
        as_bit(entries[3]).ok_or_else(unmatched)?,
    ];

    let n = qubit;
    let sum = match bits {
        [false, false, false, false] => zero(n),
        [true, false, false, true] => identity(n),
        [false, true, true, false] => sx(n),
        [true, true, true, true] => sx(n) + identity(n),

        [true, false, false, false] => basis_1(n),
        [false, true, false, false] => basis_2(n),
        [false, false, true, false] => basis_3(n),
        [false, false, false, true] => basis_4(n),

        [true, true, false, false] => basis_1(n) + basis_2(n),
        [false, true, false, true] => basis_2(n) + basis_4(n),
        [true, false, true, false] => basis_1(n) + basis_3(n),
        [false, false, true, true] => basis_3(n) + basis_4(n),

        [true, true, true, false] => basis_1(n) + sx(n),
        [true, true, false, true] => identity(n) + basis_2(n),
        [true, false, true, true] => identity(n) + basis_3(n),
        [false, true, true, true] => sx(n) + basis_4(n),
    };
    Ok(sum)
}
