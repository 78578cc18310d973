//! Dense matrix helpers: validation, quadrant slicing, padding.
//!
//! Matrices are `nalgebra::DMatrix<f64>`. Integer-valued graph matrices are
//! stored exactly. Nothing in this module mutates its input; derived matrices
//! are always fresh copies.

use nalgebra::DMatrix;

use crate::error::{DecomposeError, Result};

/// Square matrix handed to the decomposer.
pub type Matrix = DMatrix<f64>;

/// Check that `m` is square, finite, and has a power-of-two side >= 2.
///
/// Returns the number of qubits (`log2(side)`).
pub fn validate(m: &Matrix) -> Result<u32> {
    let (rows, cols) = m.shape();
    if rows != cols {
        return Err(DecomposeError::NotSquare { rows, cols });
    }
    if rows < 2 || !rows.is_power_of_two() {
        return Err(DecomposeError::NotPowerOfTwo { size: rows });
    }
    for col in 0..cols {
        for row in 0..rows {
            if !m[(row, col)].is_finite() {
                return Err(DecomposeError::NonFinite { row, col });
            }
        }
    }
    Ok(rows.trailing_zeros())
}

/// Qubit index the outermost split of a `size`-sided matrix acts on:
/// `ceil(log2(size)) - 1`.
pub fn qubit_index(size: usize) -> u32 {
    debug_assert!(size >= 2);
    let bits = usize::BITS - (size - 1).leading_zeros();
    bits.saturating_sub(1)
}

/// Split into top-left, top-right, bottom-left, bottom-right quadrants.
pub fn quadrants(m: &Matrix) -> [Matrix; 4] {
    let h = m.nrows() / 2;
    [
        m.view((0, 0), (h, h)).into_owned(),
        m.view((0, h), (h, h)).into_owned(),
        m.view((h, 0), (h, h)).into_owned(),
        m.view((h, h), (h, h)).into_owned(),
    ]
}

/// Entries of a 2x2 block in row-major order.
pub fn block_entries(m: &Matrix) -> [f64; 4] {
    [m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]]
}

/// Side length a graph of `nodes` vertices is padded to: `2^ceil(log2(nodes))`,
/// never below 2.
pub fn padded_size(nodes: usize) -> usize {
    nodes.next_power_of_two().max(2)
}

/// Copy `m` into the top-left corner of a zero matrix of padded size.
pub fn pad_to_power_of_two(m: &Matrix) -> Result<Matrix> {
    let (rows, cols) = m.shape();
    if rows != cols {
        return Err(DecomposeError::NotSquare { rows, cols });
    }
    let size = padded_size(rows);
    let mut out = Matrix::zeros(size, size);
    out.view_mut((0, 0), (rows, cols)).copy_from(m);
    Ok(out)
}

/// `size`x`size` matrix with a single 1 at `(index, index)`.
pub fn indicator(size: usize, index: usize) -> Matrix {
    let mut m = Matrix::zeros(size, size);
    m[(index, index)] = 1.0;
    m
}

/// Recover the adjacency matrix from a Laplacian `L = D - A`:
/// zero the diagonal of a copy and negate it.
pub fn adjacency_from_laplacian(laplacian: &Matrix) -> Matrix {
    let mut adjacency = -laplacian.clone();
    adjacency.fill_diagonal(0.0);
    adjacency
}
