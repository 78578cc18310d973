//! Operator basis for the quadrant decomposition.
//!
//! Each of the four elementary 2x2 matrices `E_rc` (a single 1 at row r,
//! column c) is a fixed combination of I, X and Z on one qubit:
//!
//! ```text
//! basis_1 = ½(I + Z)   = [[1,0],[0,0]]
//! basis_2 = ½(X + Z·X) = [[0,1],[0,0]]
//! basis_3 = ½(X − Z·X) = [[0,0],[1,0]]
//! basis_4 = ½(I − Z)   = [[0,0],[0,1]]
//! ```
//!
//! `Z·X` is the algebra product on the same qubit (`= iY`), not a tensor
//! product. Every function here returns a freshly built, unmerged sum.

use num_complex::Complex64;
use num_traits::One;

use crate::operator::{PauliSum, PauliTerm};
use crate::pauli::Pauli;

fn single(qubit: u32, pauli: Pauli) -> PauliSum {
    PauliSum::from(PauliTerm::single(qubit, pauli, Complex64::one()))
}

/// `I(n)`.
pub fn identity(qubit: u32) -> PauliSum {
    single(qubit, Pauli::I)
}

/// `X(n)`.
pub fn sx(qubit: u32) -> PauliSum {
    single(qubit, Pauli::X)
}

/// `Z(n)`.
pub fn sz(qubit: u32) -> PauliSum {
    single(qubit, Pauli::Z)
}

/// `I(n) − I(n)`: the additive zero, kept unmerged.
pub fn zero(qubit: u32) -> PauliSum {
    identity(qubit) - identity(qubit)
}

/// `½(I + Z)`, the projector onto the top-left entry.
pub fn basis_1(qubit: u32) -> PauliSum {
    (identity(qubit) + sz(qubit)) * 0.5
}

/// `½(X + Z·X)`, the top-right entry.
pub fn basis_2(qubit: u32) -> PauliSum {
    (sx(qubit) + &sz(qubit) * &sx(qubit)) * 0.5
}

/// `½(X − Z·X)`, the bottom-left entry.
pub fn basis_3(qubit: u32) -> PauliSum {
    (sx(qubit) - &sz(qubit) * &sx(qubit)) * 0.5
}

/// `½(I − Z)`, the projector onto the bottom-right entry.
pub fn basis_4(qubit: u32) -> PauliSum {
    (identity(qubit) - sz(qubit)) * 0.5
}

/// `E_ii` on `num_qubits` qubits: the projector onto basis state `index`.
///
/// Built as a tensor product of `basis_1` (bit 0) and `basis_4` (bit 1) over
/// the bits of `index`, so it costs `2^num_qubits` terms without recursing
/// over a mostly-zero matrix.
pub fn diagonal_unit(index: usize, num_qubits: u32) -> PauliSum {
    (0..num_qubits).fold(identity(0), |acc, qubit| {
        let factor = if (index >> qubit) & 1 == 0 {
            basis_1(qubit)
        } else {
            basis_4(qubit)
        };
        acc.mul_sum(&factor)
    })
}
