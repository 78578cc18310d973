//! Single-qubit Pauli symbols and their algebra.
//!
//! Products of two Paulis acting on the same qubit close over the group
//! `{±1, ±i} × {I, X, Y, Z}`:
//!
//! ```text
//! X·Y =  iZ    Y·Z =  iX    Z·X =  iY
//! Y·X = -iZ    Z·Y = -iX    X·Z = -iY
//! P·P =  I     I·P = P·I = P
//! ```
//!
//! `Y` never appears in the decomposition basis directly, but `Z(n)·X(n) = iY(n)`
//! shows up in the off-diagonal basis operators, so the full table is needed.

use std::fmt;

use num_complex::Complex64;
use num_traits::{One, Zero};

/// A single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

/// A single-qubit 2x2 matrix stored as [row0col0, row0col1, row1col0, row1col1].
pub type Matrix2x2 = [Complex64; 4];

impl Pauli {
    /// The 2x2 matrix of this operator.
    pub fn matrix(self) -> Matrix2x2 {
        let zero = Complex64::zero();
        let one = Complex64::one();
        let i = Complex64::i();
        match self {
            Pauli::I => [one, zero, zero, one],
            Pauli::X => [zero, one, one, zero],
            Pauli::Y => [zero, -i, i, zero],
            Pauli::Z => [one, zero, zero, -one],
        }
    }

    /// Matrix element `<row|P|col>` for row, col in {0, 1}.
    pub fn entry(self, row: usize, col: usize) -> Complex64 {
        self.matrix()[2 * row + col]
    }

    /// Algebra product `self · rhs` on the same qubit, as (phase, Pauli).
    pub fn compose(self, rhs: Pauli) -> (Complex64, Pauli) {
        let one = Complex64::one();
        let i = Complex64::i();
        match (self, rhs) {
            (Pauli::I, p) | (p, Pauli::I) => (one, p),
            (a, b) if a == b => (one, Pauli::I),
            (Pauli::X, Pauli::Y) => (i, Pauli::Z),
            (Pauli::Y, Pauli::X) => (-i, Pauli::Z),
            (Pauli::Y, Pauli::Z) => (i, Pauli::X),
            (Pauli::Z, Pauli::Y) => (-i, Pauli::X),
            (Pauli::Z, Pauli::X) => (i, Pauli::Y),
            (Pauli::X, Pauli::Z) => (-i, Pauli::Y),
            _ => unreachable!("all Pauli pairs are covered above"),
        }
    }

    /// Single-letter label.
    pub fn label(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
