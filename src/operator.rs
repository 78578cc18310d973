//! Weighted Pauli products and their sums.
//!
//! A [`PauliTerm`] is a complex coefficient times a tensor product of Paulis
//! placed on explicit qubit indices; qubits not mentioned carry the identity.
//! A [`PauliSum`] is a plain additive collection of terms. Addition never
//! merges: two terms with the same label simply sit side by side until
//! [`PauliSum::simplify`] folds them together.
//!
//! Expansion back to a dense matrix ([`PauliSum::to_matrix`]) treats the
//! highest qubit as the leftmost tensor factor, so a term acting on qubit
//! `n-1` selects a quadrant of the `2^n` matrix.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use nalgebra::DMatrix;
use num_complex::Complex64;
use num_traits::{One, Zero};
use smallvec::SmallVec;

use crate::error::{DecomposeError, Result};
use crate::pauli::Pauli;

/// Sparse label: (qubit, Pauli) pairs sorted by qubit, never containing `I`.
pub type PauliLabel = SmallVec<[(u32, Pauli); 4]>;

/// A coefficient times a tensor product of single-qubit Paulis.
#[derive(Debug, Clone, PartialEq)]
pub struct PauliTerm {
    coefficient: Complex64,
    paulis: PauliLabel,
}

impl PauliTerm {
    /// Build a term from arbitrary (qubit, Pauli) factors.
    ///
    /// Factors are multiplied left to right; repeated qubits are combined
    /// through the single-qubit product table, with phases folded into the
    /// coefficient.
    pub fn new<I>(coefficient: Complex64, factors: I) -> Self
    where
        I: IntoIterator<Item = (u32, Pauli)>,
    {
        let mut term = Self::identity(coefficient);
        for (qubit, pauli) in factors {
            term = term.compose(&Self::single(qubit, pauli, Complex64::one()));
        }
        term
    }

    /// `coefficient · I`.
    pub fn identity(coefficient: Complex64) -> Self {
        Self {
            coefficient,
            paulis: PauliLabel::new(),
        }
    }

    /// `coefficient · P(qubit)`.
    pub fn single(qubit: u32, pauli: Pauli, coefficient: Complex64) -> Self {
        let mut paulis = PauliLabel::new();
        if pauli != Pauli::I {
            paulis.push((qubit, pauli));
        }
        Self {
            coefficient,
            paulis,
        }
    }

    pub fn coefficient(&self) -> Complex64 {
        self.coefficient
    }

    /// Non-identity factors, sorted by qubit.
    pub fn paulis(&self) -> &[(u32, Pauli)] {
        &self.paulis
    }

    /// The Pauli acting on `qubit` (identity if none is stored).
    pub fn pauli_at(&self, qubit: u32) -> Pauli {
        self.paulis
            .iter()
            .find(|(q, _)| *q == qubit)
            .map(|(_, p)| *p)
            .unwrap_or(Pauli::I)
    }

    /// Highest qubit this term acts on non-trivially.
    pub fn max_qubit(&self) -> Option<u32> {
        self.paulis.last().map(|(q, _)| *q)
    }

    /// Multiply the coefficient by a scalar.
    pub fn scale(&self, factor: Complex64) -> Self {
        Self {
            coefficient: self.coefficient * factor,
            paulis: self.paulis.clone(),
        }
    }

    /// Operator product `self · rhs`.
    ///
    /// Factors on distinct qubits are placed side by side (tensor product);
    /// factors on a shared qubit are multiplied in order.
    pub fn compose(&self, rhs: &PauliTerm) -> PauliTerm {
        let mut coefficient = self.coefficient * rhs.coefficient;
        let mut paulis = PauliLabel::with_capacity(self.paulis.len() + rhs.paulis.len());

        let (mut i, mut j) = (0, 0);
        while i < self.paulis.len() && j < rhs.paulis.len() {
            let (qa, pa) = self.paulis[i];
            let (qb, pb) = rhs.paulis[j];
            if qa < qb {
                paulis.push((qa, pa));
                i += 1;
            } else if qb < qa {
                paulis.push((qb, pb));
                j += 1;
            } else {
                let (phase, p) = pa.compose(pb);
                coefficient *= phase;
                if p != Pauli::I {
                    paulis.push((qa, p));
                }
                i += 1;
                j += 1;
            }
        }
        paulis.extend_from_slice(&self.paulis[i..]);
        paulis.extend_from_slice(&rhs.paulis[j..]);

        PauliTerm {
            coefficient,
            paulis,
        }
    }

    /// Bitmask of qubits whose factor flips the basis state (X or Y).
    fn flip_mask(&self) -> usize {
        self.paulis
            .iter()
            .filter(|(_, p)| matches!(p, Pauli::X | Pauli::Y))
            .fold(0usize, |mask, (q, _)| mask | (1usize << q))
    }

    /// Matrix element `<row|term|row ^ flip_mask>`; every other entry in that row is zero.
    fn row_value(&self, row: usize) -> Complex64 {
        let mut value = self.coefficient;
        for &(q, p) in &self.paulis {
            let r = (row >> q) & 1;
            let c = match p {
                Pauli::X | Pauli::Y => r ^ 1,
                Pauli::I | Pauli::Z => r,
            };
            value *= p.entry(r, c);
        }
        value
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.coefficient;
        if c.im == 0.0 {
            write!(f, "{}", c.re)?;
        } else if c.re == 0.0 {
            write!(f, "{}i", c.im)?;
        } else {
            write!(f, "({})", c)?;
        }
        if self.paulis.is_empty() {
            return write!(f, "*I");
        }
        for (q, p) in self.paulis.iter().rev() {
            write!(f, "*{}{}", p, q)?;
        }
        Ok(())
    }
}

/// A linear combination of [`PauliTerm`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PauliSum {
    terms: Vec<PauliTerm>,
}

impl PauliSum {
    /// The empty sum (additive zero).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_terms(terms: Vec<PauliTerm>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn push(&mut self, term: PauliTerm) {
        self.terms.push(term);
    }

    /// Smallest register that holds every term.
    pub fn num_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(PauliTerm::max_qubit)
            .max()
            .map_or(0, |q| q + 1)
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&self, factor: Complex64) -> Self {
        Self {
            terms: self.terms.iter().map(|t| t.scale(factor)).collect(),
        }
    }

    /// Distributed product: every term of `self` times every term of `rhs`.
    pub fn mul_sum(&self, rhs: &PauliSum) -> Self {
        let mut terms = Vec::with_capacity(self.terms.len() * rhs.terms.len());
        for a in &self.terms {
            for b in &rhs.terms {
                terms.push(a.compose(b));
            }
        }
        Self { terms }
    }

    /// Merge terms with identical labels and drop those whose coefficient
    /// magnitude is at most `tolerance`.
    ///
    /// Output is ordered by label.
    pub fn simplify(&self, tolerance: f64) -> Self {
        let mut merged: BTreeMap<PauliLabel, Complex64> = BTreeMap::new();
        for term in &self.terms {
            *merged.entry(term.paulis.clone()).or_insert_with(Complex64::zero) +=
                term.coefficient;
        }
        let terms = merged
            .into_iter()
            .filter(|(_, c)| c.norm() > tolerance)
            .map(|(paulis, coefficient)| PauliTerm {
                coefficient,
                paulis,
            })
            .collect();
        Self { terms }
    }

    /// Expand into the dense `2^num_qubits` square matrix this sum represents.
    pub fn to_matrix(&self, num_qubits: u32) -> Result<DMatrix<Complex64>> {
        if let Some(qubit) = self.terms.iter().filter_map(PauliTerm::max_qubit).max() {
            if qubit >= num_qubits {
                return Err(DecomposeError::QubitOutOfRange { qubit, num_qubits });
            }
        }
        let dim = 1usize << num_qubits;
        let mut out = DMatrix::from_element(dim, dim, Complex64::zero());
        for term in &self.terms {
            let mask = term.flip_mask();
            for row in 0..dim {
                out[(row, row ^ mask)] += term.row_value(row);
            }
        }
        Ok(out)
    }
}

impl fmt::Display for PauliSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (k, term) in self.terms.iter().enumerate() {
            if k > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

impl From<PauliTerm> for PauliSum {
    fn from(term: PauliTerm) -> Self {
        Self { terms: vec![term] }
    }
}

impl Add for PauliSum {
    type Output = PauliSum;

    fn add(mut self, rhs: PauliSum) -> PauliSum {
        self.terms.extend(rhs.terms);
        self
    }
}

impl AddAssign for PauliSum {
    fn add_assign(&mut self, rhs: PauliSum) {
        self.terms.extend(rhs.terms);
    }
}

impl Neg for PauliSum {
    type Output = PauliSum;

    fn neg(self) -> PauliSum {
        self.scale(-Complex64::one())
    }
}

impl Sub for PauliSum {
    type Output = PauliSum;

    fn sub(self, rhs: PauliSum) -> PauliSum {
        self + (-rhs)
    }
}

impl Mul<f64> for PauliSum {
    type Output = PauliSum;

    fn mul(self, rhs: f64) -> PauliSum {
        self.scale(Complex64::new(rhs, 0.0))
    }
}

impl Mul<&PauliSum> for &PauliSum {
    type Output = PauliSum;

    fn mul(self, rhs: &PauliSum) -> PauliSum {
        self.mul_sum(rhs)
    }
}
