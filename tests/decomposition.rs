//! End-to-end decomposition tests: reconstruction, Laplacians, input handling.

use approx::assert_relative_eq;
use nalgebra::DMatrix;
use num_complex::Complex64;
use proptest::prelude::*;

use pauli_builder::prelude::*;

/// Expand a sum back to a real matrix, asserting no imaginary residue.
fn reconstruct(sum: &PauliSum, num_qubits: u32) -> Matrix {
    let dense: DMatrix<Complex64> = sum.to_matrix(num_qubits).unwrap();
    assert!(
        dense.iter().all(|v| v.im == 0.0),
        "reconstruction has imaginary part: {}",
        sum
    );
    dense.map(|v| v.re)
}

fn four_cycle() -> Matrix {
    Matrix::from_row_slice(
        4,
        4,
        &[
            0.0, 0.0, 0.0, 1.0,
            0.0, 0.0, 1.0, 1.0,
            0.0, 1.0, 0.0, 0.0,
            1.0, 1.0, 0.0, 0.0,
        ],
    )
}

fn known_laplacian() -> Matrix {
    let adjacency = adjacency_from_edges(4, &[(0, 3), (1, 2), (1, 3)], false).unwrap();
    laplacian(&adjacency, Degree::Out)
}

// ---------------------------------------------------------------------------
// Adjacency matrices
// ---------------------------------------------------------------------------

#[test]
fn four_cycle_reconstructs_exactly() {
    let m = four_cycle();
    let sum = decompose(&m).unwrap();
    assert_eq!(sum.num_qubits(), 2);
    assert_eq!(reconstruct(&sum, 2), m);
}

#[test]
fn four_by_four_matches_quadrant_formula() {
    let m = four_cycle();
    let [a, b, c, d] = quadrants(&m);
    let raw = Decomposer::new(DecomposerConfig {
        simplify: false,
        ..DecomposerConfig::default()
    });

    // Quadrant sums are merged before composition; the outer split is not.
    let expected = basis_1(1).mul_sum(&decompose(&a).unwrap())
        + basis_2(1).mul_sum(&decompose(&b).unwrap())
        + basis_3(1).mul_sum(&decompose(&c).unwrap())
        + basis_4(1).mul_sum(&decompose(&d).unwrap());

    assert_eq!(raw.decompose(&m).unwrap(), expected);
    assert_eq!(decompose(&m).unwrap(), expected.simplify(1e-12));
}

#[test]
fn all_sixteen_blocks_decompose_through_public_entry() {
    for bits in 0u8..16 {
        let m = Matrix::from_fn(2, 2, |r, c| ((bits >> (2 * r + c)) & 1) as f64);
        let sum = decompose(&m).unwrap();
        assert_eq!(reconstruct(&sum, 1), m, "pattern {:04b}", bits);
    }
}

#[test]
fn zero_matrix_is_additive_zero_at_every_size() {
    for q in 1..=5u32 {
        let size = 1usize << q;
        let m = Matrix::zeros(size, size);
        let sum = decompose(&m).unwrap();
        assert!(sum.is_empty(), "{}x{} zero matrix left terms: {}", size, size, sum);

        let raw = Decomposer::new(DecomposerConfig {
            simplify: false,
            ..DecomposerConfig::default()
        })
        .decompose(&m)
        .unwrap();
        // A lone 2x2 block keeps its unmerged I - I; larger ones merge quadrants away.
        assert_eq!(raw.is_empty(), q > 1);
        assert_eq!(reconstruct(&raw, q), m);
    }
}

#[test]
fn identity_decomposes_to_single_identity_term() {
    let sum = decompose(&Matrix::identity(8, 8)).unwrap();
    assert_eq!(sum.len(), 1);
    assert!(sum.terms()[0].paulis().is_empty());
    assert_eq!(sum.terms()[0].coefficient(), Complex64::new(1.0, 0.0));
}

#[test]
fn all_ones_is_product_of_i_plus_x() {
    // J_8 = (I+X)⊗(I+X)⊗(I+X): eight terms, each with coefficient 1.
    let sum = decompose(&Matrix::from_element(8, 8, 1.0)).unwrap();
    assert_eq!(sum.len(), 8);
    for term in sum.terms() {
        assert_eq!(term.coefficient(), Complex64::new(1.0, 0.0));
        assert!(term.paulis().iter().all(|(_, p)| *p == Pauli::X));
    }
}

// ---------------------------------------------------------------------------
// Laplacians
// ---------------------------------------------------------------------------

#[test]
fn known_graph_laplacian_reconstructs() {
    let l = known_laplacian();
    assert_eq!(l.diagonal().as_slice(), &[1.0, 2.0, 1.0, 2.0]);
    let sum = decompose_laplacian(&l).unwrap();
    assert_eq!(reconstruct(&sum, 2), l);
}

#[test]
fn laplacian_equals_degree_minus_adjacency_decomposition() {
    // L = D - A: negate the adjacency sum, add each degree times its indicator.
    let l = known_laplacian();
    let adjacency = adjacency_from_laplacian(&l);

    let mut manual = -decompose(&adjacency).unwrap();
    for i in 0..4 {
        manual += decompose(&indicator(4, i)).unwrap() * l[(i, i)];
    }
    assert_eq!(reconstruct(&manual, 2), l);
    assert_eq!(manual.simplify(1e-12), decompose_laplacian(&l).unwrap());
}

#[test]
fn directed_laplacians_reconstruct() {
    let adjacency =
        adjacency_from_edges(5, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 0)], true).unwrap();
    for degree in [Degree::Out, Degree::In] {
        let l = laplacian(&adjacency, degree);
        let sum = decompose_laplacian(&l).unwrap();
        assert_eq!(reconstruct(&sum, 3), l, "{:?}-degree Laplacian", degree);
    }
}

#[test]
fn laplacian_of_128_vertices_stays_bounded() {
    let l = generate(&GraphConfig {
        kind: GraphKind::UndirectedLaplacian,
        size: 128,
        density: 0.5,
        seed: Some(2024),
    })
    .unwrap();
    let raw = Decomposer::new(DecomposerConfig {
        simplify: false,
        ..DecomposerConfig::default()
    })
    .decompose_laplacian(&l)
    .unwrap();
    // Four outer products of at most 2 * 4^6 terms, plus 2^7 terms per degree.
    assert!(raw.len() <= 8 * 4usize.pow(6) + 128 * 128, "{} raw terms", raw.len());

    let merged = decompose_laplacian(&l).unwrap();
    assert!(merged.len() <= 4usize.pow(7), "{} merged terms", merged.len());
    assert_eq!(reconstruct(&merged, 7), l);
}

#[test]
fn few_hundred_vertices_decompose() {
    for kind in [GraphKind::UndirectedAdjacency, GraphKind::UndirectedLaplacian] {
        let m = generate(&GraphConfig {
            kind,
            size: 256,
            density: 0.5,
            seed: Some(11),
        })
        .unwrap();
        let sum = if kind.is_laplacian() {
            decompose_laplacian(&m).unwrap()
        } else {
            decompose(&m).unwrap()
        };
        assert!(sum.len() <= 4usize.pow(8), "{:?}: {} terms", kind, sum.len());
        assert_eq!(sum.num_qubits(), 8);
    }
}

#[test]
fn weighted_laplacian_is_unmatched() {
    let mut l = known_laplacian();
    l[(0, 3)] = -2.0;
    l[(0, 0)] = 2.0;
    assert!(matches!(
        decompose_laplacian(&l),
        Err(DecomposeError::UnmatchedPattern { .. })
    ));
}

// ---------------------------------------------------------------------------
// Input handling
// ---------------------------------------------------------------------------

#[test]
fn caller_matrices_are_not_mutated() {
    let m = four_cycle();
    let before = m.clone();
    decompose(&m).unwrap();
    assert_eq!(m, before);

    let l = known_laplacian();
    let before = l.clone();
    decompose_laplacian(&l).unwrap();
    assert_eq!(l, before);
}

#[test]
fn bad_shapes_are_rejected_by_both_entry_points() {
    let rect = Matrix::zeros(4, 2);
    let odd = Matrix::zeros(3, 3);
    let single = Matrix::zeros(1, 1);
    for m in [&rect, &odd, &single] {
        assert!(decompose(m).is_err());
        assert!(decompose_laplacian(m).is_err());
    }
    assert_eq!(
        decompose(&odd),
        Err(DecomposeError::NotPowerOfTwo { size: 3 })
    );
}

#[test]
fn padding_makes_odd_graphs_decomposable() {
    let m = Matrix::from_element(3, 3, 1.0);
    let padded = pad_to_power_of_two(&m).unwrap();
    let sum = decompose(&padded).unwrap();
    assert_eq!(reconstruct(&sum, 2), padded);
}

#[test]
fn generated_graphs_round_trip() {
    let kinds = [
        GraphKind::UndirectedAdjacency,
        GraphKind::DirectedAdjacency,
        GraphKind::UndirectedLaplacian,
        GraphKind::OutDegreeLaplacian,
        GraphKind::InDegreeLaplacian,
    ];
    for kind in kinds {
        for size in [2, 3, 6, 11] {
            let m = generate(&GraphConfig {
                kind,
                size,
                density: 0.4,
                seed: Some(size as u64 * 31),
            })
            .unwrap();
            let num_qubits = validate(&m).unwrap();
            let sum = if kind.is_laplacian() {
                decompose_laplacian(&m).unwrap()
            } else {
                decompose(&m).unwrap()
            };
            assert_eq!(reconstruct(&sum, num_qubits), m, "{:?} on {} vertices", kind, size);
        }
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn boolean_matrix() -> impl Strategy<Value = Matrix> {
    (1u32..=4).prop_flat_map(|q| {
        let n = 1usize << q;
        prop::collection::vec(any::<bool>(), n * n)
            .prop_map(move |bits| Matrix::from_fn(n, n, |r, c| bits[r * n + c] as u8 as f64))
    })
}

fn undirected_laplacian() -> impl Strategy<Value = Matrix> {
    (2usize..=12).prop_flat_map(|size| {
        prop::collection::vec(any::<bool>(), size * size).prop_map(move |bits| {
            let edges: Vec<(usize, usize)> = (0..size)
                .flat_map(|i| ((i + 1)..size).map(move |j| (i, j)))
                .filter(|&(i, j)| bits[i * size + j])
                .collect();
            laplacian(&adjacency_from_edges(size, &edges, false).unwrap(), Degree::Out)
        })
    })
}

proptest! {
    #[test]
    fn boolean_matrices_reconstruct(m in boolean_matrix()) {
        let q = validate(&m).unwrap();
        let sum = decompose(&m).unwrap();
        prop_assert_eq!(reconstruct(&sum, q), m);
    }

    #[test]
    fn unmerged_and_merged_sums_agree(m in boolean_matrix()) {
        let q = validate(&m).unwrap();
        let raw = Decomposer::new(DecomposerConfig { simplify: false, ..DecomposerConfig::default() })
            .decompose(&m)
            .unwrap();
        let merged = decompose(&m).unwrap();
        prop_assert!(merged.len() <= raw.len());
        prop_assert_eq!(reconstruct(&raw, q), reconstruct(&merged, q));
    }

    #[test]
    fn laplacians_reconstruct(l in undirected_laplacian()) {
        let q = validate(&l).unwrap();
        let sum = decompose_laplacian(&l).unwrap();
        prop_assert_eq!(reconstruct(&sum, q), l);
    }

    // Paulis are orthogonal under the Hilbert-Schmidt product, so
    // ||M||_F^2 = 2^n * sum |c_k|^2 for a merged decomposition.
    #[test]
    fn merged_coefficients_carry_frobenius_norm(m in boolean_matrix()) {
        let q = validate(&m).unwrap();
        let sum = decompose(&m).unwrap();
        let weight: f64 = sum.terms().iter().map(|t| t.coefficient().norm_sqr()).sum();
        let frobenius = m.iter().map(|v| v * v).sum::<f64>();
        assert_relative_eq!(weight * (1u64 << q) as f64, frobenius, epsilon = 1e-9);
    }
}
