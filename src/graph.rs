//! Random graph matrices to feed the decomposer.
//!
//! Adjacency and Laplacian matrices are generated for `size` vertices and
//! zero-padded to the next power of two, so every output is directly
//! decomposable. Laplacians follow `L = D - A`:
//! - undirected and out-degree: `D_ii` is the row sum of `A`
//! - in-degree: `D_ii` is the column sum of `A`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{DecomposeError, Result};
use crate::matrix::{padded_size, Matrix};

/// Which graph matrix to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphKind {
    /// Symmetric 0/1 adjacency, no self-loops.
    UndirectedAdjacency,
    /// 0/1 adjacency over ordered pairs, no self-loops.
    DirectedAdjacency,
    /// `D - A` for an undirected graph.
    UndirectedLaplacian,
    /// `D_out - A` for a directed graph.
    OutDegreeLaplacian,
    /// `D_in - A` for a directed graph.
    InDegreeLaplacian,
}

impl GraphKind {
    pub fn is_laplacian(self) -> bool {
        matches!(
            self,
            GraphKind::UndirectedLaplacian
                | GraphKind::OutDegreeLaplacian
                | GraphKind::InDegreeLaplacian
        )
    }

    pub fn is_directed(self) -> bool {
        matches!(
            self,
            GraphKind::DirectedAdjacency
                | GraphKind::OutDegreeLaplacian
                | GraphKind::InDegreeLaplacian
        )
    }
}

/// Which degree goes on a Laplacian's diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degree {
    /// Row sums (edges leaving the vertex).
    Out,
    /// Column sums (edges entering the vertex).
    In,
}

/// Parameters for a random graph.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub kind: GraphKind,
    /// Number of vertices before padding.
    pub size: usize,
    /// Edge probability per candidate pair, in [0, 1].
    pub density: f64,
    /// RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
}

/// Generate the matrix described by `config`.
pub fn generate(config: &GraphConfig) -> Result<Matrix> {
    if config.size == 0 {
        return Err(DecomposeError::InvalidGraph("size must be at least 1".into()));
    }
    if !(0.0..=1.0).contains(&config.density) {
        return Err(DecomposeError::InvalidGraph(format!(
            "density {} outside [0, 1]",
            config.density
        )));
    }
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let adjacency = random_adjacency(config.size, config.density, config.kind.is_directed(), &mut rng);
    let matrix = match config.kind {
        GraphKind::UndirectedAdjacency | GraphKind::DirectedAdjacency => adjacency,
        GraphKind::UndirectedLaplacian | GraphKind::OutDegreeLaplacian => {
            laplacian(&adjacency, Degree::Out)
        }
        GraphKind::InDegreeLaplacian => laplacian(&adjacency, Degree::In),
    };
    Ok(matrix)
}

/// Random padded 0/1 adjacency over `size` vertices.
///
/// Undirected graphs draw once per unordered pair and mirror the edge;
/// directed graphs draw once per ordered pair.
pub fn random_adjacency<R: Rng>(size: usize, density: f64, directed: bool, rng: &mut R) -> Matrix {
    let dim = padded_size(size);
    let mut adjacency = Matrix::zeros(dim, dim);
    for i in 0..size {
        let start = if directed { 0 } else { i + 1 };
        for j in start..size {
            if i == j {
                continue;
            }
            if rng.gen::<f64>() < density {
                adjacency[(i, j)] = 1.0;
                if !directed {
                    adjacency[(j, i)] = 1.0;
                }
            }
        }
    }
    adjacency
}

/// Padded adjacency from an explicit edge list over `size` vertices.
///
/// Every endpoint must be a real vertex (`< size`); padding rows stay empty.
pub fn adjacency_from_edges(size: usize, edges: &[(usize, usize)], directed: bool) -> Result<Matrix> {
    let dim = padded_size(size);
    let mut adjacency = Matrix::zeros(dim, dim);
    for &(i, j) in edges {
        if i >= size || j >= size {
            return Err(DecomposeError::InvalidGraph(format!(
                "edge ({}, {}) outside {} vertices",
                i, j, size
            )));
        }
        adjacency[(i, j)] = 1.0;
        if !directed {
            adjacency[(j, i)] = 1.0;
        }
    }
    Ok(adjacency)
}

/// `L = D - A` with the chosen degree on the diagonal.
pub fn laplacian(adjacency: &Matrix, degree: Degree) -> Matrix {
    let mut lap = -adjacency.clone();
    lap.fill_diagonal(0.0);
    for i in 0..adjacency.nrows() {
        let d: f64 = match degree {
            Degree::Out => (0..adjacency.ncols()).filter(|&j| j != i).map(|j| adjacency[(i, j)]).sum(),
            Degree::In => (0..adjacency.nrows()).filter(|&j| j != i).map(|j| adjacency[(j, i)]).sum(),
        };
        lap[(i, i)] = d;
    }
    lap
}
