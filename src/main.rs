//! pauli-builder: generate a random graph matrix and print its Pauli decomposition.

use clap::Parser;
use log::{error, info};

use pauli_builder::decompose::{Decomposer, DecomposerConfig};
use pauli_builder::graph::{generate, GraphConfig, GraphKind};
use pauli_builder::matrix::validate;

#[derive(Parser)]
#[command(name = "pauli-builder")]
#[command(about = "Decompose random graph matrices into Pauli sums", long_about = None)]
struct Cli {
    /// Graph matrix to generate
    #[arg(short, long, value_enum, default_value = "undirected-adjacency")]
    kind: GraphKind,

    /// Number of vertices (padded to the next power of two)
    #[arg(short, long, default_value_t = 4)]
    size: usize,

    /// Edge probability per vertex pair
    #[arg(short, long, default_value_t = 0.5)]
    density: f64,

    /// RNG seed for reproducible graphs
    #[arg(long)]
    seed: Option<u64>,

    /// Keep duplicate labels and cancelled terms
    #[arg(long)]
    raw: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> pauli_builder::error::Result<()> {
    let matrix = generate(&GraphConfig {
        kind: cli.kind,
        size: cli.size,
        density: cli.density,
        seed: cli.seed,
    })?;
    let num_qubits = validate(&matrix)?;
    info!(
        "generated {:?} on {} vertices ({} qubits)",
        cli.kind, cli.size, num_qubits
    );

    let decomposer = Decomposer::new(DecomposerConfig {
        simplify: !cli.raw,
        ..DecomposerConfig::default()
    });
    let sum = if cli.kind.is_laplacian() {
        decomposer.decompose_laplacian(&matrix)?
    } else {
        decomposer.decompose(&matrix)?
    };

    println!("━━━ Matrix ({0}×{0}) ━━━", matrix.nrows());
    for row in matrix.row_iter() {
        let cells: Vec<String> = row.iter().map(|v| format!("{:>3}", v)).collect();
        println!("  {}", cells.join(""));
    }
    println!();
    println!("━━━ Pauli sum ({} terms) ━━━", sum.len());
    println!("  {}", sum);
    println!();

    let reconstructed = sum.to_matrix(num_qubits)?;
    let max_err = reconstructed
        .iter()
        .zip(matrix.iter())
        .map(|(r, m)| (*r - *m).norm())
        .fold(0.0_f64, f64::max);
    println!("  Reconstruction max error: {:.3e}", max_err);
    Ok(())
}
