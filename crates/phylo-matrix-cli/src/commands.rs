use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use phylo_matrix::config::MatrixConfig;
use phylo_matrix::io::{read_matrix_file_with, write_matrix_file_with};
use phylo_matrix::linalg::{backend, invert_with};
use phylo_matrix::Matrix;

fn load(path: &Path, nrows: usize, ncols: usize, config: &MatrixConfig) -> Result<Matrix> {
    read_matrix_file_with(path, nrows, ncols, config.read_policy)
}

/// Write `m` to `output`, or stdout when no path is given.
pub fn write_output(m: &Matrix, output: Option<&Path>, config: &MatrixConfig) -> Result<()> {
    match output {
        Some(path) => write_matrix_file_with(path, m, &config.print),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            m.print_with(&mut writer, &config.print)
                .and_then(|_| writer.flush())
                .context("Failed to write matrix to stdout")
        }
    }
}

/// Invert the `n x n` matrix stored in `input`.
pub fn run_invert(input: &Path, n: usize, output: Option<&Path>, config: &MatrixConfig) -> Result<()> {
    let m = load(input, n, n, config)?;
    let factorization = backend(config.backend);
    log::info!(
        "[phylomat::invert] {}x{} matrix from {:?} using the {} backend",
        n,
        n,
        input,
        factorization.name()
    );
    let mut inv = Matrix::new(n, n);
    invert_with(factorization.as_ref(), &mut inv, &m)
        .with_context(|| format!("Failed to invert matrix from {}", input.display()))?;
    write_output(&inv, output, config)
}

/// Multiply `a` (`rows x inner`) by `b` (`inner x b_cols`).
pub fn run_multiply(
    a: &Path,
    b: &Path,
    rows: usize,
    inner: usize,
    b_cols: usize,
    output: Option<&Path>,
    config: &MatrixConfig,
) -> Result<()> {
    let lhs = load(a, rows, inner, config)?;
    let rhs = load(b, inner, b_cols, config)?;
    log::info!(
        "[phylomat::multiply] ({} x {}) * ({} x {})",
        rows,
        inner,
        inner,
        b_cols
    );
    write_output(&lhs.dot(&rhs), output, config)
}

pub fn run_transpose(input: &Path, rows: usize, cols: usize, output: Option<&Path>, config: &MatrixConfig) -> Result<()> {
    let m = load(input, rows, cols, config)?;
    write_output(&m.transpose(), output, config)
}

/// Re-emit a matrix in the canonical layout.
pub fn run_print(input: &Path, rows: usize, cols: usize, output: Option<&Path>, config: &MatrixConfig) -> Result<()> {
    let m = load(input, rows, cols, config)?;
    write_output(&m, output, config)
}
