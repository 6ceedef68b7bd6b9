//! Matrix text files.
pub mod text;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{PrintFormat, ReadPolicy};
use crate::math::Matrix;

pub use text::TokenReader;

/// Read an `nrows x ncols` matrix from a text file.
pub fn read_matrix_file<P: AsRef<Path>>(path: P, nrows: usize, ncols: usize) -> Result<Matrix> {
    read_matrix_file_with(path, nrows, ncols, ReadPolicy::Strict)
}

/// Read an `nrows x ncols` matrix from a text file using the given policy.
pub fn read_matrix_file_with<P: AsRef<Path>>(
    path: P,
    nrows: usize,
    ncols: usize,
    policy: ReadPolicy,
) -> Result<Matrix> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open matrix file: {}", path.as_ref().display()))?;
    let mut m = Matrix::new(nrows, ncols);
    let n = m
        .read_with(BufReader::new(file), policy)
        .with_context(|| {
            format!(
                "Failed to read {}x{} matrix from {}",
                nrows,
                ncols,
                path.as_ref().display()
            )
        })?;
    log::debug!("Read {} values from {}", n, path.as_ref().display());
    Ok(m)
}

/// Write `m` to a text file in the default layout.
pub fn write_matrix_file<P: AsRef<Path>>(path: P, m: &Matrix) -> Result<()> {
    write_matrix_file_with(path, m, &PrintFormat::default())
}

pub fn write_matrix_file_with<P: AsRef<Path>>(path: P, m: &Matrix, format: &PrintFormat) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("Failed to create matrix file: {}", path.as_ref().display()))?;
    let mut writer = BufWriter::new(file);
    m.print_with(&mut writer, format)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write matrix file: {}", path.as_ref().display()))?;
    Ok(())
}
