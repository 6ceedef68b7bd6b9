use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Central configuration for text I/O and inversion.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MatrixConfig {
    pub print: PrintFormat,
    pub read_policy: ReadPolicy,
    pub backend: BackendKind,
}

/// Layout used by `Matrix::print`.
///
/// The whole matrix is printed in scientific notation when its smallest
/// non-zero absolute value is below `scientific_threshold`, otherwise in
/// fixed-point notation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PrintFormat {
    pub fixed_width: usize,
    pub scientific_width: usize,
    pub precision: usize,
    pub scientific_threshold: f64,
}

impl Default for PrintFormat {
    fn default() -> Self {
        Self {
            fixed_width: 11,
            scientific_width: 14,
            precision: 6,
            scientific_threshold: 1e-3,
        }
    }
}

/// How `Matrix::read` reacts to short or malformed input.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReadPolicy {
    /// Fail unless exactly `nrows * ncols` numbers can be read.
    #[default]
    Strict,
    /// Stop at the first missing or malformed value and keep the cells that
    /// were not reached unchanged.
    Lenient,
}

impl FromStr for ReadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(ReadPolicy::Strict),
            "lenient" => Ok(ReadPolicy::Lenient),
            _ => Err(format!("Unknown read policy: {}", s)),
        }
    }
}

/// Factorization backend used for inversion.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Native,
    Lapack,
}

impl Default for BackendKind {
    fn default() -> Self {
        if cfg!(feature = "native") || !cfg!(feature = "lapack") {
            BackendKind::Native
        } else {
            BackendKind::Lapack
        }
    }
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Native => "native",
            BackendKind::Lapack => "lapack",
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" => Ok(BackendKind::Native),
            "lapack" => Ok(BackendKind::Lapack),
            _ => Err(format!(
                "Unknown backend: {}. To use lapack, please compile with `--features lapack`",
                s
            )),
        }
    }
}
