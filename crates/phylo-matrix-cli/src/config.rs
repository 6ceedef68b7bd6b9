use std::path::Path;

use anyhow::{Context, Result};
use phylo_matrix::config::{BackendKind, MatrixConfig, ReadPolicy};

/// Load a `MatrixConfig` from a JSON file.
pub fn load_matrix_config<P: AsRef<Path>>(path: P) -> Result<MatrixConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: MatrixConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Apply command-line overrides on top of a loaded or default config.
pub fn apply_overrides(config: &mut MatrixConfig, backend: Option<&str>, lenient: bool) -> Result<()> {
    if let Some(name) = backend {
        config.backend = name.parse::<BackendKind>().map_err(anyhow::Error::msg)?;
    }
    if lenient {
        config.read_policy = ReadPolicy::Lenient;
    }
    Ok(())
}
