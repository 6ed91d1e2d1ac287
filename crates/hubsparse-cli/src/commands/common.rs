//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use hubsparse_core::{ModelConfig, SparseHubbard};

/// Load a model file, configure the worker pool and build the Hamiltonian.
///
/// `threads` from the command line wins over the file and the environment.
pub fn load_model(path: &str, threads: Option<usize>) -> Result<(ModelConfig, SparseHubbard)> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let mut config =
        ModelConfig::from_file(path).with_context(|| format!("Failed to load model: {path}"))?;
    if threads.is_some() {
        config.threads = threads;
        config.validate()?;
    }
    config.install_thread_pool()?;

    let ham = config.build()?;
    info!(
        dim = ham.dim(),
        threads = rayon::current_num_threads(),
        accumulator = ham.accumulator_name(),
        "model ready"
    );
    Ok((config, ham))
}

/// Format a float vector as one `index value` pair per line.
pub fn format_vector(values: &[f64]) -> String {
    let width = values.len().saturating_sub(1).to_string().len();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{i:>width$}  {v}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_vector() {
        let text = format_vector(&(0..11).map(f64::from).collect::<Vec<_>>());
        assert!(text.starts_with(" 0  0\n"));
        assert!(text.ends_with("10  10\n"));
    }

    #[test]
    fn test_missing_model() {
        let err = load_model("/nonexistent/model.yaml", None).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_load_model() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "lattice: {{ length: 2, depth: 1 }}\nbasis: {{ up: [1, 2], down: [1, 2] }}"
        )
        .unwrap();
        let (config, ham) = load_model(file.path().to_str().unwrap(), None).unwrap();
        assert_eq!(config.lattice.sites(), 2);
        assert_eq!(ham.dim(), 4);
    }

    #[test]
    fn test_zero_threads_flag_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "lattice: {{ length: 2, depth: 1 }}\nbasis: {{ up: [1], down: [1] }}"
        )
        .unwrap();
        assert!(load_model(file.path().to_str().unwrap(), Some(0)).is_err());
    }
}
