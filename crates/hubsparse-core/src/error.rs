//! Error types for the core crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::basis::Species;

/// Errors produced while building or configuring the sparse Hamiltonian.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HubbardError {
    /// A basis list was empty when an operator build was requested.
    #[error("Build base before building Hamiltonian: {species} basis is empty")]
    UninitializedBasis {
        /// The species whose basis was empty.
        species: Species,
    },

    /// A CSR operator does not satisfy the compressed-row invariants.
    #[error("Malformed CSR operator: {0}")]
    MalformedOperator(String),

    /// Model configuration is semantically invalid.
    #[error("Invalid model configuration: {0}")]
    InvalidConfig(String),

    /// The model file could not be read.
    #[error("Failed to read model file {}: {source}", path.display())]
    ConfigIo {
        /// Path of the model file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The model file is not valid YAML for a [`ModelConfig`](crate::config::ModelConfig).
    #[error("Failed to parse model file: {0}")]
    ConfigParse(#[from] serde_yaml_ng::Error),

    /// The rayon thread pool could not be started.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Unknown scaled-accumulate backend name.
    #[error("Unknown accumulator '{0}', expected 'loop' or 'ndarray'")]
    UnknownAccumulator(String),
}

/// Result type for core operations.
pub type HubbardResult<T> = Result<T, HubbardError>;
