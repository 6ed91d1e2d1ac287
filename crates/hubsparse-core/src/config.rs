//! Model configuration.
//!
//! A model file is YAML:
//!
//! ```yaml
//! lattice: { length: 2, depth: 2, periodic: true }
//! coupling_j: 1.0
//! interaction_u: 4.0
//! basis:
//!   up:   [1, 2, 4, 8]
//!   down: [1, 2, 4, 8]
//! threads: 4
//! accumulator: ndarray
//! ```
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`HUBSPARSE_THREADS`, `HUBSPARSE_ACCUMULATOR`)
//! 2. Model file
//! 3. Default values

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::accumulate::AccumulatorKind;
use crate::basis::SpinBases;
use crate::error::{HubbardError, HubbardResult};
use crate::hamiltonian::{HubbardParams, SparseHubbard};
use crate::hopping::SquareLattice;

/// Environment variable overriding [`ModelConfig::threads`].
pub const THREADS_ENV: &str = "HUBSPARSE_THREADS";
/// Environment variable overriding [`ModelConfig::accumulator`].
pub const ACCUMULATOR_ENV: &str = "HUBSPARSE_ACCUMULATOR";

/// Complete model description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Lattice geometry, used for the hopping amplitudes.
    pub lattice: SquareLattice,

    /// Hopping strength `J`
    #[serde(default = "default_coupling_j")]
    pub coupling_j: f64,

    /// On-site interaction `U`
    #[serde(default)]
    pub interaction_u: f64,

    /// Externally generated basis lists
    pub basis: BasisConfig,

    /// Size of the rayon pool; rayon's default when absent
    #[serde(default)]
    pub threads: Option<usize>,

    /// Block-axpy backend
    #[serde(default)]
    pub accumulator: AccumulatorKind,
}

/// Basis lists as stored in the model file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BasisConfig {
    /// Up-species states.
    #[serde(default)]
    pub up: Vec<u64>,
    /// Down-species states.
    #[serde(default)]
    pub down: Vec<u64>,
}

fn default_coupling_j() -> f64 {
    1.0
}

impl ModelConfig {
    /// Parse a YAML document without touching the environment.
    pub fn from_yaml_str(source: &str) -> HubbardResult<Self> {
        let config: Self = serde_yaml_ng::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a model file and apply environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> HubbardResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| HubbardError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded model file");

        let mut config: Self = serde_yaml_ng::from_str(&source)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in
    /// [`from_file`](Self::from_file)).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> HubbardResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(threads) = lookup(THREADS_ENV) {
            let n = threads.trim().parse::<usize>().map_err(|e| {
                HubbardError::InvalidConfig(format!("{THREADS_ENV}='{threads}': {e}"))
            })?;
            self.threads = Some(n);
        }
        if let Some(kind) = lookup(ACCUMULATOR_ENV) {
            self.accumulator = kind.parse()?;
        }
        Ok(())
    }

    /// Check the lattice and that every basis state fits on it.
    pub fn validate(&self) -> HubbardResult<()> {
        if self.lattice.length == 0 || self.lattice.depth == 0 {
            return Err(HubbardError::InvalidConfig(format!(
                "lattice must be non-empty, got {}x{}",
                self.lattice.length, self.lattice.depth
            )));
        }
        let sites = u64::from(self.lattice.length) * u64::from(self.lattice.depth);
        if sites > 64 {
            return Err(HubbardError::InvalidConfig(format!(
                "lattice has {sites} sites, at most 64 fit in a basis state"
            )));
        }
        if self.threads == Some(0) {
            return Err(HubbardError::InvalidConfig(
                "threads must be at least 1".to_string(),
            ));
        }
        if sites < 64 {
            let outside = !((1u64 << sites) - 1);
            for (name, states) in [("up", &self.basis.up), ("down", &self.basis.down)] {
                if let Some(&state) = states.iter().find(|&&s| s & outside != 0) {
                    return Err(HubbardError::InvalidConfig(format!(
                        "{name} state {state:#b} occupies sites outside the {sites}-site lattice"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Hopping amplitudes of the configured lattice.
    pub fn hopping(&self) -> SquareLattice {
        self.lattice
    }

    /// Couplings.
    pub fn params(&self) -> HubbardParams {
        HubbardParams::new(self.coupling_j, self.interaction_u)
    }

    /// Bases, cloned out of the config.
    pub fn bases(&self) -> SpinBases {
        SpinBases::new(self.basis.up.clone(), self.basis.down.clone())
    }

    /// Configure the rayon global pool if `threads` is set.
    ///
    /// The global pool can only be configured once per process.
    pub fn install_thread_pool(&self) -> HubbardResult<()> {
        if let Some(threads) = self.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()?;
            info!(threads, "rayon global pool configured");
        }
        Ok(())
    }

    /// Build the Hamiltonian described by this config.
    pub fn build(&self) -> HubbardResult<SparseHubbard> {
        let ham = SparseHubbard::new(self.bases(), &self.hopping(), self.params())?;
        Ok(ham.with_accumulator(self.accumulator.build()))
    }
}
