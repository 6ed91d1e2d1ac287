//! Hubbard Hamiltonian on the tensor product of the up and down bases.
//!
//! The full many-body index is `i = a * NumDown + k` with `a` an up index
//! and `k` a down index, so
//!
//!   H = T_up ⊗ 1 + 1 ⊗ T_down + U · D
//!
//! where `T_up` / `T_down` are the species hopping operators and `D` counts
//! doubly occupied sites. `T_down` acts inside each contiguous block of
//! `NumDown` amplitudes, `T_up` mixes whole blocks, and `D` is diagonal.
//! None of these is ever expanded to a `Dim x Dim` matrix.
//!
//! # Example
//!
//! ```rust
//! use hubsparse_core::{HubbardParams, SparseHubbard, SpinBases, SquareLattice};
//!
//! // one particle of each species on a periodic 2x2 plaquette
//! let bases = SpinBases::new(vec![1, 2, 4, 8], vec![1, 2, 4, 8]);
//! let lattice = SquareLattice::new(2, 2);
//! let ham = SparseHubbard::new(bases, &lattice, HubbardParams::new(1.0, 4.0)).unwrap();
//!
//! let x = vec![1.0; ham.dim()];
//! let mut y = vec![0.0; ham.dim()];
//! ham.apply(&x, &mut y, 0.0);
//! assert_eq!(y.len(), 16);
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::accumulate::{NdarrayAccumulate, ScaledAccumulate};
use crate::basis::{Basis, Species, SpinBases};
use crate::csr::CsrOperator;
use crate::error::HubbardResult;
use crate::hopping::Hopping;
use crate::interaction::{build_diagonal, interaction_energy};

/// Model couplings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HubbardParams {
    /// Hopping strength `J`, multiplies every hopping amplitude.
    pub coupling_j: f64,
    /// On-site interaction `U`.
    pub interaction_u: f64,
}

impl HubbardParams {
    /// Create a new parameter set.
    pub fn new(coupling_j: f64, interaction_u: f64) -> Self {
        Self {
            coupling_j,
            interaction_u,
        }
    }
}

/// A real linear operator usable by an iterative eigensolver.
pub trait LinearOperator {
    /// Dimension of the space the operator acts on.
    fn dim(&self) -> usize;

    /// `y := alpha * y + A * x`.
    fn apply(&self, x: &[f64], y: &mut [f64], alpha: f64);
}

/// `y := alpha * y + H * x` for the tensor-product Hubbard Hamiltonian.
///
/// `x` and `y` must both have length `base_up.len() * base_down.len()` and
/// the operators must have been built from the same bases; neither is
/// checked outside debug builds.
///
/// Output is partitioned into disjoint blocks of `NumDown` elements, one
/// per up index `a`. Each block is written by a single task: it first gets
/// `alpha * y` plus the interaction and down-hopping terms, then one block
/// axpy per non-zero of up row `a`. `x`, the operators and the bases are
/// only read.
#[allow(clippy::too_many_arguments)]
pub fn apply<A>(
    up_op: &CsrOperator,
    down_op: &CsrOperator,
    base_up: &Basis,
    base_down: &Basis,
    u: f64,
    x: &[f64],
    y: &mut [f64],
    alpha: f64,
    accumulator: &A,
) where
    A: ScaledAccumulate + ?Sized,
{
    let num_down = base_down.len();
    debug_assert_eq!(x.len(), base_up.len() * num_down);
    debug_assert_eq!(y.len(), x.len());
    debug_assert_eq!(up_op.dim(), base_up.len());
    debug_assert_eq!(down_op.dim(), num_down);
    if num_down == 0 {
        return;
    }

    let down_states = base_down.states();

    y.par_chunks_mut(num_down)
        .zip(base_up.states().par_iter())
        .enumerate()
        .for_each(|(a, (y_block, &up_state))| {
            let offset = a * num_down;
            let x_block = &x[offset..offset + num_down];

            for (k, y_k) in y_block.iter_mut().enumerate() {
                let mut acc =
                    alpha * *y_k + interaction_energy(up_state, down_states[k], u) * x_block[k];
                for (col, amp) in down_op.row(k) {
                    acc += amp * x_block[col];
                }
                *y_k = acc;
            }

            for (col, amp) in up_op.row(a) {
                let src = col * num_down;
                accumulator.scaled_add(amp, &x[src..src + num_down], y_block);
            }
        });
}

/// Sparse Hubbard Hamiltonian: both species operators plus their bases.
///
/// Built once from fixed bases and couplings, then applied any number of
/// times. Changing the basis or a coupling means building a new value.
pub struct SparseHubbard {
    bases: SpinBases,
    params: HubbardParams,
    up_op: CsrOperator,
    down_op: CsrOperator,
    accumulator: Box<dyn ScaledAccumulate>,
}

impl SparseHubbard {
    /// Build the up and down hopping operators.
    ///
    /// Both bases are checked before either operator is built, so an
    /// uninitialized basis leaves nothing behind.
    pub fn new<H>(bases: SpinBases, hopping: &H, params: HubbardParams) -> HubbardResult<Self>
    where
        H: Hopping + ?Sized,
    {
        bases.ensure_initialized()?;

        let up_op = CsrOperator::build(&bases.up, hopping, params.coupling_j)?;
        let down_op = CsrOperator::build(&bases.down, hopping, params.coupling_j)?;

        info!(
            num_up = bases.up.len(),
            num_down = bases.down.len(),
            dim = bases.dim(),
            up_nnz = up_op.nnz(),
            down_nnz = down_op.nnz(),
            "sparse Hubbard Hamiltonian ready"
        );

        Ok(Self {
            bases,
            params,
            up_op,
            down_op,
            accumulator: Box::new(NdarrayAccumulate),
        })
    }

    /// Replace the block-axpy backend.
    #[must_use]
    pub fn with_accumulator(mut self, accumulator: Box<dyn ScaledAccumulate>) -> Self {
        self.accumulator = accumulator;
        self
    }

    /// Name of the block-axpy backend in use.
    pub fn accumulator_name(&self) -> &'static str {
        self.accumulator.name()
    }

    /// Size of the up basis.
    pub fn num_up(&self) -> usize {
        self.bases.up.len()
    }

    /// Size of the down basis.
    pub fn num_down(&self) -> usize {
        self.bases.down.len()
    }

    /// Many-body dimension `NumUp * NumDown`.
    pub fn dim(&self) -> usize {
        self.bases.dim()
    }

    /// The bases the operators were built from.
    pub fn bases(&self) -> &SpinBases {
        &self.bases
    }

    /// Couplings.
    pub fn params(&self) -> HubbardParams {
        self.params
    }

    /// Up-species hopping operator.
    pub fn up_operator(&self) -> &CsrOperator {
        &self.up_op
    }

    /// Down-species hopping operator.
    pub fn down_operator(&self) -> &CsrOperator {
        &self.down_op
    }

    /// Hopping operator of `species`.
    pub fn operator(&self, species: Species) -> &CsrOperator {
        match species {
            Species::Up => &self.up_op,
            Species::Down => &self.down_op,
        }
    }

    /// Dense reconstruction of the hopping operator of `species`.
    pub fn dense_species(&self, species: Species) -> Vec<Vec<f64>> {
        self.operator(species).to_dense()
    }

    /// `y := alpha * y + H * x`. See [`apply`].
    pub fn apply(&self, x: &[f64], y: &mut [f64], alpha: f64) {
        apply(
            &self.up_op,
            &self.down_op,
            &self.bases.up,
            &self.bases.down,
            self.params.interaction_u,
            x,
            y,
            alpha,
            self.accumulator.as_ref(),
        );
    }

    /// `H * x` into a fresh vector.
    pub fn matvec(&self, x: &[f64]) -> Vec<f64> {
        let mut y = vec![0.0; self.dim()];
        self.apply(x, &mut y, 0.0);
        y
    }

    /// Interaction diagonal, length `dim()`.
    pub fn diagonal(&self) -> Vec<f64> {
        build_diagonal(
            &self.bases.up,
            &self.bases.down,
            self.params.interaction_u,
        )
    }
}

impl LinearOperator for SparseHubbard {
    fn dim(&self) -> usize {
        SparseHubbard::dim(self)
    }

    fn apply(&self, x: &[f64], y: &mut [f64], alpha: f64) {
        SparseHubbard::apply(self, x, y, alpha);
    }
}

impl std::fmt::Debug for SparseHubbard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparseHubbard")
            .field("num_up", &self.num_up())
            .field("num_down", &self.num_down())
            .field("params", &self.params)
            .field("up_nnz", &self.up_op.nnz())
            .field("down_nnz", &self.down_op.nnz())
            .field("accumulator", &self.accumulator.name())
            .finish()
    }
}
