//! `hubsparse-core`: sparse Hubbard Hamiltonian on a tensor-product basis.
//!
//! The Hubbard Hilbert space factorises into an up-species and a
//! down-species subspace, each small enough to enumerate. This crate builds
//! one compressed-row hopping operator per species and applies
//!
//!   y := alpha · y + H · x,    H = T_up ⊗ 1 + 1 ⊗ T_down + U · D
//!
//! without ever forming the `Dim x Dim` matrix (`Dim = NumUp · NumDown`).
//! The product is the inner kernel of an iterative eigensolver such as
//! Lanczos, which this crate leaves to the caller via [`LinearOperator`].
//!
//! # Components
//!
//! - [`CsrOperator`]: single-species hopping operator, built in parallel
//!   from a [`Basis`] and a [`Hopping`] amplitude function
//! - [`hamiltonian::apply`] / [`SparseHubbard`]: the tensor-product
//!   matrix-vector product
//! - [`build_diagonal`]: on-site interaction diagonal
//! - [`ScaledAccumulate`]: block axpy backends (plain loop or `ndarray`)
//! - [`SquareLattice`]: nearest-neighbour fermionic hopping on a 2D grid
//! - [`ModelConfig`]: YAML model files
//! - [`dump`]: dense and raw text dumps of the hopping operators
//!
//! Basis generation is not part of this crate: bases are supplied as
//! ordered lists of occupation bitmasks.
//!
//! # Quick start
//!
//! ```rust
//! use hubsparse_core::{HubbardParams, SparseHubbard, SpinBases};
//!
//! // two sites, one particle per species, hopping between any two states
//! let hopping = |a: u64, b: u64| i32::from(a != b);
//! let bases = SpinBases::new(vec![0b01, 0b10], vec![0b01, 0b10]);
//! let ham = SparseHubbard::new(bases, &hopping, HubbardParams::new(1.5, 2.0)).unwrap();
//!
//! assert_eq!(ham.up_operator().row_ptr(), &[0, 1, 2]);
//! assert_eq!(ham.up_operator().col_idx(), &[1, 0]);
//! assert_eq!(ham.up_operator().data(), &[1.5, 1.5]);
//!
//! let y = ham.matvec(&[1.0, 0.0, 0.0, 0.0]);
//! assert_eq!(y, vec![2.0, 1.5, 1.5, 0.0]);
//! ```

pub mod accumulate;
pub mod basis;
pub mod config;
pub mod csr;
pub mod dump;
pub mod error;
pub mod hamiltonian;
pub mod hopping;
pub mod interaction;

pub use accumulate::{AccumulatorKind, LoopAccumulate, NdarrayAccumulate, ScaledAccumulate};
pub use basis::{Basis, Species, SpinBases, popcount};
pub use config::ModelConfig;
pub use csr::CsrOperator;
pub use dump::{DenseDump, RawDump};
pub use error::{HubbardError, HubbardResult};
pub use hamiltonian::{HubbardParams, LinearOperator, SparseHubbard};
pub use hopping::{Hopping, SquareLattice};
pub use interaction::build_diagonal;
