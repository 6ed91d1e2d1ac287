//! Property-based tests for the sparse kernel.
//!
//! Random lattices, random (possibly incomplete or shuffled) bases and
//! random vectors: the sparse product must agree with the dense reference.

mod common;

use common::{dense_hamiltonian, dense_matvec, max_diff};
use hubsparse_core::{
    CsrOperator, HubbardParams, LoopAccumulate, SparseHubbard, SpinBases, SquareLattice,
};
use proptest::prelude::*;

/// A lattice with at most 6 sites and its full list of occupation masks.
fn arb_lattice() -> impl Strategy<Value = SquareLattice> {
    (1_u32..=3, 1_u32..=2, any::<bool>()).prop_map(|(length, depth, periodic)| {
        let lattice = SquareLattice::new(length, depth);
        if periodic { lattice } else { lattice.open() }
    })
}

/// Non-empty ordered subset of all states on `sites` sites.
fn arb_basis(sites: u32) -> impl Strategy<Value = Vec<u64>> {
    let all: Vec<u64> = (0u64..(1u64 << sites)).collect();
    let n = all.len();
    prop::sample::subsequence(all, 1..=n.min(12)).prop_shuffle()
}

fn arb_model() -> impl Strategy<Value = (SquareLattice, Vec<u64>, Vec<u64>, f64, f64)> {
    arb_lattice().prop_flat_map(|lattice| {
        let sites = lattice.sites();
        (
            Just(lattice),
            arb_basis(sites),
            arb_basis(sites),
            -2.0_f64..2.0,
            0.0_f64..8.0,
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sparse_matches_dense(
        (lattice, up, down, j, u) in arb_model(),
        seed in any::<u64>(),
        alpha in -1.0_f64..1.0,
    ) {
        let bases = SpinBases::new(up, down);
        let dense = dense_hamiltonian(&bases, &lattice, j, u);
        let ham = SparseHubbard::new(bases, &lattice, HubbardParams::new(j, u)).unwrap();

        let dim = ham.dim();
        let x: Vec<f64> = (0..dim)
            .map(|i| ((i as u64).wrapping_mul(seed | 1) % 1000) as f64 / 500.0 - 1.0)
            .collect();
        let y0: Vec<f64> = x.iter().rev().copied().collect();

        let mut y = y0.clone();
        ham.apply(&x, &mut y, alpha);

        let hx = dense_matvec(&dense, &x);
        let expected: Vec<f64> = y0.iter().zip(&hx).map(|(a, b)| alpha * a + b).collect();
        prop_assert!(max_diff(&y, &expected) < 1e-10);
    }

    #[test]
    fn backends_agree(
        (lattice, up, down, j, u) in arb_model(),
    ) {
        let bases = SpinBases::new(up, down);
        let nd = SparseHubbard::new(bases.clone(), &lattice, HubbardParams::new(j, u)).unwrap();
        let lp = SparseHubbard::new(bases, &lattice, HubbardParams::new(j, u))
            .unwrap()
            .with_accumulator(Box::new(LoopAccumulate));

        let x: Vec<f64> = (0..nd.dim()).map(|i| (i as f64).sin()).collect();
        prop_assert!(max_diff(&nd.matvec(&x), &lp.matvec(&x)) < 1e-12);
    }

    #[test]
    fn built_operators_are_valid(
        (lattice, up, _down, j, _u) in arb_model(),
    ) {
        let basis = hubsparse_core::Basis::up(up);
        let op = CsrOperator::build(&basis, &lattice, j).unwrap();
        prop_assert!(op.validate().is_ok());
        prop_assert_eq!(op.dim(), basis.len());
        if j != 0.0 {
            prop_assert!(op.data().iter().all(|&v| v != 0.0));
        }
    }
}
