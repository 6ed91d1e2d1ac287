//! On-site interaction diagonal.
//!
//! Element `a * NumDown + b` is `U` times the number of sites occupied by
//! both the up state `a` and the down state `b`.

use rayon::prelude::*;

use crate::basis::{Basis, popcount};

/// Interaction energy of one up/down state pair.
#[inline]
pub fn interaction_energy(up_state: u64, down_state: u64, u: f64) -> f64 {
    u * f64::from(popcount(up_state & down_state))
}

/// Build the full interaction diagonal of length `NumUp * NumDown`.
pub fn build_diagonal(base_up: &Basis, base_down: &Basis, u: f64) -> Vec<f64> {
    let num_down = base_down.len();
    let mut diag = vec![0.0; base_up.len() * num_down];
    if num_down == 0 {
        return diag;
    }

    diag.par_chunks_mut(num_down)
        .zip(base_up.states().par_iter())
        .for_each(|(block, &up_state)| {
            for (d, &down_state) in block.iter_mut().zip(base_down.states()) {
                *d = interaction_energy(up_state, down_state, u);
            }
        });

    diag
}
