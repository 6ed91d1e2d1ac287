//! Shared fixtures: basis enumeration and a dense reference Hamiltonian.

#![allow(dead_code)]

use hubsparse_core::{Hopping, SpinBases, popcount};

/// All states of `particles` particles on `sites` sites, ascending.
pub fn states(sites: u32, particles: u32) -> Vec<u64> {
    (0u64..(1u64 << sites))
        .filter(|&s| popcount(s) == particles)
        .collect()
}

/// Dense `Dim x Dim` Hamiltonian, row-major, index `a * NumDown + k`.
pub fn dense_hamiltonian<H: Hopping + ?Sized>(
    bases: &SpinBases,
    hopping: &H,
    coupling_j: f64,
    interaction_u: f64,
) -> Vec<Vec<f64>> {
    let up = bases.up.states();
    let down = bases.down.states();
    let nd = down.len();
    let dim = up.len() * nd;
    let mut h = vec![vec![0.0; dim]; dim];

    for (a, &ua) in up.iter().enumerate() {
        for (k, &dk) in down.iter().enumerate() {
            let row = a * nd + k;
            h[row][row] += interaction_u * f64::from(popcount(ua & dk));
            for (b, &ub) in up.iter().enumerate() {
                h[row][b * nd + k] += coupling_j * f64::from(hopping.amplitude(ua, ub));
            }
            for (l, &dl) in down.iter().enumerate() {
                h[row][a * nd + l] += coupling_j * f64::from(hopping.amplitude(dk, dl));
            }
        }
    }
    h
}

/// Dense matrix-vector product.
pub fn dense_matvec(h: &[Vec<f64>], x: &[f64]) -> Vec<f64> {
    h.iter()
        .map(|row| row.iter().zip(x).map(|(a, b)| a * b).sum::<f64>())
        .collect()
}

/// Unit vector `e_i` of length `dim`.
pub fn unit(dim: usize, i: usize) -> Vec<f64> {
    let mut e = vec![0.0; dim];
    e[i] = 1.0;
    e
}

/// Deterministic pseudo-random test vector in `[-0.5, 0.5)`.
pub fn test_vector(dim: usize, seed: u64) -> Vec<f64> {
    (0..dim)
        .map(|i| ((i as u64 + seed * 137) as f64 * 0.618_033_988_749_895).fract() - 0.5)
        .collect()
}

/// Largest absolute elementwise difference.
pub fn max_diff(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(p, q)| (p - q).abs())
        .fold(0.0f64, f64::max)
}
