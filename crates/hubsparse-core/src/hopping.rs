//! Hopping amplitudes between basis states of one species.
//!
//! The operator builder only needs a pure function `(from, to) -> i32`
//! returning the signed amplitude connecting two states, or `0` when no
//! single hop connects them. Any `Fn(u64, u64) -> i32 + Sync` closure
//! qualifies; [`SquareLattice`] provides nearest-neighbour fermionic hopping
//! on a 2D grid.

use serde::{Deserialize, Serialize};

use crate::basis::popcount;

/// Signed hopping amplitude between two basis states.
///
/// Implementations must be pure and callable from several threads at once.
pub trait Hopping: Sync {
    /// Amplitude of the transition `from -> to`; `0` if not connected.
    fn amplitude(&self, from: u64, to: u64) -> i32;
}

impl<F> Hopping for F
where
    F: Fn(u64, u64) -> i32 + Sync,
{
    fn amplitude(&self, from: u64, to: u64) -> i32 {
        self(from, to)
    }
}

/// A `length x depth` square lattice with nearest-neighbour hopping.
///
/// Site `s = x + y * length` maps to bit `s` of a basis state. The returned
/// amplitude is `-(-1)^n`, with `n` the number of occupied sites strictly
/// between the two sites in bit order, so the hopping operator reads
/// `-J Σ c†_i c_j` for a positive coupling `J`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareLattice {
    /// Number of sites along x.
    pub length: u32,
    /// Number of sites along y.
    pub depth: u32,
    /// Wrap around the edges.
    #[serde(default = "default_periodic")]
    pub periodic: bool,
}

fn default_periodic() -> bool {
    true
}

impl SquareLattice {
    /// Periodic `length x depth` lattice.
    pub fn new(length: u32, depth: u32) -> Self {
        Self {
            length,
            depth,
            periodic: true,
        }
    }

    /// Lattice with open boundaries.
    #[must_use]
    pub fn open(mut self) -> Self {
        self.periodic = false;
        self
    }

    /// Total number of sites.
    pub fn sites(&self) -> u32 {
        self.length * self.depth
    }

    fn coords(&self, site: u32) -> (u32, u32) {
        (site % self.length, site / self.length)
    }

    /// True if `a` and `b` are distinct nearest neighbours.
    pub fn are_neighbours(&self, a: u32, b: u32) -> bool {
        if a == b || a >= self.sites() || b >= self.sites() {
            return false;
        }
        let (xa, ya) = self.coords(a);
        let (xb, yb) = self.coords(b);
        if ya == yb {
            adjacent(xa, xb, self.length, self.periodic)
        } else if xa == xb {
            adjacent(ya, yb, self.depth, self.periodic)
        } else {
            false
        }
    }

    /// Nearest neighbours of `site`, ascending and without duplicates.
    pub fn neighbours(&self, site: u32) -> Vec<u32> {
        (0..self.sites())
            .filter(|&other| self.are_neighbours(site, other))
            .collect()
    }
}

/// Adjacency along one axis of extent `extent`.
fn adjacent(p: u32, q: u32, extent: u32, periodic: bool) -> bool {
    let d = p.abs_diff(q);
    d == 1 || (periodic && extent > 2 && d == extent - 1)
}

impl Hopping for SquareLattice {
    fn amplitude(&self, from: u64, to: u64) -> i32 {
        let diff = from ^ to;
        if popcount(diff) != 2 || popcount(from) != popcount(to) {
            return 0;
        }

        let vacated = (from & diff).trailing_zeros();
        let filled = (to & diff).trailing_zeros();
        if !self.are_neighbours(vacated, filled) {
            return 0;
        }

        let lo = vacated.min(filled);
        let hi = vacated.max(filled);
        let between = if hi - lo > 1 {
            ((1u64 << hi) - 1) & !((1u64 << (lo + 1)) - 1)
        } else {
            0
        };

        if popcount(from & between) % 2 == 0 {
            -1
        } else {
            1
        }
    }
}
