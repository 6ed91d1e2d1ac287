//! Single-species basis lists.
//!
//! A basis state is a `u64` occupation bitmask over the lattice sites: bit
//! `s` is set when site `s` holds a particle. The order of a [`Basis`] is
//! fixed by whoever generated it and is used unchanged as the row/column
//! index of the species operator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HubbardError, HubbardResult};

/// Number of occupied sites in a bitmask.
#[inline]
pub fn popcount(state: u64) -> u32 {
    state.count_ones()
}

/// Spin species of a basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Spin-up particles.
    Up,
    /// Spin-down particles.
    Down,
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Up => write!(f, "Up"),
            Species::Down => write!(f, "Down"),
        }
    }
}

/// Ordered list of basis states for one species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basis {
    species: Species,
    states: Vec<u64>,
}

impl Basis {
    /// Wrap an externally generated list of states.
    pub fn new(species: Species, states: Vec<u64>) -> Self {
        Self { species, states }
    }

    /// Shorthand for an up-species basis.
    pub fn up(states: Vec<u64>) -> Self {
        Self::new(Species::Up, states)
    }

    /// Shorthand for a down-species basis.
    pub fn down(states: Vec<u64>) -> Self {
        Self::new(Species::Down, states)
    }

    /// The species this basis belongs to.
    pub fn species(&self) -> Species {
        self.species
    }

    /// The states, in index order.
    pub fn states(&self) -> &[u64] {
        &self.states
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True if no states have been supplied.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Fail with [`HubbardError::UninitializedBasis`] if the list is empty.
    pub fn ensure_initialized(&self) -> HubbardResult<()> {
        if self.is_empty() {
            return Err(HubbardError::UninitializedBasis {
                species: self.species,
            });
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for Basis {
    type Output = u64;

    fn index(&self, index: usize) -> &u64 {
        &self.states[index]
    }
}

/// The up and down bases spanning the full many-body space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinBases {
    /// Up-species basis.
    pub up: Basis,
    /// Down-species basis.
    pub down: Basis,
}

impl SpinBases {
    /// Pair two state lists into up and down bases.
    pub fn new(up: Vec<u64>, down: Vec<u64>) -> Self {
        Self {
            up: Basis::up(up),
            down: Basis::down(down),
        }
    }

    /// Check both bases, up first.
    pub fn ensure_initialized(&self) -> HubbardResult<()> {
        self.up.ensure_initialized()?;
        self.down.ensure_initialized()
    }

    /// Full many-body dimension `NumUp * NumDown`.
    pub fn dim(&self) -> usize {
        self.up.len() * self.down.len()
    }

    /// Basis of the requested species.
    pub fn get(&self, species: Species) -> &Basis {
        match species {
            Species::Up => &self.up,
            Species::Down => &self.down,
        }
    }
}
