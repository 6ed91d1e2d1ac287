//! Scaled vector accumulation over contiguous blocks (`y += alpha * x`).
//!
//! The up-hopping part of the matrix-vector product is a sequence of block
//! axpys. The operation sits behind [`ScaledAccumulate`] so the kernel can
//! run on a plain loop or on `ndarray`.

use std::fmt;
use std::str::FromStr;

use ndarray::{ArrayView1, ArrayViewMut1};
use serde::{Deserialize, Serialize};

use crate::error::HubbardError;

/// Backend for `y += alpha * x` on equal-length slices.
pub trait ScaledAccumulate: Send + Sync {
    /// Accumulate `alpha * x` into `y`.
    fn scaled_add(&self, alpha: f64, x: &[f64], y: &mut [f64]);

    /// Backend name used in logs.
    fn name(&self) -> &'static str;
}

/// Plain zipped loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopAccumulate;

impl ScaledAccumulate for LoopAccumulate {
    fn scaled_add(&self, alpha: f64, x: &[f64], y: &mut [f64]) {
        debug_assert_eq!(x.len(), y.len());
        for (yi, &xi) in y.iter_mut().zip(x) {
            *yi += alpha * xi;
        }
    }

    fn name(&self) -> &'static str {
        "loop"
    }
}

/// `ndarray` views with [`ndarray::ArrayBase::scaled_add`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NdarrayAccumulate;

impl ScaledAccumulate for NdarrayAccumulate {
    fn scaled_add(&self, alpha: f64, x: &[f64], y: &mut [f64]) {
        let x = ArrayView1::from(x);
        let mut y = ArrayViewMut1::from(y);
        y.scaled_add(alpha, &x);
    }

    fn name(&self) -> &'static str {
        "ndarray"
    }
}

/// Selectable accumulate backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccumulatorKind {
    /// [`LoopAccumulate`].
    Loop,
    /// [`NdarrayAccumulate`].
    #[default]
    Ndarray,
}

impl AccumulatorKind {
    /// Instantiate the backend.
    pub fn build(self) -> Box<dyn ScaledAccumulate> {
        match self {
            AccumulatorKind::Loop => Box::new(LoopAccumulate),
            AccumulatorKind::Ndarray => Box::new(NdarrayAccumulate),
        }
    }
}

impl fmt::Display for AccumulatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccumulatorKind::Loop => write!(f, "loop"),
            AccumulatorKind::Ndarray => write!(f, "ndarray"),
        }
    }
}

impl FromStr for AccumulatorKind {
    type Err = HubbardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "loop" => Ok(AccumulatorKind::Loop),
            "ndarray" => Ok(AccumulatorKind::Ndarray),
            other => Err(HubbardError::UnknownAccumulator(other.to_string())),
        }
    }
}
