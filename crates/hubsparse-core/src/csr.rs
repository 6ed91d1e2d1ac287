//! Compressed sparse row hopping operator for one species.
//!
//! Construction scans every ordered pair of basis states and keeps the
//! non-zero hopping amplitudes scaled by the coupling `J`. It runs in two
//! parallel passes: the first counts the non-zeros of every row, the prefix
//! sum of those counts gives `row_ptr`, and the second fills disjoint
//! per-row slices of the pre-sized `col_idx` / `data` arrays.

use rayon::prelude::*;
use tracing::debug;

use crate::basis::Basis;
use crate::error::{HubbardError, HubbardResult};
use crate::hopping::Hopping;

/// Sparse single-species operator in CSR form.
///
/// Row `r` stores its entries in `data[row_ptr[r]..row_ptr[r + 1]]` with
/// columns in `col_idx` over the same range, ascending within the row.
/// The last element of `row_ptr` is the number of non-zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrOperator {
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    data: Vec<f64>,
}

impl CsrOperator {
    /// Build the hopping operator of `basis`, scaling amplitudes by `coupling`.
    ///
    /// Fails with [`HubbardError::UninitializedBasis`] on an empty basis.
    pub fn build<H>(basis: &Basis, hopping: &H, coupling: f64) -> HubbardResult<Self>
    where
        H: Hopping + ?Sized,
    {
        basis.ensure_initialized()?;
        let states = basis.states();
        let n = states.len();

        let counts: Vec<usize> = states
            .par_iter()
            .map(|&from| {
                states
                    .iter()
                    .filter(|&&to| hopping.amplitude(from, to) != 0)
                    .count()
            })
            .collect();

        let mut row_ptr = Vec::with_capacity(n + 1);
        row_ptr.push(0);
        let mut nnz = 0;
        for &count in &counts {
            nnz += count;
            row_ptr.push(nnz);
        }

        let mut col_idx = vec![0usize; nnz];
        let mut data = vec![0.0f64; nnz];

        let mut rows: Vec<(&mut [usize], &mut [f64])> = Vec::with_capacity(n);
        let mut col_rest = col_idx.as_mut_slice();
        let mut data_rest = data.as_mut_slice();
        for &count in &counts {
            let (cols, col_tail) = std::mem::take(&mut col_rest).split_at_mut(count);
            let (vals, data_tail) = std::mem::take(&mut data_rest).split_at_mut(count);
            rows.push((cols, vals));
            col_rest = col_tail;
            data_rest = data_tail;
        }

        rows.into_par_iter()
            .zip(states.par_iter())
            .for_each(|((cols, vals), &from)| {
                let mut slot = 0;
                for (b, &to) in states.iter().enumerate() {
                    let amp = hopping.amplitude(from, to);
                    if amp != 0 {
                        cols[slot] = b;
                        vals[slot] = coupling * f64::from(amp);
                        slot += 1;
                    }
                }
                debug_assert_eq!(slot, cols.len(), "hopping must be deterministic");
            });

        debug!(
            species = %basis.species(),
            n,
            nnz,
            coupling,
            "built CSR hopping operator"
        );

        Ok(Self {
            row_ptr,
            col_idx,
            data,
        })
    }

    /// Assemble an operator from raw arrays without checking them.
    ///
    /// Call [`validate`](Self::validate) before using data from outside.
    pub fn from_raw_parts(row_ptr: Vec<usize>, col_idx: Vec<usize>, data: Vec<f64>) -> Self {
        Self {
            row_ptr,
            col_idx,
            data,
        }
    }

    /// Number of rows (= columns).
    pub fn dim(&self) -> usize {
        self.row_ptr.len().saturating_sub(1)
    }

    /// Number of stored non-zeros.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Row offsets, length `dim() + 1`.
    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    /// Column index of each non-zero.
    pub fn col_idx(&self) -> &[usize] {
        &self.col_idx
    }

    /// Value of each non-zero.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// `(column, value)` pairs of row `r`.
    #[inline]
    pub fn row(&self, r: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.row_ptr[r]..self.row_ptr[r + 1];
        self.col_idx[range.clone()]
            .iter()
            .copied()
            .zip(self.data[range].iter().copied())
    }

    /// Stored value at `(r, c)`, if any.
    pub fn get(&self, r: usize, c: usize) -> Option<f64> {
        self.row(r).find(|&(col, _)| col == c).map(|(_, v)| v)
    }

    /// Species-local product `A * x`.
    pub fn matvec(&self, x: &[f64]) -> Vec<f64> {
        (0..self.dim())
            .map(|r| self.row(r).map(|(c, v)| v * x[c]).sum::<f64>())
            .collect()
    }

    /// Dense row-major reconstruction, zero where nothing is stored.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let n = self.dim();
        (0..n)
            .map(|r| {
                let mut dense = vec![0.0; n];
                for (c, v) in self.row(r) {
                    dense[c] = v;
                }
                dense
            })
            .collect()
    }

    /// Check the compressed-row invariants.
    ///
    /// `row_ptr` must start at 0, be non-decreasing and end at the number
    /// of non-zeros; `col_idx` and `data` must have equal length, and every
    /// column must lie in `[0, dim)`.
    pub fn validate(&self) -> HubbardResult<()> {
        let Some(&first) = self.row_ptr.first() else {
            return Err(HubbardError::MalformedOperator(
                "row_ptr is empty".to_string(),
            ));
        };
        if first != 0 {
            return Err(HubbardError::MalformedOperator(format!(
                "row_ptr[0] = {first}, expected 0"
            )));
        }
        if let Some(r) = self.row_ptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(HubbardError::MalformedOperator(format!(
                "row_ptr decreases at row {r}"
            )));
        }
        if self.col_idx.len() != self.data.len() {
            return Err(HubbardError::MalformedOperator(format!(
                "col_idx has {} entries but data has {}",
                self.col_idx.len(),
                self.data.len()
            )));
        }
        let last = self.row_ptr[self.row_ptr.len() - 1];
        if last != self.data.len() {
            return Err(HubbardError::MalformedOperator(format!(
                "row_ptr ends at {last} but there are {} non-zeros",
                self.data.len()
            )));
        }
        let n = self.dim();
        if let Some(&c) = self.col_idx.iter().find(|&&c| c >= n) {
            return Err(HubbardError::MalformedOperator(format!(
                "column {c} out of range for dimension {n}"
            )));
        }
        Ok(())
    }
}
