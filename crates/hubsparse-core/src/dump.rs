//! Text dumps of the two hopping operators.
//!
//! Two layouts, both listing the up operator before the down operator:
//!
//! - dense: one line per row, every column followed by a tab, `0` where
//!   nothing is stored;
//! - raw: the `data`, `col_idx` and `row_ptr` arrays, space separated.

use std::fmt;
use std::io;

use crate::basis::Species;
use crate::csr::CsrOperator;
use crate::hamiltonian::SparseHubbard;

const SPECIES: [Species; 2] = [Species::Up, Species::Down];

fn fmt_dense(f: &mut fmt::Formatter<'_>, rows: Vec<Vec<f64>>) -> fmt::Result {
    for row in rows {
        for v in row {
            write!(f, "{v}\t")?;
        }
        writeln!(f)?;
    }
    Ok(())
}

fn fmt_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    for v in values {
        write!(f, "{v} ")?;
    }
    writeln!(f)
}

fn fmt_raw(f: &mut fmt::Formatter<'_>, op: &CsrOperator) -> fmt::Result {
    writeln!(f, "Data({}):", op.nnz())?;
    fmt_list(f, op.data())?;
    writeln!(f, "Col indices:")?;
    fmt_list(f, op.col_idx())?;
    writeln!(f, "Row indices:")?;
    fmt_list(f, op.row_ptr())
}

/// Dense reconstruction of both hopping operators.
pub struct DenseDump<'a>(pub &'a SparseHubbard);

impl fmt::Display for DenseDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for species in SPECIES {
            writeln!(f, "{species}:")?;
            fmt_dense(f, self.0.dense_species(species))?;
        }
        Ok(())
    }
}

/// Raw CSR arrays of both hopping operators.
pub struct RawDump<'a>(pub &'a SparseHubbard);

impl fmt::Display for RawDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for species in SPECIES {
            writeln!(f, "{species}:")?;
            fmt_raw(f, self.0.operator(species))?;
        }
        Ok(())
    }
}

/// Write the dense layout to `out`.
pub fn write_dense<W: io::Write>(out: &mut W, ham: &SparseHubbard) -> io::Result<()> {
    write!(out, "{}", DenseDump(ham))
}

/// Write the raw layout to `out`.
pub fn write_raw<W: io::Write>(out: &mut W, ham: &SparseHubbard) -> io::Result<()> {
    write!(out, "{}", RawDump(ham))
}
