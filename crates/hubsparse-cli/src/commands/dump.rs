//! Dump command implementation.

use std::io::{self, Write};

use anyhow::Result;

use hubsparse_core::dump::{write_dense, write_raw};

use super::common::load_model;
use crate::DumpFormat;

/// Execute the dump command.
pub fn execute(config: &str, format: DumpFormat, threads: Option<usize>) -> Result<()> {
    let (_, ham) = load_model(config, threads)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        DumpFormat::Dense => write_dense(&mut out, &ham)?,
        DumpFormat::Raw => write_raw(&mut out, &ham)?,
    }
    out.flush()?;
    Ok(())
}
