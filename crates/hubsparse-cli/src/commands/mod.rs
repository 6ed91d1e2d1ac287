//! CLI command implementations.

pub mod apply;
pub mod common;
pub mod diagonal;
pub mod dump;
pub mod version;
