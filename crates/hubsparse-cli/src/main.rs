//! hubsparse Command-Line Interface
//!
//! Builds the sparse Hubbard Hamiltonian described by a YAML model file and
//! inspects it: operator dumps, single columns of `H`, the interaction
//! diagonal.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{apply, diagonal, dump, version};

/// hubsparse - tensor-product sparse Hubbard Hamiltonian kernel
#[derive(Parser)]
#[command(name = "hubsparse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Worker threads (overrides the model file and HUBSPARSE_THREADS)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print both hopping operators
    Dump {
        /// Model file (YAML)
        #[arg(short, long)]
        config: String,

        /// Output layout
        #[arg(short, long, value_enum, default_value_t = DumpFormat::Dense)]
        format: DumpFormat,
    },

    /// Print alpha * e_i + H * e_i, i.e. column i of H when alpha is 0
    Apply {
        /// Model file (YAML)
        #[arg(short, long)]
        config: String,

        /// Basis index i of the unit vector
        #[arg(short, long)]
        index: usize,

        /// Scale applied to the existing output vector
        #[arg(short, long, default_value = "0.0", allow_negative_numbers = true)]
        alpha: f64,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the on-site interaction diagonal
    Diagonal {
        /// Model file (YAML)
        #[arg(short, long)]
        config: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

/// Operator dump layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    /// Every row with explicit zeros
    Dense,
    /// The data, column and row-pointer arrays
    Raw,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Dump { config, format } => dump::execute(&config, format, cli.threads),

        Commands::Apply {
            config,
            index,
            alpha,
            json,
        } => apply::execute(&config, index, alpha, json, cli.threads),

        Commands::Diagonal { config, json } => diagonal::execute(&config, json, cli.threads),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dump_defaults() {
        let cli = Cli::try_parse_from(["hubsparse", "dump", "--config", "model.yaml"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.threads, None);
        match cli.command {
            Commands::Dump { config, format } => {
                assert_eq!(config, "model.yaml");
                assert_eq!(format, DumpFormat::Dense);
            }
            _ => panic!("expected dump"),
        }
    }

    #[test]
    fn test_parse_dump_raw() {
        let cli =
            Cli::try_parse_from(["hubsparse", "dump", "-c", "m.yaml", "--format", "raw"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Dump {
                format: DumpFormat::Raw,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_apply() {
        let cli = Cli::try_parse_from([
            "hubsparse", "-vv", "apply", "-c", "m.yaml", "--index", "3", "--alpha", "-0.5",
            "--json", "--threads", "2",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, Some(2));
        match cli.command {
            Commands::Apply {
                index, alpha, json, ..
            } => {
                assert_eq!(index, 3);
                assert_eq!(alpha, -0.5);
                assert!(json);
            }
            _ => panic!("expected apply"),
        }
    }

    #[test]
    fn test_apply_requires_index() {
        assert!(Cli::try_parse_from(["hubsparse", "apply", "-c", "m.yaml"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(
            Cli::try_parse_from(["hubsparse", "dump", "-c", "m.yaml", "--format", "csv"]).is_err()
        );
    }

    #[test]
    fn test_parse_version() {
        let cli = Cli::try_parse_from(["hubsparse", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }
}
