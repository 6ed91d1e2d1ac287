//! Diagonal command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use super::common::{format_vector, load_model};

/// Execute the diagonal command.
pub fn execute(config: &str, json: bool, threads: Option<usize>) -> Result<()> {
    let (config, ham) = load_model(config, threads)?;
    let diag = ham.diagonal();

    if json {
        let doc = json!({
            "num_up": ham.num_up(),
            "num_down": ham.num_down(),
            "interaction_u": config.interaction_u,
            "diagonal": diag,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!(
        "{} Interaction diagonal ({} x {}, U = {})",
        style("→").cyan().bold(),
        ham.num_up(),
        ham.num_down(),
        config.interaction_u
    );
    print!("{}", format_vector(&diag));
    Ok(())
}
