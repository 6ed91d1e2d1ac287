//! Apply command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use super::common::{format_vector, load_model};

/// Execute the apply command: `y = e_i`, then `y := alpha * y + H * e_i`.
pub fn execute(
    config: &str,
    index: usize,
    alpha: f64,
    json: bool,
    threads: Option<usize>,
) -> Result<()> {
    let (_, ham) = load_model(config, threads)?;
    let dim = ham.dim();
    if index >= dim {
        anyhow::bail!("Index {index} out of range for dimension {dim}");
    }

    let mut x = vec![0.0; dim];
    x[index] = 1.0;
    let mut y = x.clone();
    ham.apply(&x, &mut y, alpha);

    if json {
        let doc = json!({
            "dim": dim,
            "index": index,
            "alpha": alpha,
            "y": y,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!(
        "{} H e_{} (dim {}, alpha {})",
        style("→").cyan().bold(),
        style(index).yellow(),
        dim,
        alpha
    );
    print!("{}", format_vector(&y));
    Ok(())
}
