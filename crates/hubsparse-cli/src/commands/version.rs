//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - sparse Hubbard Hamiltonian kernel",
        style("hubsparse").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  hubsparse-core  CSR hopping operators and tensor-product matvec");
    println!("  hubsparse-cli   Command-line interface");
    println!();
    println!("License:    {}", style("GPL-3.0-or-later").dim());
}
