//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum phase estimation engine",
        style("QPE").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qpe-ir           Circuit intermediate representation");
    println!("  qpe-hal          Backend abstraction layer");
    println!("  qpe-adapter-sim  Seedable statevector simulator");
    println!("  qpe-core         Phase estimation engine");
    println!("  qpe-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
