//! Unitaries command implementation.

use console::style;

use qpe_core::UnitaryCatalog;

/// Execute the unitaries command.
pub fn execute() {
    let catalog = UnitaryCatalog::builtin();

    println!("{}", style("Unitary families:").bold());
    for entry in catalog.entries() {
        let aliases = catalog.aliases_of(entry.name());
        let aliases = if aliases.is_empty() {
            String::new()
        } else {
            format!(" (alias: {})", aliases.join(", "))
        };
        println!(
            "  {} {}{}",
            style(format!("{:<10}", entry.name())).cyan(),
            entry.description(),
            style(aliases).dim()
        );
    }
}
