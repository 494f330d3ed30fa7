//! Circuit command implementation.
//!
//! Builds the phase estimation circuit for a request without running it.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use super::common::{RequestArgs, create_engine};

/// Execute the circuit command.
pub fn execute(config: Option<&Path>, request: &RequestArgs, output: Option<&Path>) -> Result<()> {
    let engine = create_engine(config)?;
    let params = engine.validate(&request.to_raw()?)?;
    let circuit = engine.build(&params)?;

    let json = serde_json::to_string_pretty(&circuit)
        .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} ({} qubits, depth {}) to {}",
                style("✓").green().bold(),
                style(circuit.name()).cyan(),
                circuit.num_qubits(),
                circuit.depth(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
