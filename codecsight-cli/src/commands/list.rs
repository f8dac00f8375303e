use anyhow::{Context, Result};
use codecsight_core::{default_registry, Registry};
use colored::*;

/// One line per registry entry: identifiers, then label
pub fn format_entries(registry: &Registry) -> Vec<String> {
    registry
        .entries()
        .iter()
        .map(|entry| {
            let tags = entry.tags().join(", ");
            format!("{:<24} {}", tags, entry.label())
        })
        .collect()
}

pub fn execute() -> Result<()> {
    let registry = default_registry().context("Failed to build decoder tables")?;

    println!("\n=== Registered Decoders ===");
    for line in format_entries(&registry) {
        println!("{}", line);
    }
    println!();
    println!("{} {} entries", "✓".green(), registry.len());

    Ok(())
}
