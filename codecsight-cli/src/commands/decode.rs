use anyhow::{Context, Result};
use codecsight_core::{Engine, Report};
use colored::*;
use std::fs;
use std::io::{self, Read};
use tracing::{debug, info};

use crate::OutputFormat;

/// Read the codec list: arguments joined with `,`, or stdin for `-`
pub fn read_input(codecs: &[String]) -> Result<String> {
    if let [only] = codecs {
        if only == "-" {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read codec list from stdin")?;
            return Ok(buf.lines().collect::<Vec<_>>().join(","));
        }
    }
    Ok(codecs.join(","))
}

/// Format a report without terminal colours
pub fn format_report(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.render()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report")
        }
    }
}

fn colorize(text: &str) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with("error") {
                line.red().to_string()
            } else if trimmed.starts_with("warning") {
                line.yellow().to_string()
            } else {
                line.to_string()
            }
        })
        .map(|line| line + "\n")
        .collect()
}

pub fn execute(codecs: &[String], format: OutputFormat, output: Option<&str>) -> Result<()> {
    let input = read_input(codecs)?;
    info!("Decoding: {}", input);

    let engine = Engine::with_defaults().context("Failed to build decoder tables")?;
    let report = engine.dispatch(&input);
    debug!("{} component(s) decoded", report.len());

    let text = format_report(&report, format)?;

    if let Some(output_path) = output {
        fs::write(output_path, &text)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;
        info!("Report written to: {}", output_path);
    } else if format == OutputFormat::Text {
        print!("{}", colorize(&text));
    } else {
        println!("{}", text);
    }

    if report.has_errors() {
        eprintln!("{} Codec list contains errors", "✗".red());
    } else {
        eprintln!("{} All codec strings decoded", "✓".green());
    }

    Ok(())
}
