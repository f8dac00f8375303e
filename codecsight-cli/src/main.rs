use anyhow::Result;
use clap::{Parser, Subcommand};
use codecsight_cli::{commands, OutputFormat};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "codecsight")]
#[command(about = "Codecsight - Inspect media codec parameter strings", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one or more codec strings
    Decode {
        /// Codec strings, e.g. avc1.64002A; `-` reads a list from stdin
        #[arg(required = true)]
        codecs: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List registered codec identifiers
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Decode {
            codecs,
            format,
            output,
        } => commands::decode::execute(&codecs, format, output.as_deref()),

        Commands::List => commands::list::execute(),
    }
}
