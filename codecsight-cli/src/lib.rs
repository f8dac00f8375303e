//! Library entry for codecsight-cli used by integration tests and embedding.

pub mod commands;

pub use commands::*;

/// Output format for `decode`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Rendered text, one block per codec
    #[default]
    Text,
    /// The serialized report
    Json,
}
