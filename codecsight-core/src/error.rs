//! Error types for Codecsight table construction
//!
//! Decoding itself never fails: every problem found in a codec string is
//! reported as a [`Diagnostic`](crate::types::Diagnostic). The errors here
//! describe broken decoder tables detected when the registry is built.

/// Errors that can occur while building decoder or classification tables
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The same key is declared twice in a key=value table
    #[error("Duplicate key {key:?} in table {table}")]
    DuplicateKey {
        /// Name of the offending table.
        table: &'static str,
        /// The repeated key.
        key: &'static str,
    },

    /// Two constraint flags claim the same bit position
    #[error("Bit {bit} is claimed by both {first} and {second} in table {table}")]
    DuplicateBit {
        /// Name of the offending table.
        table: &'static str,
        /// The shared bit position.
        bit: usize,
        /// Name of the first flag declared at this bit.
        first: &'static str,
        /// Name of the second flag declared at this bit.
        second: &'static str,
    },

    /// Two profile rules share an id or a compatibility bit
    #[error("Duplicate profile {what} {value} in table {table}")]
    DuplicateProfile {
        /// Name of the offending table.
        table: &'static str,
        /// Either "id" or "bit".
        what: &'static str,
        /// The repeated value.
        value: u32,
    },

    /// A classification rule has no term or no codec
    #[error("Invalid classification rule at row {row} of {scheme}: {reason}")]
    InvalidRule {
        /// Classification scheme the rule belongs to.
        scheme: &'static str,
        /// Zero-based row index.
        row: usize,
        /// What is wrong with the rule.
        reason: &'static str,
    },
}
