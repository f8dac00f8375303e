//! Plain-text renderers for decoder output
//!
//! Every registry entry may carry its own renderer; [`simple`] is used when
//! it does not.

use crate::types::Diagnostic;

/// Renders a label and its diagnostics
pub type RenderFn = fn(Option<&str>, &[Diagnostic]) -> String;

/// One line per entry, prefixed by its kind where it matters
pub fn simple(label: Option<&str>, diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    if let Some(label) = label {
        out.push_str(label);
        out.push('\n');
    }
    for d in diagnostics {
        let line = match d {
            Diagnostic::Normal(t) => t.clone(),
            Diagnostic::Error(t) => format!("error: {t}"),
            Diagnostic::Warning(t) => format!("warning: {t}"),
            Diagnostic::Informative(t) => format!("  {t}"),
            Diagnostic::DefaultUsed(t) => format!("default value: {t}"),
            Diagnostic::CrossReferenceTerm(t) => format!("\nterm: {t}"),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Two columns: entry kind, then text
///
/// Suits key=value decoders where most lines are defaulted or explicit
/// fields.
pub fn tabular(label: Option<&str>, diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    if let Some(label) = label {
        out.push_str(label);
        out.push('\n');
    }
    for d in diagnostics {
        out.push_str(&format!("{:<9} {}\n", kind_column(d), d.text()));
    }
    out
}

fn kind_column(d: &Diagnostic) -> &'static str {
    match d {
        Diagnostic::Normal(_) => "",
        Diagnostic::Error(_) => "error",
        Diagnostic::Warning(_) => "warning",
        Diagnostic::Informative(_) => "info",
        Diagnostic::DefaultUsed(_) => "default",
        Diagnostic::CrossReferenceTerm(_) => "term",
    }
}
