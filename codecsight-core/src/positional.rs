//! Positional fields with defaults (`vp09.00.10.08`, `av01.0.04M.10.0.110`)
//!
//! Token `i` fills field `i` of a [`FieldTable`]. A missing or empty token
//! leaves the field at its default; a field without a default is required.

use crate::keyvalue::{Pattern, PresentFn};
use crate::types::Diagnostic;

/// Declaration of one positional field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Display label
    pub label: &'static str,

    /// Value used when the token is absent; `None` makes the field required
    pub default: Option<u32>,

    /// Accepted token shape
    pub pattern: Pattern,

    /// Renders the value
    pub present: PresentFn,
}

/// Current value of one field after parsing
#[derive(Debug, Clone, Copy)]
pub struct FieldValue {
    /// The field's declaration
    pub spec: &'static FieldSpec,

    /// Parsed or default value; `None` if missing or malformed
    pub value: Option<u32>,

    /// True when the value came from the input
    pub explicit: bool,
}

impl FieldValue {
    /// Field entry (and its note, if any); nothing for a missing value
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        if self.value.is_none() {
            return Vec::new();
        }
        let shown = (self.spec.present)(self.value);
        let text = format!("{}={}", self.spec.label, shown.text);
        let field = if self.explicit {
            Diagnostic::Normal(text)
        } else {
            Diagnostic::DefaultUsed(text)
        };
        let mut out = vec![field];
        out.extend(shown.note);
        out
    }
}

/// Outcome of parsing tokens against a [`FieldTable`]
#[derive(Debug, Clone)]
pub struct ParsedFields {
    /// One entry per declared field, in declaration order
    pub values: Vec<FieldValue>,

    /// Token errors, in input order
    pub errors: Vec<Diagnostic>,
}

impl ParsedFields {
    /// Value of the field at `index`, default included
    pub fn value(&self, index: usize) -> Option<u32> {
        self.values.get(index).and_then(|v| v.value)
    }

    /// True when every field has a value
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|v| v.value.is_some())
    }

    /// Token errors followed by every field in declaration order
    pub fn report(&self) -> Vec<Diagnostic> {
        let mut out = self.errors.clone();
        for value in &self.values {
            out.extend(value.diagnostics());
        }
        out
    }
}

/// Fixed, ordered table of positional fields
#[derive(Debug, Clone, Copy)]
pub struct FieldTable {
    specs: &'static [FieldSpec],
}

impl FieldTable {
    /// Wrap a static table
    pub const fn new(specs: &'static [FieldSpec]) -> Self {
        Self { specs }
    }

    /// Declared fields
    pub fn specs(&self) -> &'static [FieldSpec] {
        self.specs
    }

    /// Apply `tokens` to the table, first token to first field
    pub fn parse(&self, tokens: &[&str]) -> ParsedFields {
        let mut errors = Vec::new();
        if tokens.len() > self.specs.len() {
            errors.push(Diagnostic::error(format!(
                "too many fields ({}), at most {} expected",
                tokens.len(),
                self.specs.len()
            )));
        }

        let values = self
            .specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let token = tokens.get(i).copied().filter(|t| !t.is_empty());
                match token {
                    Some(token) => {
                        let value = spec.pattern.parse(token);
                        if value.is_none() {
                            errors.push(Diagnostic::error(format!(
                                "invalid value for {} ({token}), expected {}",
                                spec.label,
                                spec.pattern.describe()
                            )));
                        }
                        FieldValue {
                            spec,
                            value,
                            explicit: true,
                        }
                    }
                    None => {
                        if spec.default.is_none() {
                            errors.push(Diagnostic::error(format!(
                                "{} must be specified",
                                spec.label
                            )));
                        }
                        FieldValue {
                            spec,
                            value: spec.default,
                            explicit: false,
                        }
                    }
                }
            })
            .collect();

        ParsedFields { values, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyvalue::Presentation;

    fn plain(value: Option<u32>) -> Presentation {
        Presentation::plain(format!("{}", value.unwrap_or(0)))
    }

    const TABLE: FieldTable = FieldTable::new(&[
        FieldSpec {
            label: "First",
            default: None,
            pattern: Pattern::digits(2),
            present: plain,
        },
        FieldSpec {
            label: "Second",
            default: Some(7),
            pattern: Pattern::DIGITS,
            present: plain,
        },
    ]);

    #[test]
    fn test_defaults_fill_missing_and_empty_tokens() {
        let expected = vec![
            Diagnostic::normal("First=12"),
            Diagnostic::default_used("Second=7"),
        ];
        assert_eq!(TABLE.parse(&["12"]).report(), expected);
        assert_eq!(TABLE.parse(&["12", ""]).report(), expected);
        assert!(TABLE.parse(&["12"]).is_complete());
    }

    #[test]
    fn test_required_field() {
        let parsed = TABLE.parse(&[]);
        assert!(!parsed.is_complete());
        assert_eq!(
            parsed.report(),
            vec![
                Diagnostic::error("First must be specified"),
                Diagnostic::default_used("Second=7"),
            ]
        );
    }

    #[test]
    fn test_bad_and_extra_tokens() {
        let parsed = TABLE.parse(&["1x", "3", "9"]);
        assert_eq!(parsed.value(0), None);
        assert_eq!(parsed.value(1), Some(3));
        assert_eq!(
            parsed.report(),
            vec![
                Diagnostic::error("too many fields (3), at most 2 expected"),
                Diagnostic::error("invalid value for First (1x), expected 2 decimal digits"),
                Diagnostic::normal("Second=3"),
            ]
        );
    }
}
