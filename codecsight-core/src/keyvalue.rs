//! Order-independent `.<key><value>` token parsing
//!
//! Used by codec strings whose optional fields are tagged with a fixed-width
//! key (`evc1.vprf1.vlev51`). Tokens may come in any order and any subset;
//! the report always lists the whole key table, in declaration order, with
//! each entry flagged as default or explicit.

use crate::constants::KEY_WIDTH;
use crate::error::CodecError;
use crate::types::Diagnostic;
use crate::validate::{is_decimal, is_hex};
use crate::Result;

/// Accepted shape of a token value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Decimal digits; `width: None` accepts any non-zero length
    Decimal {
        /// Exact number of digits
        width: Option<usize>,
        /// Inclusive upper bound
        max: Option<u32>,
    },

    /// Exactly `width` hex digits
    Hex {
        /// Exact number of digits
        width: usize,
    },

    /// One of a fixed set of decimal literals
    Choice(&'static [&'static str]),
}

impl Pattern {
    /// Any number of decimal digits
    pub const DIGITS: Pattern = Pattern::Decimal {
        width: None,
        max: None,
    };

    /// Exactly `width` decimal digits
    pub const fn digits(width: usize) -> Self {
        Pattern::Decimal {
            width: Some(width),
            max: None,
        }
    }

    /// Validate and parse a value; `None` if it does not fit the pattern
    pub fn parse(&self, value: &str) -> Option<u32> {
        match *self {
            Pattern::Decimal { width, max } => {
                if !is_decimal(value) || width.is_some_and(|w| value.len() != w) {
                    return None;
                }
                let v: u32 = value.parse().ok()?;
                match max {
                    Some(m) if v > m => None,
                    _ => Some(v),
                }
            }
            Pattern::Hex { width } => {
                if value.len() != width || !is_hex(value) {
                    return None;
                }
                u32::from_str_radix(value, 16).ok()
            }
            Pattern::Choice(options) => {
                if options.iter().any(|o| *o == value) {
                    value.parse().ok()
                } else {
                    None
                }
            }
        }
    }

    /// Short human description for error messages
    pub fn describe(&self) -> String {
        match *self {
            Pattern::Decimal {
                width: None,
                max: None,
            } => "decimal digits".to_string(),
            Pattern::Decimal {
                width: Some(w),
                max: None,
            } => format!("{w} decimal digits"),
            Pattern::Decimal {
                width: Some(w),
                max: Some(m),
            } => format!("{w} decimal digits, at most {m}"),
            Pattern::Decimal {
                width: None,
                max: Some(m),
            } => format!("decimal digits, at most {m}"),
            Pattern::Hex { width } => format!("{width} hexadecimal digits"),
            Pattern::Choice(options) => format!("one of {}", options.join("|")),
        }
    }
}

/// Rendered value of one key, plus an optional follow-up entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Text following `Label (key)=`
    pub text: String,

    /// A warning or error about the value
    pub note: Option<Diagnostic>,
}

impl Presentation {
    /// Presentation without a note
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            note: None,
        }
    }

    /// Presentation followed by a note
    pub fn with_note(text: impl Into<String>, note: Diagnostic) -> Self {
        Self {
            text: text.into(),
            note: Some(note),
        }
    }
}

/// Renders a key's value; `None` means "not set"
pub type PresentFn = fn(Option<u32>) -> Presentation;

/// Declaration of one known key
#[derive(Debug, Clone, Copy)]
pub struct KeySpec {
    /// Fixed-width key, lowercase
    pub key: &'static str,

    /// Display label
    pub label: &'static str,

    /// Value used when the key is absent
    pub default: Option<u32>,

    /// Accepted value shape
    pub pattern: Pattern,

    /// Value renderer
    pub present: PresentFn,
}

/// Current value of one key after parsing
#[derive(Debug, Clone, Copy)]
pub struct KeyValue {
    /// The key's declaration
    pub spec: &'static KeySpec,

    /// Parsed or default value
    pub value: Option<u32>,

    /// True when the value came from the input
    pub explicit: bool,
}

impl KeyValue {
    /// Field entry (and its note, if any)
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let shown = (self.spec.present)(self.value);
        let text = format!("{} ({})={}", self.spec.label, self.spec.key, shown.text);
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

/// Outcome of parsing a token list against a [`KeyTable`]
#[derive(Debug, Clone)]
pub struct ParsedKeys {
    /// One entry per declared key, in declaration order
    pub values: Vec<KeyValue>,

    /// Token errors, in input order
    pub errors: Vec<Diagnostic>,
}

impl ParsedKeys {
    /// Look up a key's current value
    pub fn get(&self, key: &str) -> Option<&KeyValue> {
        self.values
            .iter()
            .find(|v| v.spec.key.eq_ignore_ascii_case(key))
    }

    /// Value of a key, default included
    pub fn value(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.value)
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

/// Fixed table of known keys
#[derive(Debug, Clone, Copy)]
pub struct KeyTable {
    name: &'static str,
    specs: &'static [KeySpec],
}

impl KeyTable {
    /// Wrap a static table
    pub const fn new(name: &'static str, specs: &'static [KeySpec]) -> Self {
        Self { name, specs }
    }

    /// Declared keys
    pub fn specs(&self) -> &'static [KeySpec] {
        self.specs
    }

    /// Reject tables with repeated keys or keys of the wrong width
    pub fn validate(&self) -> Result<()> {
        for (i, spec) in self.specs.iter().enumerate() {
            if spec.key.len() != KEY_WIDTH
                || self.specs[i + 1..]
                    .iter()
                    .any(|other| other.key.eq_ignore_ascii_case(spec.key))
            {
                return Err(CodecError::DuplicateKey {
                    table: self.name,
                    key: spec.key,
                });
            }
        }
        Ok(())
    }

    /// Apply `tokens` (the fields after the codec identifier) to the table
    pub fn parse(&self, tokens: &[&str]) -> ParsedKeys {
        let mut values: Vec<KeyValue> = self
            .specs
            .iter()
            .map(|spec| KeyValue {
                spec,
                value: spec.default,
                explicit: false,
            })
            .collect();
        let mut errors = Vec::new();

        for token in tokens {
            let (key, value) = split_key(token);
            let Some(slot) = values
                .iter_mut()
                .find(|v| v.spec.key.eq_ignore_ascii_case(key))
            else {
                errors.push(Diagnostic::error(format!(
                    "invalid key specified ({key})"
                )));
                continue;
            };

            let Some(parsed) = slot.spec.pattern.parse(value) else {
                errors.push(Diagnostic::error(format!(
                    "invalid value for key={} ({value}), expected {}",
                    slot.spec.key,
                    slot.spec.pattern.describe()
                )));
                continue;
            };

            if slot.explicit {
                errors.push(Diagnostic::error(format!(
                    "key {} can only be provided once",
                    slot.spec.key
                )));
                continue;
            }

            slot.value = Some(parsed);
            slot.explicit = true;
        }

        ParsedKeys { values, errors }
    }
}

fn split_key(token: &str) -> (&str, &str) {
    let at = token
        .char_indices()
        .nth(KEY_WIDTH)
        .map_or(token.len(), |(i, _)| i);
    token.split_at(at)
}
