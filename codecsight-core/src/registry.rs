//! Decoder registry
//!
//! Maps case-insensitive codec identifiers (`avc1`, `hvc1`, ...) to the
//! decoder that understands them. Registration happens once, through
//! [`RegistryBuilder`]; the resulting [`Registry`] is read-only.

use crate::classify::Classifier;
use crate::render::RenderFn;
use crate::types::Diagnostic;
use hashbrown::HashMap;

#[cfg(feature = "logging")]
use tracing::debug;

/// Decodes one codec string into diagnostics
pub type DecodeFn = fn(&str, &Classifier) -> Vec<Diagnostic>;

/// A registered decoder
#[derive(Debug, Clone)]
pub struct DecoderEntry {
    tags: Vec<String>,
    label: String,
    decode: DecodeFn,
    render: Option<RenderFn>,
}

impl DecoderEntry {
    /// Identifiers served by this entry, lowercase, in registration order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Display label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Decode function
    pub fn decode_fn(&self) -> DecodeFn {
        self.decode
    }

    /// Renderer, if the entry has its own
    pub fn render_fn(&self) -> Option<RenderFn> {
        self.render
    }

    /// Run the decoder on a full codec string
    pub fn decode(&self, component: &str, classifier: &Classifier) -> Vec<Diagnostic> {
        (self.decode)(component, classifier)
    }
}

/// Collects registrations; the first registration of a tag wins
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<DecoderEntry>,
    index: HashMap<String, usize>,
}

impl RegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoder for one or more identifiers
    ///
    /// Identifiers already registered are skipped; if none is left, nothing
    /// is registered.
    pub fn register(
        &mut self,
        identifiers: &[&str],
        label: &str,
        decode: DecodeFn,
        render: Option<RenderFn>,
    ) -> &mut Self {
        let slot = self.entries.len();
        let mut tags = Vec::with_capacity(identifiers.len());

        for id in identifiers {
            let tag = id.to_ascii_lowercase();
            if self.index.contains_key(&tag) {
                #[cfg(feature = "logging")]
                debug!("Identifier {} already registered, keeping first entry", tag);
                continue;
            }
            self.index.insert(tag.clone(), slot);
            tags.push(tag);
        }

        if !tags.is_empty() {
            self.entries.push(DecoderEntry {
                tags,
                label: label.to_string(),
                decode,
                render,
            });
        }
        self
    }

    /// Register identifiers that are recognised but not decoded
    pub fn register_label_only(&mut self, identifiers: &[&str], label: &str) -> &mut Self {
        self.register(identifiers, label, label_only, None)
    }

    /// Freeze the registrations
    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
            index: self.index,
        }
    }
}

fn label_only(_component: &str, _classifier: &Classifier) -> Vec<Diagnostic> {
    vec![Diagnostic::informative(
        "no parameters are decoded for this codec",
    )]
}

/// Read-only map from codec identifier to decoder
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<DecoderEntry>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Start a new registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Find the entry for an identifier, ignoring case
    pub fn lookup(&self, identifier: &str) -> Option<&DecoderEntry> {
        let tag = identifier.to_ascii_lowercase();
        self.index.get(tag.as_str()).map(|&i| &self.entries[i])
    }

    /// Entries in registration order
    pub fn entries(&self) -> &[DecoderEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
