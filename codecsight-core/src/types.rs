//! Core types: diagnostics and coding parameters

use serde::{Deserialize, Serialize};

/// One line of a decoder's report
///
/// Decoders return an ordered `Vec<Diagnostic>`; the order is the display
/// order and is part of the decoder's contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A resolved field
    Normal(String),

    /// A reserved, deprecated or deliberately uninterpreted value
    Warning(String),

    /// A structural or field-level problem
    Error(String),

    /// Supporting detail, e.g. an echo of raw flags
    Informative(String),

    /// A field that was not supplied and carries its default value
    DefaultUsed(String),

    /// A term from a classification scheme
    CrossReferenceTerm(String),
}

impl Diagnostic {
    /// Create a [`Diagnostic::Normal`]
    pub fn normal(text: impl Into<String>) -> Self {
        Diagnostic::Normal(text.into())
    }

    /// Create a [`Diagnostic::Warning`]
    pub fn warning(text: impl Into<String>) -> Self {
        Diagnostic::Warning(text.into())
    }

    /// Create a [`Diagnostic::Error`]
    pub fn error(text: impl Into<String>) -> Self {
        Diagnostic::Error(text.into())
    }

    /// Create a [`Diagnostic::Informative`]
    pub fn informative(text: impl Into<String>) -> Self {
        Diagnostic::Informative(text.into())
    }

    /// Create a [`Diagnostic::DefaultUsed`]
    pub fn default_used(text: impl Into<String>) -> Self {
        Diagnostic::DefaultUsed(text.into())
    }

    /// Create a [`Diagnostic::CrossReferenceTerm`]
    pub fn cross_reference(text: impl Into<String>) -> Self {
        Diagnostic::CrossReferenceTerm(text.into())
    }

    /// The entry's text, whatever its kind
    pub fn text(&self) -> &str {
        match self {
            Diagnostic::Normal(t)
            | Diagnostic::Warning(t)
            | Diagnostic::Error(t)
            | Diagnostic::Informative(t)
            | Diagnostic::DefaultUsed(t)
            | Diagnostic::CrossReferenceTerm(t) => t,
        }
    }

    /// Check if this entry is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Diagnostic::Error(_))
    }

    /// Check if this entry is a warning
    pub fn is_warning(&self) -> bool {
        matches!(self, Diagnostic::Warning(_))
    }
}

/// Kind of media a codec string describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Video codecs
    Video,
    /// Audio codecs
    Audio,
}

/// Named attribute of [`CodingParameters`] and classification rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    /// Sample entry / codec identifier
    Codec,
    /// Profile name
    Profile,
    /// Level as a dotted version string
    Level,
    /// Tier name
    Tier,
    /// Operating mode (audio)
    Mode,
}

/// Attributes resolved by a decoder, handed to the classification matcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingParameters {
    /// Media type; selects the rule table
    #[serde(rename = "type")]
    pub media: MediaType,

    /// Codec identifier as it appeared in the input
    pub codec: String,

    /// Resolved profile name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Resolved level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Resolved tier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,

    /// Operating mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl CodingParameters {
    /// Parameters with only the media type and codec set
    pub fn new(media: MediaType, codec: impl Into<String>) -> Self {
        Self {
            media,
            codec: codec.into(),
            profile: None,
            level: None,
            tier: None,
            mode: None,
        }
    }

    /// Parameters for a video codec
    pub fn video(codec: impl Into<String>) -> Self {
        Self::new(MediaType::Video, codec)
    }

    /// Parameters for an audio codec
    pub fn audio(codec: impl Into<String>) -> Self {
        Self::new(MediaType::Audio, codec)
    }

    /// Set the profile
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set the level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Set the tier
    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    /// Set the mode
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Present attributes in [`Attribute`] order
    pub fn attributes(&self) -> Vec<(Attribute, &str)> {
        collect_attributes(
            Some(self.codec.as_str()),
            self.profile.as_deref(),
            self.level.as_deref(),
            self.tier.as_deref(),
            self.mode.as_deref(),
        )
    }
}

pub(crate) fn collect_attributes<'a>(
    codec: Option<&'a str>,
    profile: Option<&'a str>,
    level: Option<&'a str>,
    tier: Option<&'a str>,
    mode: Option<&'a str>,
) -> Vec<(Attribute, &'a str)> {
    [
        (Attribute::Codec, codec),
        (Attribute::Profile, profile),
        (Attribute::Level, level),
        (Attribute::Tier, tier),
        (Attribute::Mode, mode),
    ]
    .into_iter()
    .filter_map(|(attr, value)| value.map(|v| (attr, v)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_skip_unset_fields() {
        let params = CodingParameters::video("avc1")
            .with_profile("High")
            .with_level("4.2");

        assert_eq!(
            params.attributes(),
            vec![
                (Attribute::Codec, "avc1"),
                (Attribute::Profile, "High"),
                (Attribute::Level, "4.2"),
            ]
        );
    }

    #[test]
    fn test_diagnostic_text_and_kind() {
        let d = Diagnostic::error("bad level");
        assert!(d.is_error());
        assert!(!d.is_warning());
        assert_eq!(d.text(), "bad level");
    }
}
