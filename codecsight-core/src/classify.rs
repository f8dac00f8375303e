//! Classification of coding parameters into scheme terms
//!
//! A [`RuleTable`] is an ordered list of rules; the first rule whose
//! attribute set equals the query's attribute set, and whose values all
//! match, supplies the term. A rule value ending in `*` matches any query
//! value starting with the part before the `*`.

use crate::constants::{DVB_VIDEO_CODEC_CS, WILDCARD};
use crate::error::CodecError;
use crate::types::{collect_attributes, Attribute, CodingParameters, MediaType};
use crate::Result;

/// One row of a classification table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRule {
    /// Term returned when the rule matches
    pub term: String,

    /// Codec identifier
    pub codec: String,

    /// Profile name, may end in a wildcard
    pub profile: Option<String>,

    /// Level
    pub level: Option<String>,

    /// Tier
    pub tier: Option<String>,

    /// Mode
    pub mode: Option<String>,
}

impl ClassificationRule {
    /// Rule with only a codec
    pub fn new(term: impl Into<String>, codec: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            codec: codec.into(),
            profile: None,
            level: None,
            tier: None,
            mode: None,
        }
    }

    /// Require a profile
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Require a level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Require a tier
    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    /// Require a mode
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    fn attributes(&self) -> Vec<(Attribute, &str)> {
        collect_attributes(
            Some(self.codec.as_str()),
            self.profile.as_deref(),
            self.level.as_deref(),
            self.tier.as_deref(),
            self.mode.as_deref(),
        )
    }

    /// True if the key sets are equal and every value matches
    pub fn matches(&self, params: &CodingParameters) -> bool {
        let wanted = self.attributes();
        let given = params.attributes();
        wanted.len() == given.len()
            && wanted
                .iter()
                .zip(given.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && value_matches(va, vb))
    }
}

fn value_matches(rule: &str, value: &str) -> bool {
    if rule.is_empty() || value.is_empty() {
        return false;
    }
    match rule.find(WILDCARD) {
        Some(wc) => value.starts_with(&rule[..wc]),
        None => rule == value,
    }
}

/// Ordered rules of one classification scheme
#[derive(Debug, Clone)]
pub struct RuleTable {
    scheme: &'static str,
    rules: Vec<ClassificationRule>,
}

impl RuleTable {
    /// Build a table, rejecting rows without a term or codec
    pub fn new(scheme: &'static str, rules: Vec<ClassificationRule>) -> Result<Self> {
        for (row, rule) in rules.iter().enumerate() {
            let reason = if rule.term.is_empty() {
                "empty term"
            } else if rule.codec.is_empty() {
                "empty codec"
            } else {
                continue;
            };
            return Err(CodecError::InvalidRule {
                scheme,
                row,
                reason,
            });
        }
        Ok(Self { scheme, rules })
    }

    /// Scheme URN prefixed to returned terms
    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// `scheme:term` of the first matching rule
    pub fn classify(&self, params: &CodingParameters) -> Option<String> {
        self.rules
            .iter()
            .find(|rule| rule.matches(params))
            .map(|rule| format!("{}:{}", self.scheme, rule.term))
    }
}

/// Rule tables per media type
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    video: Option<RuleTable>,
    audio: Option<RuleTable>,
}

impl Classifier {
    /// A classifier that never matches
    pub fn empty() -> Self {
        Self::default()
    }

    /// Classifier with the DVB codec classification tables
    pub fn dvb() -> Result<Self> {
        Ok(Self::empty().with_table(MediaType::Video, dvb_video_table()?))
    }

    /// Install the table used for `media`
    pub fn with_table(mut self, media: MediaType, table: RuleTable) -> Self {
        match media {
            MediaType::Video => self.video = Some(table),
            MediaType::Audio => self.audio = Some(table),
        }
        self
    }

    /// Table for a media type, if any
    pub fn table(&self, media: MediaType) -> Option<&RuleTable> {
        match media {
            MediaType::Video => self.video.as_ref(),
            MediaType::Audio => self.audio.as_ref(),
        }
    }

    /// Term for `params`, if a rule matches
    pub fn classify(&self, params: &CodingParameters) -> Option<String> {
        self.table(params.media)?.classify(params)
    }
}

const AVC_LEVELS: [&str; 16] = [
    "1", "1b", "1.1", "1.2", "1.3", "2", "2.1", "2.2", "3", "3.1", "3.2", "4", "4.1", "4.2", "5",
    "5.1",
];

const AVC_PROFILES: [&str; 7] = [
    "Baseline",
    "Main",
    "Extended",
    "High",
    "High 10",
    "High 4:2:2",
    "High 4:4:4 Predictive",
];

/// Level rows (1-based term index) available for the wildcard AVC families
const AVC_FAMILY_LEVELS: core::ops::RangeInclusive<usize> = 9..=14;

/// DVB `VideoCodecCS:2022` rows for AVC
pub fn dvb_video_table() -> Result<RuleTable> {
    let mut rules = vec![ClassificationRule::new("1", "avc1")];

    for (p, profile) in AVC_PROFILES.iter().enumerate() {
        let base = format!("1.{}", p + 1);
        rules.push(ClassificationRule::new(base.clone(), "avc1").with_profile(*profile));
        for (l, level) in AVC_LEVELS.iter().enumerate() {
            rules.push(
                ClassificationRule::new(format!("{base}.{}", l + 1), "avc1")
                    .with_profile(*profile)
                    .with_level(*level),
            );
        }
    }

    for (n, family) in [(8, "Scalable*"), (9, "Stereo*")] {
        let base = format!("1.{n}");
        rules.push(ClassificationRule::new(base.clone(), "avc1").with_profile(family));
        for index in AVC_FAMILY_LEVELS {
            rules.push(
                ClassificationRule::new(format!("{base}.{index}"), "avc1")
                    .with_profile(family)
                    .with_level(AVC_LEVELS[index - 1]),
            );
        }
    }

    RuleTable::new(DVB_VIDEO_CODEC_CS, rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RuleTable {
        RuleTable::new(
            "urn:test",
            vec![
                ClassificationRule::new("1", "avc1"),
                ClassificationRule::new("2", "avc1")
                    .with_profile("High")
                    .with_level("4.2"),
                ClassificationRule::new("3", "avc1")
                    .with_profile("Scalable*")
                    .with_level("4"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_exact_match() {
        let params = CodingParameters::video("avc1")
            .with_profile("High")
            .with_level("4.2");
        assert_eq!(table().classify(&params), Some("urn:test:2".to_string()));
    }

    #[test]
    fn test_missing_attribute_never_matches() {
        // rule 2 needs a level; rule 1 has no profile
        let params = CodingParameters::video("avc1").with_profile("High");
        assert_eq!(table().classify(&params), None);
    }

    #[test]
    fn test_extra_attribute_never_matches() {
        let params = CodingParameters::video("avc1")
            .with_profile("High")
            .with_level("4.2")
            .with_tier("Main");
        assert_eq!(table().classify(&params), None);
    }

    #[test]
    fn test_wildcard_matches_family() {
        let params = CodingParameters::video("avc1")
            .with_profile("Scalable Constrained High")
            .with_level("4");
        assert_eq!(table().classify(&params), Some("urn:test:3".to_string()));

        let other = CodingParameters::video("avc1")
            .with_profile("Stereo High")
            .with_level("4");
        assert_eq!(table().classify(&other), None);
    }

    #[test]
    fn test_empty_values_never_match() {
        let params = CodingParameters::video("avc1")
            .with_profile("")
            .with_level("4.2");
        assert_eq!(table().classify(&params), None);
    }

    #[test]
    fn test_codec_only_rule() {
        let params = CodingParameters::video("avc1");
        assert_eq!(table().classify(&params), Some("urn:test:1".to_string()));
    }

    #[test]
    fn test_media_type_selects_table() {
        let classifier = Classifier::empty().with_table(MediaType::Video, table());
        assert!(classifier
            .classify(&CodingParameters::audio("avc1"))
            .is_none());
        assert!(classifier
            .classify(&CodingParameters::video("avc1"))
            .is_some());
        assert!(Classifier::empty()
            .classify(&CodingParameters::video("avc1"))
            .is_none());
    }

    #[test]
    fn test_rule_without_term_is_rejected() {
        let err = RuleTable::new("urn:test", vec![ClassificationRule::new("", "avc1")]);
        assert!(matches!(err, Err(CodecError::InvalidRule { row: 0, .. })));
    }

    #[test]
    fn test_dvb_table() {
        let dvb = Classifier::dvb().unwrap();
        let high = CodingParameters::video("avc1")
            .with_profile("High")
            .with_level("3.2");
        assert_eq!(
            dvb.classify(&high).as_deref(),
            Some("urn:dvb:metadata:cs:VideoCodecCS:2022:1.4.11")
        );

        let scalable = CodingParameters::video("avc1")
            .with_profile("Scalable High")
            .with_level("4.1");
        assert_eq!(
            dvb.classify(&scalable).as_deref(),
            Some("urn:dvb:metadata:cs:VideoCodecCS:2022:1.8.13")
        );

        // 1 + 7 * 17 + 2 * 7
        assert_eq!(dvb.table(MediaType::Video).unwrap().len(), 134);
    }
}
