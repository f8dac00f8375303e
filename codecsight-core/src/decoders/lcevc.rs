//! MPEG-5 Low Complexity Enhancement Video Coding (`lvc1.vprf0.vlev4`)

use crate::classify::Classifier;
use crate::keyvalue::{KeySpec, KeyTable, Pattern, Presentation};
use crate::types::{CodingParameters, Diagnostic};
use crate::validate::fields;

use super::push_term;

const PROFILES: [&str; 2] = ["Main profile", "Main 4:4:4 profile"];
const LEVELS: core::ops::RangeInclusive<u32> = 1..=4;

fn present_profile(value: Option<u32>) -> Presentation {
    match value {
        Some(v) => match PROFILES.get(v as usize) {
            Some(name) => Presentation::plain(format!("{v} ({name})")),
            None => Presentation::with_note(
                v.to_string(),
                Diagnostic::error(format!("invalid profile ({v})")),
            ),
        },
        None => Presentation::plain("not set"),
    }
}

fn present_level(value: Option<u32>) -> Presentation {
    match value {
        Some(v) if LEVELS.contains(&v) => Presentation::plain(format!("{v} (Level {v})")),
        Some(v) => Presentation::with_note(
            v.to_string(),
            Diagnostic::error(format!("invalid level ({v})")),
        ),
        None => Presentation::plain("not set"),
    }
}

/// LCEVC key table
pub const KEYS: KeyTable = KeyTable::new(
    "lcevc keys",
    &[
        KeySpec {
            key: "vprf",
            label: "Profile",
            default: Some(0),
            pattern: Pattern::DIGITS,
            present: present_profile,
        },
        KeySpec {
            key: "vlev",
            label: "Level",
            default: Some(4),
            pattern: Pattern::DIGITS,
            present: present_level,
        },
    ],
);

/// Decode an LCEVC codec string
pub fn decode(component: &str, classifier: &Classifier) -> Vec<Diagnostic> {
    let parts = fields(component);
    let parsed = KEYS.parse(&parts[1..]);
    let mut out = parsed.report();

    let mut coding = CodingParameters::video(parts[0].to_ascii_lowercase());
    if let Some(name) = parsed.value("vprf").and_then(|p| PROFILES.get(p as usize)) {
        coding = coding.with_profile(*name);
    }
    if let Some(level) = parsed.value("vlev").filter(|l| LEVELS.contains(l)) {
        coding = coding.with_level(level.to_string());
    }
    push_term(&mut out, classifier, &coding);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(s: &str) -> Vec<Diagnostic> {
        decode(s, &Classifier::empty())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            run("lvc1"),
            vec![
                Diagnostic::default_used("Profile (vprf)=0 (Main profile)"),
                Diagnostic::default_used("Level (vlev)=4 (Level 4)"),
            ]
        );
    }

    #[test]
    fn test_order_independent() {
        let a = run("lvc1.vprf1.vlev2");
        let b = run("lvc1.vlev2.vprf1");
        assert_eq!(a, b);
        assert_eq!(
            a,
            vec![
                Diagnostic::normal("Profile (vprf)=1 (Main 4:4:4 profile)"),
                Diagnostic::normal("Level (vlev)=2 (Level 2)"),
            ]
        );
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let out = run("lvc1.vxxx3");
        assert_eq!(out[0], Diagnostic::error("invalid key specified (vxxx)"));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_out_of_range_values() {
        let out = run("lvc1.vprf2.vlev5");
        assert_eq!(
            out,
            vec![
                Diagnostic::normal("Profile (vprf)=2"),
                Diagnostic::error("invalid profile (2)"),
                Diagnostic::normal("Level (vlev)=5"),
                Diagnostic::error("invalid level (5)"),
            ]
        );
    }
}
