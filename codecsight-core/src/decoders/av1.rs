//! AOMedia Video 1 (`av01.0.04M.10.0.112.09.16.09.0`)
//!
//! Profile, level with tier, and bit depth are mandatory; the colour
//! description fields after them are positional with defaults.

use crate::classify::Classifier;
use crate::keyvalue::{Pattern, Presentation};
use crate::positional::{FieldSpec, FieldTable};
use crate::types::{CodingParameters, Diagnostic};
use crate::validate::{fields, is_decimal, parse_decimal};

use super::{cicp, push_term};

/// Expected shape, shown after a structural error
pub const FORMAT: &str = "<sample entry 4CC>.<profile>.<level><tier>.<bitDepth>.<monochrome>.<chromaSubsampling>.<colorPrimaries>.<transferCharacteristics>.<matrixCoefficients>.<videoFullRangeFlag>";

const PROFILES: [&str; 3] = ["Main", "High", "Professional"];

const BIT_DEPTH: usize = 0;
const CHROMA: usize = 2;

fn present_bit_depth(value: Option<u32>) -> Presentation {
    match value {
        Some(v @ (8 | 10 | 12)) => Presentation::plain(format!("{v} bit")),
        Some(v) => Presentation::with_note(
            v.to_string(),
            Diagnostic::error(format!("unknown bit depth ({v})")),
        ),
        None => Presentation::plain("not set"),
    }
}

fn present_monochrome(value: Option<u32>) -> Presentation {
    match value {
        Some(1) => Presentation::plain("1 (no U or V, monochrome)"),
        _ => Presentation::plain("0 (Y, U and V)"),
    }
}

fn chroma_position(csp: u32) -> &'static str {
    match csp {
        0 => "CSP_UNKNOWN",
        1 => "CSP_VERTICAL",
        2 => "CSP_COLOCATED",
        _ => "CSP_RESERVED",
    }
}

/// `xyp`: subsampling_x, subsampling_y, chroma_sample_position
fn present_chroma(value: Option<u32>) -> Presentation {
    let Some(v) = value else {
        return Presentation::plain("not set");
    };
    let (x, y, csp) = (v / 100, v / 10 % 10, v % 10);
    let text = format!("{v:03} ({}, {})", subsampling(x, y), chroma_position(csp));

    if x > 1 || y > 1 || (x, y) == (0, 1) {
        return Presentation::with_note(
            text,
            Diagnostic::error(format!("invalid chroma subsampling ({v:03})")),
        );
    }
    if csp > 3 {
        return Presentation::with_note(
            text,
            Diagnostic::error(format!("invalid chroma sample position ({csp})")),
        );
    }
    if (x, y) != (1, 1) && csp != 0 {
        return Presentation::with_note(
            text,
            Diagnostic::error("chroma sample position must be 0 unless subsampling is 4:2:0"),
        );
    }
    if csp == 3 {
        return Presentation::with_note(text, Diagnostic::warning("CSP_RESERVED"));
    }
    Presentation::plain(text)
}

fn subsampling(x: u32, y: u32) -> &'static str {
    match (x, y) {
        (1, 1) => "4:2:0",
        (1, 0) => "4:2:2",
        (0, 0) => "4:4:4",
        _ => "invalid",
    }
}

fn present_primaries(value: Option<u32>) -> Presentation {
    cicp::present(value, cicp::colour_primaries)
}

fn present_transfer(value: Option<u32>) -> Presentation {
    cicp::present(value, cicp::transfer_characteristics)
}

fn present_matrix(value: Option<u32>) -> Presentation {
    cicp::present(value, cicp::matrix_coefficients)
}

fn present_range(value: Option<u32>) -> Presentation {
    match value {
        Some(1) => Presentation::plain("1 (full swing representation)"),
        _ => Presentation::plain("0 (studio swing representation)"),
    }
}

/// Fields after `<level><tier>`
pub const FIELDS: FieldTable = FieldTable::new(&[
    FieldSpec {
        label: "Bit Depth",
        default: None,
        pattern: Pattern::digits(2),
        present: present_bit_depth,
    },
    FieldSpec {
        label: "Monochrome",
        default: Some(0),
        pattern: Pattern::Choice(&["0", "1"]),
        present: present_monochrome,
    },
    FieldSpec {
        label: "Chroma Subsampling",
        default: Some(110),
        pattern: Pattern::digits(3),
        present: present_chroma,
    },
    FieldSpec {
        label: "Colour Primaries",
        default: Some(1),
        pattern: Pattern::digits(2),
        present: present_primaries,
    },
    FieldSpec {
        label: "Transfer Characteristics",
        default: Some(1),
        pattern: Pattern::digits(2),
        present: present_transfer,
    },
    FieldSpec {
        label: "Matrix Coefficients",
        default: Some(1),
        pattern: Pattern::digits(2),
        present: present_matrix,
    },
    FieldSpec {
        label: "Video Full Range",
        default: Some(0),
        pattern: Pattern::Choice(&["0", "1"]),
        present: present_range,
    },
]);

/// seq_level_idx 0..=23 is `X.Y` with X = 2 + idx / 4, Y = idx % 4
fn level(idx: u32) -> Diagnostic {
    match idx {
        0..=23 => Diagnostic::normal(format!("Level {}.{}", 2 + idx / 4, idx % 4)),
        24..=30 => Diagnostic::warning(format!("reserved level ({idx})")),
        31 => Diagnostic::normal("Level Max"),
        _ => Diagnostic::error(format!("unknown level ({idx})")),
    }
}

/// Split `08M` into (8, 'M')
fn level_and_tier(field: &str) -> Option<(u32, char)> {
    let tier = field.chars().last()?;
    let digits = &field[..field.len() - tier.len_utf8()];
    if !tier.is_ascii_alphabetic() || !is_decimal(digits) {
        return None;
    }
    parse_decimal(digits).map(|idx| (idx, tier))
}

/// Decode an AV1 codec string
pub fn decode(component: &str, classifier: &Classifier) -> Vec<Diagnostic> {
    let parts = fields(component);
    if parts.len() < 4 {
        return vec![
            Diagnostic::error("invalid format"),
            Diagnostic::error(FORMAT),
        ];
    }

    let mut out = Vec::new();
    let mut coding = CodingParameters::video(parts[0].to_ascii_lowercase());

    let profile = parse_decimal(parts[1]);
    match profile.and_then(|p| PROFILES.get(p as usize).map(|name| (p, name))) {
        Some((p, name)) => {
            out.push(Diagnostic::normal(format!("profile={p} ({name})")));
            coding = coding.with_profile(*name);
        }
        None => out.push(Diagnostic::error(format!("unknown profile ({})", parts[1]))),
    }

    match level_and_tier(parts[2]) {
        Some((idx, tier)) => {
            let entry = level(idx);
            if let Diagnostic::Normal(text) = &entry {
                if let Some(name) = text.strip_prefix("Level ") {
                    coding = coding.with_level(name);
                }
            }
            out.push(entry);
            out.push(match tier {
                'M' | 'm' => Diagnostic::normal("Main tier"),
                'H' | 'h' => Diagnostic::normal("High tier"),
                other => Diagnostic::error(format!("unknown tier ({other})")),
            });
        }
        None => out.push(Diagnostic::error(format!(
            "level and tier not expressed as <decimal><M|H> ({})",
            parts[2]
        ))),
    }

    let parsed = FIELDS.parse(&parts[3..]);
    out.extend(parsed.report());

    // profile constraints on bit depth and chroma format
    if let Some(p) = profile {
        if parsed.value(BIT_DEPTH) == Some(12) && p != 2 {
            out.push(Diagnostic::warning(
                "12 bit is only possible with the Professional profile",
            ));
        }
        match parsed.value(CHROMA).map(|v| (v / 100, v / 10 % 10)) {
            Some((0, 0)) if p == 0 => out.push(Diagnostic::warning(
                "4:4:4 is not possible with the Main profile",
            )),
            Some((1, 0)) if p != 2 => out.push(Diagnostic::warning(
                "4:2:2 is only possible with the Professional profile",
            )),
            _ => {}
        }
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
    fn test_mandatory_fields_only() {
        assert_eq!(
            run("av01.0.04M.10"),
            vec![
                Diagnostic::normal("profile=0 (Main)"),
                Diagnostic::normal("Level 3.0"),
                Diagnostic::normal("Main tier"),
                Diagnostic::normal("Bit Depth=10 bit"),
                Diagnostic::default_used("Monochrome=0 (Y, U and V)"),
                Diagnostic::default_used("Chroma Subsampling=110 (4:2:0, CSP_UNKNOWN)"),
                Diagnostic::default_used(
                    "Colour Primaries=1 (Rec. ITU-R BT.709-6; IEC 61966-2-1 sRGB or sYCC; IEC 61966-2-4)"
                ),
                Diagnostic::default_used("Transfer Characteristics=1 (Rec. ITU-R BT.709-6)"),
                Diagnostic::default_used(
                    "Matrix Coefficients=1 (Rec. ITU-R BT.709-6; IEC 61966-2-4 xvYCC709)"
                ),
                Diagnostic::default_used("Video Full Range=0 (studio swing representation)"),
            ]
        );
    }

    #[test]
    fn test_full_string() {
        let out = run("av01.0.13H.10.0.112.09.16.09.1");
        assert!(out.contains(&Diagnostic::normal("Level 5.1")));
        assert!(out.contains(&Diagnostic::normal("High tier")));
        assert!(out.contains(&Diagnostic::normal(
            "Chroma Subsampling=112 (4:2:0, CSP_COLOCATED)"
        )));
        assert!(out.contains(&Diagnostic::normal(
            "Video Full Range=1 (full swing representation)"
        )));
        assert!(!out.iter().any(|d| d.is_error() || d.is_warning()));
    }

    #[test]
    fn test_levels() {
        assert_eq!(level(0), Diagnostic::normal("Level 2.0"));
        assert_eq!(level(23), Diagnostic::normal("Level 7.3"));
        assert_eq!(level(25), Diagnostic::warning("reserved level (25)"));
        assert_eq!(level(31), Diagnostic::normal("Level Max"));
        assert_eq!(level(32), Diagnostic::error("unknown level (32)"));
    }

    #[test]
    fn test_field_errors_keep_other_fields() {
        let out = run("av01.3.04X.11");
        assert_eq!(out[0], Diagnostic::error("unknown profile (3)"));
        assert_eq!(out[1], Diagnostic::normal("Level 3.0"));
        assert_eq!(out[2], Diagnostic::error("unknown tier (X)"));
        assert_eq!(out[3], Diagnostic::normal("Bit Depth=11"));
        assert_eq!(out[4], Diagnostic::error("unknown bit depth (11)"));
    }

    #[test]
    fn test_chroma_rules() {
        let out = run("av01.0.04M.08.0.101");
        assert!(out.contains(&Diagnostic::error(
            "chroma sample position must be 0 unless subsampling is 4:2:0"
        )));

        let out = run("av01.0.04M.12.0.000");
        assert!(out.contains(&Diagnostic::warning(
            "12 bit is only possible with the Professional profile"
        )));
        assert!(out.contains(&Diagnostic::warning(
            "4:4:4 is not possible with the Main profile"
        )));
        assert!(run("av01.1.04M.10.0.000").iter().all(|d| !d.is_warning()));
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(
            run("av01.0.04M"),
            vec![Diagnostic::error("invalid format"), Diagnostic::error(FORMAT)]
        );
        assert!(run("av01.0.04M.10.0.110.1.1.1.0.9")[3].is_error());
    }
}
