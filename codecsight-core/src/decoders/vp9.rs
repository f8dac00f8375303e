//! VP9 in ISO BMFF (`vp09.02.10.10.01.09.16.09.01`)

use crate::classify::Classifier;
use crate::keyvalue::{Pattern, Presentation};
use crate::positional::{FieldSpec, FieldTable, ParsedFields};
use crate::profile::{level_name, LevelTable};
use crate::types::{CodingParameters, Diagnostic};
use crate::validate::fields;

use super::{cicp, push_term};

/// Expected shape, shown after a structural error
pub const FORMAT: &str = "<sample entry 4CC>.<profile>.<level>.<bitDepth>.<chromaSubsampling>.<colourPrimaries>.<transferCharacteristics>.<matrixCoefficients>.<videoFullRangeFlag>";

const LEVELS: LevelTable = &[
    (10, "1"),
    (11, "1.1"),
    (20, "2"),
    (21, "2.1"),
    (30, "3"),
    (31, "3.1"),
    (40, "4"),
    (41, "4.1"),
    (50, "5"),
    (51, "5.1"),
    (52, "5.2"),
    (60, "6"),
    (61, "6.1"),
    (62, "6.2"),
];

const PROFILE: usize = 0;
const LEVEL: usize = 1;
const BIT_DEPTH: usize = 2;
const CHROMA: usize = 3;
const MATRIX: usize = 6;

const CHROMA_420_VERTICAL: u32 = 0;
const CHROMA_420_COLOCATED: u32 = 1;
const CHROMA_422: u32 = 2;
const CHROMA_444: u32 = 3;

const OPTIONAL_MAX: Pattern = Pattern::Decimal {
    width: None,
    max: Some(99),
};

fn present_profile(value: Option<u32>) -> Presentation {
    match value {
        Some(v) if v <= 3 => Presentation::plain(format!("{v:02} (Profile {v})")),
        Some(v) => Presentation::with_note(
            format!("{v:02}"),
            Diagnostic::error(format!("invalid profile ({v})")),
        ),
        None => Presentation::plain("not set"),
    }
}

fn present_level(value: Option<u32>) -> Presentation {
    let Some(v) = value else {
        return Presentation::plain("not set");
    };
    match level_name(LEVELS, v) {
        Some(name) => Presentation::plain(format!("{v} (Level {name})")),
        None => Presentation::with_note(
            v.to_string(),
            Diagnostic::error(format!("unknown level ({v})")),
        ),
    }
}

fn present_bit_depth(value: Option<u32>) -> Presentation {
    match value {
        Some(v @ (8 | 10 | 12)) => Presentation::plain(format!("{v:02} ({v} bit)")),
        Some(v) => Presentation::with_note(
            format!("{v:02}"),
            Diagnostic::error(format!("invalid bit depth ({v})")),
        ),
        None => Presentation::plain("not set"),
    }
}

fn present_chroma(value: Option<u32>) -> Presentation {
    let Some(v) = value else {
        return Presentation::plain("not set");
    };
    let text = match v {
        CHROMA_420_VERTICAL => "4:2:0 vertical",
        CHROMA_420_COLOCATED => "4:2:0 colocated with luma (0,0)",
        CHROMA_422 => "4:2:2",
        CHROMA_444 => "4:4:4",
        4..=7 => return Presentation::with_note(v.to_string(), Diagnostic::warning("Reserved")),
        _ => {
            return Presentation::with_note(
                v.to_string(),
                Diagnostic::error(format!("invalid chroma subsampling ({v})")),
            )
        }
    };
    Presentation::plain(format!("{v:02} ({text})"))
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
        Some(1) => Presentation::plain("1 (full range)"),
        Some(0) => Presentation::plain("0 (legal range)"),
        Some(v) => Presentation::with_note(
            v.to_string(),
            Diagnostic::error(format!("invalid full range flag ({v})")),
        ),
        None => Presentation::plain("not set"),
    }
}

/// Fields after the sample entry 4CC
pub const FIELDS: FieldTable = FieldTable::new(&[
    FieldSpec {
        label: "Profile",
        default: None,
        pattern: Pattern::digits(2),
        present: present_profile,
    },
    FieldSpec {
        label: "Level",
        default: None,
        pattern: Pattern::digits(2),
        present: present_level,
    },
    FieldSpec {
        label: "Bit Depth",
        default: None,
        pattern: Pattern::digits(2),
        present: present_bit_depth,
    },
    FieldSpec {
        label: "Chroma Subsampling",
        default: Some(CHROMA_420_COLOCATED),
        pattern: OPTIONAL_MAX,
        present: present_chroma,
    },
    FieldSpec {
        label: "Colour Primaries",
        default: Some(1),
        pattern: OPTIONAL_MAX,
        present: present_primaries,
    },
    FieldSpec {
        label: "Transfer Characteristics",
        default: Some(1),
        pattern: OPTIONAL_MAX,
        present: present_transfer,
    },
    FieldSpec {
        label: "Matrix Coefficients",
        default: Some(1),
        pattern: OPTIONAL_MAX,
        present: present_matrix,
    },
    FieldSpec {
        label: "Video Full Range Flag",
        default: Some(0),
        pattern: OPTIONAL_MAX,
        present: present_range,
    },
]);

/// Profile, bit depth and chroma format combinations the profiles allow
fn profile_constraints(parsed: &ParsedFields) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let Some(profile) = parsed.value(PROFILE) else {
        return out;
    };
    let high_bit_depth = profile >= 2;
    let full_chroma = profile % 2 == 1;

    match parsed.value(BIT_DEPTH) {
        Some(8) if high_bit_depth => out.push(Diagnostic::warning(
            "8 bit is only possible with Profile 0 or 1",
        )),
        Some(bits @ (10 | 12)) if !high_bit_depth => out.push(Diagnostic::warning(format!(
            "{bits} bit is only possible with Profile 2 or 3"
        ))),
        _ => {}
    }

    let chroma = parsed.value(CHROMA);
    match chroma {
        Some(CHROMA_422 | CHROMA_444) if !full_chroma => out.push(Diagnostic::warning(
            "Profile 0 and 2 only allow 4:2:0",
        )),
        Some(CHROMA_420_VERTICAL | CHROMA_420_COLOCATED) if full_chroma => out.push(
            Diagnostic::warning("4:2:0 is not permitted with Profile 1 and 3"),
        ),
        _ => {}
    }
    if parsed.value(MATRIX) == Some(0) && chroma != Some(CHROMA_444) {
        out.push(Diagnostic::warning(
            "matrixCoefficients=0 (RGB) requires 4:4:4 chroma subsampling",
        ));
    }
    out
}

/// Decode a VP9 codec string
pub fn decode(component: &str, classifier: &Classifier) -> Vec<Diagnostic> {
    let parts = fields(component);
    if parts.len() < 4 {
        return vec![
            Diagnostic::error("invalid format"),
            Diagnostic::error(FORMAT),
        ];
    }

    let parsed = FIELDS.parse(&parts[1..]);
    let mut out = parsed.report();
    out.extend(profile_constraints(&parsed));

    let mut coding = CodingParameters::video(parts[0].to_ascii_lowercase());
    if let Some(p) = parsed.value(PROFILE).filter(|p| *p <= 3) {
        coding = coding.with_profile(format!("Profile {p}"));
    }
    if let Some(name) = parsed.value(LEVEL).and_then(|l| level_name(LEVELS, l)) {
        coding = coding.with_level(name);
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
    fn test_mandatory_fields_with_defaults() {
        let out = run("vp09.00.10.08");
        assert_eq!(out.len(), 8);
        assert_eq!(out[0], Diagnostic::normal("Profile=00 (Profile 0)"));
        assert_eq!(out[1], Diagnostic::normal("Level=10 (Level 1)"));
        assert_eq!(out[2], Diagnostic::normal("Bit Depth=08 (8 bit)"));
        assert_eq!(
            out[3],
            Diagnostic::default_used("Chroma Subsampling=01 (4:2:0 colocated with luma (0,0))")
        );
        assert_eq!(
            out[7],
            Diagnostic::default_used("Video Full Range Flag=0 (legal range)")
        );
    }

    #[test]
    fn test_hdr_string() {
        let out = run("vp09.02.10.10.01.09.16.09.01");
        assert!(out.contains(&Diagnostic::normal("Profile=02 (Profile 2)")));
        assert!(out.contains(&Diagnostic::normal(
            "Transfer Characteristics=16 (SMPTE ST 2084 (2014); Rec. ITU-R BT.2100-2 perceptual quantization (PQ))"
        )));
        assert!(out.contains(&Diagnostic::normal("Video Full Range Flag=1 (full range)")));
        assert!(!out.iter().any(|d| d.is_error() || d.is_warning()));
    }

    #[test]
    fn test_empty_optional_fields_use_defaults() {
        assert_eq!(run("vp09.01.20.08.03"), run("vp09.01.20.08.03.."));
        let out = run("vp09.00.20.08..09");
        assert!(out.contains(&Diagnostic::default_used(
            "Chroma Subsampling=01 (4:2:0 colocated with luma (0,0))"
        )));
    }

    #[test]
    fn test_profile_constraints() {
        let out = run("vp09.00.41.10");
        assert!(out.contains(&Diagnostic::warning(
            "10 bit is only possible with Profile 2 or 3"
        )));

        let out = run("vp09.01.41.08");
        assert!(out.contains(&Diagnostic::warning(
            "4:2:0 is not permitted with Profile 1 and 3"
        )));

        let out = run("vp09.00.41.08.02");
        assert!(out.contains(&Diagnostic::warning("Profile 0 and 2 only allow 4:2:0")));

        let out = run("vp09.01.41.08.03.01.01.00");
        assert!(!out.iter().any(Diagnostic::is_warning));
    }

    #[test]
    fn test_field_errors() {
        let out = run("vp09.04.99.09");
        assert!(out.contains(&Diagnostic::error("invalid profile (4)")));
        assert!(out.contains(&Diagnostic::error("unknown level (99)")));
        assert!(out.contains(&Diagnostic::error("invalid bit depth (9)")));

        let out = run("vp09.00.10.08.123");
        assert_eq!(
            out[0],
            Diagnostic::error(
                "invalid value for Chroma Subsampling (123), expected decimal digits, at most 99"
            )
        );
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(
            run("vp09.00.10"),
            vec![Diagnostic::error("invalid format"), Diagnostic::error(FORMAT)]
        );
        assert_eq!(
            run("vp09.0.10.08")[0],
            Diagnostic::error("invalid value for Profile (0), expected 2 decimal digits")
        );
    }
}
