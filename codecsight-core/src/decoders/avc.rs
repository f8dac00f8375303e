//! AVC/H.264 (`avc1.PPCCLL`)
//!
//! Three hex octets: `profile_idc`, the constraint_set flags and `level_idc`.
//! Some profile and level names depend on the constraint_set flags.

use crate::bits::bit_set_32;
use crate::classify::Classifier;
use crate::profile::{level_name, LevelTable};
use crate::types::{CodingParameters, Diagnostic};
use crate::validate::{fields, is_hex};

use super::push_term;

const PARAMETER_DIGITS: usize = 6;

const LEVELS: LevelTable = &[
    (0x0a, "1"),
    (0x0c, "1.2"),
    (0x0d, "1.3"),
    (0x14, "2"),
    (0x15, "2.1"),
    (0x16, "2.2"),
    (0x1e, "3"),
    (0x1f, "3.1"),
    (0x20, "3.2"),
    (0x28, "4"),
    (0x29, "4.1"),
    (0x2a, "4.2"),
    (0x32, "5"),
    (0x33, "5.1"),
    (0x34, "5.2"),
    (0x3c, "6"),
    (0x3d, "6.1"),
    (0x3e, "6.2"),
];

/// constraint_set`n`_flag, numbered from the MSB of the flags octet
fn constraint(flags: u32, n: u32) -> bool {
    n <= 5 && bit_set_32(flags, 7 - n)
}

fn profile_name(idc: u32, flags: u32) -> Option<String> {
    let c = |n| constraint(flags, n);
    let constrained = |set: bool| if set { "Constrained " } else { "" };
    let intra = |set: bool| if set { " Intra" } else { "" };

    let name = match idc {
        0x2c => "CAVLC 4:4:4".to_string(),
        0x42 => format!("{}Baseline", constrained(c(1))),
        0x4d => format!("{}Main", constrained(c(1))),
        0x53 => format!("Scalable {}Base", constrained(c(5))),
        0x56 => {
            let qualifier = match (c(3), c(5)) {
                (false, true) => "Constrained ",
                (true, false) => "Intra ",
                _ => "",
            };
            format!("Scalable {qualifier}High")
        }
        0x58 => "Extended".to_string(),
        0x63 => format!("High 10{}", intra(c(3))),
        0x64 => {
            let qualifier = match (c(4), c(5)) {
                (true, false) => "Progressive ",
                (false, true) => "Constrained ",
                _ => "",
            };
            format!("{qualifier}High")
        }
        0x76 => "Multiview High".to_string(),
        0x7a => format!("High 4:2:2{}", intra(c(3))),
        0x80 => "Stereo High".to_string(),
        0x86 => "MFC High".to_string(),
        0x87 => "MFC Depth High".to_string(),
        0x8a => "Multiview Depth High".to_string(),
        0x8b => "Enhanced Multiview Depth High".to_string(),
        0xf4 => format!(
            "High 4:4:4{}",
            if c(3) { " Intra" } else { " Predictive" }
        ),
        _ => return None,
    };
    Some(name)
}

fn level(level_idc: u32, flags: u32) -> Option<&'static str> {
    if level_idc == 0x0b {
        return Some(if constraint(flags, 3) { "1b" } else { "1.1" });
    }
    level_name(LEVELS, level_idc)
}

/// Decode an AVC codec string
pub fn decode(component: &str, classifier: &Classifier) -> Vec<Diagnostic> {
    let parts = fields(component);
    if parts.len() != 2 {
        return vec![Diagnostic::error("invalid format")];
    }

    let params = parts[1];
    if params.len() != PARAMETER_DIGITS {
        return vec![Diagnostic::error(format!(
            "invalid parameters length ({}) - should be {PARAMETER_DIGITS}",
            params.len()
        ))];
    }
    if !is_hex(params) {
        return vec![Diagnostic::error("parameters contains non-hex digits")];
    }

    let Ok(octets) = hex::decode(params) else {
        return vec![Diagnostic::error("parameters contains non-hex digits")];
    };
    let (profile_idc, flags, level_idc) = (
        u32::from(octets[0]),
        u32::from(octets[1]),
        u32::from(octets[2]),
    );

    let mut out = vec![Diagnostic::normal(format!(
        "profile_idc={profile_idc} constraint_set={flags} level_idc={level_idc}"
    ))];
    let mut coding = CodingParameters::video(parts[0].to_ascii_lowercase());

    match profile_name(profile_idc, flags) {
        Some(name) => {
            out.push(Diagnostic::normal(format!(
                "profile={name} ({profile_idc:x})"
            )));
            coding = coding.with_profile(name);
        }
        None => {
            out.push(Diagnostic::error(format!("unknown profile ({profile_idc})")));
            coding = coding.with_profile("unknown");
        }
    }

    let constraints: String = (0..=5)
        .map(|n| {
            if constraint(flags, n) {
                char::from(b'0' + n as u8)
            } else {
                '-'
            }
        })
        .collect();
    out.push(Diagnostic::normal(format!("constraints={constraints}")));

    match level(level_idc, flags) {
        Some(name) => {
            out.push(Diagnostic::normal(format!("level={name} ({level_idc:x})")));
            coding = coding.with_level(name);
        }
        None => {
            out.push(Diagnostic::error(format!("level=undefined ({level_idc})")));
            coding = coding.with_level("undefined");
        }
    }

    push_term(&mut out, classifier, &coding);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(s: &str) -> Vec<Diagnostic> {
        decode(s, &Classifier::dvb().unwrap())
    }

    #[test]
    fn test_high_level_4_2() {
        assert_eq!(
            run("avc1.64002A"),
            vec![
                Diagnostic::normal("profile_idc=100 constraint_set=0 level_idc=42"),
                Diagnostic::normal("profile=High (64)"),
                Diagnostic::normal("constraints=------"),
                Diagnostic::normal("level=4.2 (2a)"),
                Diagnostic::cross_reference("urn:dvb:metadata:cs:VideoCodecCS:2022:1.4.14"),
            ]
        );
    }

    #[test]
    fn test_constraint_flags_refine_names() {
        let out = run("avc1.42E01E");
        assert_eq!(out[1], Diagnostic::normal("profile=Constrained Baseline (42)"));
        assert_eq!(out[2], Diagnostic::normal("constraints=012---"));

        let out = run("avc1.64081F");
        assert_eq!(out[1], Diagnostic::normal("profile=Progressive High (64)"));
        assert_eq!(out[2], Diagnostic::normal("constraints=----4-"));

        let out = run("avc1.640C1F");
        assert_eq!(out[1], Diagnostic::normal("profile=High (64)"));
    }

    #[test]
    fn test_level_1b() {
        assert_eq!(run("avc1.42100B")[3], Diagnostic::normal("level=1b (b)"));
        assert_eq!(run("avc1.42000B")[3], Diagnostic::normal("level=1.1 (b)"));
    }

    #[test]
    fn test_level_idc_is_ten_times_level() {
        assert_eq!(run("avc1.42E00D")[3], Diagnostic::normal("level=1.3 (d)"));
        assert_eq!(run("avc1.42E01D")[3], Diagnostic::error("level=undefined (29)"));
        assert_eq!(run("avc1.64003E")[3], Diagnostic::normal("level=6.2 (3e)"));
    }

    #[test]
    fn test_unknown_profile_and_level_are_field_errors() {
        let out = run("avc1.0100FF");
        assert_eq!(out[1], Diagnostic::error("unknown profile (1)"));
        assert_eq!(out[3], Diagnostic::error("level=undefined (255)"));
        assert!(!out.iter().any(|d| matches!(d, Diagnostic::CrossReferenceTerm(_))));
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(run("avc1"), vec![Diagnostic::error("invalid format")]);
        assert_eq!(run("avc1.64.00"), vec![Diagnostic::error("invalid format")]);
        assert_eq!(
            run("avc1.6400"),
            vec![Diagnostic::error(
                "invalid parameters length (4) - should be 6"
            )]
        );
        assert_eq!(
            run("avc1.64002G"),
            vec![Diagnostic::error("parameters contains non-hex digits")]
        );
    }

    #[test]
    fn test_other_fourcc_is_not_classified() {
        let out = run("mvc1.76001F");
        assert_eq!(out[1], Diagnostic::normal("profile=Multiview High (76)"));
        assert_eq!(out.len(), 4);
    }
}
