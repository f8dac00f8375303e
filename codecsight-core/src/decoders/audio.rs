//! Audio codec strings: MPEG-4 audio, Enhanced AC-3, AC-4 and MPEG-H 3D Audio

use crate::classify::Classifier;
use crate::types::{CodingParameters, Diagnostic};
use crate::validate::{fields, parse_decimal, parse_hex};

use super::push_term;

/// MPEG-4 audio object types carried after OTI 0x40
const AUDIO_OBJECT_TYPES: &[(u32, &str)] = &[
    (1, "AAC Main"),
    (2, "Low-Complexity AAC"),
    (3, "AAC SSR"),
    (4, "AAC LTP"),
    (5, "High-Efficiency (SBR) AAC"),
    (6, "AAC Scalable"),
    (7, "TwinVQ"),
    (8, "CELP"),
    (9, "HVXC"),
    (12, "TTSI"),
    (13, "Main Synthetic"),
    (14, "Wavetable Synthesis"),
    (15, "General MIDI"),
    (16, "Algorithmic Synthesis and Audio Effects"),
    (17, "ER AAC LC"),
    (19, "ER AAC LTP"),
    (20, "ER AAC Scalable"),
    (21, "ER TwinVQ"),
    (22, "ER BSAC"),
    (23, "ER AAC LD"),
    (24, "ER CELP"),
    (25, "ER HVXC"),
    (26, "ER HILN"),
    (27, "ER Parametric"),
    (28, "SSC"),
    (29, "Parametric Stereo"),
    (32, "Layer-1"),
    (33, "Layer-2"),
    (34, "Layer-3"),
    (35, "DST"),
    (36, "ALS"),
];

/// Object type indications other than 0x40
const OBJECT_TYPES: &[(u32, &str)] = &[
    (0x66, "MPEG-2 AAC Main Profile"),
    (0x67, "MPEG-2 AAC Low Complexity Profile"),
    (0x68, "MPEG-2 AAC Scalable Sampling Rate Profile"),
    (0x69, "MPEG-2 Audio Part 3"),
    (0x6b, "MPEG-1 Part 3"),
];

const OTI_MPEG4_AUDIO: u32 = 0x40;

/// `mp4a.<OTI>[.<audio object type>]`, OTI in hex and object type in decimal
pub fn decode_mp4a(component: &str, classifier: &Classifier) -> Vec<Diagnostic> {
    let parts = fields(component);
    if parts.len() < 2 {
        return vec![Diagnostic::error("invalid format")];
    }
    if parts.len() > 3 {
        return vec![Diagnostic::error(format!(
            "too many fields ({}), at most 3 expected",
            parts.len()
        ))];
    }
    let Some(oti) = parse_hex(parts[1]) else {
        return vec![Diagnostic::error(format!(
            "OTI must be expressed in hexadecimal ({})",
            parts[1]
        ))];
    };

    let mut out = Vec::new();
    let mut coding = CodingParameters::audio(parts[0].to_ascii_lowercase());
    if oti == OTI_MPEG4_AUDIO {
        out.push(Diagnostic::normal(format!("MPEG-4 AAC ({oti:02X})")));
        if let Some(&aot) = parts.get(2) {
            let found = parse_decimal(aot).and_then(|v| {
                AUDIO_OBJECT_TYPES
                    .iter()
                    .find(|(value, _)| *value == v)
                    .copied()
            });
            match found {
                Some((value, name)) => {
                    out.push(Diagnostic::normal(format!(
                        "audio object type={value} ({name})"
                    )));
                    coding = coding.with_mode(value.to_string());
                }
                None => out.push(Diagnostic::error(format!("invalid AAC OTI ({aot})"))),
            }
        }
    } else {
        match OBJECT_TYPES.iter().find(|(value, _)| *value == oti) {
            Some(&(_, name)) => {
                out.push(Diagnostic::normal(format!("{name} ({oti:02X})")));
                if parts.len() == 3 {
                    out.push(Diagnostic::warning(format!(
                        "audio object type is only defined for OTI 40 ({})",
                        parts[2]
                    )));
                }
            }
            None => out.push(Diagnostic::error(format!(
                "unsupported object type indication ({})",
                parts[1]
            ))),
        }
    }

    push_term(&mut out, classifier, &coding);
    out
}

/// `ec-3` carries no parameters
pub fn decode_eac3(component: &str, classifier: &Classifier) -> Vec<Diagnostic> {
    if fields(component).len() != 1 {
        return vec![Diagnostic::error(
            "no additional parameters for Enhanced AC-3",
        )];
    }
    let mut out = vec![Diagnostic::normal("Enhanced AC-3")];
    let coding = CodingParameters::audio("ac3").with_mode("E-AC3");
    push_term(&mut out, classifier, &coding);
    out
}

const AC4_CHANNELS: [&str; 5] = ["2", "6", "9", "11", "13"];
const AC4_TRACKS: [&str; 4] = ["2", "6", "9", "11"];

/// `ac-4.<bitstream_version>.<presentation_version>.<mdcompat>`, all hex
pub fn decode_ac4(component: &str, classifier: &Classifier) -> Vec<Diagnostic> {
    let parts = fields(component);
    if parts.len() != 4 {
        return vec![Diagnostic::error("invalid format")];
    }
    let (Some(bitstream), Some(presentation), Some(mdcompat)) =
        (parse_hex(parts[1]), parse_hex(parts[2]), parse_hex(parts[3]))
    else {
        return vec![Diagnostic::error("parameters contain non-hex digits")];
    };

    let mut out = vec![
        Diagnostic::normal(format!("bitstream_version={bitstream}")),
        Diagnostic::normal(format!("presentation_version={presentation}")),
    ];

    // channels for version 0, tracks for version 1
    let limits: Option<(&str, &[&str])> = match presentation {
        0 => Some(("maximum channels", &AC4_CHANNELS[..])),
        1 => Some(("maximum tracks", &AC4_TRACKS[..])),
        other => {
            out.push(Diagnostic::warning(format!(
                "presentation_version {other} is not interpreted"
            )));
            None
        }
    };
    if let Some((what, limits)) = limits {
        let entry = match mdcompat {
            7 => Diagnostic::normal(format!("{what}=Unrestricted")),
            v if (v as usize) < limits.len() => {
                Diagnostic::normal(format!("{what}={}", limits[v as usize]))
            }
            v if v < 7 => Diagnostic::warning(format!("{what}=Reserved ({v})")),
            v => Diagnostic::error(format!("invalid mdcompat value ({v})")),
        };
        out.push(entry);
    }

    let coding = CodingParameters::audio(parts[0].to_ascii_lowercase());
    push_term(&mut out, classifier, &coding);
    out
}

/// MPEG-H profile-level indications: (value, mode, level)
const MPEGH_LEVELS: &[(u32, &str, &str)] = &[
    (0x0b, "LC", "1"),
    (0x0c, "LC", "2"),
    (0x0d, "LC", "3"),
    (0x10, "BL", "1"),
    (0x11, "BL", "2"),
    (0x12, "BL", "3"),
];

/// `mhm1.0x0D` / `mhm2.0x11`
pub fn decode_mpegh(component: &str, classifier: &Classifier) -> Vec<Diagnostic> {
    let parts = fields(component);
    if parts.len() != 2 {
        return vec![Diagnostic::error(
            "MPEG-H audio requires a profile-level-id",
        )];
    }

    let raw = parts[1];
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    let found = parse_hex(digits)
        .and_then(|v| MPEGH_LEVELS.iter().find(|(value, _, _)| *value == v));
    let Some(&(_, mode, level)) = found else {
        return vec![Diagnostic::error(format!("invalid level ({raw})"))];
    };

    let codec = parts[0].to_ascii_lowercase();
    let mut text = format!("{mode} Profile Level {level}");
    if codec == "mhm2" {
        text.push_str(", multi-stream");
    }
    let mut out = vec![Diagnostic::normal(text)];

    let coding = CodingParameters::audio(codec)
        .with_mode(mode)
        .with_level(level);
    push_term(&mut out, classifier, &coding);
    out
}
