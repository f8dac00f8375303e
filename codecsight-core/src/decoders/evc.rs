//! MPEG-5 Essential Video Coding (`evc1.vprf1.vlev51.vbit00`)
//!
//! Every field is an optional `<key><value>` token. The report always lists
//! the whole key table, followed by one line per coding tool of the toolset
//! words.

use crate::bits::bit_set_32;
use crate::classify::Classifier;
use crate::keyvalue::{KeySpec, KeyTable, Pattern, Presentation};
use crate::profile::{level_name, LevelTable};
use crate::types::{CodingParameters, Diagnostic};
use crate::validate::{fields, show_bit};

use super::cicp;
use super::push_term;

const PROFILE: &str = "vprf";
const LEVEL: &str = "vlev";
const TOOLSET_HIGH: &str = "vtoh";
const TOOLSET_LOW: &str = "vtol";

const BASELINE: u32 = 0;

const PROFILES: [&str; 4] = [
    "Baseline profile",
    "Main profile",
    "Baseline Still Picture profile",
    "Main Still Picture profile",
];

const LEVELS: LevelTable = &[
    (10, "1"),
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

/// Coding tools, by bit of the toolset words
const TOOLS: [&str; 21] = [
    "sps_btt_flag",
    "sps_suco_flag",
    "sps_amvr_flag",
    "sps_mmvd_flag",
    "sps_affine_flag",
    "sps_dmvr_flag",
    "sps_alf_flag",
    "sps_admvp_flag",
    "sps_eipd_flag",
    "sps_adcc_flag",
    "sps_ibc_flag",
    "sps_iqt_flag",
    "sps_htdf_flag",
    "sps_addb_flag",
    "sps_cm_init_flag",
    "sps_ats_flag",
    "sps_rpl_flag",
    "sps_pocs_flag",
    "sps_dquant_flag",
    "sps_dra_flag",
    "sps_hmvp_flag",
];

fn not_set(value: Option<u32>, text: &str) -> Result<u32, Presentation> {
    value.ok_or_else(|| Presentation::plain(text))
}

fn present_profile(value: Option<u32>) -> Presentation {
    let v = match not_set(value, "not set") {
        Ok(v) => v,
        Err(p) => return p,
    };
    match PROFILES.get(v as usize) {
        Some(name) => Presentation::plain(format!("{v} ({name})")),
        None => Presentation::with_note(
            v.to_string(),
            Diagnostic::error(format!("invalid profile ({v})")),
        ),
    }
}

fn present_level(value: Option<u32>) -> Presentation {
    let v = match not_set(value, "not set") {
        Ok(v) => v,
        Err(p) => return p,
    };
    match level_name(LEVELS, v) {
        Some(name) => Presentation::plain(format!("{v} (Level {name})")),
        None => Presentation::with_note(
            v.to_string(),
            Diagnostic::error(format!("invalid level ({v})")),
        ),
    }
}

fn present_toolset(value: Option<u32>) -> Presentation {
    Presentation::plain(format!("0x{:06x}", value.unwrap_or(0)))
}

fn present_bit_depth(value: Option<u32>) -> Presentation {
    let v = value.unwrap_or(0);
    Presentation::plain(format!(
        "{v:02} (luma={}bit, chroma={}bit)",
        v / 10 + 8,
        v % 10 + 8
    ))
}

fn present_chroma(value: Option<u32>) -> Presentation {
    let v = value.unwrap_or(0);
    Presentation::plain(format!("{v:03} ({}:{}:{})", v / 100, v / 10 % 10, v % 10))
}

fn present_number(value: Option<u32>) -> Presentation {
    match value {
        Some(v) => Presentation::plain(v.to_string()),
        None => Presentation::plain("not set"),
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

fn present_sample_aspect(value: Option<u32>) -> Presentation {
    cicp::present(value, cicp::sample_aspect_ratio)
}

fn present_frame_packing(value: Option<u32>) -> Presentation {
    let v = match not_set(value, "no frame packing is used") {
        Ok(v) => v,
        Err(p) => return p,
    };
    let (quincunx, packing) = (v / 10, v % 10);
    match cicp::video_frame_packing(packing) {
        Some(text) => Presentation::plain(format!(
            "{v:02} (QuincunxSamplingFlag={quincunx}, VideoFramePackingType={text})"
        )),
        None => Presentation::with_note(
            format!("{v:02} (QuincunxSamplingFlag={quincunx})"),
            Diagnostic::warning(cicp::RESERVED),
        ),
    }
}

fn present_packed_content(value: Option<u32>) -> Presentation {
    match value {
        None => Presentation::plain("packed content is not used"),
        some => cicp::present(some, cicp::packed_content_interpretation),
    }
}

const SPECS: &[KeySpec] = &[
    KeySpec {
        key: PROFILE,
        label: "Profile",
        default: Some(1),
        pattern: Pattern::DIGITS,
        present: present_profile,
    },
    KeySpec {
        key: LEVEL,
        label: "Level",
        default: Some(51),
        pattern: Pattern::DIGITS,
        present: present_level,
    },
    KeySpec {
        key: TOOLSET_HIGH,
        label: "Toolset High",
        default: Some(0x1f_ffff),
        pattern: Pattern::Hex { width: 6 },
        present: present_toolset,
    },
    KeySpec {
        key: TOOLSET_LOW,
        label: "Toolset Low",
        default: Some(0),
        pattern: Pattern::Hex { width: 6 },
        present: present_toolset,
    },
    KeySpec {
        key: "vbit",
        label: "Bit Depth",
        default: Some(0),
        pattern: Pattern::digits(2),
        present: present_bit_depth,
    },
    KeySpec {
        key: "vcss",
        label: "Chroma Subsampling",
        default: Some(420),
        pattern: Pattern::digits(3),
        present: present_chroma,
    },
    KeySpec {
        key: "vcpr",
        label: "Colour Primaries",
        default: Some(1),
        pattern: Pattern::digits(2),
        present: present_primaries,
    },
    KeySpec {
        key: "vtrc",
        label: "Transfer Characteristics",
        default: Some(1),
        pattern: Pattern::digits(2),
        present: present_transfer,
    },
    KeySpec {
        key: "vmac",
        label: "Matrix Coefficients",
        default: Some(1),
        pattern: Pattern::digits(2),
        present: present_matrix,
    },
    KeySpec {
        key: "vfrf",
        label: "Full Range Flag",
        default: Some(1),
        pattern: Pattern::Choice(&["0", "1"]),
        present: present_number,
    },
    KeySpec {
        key: "vfpq",
        label: "Frame Packing Type",
        default: None,
        pattern: Pattern::Decimal {
            width: Some(2),
            max: Some(19),
        },
        present: present_frame_packing,
    },
    KeySpec {
        key: "vpci",
        label: "Packed Content Interpretation",
        default: None,
        pattern: Pattern::digits(1),
        present: present_packed_content,
    },
    KeySpec {
        key: "vsar",
        label: "Sample Aspect Ratio",
        default: Some(1),
        pattern: Pattern::digits(2),
        present: present_sample_aspect,
    },
];

/// EVC key table
pub const KEYS: KeyTable = KeyTable::new("evc keys", SPECS);

fn toolset_report(high: u32, low: u32, profile: Option<u32>) -> Vec<Diagnostic> {
    let mut out = Vec::with_capacity(TOOLS.len());
    for (bit, tool) in (0u32..).zip(TOOLS) {
        let (h, l) = (bit_set_32(high, bit), bit_set_32(low, bit));
        out.push(Diagnostic::informative(format!(
            "{tool} [h:{} l:{}]",
            show_bit(h),
            show_bit(l)
        )));
        if profile == Some(BASELINE) && (h || l) {
            out.push(Diagnostic::error(format!(
                "{tool} must be 0 for {}",
                PROFILES[BASELINE as usize]
            )));
        }
    }
    out
}

/// Decode an EVC codec string
pub fn decode(component: &str, classifier: &Classifier) -> Vec<Diagnostic> {
    let parts = fields(component);
    let parsed = KEYS.parse(&parts[1..]);
    let mut out = parsed.report();

    let profile = parsed.value(PROFILE);
    out.extend(toolset_report(
        parsed.value(TOOLSET_HIGH).unwrap_or(0),
        parsed.value(TOOLSET_LOW).unwrap_or(0),
        profile,
    ));

    let mut coding = CodingParameters::video(parts[0].to_ascii_lowercase());
    if let Some(name) = profile.and_then(|p| PROFILES.get(p as usize)) {
        coding = coding.with_profile(*name);
    }
    if let Some(level) = parsed.value(LEVEL).and_then(|l| level_name(LEVELS, l)) {
        coding = coding.with_level(level);
    }
    push_term(&mut out, classifier, &coding);
    out
}
