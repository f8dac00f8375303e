//! HEVC/H.265 (`hvc1.1.6.L93.B0`)
//!
//! Layout: `<4cc>.[A|B|C]<profile_idc>.<compatibility flags>.<L|H><level>`
//! followed by one to six constraint octets. The profile may be signalled
//! by `profile_idc` or by a bit of the 32-bit compatibility mask, and the
//! meaning of several constraint bits depends on which profile matched.

use crate::bits::{bit_set_32, BitList, BitListBuilder};
use crate::classify::Classifier;
use crate::constants::{HEVC_CONSTRAINT_BYTES, HEVC_MAX_PARTS, HEVC_MIN_PARTS};
use crate::profile::{level_name, tier_name, LevelTable, ProfileRule, ProfileTable};
use crate::types::{CodingParameters, Diagnostic};
use crate::validate::{fields, is_hex, parse_decimal, parse_hex, show_bit, split_letter};

use super::push_term;

/// General profiles; compatibility flag `j` signals profile `j`
pub const PROFILES: ProfileTable = ProfileTable::new(
    "hevc profiles",
    &[
        ProfileRule::new(1, 1, "Main"),
        ProfileRule::new(2, 2, "Main 10"),
        ProfileRule::new(3, 3, "Main Still Picture"),
        ProfileRule::new(4, 4, "Range Extensions"),
        ProfileRule::new(5, 5, "High Throughput"),
        ProfileRule::new(6, 6, "Multiview Main"),
        ProfileRule::new(7, 7, "Scalable Main"),
        ProfileRule::new(8, 8, "3D Main"),
        ProfileRule::new(9, 9, "Screen Content Coding"),
        ProfileRule::new(10, 10, "Multiview"),
        ProfileRule::new(11, 11, "High Throughput Screen Content Coding"),
        ProfileRule::new(12, 12, "Multiview extended"),
        ProfileRule::new(13, 13, "Multiview extended 10"),
    ],
);

const LEVELS: LevelTable = &[
    (30, "1"),
    (60, "2"),
    (63, "2.1"),
    (90, "3"),
    (93, "3.1"),
    (120, "4"),
    (123, "4.1"),
    (150, "5"),
    (153, "5.1"),
    (156, "5.2"),
    (180, "6"),
    (183, "6.1"),
    (186, "6.2"),
];

/// Profiles carrying the format range extension constraint flags
const RANGE_EXTENSION_FAMILY: &[u32] = &[4, 5, 6, 7, 8, 9, 10, 11];

/// Profiles that additionally carry the 14-bit constraint flag
const HIGH_BIT_DEPTH_FAMILY: &[u32] = &[5, 9, 10, 11];

/// Profiles carrying `general_inbld_flag`
const INBLD_FAMILY: &[u32] = &[1, 2, 3, 4, 5, 9, 11];

const MAIN_10: u32 = 2;
const SCALABLE_MAIN: u32 = 7;

/// Legacy bit positions (1 = LSB of the last constraint octet)
const PROGRESSIVE_SOURCE: usize = 48;
const INTERLACED_SOURCE: usize = 47;
const NON_PACKED: usize = 46;
const FRAME_ONLY: usize = 45;
const MAX_8BIT: usize = 42;
const ONE_PICTURE_ONLY: usize = 37;
const MAX_14BIT: usize = 35;
const INBLD: usize = 1;

/// Format range extension flags from bit 44 down
const RANGE_EXTENSION_FLAGS: &[(usize, &str)] = &[
    (44, "general_max_12bit_constraint_flag"),
    (43, "general_max_10bit_constraint_flag"),
    (MAX_8BIT, "general_max_8bit_constraint_flag"),
    (41, "general_max_422chroma_constraint_flag"),
    (40, "general_max_420chroma_constraint_flag"),
    (39, "general_max_monochrome_constraint_flag"),
    (38, "general_intra_constraint_flag"),
    (ONE_PICTURE_ONLY, "general_one_picture_only_constraint_flag"),
    (36, "general_lower_bit_rate_constraint_flag"),
];

/// True if any of `family` is signalled by `idc` or by its mask bit
fn in_family(family: &[u32], idc: u32, mask: u32) -> bool {
    family.iter().any(|&p| p == idc || bit_set_32(mask, p))
}

/// Split `[A|B|C]<digits>` into profile space and profile_idc
fn profile_field(field: &str) -> Option<(u32, u32)> {
    let (space, digits) = match split_letter(field) {
        Some((letter, rest)) => {
            let space = match letter.to_ascii_uppercase() {
                'A' => 1,
                'B' => 2,
                'C' => 3,
                _ => return None,
            };
            (space, rest)
        }
        None => (0, field),
    };
    parse_decimal(digits).map(|idc| (space, idc))
}

struct Fields<'a> {
    codec: &'a str,
    space: u32,
    idc: u32,
    mask: u32,
    tier: char,
    level: u32,
    constraints: BitList,
}

/// Arity and character-class checks; all problems at once
fn parse(component: &str) -> Result<Fields<'_>, Vec<Diagnostic>> {
    let parts = fields(component);
    if parts.len() < HEVC_MIN_PARTS {
        return Err(vec![Diagnostic::error(format!(
            "HEVC codec requires at least {HEVC_MIN_PARTS} parts"
        ))]);
    }
    if parts.len() > HEVC_MAX_PARTS {
        return Err(vec![Diagnostic::error(format!(
            "HEVC codec allows at most {HEVC_MAX_PARTS} parts"
        ))]);
    }

    let mut errors = Vec::new();

    let profile = profile_field(parts[1]);
    if profile.is_none() {
        errors.push(Diagnostic::error(format!(
            "general_profile_idc not expressed as [A|B|C]<decimal> ({})",
            parts[1]
        )));
    }

    let mask = parse_hex(parts[2]).filter(|_| parts[2].len() <= 8);
    if mask.is_none() {
        errors.push(Diagnostic::error(format!(
            "general_profile_compatibility_flag not expressed in hexadecimal ({})",
            parts[2]
        )));
    }

    let tier_level = split_letter(parts[3])
        .and_then(|(tier, digits)| parse_decimal(digits).map(|level| (tier, level)));
    if tier_level.is_none() {
        errors.push(Diagnostic::error(format!(
            "tier and level not expressed as <letter><decimal> ({})",
            parts[3]
        )));
    }

    let mut builder = BitListBuilder::with_capacity(HEVC_CONSTRAINT_BYTES);
    for i in 0..HEVC_CONSTRAINT_BYTES {
        let octet = match parts.get(i + 4) {
            // an empty octet reads as zero
            Some(field) if field.is_empty() => 0,
            Some(field) if field.len() <= 2 && is_hex(field) => parse_hex(field).unwrap_or(0),
            Some(field) => {
                errors.push(Diagnostic::error(format!(
                    "constraint flags not specified in hexadecimal ({field})"
                )));
                0
            }
            None => 0,
        };
        builder.push(octet);
    }

    match (profile, mask, tier_level) {
        (Some((space, idc)), Some(mask), Some((tier, level))) if errors.is_empty() => {
            Ok(Fields {
                codec: parts[0],
                space,
                idc,
                mask,
                tier,
                level,
                constraints: builder.finish(),
            })
        }
        _ => Err(errors),
    }
}

/// Decode an HEVC codec string
pub fn decode(component: &str, classifier: &Classifier) -> Vec<Diagnostic> {
    let f = match parse(component) {
        Ok(f) => f,
        Err(errors) => return errors,
    };
    let flags = &f.constraints;
    let flag = |name: &str, bit: usize| {
        Diagnostic::normal(format!("{name}={}", show_bit(flags.bit_set_legacy(bit))))
    };

    let mut constraints = vec![Diagnostic::informative(format!("constraintFlags={flags}"))];

    let scan = match (
        flags.bit_set_legacy(PROGRESSIVE_SOURCE),
        flags.bit_set_legacy(INTERLACED_SOURCE),
    ) {
        (true, false) => Diagnostic::normal("scan=progressive"),
        (false, true) => Diagnostic::normal("scan=interlaced"),
        (true, true) => Diagnostic::normal("scan=source_scan_type in SEI"),
        (false, false) => Diagnostic::warning("scan=unknown or unspecified"),
    };
    constraints.push(scan);
    constraints.push(flag("general_non_packed_constraint_flag", NON_PACKED));
    constraints.push(flag("general_frame_only_constraint_flag", FRAME_ONLY));

    let mut one_picture_only = false;
    let mut max_8bit = false;

    if in_family(RANGE_EXTENSION_FAMILY, f.idc, f.mask) {
        for &(bit, name) in RANGE_EXTENSION_FLAGS {
            constraints.push(flag(name, bit));
        }
        one_picture_only = flags.bit_set_legacy(ONE_PICTURE_ONLY);
        max_8bit = flags.bit_set_legacy(MAX_8BIT);

        if in_family(HIGH_BIT_DEPTH_FAMILY, f.idc, f.mask) {
            constraints.push(flag("general_max_14bit_constraint_flag", MAX_14BIT));
        }
    } else if in_family(&[MAIN_10], f.idc, f.mask) {
        constraints.push(flag(
            "general_one_picture_only_constraint_flag",
            ONE_PICTURE_ONLY,
        ));
        one_picture_only = flags.bit_set_legacy(ONE_PICTURE_ONLY);
    }

    if in_family(INBLD_FAMILY, f.idc, f.mask) {
        constraints.push(flag("general_inbld_flag", INBLD));
    }

    let mut out = vec![Diagnostic::normal(format!(
        "general_profile_space={}",
        f.space
    ))];
    let mut coding = CodingParameters::video(f.codec.to_ascii_lowercase());

    match PROFILES.resolve(f.idc, f.mask) {
        Some(rule) => {
            let name = match rule.id {
                MAIN_10 if one_picture_only => "Main 10 Still Picture",
                SCALABLE_MAIN if !max_8bit => "Scalable Main 10",
                _ => rule.name,
            };
            out.push(Diagnostic::normal(format!(
                "general_profile_idc={name} ({})",
                rule.id
            )));
            coding = coding.with_profile(rule.name);
        }
        None => out.push(Diagnostic::error(format!(
            "unknown profile ({})",
            f.idc
        ))),
    }

    match tier_name(f.tier) {
        Some(tier) => {
            out.push(Diagnostic::normal(format!(
                "{tier} Tier ({})",
                f.tier.to_ascii_uppercase()
            )));
            coding = coding.with_tier(tier);
        }
        None => out.push(Diagnostic::error(format!("unknown Tier ({})", f.tier))),
    }

    match level_name(LEVELS, f.level) {
        Some(level) => {
            out.push(Diagnostic::normal(format!("Level {level}")));
            coding = coding.with_level(level);
        }
        None => out.push(Diagnostic::error(format!("unknown Level ({})", f.level))),
    }

    out.extend(constraints);
    push_term(&mut out, classifier, &coding);
    out
}
