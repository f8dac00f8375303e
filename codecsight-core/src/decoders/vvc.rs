//! VVC/H.266 (`vvc1.1.L51.CQA.O1+3`)
//!
//! Layout: `<4cc>.<profile_idc>.<L|H><op_level_idc>` followed, in this order,
//! by optional `.C<base32 constraint info>`, `.S<hex>[+<hex>]*` sub-profiles
//! and `.O<OlsIdx>[+<MaxTid>]`.

use crate::bits::BitList;
use crate::classify::Classifier;
use crate::error::CodecError;
use crate::profile::{level_name, tier_name, LevelTable, ProfileRule, ProfileTable};
use crate::types::{CodingParameters, Diagnostic};
use crate::validate::{decode_base32, fields, is_decimal, is_hex, parse_decimal, show_bit};
use crate::Result;

use super::push_term;

/// Grammar shown when a codec string does not match it
pub const FORMAT: &str = "<sample entry 4CC>.<general_profile_idc>.[LH]<op_level_idc>\
{.C<general_constraint_info>}{.S<general_sub_profile_idc>}{.O{<OlsIdx>}{+<MaxTid>}}";

/// General profiles; VVC has no compatibility mask
pub const PROFILES: ProfileTable = ProfileTable::new(
    "vvc profiles",
    &[
        ProfileRule::id_only(1, "Main 10"),
        ProfileRule::id_only(65, "Main 10 Still Picture"),
        ProfileRule::id_only(33, "Main 10 4:4:4"),
        ProfileRule::id_only(97, "Main 10 4:4:4 Still Picture"),
        ProfileRule::id_only(17, "Multilayer Main 10"),
        ProfileRule::id_only(49, "Multilayer Main 10 4:4:4"),
    ],
);

const LEVELS: LevelTable = &[
    (16, "1.0"),
    (32, "2.0"),
    (35, "2.1"),
    (48, "3.0"),
    (51, "3.1"),
    (64, "4.0"),
    (67, "4.1"),
    (80, "5.0"),
    (83, "5.1"),
    (86, "5.2"),
    (96, "6.0"),
    (99, "6.1"),
    (102, "6.2"),
];

/// A field of `general_constraint_info`, at a canonical bit position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintField {
    /// First bit (0 = MSB of the first octet)
    pub bit: usize,
    /// Number of bits; 1 for a flag
    pub width: usize,
    /// Syntax element name
    pub name: &'static str,
}

const fn flag(bit: usize, name: &'static str) -> ConstraintField {
    ConstraintField { bit, width: 1, name }
}

const fn field(bit: usize, width: usize, name: &'static str) -> ConstraintField {
    ConstraintField { bit, width, name }
}

const GCI_PRESENT: ConstraintField = flag(0, "gci_present_flag");

/// Layout of `general_constraint_info` after `gci_present_flag`
pub const GENERAL_CONSTRAINTS: &[ConstraintField] = &[
    flag(1, "gci_intra_only_constraint_flag"),
    flag(2, "gci_all_layers_independent_constraint_flag"),
    flag(3, "gci_one_au_only_constraint_flag"),
    field(4, 4, "gci_sixteen_minus_max_bitdepth_constraint_idc"),
    field(8, 2, "gci_three_minus_max_chroma_format_constraint_idc"),
    flag(10, "gci_no_mixed_nalu_types_in_pic_constraint_flag"),
    flag(11, "gci_no_trail_constraint_flag"),
    flag(12, "gci_no_stsa_constraint_flag"),
    flag(13, "gci_no_rasl_constraint_flag"),
    flag(14, "gci_no_radl_constraint_flag"),
    flag(15, "gci_no_idr_constraint_flag"),
    flag(16, "gci_no_cra_constraint_flag"),
    flag(17, "gci_no_gdr_constraint_flag"),
    flag(18, "gci_no_aps_constraint_flag"),
    flag(19, "gci_no_idr_rpl_constraint_flag"),
    flag(20, "gci_one_tile_per_pic_constraint_flag"),
    flag(21, "gci_pic_header_in_slice_header_constraint_flag"),
    flag(22, "gci_one_slice_per_pic_constraint_flag"),
    flag(23, "gci_no_rectangular_slice_constraint_flag"),
    flag(24, "gci_one_slice_per_subpic_constraint_flag"),
    flag(25, "gci_no_subpic_info_constraint_flag"),
    field(26, 2, "gci_three_minus_max_log2_ctu_size_constraint_idc"),
    flag(28, "gci_no_partition_constraints_override_constraint_flag"),
    flag(29, "gci_no_mtt_constraint_flag"),
    flag(30, "gci_no_qtbtt_dual_tree_intra_constraint_flag"),
    flag(31, "gci_no_palette_constraint_flag"),
    flag(32, "gci_no_ibc_constraint_flag"),
    flag(33, "gci_no_isp_constraint_flag"),
    flag(34, "gci_no_mrl_constraint_flag"),
    flag(35, "gci_no_mip_constraint_flag"),
    flag(36, "gci_no_cclm_constraint_flag"),
    flag(37, "gci_no_ref_pic_resampling_constraint_flag"),
    flag(38, "gci_no_res_change_in_clvs_constraint_flag"),
    flag(39, "gci_no_weighted_prediction_constraint_flag"),
    flag(40, "gci_no_ref_wraparound_constraint_flag"),
    flag(41, "gci_no_temporal_mvp_constraint_flag"),
    flag(42, "gci_no_sbtmvp_constraint_flag"),
    flag(43, "gci_no_amvr_constraint_flag"),
    flag(44, "gci_no_bdof_constraint_flag"),
    flag(45, "gci_no_smvd_constraint_flag"),
    flag(46, "gci_no_dmvr_constraint_flag"),
    flag(47, "gci_no_mmvd_constraint_flag"),
    flag(48, "gci_no_affine_motion_constraint_flag"),
    flag(49, "gci_no_prof_constraint_flag"),
    flag(50, "gci_no_bcw_constraint_flag"),
    flag(51, "gci_no_ciip_constraint_flag"),
    flag(52, "gci_no_gpm_constraint_flag"),
    flag(53, "gci_no_luma_transform_size_64_constraint_flag"),
    flag(54, "gci_no_transform_skip_constraint_flag"),
    flag(55, "gci_no_bdpcm_constraint_flag"),
    flag(56, "gci_no_mts_constraint_flag"),
    flag(57, "gci_no_lfnst_constraint_flag"),
    flag(58, "gci_no_joint_cbcr_constraint_flag"),
    flag(59, "gci_no_sbt_constraint_flag"),
    flag(60, "gci_no_act_constraint_flag"),
    flag(61, "gci_no_explicit_scaling_list_constraint_flag"),
    flag(62, "gci_no_dep_quant_constraint_flag"),
    flag(63, "gci_no_sign_data_hiding_constraint_flag"),
    flag(64, "gci_no_cu_qp_delta_constraint_flag"),
    flag(65, "gci_no_chroma_qp_offset_constraint_flag"),
    flag(66, "gci_no_sao_constraint_flag"),
    flag(67, "gci_no_alf_constraint_flag"),
    flag(68, "gci_no_ccalf_constraint_flag"),
    flag(69, "gci_no_lmcs_constraint_flag"),
    flag(70, "gci_no_ladf_constraint_flag"),
    flag(71, "gci_no_virtual_boundaries_constraint_flag"),
    field(72, 8, "gci_num_reserved_bits"),
];

/// Reject constraint layouts where two fields share a bit
pub fn validate_constraints(table: &'static [ConstraintField]) -> Result<()> {
    let all = || std::iter::once(&GCI_PRESENT).chain(table.iter());
    for (i, a) in all().enumerate() {
        for b in all().skip(i + 1) {
            let overlap = a.bit < b.bit + b.width && b.bit < a.bit + a.width;
            if overlap {
                return Err(CodecError::DuplicateBit {
                    table: "vvc general_constraint_info",
                    bit: a.bit.max(b.bit),
                    first: a.name,
                    second: b.name,
                });
            }
        }
    }
    Ok(())
}

fn constraint_report(info: &BitList, table: &[ConstraintField]) -> Vec<Diagnostic> {
    let present = info.bit_set(GCI_PRESENT.bit);
    let mut out = vec![
        Diagnostic::informative(info.to_hex()),
        Diagnostic::informative(info.to_bit_string()),
        Diagnostic::normal(format!("{}={}", GCI_PRESENT.name, show_bit(present))),
    ];
    if !present {
        return out;
    }
    for c in table {
        if c.width > 1 {
            out.push(Diagnostic::normal(format!(
                "{}={}",
                c.name,
                info.value(c.bit, c.width)
            )));
        } else if info.bit_set(c.bit) {
            out.push(Diagnostic::normal(c.name));
        }
    }
    out
}

/// Optional trailing parts, in grammar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Optional {
    Constraints,
    SubProfiles,
    OutputLayers,
}

struct Parsed<'a> {
    codec: &'a str,
    profile: u32,
    tier: char,
    level: u32,
    constraints: Option<BitList>,
    sub_profiles: Vec<u32>,
    ols: Option<(&'a str, Option<&'a str>)>,
}

fn is_base32(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphabetic() || (b'2'..=b'7').contains(&b))
}

fn parse(component: &str) -> Option<Parsed<'_>> {
    let parts = fields(component);
    if parts.len() < 3 {
        return None;
    }

    let profile = parse_decimal(parts[1])?;
    let (tier, level) = {
        let mut chars = parts[2].chars();
        let tier = chars.next().filter(|c| matches!(c, 'L' | 'H'))?;
        (tier, parse_decimal(chars.as_str())?)
    };

    let mut parsed = Parsed {
        codec: parts[0],
        profile,
        tier,
        level,
        constraints: None,
        sub_profiles: Vec::new(),
        ols: None,
    };

    let mut last: Option<Optional> = None;
    for part in &parts[3..] {
        let (tag, body) = part.split_at(part.chars().next()?.len_utf8());
        let kind = match tag {
            "C" => Optional::Constraints,
            "S" => Optional::SubProfiles,
            "O" => Optional::OutputLayers,
            _ => return None,
        };
        if last.is_some_and(|prev| prev >= kind) {
            return None;
        }
        last = Some(kind);

        match kind {
            Optional::Constraints => {
                if !is_base32(body) {
                    return None;
                }
                parsed.constraints = Some(BitList::from_octets(&decode_base32(body)?));
            }
            Optional::SubProfiles => {
                for value in body.split('+') {
                    if value.len() > 2 || !is_hex(value) {
                        return None;
                    }
                    parsed.sub_profiles.push(u32::from_str_radix(value, 16).ok()?);
                }
            }
            Optional::OutputLayers => {
                let (ols, tid) = match body.split_once('+') {
                    Some((ols, tid)) => (ols, Some(tid)),
                    None => (body, None),
                };
                if !is_decimal(ols) || tid.is_some_and(|t| !is_decimal(t)) {
                    return None;
                }
                parsed.ols = Some((ols, tid));
            }
        }
    }
    Some(parsed)
}

/// Decode a VVC codec string
pub fn decode(component: &str, classifier: &Classifier) -> Vec<Diagnostic> {
    let Some(p) = parse(component) else {
        return vec![
            Diagnostic::error("codec string does not match the expected format"),
            Diagnostic::error(FORMAT),
        ];
    };

    let mut out = Vec::new();
    let mut coding = CodingParameters::video(p.codec.to_ascii_lowercase());

    match PROFILES.resolve(p.profile, 0) {
        Some(rule) => {
            out.push(Diagnostic::normal(format!(
                "profile={} ({})",
                rule.name, rule.id
            )));
            coding = coding.with_profile(rule.name);
        }
        None => out.push(Diagnostic::error(format!(
            "unknown Profile ({})",
            p.profile
        ))),
    }

    if let Some(tier) = tier_name(p.tier) {
        out.push(Diagnostic::normal(format!("{tier} Tier ({})", p.tier)));
        coding = coding.with_tier(tier);
    }

    match level_name(LEVELS, p.level) {
        Some(level) => {
            out.push(Diagnostic::normal(format!("Level {level}")));
            coding = coding.with_level(level);
        }
        None => out.push(Diagnostic::error(format!("unknown Level ({})", p.level))),
    }

    if let Some(info) = &p.constraints {
        out.extend(constraint_report(info, GENERAL_CONSTRAINTS));
    }

    for (i, sub) in p.sub_profiles.iter().enumerate() {
        out.push(Diagnostic::normal(format!("Sub profile ({})={sub}", i + 1)));
    }

    if let Some((ols, tid)) = p.ols {
        out.push(Diagnostic::normal(format!(
            "Output Layer Set index (OlsIdx)={ols}"
        )));
        if let Some(tid) = tid {
            out.push(Diagnostic::normal(format!(
                "Maximum Temporal Id (MaxTid)={tid}"
            )));
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
    fn test_profile_tier_level() {
        assert_eq!(
            run("vvc1.1.L51"),
            vec![
                Diagnostic::normal("profile=Main 10 (1)"),
                Diagnostic::normal("Main Tier (L)"),
                Diagnostic::normal("Level 3.1"),
            ]
        );
        let out = run("vvi1.65.H102");
        assert_eq!(out[0], Diagnostic::normal("profile=Main 10 Still Picture (65)"));
        assert_eq!(out[1], Diagnostic::normal("High Tier (H)"));
        assert_eq!(out[2], Diagnostic::normal("Level 6.2"));
    }

    #[test]
    fn test_unknown_profile_and_level() {
        let out = run("vvc1.2.L52");
        assert_eq!(out[0], Diagnostic::error("unknown Profile (2)"));
        assert_eq!(out[2], Diagnostic::error("unknown Level (52)"));
    }

    #[test]
    fn test_constraint_info() {
        // "QA" decodes to 0x80: gci_present_flag only
        let out = run("vvc1.1.L51.CQA");
        assert_eq!(out[3], Diagnostic::informative("80"));
        assert_eq!(out[4], Diagnostic::informative("10000000"));
        assert_eq!(out[5], Diagnostic::normal("gci_present_flag=1"));
        assert!(out.contains(&Diagnostic::normal(
            "gci_sixteen_minus_max_bitdepth_constraint_idc=0"
        )));
        assert!(out.contains(&Diagnostic::normal("gci_num_reserved_bits=0")));
        assert!(!out.contains(&Diagnostic::normal("gci_intra_only_constraint_flag")));

        // "YA" decodes to 0xc0: intra only as well
        let out = run("vvc1.1.L51.CYA");
        assert!(out.contains(&Diagnostic::normal("gci_intra_only_constraint_flag")));
    }

    #[test]
    fn test_constraint_info_without_present_flag() {
        let out = run("vvc1.1.L51.CAA");
        assert_eq!(out.len(), 6);
        assert_eq!(out[5], Diagnostic::normal("gci_present_flag=0"));
    }

    #[test]
    fn test_sub_profiles_and_output_layers() {
        let out = run("vvc1.1.L51.S1F+02.O1+3");
        assert_eq!(
            &out[3..],
            &[
                Diagnostic::normal("Sub profile (1)=31"),
                Diagnostic::normal("Sub profile (2)=2"),
                Diagnostic::normal("Output Layer Set index (OlsIdx)=1"),
                Diagnostic::normal("Maximum Temporal Id (MaxTid)=3"),
            ]
        );
    }

    #[test]
    fn test_mismatch_reports_format() {
        for bad in [
            "vvc1.1",
            "vvc1.x.L51",
            "vvc1.1.X51",
            "vvc1.1.L51.O1.CQA",
            "vvc1.1.L51.C1",
            "vvc1.1.L51.S123",
            "vvc1.1.L51.Q1",
        ] {
            assert_eq!(
                run(bad),
                vec![
                    Diagnostic::error("codec string does not match the expected format"),
                    Diagnostic::error(FORMAT),
                ],
                "{bad}"
            );
        }
    }

    #[test]
    fn test_constraint_layout_has_no_shared_bits() {
        assert!(validate_constraints(GENERAL_CONSTRAINTS).is_ok());

        const SHARED: &[ConstraintField] = &[
            flag(58, "gci_no_joint_cbcr_constraint_flag"),
            flag(58, "gci_no_sbt_constraint_flag"),
        ];
        assert_eq!(
            validate_constraints(SHARED),
            Err(CodecError::DuplicateBit {
                table: "vvc general_constraint_info",
                bit: 58,
                first: "gci_no_joint_cbcr_constraint_flag",
                second: "gci_no_sbt_constraint_flag",
            })
        );
    }
}
