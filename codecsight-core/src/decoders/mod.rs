//! Codec decoders and the default registry
//!
//! Every decoder is a plain function `fn(&str, &Classifier) -> Vec<Diagnostic>`
//! that receives the whole component (`hvc1.1.6.L93.B0`) and never fails:
//! problems are reported as [`Diagnostic::Error`] entries.

pub mod audio;
pub mod av1;
pub mod avc;
pub mod cicp;
pub mod evc;
pub mod hevc;
pub mod lcevc;
pub mod vp9;
pub mod vvc;

use crate::classify::Classifier;
use crate::registry::Registry;
use crate::render;
use crate::types::{CodingParameters, Diagnostic};
use crate::Result;

/// Check every static decoder table for duplicate keys, bits and ids
pub fn validate_tables() -> Result<()> {
    hevc::PROFILES.validate()?;
    vvc::PROFILES.validate()?;
    vvc::validate_constraints(vvc::GENERAL_CONSTRAINTS)?;
    evc::KEYS.validate()?;
    lcevc::KEYS.validate()?;
    Ok(())
}

/// Registry with every shipped decoder, in a fixed order
///
/// Fails if any decoder table is inconsistent.
pub fn default_registry() -> Result<Registry> {
    validate_tables()?;

    let mut builder = Registry::builder();
    builder
        .register(
            &["avc1", "avc2", "avc3", "avc4"],
            "AVC/H.264",
            avc::decode,
            Some(render::simple),
        )
        .register(&["mvc1", "mvc2"], "Multiview Coding", avc::decode, None)
        .register(&["svc1"], "Scalable Video Coding", avc::decode, None)
        .register(&["hev1", "hvc1"], "HEVC/H.265", hevc::decode, None)
        .register_label_only(&["lhv1"], "Layered HEVC")
        .register(
            &["vvc1", "vvi1"],
            "MPEG Versatile Video Coding",
            vvc::decode,
            None,
        )
        .register_label_only(&["vvcN"], "VVC non-VCL track")
        .register_label_only(&["vvs1"], "VVC subpicture track")
        .register(
            &["evc1"],
            "MPEG Essential Video Coding",
            evc::decode,
            Some(render::tabular),
        )
        .register(
            &["lvc1"],
            "MPEG Low Complexity Enhancement Video Coding",
            lcevc::decode,
            Some(render::tabular),
        )
        .register(&["vp09"], "VP9", vp9::decode, Some(render::tabular))
        .register(
            &["av01"],
            "AOMedia Video 1",
            av1::decode,
            Some(render::tabular),
        )
        .register(&["mp4a"], "MPEG-4 Audio", audio::decode_mp4a, None)
        .register(&["ec-3"], "Enhanced AC-3", audio::decode_eac3, None)
        .register(
            &["ac-4"],
            "Digital Audio Compression (AC-4)",
            audio::decode_ac4,
            None,
        )
        .register(&["mhm1", "mhm2"], "MPEG-H Audio", audio::decode_mpegh, None);

    Ok(builder.build())
}

/// Append the classification term for `params`, if there is one
pub(crate) fn push_term(
    out: &mut Vec<Diagnostic>,
    classifier: &Classifier,
    params: &CodingParameters,
) {
    if let Some(term) = classifier.classify(params) {
        out.push(Diagnostic::cross_reference(term));
    }
}
