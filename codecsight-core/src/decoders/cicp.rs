//! ISO/IEC 23091-2 coding-independent code points
//!
//! Only the descriptions are kept; `None` means the value is reserved.

use crate::keyvalue::Presentation;
use crate::types::Diagnostic;

/// Text shown for code points reserved for future use
pub const RESERVED: &str = "Reserved -- For future use by ITU-T | ISO/IEC";

/// ColourPrimaries
pub fn colour_primaries(value: u32) -> Option<&'static str> {
    Some(match value {
        1 => "Rec. ITU-R BT.709-6; IEC 61966-2-1 sRGB or sYCC; IEC 61966-2-4",
        2 => "Unspecified",
        4 => "Rec. ITU-R BT.470-6 System M (historical)",
        5 => "Rec. ITU-R BT.470-6 System B, G (historical); Rec. ITU-R BT.601-7 625",
        6 => "Rec. ITU-R BT.601-7 525; SMPTE ST 170 (2004)",
        7 => "SMPTE ST 240 (1999)",
        8 => "Generic film (colour filters using Illuminant C)",
        9 => "Rec. ITU-R BT.2020-2; Rec. ITU-R BT.2100-2",
        10 => "SMPTE ST 428-1 (2019) (CIE 1931 XYZ)",
        11 => "SMPTE RP 431-2 (2011)",
        12 => "SMPTE EG 432-1 (2010)",
        22 => "No corresponding industry specification identified",
        _ => return None,
    })
}

/// TransferCharacteristics
pub fn transfer_characteristics(value: u32) -> Option<&'static str> {
    Some(match value {
        1 => "Rec. ITU-R BT.709-6",
        2 => "Unspecified",
        4 => "Assumed display gamma 2.2",
        5 => "Assumed display gamma 2.8",
        6 => "Rec. ITU-R BT.601-7 525 or 625",
        7 => "SMPTE ST 240 (1999)",
        8 => "Linear transfer characteristics",
        9 => "Logarithmic transfer characteristic (100:1 range)",
        10 => "Logarithmic transfer characteristic (100 * Sqrt( 10 ) : 1 range)",
        11 => "IEC 61966-2-4",
        12 => "Rec. ITU-R BT.1361-0 extended colour gamut system (historical)",
        13 => "IEC 61966-2-1 sRGB or sYCC",
        14 | 15 => "Rec. ITU-R BT.2020-2",
        16 => "SMPTE ST 2084 (2014); Rec. ITU-R BT.2100-2 perceptual quantization (PQ)",
        17 => "SMPTE ST 428-1 (2019)",
        18 => "ARIB STD-B67 (2018); Rec. ITU-R BT.2100-2 hybrid log-gamma (HLG)",
        _ => return None,
    })
}

/// MatrixCoefficients
pub fn matrix_coefficients(value: u32) -> Option<&'static str> {
    Some(match value {
        0 => "Identity (GBR)",
        1 => "Rec. ITU-R BT.709-6; IEC 61966-2-4 xvYCC709",
        2 => "Unspecified",
        4 => "US FCC Title 47 Code of Federal Regulations (2003) 73.682 (a) (20)",
        5 => "Rec. ITU-R BT.470-6 System B, G (historical); Rec. ITU-R BT.601-7 625",
        6 => "Rec. ITU-R BT.601-7 525; SMPTE ST 170 (2004)",
        7 => "SMPTE ST 240 (1999)",
        8 => "YCgCo",
        9 => "Rec. ITU-R BT.2020-2 (non-constant luminance); Rec. ITU-R BT.2100-2 Y'CbCr",
        10 => "Rec. ITU-R BT.2020-2 (constant luminance)",
        11 => "SMPTE ST 2085 (2015)",
        12 => "Chromaticity-derived non-constant luminance system",
        13 => "Chromaticity-derived constant luminance system",
        14 => "Rec. ITU-R BT.2100-2 ICtCp",
        _ => return None,
    })
}

/// PackedContentInterpretationType
pub fn packed_content_interpretation(value: u32) -> Option<&'static str> {
    Some(match value {
        0 => "Unspecified relationship between the frame packed constituent frames",
        1 => "Left and right views, frame 0 is the left view",
        2 => "Right and left views, frame 0 is the right view",
        _ => return None,
    })
}

/// VideoFramePackingType
pub fn video_frame_packing(value: u32) -> Option<&'static str> {
    Some(match value {
        0 => "checkerboard interleaving",
        1 => "column interleaving",
        2 => "row interleaving",
        3 => "side-by-side",
        4 => "top-bottom",
        5 => "temporal interleaving",
        6 => "2D content, no frame packing",
        _ => return None,
    })
}

/// SampleAspectRatio
pub fn sample_aspect_ratio(value: u32) -> Option<&'static str> {
    Some(match value {
        0 => "Unspecified",
        1 => "1:1",
        2 => "12:11",
        3 => "10:11",
        4 => "16:11",
        5 => "40:33",
        6 => "24:11",
        7 => "20:11",
        8 => "32:11",
        9 => "80:33",
        10 => "18:11",
        11 => "15:11",
        12 => "64:33",
        13 => "160:99",
        14 => "4:3",
        15 => "3:2",
        16 => "2:1",
        255 => "SarWidth : SarHeight",
        _ => return None,
    })
}

/// `N (description)`, or `N` and a reserved-value warning
pub fn present(value: Option<u32>, lookup: fn(u32) -> Option<&'static str>) -> Presentation {
    let Some(v) = value else {
        return Presentation::plain("not set");
    };
    match lookup(v) {
        Some(text) => Presentation::plain(format!("{v} ({text})")),
        None => Presentation::with_note(v.to_string(), Diagnostic::warning(RESERVED)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_values() {
        assert!(colour_primaries(3).is_none());
        assert!(transfer_characteristics(0).is_none());
        assert!(matrix_coefficients(3).is_none());
        assert!(sample_aspect_ratio(17).is_none());
        assert_eq!(sample_aspect_ratio(14), Some("4:3"));
    }

    #[test]
    fn test_present() {
        assert_eq!(
            present(Some(9), colour_primaries),
            Presentation::plain("9 (Rec. ITU-R BT.2020-2; Rec. ITU-R BT.2100-2)")
        );
        assert_eq!(
            present(Some(3), matrix_coefficients).note,
            Some(Diagnostic::warning(RESERVED))
        );
        assert_eq!(present(None, colour_primaries).text, "not set");
    }
}
