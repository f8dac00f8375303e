//! Constants shared by the dispatch engine, decoders and renderers

/// Separator between codec strings in a multi-codec input
pub const COMPONENT_SEPARATOR: u8 = b',';

/// Separator between the fields of a single codec string
pub const FIELD_SEPARATOR: u8 = b'.';

/// Width of the key prefix in key=value tokens (`vprf1`, `vlev51`, ...)
pub const KEY_WIDTH: usize = 4;

/// Trailing marker on a classification rule value meaning "prefix match"
pub const WILDCARD: char = '*';

/// Number of constraint bytes carried by an HEVC codec string
pub const HEVC_CONSTRAINT_BYTES: usize = 6;

/// Minimum and maximum number of dot-separated parts in an HEVC codec string
pub const HEVC_MIN_PARTS: usize = 5;

/// See [`HEVC_MIN_PARTS`]
pub const HEVC_MAX_PARTS: usize = HEVC_MIN_PARTS + HEVC_CONSTRAINT_BYTES - 1;

/// DVB video codec classification scheme
pub const DVB_VIDEO_CODEC_CS: &str = "urn:dvb:metadata:cs:VideoCodecCS:2022";

/// Line drawn between components by the plain-text report renderer
pub const REPORT_SEPARATOR: &str = "----";
