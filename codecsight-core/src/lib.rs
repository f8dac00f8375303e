//! # Codecsight Core
//!
//! Turns media codec parameter strings (`avc1.64002A`, `hvc1.1.6.L93.B0`,
//! `evc1.vprf1.vlev51`) into ordered diagnostic reports, without touching
//! any media bitstream.
//!
//! ## Modules
//!
//! - `bits`: Bit-addressable buffer for packed constraint flags
//! - `types`: Diagnostic entries and coding parameters
//! - `profile`: Profile lookup with compatibility-bit fallback
//! - `keyvalue`: Order-independent `<key><value>` token parsing
//! - `positional`: Positional fields with defaults
//! - `classify`: Classification of coding parameters into scheme terms
//! - `registry`: Codec identifier to decoder mapping
//! - `dispatch`: Multi-codec input to per-component results
//! - `decoders`: One decoder per codec family
//! - `render`: Plain-text renderers
//!
//! ## Example
//!
//! ```
//! use codecsight_core::{Diagnostic, Engine};
//!
//! let engine = Engine::with_defaults().unwrap();
//! let report = engine.dispatch("avc1.64002A");
//! assert_eq!(report.results[0].label.as_deref(), Some("AVC/H.264"));
//! assert!(report.results[0]
//!     .diagnostics
//!     .contains(&Diagnostic::normal("profile=High (64)")));
//! ```

#![warn(missing_docs)]

pub mod bits;
pub mod classify;
pub mod constants;
pub mod decoders;
pub mod dispatch;
pub mod error;
pub mod keyvalue;
pub mod positional;
pub mod profile;
pub mod registry;
pub mod render;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use bits::{BitList, BitListBuilder};
pub use classify::{ClassificationRule, Classifier, RuleTable};
pub use decoders::default_registry;
pub use dispatch::{ComponentResult, Engine, Report};
pub use error::CodecError;
pub use registry::{DecodeFn, DecoderEntry, Registry, RegistryBuilder};
pub use render::RenderFn;
pub use types::{CodingParameters, Diagnostic, MediaType};

/// Result type alias for Codecsight table construction
pub type Result<T> = core::result::Result<T, CodecError>;
