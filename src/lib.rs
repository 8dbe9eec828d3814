//! `cuecraft` — turn word-level transcripts into readable, well-timed subtitles.
//!
//! This crate provides:
//! - Token validation and loading (`token`)
//! - The segmentation engine that groups tokens into cues (`segmenter`, `line_split`, `timing`)
//! - Pluggable output encoders (SRT, WebVTT, JSON) and an SRT decoder
//!
//! Everything here is synchronous and pure over its inputs: no global state, no I/O beyond the
//! writers and readers callers hand in. Transcription itself happens elsewhere; we start from a
//! fully materialized token list.

// High-level API (most consumers should start here).
pub mod opts;
pub mod pipeline;

// Data model.
pub mod cue;
pub mod token;

// Segmentation engine.
pub mod line_split;
pub mod segmenter;
pub mod timing;

// Output selection and encoder interfaces.
pub mod cue_encoder;
pub mod output_type;
pub mod timestamp;

// Encoders (and the one decoder) for concrete formats.
pub mod json_array_encoder;
pub mod srt_decoder;
pub mod srt_encoder;
pub mod vtt_encoder;

// Logging configuration for binaries.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use crate::cue::Cue;
pub use crate::error::{Error, Result};
pub use crate::opts::SegmentationOpts;
pub use crate::output_type::OutputType;
pub use crate::pipeline::{write_cues, write_subtitles};
pub use crate::segmenter::segment;
pub use crate::srt_decoder::decode as decode_srt;
pub use crate::srt_encoder::encode as encode_srt;
pub use crate::token::Token;

#[cfg(feature = "logging")]
pub use crate::logging::init as init_logging;
