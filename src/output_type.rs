#[cfg(feature = "cli")]
use clap::ValueEnum;

/// The supported output formats for encoded cues.
///
/// Each variant maps to a concrete `CueEncoder` implementation. With the `cli` feature the enum
/// doubles as a `clap` value, so `--output-type srt|vtt|json` parses straight into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
pub enum OutputType {
    /// SubRip subtitles.
    #[default]
    Srt,

    /// WebVTT subtitles.
    Vtt,

    /// Cues as a JSON array.
    Json,
}

impl OutputType {
    /// Conventional file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Json => "json",
        }
    }
}
