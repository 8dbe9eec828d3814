use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Options that control how tokens are grouped into cues and cues into lines.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (services, tests, batch jobs) can construct options programmatically
///
/// Every field has a default, and partial JSON documents fill the rest from [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationOpts {
    /// Maximum characters on a single display line.
    pub max_chars_per_line: usize,

    /// Maximum display lines per cue. Must be 1 or 2.
    pub max_lines: usize,

    /// Maximum characters in a cue's joined text (words separated by single spaces).
    ///
    /// A single token longer than this still becomes its own cue; tokens are never split.
    pub max_chars_per_cue: usize,

    /// A cue closes before a token whose end would stretch it past this duration.
    pub max_cue_duration_ms: u64,

    /// Short cues are extended up to this duration when the timeline allows it.
    pub min_cue_duration_ms: u64,

    /// Minimum silence between the end of one cue and the start of the next.
    pub min_gap_ms: u64,

    /// A pause longer than this between two tokens always starts a new cue.
    pub silence_threshold_ms: u64,

    /// A sentence terminator closes the cue once the cue spans at least this long...
    pub sentence_break_min_duration_ms: u64,

    /// ...or holds at least this many characters.
    pub sentence_break_min_chars: usize,

    /// Distance from the midpoint within which a clause boundary wins over a plain word
    /// boundary when splitting a cue into two lines.
    pub line_split_tolerance_chars: usize,
}

impl Default for SegmentationOpts {
    fn default() -> Self {
        Self {
            max_chars_per_line: 42,
            max_lines: 2,
            max_chars_per_cue: 80,
            max_cue_duration_ms: 7_000,
            min_cue_duration_ms: 1_000,
            min_gap_ms: 100,
            silence_threshold_ms: 700,
            sentence_break_min_duration_ms: 1_000,
            sentence_break_min_chars: 20,
            line_split_tolerance_chars: 8,
        }
    }
}

impl SegmentationOpts {
    /// Reject contradictory or out-of-range settings before any work starts.
    pub fn validate(&self) -> Result<()> {
        if self.max_lines == 0 || self.max_lines > 2 {
            return Err(Error::configuration(
                "max_lines",
                self.max_lines,
                "must be 1 or 2",
            ));
        }
        if self.max_chars_per_line == 0 {
            return Err(Error::configuration(
                "max_chars_per_line",
                self.max_chars_per_line,
                "must be greater than zero",
            ));
        }
        if self.max_chars_per_cue == 0 {
            return Err(Error::configuration(
                "max_chars_per_cue",
                self.max_chars_per_cue,
                "must be greater than zero",
            ));
        }
        if self.max_cue_duration_ms == 0 {
            return Err(Error::configuration(
                "max_cue_duration_ms",
                self.max_cue_duration_ms,
                "must be greater than zero",
            ));
        }
        if self.min_cue_duration_ms > self.max_cue_duration_ms {
            return Err(Error::configuration(
                "min_cue_duration_ms",
                self.min_cue_duration_ms,
                "must not exceed max_cue_duration_ms",
            ));
        }
        Ok(())
    }

    /// The character budget a cue can actually display.
    pub(crate) fn effective_chars_per_cue(&self) -> usize {
        // Two lines lose one joining space to the line break.
        let layout_cap = self
            .max_chars_per_line
            .saturating_mul(self.max_lines)
            .saturating_add(self.max_lines.saturating_sub(1));
        self.max_chars_per_cue.min(layout_cap)
    }
}
