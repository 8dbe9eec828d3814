//! Grouping timed tokens into subtitle cues.
//!
//! We make a single forward pass, growing a buffer of tokens for the cue under construction.
//! Before each token is appended we check whether the buffer should be closed first:
//! - a long pause before the token (silence)
//! - the buffer already ends a sentence and is long enough to stand on its own (sentence)
//! - the token would stretch the cue past the maximum duration (duration)
//! - the token would no longer fit the character budget or the line layout (length)
//!
//! Closed buffers are laid out into lines, then the whole sequence goes through the timing
//! passes in [`crate::timing`].

use std::fmt;

use tracing::{debug, info_span, trace};

use crate::Result;
use crate::cue::Cue;
use crate::line_split::{fits, joined_len, layout_lines};
use crate::opts::SegmentationOpts;
use crate::timing::{enforce_gaps, normalize_durations};
use crate::token::{Token, validate_tokens};

/// Why a cue was closed before the next token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakReason {
    Silence,
    Sentence,
    Duration,
    Length,
}

impl fmt::Display for BreakReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Silence => "silence",
            Self::Sentence => "sentence",
            Self::Duration => "duration",
            Self::Length => "length",
        };
        f.write_str(s)
    }
}

/// Segment a transcript into finalized subtitle cues.
///
/// Options and tokens are validated up front; once that passes, segmentation cannot fail.
/// The returned cues are in temporal order, at least `min_gap_ms` apart, and each holds
/// between one and `max_lines` lines.
pub fn segment(tokens: &[Token], opts: &SegmentationOpts) -> Result<Vec<Cue>> {
    opts.validate()?;
    validate_tokens(tokens)?;

    let span = info_span!("segment", tokens = tokens.len());
    let _enter = span.enter();

    let mut cues = Vec::new();
    let mut first = 0;

    for i in 1..tokens.len() {
        if let Some(reason) = break_reason(&tokens[first..=i], opts) {
            debug!(
                cue = cues.len(),
                at_token = i,
                reason = %reason,
                "closing cue"
            );
            cues.push(build_cue(&tokens[first..i], opts));
            first = i;
        } else {
            trace!(token = i, word = tokens[i].word(), "appended");
        }
    }
    cues.push(build_cue(&tokens[first..], opts));

    normalize_durations(&mut cues, opts);
    enforce_gaps(&mut cues, opts);

    debug!(cues = cues.len(), "segmentation finished");
    Ok(cues)
}

/// Decide whether the buffer (`grown` minus its last element) must close before the candidate
/// (the last element of `grown`) is appended.
///
/// Rules are checked in a fixed precedence so the reported reason is deterministic.
pub(crate) fn break_reason(grown: &[Token], opts: &SegmentationOpts) -> Option<BreakReason> {
    let (candidate, buffer) = grown.split_last()?;
    let (first, last) = (buffer.first()?, buffer.last()?);

    if candidate.start.saturating_sub(last.end) > opts.silence_threshold_ms {
        return Some(BreakReason::Silence);
    }

    if last.ends_sentence() {
        let long_enough =
            last.end.saturating_sub(first.start) >= opts.sentence_break_min_duration_ms;
        let wordy_enough = joined_len(buffer) >= opts.sentence_break_min_chars;
        if long_enough || wordy_enough {
            return Some(BreakReason::Sentence);
        }
    }

    if candidate.end.saturating_sub(first.start) > opts.max_cue_duration_ms {
        return Some(BreakReason::Duration);
    }

    if joined_len(grown) > opts.effective_chars_per_cue() || !fits(grown, opts) {
        return Some(BreakReason::Length);
    }

    None
}

fn build_cue(words: &[Token], opts: &SegmentationOpts) -> Cue {
    let start = words.first().map_or(0, |t| t.start);
    let end = words.last().map_or(start, |t| t.end);
    Cue::new(start, end, layout_lines(words, opts))
}
