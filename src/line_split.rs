//! Laying out a cue's words on one or two display lines.
//!
//! Two-line cues are split at a word boundary close to the middle of the text so both lines
//! read at a similar length. Inside a small window around the middle, a boundary right after
//! clause punctuation (`,` `;` `:` `.` `?` `!`) wins over a plain word boundary.

use crate::opts::SegmentationOpts;
use crate::token::Token;

/// Characters taken by `words` joined with single spaces.
pub(crate) fn joined_len(words: &[Token]) -> usize {
    let chars: usize = words.iter().map(Token::char_len).sum();
    chars + words.len().saturating_sub(1)
}

pub(crate) fn join_words(words: &[Token]) -> String {
    let mut out = String::with_capacity(joined_len(words));
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(word.word());
    }
    out
}

/// Whether `words` can be laid out within `max_lines` lines of `max_chars_per_line`.
///
/// Greedy wrapping uses the fewest lines possible, so if it overflows no layout fits.
pub fn fits(words: &[Token], opts: &SegmentationOpts) -> bool {
    let max = opts.max_chars_per_line;
    let mut lines = 0usize;
    let mut current = 0usize;

    for word in words {
        let len = word.char_len();
        if len > max {
            return false;
        }
        if lines == 0 || current.saturating_add(1 + len) > max {
            lines += 1;
            current = len;
        } else {
            current += 1 + len;
        }
    }

    lines <= opts.max_lines
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    /// Number of words on the first line.
    at: usize,
    /// Distance of the break from the middle of the text, in characters.
    distance: usize,
    fits: bool,
    clause: bool,
    lonely_zero_duration: bool,
}

/// Lay out a cue's words as display lines.
///
/// Returns a single line when the text fits, or when it can't be split (one word, or
/// `max_lines == 1`). Otherwise returns two lines split per the module rules.
pub fn layout_lines(words: &[Token], opts: &SegmentationOpts) -> Vec<String> {
    let total = joined_len(words);
    if total <= opts.max_chars_per_line || opts.max_lines < 2 || words.len() < 2 {
        return vec![join_words(words)];
    }

    let at = choose_split(words, total, opts);
    vec![join_words(&words[..at]), join_words(&words[at..])]
}

fn choose_split(words: &[Token], total: usize, opts: &SegmentationOpts) -> usize {
    let mid = total / 2;
    let max = opts.max_chars_per_line;

    let candidates: Vec<SplitCandidate> = (1..words.len())
        .map(|at| {
            let (head, tail) = words.split_at(at);
            let left = joined_len(head);
            let right = joined_len(tail);
            let last = &head[at - 1];
            SplitCandidate {
                at,
                distance: left.abs_diff(mid),
                fits: left <= max && right <= max,
                // Punctuation on a zero-duration token is not evidence of a clause break.
                clause: last.ends_clause() && !last.is_zero_duration(),
                lonely_zero_duration: head.iter().all(Token::is_zero_duration)
                    || tail.iter().all(Token::is_zero_duration),
            }
        })
        .collect();

    let tolerance = opts.line_split_tolerance_chars;
    nearest(&candidates, |c| {
        c.fits && !c.lonely_zero_duration && c.clause && c.distance <= tolerance
    })
    .or_else(|| nearest(&candidates, |c| c.fits && !c.lonely_zero_duration))
    .or_else(|| nearest(&candidates, |c| c.fits))
    .or_else(|| nearest(&candidates, |_| true))
    // `words.len() >= 2` guarantees at least one candidate.
    .unwrap_or(1)
}

fn nearest(
    candidates: &[SplitCandidate],
    keep: impl Fn(&SplitCandidate) -> bool,
) -> Option<usize> {
    candidates
        .iter()
        .filter(|&c| keep(c))
        .min_by_key(|c| c.distance)
        .map(|c| c.at)
}
