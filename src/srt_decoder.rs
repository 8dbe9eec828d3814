//! Reading SubRip text back into cues.
//!
//! Used to re-time or re-check existing `.srt` files and to verify our own output. Block
//! numbers in the file are ignored; cues come back in file order.

use crate::cue::Cue;
use crate::timestamp::parse_srt;
use crate::{Error, Result};

/// Parse SRT text into cues.
///
/// Tolerates a UTF-8 BOM, `\r\n` line endings, missing block numbers and extra blank lines
/// between blocks. Errors name the 1-based block that failed.
pub fn decode(text: &str) -> Result<Vec<Cue>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut cues = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !block.is_empty() {
                cues.push(decode_block(cues.len() + 1, &block)?);
                block.clear();
            }
            continue;
        }
        block.push(line);
    }
    if !block.is_empty() {
        cues.push(decode_block(cues.len() + 1, &block)?);
    }

    Ok(cues)
}

fn decode_block(number: usize, block: &[&str]) -> Result<Cue> {
    let mut lines = block.iter().copied();

    let mut timing = lines
        .next()
        .ok_or_else(|| Error::invalid_input(number, "empty block"))?;
    if !timing.contains("-->") {
        // Block number; its value carries no meaning for us.
        timing = lines
            .next()
            .ok_or_else(|| Error::invalid_input(number, "block has no timing line"))?;
    }

    let (start, end) = timing.split_once("-->").ok_or_else(|| {
        Error::invalid_input(number, format!("expected a timing line, found {timing:?}"))
    })?;
    // Anything after the end timestamp (position hints) is ignored.
    let end = end.split_whitespace().next().unwrap_or_default();

    let start = parse_srt(start).map_err(|e| Error::invalid_input(number, e.to_string()))?;
    let end = parse_srt(end).map_err(|e| Error::invalid_input(number, e.to_string()))?;

    let text: Vec<String> = lines.map(str::to_owned).collect();
    if text.is_empty() {
        return Err(Error::invalid_input(number, "block has no text"));
    }

    Ok(Cue::new(start, end, text))
}
