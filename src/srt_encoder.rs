use std::io::Write;

use crate::cue::Cue;
use crate::cue_encoder::CueEncoder;
use crate::timestamp::format_srt;
use crate::{Error, Result};

/// A `CueEncoder` that writes cues in SubRip (`.srt`) format.
///
/// Design:
/// - We stream output directly to a `Write` implementation.
/// - Cue numbers are assigned here, starting at 1, regardless of where the cues came from.
/// - Every block ends with exactly one blank line and all lines end with `\n`.
///
/// Example output:
/// ```text
/// 1
/// 00:00:00,000 --> 00:00:01,000
/// Hello world.
///
/// 2
/// 00:00:03,000 --> 00:00:04,000
/// Next sentence.
///
/// ```
pub struct SrtEncoder<W: Write> {
    /// The underlying writer we stream SRT into.
    w: W,

    /// Number of the next block.
    next_index: usize,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    /// Create a new SRT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            next_index: 1,
            closed: false,
        }
    }

    /// Number of cues written so far.
    pub fn written(&self) -> usize {
        self.next_index - 1
    }
}

impl<W: Write> CueEncoder for SrtEncoder<W> {
    /// Write a single numbered SRT block.
    fn write_cue(&mut self, cue: &Cue) -> Result<()> {
        if self.closed {
            return Err(Error::msg("cannot write cue: encoder is already closed"));
        }
        check_cue(self.next_index, cue)?;

        let start = format_srt(cue.start);
        let end = format_srt(cue.end);

        writeln!(&mut self.w, "{}", self.next_index)?;
        writeln!(&mut self.w, "{start} --> {end}")?;
        for line in &cue.lines {
            writeln!(&mut self.w, "{line}")?;
        }
        // Blank line terminates the block.
        writeln!(&mut self.w)?;

        self.next_index += 1;
        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

/// Blocks are delimited by blank lines, so a cue must not carry empty or multi-line text. A cue
/// must also last at least a millisecond.
pub(crate) fn check_cue(index: usize, cue: &Cue) -> Result<()> {
    if cue.end <= cue.start {
        return Err(Error::invalid_input(
            index,
            format!("cue must end after it starts ({} <= {})", cue.end, cue.start),
        ));
    }
    if cue.lines.is_empty() {
        return Err(Error::invalid_input(index, "cue has no text"));
    }
    if let Some(line) = cue
        .lines
        .iter()
        .find(|line| line.trim().is_empty() || line.contains(['\n', '\r']))
    {
        return Err(Error::invalid_input(
            index,
            format!("cue line {line:?} is blank or spans several lines"),
        ));
    }
    Ok(())
}

/// Serialize a cue sequence as SRT text.
///
/// Fails with [`Error::EmptyInput`] when `cues` is empty. Nothing is returned unless every cue
/// encodes.
pub fn encode(cues: &[Cue]) -> Result<String> {
    if cues.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut out = Vec::new();
    let mut enc = SrtEncoder::new(&mut out);
    for cue in cues {
        enc.write_cue(cue)?;
    }
    enc.close()?;

    Ok(std::str::from_utf8(&out)?.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(start: u64, end: u64, lines: &[&str]) -> Cue {
        Cue::new(start, end, lines.iter().map(|l| (*l).to_owned()).collect())
    }

    #[test]
    fn encode_rejects_empty_input() {
        assert!(matches!(encode(&[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn encode_writes_numbered_blocks() -> anyhow::Result<()> {
        let cues = vec![
            cue(0, 1_000, &["Hello world."]),
            cue(3_000, 4_000, &["Next sentence,", "on two lines."]),
        ];
        let srt = encode(&cues)?;
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:01,000\nHello world.\n\n\
             2\n00:00:03,000 --> 00:00:04,000\nNext sentence,\non two lines.\n\n"
        );
        Ok(())
    }

    #[test]
    fn streaming_encoder_counts_blocks() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.write_cue(&cue(0, 500, &["a"]))?;
        enc.write_cue(&cue(600, 900, &["b"]))?;
        assert_eq!(enc.written(), 2);
        enc.close()?;
        enc.close()?;

        let s = std::str::from_utf8(&out)?;
        assert!(s.starts_with("1\n"));
        assert!(s.contains("\n\n2\n"));
        assert!(!s.ends_with("\n\n\n"));
        Ok(())
    }

    #[test]
    fn write_after_close_errors() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.close()?;
        let err = enc.write_cue(&cue(0, 1_000, &["nope"])).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }

    #[test]
    fn multi_line_text_is_rejected() {
        let err = encode(&[cue(0, 1_000, &["one\ntwo"])]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { index: 1, .. }));

        let err = encode(&[cue(0, 1_000, &[])]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn cue_without_length_is_rejected() {
        let err = encode(&[cue(0, 1_000, &["fine"]), cue(2_000, 2_000, &["flash"])]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { index: 2, .. }));
    }
}
