use std::io::Write;

use crate::cue::Cue;
use crate::cue_encoder::CueEncoder;
use crate::srt_encoder::check_cue;
use crate::timestamp::format_vtt;
use crate::{Error, Result};

/// A `CueEncoder` that writes cues in WebVTT format.
///
/// Design:
/// - We stream output directly to a `Write` implementation.
/// - We write the WebVTT header lazily on the first cue so that:
///   - callers can construct the encoder without immediately writing output
///   - even "no cues" runs still behave predictably (close just flushes)
pub struct VttEncoder<W: Write> {
    /// The underlying writer we stream VTT into.
    w: W,

    /// Number of cues written; used to label the next cue and to report back.
    written: usize,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> VttEncoder<W> {
    /// Create a new VTT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            written: 0,
            closed: false,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Write the WebVTT header if we haven't written it yet.
    fn start_if_needed(&mut self) -> Result<()> {
        if self.written == 0 {
            // WebVTT files begin with a mandatory header line followed by a blank line.
            self.w.write_all(b"WEBVTT\n\n")?;
        }
        Ok(())
    }
}

impl<W: Write> CueEncoder for VttEncoder<W> {
    /// Write a single cue in WebVTT format.
    fn write_cue(&mut self, cue: &Cue) -> Result<()> {
        if self.closed {
            return Err(Error::msg("cannot write cue: encoder is already closed"));
        }
        check_cue(self.written + 1, cue)?;

        self.start_if_needed()?;

        // WebVTT timestamps use `HH:MM:SS.mmm`.
        let start = format_vtt(cue.start);
        let end = format_vtt(cue.end);

        // Optional cue identifier, numbered like SRT so the two outputs line up.
        writeln!(&mut self.w, "{}", self.written + 1)?;
        writeln!(&mut self.w, "{start} --> {end}")?;
        for line in &cue.lines {
            writeln!(&mut self.w, "{line}")?;
        }

        // Blank line separates cues.
        writeln!(&mut self.w)?;

        self.written += 1;
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
