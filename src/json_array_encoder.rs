use std::io::Write;

use serde::Serialize;

use crate::Result;
use crate::cue::Cue;
use crate::cue_encoder::CueEncoder;
use crate::srt_encoder::check_cue;

/// A `CueEncoder` that writes cues as a single JSON array.
///
/// Design:
/// - We stream output directly to a `Write` implementation to avoid buffering
///   all cues in memory.
/// - The encoder is stateful so we can emit a well-formed JSON array incrementally.
///
/// Example output:
/// ```json
/// [
///   { "index": 1, "start": 0, "end": 1000, "lines": ["Hello world."] },
///   { "index": 2, "start": 3000, "end": 4000, "lines": ["Next sentence."] }
/// ]
/// ```
pub struct JsonArrayEncoder<W: Write> {
    /// The underlying writer we stream JSON into.
    w: W,

    /// Whether we have written the opening `[` of the JSON array.
    started: bool,

    /// Number of elements written so far; also drives comma placement.
    written: usize,

    /// Whether the encoder has been closed.
    /// Once closed, no further writes are allowed.
    closed: bool,
}

/// Wire shape of one element: the cue plus the number an SRT file would give it.
#[derive(Serialize)]
struct NumberedCue<'a> {
    index: usize,
    #[serde(flatten)]
    cue: &'a Cue,
}

impl<W: Write> JsonArrayEncoder<W> {
    /// Create a new JSON array encoder that writes to the given writer.
    ///
    /// The JSON array is opened lazily on the first write or on close.
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            written: 0,
            closed: false,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Write the opening `[` of the JSON array if we have not already done so.
    ///
    /// We defer writing the opening bracket so that:
    /// - Empty output still results in valid JSON (`[]`)
    /// - We do not emit partial output unless a cue is actually written
    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> CueEncoder for JsonArrayEncoder<W> {
    /// Serialize a single cue and append it to the JSON array.
    fn write_cue(&mut self, cue: &Cue) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write cue: encoder is already closed",
            ));
        }

        check_cue(self.written + 1, cue)?;
        self.start_if_needed()?;

        // Write a comma before every element except the first.
        if self.written > 0 {
            self.w.write_all(b",")?;
        }

        let element = NumberedCue {
            index: self.written + 1,
            cue,
        };
        serde_json::to_writer(&mut self.w, &element)?;
        self.written += 1;

        Ok(())
    }

    /// Finalize the JSON array and flush the underlying writer.
    ///
    /// This method is idempotent:
    /// - Calling `close()` multiple times is safe.
    /// - After closing, no further cues may be written.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        // Ensure we still output a valid JSON array even if no cues were written.
        self.start_if_needed()?;

        self.w.write_all(b"]")?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(start: u64, end: u64, text: &str) -> Cue {
        Cue::new(start, end, vec![text.to_owned()])
    }

    #[test]
    fn json_array_close_without_cues_emits_empty_array() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = JsonArrayEncoder::new(&mut out);
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "[]");
        Ok(())
    }

    #[test]
    fn json_array_writes_valid_json_incrementally() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = JsonArrayEncoder::new(&mut out);

        enc.write_cue(&cue(0, 1_000, "hello"))?;
        enc.write_cue(&cue(1_000, 2_500, "world"))?;
        enc.close()?;

        let s = std::str::from_utf8(&out)?;
        let parsed: serde_json::Value = serde_json::from_str(s)?;
        let arr = parsed.as_array().expect("expected JSON array");
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["index"], 1);
        assert_eq!(arr[0]["lines"][0], "hello");
        assert_eq!(arr[1]["index"], 2);
        assert_eq!(arr[1]["start"], 1_000);
        assert_eq!(arr[1]["end"], 2_500);
        Ok(())
    }

    #[test]
    fn json_array_rejects_cue_without_length() {
        let mut out = Vec::new();
        let mut enc = JsonArrayEncoder::new(&mut out);
        let err = enc.write_cue(&cue(700, 700, "flash")).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(out.is_empty());
    }

    #[test]
    fn json_array_close_is_idempotent() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = JsonArrayEncoder::new(&mut out);
        enc.close()?;
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "[]");
        Ok(())
    }

    #[test]
    fn json_array_write_after_close_errors() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = JsonArrayEncoder::new(&mut out);
        enc.close()?;
        let err = enc.write_cue(&cue(0, 1_000, "nope")).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }
}
