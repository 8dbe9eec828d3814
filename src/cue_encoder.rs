use crate::Result;
use crate::cue::Cue;

/// A streaming sink for finalized cues.
///
/// Encoders number cues themselves, in the order they are written. Callers own the
/// lifecycle: write every cue, then call `close` once (extra calls are no-ops).
pub trait CueEncoder {
    fn write_cue(&mut self, cue: &Cue) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
