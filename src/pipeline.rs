//! High-level entry point: tokens in, subtitle text out.
//!
//! This wires segmentation to an encoder chosen by [`OutputType`]. Segmentation runs to
//! completion before the writer is touched, and the encoded text is handed to the writer in one
//! piece, so a bad transcript, config or cue never leaves a half-written file behind.

use std::io::Write;

use tracing::info;

use crate::cue::Cue;
use crate::cue_encoder::CueEncoder;
use crate::json_array_encoder::JsonArrayEncoder;
use crate::opts::SegmentationOpts;
use crate::output_type::OutputType;
use crate::segmenter::segment;
use crate::srt_encoder::SrtEncoder;
use crate::token::Token;
use crate::vtt_encoder::VttEncoder;
use crate::{Error, Result};

/// Segment `tokens` and stream the cues to `w` in the requested format.
///
/// Returns the number of cues written.
pub fn write_subtitles<W: Write>(
    tokens: &[Token],
    opts: &SegmentationOpts,
    output_type: OutputType,
    w: W,
) -> Result<usize> {
    let cues = segment(tokens, opts)?;
    write_cues(&cues, output_type, w)?;
    info!(
        tokens = tokens.len(),
        cues = cues.len(),
        format = output_type.extension(),
        "subtitles written"
    );
    Ok(cues.len())
}

/// Encode already-built cues to `w`.
///
/// Fails with [`Error::EmptyInput`] when there is nothing to write. Nothing reaches `w` unless
/// every cue encodes.
pub fn write_cues<W: Write>(cues: &[Cue], output_type: OutputType, mut w: W) -> Result<()> {
    if cues.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut buf = Vec::new();

    // We keep this explicit (no trait objects) so each encoder is monomorphized.
    match output_type {
        OutputType::Srt => {
            let mut encoder = SrtEncoder::new(&mut buf);
            let run_res = write_all(cues, &mut encoder);
            merge_run_and_close(run_res, encoder.close())?;
        }
        OutputType::Vtt => {
            let mut encoder = VttEncoder::new(&mut buf);
            let run_res = write_all(cues, &mut encoder);
            merge_run_and_close(run_res, encoder.close())?;
        }
        OutputType::Json => {
            let mut encoder = JsonArrayEncoder::new(&mut buf);
            let run_res = write_all(cues, &mut encoder);
            merge_run_and_close(run_res, encoder.close())?;
        }
    }

    w.write_all(&buf)?;
    w.flush()?;
    Ok(())
}

fn write_all<E: CueEncoder>(cues: &[Cue], encoder: &mut E) -> Result<()> {
    for cue in cues {
        encoder.write_cue(cue)?;
    }
    Ok(())
}

fn merge_run_and_close(run_res: Result<()>, close_res: Result<()>) -> Result<()> {
    match (run_res, close_res) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(close_err)) => Err(close_err),
        // The write error is the root cause; a close failure after it adds nothing.
        (Err(err), _) => Err(err),
    }
}
