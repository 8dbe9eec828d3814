//! Post-processing of cue timing: duration floor and minimum gaps.
//!
//! Both passes walk the cues in order and only ever touch neighbouring cues, so they preserve
//! the number and order of cues.

use tracing::debug;

use crate::cue::Cue;
use crate::opts::SegmentationOpts;

/// Extend cues shorter than `min_cue_duration_ms`.
///
/// Must run before [`enforce_gaps`], while every cue still starts at its first token's start.
/// A cue never grows past `next.start - min_gap_ms`; the last cue grows freely. Cues are
/// never shortened here.
pub fn normalize_durations(cues: &mut [Cue], opts: &SegmentationOpts) {
    for i in 0..cues.len() {
        let next_start = cues.get(i + 1).map(|next| next.start);
        let cue = &mut cues[i];
        if cue.duration_ms() >= opts.min_cue_duration_ms {
            continue;
        }

        let wanted = cue.start.saturating_add(opts.min_cue_duration_ms);
        let ceiling = next_start.map_or(wanted, |s| s.saturating_sub(opts.min_gap_ms));
        let end = cue.end.max(wanted.min(ceiling));
        if end != cue.end {
            debug!(cue = i, from = cue.end, to = end, "extended short cue");
            cue.end = end;
        }
    }
}

/// Make every consecutive pair of cues at least `min_gap_ms` apart.
///
/// The earlier cue's end is pulled back first. It never drops below `start + 1`; when that floor
/// binds, the later cue is pushed forward instead, keeping its duration. Times saturate at
/// `u64::MAX` rather than wrapping.
pub fn enforce_gaps(cues: &mut [Cue], opts: &SegmentationOpts) {
    let gap = opts.min_gap_ms;

    for i in 0..cues.len() {
        let (head, tail) = cues.split_at_mut(i + 1);
        let cur = &mut head[i];

        // Only cues built purely from zero-duration tokens can get here with no length.
        if cur.end <= cur.start {
            cur.end = cur.start.saturating_add(1);
        }

        let Some(next) = tail.first_mut() else {
            break;
        };
        if next.start >= cur.end.saturating_add(gap) {
            continue;
        }

        let floor = cur.start.saturating_add(1);
        let target = next.start.saturating_sub(gap);
        if next.start >= gap && target >= floor {
            debug!(cue = i, from = cur.end, to = target, "shrank cue to keep gap");
            cur.end = target;
            continue;
        }

        cur.end = floor;
        let shifted = floor.saturating_add(gap);
        let delta = shifted.saturating_sub(next.start);
        debug!(
            cue = i + 1,
            from = next.start,
            to = shifted,
            "shifted cue to keep gap"
        );
        // Move the whole cue so it keeps its duration; later pairs absorb the shift.
        next.start = shifted;
        next.end = next.end.saturating_add(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(start: u64, end: u64) -> Cue {
        Cue::new(start, end, vec!["x".to_owned()])
    }

    fn opts(min_cue_duration_ms: u64, min_gap_ms: u64) -> SegmentationOpts {
        SegmentationOpts {
            min_cue_duration_ms,
            min_gap_ms,
            ..Default::default()
        }
    }

    fn spans(cues: &[Cue]) -> Vec<(u64, u64)> {
        cues.iter().map(|c| (c.start, c.end)).collect()
    }

    #[test]
    fn short_cue_extends_up_to_next_start_minus_gap() {
        let mut cues = vec![cue(0, 300), cue(800, 2_000)];
        normalize_durations(&mut cues, &opts(1_000, 100));
        assert_eq!(spans(&cues), vec![(0, 700), (800, 2_000)]);
    }

    #[test]
    fn short_cue_extends_fully_when_room() {
        let mut cues = vec![cue(0, 300), cue(5_000, 6_000)];
        normalize_durations(&mut cues, &opts(1_000, 100));
        assert_eq!(spans(&cues), vec![(0, 1_000), (5_000, 6_000)]);
    }

    #[test]
    fn last_cue_extends_freely() {
        let mut cues = vec![cue(10_000, 10_200)];
        normalize_durations(&mut cues, &opts(1_500, 100));
        assert_eq!(spans(&cues), vec![(10_000, 11_500)]);
    }

    #[test]
    fn normalization_never_shortens() {
        let mut cues = vec![cue(0, 300), cue(320, 2_000)];
        normalize_durations(&mut cues, &opts(1_000, 100));
        assert_eq!(spans(&cues), vec![(0, 300), (320, 2_000)]);
    }

    #[test]
    fn gap_enforcement_shrinks_previous_end() {
        let mut cues = vec![cue(0, 1_000), cue(1_050, 2_000)];
        enforce_gaps(&mut cues, &opts(0, 100));
        assert_eq!(spans(&cues), vec![(0, 950), (1_050, 2_000)]);
    }

    #[test]
    fn gap_enforcement_shifts_next_start_when_clamped() {
        let mut cues = vec![cue(1_000, 1_040), cue(1_040, 1_100), cue(1_150, 3_000)];
        enforce_gaps(&mut cues, &opts(0, 100));
        assert_eq!(spans(&cues), vec![(1_000, 1_001), (1_101, 1_102), (1_202, 3_052)]);
    }

    #[test]
    fn zero_length_cue_gets_one_millisecond() {
        let mut cues = vec![cue(500, 500)];
        enforce_gaps(&mut cues, &opts(0, 100));
        assert_eq!(spans(&cues), vec![(500, 501)]);
    }

    #[test]
    fn huge_gap_saturates_instead_of_overflowing() {
        let mut cues = vec![cue(0, 500), cue(600, 900)];
        let o = opts(1_000, u64::MAX);
        normalize_durations(&mut cues, &o);
        enforce_gaps(&mut cues, &o);
        assert_eq!(spans(&cues), vec![(0, 1), (u64::MAX, u64::MAX)]);
    }

    #[test]
    fn huge_duration_floor_saturates() {
        let mut cues = vec![cue(u64::MAX - 10, u64::MAX - 5)];
        normalize_durations(&mut cues, &opts(u64::MAX, 100));
        assert_eq!(spans(&cues), vec![(u64::MAX - 10, u64::MAX)]);
    }
}
