use crate::{Error, Result};

/// Split milliseconds into `(hours, minutes, seconds, millis)` with integer arithmetic.
fn split_ms(total_ms: u64) -> (u64, u64, u64, u64) {
    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    (h, m, s, ms)
}

/// Format milliseconds as an SRT timestamp (`HH:MM:SS,mmm`).
pub fn format_srt(total_ms: u64) -> String {
    let (h, m, s, ms) = split_ms(total_ms);
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// Format milliseconds as a WebVTT timestamp (`HH:MM:SS.mmm`).
pub fn format_vtt(total_ms: u64) -> String {
    let (h, m, s, ms) = split_ms(total_ms);
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) back into milliseconds.
///
/// A `.` is accepted in place of the comma since hand-edited files often mix them up.
pub fn parse_srt(s: &str) -> Result<u64> {
    let bad = || Error::msg(format!("malformed timestamp '{s}'"));

    let (hms, ms) = s.trim().split_once([',', '.']).ok_or_else(bad)?;
    let mut parts = hms.split(':');
    let (Some(h), Some(m), Some(sec), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(bad());
    };

    let field = |v: &str, max: Option<u64>| -> Result<u64> {
        if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let n: u64 = v.parse().map_err(|_| bad())?;
        match max {
            Some(max) if n > max => Err(bad()),
            _ => Ok(n),
        }
    };

    if ms.len() != 3 {
        return Err(bad());
    }

    let h = field(h, None)?;
    let m = field(m, Some(59))?;
    let sec = field(sec, Some(59))?;
    let ms = field(ms, None)?;

    h.checked_mul(60)
        .and_then(|v| v.checked_add(m))
        .and_then(|v| v.checked_mul(60))
        .and_then(|v| v.checked_add(sec))
        .and_then(|v| v.checked_mul(1000))
        .and_then(|v| v.checked_add(ms))
        .ok_or_else(bad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srt_timestamps_are_zero_padded() {
        assert_eq!(format_srt(0), "00:00:00,000");
        assert_eq!(format_srt(1_500), "00:00:01,500");
        assert_eq!(format_srt(61_234), "00:01:01,234");
        assert_eq!(format_srt(3_723_004), "01:02:03,004");
    }

    #[test]
    fn hours_grow_past_two_digits() {
        assert_eq!(format_srt(100 * 3_600_000), "100:00:00,000");
    }

    #[test]
    fn vtt_uses_a_dot() {
        assert_eq!(format_vtt(61_234), "00:01:01.234");
    }

    #[test]
    fn parse_inverts_format() -> anyhow::Result<()> {
        for ms in [0, 1, 999, 1_500, 59_999, 3_723_004, 360_000_000] {
            assert_eq!(parse_srt(&format_srt(ms))?, ms);
        }
        assert_eq!(parse_srt("00:00:01.500")?, 1_500);
        Ok(())
    }

    #[test]
    fn parse_rejects_garbage() {
        for s in ["", "0:0:1.5", "00:00:01", "00:61:00,000", "aa:00:00,000", "00:00:00:00,000"] {
            assert!(parse_srt(s).is_err(), "{s} should not parse");
        }
    }

    #[test]
    fn parse_rejects_hours_that_overflow() -> anyhow::Result<()> {
        assert!(parse_srt("99999999999999999:00:00,000").is_err());
        let max_hours = u64::MAX / 3_600_000;
        assert_eq!(parse_srt(&format!("{max_hours}:00:00,000"))?, max_hours * 3_600_000);
        Ok(())
    }
}
