use serde::{Deserialize, Serialize};

/// A finalized subtitle entry: a time range plus one or two display lines.
///
/// Cues carry no index of their own; encoders number them as they write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    /// Start time in milliseconds.
    pub start: u64,
    /// End time in milliseconds. Always greater than `start` for cues produced by this crate.
    pub end: u64,
    /// Display lines, in order.
    pub lines: Vec<String>,
}

impl Cue {
    pub fn new(start: u64, end: u64, lines: Vec<String>) -> Self {
        Self { start, end, lines }
    }

    pub fn duration_ms(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// The cue text with lines joined by a single space.
    pub fn text(&self) -> String {
        self.lines.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_joins_lines_with_spaces() {
        let cue = Cue::new(
            1_000,
            2_500,
            vec!["first half,".to_owned(), "second half".to_owned()],
        );
        assert_eq!(cue.text(), "first half, second half");
        assert_eq!(cue.duration_ms(), 1_500);
    }
}
