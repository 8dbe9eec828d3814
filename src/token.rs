use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single timed word produced by a transcription source.
///
/// Field names follow the word lists most speech-to-text services return
/// (`{"text": "...", "start": 120, "end": 480, ...}`), so those payloads deserialize as-is.
/// Unknown fields such as `confidence` or `speaker` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token text, possibly carrying punctuation attached by the source.
    pub text: String,
    /// Start time in milliseconds.
    pub start: u64,
    /// End time in milliseconds.
    pub end: u64,
}

impl Token {
    pub fn new(text: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// The token text without surrounding whitespace.
    ///
    /// Some sources prefix words with a space; cues always join words with exactly one.
    pub fn word(&self) -> &str {
        self.text.trim()
    }

    /// Number of printable characters in [`Token::word`].
    pub fn char_len(&self) -> usize {
        self.word().chars().count()
    }

    pub fn is_zero_duration(&self) -> bool {
        self.start == self.end
    }

    /// Whether the word ends with a strong sentence terminator (`.`, `?`, `!`).
    pub fn ends_sentence(&self) -> bool {
        self.word().ends_with(['.', '?', '!'])
    }

    /// Whether the word ends with clause punctuation, which makes a good line break.
    pub fn ends_clause(&self) -> bool {
        self.word().ends_with([',', ';', ':', '.', '?', '!'])
    }
}

/// Reject malformed token sequences before any segmentation work starts.
///
/// Zero-duration tokens (`start == end`) are accepted; everything else must satisfy
/// `start < end` and arrive in non-decreasing `start` order. A token's trimmed text must not
/// contain line breaks or other control characters.
pub fn validate_tokens(tokens: &[Token]) -> Result<()> {
    if tokens.is_empty() {
        return Err(Error::NoTokens);
    }

    let mut prev_start = 0u64;
    for (index, token) in tokens.iter().enumerate() {
        if token.word().is_empty() {
            return Err(Error::invalid_input(index, "token text is empty"));
        }

        // A line break inside a word would end the subtitle block early. Surrounding whitespace
        // is trimmed away anyway.
        if token.word().chars().any(char::is_control) {
            return Err(Error::invalid_input(
                index,
                format!("token {:?} contains a line break or control character", token.word()),
            ));
        }

        if token.end < token.start {
            return Err(Error::invalid_input(
                index,
                format!(
                    "token '{}' ends before it starts ({} < {})",
                    token.word(),
                    token.end,
                    token.start
                ),
            ));
        }

        if token.start < prev_start {
            return Err(Error::invalid_input(
                index,
                format!(
                    "token '{}' starts at {} which is before the previous start {}",
                    token.word(),
                    token.start,
                    prev_start
                ),
            ));
        }
        prev_start = token.start;
    }

    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TokenDocument {
    Words(Vec<Token>),
    Transcript { words: Vec<Token> },
}

/// Read a token list from JSON.
///
/// Accepts either a bare array of tokens or a transcript object carrying a `words` array.
/// Negative timestamps fail here, since the fields are unsigned.
pub fn load_tokens_json<R: Read>(r: R) -> Result<Vec<Token>> {
    let doc: TokenDocument = serde_json::from_reader(r)?;
    let tokens = match doc {
        TokenDocument::Words(words) => words,
        TokenDocument::Transcript { words } => words,
    };
    Ok(tokens)
}
