use tracing::trace;

use crate::ast::RawMatch;
use crate::config::Delimiters;
use crate::error::MarkerError;

/// Finds `open ... close` spans in a bound buffer.
///
/// Matching is leftmost-first and non-nested: the first `close` after an
/// `open` ends the span, even if another `open` appears in between.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    delimiters: Delimiters,
    text: &'a str,
    cursor: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(delimiters: Delimiters) -> Self {
        Self {
            delimiters,
            text: "",
            cursor: 0,
        }
    }

    /// Attach a buffer and rewind to its start. Any previous scan state is lost.
    pub fn bind(&mut self, text: &'a str) {
        self.text = text;
        self.cursor = 0;
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Next raw span, `Ok(None)` once the buffer is exhausted.
    ///
    /// An unterminated span does not move the cursor, so asking again
    /// yields the same error until the scanner is rebound.
    pub fn next_match(&mut self) -> Result<Option<RawMatch<'a>>, MarkerError> {
        let open = self.delimiters.open();
        let close = self.delimiters.close();

        let Some(start) = find_from(self.text, open, self.cursor) else {
            trace!(target: "placemark::scanner", cursor = self.cursor, "No further markers");
            self.cursor = self.text.len();
            return Ok(None);
        };

        let body_start = start + open.len();
        let Some(close_at) = find_from(self.text, close, body_start) else {
            return Err(MarkerError::UnterminatedMarker {
                position: start,
                close: close.to_string(),
            });
        };

        let end = close_at + close.len();
        self.cursor = end;

        let matched = RawMatch {
            raw_text: &self.text[start..end],
            position: start,
            length: end - start,
        };
        trace!(
            target: "placemark::scanner",
            position = matched.position,
            length = matched.length,
            raw = matched.raw_text,
            "Matched marker span"
        );
        Ok(Some(matched))
    }
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack
        .get(from..)
        .and_then(|rest| rest.find(needle))
        .map(|idx| from + idx)
}
