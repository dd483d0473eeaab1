//! Byte ranges into the (repaired) BPMN source.

use std::ops::Range;

/// A half-open byte range into the source text.
///
/// Spans always index the text *after* attribute quote repair, which is the
/// text the XML parser saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a range
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Converts a 1-based row/column position, as reported by the XML
    /// parser, into a one-character span.
    ///
    /// Columns count characters, not bytes. Positions past the end of the
    /// text clamp to an empty span at the end.
    pub fn from_row_col(source: &str, row: u32, col: u32) -> Self {
        let mut offset = 0;
        let mut lines = source.split_inclusive('\n');
        for _ in 1..row {
            match lines.next() {
                Some(line) => offset += line.len(),
                None => return Self::new(source.len()..source.len()),
            }
        }

        let line = lines.next().unwrap_or("");
        let column = col.saturating_sub(1) as usize;
        match line.char_indices().nth(column) {
            Some((index, ch)) => {
                let start = offset + index;
                Self::new(start..start + ch.len_utf8())
            }
            None => {
                let start = (offset + line.len()).min(source.len());
                Self::new(start..start)
            }
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}
