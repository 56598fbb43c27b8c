//! Line preprocessor: joins backslash-continued physical lines into
//! logical lines.
//!
//! A physical line whose last character is `\` continues on the next
//! one. The marker is stripped and the following lines are appended
//! verbatim until one does not end in `\`. An empty line stops the
//! join without being consumed; empty lines never produce a logical
//! line of their own.

use crate::token::Position;

/// Continuation marker.
const CONTINUATION: char = '\\';

/// One physical line's share of a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Physical line index.
    pub line: usize,
    /// Column in the joined text where this line's content begins.
    pub start: usize,
}

/// A continuation-joined run of physical lines, scanned as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Joined text, continuation markers removed.
    pub text: String,
    /// Index of the first physical line of the join.
    pub line: usize,
    /// Physical lines that make up `text`, in order.
    pub segments: Vec<Segment>,
}

impl LogicalLine {
    fn single(line: usize, text: &str) -> Self {
        Self {
            text: text.to_owned(),
            line,
            segments: vec![Segment { line, start: 0 }],
        }
    }

    /// Coarse position of `column`: the first physical line, with the
    /// column counted in the joined text.
    #[must_use]
    pub const fn position(&self, column: usize) -> Position {
        Position::new(self.line, column)
    }

    /// Map a column of the joined text back to the physical line and
    /// column it came from.
    #[must_use]
    pub fn locate(&self, column: usize) -> Position {
        self.segments
            .iter()
            .rfind(|seg| seg.start <= column)
            .map_or_else(
                || self.position(column),
                |seg| Position::new(seg.line, column - seg.start),
            )
    }
}

/// Iterate over the logical lines of `lines`.
///
/// `lines` must not carry line terminators.
pub fn logical_lines<S: AsRef<str>>(lines: &[S]) -> LogicalLines<'_, S> {
    LogicalLines { lines, next: 0 }
}

/// Iterator returned by [`logical_lines`].
#[derive(Debug)]
pub struct LogicalLines<'a, S> {
    lines: &'a [S],
    next: usize,
}

impl<S: AsRef<str>> Iterator for LogicalLines<'_, S> {
    type Item = LogicalLine;

    fn next(&mut self) -> Option<LogicalLine> {
        loop {
            let index = self.next;
            let first = self.lines.get(index)?.as_ref();
            self.next += 1;

            if first.is_empty() {
                continue;
            }

            let Some(head) = first.strip_suffix(CONTINUATION) else {
                return Some(LogicalLine::single(index, first));
            };

            let mut text = head.to_owned();
            let mut segments = vec![Segment {
                line: index,
                start: 0,
            }];
            let mut start = head.chars().count();

            while let Some(raw) = self.lines.get(self.next) {
                let raw = raw.as_ref();
                if raw.is_empty() {
                    break;
                }
                segments.push(Segment {
                    line: self.next,
                    start,
                });
                self.next += 1;

                if let Some(body) = raw.strip_suffix(CONTINUATION) {
                    text.push_str(body);
                    start += body.chars().count();
                } else {
                    text.push_str(raw);
                    break;
                }
            }

            return Some(LogicalLine {
                text,
                line: index,
                segments,
            });
        }
    }
}
