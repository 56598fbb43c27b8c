//! Token recognizer: a per-line scanning state machine.
//!
//! Each logical line is scanned left to right from a cursor. At every
//! cursor position the rules below are tried in order, the first match
//! emits its tokens and moves the cursor:
//!
//! 1. `$` references: `$(x)`, `${x}`, `$x`, and `$$(` subshells.
//! 2. `#` at line start or after whitespace: comment to end of line.
//! 3. Whitespace runs are skipped.
//! 4. Unescaped backtick pairs.
//! 5. Recipe lines (leading tab) never go further than rule 4.
//! 6. `NAME =`, `NAME :=` and `NAME ::=` assignments.
//! 7. Rule target names before the `:`.
//!
//! When nothing matches, the cursor skips ahead to the next `$`,
//! backtick, `#`, `:` or whitespace. Malformed input only ever yields
//! fewer tokens.

use crate::lines::{LogicalLine, logical_lines};
use crate::token::{Position, Token, TokenKind};

/// Recognize every logical line of `lines` with the default settings.
#[must_use]
pub fn recognize<S: AsRef<str>>(lines: &[S]) -> Vec<Token> {
    Recognizer::new().recognize(lines)
}

/// Split `input` into lines and recognize it with the default settings.
#[must_use]
pub fn recognize_str(input: &str) -> Vec<Token> {
    Recognizer::new().recognize_str(input)
}

/// Recognizer configuration.
///
/// ```
/// use makefile_recognizer::Recognizer;
///
/// let tokens = Recognizer::new()
///     .physical_positions(true)
///     .recognize(&["FOO = \\", "$(BAR)"]);
/// assert_eq!(tokens[1].text, "BAR");
/// assert_eq!(tokens[1].position.line, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recognizer {
    physical_positions: bool,
}

impl Recognizer {
    /// Default configuration: positions are reported relative to the
    /// joined logical line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            physical_positions: false,
        }
    }

    /// Report positions on continuation lines against the physical line
    /// they were read from instead of the joined logical line.
    #[must_use]
    pub const fn physical_positions(mut self, enabled: bool) -> Self {
        self.physical_positions = enabled;
        self
    }

    /// Recognize one document given as lines without terminators.
    ///
    /// Tokens come back in discovery order; see
    /// [`sort_by_position`](crate::sort_by_position) for display order.
    #[must_use]
    pub fn recognize<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(lines.len());
        for line in logical_lines(lines) {
            self.recognize_line(&line, &mut tokens);
        }
        tokens
    }

    /// Recognize a whole source string. A leading byte-order mark is
    /// skipped.
    #[must_use]
    pub fn recognize_str(&self, input: &str) -> Vec<Token> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let lines: Vec<&str> = input.lines().collect();
        self.recognize(&lines)
    }

    /// Append the tokens of a single logical line to `out`.
    pub fn recognize_line(&self, line: &LogicalLine, out: &mut Vec<Token>) {
        let first = out.len();
        Scanner::new(&line.text, line.line, out).run();

        if self.physical_positions {
            for token in &mut out[first..] {
                token.position = line.locate(token.position.column);
            }
        }
    }
}

/// Outcome of one dispatch cycle.
enum Step {
    /// Resume dispatch at this column.
    Advance(usize),
    /// Nothing matched; skip ahead starting at this column.
    SkipFrom(usize),
    /// The rest of the line is consumed.
    Stop,
}

/// Latest search for one closing delimiter.
///
/// No unescaped `delim` lies in `from..found`, or in `from..` when
/// nothing was found, so later searches inside that range are answered
/// without rescanning.
#[derive(Debug, Clone, Copy)]
struct Search {
    delim: char,
    from: usize,
    found: Option<usize>,
}

impl Search {
    fn covers(&self, delim: char, from: usize) -> bool {
        self.delim == delim && from >= self.from && self.found.is_none_or(|end| from <= end)
    }
}

struct Scanner<'a> {
    chars: Vec<char>,
    line: usize,
    out: &'a mut Vec<Token>,
    /// Line starts with a tab.
    recipe: bool,
    /// An assignment was already recognized on this line. Only one is
    /// taken per line: in `X = a Y = b` everything after the first
    /// operator is the value.
    assigned: bool,
    /// Last unescaped `=`.
    last_equals: Option<usize>,
    /// The `:` separating rule targets from prerequisites.
    rule_colon: Option<usize>,
    /// Columns below this belong to a backtick or subshell body.
    shell_end: usize,
    /// Column of the latest closing backtick emitted.
    last_backtick_end: Option<usize>,
    /// One cached search per closing delimiter.
    searches: Vec<Search>,
}

impl<'a> Scanner<'a> {
    fn new(text: &str, line: usize, out: &'a mut Vec<Token>) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let recipe = chars.first() == Some(&'\t');
        let last_equals = (0..chars.len())
            .rev()
            .find(|&i| chars[i] == '=' && !escaped(&chars, i));
        let rule_colon = if recipe { None } else { rule_colon(&chars) };

        Self {
            chars,
            line,
            out,
            recipe,
            assigned: false,
            last_equals,
            rule_colon,
            shell_end: 0,
            last_backtick_end: None,
            searches: Vec::new(),
        }
    }

    fn run(mut self) {
        let mut cursor = if self.recipe { self.recipe_prefix() } else { 0 };

        while cursor < self.chars.len() {
            cursor = match self.step(cursor) {
                Step::Advance(next) => next,
                Step::SkipFrom(from) => self.skip_ahead(from),
                Step::Stop => break,
            };
        }
    }

    fn step(&mut self, cursor: usize) -> Step {
        let ch = self.chars[cursor];

        if ch == '$' {
            return self.reference(cursor);
        }
        if ch == '#' && self.at_word_start(cursor) {
            self.emit(TokenKind::Comment, cursor, self.chars.len(), cursor);
            return Step::Stop;
        }
        if ch.is_whitespace() {
            return Step::Advance(self.skip_whitespace(cursor));
        }
        if ch == '`' && !self.is_escaped(cursor) {
            return self.backtick(cursor);
        }
        if self.recipe || cursor < self.shell_end {
            return Step::SkipFrom(cursor + 1);
        }
        if let Some(next) = self.assignment(cursor) {
            return Step::Advance(next);
        }
        if let Some(next) = self.target(cursor) {
            return Step::Advance(next);
        }
        Step::SkipFrom(cursor + 1)
    }

    /// Skip the recipe's leading whitespace and pick up an `@` marker.
    fn recipe_prefix(&mut self) -> usize {
        let cursor = self.skip_whitespace(0);
        if self.peek(cursor) == Some('@') {
            self.emit(TokenKind::NoPrintCmd, cursor, cursor + 1, cursor);
            return cursor + 1;
        }
        cursor
    }

    fn reference(&mut self, cursor: usize) -> Step {
        match self.peek(cursor + 1) {
            Some(open @ ('(' | '{')) => {
                let close = if open == '(' { ')' } else { '}' };
                match self.find_unescaped(close, cursor + 2) {
                    Some(end) => {
                        self.emit(TokenKind::VarName, cursor + 2, end, cursor);
                        Step::Advance(end + 1)
                    }
                    None => Step::Advance(cursor + 2),
                }
            }
            Some('$') => {
                if self.peek(cursor + 2) == Some('(') && !self.is_escaped(cursor) {
                    if let Some(end) = self.find_unescaped(')', cursor + 3) {
                        self.emit(TokenKind::SubshellStart, cursor, cursor + 3, cursor);
                        self.emit(TokenKind::SubshellEnd, end, end + 1, end);
                        self.shell_end = self.shell_end.max(end);
                        return Step::Advance(cursor + 3);
                    }
                }
                // `$$` is a literal dollar.
                Step::SkipFrom(cursor + 2)
            }
            Some(_) => {
                self.emit(TokenKind::VarName, cursor + 1, cursor + 2, cursor);
                Step::Advance(cursor + 2)
            }
            None => Step::SkipFrom(cursor + 1),
        }
    }

    fn backtick(&mut self, cursor: usize) -> Step {
        // Pairs close in column order, so only the latest end can be
        // under the cursor.
        if self.last_backtick_end == Some(cursor) {
            return Step::Advance(cursor + 1);
        }
        if let Some(end) = self.find_unescaped('`', cursor + 1) {
            self.emit(TokenKind::BacktickStart, cursor, cursor + 1, cursor);
            self.emit(TokenKind::BacktickEnd, end, end + 1, end);
            self.last_backtick_end = Some(end);
            self.shell_end = self.shell_end.max(end);
        }
        Step::Advance(cursor + 1)
    }

    /// Emit `NAME` if an assignment operator follows it.
    ///
    /// Returns the column just past the operator.
    fn assignment(&mut self, cursor: usize) -> Option<usize> {
        if self.assigned || !self.last_equals.is_some_and(|eq| eq >= cursor) {
            return None;
        }
        if !self.at_word_start(cursor) {
            return None;
        }

        let (begin, end, next) = self.match_assignment(cursor)?;
        self.emit(TokenKind::Assignment, begin, end, begin);
        self.assigned = true;
        Some(next)
    }

    /// Match `NAME`, optional whitespace, then `=`, `:=` or `::=`.
    fn match_assignment(&self, cursor: usize) -> Option<(usize, usize, usize)> {
        let mut name: Option<(usize, usize)> = None;
        let mut past_name = false;

        for (i, &ch) in self.chars.iter().enumerate().skip(cursor) {
            if ch.is_whitespace() {
                past_name |= name.is_some();
                continue;
            }
            if let Some((begin, end)) = name {
                if let Some(len) = self.operator_at(i) {
                    return Some((begin, end, i + len));
                }
            }
            if past_name || !ch.is_ascii_alphanumeric() {
                return None;
            }
            name = Some((name.map_or(i, |(begin, _)| begin), i + 1));
        }
        None
    }

    fn operator_at(&self, i: usize) -> Option<usize> {
        match (self.peek(i), self.peek(i + 1), self.peek(i + 2)) {
            (Some(':'), Some(':'), Some('=')) => Some(3),
            (Some(':'), Some('='), _) => Some(2),
            (Some('='), _, _) => Some(1),
            _ => None,
        }
    }

    /// Emit the target word at `cursor` if it sits before the rule colon.
    ///
    /// Returns the column just past the word.
    fn target(&mut self, cursor: usize) -> Option<usize> {
        let colon = self.rule_colon?;
        if self.assigned || cursor >= colon || !self.at_word_start(cursor) {
            return None;
        }

        let end = (cursor..colon)
            .find(|&i| self.chars[i].is_whitespace())
            .unwrap_or(colon);
        if self.chars[cursor..end]
            .iter()
            .any(|&c| c == '$' || c == '`')
        {
            return None;
        }

        self.emit(TokenKind::Target, cursor, end, cursor);
        Some(end)
    }

    /// First column at or after `from` where dispatch could match.
    fn skip_ahead(&self, from: usize) -> usize {
        (from..self.chars.len())
            .find(|&i| {
                matches!(self.chars[i], '$' | '`' | '#' | ':') || self.chars[i].is_whitespace()
            })
            .unwrap_or(self.chars.len())
    }

    fn skip_whitespace(&self, from: usize) -> usize {
        (from..self.chars.len())
            .find(|&i| !self.chars[i].is_whitespace())
            .unwrap_or(self.chars.len())
    }

    /// First unescaped `delim` at or after `from`.
    fn find_unescaped(&mut self, delim: char, from: usize) -> Option<usize> {
        if let Some(hit) = self.searches.iter().find(|s| s.covers(delim, from)) {
            return hit.found;
        }

        let found =
            (from..self.chars.len()).find(|&i| self.chars[i] == delim && !self.is_escaped(i));
        let search = Search { delim, from, found };
        match self.searches.iter_mut().find(|s| s.delim == delim) {
            Some(slot) => *slot = search,
            None => self.searches.push(search),
        }
        found
    }

    fn is_escaped(&self, i: usize) -> bool {
        escaped(&self.chars, i)
    }

    fn at_word_start(&self, i: usize) -> bool {
        i == 0 || self.chars[i - 1].is_whitespace()
    }

    fn peek(&self, i: usize) -> Option<char> {
        self.chars.get(i).copied()
    }

    /// Push a token whose text is `chars[start..end]`, positioned at
    /// `column`.
    fn emit(&mut self, kind: TokenKind, start: usize, end: usize, column: usize) {
        let text: String = self.chars[start..end].iter().collect();
        self.out
            .push(Token::new(kind, text, Position::new(self.line, column)));
    }
}

const fn escaped(chars: &[char], i: usize) -> bool {
    i > 0 && chars[i - 1] == '\\'
}

/// The first unescaped `:` before any unescaped `=`, unless it starts a
/// `:=` or `::=` operator.
fn rule_colon(chars: &[char]) -> Option<usize> {
    let limit = (0..chars.len())
        .find(|&i| chars[i] == '=' && !escaped(chars, i))
        .unwrap_or(chars.len());
    let colon = (0..limit).find(|&i| chars[i] == ':' && !escaped(chars, i))?;

    match (chars.get(colon + 1).copied(), chars.get(colon + 2).copied()) {
        (Some('='), _) | (Some(':'), Some('=')) => None,
        _ => Some(colon),
    }
}
