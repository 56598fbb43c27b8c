use std::fmt;

/// Location of a token: 0-based line index and 0-based column.
///
/// Orders by `line` first, then `column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

/// Token kinds produced by the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Variable or function reference: `$(NAME)`, `${NAME}` or `$X`.
    VarName,
    /// Left-hand side of `NAME = ...`, `NAME := ...` or `NAME ::= ...`.
    Assignment,
    /// Comment (`# ...`) up to the end of the logical line.
    Comment,
    /// Opening backtick of a shell command.
    BacktickStart,
    /// Closing backtick of a shell command.
    BacktickEnd,
    /// Opening `$$(` of a shell command substitution.
    SubshellStart,
    /// Closing `)` of a shell command substitution.
    SubshellEnd,
    /// Leading `@` of a recipe line.
    NoPrintCmd,
    /// Rule target name before the `:`.
    Target,
}

impl TokenKind {
    /// Upper-case display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::VarName => "VARNAME",
            Self::Assignment => "ASSIGNMENT",
            Self::Comment => "COMMENT",
            Self::BacktickStart => "BACKTICK_START",
            Self::BacktickEnd => "BACKTICK_END",
            Self::SubshellStart => "SUBSHELL_START",
            Self::SubshellEnd => "SUBSHELL_END",
            Self::NoPrintCmd => "NO_PRINT_CMD",
            Self::Target => "TARGET",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token with its kind, captured text, and position.
///
/// Owns its text, so it outlives the buffer it was recognized from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.position, self.kind, self.text)
    }
}

/// Sort tokens by position for display.
///
/// The sort is stable: tokens sharing a position keep the order in
/// which they were discovered.
pub fn sort_by_position(tokens: &mut [Token]) {
    tokens.sort_by_key(|t| t.position);
}
