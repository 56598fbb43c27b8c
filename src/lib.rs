//! Makefile token recognizer for syntax-aware highlighting.
//!
//! A single pass over the lines of a Makefile that classifies
//! variable references, comments, assignments, rule targets,
//! shell-command delimiters and recipe markers into positioned
//! tokens. It does not interpret or validate the Makefile: malformed
//! input yields fewer tokens, never an error.
//!
//! # Quick start
//!
//! ```
//! use makefile_recognizer::{TokenKind, recognize_str, sort_by_position};
//!
//! let input = "CC = gcc\nall: main.o\n\t@$(CC) -o all main.o\n";
//! let mut tokens = recognize_str(input);
//! sort_by_position(&mut tokens);
//!
//! assert_eq!(tokens[0].kind, TokenKind::Assignment);
//! assert_eq!(tokens[0].text, "CC");
//! assert!(tokens.iter().any(|t| t.kind == TokenKind::NoPrintCmd));
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod lines;
pub mod recognizer;
pub mod token;

use std::io;
use std::path::{Path, PathBuf};

pub use lines::{LogicalLine, LogicalLines, Segment, logical_lines};
pub use recognizer::{Recognizer, recognize, recognize_str};
pub use token::{Position, Token, TokenKind, sort_by_position};

/// Errors raised at the I/O edge; recognition itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source file could not be read.
    #[error("{}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a Makefile from disk and recognize it.
///
/// # Errors
///
/// Returns `Error::Read` when the file cannot be read as UTF-8 text.
pub fn recognize_file(
    path: impl AsRef<Path>,
    recognizer: &Recognizer,
) -> Result<Vec<Token>, Error> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(recognizer.recognize_str(&content))
}
