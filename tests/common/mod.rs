#![allow(dead_code)]

use makefile_recognizer::{Token, TokenKind, recognize_str};

/// Recognize `input` and reduce each token to `(kind, text, line, column)`.
pub fn summary(input: &str) -> Vec<(TokenKind, String, usize, usize)> {
    recognize_str(input)
        .into_iter()
        .map(|t| (t.kind, t.text, t.position.line, t.position.column))
        .collect()
}

/// Tokens of a given kind, in discovery order.
pub fn of_kind(tokens: &[Token], kind: TokenKind) -> Vec<&Token> {
    tokens.iter().filter(|t| t.kind == kind).collect()
}

/// A small but realistic Makefile touching every token kind.
pub const SAMPLE: &str = "\
# Build configuration
CC = gcc
CFLAGS := -O2 -Wall
PREFIX ::= /usr/local
SRCS = main.c \\
\tutil.c

.PHONY: all clean
all: app

app: $(SRCS)
\t@echo building $@ on `hostname`
\t$(CC) $(CFLAGS) -o $@ $^

clean:
\t@rm -f app $$(ls *.o)
";
