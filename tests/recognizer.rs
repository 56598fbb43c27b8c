//! Recognizer behaviour on whole documents.

mod common;

use common::{SAMPLE, of_kind, summary};
use makefile_recognizer::{
    Error, Position, Recognizer, TokenKind, recognize, recognize_file, recognize_str,
    sort_by_position,
};

use TokenKind::{
    Assignment, BacktickEnd, BacktickStart, Comment, NoPrintCmd, SubshellEnd, SubshellStart,
    Target, VarName,
};

fn tok(kind: TokenKind, text: &str, line: usize, column: usize) -> (TokenKind, String, usize, usize) {
    (kind, text.to_string(), line, column)
}

// -----------------------------------------------------------
// A complete Makefile.
// -----------------------------------------------------------

#[test]
fn sample_makefile() {
    assert_eq!(
        summary(SAMPLE),
        [
            tok(Comment, "# Build configuration", 0, 0),
            tok(Assignment, "CC", 1, 0),
            tok(Assignment, "CFLAGS", 2, 0),
            tok(Assignment, "PREFIX", 3, 0),
            tok(Assignment, "SRCS", 4, 0),
            tok(Target, ".PHONY", 7, 0),
            tok(Target, "all", 8, 0),
            tok(Target, "app", 10, 0),
            tok(VarName, "SRCS", 10, 5),
            tok(NoPrintCmd, "@", 11, 1),
            tok(VarName, "@", 11, 16),
            tok(BacktickStart, "`", 11, 22),
            tok(BacktickEnd, "`", 11, 31),
            tok(VarName, "CC", 12, 1),
            tok(VarName, "CFLAGS", 12, 7),
            tok(VarName, "@", 12, 20),
            tok(VarName, "^", 12, 23),
            tok(Target, "clean", 14, 0),
            tok(NoPrintCmd, "@", 15, 1),
            tok(SubshellStart, "$$(", 15, 12),
            tok(SubshellEnd, ")", 15, 21),
        ]
    );
}

#[test]
fn recognition_is_idempotent() {
    assert_eq!(recognize_str(SAMPLE), recognize_str(SAMPLE));
}

#[test]
fn sorted_output_is_ordered() {
    let mut tokens = recognize_str("a: `x` $$(y)\n\tb");
    sort_by_position(&mut tokens);
    assert!(tokens.windows(2).all(|w| w[0].position <= w[1].position));
}

#[test]
fn empty_document() {
    assert!(recognize_str("").is_empty());
    assert!(recognize::<&str>(&[]).is_empty());
    assert!(recognize(&["", "", ""]).is_empty());
}

// -----------------------------------------------------------
// References.
// -----------------------------------------------------------

#[test]
fn reference_on_its_own_line() {
    assert_eq!(summary("$(CC)"), [tok(VarName, "CC", 0, 0)]);
}

#[test]
fn brace_and_paren_are_equivalent() {
    assert_eq!(summary("${var}"), summary("$(var)"));
}

#[test]
fn automatic_variable() {
    assert_eq!(summary("$@"), [tok(VarName, "@", 0, 0)]);
}

#[test]
fn references_inside_text() {
    let tokens = recognize_str("x: lib$(NAME).a ${DIR}/y");
    let names: Vec<_> = of_kind(&tokens, VarName)
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(names, ["NAME", "DIR"]);
}

#[test]
fn escaped_close_delimiters() {
    assert_eq!(summary(r"${a\}b}"), [tok(VarName, r"a\}b", 0, 0)]);
    assert_eq!(summary(r"$(a\)b)"), [tok(VarName, r"a\)b", 0, 0)]);
}

// -----------------------------------------------------------
// Comments.
// -----------------------------------------------------------

#[test]
fn comment_hides_everything_after_it() {
    assert_eq!(
        summary("# comment $(X)"),
        [tok(Comment, "# comment $(X)", 0, 0)]
    );
}

#[test]
fn comment_in_recipe() {
    assert_eq!(
        summary("\t# not echoed"),
        [tok(Comment, "# not echoed", 0, 1)]
    );
}

// -----------------------------------------------------------
// Shell commands.
// -----------------------------------------------------------

#[test]
fn backtick_pair() {
    let tokens = recognize_str("echo `date`");
    assert_eq!(of_kind(&tokens, BacktickStart).len(), 1);
    assert_eq!(of_kind(&tokens, BacktickEnd).len(), 1);
    assert_eq!(tokens[0].position, Position::new(0, 5));
    assert_eq!(tokens[1].position, Position::new(0, 10));
}

#[test]
fn escaped_backtick_inside_pair() {
    let tokens = recognize_str(r"X = `echo \` ok`");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [Assignment, BacktickStart, BacktickEnd]
    );
    assert_eq!(tokens[2].position.column, 15);
}

#[test]
fn reference_inside_backticks_is_recognized() {
    let kinds: Vec<_> = recognize_str("\tout=`ls $(DIR)`")
        .iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds, [BacktickStart, BacktickEnd, VarName]);
}

#[test]
fn unterminated_subshell() {
    assert!(recognize_str("\techo $$(date").is_empty());
}

// -----------------------------------------------------------
// Assignments and targets.
// -----------------------------------------------------------

#[test]
fn assignment_forms() {
    for input in ["CFLAGS = -O2", "CFLAGS := -O2", "CFLAGS ::= -O2"] {
        assert_eq!(summary(input), [tok(Assignment, "CFLAGS", 0, 0)], "{input}");
    }
}

#[test]
fn recipe_never_assigns_or_targets() {
    assert_eq!(summary("\t@echo hi"), [tok(NoPrintCmd, "@", 0, 1)]);
    assert!(recognize_str("\tFOO = bar").is_empty());
    assert!(recognize_str("\tall: x").is_empty());
}

#[test]
fn double_colon_rule() {
    assert_eq!(summary("install:: app"), [tok(Target, "install", 0, 0)]);
}

#[test]
fn escaped_colon_stays_in_target() {
    assert_eq!(summary(r"a\:b: c"), [tok(Target, r"a\:b", 0, 0)]);
}

// -----------------------------------------------------------
// Continuation lines.
// -----------------------------------------------------------

#[test]
fn reference_after_continuation() {
    assert_eq!(
        summary("FOO = \\\n$(BAR)"),
        [tok(Assignment, "FOO", 0, 0), tok(VarName, "BAR", 0, 6)]
    );
}

#[test]
fn physical_positions_after_continuation() {
    let tokens = Recognizer::new()
        .physical_positions(true)
        .recognize_str("FOO = \\\n$(BAR)\nX = $(Y)");
    let positions: Vec<_> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(
        positions,
        [
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(2, 0),
            Position::new(2, 4),
        ]
    );
}

// -----------------------------------------------------------
// File input.
// -----------------------------------------------------------

#[test]
fn recognize_file_reads_from_disk() {
    let path = std::env::temp_dir().join(format!(
        "makefile-recognizer-{}.mk",
        std::process::id()
    ));
    std::fs::write(&path, SAMPLE).expect("write sample");
    let tokens = recognize_file(&path, &Recognizer::new()).expect("recognize file");
    std::fs::remove_file(&path).ok();
    assert_eq!(tokens, recognize_str(SAMPLE));
}

#[test]
fn recognize_file_skips_byte_order_mark() {
    let path = std::env::temp_dir().join(format!(
        "makefile-recognizer-bom-{}.mk",
        std::process::id()
    ));
    std::fs::write(&path, format!("\u{feff}{SAMPLE}")).expect("write sample");
    let tokens = recognize_file(&path, &Recognizer::new()).expect("recognize file");
    std::fs::remove_file(&path).ok();
    assert_eq!(tokens, recognize_str(SAMPLE));
}

#[test]
fn recognize_file_missing() {
    let err = recognize_file("/nonexistent/dir/Makefile", &Recognizer::new()).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
    assert!(err.to_string().starts_with("/nonexistent/dir/Makefile: "));
}
