//! CLI tool that prints the tokens recognized in Makefiles.

use std::process::ExitCode;

use makefile_recognizer::{Recognizer, recognize_file, sort_by_position};

fn usage() {
    eprintln!("Usage: mkrecognize [--physical] [files...]");
    eprintln!();
    eprintln!("Prints one token per line as `(line, column) KIND: text`,");
    eprintln!("sorted by position. Reads ./Makefile when no file is given.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --physical  Report positions on continuation lines");
    eprintln!("              against their physical line");
    eprintln!("  -h, --help  Show this message");
}

fn main() -> ExitCode {
    let mut recognizer = Recognizer::new();
    let mut files = Vec::new();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                usage();
                return ExitCode::from(2);
            }
            "--physical" => recognizer = recognizer.physical_positions(true),
            flag if flag.starts_with('-') => {
                eprintln!("Unknown option: {flag}");
                usage();
                return ExitCode::from(2);
            }
            _ => files.push(arg),
        }
    }

    if files.is_empty() {
        files.push("Makefile".to_string());
    }

    let show_headers = files.len() > 1;
    let mut had_error = false;

    for (i, path) in files.iter().enumerate() {
        let mut tokens = match recognize_file(path, &recognizer) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("{e}");
                had_error = true;
                continue;
            }
        };
        sort_by_position(&mut tokens);

        if show_headers {
            if i > 0 {
                println!();
            }
            println!("==> {path} <==");
        }
        for token in &tokens {
            println!("{token}");
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
