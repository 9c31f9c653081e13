//! Content-based language guessing.
//!
//! syntect can only detect a language from the first line of a file (shebangs,
//! `<?php`, mode lines). Snippets in notes rarely have one, so this scores a handful
//! of telltale markers per language and picks the best match.

/// Markers per syntax token, in tie-break order
const MARKERS: &[(&str, &[&str])] = &[
    (
        "cpp",
        &[
            "#include <iostream>",
            "std::",
            "cout <<",
            "cin >>",
            "template <",
            "template<",
            "nullptr",
            "namespace ",
            "class ",
            "public:",
            "private:",
            "vector<",
        ],
    ),
    (
        "c",
        &["#include <stdio.h>", "#include <stdlib.h>", "printf(", "scanf(", "malloc(", "free(", "int main("],
    ),
    (
        "java",
        &[
            "public class ",
            "public static void main",
            "System.out.",
            "import java.",
            "private final ",
            "@Override",
            "extends ",
            "implements ",
        ],
    ),
    (
        "py",
        &["def ", "import ", "from ", "self.", "elif ", "print(", "__init__", "None", "True", "lambda "],
    ),
    (
        "js",
        &[
            "function ",
            "const ",
            "let ",
            "=>",
            "console.log",
            "===",
            "require(",
            "document.",
            "undefined",
        ],
    ),
    (
        "rs",
        &["fn ", "let mut ", "impl ", "pub fn ", "::new(", "-> ", "use std::", "println!"],
    ),
    (
        "sh",
        &["#!/bin/", "echo ", "sudo ", "apt-get ", "export ", "fi\n", "done\n", "$("],
    ),
    ("sql", &["SELECT ", "INSERT INTO", "CREATE TABLE", " FROM ", " WHERE "]),
];

/// Guess a syntax token (an extension syntect understands) from code contents
pub fn guess_token(code: &str) -> Option<&'static str> {
    let trimmed = code.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    if looks_like_json(trimmed) {
        return Some("json");
    }
    if trimmed.starts_with("<!DOCTYPE") || trimmed.starts_with("<html") {
        return Some("html");
    }

    let mut best: Option<(&'static str, usize)> = None;
    for &(token, markers) in MARKERS {
        let score = markers.iter().filter(|m| code.contains(**m)).count();
        if score > best.map(|(_, s)| s).unwrap_or(0) {
            best = Some((token, score));
        }
    }
    best.map(|(token, _)| token)
}

fn looks_like_json(code: &str) -> bool {
    let code = code.trim_end();
    ((code.starts_with('{') && code.ends_with('}')) || (code.starts_with('[') && code.ends_with(']')))
        && code.contains("\":")
}
