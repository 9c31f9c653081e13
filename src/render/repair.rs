//! Best-effort repair of malformed fenced code blocks.
//!
//! Notes written in a hurry tend to have the first line of code glued to the
//! language tag (```` ```cpp int x; ````) or a closing fence glued to the last line of
//! code. Both confuse a CommonMark parser, so they are split onto their own lines
//! before parsing. This is not a markdown validator.

use once_cell::sync::Lazy;
use regex::Regex;

/// An opening fence with a language tag, then whitespace, then code on the same line.
/// Only the first code character is consumed, and it is never a backtick, so any
/// later fence on the same line is still seen by both rules.
static TAG_WITH_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```([A-Za-z0-9_+#.-]+)[ \t]+([^\s`])").expect("valid fence tag regex")
});

/// A fence glued to whatever precedes it on the line.
static GLUED_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\n`])```").expect("valid glued fence regex"));

/// Put fence language tags and glued closing fences on their own lines.
///
/// Idempotent: repairing already repaired text changes nothing.
pub fn repair_code_fences(markdown: &str) -> String {
    let markdown = TAG_WITH_CODE.replace_all(markdown, "```${1}\n${2}");
    GLUED_FENCE.replace_all(&markdown, "${1}\n```").into_owned()
}
