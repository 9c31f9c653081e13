//! Rendering of downloaded files to HTML fragments.
//!
//! The file's extension picks one of three formats: markdown (rendered, with its
//! code blocks highlighted), a known source language (highlighted as a whole), or
//! anything else (escaped and shown verbatim).

pub mod guess;
mod markdown;
mod repair;

use markdown::render_markdown;

use crate::highlight::Highlighter;
use crate::source::FileEntry;
use log::warn;
use std::path::Path;
use syntect::parsing::SyntaxReference;

/// Extensions rendered as highlighted source code
pub const HIGHLIGHTED_EXTENSIONS: &[&str] = &["cpp", "c", "py", "js", "java"];

/// How a file gets rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format<'a> {
    Markdown,
    /// Highlighted source, with the extension used to pick the lexer
    Source(&'a str),
    Verbatim,
}

impl<'a> Format<'a> {
    pub fn for_path(path: &'a str) -> Format<'a> {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("md") => Format::Markdown,
            Some(ext) if HIGHLIGHTED_EXTENSIONS.contains(&ext) => Format::Source(ext),
            _ => Format::Verbatim,
        }
    }
}

/// One file of the book, ready to be assembled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub heading: String,
    pub body_html: String,
}

impl RenderedSection {
    pub fn render(file: &FileEntry, hl: &Highlighter) -> RenderedSection {
        RenderedSection {
            heading: file.path.clone(),
            body_html: render_file(&file.path, &file.contents, hl),
        }
    }
}

/// Render a file's contents to an HTML fragment based on its name
pub fn render_file(path: &str, contents: &str, hl: &Highlighter) -> String {
    match Format::for_path(path) {
        Format::Markdown => render_markdown(contents, hl),
        Format::Source(ext) => highlight_or_escape(hl, contents, hl.syntax_for(ext, contents)),
        Format::Verbatim => escaped_block(contents),
    }
}

/// Wrap escaped text in a preformatted block
pub fn escaped_block(text: &str) -> String {
    format!("<pre>{}</pre>", html_escape::encode_text(text))
}

pub(crate) fn highlight_or_escape(hl: &Highlighter, code: &str, syntax: &SyntaxReference) -> String {
    match hl.highlight(code, syntax) {
        Ok(html) => html,
        Err(e) => {
            warn!("Failed to highlight {} code, showing it plain: {e:#}", syntax.name);
            escaped_block(code)
        }
    }
}
