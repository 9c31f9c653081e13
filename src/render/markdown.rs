//! Markdown to HTML, with fenced code blocks syntax-highlighted.
//!
//! Code blocks are intercepted on pulldown-cmark's event stream rather than
//! patched in the generated HTML, so the highlighter sees the raw code and nothing
//! gets escaped twice. Fences without a language tag are left as plain
//! `<pre><code>` blocks.

use super::highlight_or_escape;
use super::repair::repair_code_fences;
use crate::highlight::Highlighter;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag};

/// Repair, parse and render a markdown document
pub fn render_markdown(markdown: &str, hl: &Highlighter) -> String {
    let markdown = repair_code_fences(markdown);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(&markdown, options);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, HighlightCodeBlocks { events: parser, hl });
    out
}

struct HighlightCodeBlocks<'h, I> {
    events: I,
    hl: &'h Highlighter,
}

impl<'a, I> Iterator for HighlightCodeBlocks<'_, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        let event = self.events.next()?;
        let language = match &event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                info.split_whitespace().next().map(ToString::to_string)
            }
            _ => None,
        };
        let Some(language) = language else {
            return Some(event);
        };

        let mut code = String::new();
        for event in self.events.by_ref() {
            match event {
                Event::Text(text) => code.push_str(&text),
                Event::End(Tag::CodeBlock(_)) => break,
                _ => {}
            }
        }

        let syntax = self.hl.syntax_for(&language, &code);
        let mut block = highlight_or_escape(self.hl, &code, syntax);
        block.push('\n');
        Some(Event::Html(CowStr::from(block)))
    }
}
