//! Syntax highlighting to self-contained HTML.
//!
//! Every token gets its colour and font style inline, so the output renders the same
//! without any stylesheet. Lexer selection never fails: an unknown language token
//! falls back to inferring the language from the code itself, and finally to plain
//! text.

use crate::render::guess::guess_token;
use crate::sinks::SyntaxTheme;
use anyhow::{anyhow, Context, Result};
use log::debug;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Fence tags that mean "no language", such as program output
const PLAIN_TEXT_TOKENS: &[&str] = &["text", "plaintext", "plain", "console", "output", "none"];

pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    pub fn new(theme: SyntaxTheme) -> Result<Highlighter> {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(theme.name())
            .ok_or_else(|| anyhow!("Syntax theme `{}` isn't available", theme.name()))?;

        Ok(Highlighter {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Pick a syntax from a language token (a name or extension such as `cpp`,
    /// `Python`, `js`), inferring it from the code if the token is unknown.
    pub fn syntax_for(&self, token: &str, code: &str) -> &SyntaxReference {
        let token = token.trim();
        if PLAIN_TEXT_TOKENS
            .iter()
            .any(|t| t.eq_ignore_ascii_case(token))
        {
            return self.syntaxes.find_syntax_plain_text();
        }
        if !token.is_empty() {
            if let Some(syntax) = self.syntaxes.find_syntax_by_token(token) {
                return syntax;
            }
            debug!("Unknown language `{token}`, inferring from contents");
        }
        self.infer_syntax(code)
    }

    /// Infer a syntax from code contents alone
    pub fn infer_syntax(&self, code: &str) -> &SyntaxReference {
        code.lines()
            .next()
            .and_then(|line| self.syntaxes.find_syntax_by_first_line(line))
            .or_else(|| guess_token(code).and_then(|t| self.syntaxes.find_syntax_by_token(t)))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }

    /// Highlight code as a `<pre>` block with inline styles
    pub fn highlight(&self, code: &str, syntax: &SyntaxReference) -> Result<String> {
        let code = code.replace('\t', "    ");
        let background = self.theme.settings.background.unwrap_or(Color::WHITE);

        let mut html = String::with_capacity(code.len() * 4);
        html.push_str(&format!(
            r#"<pre class="highlight" style="background-color: {};"><code>"#,
            css_colour(background)
        ));

        let mut h = HighlightLines::new(syntax, &self.theme);
        for (line_num, line) in LinesWithEndings::from(&code).enumerate() {
            let ranges = h
                .highlight_line(line, &self.syntaxes)
                .with_context(|| format!("Failed to highlight line {}", line_num + 1))?;

            for (style, text) in ranges {
                if !text.is_empty() {
                    push_span(&mut html, style, text);
                }
            }
        }

        html.push_str("</code></pre>");
        Ok(html)
    }
}

fn push_span(html: &mut String, style: Style, text: &str) {
    html.push_str(r#"<span style="color: "#);
    html.push_str(&css_colour(style.foreground));
    if style.font_style.intersects(FontStyle::BOLD) {
        html.push_str("; font-weight: bold");
    }
    if style.font_style.intersects(FontStyle::ITALIC) {
        html.push_str("; font-style: italic");
    }
    if style.font_style.intersects(FontStyle::UNDERLINE) {
        html.push_str("; text-decoration: underline");
    }
    html.push_str(r#"">"#);
    html.push_str(&html_escape::encode_text(text));
    html.push_str("</span>");
}

fn css_colour(c: Color) -> String {
    format!("rgb({}, {}, {})", c.r, c.g, c.b)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    fn highlighter() -> Highlighter {
        Highlighter::new(SyntaxTheme::InspiredGitHub).expect("can load default theme")
    }

    fn distinct_colours(html: &str) -> HashSet<&str> {
        html.split(r#"<span style="color: "#)
            .skip(1)
            .filter_map(|s| s.split(')').next())
            .collect()
    }

    #[test]
    fn all_themes_are_available() {
        for theme in SyntaxTheme::all() {
            Highlighter::new(*theme).expect("theme exists in syntect defaults");
        }
    }

    #[test]
    fn can_find_syntax_by_token() {
        let hl = highlighter();
        assert_eq!(hl.syntax_for("cpp", "").name, "C++");
        assert_eq!(hl.syntax_for("c++", "").name, "C++");
        assert_eq!(hl.syntax_for("py", "").name, "Python");
        assert_eq!(hl.syntax_for("python", "").name, "Python");
        assert_eq!(hl.syntax_for("java", "").name, "Java");
        assert_eq!(hl.syntax_for("js", "").name, "JavaScript");
    }

    #[test]
    fn unknown_token_falls_back_to_contents() {
        let hl = highlighter();
        assert_eq!(
            hl.syntax_for("not-a-language", "#!/usr/bin/env python\nprint(1)\n").name,
            "Python"
        );
        assert_eq!(
            hl.syntax_for("pseudo", "def f(x):\n    return x\n").name,
            "Python"
        );
        assert_eq!(hl.syntax_for("", "lorem ipsum").name, "Plain Text");
    }

    #[test]
    fn output_tags_stay_plain_text() {
        let hl = highlighter();
        let output = "result: None\nprint(x) called\ndef\n";
        for tag in ["text", "plaintext", "console", "output", "Text"] {
            assert_eq!(hl.syntax_for(tag, output).name, "Plain Text", "tag {tag}");
        }
    }

    #[test]
    fn highlighting_uses_inline_styles() {
        let hl = highlighter();
        let syntax = hl.syntax_for("py", "");
        let html = hl
            .highlight("def greet(name):\n    return name\n", syntax)
            .expect("can highlight");

        assert!(html.starts_with(r#"<pre class="highlight" style="background-color: rgb("#));
        assert!(html.ends_with("</code></pre>"));
        assert!(!html.contains("class=\"syn"));
        assert!(distinct_colours(&html).len() >= 2);
    }

    #[test]
    fn highlighting_escapes_html() {
        let hl = highlighter();
        let syntax = hl.syntax_for("cpp", "");
        let html = hl
            .highlight("if (a < b && c > d) {}\n", syntax)
            .expect("can highlight");
        assert!(html.contains("&lt;"));
        assert!(html.contains("&amp;"));
        assert!(!html.contains("a < b"));
    }
}
