//! Assembly of rendered sections into one HTML document.

use crate::render::RenderedSection;
use chrono::Local;

/// Wrap every section in a heading and join them inside the HTML shell
pub fn assemble(title: Option<&str>, sections: &[RenderedSection], stylesheet: &str) -> String {
    let body_len: usize = sections.iter().map(|s| s.body_html.len()).sum();
    let mut html = String::with_capacity(body_len + stylesheet.len() + 512);

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <meta name="generator" content="{generator}">
    <meta name="dcterms.created" content="{created}">
    <style>
{stylesheet}
    </style>
</head>
<body>
"#,
        title = html_escape::encode_text(title.unwrap_or("Notes")),
        generator = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION")),
        created = Local::now().format("%Y-%m-%d"),
    ));

    for section in sections {
        html.push_str("<h2>");
        html.push_str(&html_escape::encode_text(&section.heading));
        html.push_str("</h2>\n");
        html.push_str(&section.body_html);
        html.push('\n');
    }

    html.push_str("</body>\n</html>\n");
    html
}
