//! CSS for the assembled document.
//!
//! Highlighted code carries its own inline colours, so this only sets fonts, sizes
//! and the code block box.

use super::config::PDF;

/// Generate the document stylesheet from the configured sizes
pub fn generate_stylesheet(pdf: &PDF) -> String {
    format!(
        r#"body {{
    font-family: Arial, sans-serif;
    font-size: {body}px;
    margin: 20px;
}}

h2 {{
    margin-top: 30px;
    font-size: {heading}px;
    font-weight: bold;
    word-break: break-all;
}}

pre, code, .highlight {{
    font-family: 'Courier New', monospace;
    font-size: {code}px;
    background: #f4f4f4;
    padding: 10px;
    border-radius: 6px;
    overflow-x: auto;
    white-space: pre;
    line-height: 1.4;
    width: 100vw;
    max-width: 100vw;
    display: block;
    box-sizing: border-box;
    margin: 10px 0;
}}

pre code, .highlight code {{
    padding: 0;
    margin: 0;
    background: transparent;
}}

blockquote {{
    margin: 0;
    padding: 0;
    border-left: none;
}}
"#,
        body = pdf.font_size_body_px,
        heading = pdf.font_size_heading_px,
        code = pdf.font_size_code_px,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn uses_configured_sizes() {
        let pdf = PDF {
            font_size_body_px: 11.0,
            font_size_heading_px: 14.5,
            ..PDF::default()
        };
        let css = generate_stylesheet(&pdf);
        assert!(css.contains("font-size: 11px;"));
        assert!(css.contains("font-size: 14.5px;"));
        assert!(css.contains("font-family: 'Courier New', monospace;"));
        assert!(css.contains("border-left: none;"));
    }
}
