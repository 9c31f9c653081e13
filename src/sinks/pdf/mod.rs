//! PDF generation for collected notes.
//!
//! Each file is rendered to an HTML fragment, headed by its repository path, and the
//! fragments are joined into one document with a fixed stylesheet. The document is
//! then handed to an external HTML-to-PDF renderer.
//!
//! The renderer writes to a `.partial.pdf` sibling of the output file, which is only
//! renamed over the output once conversion succeeded. A failed run therefore never
//! leaves a truncated PDF behind, and an existing PDF is replaced only by a complete
//! one.

mod config;
mod converter;
mod document;
mod styles;

pub use config::{Converter, RenderStats, SyntaxTheme, PDF};
pub use converter::{ExternalConverter, HtmlToPdf};

use crate::highlight::Highlighter;
use crate::render::RenderedSection;
use crate::source::Source;
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

impl PDF {
    /// The configured external renderer
    pub fn external_converter(&self) -> ExternalConverter {
        ExternalConverter::new(self.converter, self.program.as_deref())
    }

    /// Render the collected files to the configured PDF file.
    ///
    /// Returns statistics about the generated document.
    pub fn render(
        &self,
        source: &Source,
        converter: &dyn HtmlToPdf,
        progress: &ProgressBar,
    ) -> Result<RenderStats> {
        let hl = Highlighter::new(self.theme)
            .with_context(|| "Failed to load syntax highlighting assets")?;

        let mut sections = Vec::with_capacity(source.files.len());
        for file in source.files.iter() {
            progress.set_message(file.path.clone());
            sections.push(RenderedSection::render(file, &hl));
            progress.inc(1);
        }

        let stylesheet = styles::generate_stylesheet(self);
        let html = document::assemble(source.title.as_deref(), &sections, &stylesheet);

        if self.keep_html {
            let html_outfile = self.html_outfile();
            std::fs::write(&html_outfile, &html)
                .with_context(|| format!("Failed to write {}", html_outfile.display()))?;
            info!("HTML saved as {}", html_outfile.display());
        }

        progress.set_message("Converting to PDF...");
        export(&html, &self.outfile, converter)?;
        progress.finish_with_message("PDF generated");

        Ok(RenderStats {
            section_count: sections.len(),
            html_bytes: html.len(),
        })
    }
}

fn export(html: &str, outfile: &Path, converter: &dyn HtmlToPdf) -> Result<()> {
    let mut html_file = tempfile::Builder::new()
        .prefix("notes-book-")
        .suffix(".html")
        .tempfile()
        .with_context(|| "Failed to create temporary HTML file")?;
    html_file
        .write_all(html.as_bytes())
        .and_then(|_| html_file.flush())
        .with_context(|| "Failed to write temporary HTML file")?;

    let partial = partial_path(outfile);
    if let Err(e) = converter.convert(html_file.path(), &partial) {
        // the renderer may have left half a file behind
        let _ = std::fs::remove_file(&partial);
        return Err(e).with_context(|| format!("Failed to convert HTML to {}", outfile.display()));
    }

    std::fs::rename(&partial, outfile).with_context(|| {
        format!(
            "Failed to move {} to {}",
            partial.display(),
            outfile.display()
        )
    })
}

fn partial_path(outfile: &Path) -> PathBuf {
    outfile.with_extension("partial.pdf")
}
