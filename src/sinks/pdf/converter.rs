//! HTML to PDF conversion through an external renderer.

use super::config::Converter;
use anyhow::{anyhow, Context, Result};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;
use url::Url;

pub trait HtmlToPdf {
    /// Render the HTML file at `html` into a PDF at `pdf`
    fn convert(&self, html: &Path, pdf: &Path) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct ExternalConverter {
    converter: Converter,
    program: PathBuf,
}

impl ExternalConverter {
    pub fn new(converter: Converter, program: Option<&Path>) -> ExternalConverter {
        let program = program
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(converter.default_program()));
        ExternalConverter { converter, program }
    }

    fn command(&self, html: &Path, pdf: &Path) -> Result<Command> {
        let mut cmd = Command::new(&self.program);
        match self.converter {
            Converter::WeasyPrint => {
                cmd.arg("--encoding").arg("utf-8").arg(html).arg(pdf);
            }
            Converter::Wkhtmltopdf => {
                cmd.arg("--quiet")
                    .arg("--encoding")
                    .arg("utf-8")
                    .arg("--enable-local-file-access")
                    .arg(html)
                    .arg(pdf);
            }
            Converter::Chromium => {
                let url = Url::from_file_path(html)
                    .map_err(|_| anyhow!("Can't build a file URL for {}", html.display()))?;
                let mut print_to = std::ffi::OsString::from("--print-to-pdf=");
                print_to.push(pdf);
                cmd.arg("--headless")
                    .arg("--disable-gpu")
                    .arg("--no-pdf-header-footer")
                    .arg(print_to)
                    .arg(url.as_str());
            }
        }
        Ok(cmd)
    }
}

impl HtmlToPdf for ExternalConverter {
    fn convert(&self, html: &Path, pdf: &Path) -> Result<()> {
        let mut cmd = self.command(html, pdf)?;
        debug!("Running {cmd:?}");

        let output = cmd.output().with_context(|| {
            format!(
                "Failed to run `{}`; is {} installed?",
                self.program.display(),
                self.converter
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "`{}` exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            ));
        }
        if !pdf.is_file() {
            return Err(anyhow!(
                "`{}` finished but didn't write {}",
                self.program.display(),
                pdf.display()
            ));
        }
        Ok(())
    }
}
