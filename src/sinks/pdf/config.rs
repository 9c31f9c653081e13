use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub enum SyntaxTheme {
    #[serde(rename = "InspiredGitHub")]
    InspiredGitHub,
    #[serde(rename = "Solarized (light)")]
    SolarizedLight,
    #[serde(rename = "base16-ocean.light")]
    OceanLight,
}

impl fmt::Display for SyntaxTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl SyntaxTheme {
    /// The name of the theme in syntect's default theme set
    pub fn name(&self) -> &'static str {
        match self {
            SyntaxTheme::InspiredGitHub => "InspiredGitHub",
            SyntaxTheme::SolarizedLight => "Solarized (light)",
            SyntaxTheme::OceanLight => "base16-ocean.light",
        }
    }

    pub fn all() -> &'static [SyntaxTheme] {
        &[
            SyntaxTheme::InspiredGitHub,
            SyntaxTheme::SolarizedLight,
            SyntaxTheme::OceanLight,
        ]
    }
}

impl std::str::FromStr for SyntaxTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SyntaxTheme::all()
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown syntax theme: {s}"))
    }
}

/// The external program that turns the assembled HTML into a PDF
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Converter {
    #[value(name = "weasyprint")]
    WeasyPrint,
    Wkhtmltopdf,
    Chromium,
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.default_program())
    }
}

impl Converter {
    /// The program looked up on `PATH` when no override is configured
    pub fn default_program(&self) -> &'static str {
        match self {
            Converter::WeasyPrint => "weasyprint",
            Converter::Wkhtmltopdf => "wkhtmltopdf",
            Converter::Chromium => "chromium",
        }
    }

    pub fn all() -> &'static [Converter] {
        &[
            Converter::WeasyPrint,
            Converter::Wkhtmltopdf,
            Converter::Chromium,
        ]
    }
}

/// PDF output configuration.
///
/// Layout and typography are left to the HTML-to-PDF renderer; only the handful of
/// sizes the stylesheet uses are configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::upper_case_acronyms)]
pub struct PDF {
    /// Output PDF file path
    pub outfile: PathBuf,
    /// Syntax highlighting theme for code blocks
    pub theme: SyntaxTheme,
    /// Renderer used to produce the PDF from HTML
    pub converter: Converter,
    /// Path to the renderer executable, if it isn't on `PATH` under its usual name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<PathBuf>,
    /// Also write the assembled HTML next to the PDF
    #[serde(default)]
    pub keep_html: bool,
    #[serde(default = "default_font_size_body")]
    pub font_size_body_px: f32,
    #[serde(default = "default_font_size_heading")]
    pub font_size_heading_px: f32,
    #[serde(default = "default_font_size_code")]
    pub font_size_code_px: f32,
}

fn default_font_size_body() -> f32 {
    10.0
}
fn default_font_size_heading() -> f32 {
    13.0
}
fn default_font_size_code() -> f32 {
    10.0
}

impl Default for PDF {
    fn default() -> Self {
        PDF {
            outfile: PathBuf::from("LectureNotes.pdf"),
            theme: SyntaxTheme::InspiredGitHub,
            converter: Converter::WeasyPrint,
            program: None,
            keep_html: false,
            font_size_body_px: default_font_size_body(),
            font_size_heading_px: default_font_size_heading(),
            font_size_code_px: default_font_size_code(),
        }
    }
}

impl PDF {
    /// Where the assembled HTML goes when `keep_html` is set
    pub fn html_outfile(&self) -> PathBuf {
        self.outfile.with_extension("html")
    }
}

/// Statistics from rendering a PDF, used for user feedback.
#[derive(Debug)]
pub struct RenderStats {
    /// Number of file sections in the document
    pub section_count: usize,
    /// Size of the assembled HTML document
    pub html_bytes: usize,
}
