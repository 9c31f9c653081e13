use crate::sinks::{Converter, SyntaxTheme};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "notes-book.toml";

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a notes-book.toml config file
    Config,
    /// Collects the configured folders and renders them into a single PDF
    Render(RenderArgs),
    /// Lists the files that would be collected, without rendering anything
    List(SourceArgs),
}

/// Where to collect files from. Anything given here overrides the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Configuration file to read, if it exists
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Owner of the repository
    #[arg(long, env = "GITHUB_OWNER")]
    pub owner: Option<String>,

    /// Name of the repository
    #[arg(long, env = "GITHUB_REPO")]
    pub repo: Option<String>,

    /// Branch, tag or commit to read from
    #[arg(long, env = "GITHUB_BRANCH")]
    pub branch: Option<String>,

    /// Folders to collect, in order (`/` is the repository root)
    #[arg(long, env = "FOLDERS", value_delimiter = ',')]
    pub folders: Vec<String>,

    /// File name suffixes to collect, e.g. `.md,.py`
    #[arg(long, env = "FILE_EXTENSIONS", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Base URL of the GitHub API
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output PDF file
    #[arg(short, long, env = "OUTPUT_FILE")]
    pub outfile: Option<PathBuf>,

    /// Program used to turn the HTML into a PDF
    #[arg(long, value_enum)]
    pub converter: Option<Converter>,

    /// Path to the converter executable
    #[arg(long)]
    pub program: Option<PathBuf>,

    /// Syntax highlighting theme
    #[arg(long)]
    pub theme: Option<SyntaxTheme>,

    /// Also write the assembled HTML next to the PDF
    #[arg(long)]
    pub keep_html: bool,
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_parse_render_args() {
        let cli = Cli::try_parse_from([
            "notes-book",
            "render",
            "--owner",
            "someone",
            "--folders",
            "Week 1,Week 2",
            "--extensions",
            ".md,.py",
            "-o",
            "out.pdf",
            "--converter",
            "weasyprint",
            "--theme",
            "base16-ocean.light",
            "--keep-html",
        ])
        .expect("can parse arguments");

        let Commands::Render(args) = cli.command else {
            panic!("expected the render command");
        };
        assert_eq!(args.source.owner.as_deref(), Some("someone"));
        assert_eq!(args.source.folders, vec!["Week 1", "Week 2"]);
        assert_eq!(args.source.extensions, vec![".md", ".py"]);
        assert_eq!(args.source.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(args.outfile, Some(PathBuf::from("out.pdf")));
        assert_eq!(args.converter, Some(Converter::WeasyPrint));
        assert_eq!(args.theme, Some(SyntaxTheme::OceanLight));
        assert!(args.keep_html);
    }

    #[test]
    fn rejects_unknown_theme() {
        let result = Cli::try_parse_from(["notes-book", "render", "--theme", "monokai"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
