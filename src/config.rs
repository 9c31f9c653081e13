//! Run configuration: the optional `notes-book.toml` file, with command line and
//! environment values layered on top.

use crate::cli::{RenderArgs, SourceArgs};
use crate::sinks::PDF;
use crate::source::{ExtensionFilter, GitHubContents, GitHubContentsBuilder, DEFAULT_API_URL};
use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Loaded before the command line is parsed, so its variables act as environment
pub const ENV_FILE: &str = ".env";

/// Complete configuration for a notes-book run.
#[derive(Deserialize, Serialize, Default, Debug)]
pub struct Configuration {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub pdf: PDF,
}

/// Which repository to read, and what to collect from it
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SourceConfig {
    /// Only ever taken from the command line or the environment
    #[serde(skip)]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Folders to collect, in the order they appear in the book
    #[serde(default)]
    pub folders: Vec<String>,
    /// File name suffixes that are collected
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

pub fn default_extensions() -> Vec<String> {
    [".md", ".txt", ".cpp", ".c", ".py", ".js", ".java"]
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            token: None,
            owner: None,
            repo: None,
            branch: None,
            folders: Vec::default(),
            extensions: default_extensions(),
            api_url: default_api_url(),
        }
    }
}

/// Load `KEY=value` lines from an env file into the process environment.
///
/// Variables that are already set are left alone. A missing file is not an error.
pub fn load_env_file(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!("Loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to load {}", path.display())),
    }
}

impl Configuration {
    /// Load the configuration file. A missing file is an empty configuration.
    pub fn load(path: &Path) -> Result<Configuration> {
        if !path.exists() {
            debug!("No configuration file at {}", path.display());
            return Ok(Configuration::default());
        }

        println!("Loading configuration...");
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load the file named by `args` and apply the source overrides
    pub fn for_source(args: &SourceArgs) -> Result<Configuration> {
        let mut config = Configuration::load(&args.config)?;
        config.source.merge(args);
        config.source.validate()?;
        Ok(config)
    }

    /// Load the file named by `args` and apply all the render overrides
    pub fn for_render(args: &RenderArgs) -> Result<Configuration> {
        let mut config = Configuration::for_source(&args.source)?;
        config.pdf.merge(args);
        Ok(config)
    }
}

impl SourceConfig {
    /// Overwrite file values with anything given on the command line or in the environment
    pub fn merge(&mut self, args: &SourceArgs) {
        if let Some(token) = &args.token {
            self.token = Some(token.clone());
        }
        if let Some(owner) = &args.owner {
            self.owner = Some(owner.clone());
        }
        if let Some(repo) = &args.repo {
            self.repo = Some(repo.clone());
        }
        if let Some(branch) = &args.branch {
            self.branch = Some(branch.clone());
        }
        if !args.folders.is_empty() {
            self.folders = args.folders.clone();
        }
        if !args.extensions.is_empty() {
            self.extensions = args.extensions.clone();
        }
        if let Some(api_url) = &args.api_url {
            self.api_url = api_url.clone();
        }
    }

    /// The configured folders, trimmed of whitespace and slashes.
    ///
    /// Blank entries are dropped; a lone `/` becomes the empty path, the repository root.
    pub fn folders(&self) -> Vec<String> {
        self.folders
            .iter()
            .map(|folder| folder.trim())
            .filter(|folder| !folder.is_empty())
            .map(|folder| folder.trim_matches('/').trim().to_string())
            .collect()
    }

    pub fn filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(self.extensions.iter().map(String::as_str))
    }

    /// Fail with every missing required setting named at once
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::default();
        if is_blank(&self.token) {
            missing.push("token (GITHUB_TOKEN)");
        }
        if is_blank(&self.owner) {
            missing.push("owner (GITHUB_OWNER)");
        }
        if is_blank(&self.repo) {
            missing.push("repo (GITHUB_REPO)");
        }
        if is_blank(&self.branch) {
            missing.push("branch (GITHUB_BRANCH)");
        }
        if self.folders().is_empty() {
            missing.push("folders (FOLDERS)");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(anyhow!(
                "Missing required settings: {}",
                missing.join(", ")
            ))
        }
    }

    /// The book title, `owner/repo@branch`
    pub fn title(&self) -> String {
        format!(
            "{}/{}@{}",
            self.owner.as_deref().unwrap_or_default(),
            self.repo.as_deref().unwrap_or_default(),
            self.branch.as_deref().unwrap_or_default()
        )
    }

    pub fn contents_api(&self) -> Result<GitHubContents> {
        let mut builder = GitHubContentsBuilder::default();
        builder.api_url(self.api_url.as_str());
        if let Some(owner) = &self.owner {
            builder.owner(owner.trim());
        }
        if let Some(repo) = &self.repo {
            builder.repo(repo.trim());
        }
        if let Some(branch) = &self.branch {
            builder.branch(branch.trim());
        }
        if let Some(token) = &self.token {
            builder.token(token.trim());
        }
        builder
            .build()
            .with_context(|| "Failed to set up the GitHub client")
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or_default().is_empty()
}

impl PDF {
    /// Overwrite file values with anything given on the command line or in the environment
    pub fn merge(&mut self, args: &RenderArgs) {
        if let Some(outfile) = &args.outfile {
            self.outfile = outfile.clone();
        }
        if let Some(converter) = args.converter {
            self.converter = converter;
        }
        if let Some(program) = &args.program {
            self.program = Some(program.clone());
        }
        if let Some(theme) = args.theme {
            self.theme = theme;
        }
        if args.keep_html {
            self.keep_html = true;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sinks::{Converter, SyntaxTheme};
    use std::path::PathBuf;

    fn complete_args() -> SourceArgs {
        SourceArgs {
            token: Some("secret".to_string()),
            owner: Some("someone".to_string()),
            repo: Some("notes".to_string()),
            branch: Some("main".to_string()),
            folders: vec!["Week 1".to_string()],
            ..SourceArgs::default()
        }
    }

    #[test]
    fn missing_file_is_empty_configuration() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let config =
            Configuration::load(&dir.path().join("nope.toml")).expect("can load missing file");
        assert!(config.source.folders.is_empty());
        assert_eq!(config.source.extensions, default_extensions());
        assert_eq!(config.source.api_url, DEFAULT_API_URL);
        assert_eq!(config.pdf.outfile, PathBuf::from("LectureNotes.pdf"));
    }

    #[test]
    fn can_load_file() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("notes-book.toml");
        std::fs::write(
            &path,
            r#"
[source]
owner = "someone"
repo = "notes"
branch = "main"
folders = ["Week 1", "Week 2"]
extensions = [".md"]

[pdf]
outfile = "book.pdf"
theme = "Solarized (light)"
"#,
        )
        .expect("can write config");

        let config = Configuration::load(&path).expect("can load config");
        assert_eq!(config.source.owner.as_deref(), Some("someone"));
        assert_eq!(config.source.folders, vec!["Week 1", "Week 2"]);
        assert_eq!(config.source.extensions, vec![".md"]);
        assert_eq!(config.source.token, None);
        assert_eq!(config.pdf.outfile, PathBuf::from("book.pdf"));
        assert_eq!(config.pdf.theme, SyntaxTheme::SolarizedLight);
        assert_eq!(config.pdf.converter, Converter::WeasyPrint);
    }

    #[test]
    fn bad_file_is_an_error() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("notes-book.toml");
        std::fs::write(&path, "[source]\nfolders = 3\n").expect("can write config");
        assert!(Configuration::load(&path).is_err());
    }

    #[test]
    fn token_is_never_serialized() {
        let mut config = Configuration::default();
        config.source.merge(&complete_args());
        let toml = toml::to_string_pretty(&config).expect("can serialize config");
        assert!(!toml.contains("secret"));
        assert!(toml.contains("owner = \"someone\""));
    }

    #[test]
    fn command_line_overrides_file() {
        let mut source = SourceConfig {
            owner: Some("from-file".to_string()),
            repo: Some("file-repo".to_string()),
            folders: vec!["a".to_string()],
            ..SourceConfig::default()
        };
        source.merge(&SourceArgs {
            owner: Some("from-cli".to_string()),
            folders: vec!["b".to_string(), "c".to_string()],
            ..SourceArgs::default()
        });

        assert_eq!(source.owner.as_deref(), Some("from-cli"));
        assert_eq!(source.repo.as_deref(), Some("file-repo"));
        assert_eq!(source.folders, vec!["b", "c"]);
        assert_eq!(source.extensions, default_extensions());
    }

    #[test]
    fn render_args_override_pdf() {
        let mut pdf = PDF::default();
        pdf.merge(&RenderArgs {
            outfile: Some(PathBuf::from("other.pdf")),
            converter: Some(Converter::Chromium),
            keep_html: true,
            ..RenderArgs::default()
        });
        assert_eq!(pdf.outfile, PathBuf::from("other.pdf"));
        assert_eq!(pdf.converter, Converter::Chromium);
        assert_eq!(pdf.theme, SyntaxTheme::InspiredGitHub);
        assert!(pdf.keep_html);
    }

    #[test]
    fn folders_are_normalised() {
        let source = SourceConfig {
            folders: vec![
                " Week 1 ".to_string(),
                "/Week 2/".to_string(),
                "".to_string(),
                "   ".to_string(),
                "/".to_string(),
                "Labs/C++".to_string(),
            ],
            ..SourceConfig::default()
        };
        assert_eq!(source.folders(), vec!["Week 1", "Week 2", "", "Labs/C++"]);
    }

    #[test]
    fn validation_names_every_missing_setting() {
        let source = SourceConfig {
            owner: Some("someone".to_string()),
            token: Some("  ".to_string()),
            folders: vec!["  ".to_string()],
            ..SourceConfig::default()
        };
        let message = source.validate().expect_err("is incomplete").to_string();
        assert!(message.contains("GITHUB_TOKEN"));
        assert!(!message.contains("GITHUB_OWNER"));
        assert!(message.contains("GITHUB_REPO"));
        assert!(message.contains("GITHUB_BRANCH"));
        assert!(message.contains("FOLDERS"));
    }

    #[test]
    fn env_file_feeds_the_command_line() {
        use crate::cli::{Cli, Commands};
        use clap::Parser;

        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join(ENV_FILE);
        std::fs::write(&path, "# notes\nGITHUB_BRANCH=from-env-file\n").expect("can write env file");

        load_env_file(&path).expect("can load env file");
        assert_eq!(
            std::env::var("GITHUB_BRANCH").as_deref(),
            Ok("from-env-file")
        );

        let cli = Cli::try_parse_from(["notes-book", "list"]).expect("can parse arguments");
        let Commands::List(args) = cli.command else {
            panic!("expected the list command");
        };
        assert_eq!(args.branch.as_deref(), Some("from-env-file"));
    }

    #[test]
    fn missing_env_file_is_fine() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        load_env_file(&dir.path().join(ENV_FILE)).expect("missing file is not an error");
    }

    #[test]
    fn malformed_env_file_is_an_error() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join(ENV_FILE);
        std::fs::write(&path, "NOT A VALID LINE\n").expect("can write env file");
        assert!(load_env_file(&path).is_err());
    }

    #[test]
    fn complete_settings_validate() {
        let mut source = SourceConfig::default();
        source.merge(&complete_args());
        source.validate().expect("is complete");
        assert_eq!(source.title(), "someone/notes@main");
        source.contents_api().expect("can build contents client");
    }
}
