//! Interactive configuration wizard for creating `notes-book.toml`.
//!
//! The wizard collects the repository coordinates, the folders to collect and the PDF
//! output options through a series of prompts. The access token is never asked for;
//! it always comes from `GITHUB_TOKEN` or `--token`.

use crate::cli::DEFAULT_CONFIG_FILE;
use crate::config::{Configuration, SourceConfig};
use crate::sinks::{Converter, SyntaxTheme, PDF};
use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};
use std::path::PathBuf;

/// Run the interactive configuration wizard.
///
/// Writes `notes-book.toml` to the current directory, asking before replacing an
/// existing one.
pub fn run() -> Result<()> {
    let theme = ColorfulTheme {
        ..ColorfulTheme::default()
    };

    let owner: String = Input::with_theme(&theme)
        .with_prompt("Repository owner")
        .allow_empty(false)
        .interact()
        .with_context(|| "Failed to obtain repository owner")?;
    let repo: String = Input::with_theme(&theme)
        .with_prompt("Repository name")
        .allow_empty(false)
        .interact()
        .with_context(|| "Failed to obtain repository name")?;
    let branch: String = Input::with_theme(&theme)
        .with_prompt("Branch")
        .default("main".to_string())
        .interact()
        .with_context(|| "Failed to obtain branch")?;

    let mut folders: Vec<String> = Vec::default();
    'folders: loop {
        if !folders.is_empty() {
            println!("Folders: [{}]", folders.join("], ["));
        }
        let folder: String = Input::with_theme(&theme)
            .with_prompt("Folder to include, in book order (`/` for the root, leave empty for done)")
            .allow_empty(true)
            .interact()?;
        if folder.trim().is_empty() {
            if folders.is_empty() {
                println!("At least one folder is needed");
                continue 'folders;
            }
            break 'folders;
        }
        folders.push(folder.trim().to_string());
    }

    let mut extensions = crate::config::default_extensions();
    println!("Collected file types: [{}]", extensions.join("], ["));
    if Confirm::with_theme(&theme)
        .with_prompt("Do you want to change which file types are collected?")
        .default(false)
        .interact()?
    {
        let suffixes: String = Input::with_theme(&theme)
            .with_prompt("Comma separated file name suffixes")
            .with_initial_text(extensions.join(","))
            .allow_empty(false)
            .interact()?;
        extensions = suffixes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
    }

    let source = SourceConfig {
        owner: Some(owner),
        repo: Some(repo),
        branch: Some(branch),
        folders,
        extensions,
        ..SourceConfig::default()
    };

    let outfile: String = Input::with_theme(&theme)
        .with_prompt("Output pdf file")
        .default("LectureNotes.pdf".to_string())
        .interact()?;
    let mut outfile = PathBuf::from(outfile);
    let ext = outfile
        .extension()
        .map(std::ffi::OsStr::to_ascii_lowercase)
        .unwrap_or_default();
    if ext != *"pdf" {
        outfile.set_extension("pdf");
    }

    let syntax_theme = FuzzySelect::with_theme(&theme)
        .with_prompt("Syntax highlighting theme")
        .items(SyntaxTheme::all())
        .default(0)
        .interact()?;
    let syntax_theme = SyntaxTheme::all()[syntax_theme];

    let converter = FuzzySelect::with_theme(&theme)
        .with_prompt("HTML to PDF converter")
        .items(Converter::all())
        .default(0)
        .interact()?;
    let converter = Converter::all()[converter];

    let base_font_size: f32 = Input::with_theme(&theme)
        .with_prompt("Base font size in pixels")
        .default(10.0)
        .interact()?;

    let pdf = PDF {
        outfile,
        theme: syntax_theme,
        converter,
        font_size_body_px: base_font_size.round(),
        font_size_heading_px: (base_font_size * 1.3).round(),
        font_size_code_px: base_font_size.round(),
        ..PDF::default()
    };

    let config = Configuration { source, pdf };

    let config =
        toml::to_string_pretty(&config).with_context(|| "Failed to convert configuration to TOML")?;

    let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if config_path.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!(
                "{DEFAULT_CONFIG_FILE} already exists, do you want to override it?"
            ))
            .interact()?
    {
        println!("Configuration:");
        println!("{}", config);
    } else {
        std::fs::write(&config_path, config)
            .with_context(|| "Failed to write configuration file")?;
        println!("{DEFAULT_CONFIG_FILE} written!");
        println!("Set GITHUB_TOKEN before running `notes-book render`.");
    }

    Ok(())
}
