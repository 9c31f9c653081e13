use anyhow::{Context, Result};
use cli::Cli;
use config::Configuration;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, warn};
use sinks::{HtmlToPdf, RenderStats};
use source::{ContentsApi, FolderWalker, Source, SourceProvider};
use std::process::ExitCode;

mod cli;
mod config;
mod config_wizard;
mod highlight;
mod render;
mod sinks;
mod source;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    config::load_env_file(std::path::Path::new(config::ENV_FILE))?;
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Config => config_wizard::run(),
        cli::Commands::List(args) => {
            let config = Configuration::for_source(args)?;
            let api = config.source.contents_api()?;
            let source = collect(&config, &api)?;
            for file in source.files.iter() {
                println!("{}", file.path);
            }
            println!();
            println!("  Files: {}", source.files.len());
            Ok(())
        }
        cli::Commands::Render(args) => {
            let config = Configuration::for_render(args)?;
            let api = config.source.contents_api()?;
            let converter = config.pdf.external_converter();

            let progress = ProgressBar::new(0);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .with_context(|| "Failed to parse progress style")?
                    .progress_chars("#>-"),
            );

            match compile(&config, &api, &converter, &progress)? {
                Outcome::Written(stats) => {
                    println!();
                    println!(
                        "  {} {}",
                        console::style("PDF saved as").green(),
                        config.pdf.outfile.display()
                    );
                    println!("  Files:    {}", stats.section_count);
                    println!("  HTML:     {} bytes", stats.html_bytes);
                }
                Outcome::NothingCollected => {}
                Outcome::Failed => {
                    println!();
                    println!("  {}", console::style("No PDF was written").yellow());
                }
            }
            Ok(())
        }
    }
}

/// How a render run ended. None of these are process failures.
#[derive(Debug)]
enum Outcome {
    Written(RenderStats),
    NothingCollected,
    Failed,
}

/// Walk every configured folder into a [`Source`]
fn collect(config: &Configuration, api: &dyn ContentsApi) -> Result<Source> {
    let mut source = Source::default();
    source.set_title(config.source.title());

    let walker = FolderWalker::new(api, config.source.folders(), config.source.filter());
    walker
        .apply(&mut source)
        .with_context(|| "Failed to collect files")?;
    Ok(source)
}

/// Collect, render and export. Rendering errors are logged, not returned.
fn compile(
    config: &Configuration,
    api: &dyn ContentsApi,
    converter: &dyn HtmlToPdf,
    progress: &ProgressBar,
) -> Result<Outcome> {
    let source = collect(config, api)?;
    if source.is_empty() {
        warn!("No files collected. Please check folder paths or network connection.");
        return Ok(Outcome::NothingCollected);
    }

    progress.set_length(source.files.len() as u64);
    progress.set_message("Rendering PDF...");

    match config.pdf.render(&source, converter, progress) {
        Ok(stats) => Ok(Outcome::Written(stats)),
        Err(e) => {
            progress.abandon();
            error!("Error generating PDF: {e:#}");
            Ok(Outcome::Failed)
        }
    }
}
