mod cli;
mod error;
mod preview;
mod source;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use directories::ProjectDirs;
use lectern_core::media::fetch_directory;
use lectern_core::{embed, lecture_key, SiteConfig};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::CliError;
use source::CliFetcher;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "lectern=debug"
    } else {
        "lectern=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Embed { url } => {
            println!("{}", embed::to_embed_url(&url));
        }
        Commands::Key { src } => {
            let key = lecture_key(&src);
            if key.is_empty() {
                return Err(CliError::NoLectureKey(src));
            }
            println!("{key}");
        }
        Commands::Show { src, media, html } => {
            let location = media.unwrap_or_else(|| config.media.path.clone());
            let directory = fetch_directory(&CliFetcher::new(), &location).await?;
            let preview = preview::render(&config, &src, directory);

            if html {
                println!("{}", preview.html);
                return Ok(ExitCode::SUCCESS);
            }
            println!("lecture:    {}", display_key(&preview.key));
            match &preview.slides.href {
                Some(href) => println!("slides:     {} -> {href}", preview.slides.label),
                None => println!("slides:     {} (disabled)", preview.slides.label),
            }
            if preview.recordings.is_empty() {
                println!("recordings: {}", preview.recordings_text);
            } else {
                println!("recordings:");
                for link in &preview.recordings {
                    let href = link.href.as_deref().unwrap_or("(disabled)");
                    println!("  {} -> {href}", link.label);
                }
            }
        }
        Commands::Check { media, strict } => {
            let location = media.unwrap_or_else(|| config.media.path.clone());
            let directory = fetch_directory(&CliFetcher::new(), &location).await?;
            let issues = directory.lint();

            for issue in &issues {
                println!("warning: {issue}");
            }
            println!(
                "{location}: {} lecture(s), {} warning(s)",
                directory.len(),
                issues.len()
            );
            if strict && !issues.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn display_key(key: &lectern_core::LectureKey) -> &str {
    if key.is_empty() {
        "(none)"
    } else {
        key.as_str()
    }
}

/// `--config` if given, else the user config file, else built-in defaults.
fn load_config(explicit: Option<&Path>) -> Result<SiteConfig, CliError> {
    let path = explicit.map(Path::to_path_buf).unwrap_or_else(user_config_path);
    if explicit.is_some() && !path.exists() {
        return Err(CliError::Lectern(lectern_core::LecternError::Config(format!(
            "{} does not exist",
            path.display()
        ))));
    }
    Ok(SiteConfig::load_or_default(&path)?)
}

/// Path to the user config file (XDG on Linux, AppData on Windows).
fn user_config_path() -> PathBuf {
    ProjectDirs::from("", "", "lectern")
        .map(|d| d.config_dir().join("site.toml"))
        .unwrap_or_else(|| PathBuf::from("site.toml"))
}
