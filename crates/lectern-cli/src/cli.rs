use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Course-staff tooling for the lecture viewer's media directory.
#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Inspect and validate the lecture viewer's media directory", long_about = None)]
pub struct Cli {
    /// Site config file (defaults to the platform config dir, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the embeddable player URL for a recording URL
    Embed {
        url: String,
    },
    /// Print the media lookup key for a lecture page path
    Key {
        src: String,
    },
    /// Show the slide and recording links the viewer would display for a lecture
    Show {
        /// Lecture page path, e.g. lectures/lec03.html
        src: String,
        /// Media directory file path or http(s) URL (defaults to the configured path)
        #[arg(short, long)]
        media: Option<String>,
        /// Print the rendered link markup instead of a summary
        #[arg(long)]
        html: bool,
    },
    /// Validate a media directory document
    Check {
        /// Media directory file path or http(s) URL (defaults to the configured path)
        #[arg(short, long)]
        media: Option<String>,
        /// Exit non-zero when any warning is found
        #[arg(long)]
        strict: bool,
    },
}
