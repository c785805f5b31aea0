//! CLI definitions for AutoApply.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// AutoApply CLI.
#[derive(Parser)]
#[command(name = "autoapply")]
#[command(about = "Fill and submit job applications on supported job boards")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults to ~/.autoapply/config.toml)
    #[arg(short, long, global = true, env = "AUTOAPPLY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List supported job boards and their selectors
    Boards {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Classify a URL by job board
    Detect {
        /// Job posting URL
        url: String,
    },

    /// Run auto-apply on a browser tab
    Apply {
        /// Open this URL in a new tab first
        #[arg(long, conflicts_with = "target")]
        url: Option<String>,

        /// Attach to this CDP target id instead of the first open tab
        #[arg(long)]
        target: Option<String>,

        /// Profile JSON file (overrides the configured profile source)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Chrome remote-debugging endpoint (overrides the config)
        #[arg(long)]
        browser: Option<String>,
    },

    /// Serve the runtime-message endpoint over HTTP
    Serve {
        /// Server host (overrides the config)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides the config)
        #[arg(long)]
        port: Option<u16>,
    },
}
