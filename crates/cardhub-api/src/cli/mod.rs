//! CLI command definitions for the `cardhub` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod content;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cardhub_types::content::ContentKind;

/// Serve a character card catalogue.
#[derive(Parser)]
#[command(name = "cardhub", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config.toml (defaults to the platform config directory).
    #[arg(long, global = true, env = "CARDHUB_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database URL (overrides config.toml).
    #[arg(long, global = true, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on (overrides config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// Import content from a JSON file (one object or an array of objects).
    Import {
        /// Kind of content in the file (e.g. character_card, story_book).
        #[arg(short, long)]
        kind: ContentKind,

        /// JSON file to import.
        file: PathBuf,
    },

    /// List stored content of one kind.
    #[command(alias = "ls")]
    List {
        /// Kind of content to list.
        kind: ContentKind,
    },
}
