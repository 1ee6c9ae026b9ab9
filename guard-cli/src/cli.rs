//! CLI parser.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mguard")]
#[command(about = "Mention guard CLI: scan, link, import, classify", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Find posts mentioning an identity, classify each one, and print the report as JSON.
    Scan {
        /// Handle to match (with or without leading `@`).
        #[arg(long, requires = "name", required_unless_present = "profile")]
        handle: Option<String>,
        /// Display name to match, e.g. "Alice Smith".
        #[arg(long, requires = "handle")]
        name: Option<String>,
        /// Resolve handle and display name from a stored social profile instead.
        #[arg(long, conflicts_with_all = ["handle", "name"])]
        profile: Option<String>,
        /// Classifier calls in flight; overrides PIPELINE_CONCURRENCY.
        #[arg(short, long)]
        concurrency: Option<usize>,
        #[arg(long)]
        pretty: bool,
    },
    /// Resolve a social profile and print the identity mentions are matched against.
    Link {
        #[arg(short, long)]
        profile: String,
    },
    /// Load `{"users": [...], "posts": [...]}` into the post store.
    Import {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Classify a single text and print category and probability.
    Classify {
        #[arg(short, long)]
        text: String,
    },
}
