//! Command line arguments.
//!
//! Connection settings fall back to `QGEN_*` environment variables, which
//! `main` may load from a `.env` file.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use qgen_core::{ClientConfig, DEFAULT_BASE_URL};

#[derive(Debug, Parser)]
#[command(name = "qgen")]
#[command(about = "Upload source documents and generate question papers", long_about = None)]
pub struct Cli {
    /// Paper server base URL
    #[arg(long, global = true, env = "QGEN_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Give up on a request after this many milliseconds (waits forever by default)
    #[arg(long, global = true, env = "QGEN_TIMEOUT_MS")]
    pub timeout_ms: Option<u32>,

    /// Print the server reply as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Hide the progress line
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.as_str()).with_timeout(self.timeout_ms)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upload source files and print the new session id
    Upload {
        /// Files to upload, sent in the given order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Generate a paper for an existing session
    Generate {
        /// Session id returned by `upload`
        #[arg(short, long, env = "QGEN_SESSION")]
        session: String,

        /// Paper draft (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Upload files, then generate a paper for the new session
    Run {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Paper draft (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Validate a paper draft without contacting the server
    Check {
        /// Paper draft (JSON)
        config: PathBuf,
    },

    /// Print an example paper draft
    ExampleDraft,
}
