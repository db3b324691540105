//! qgen - Headless client for Question Paper Studio
//!
//! Drives the same `qgen_core` flows as the browser pages, with reqwest as
//! the transport and the terminal as the shell.
//!
//! # Commands
//!
//! ```bash
//! qgen upload notes.pdf syllabus.txt          # Create a session
//! qgen generate --session abc --config p.json # Generate a paper for it
//! qgen run notes.pdf --config p.json          # Both in one go
//! qgen check p.json                           # Validate a draft offline
//! qgen example-draft > p.json                 # Start from an example
//! ```
//!
//! # Modules
//!
//! - [`args`] - clap definitions, `QGEN_*` environment fallbacks
//! - [`commands`] - One function per command
//! - [`transport`] - reqwest transport, tokio clock, terminal shell
//! - [`files`] - Local files as upload sources
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - CLI error type

pub mod args;
pub mod commands;
pub mod error;
pub mod files;
pub mod logging;
pub mod transport;

pub use args::{Cli, Commands};
pub use error::{CliError, CliResult};
pub use files::LocalFile;
pub use logging::{init_logging, LogConfig};
pub use transport::{cli_host, CliHost, ReqwestTransport, TerminalShell, TokioClock};
