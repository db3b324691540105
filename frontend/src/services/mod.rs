//! Backend and browser services.
//!
//! # Services
//!
//! - [`api`] - Multipart transport to the paper server
//! - [`browser`] - Files, timers, page shell and embedded session data

pub mod api;
pub mod browser;

pub use api::*;
pub use browser::*;
