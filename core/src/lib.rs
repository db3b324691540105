//! # qgen-core - Upload session & paper configuration state machines
//!
//! Client-side logic of Question Paper Studio, independent of any rendering
//! technology. Pages (Leptos in the browser, the `qgen` CLI in a terminal)
//! own an [`UploadSession`] or a [`ConfigurationBuilder`] and plug in a
//! [`Transport`], a [`Clock`] and a [`Shell`].
//!
//! ## Workflow
//!
//! ```text
//! ┌──────────────┐  POST /upload   ┌─────────┐  redirect /configure/{session}
//! │ UploadSession│────────────────▶│ backend │──────────────────────────────┐
//! └──────────────┘                 └─────────┘                              │
//!                                                                          ▼
//! ┌────────────────────┐  POST /generate/{session}  ┌─────────┐  redirect /preview/{paper}
//! │ConfigurationBuilder│───────────────────────────▶│ backend │──────────────────────▶
//! └────────────────────┘                            └─────────┘
//! ```
//!
//! Only the session identifier crosses from the first stage to the second.
//!
//! ## Modules
//!
//! - [`upload`] - File selection and upload flow
//! - [`builder`] - Question sets, totals, validation, generation flow
//! - [`question`] - Question types, marks, counts
//! - [`progress`] - Optimistic progress policies
//! - [`protocol`] - Multipart form and reply contract
//! - [`host`] - Collaborator traits and the dispatch loop
//! - [`config`] - Endpoints, delays, timeout
//! - [`error`] - Error types

// Core modules
pub mod config;
pub mod error;

// Model
pub mod question;
pub mod progress;
pub mod protocol;

// Flows
pub mod host;
pub mod upload;
pub mod builder;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{
    ClientConfig, DEFAULT_BASE_URL, GENERATION_REDIRECT_DELAY_MS, UPLOAD_FIELD,
    UPLOAD_REDIRECT_DELAY_MS,
};
pub use error::{ConfigError, ConfigResult, SubmitError, SubmitResult, TransportError, MARKS_TOLERANCE};
pub use question::{
    Marks, QuestionConfig, QuestionCount, QuestionSet, QuestionSetSpec, QuestionSetUpdate,
    QuestionType, ALLOWED_MARKS, MAX_QUESTION_COUNT,
};
pub use progress::{OptimisticProgress, ProgressPolicy, GENERATION_PROGRESS, UPLOAD_PROGRESS};
pub use protocol::{interpret, Form, FormField, HttpReply, PreparedRequest, ServerReply};
pub use host::{Clock, Host, NotificationKind, Shell, Transport};
pub use upload::{format_size, perform_upload, FileSource, SelectedFile, UploadPhase, UploadSession};
pub use builder::{
    perform_generation, within_tolerance, BuilderPhase, ConfigurationBuilder, GenerationFailure,
    PaperDraft, SessionId, TotalCheck,
};
