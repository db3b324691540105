//! UI Components for Question Paper Studio.
//!
//! # Layout Components
//! - [`Hero`] - Page title and description
//! - [`Footer`] - Page footer
//! - [`NotificationList`] - Success / error toasts
//!
//! # Pages
//! - [`UploadPage`] - File selection with drag & drop, upload with progress bar
//! - [`ConfigurePage`] - Question sets, totals, topics, generation modal
//!
//! # Progress
//! - [`ProgressBar`] - Inline upload progress
//! - [`GenerationModal`] - Blocking generation progress

mod configure;
mod footer;
mod hero;
mod notifications;
mod progress;
mod upload;

pub use configure::*;
pub use footer::*;
pub use hero::*;
pub use notifications::*;
pub use progress::*;
pub use upload::*;
