//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Notification Types** - Toasts raised by the upload and generation flows
//! - **Session Types** - Data the server embeds in the configure page

use std::sync::atomic::{AtomicU64, Ordering};

use qgen_core::NotificationKind;
use serde::{Deserialize, Serialize};

// =============================================================================
// Notification Types
// =============================================================================

static NEXT_NOTIFICATION_ID: AtomicU64 = AtomicU64::new(1);

/// A single toast.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    /// Unique id, used as the list key and for dismissal
    pub id: u64,
    /// Success or error
    pub kind: NotificationKind,
    /// Text shown to the user
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: NEXT_NOTIFICATION_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            message: message.into(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        }
    }

    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            NotificationKind::Success => "notification notification-success",
            NotificationKind::Error => "notification notification-error",
        }
    }

    /// Get emoji prefix for display.
    pub fn emoji(&self) -> &'static str {
        match self.kind {
            NotificationKind::Success => "✅",
            NotificationKind::Error => "❌",
        }
    }
}

// =============================================================================
// Session Types
// =============================================================================

/// What the server extracted from the uploaded files.
///
/// Embedded as JSON in the configure page. Patterns are kept raw so one
/// malformed entry does not discard the others.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub suggested_patterns: Vec<serde_json::Value>,
}

impl SessionContext {
    /// Parse the embedded block; anything unreadable yields an empty context.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(context) => context,
            Err(e) => {
                log::warn!("⚠️ Ignoring unreadable session data: {}", e);
                Self::default()
            }
        }
    }
}
