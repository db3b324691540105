//! Application configuration.
//!
//! Centralized configuration for the Question Paper Studio frontend.
//! In development, these are hardcoded. In production, they could be
//! loaded from environment or a config file.

use qgen_core::ClientConfig;

/// Backend API base URL.
///
/// Empty: the app is served by the paper server itself, so `/upload` and
/// `/generate/{session}` are same-origin (trunk proxies them in development).
pub const BACKEND_URL: &str = "";

/// Client-side request timeout in milliseconds.
///
/// `None` waits for the server however long generation takes.
pub const REQUEST_TIMEOUT_MS: Option<u32> = None;

/// How long a notification toast stays on screen.
pub const NOTIFICATION_TIMEOUT_MS: u32 = 5_000;

/// Maximum notifications kept on screen at once.
pub const MAX_NOTIFICATIONS: usize = 5;

/// Id of the JSON block the server embeds in the configure page.
pub const SESSION_DATA_ELEMENT: &str = "session-data";

/// Application name shown in the page title.
pub const APP_NAME: &str = "Question Paper Studio";

/// Core client configuration derived from the constants above.
pub fn client_config() -> ClientConfig {
    ClientConfig::new(BACKEND_URL).with_timeout(REQUEST_TIMEOUT_MS)
}
