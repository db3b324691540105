//! Client configuration: backend location, fixed delays, optional timeout.

/// Default backend base URL (the paper server's development address).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Multipart field key shared by every uploaded file.
pub const UPLOAD_FIELD: &str = "files";

/// Delay between the upload success notification and navigation.
pub const UPLOAD_REDIRECT_DELAY_MS: u32 = 1000;

/// Delay between the generation success notification and navigation.
pub const GENERATION_REDIRECT_DELAY_MS: u32 = 1500;

/// Where the client talks to and how long it waits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash. Empty means same origin.
    pub base_url: String,
    /// Client-side request timeout. `None` waits indefinitely.
    pub request_timeout_ms: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_ms: None,
        }
    }

    /// Requests issued from the page that served the app.
    pub fn same_origin() -> Self {
        Self::new("")
    }

    pub fn with_timeout(mut self, timeout_ms: Option<u32>) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// `POST` target for the file upload.
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    /// `POST` target for paper generation, scoped to `session_id`.
    pub fn generate_url(&self, session_id: &str) -> String {
        format!("{}/generate/{}", self.base_url, session_id)
    }

    /// Resolve a server redirect (usually a path) against the base URL.
    pub fn resolve(&self, redirect: &str) -> String {
        if redirect.starts_with("http://") || redirect.starts_with("https://") {
            redirect.to_string()
        } else if redirect.starts_with('/') {
            format!("{}{}", self.base_url, redirect)
        } else {
            format!("{}/{}", self.base_url, redirect)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let config = ClientConfig::new("http://example.test/");
        assert_eq!(config.upload_url(), "http://example.test/upload");
        assert_eq!(config.generate_url("abc"), "http://example.test/generate/abc");
    }

    #[test]
    fn test_same_origin_paths() {
        let config = ClientConfig::same_origin();
        assert_eq!(config.upload_url(), "/upload");
        assert_eq!(config.resolve("/preview/3"), "/preview/3");
    }

    #[test]
    fn test_resolve_absolute_redirect() {
        let config = ClientConfig::default();
        assert_eq!(config.resolve("https://cdn.test/x"), "https://cdn.test/x");
        assert_eq!(config.resolve("/configure/a"), "http://localhost:8000/configure/a");
    }
}
