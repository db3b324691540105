//! reqwest transport and the terminal implementations of the core collaborators.

use std::cell::RefCell;
use std::io::Write;
use std::time::Duration;

use qgen_core::{
    Clock, ClientConfig, FormField, Host, HttpReply, NotificationKind, PreparedRequest, Shell,
    Transport, TransportError,
};
use reqwest::multipart::{Form, Part};

use crate::files::LocalFile;

// =============================================================================
// Transport
// =============================================================================

/// Multipart POSTs over a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn multipart(fields: Vec<FormField<LocalFile>>) -> Result<Form, TransportError> {
        let mut form = Form::new();
        for field in fields {
            form = match field {
                FormField::Text { name, value } => form.text(name, value),
                FormField::File { name, file } => {
                    let data = tokio::fs::read(&file.path).await.map_err(|e| {
                        TransportError::new(format!("Failed to read {}: {}", file.path.display(), e))
                    })?;
                    let part = Part::bytes(data)
                        .file_name(file.name.clone())
                        .mime_str(&file.mime)
                        .map_err(|e| TransportError::new(format!("MIME parse error: {}", e)))?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

impl Transport for ReqwestTransport {
    type File = LocalFile;

    async fn post_form(&self, request: PreparedRequest<LocalFile>) -> Result<HttpReply, TransportError> {
        let form = Self::multipart(request.form.into_fields()).await?;

        let response = self
            .client
            .post(&request.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(url = %request.url, status, bytes = body.len(), "reply received");

        Ok(HttpReply::new(status, body))
    }
}

// =============================================================================
// Clock
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    async fn sleep(&self, ms: u32) {
        tokio::time::sleep(Duration::from_millis(u64::from(ms))).await;
    }
}

// =============================================================================
// Shell
// =============================================================================

/// Prints notifications and progress to stderr and remembers where the
/// flow wanted to navigate.
#[derive(Debug, Default)]
pub struct TerminalShell {
    /// Draw the progress line (off when stderr is not read by a person).
    pub show_progress: bool,
    navigated: RefCell<Option<String>>,
}

impl TerminalShell {
    pub fn new(show_progress: bool) -> Self {
        Self {
            show_progress,
            navigated: RefCell::new(None),
        }
    }

    /// Last navigation target, if any.
    pub fn navigated(&self) -> Option<String> {
        self.navigated.borrow().clone()
    }
}

impl Shell for TerminalShell {
    fn notify(&self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Success => {
                tracing::info!(text = message, "success notification");
                eprintln!("✅ {}", message);
            }
            NotificationKind::Error => {
                tracing::warn!(text = message, "error notification");
                eprintln!("❌ {}", message);
            }
        }
    }

    fn show_progress(&self) {
        tracing::debug!("progress shown");
    }

    fn set_progress(&self, percent: f64) {
        tracing::trace!(percent, "progress");
        if self.show_progress {
            eprint!("\r   ⏳ {:>3.0}%", percent);
            let _ = std::io::stderr().flush();
        }
    }

    fn hide_progress(&self) {
        tracing::debug!("progress hidden");
        if self.show_progress {
            eprintln!();
        }
    }

    fn set_submit_enabled(&self, enabled: bool) {
        tracing::trace!(enabled, "submit switch");
    }

    fn navigate(&self, target: &str) {
        if self.show_progress {
            eprintln!();
        }
        eprintln!("➡️  Next: {}", target);
        *self.navigated.borrow_mut() = Some(target.to_string());
    }
}

/// Host wired to the terminal.
pub type CliHost = Host<ReqwestTransport, TokioClock, TerminalShell>;

pub fn cli_host(config: ClientConfig, show_progress: bool) -> CliHost {
    Host::new(
        ReqwestTransport::default(),
        TokioClock,
        TerminalShell::new(show_progress),
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_remembers_navigation() {
        let shell = TerminalShell::new(false);
        assert_eq!(shell.navigated(), None);
        shell.navigate("http://localhost:8000/configure/abc");
        assert_eq!(shell.navigated().as_deref(), Some("http://localhost:8000/configure/abc"));
    }

    #[tokio::test]
    async fn test_multipart_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"Newton's laws").unwrap();
        let file = LocalFile::open(&path).unwrap();

        let fields = vec![
            FormField::Text { name: "title".into(), value: "Quiz".into() },
            FormField::File { name: "files".into(), file },
        ];
        assert!(ReqwestTransport::multipart(fields).await.is_ok());
    }

    #[tokio::test]
    async fn test_multipart_missing_file_is_transport_error() {
        let file = LocalFile {
            path: "/nonexistent/qgen/notes.txt".into(),
            name: "notes.txt".into(),
            size: 0,
            mime: "text/plain".into(),
        };
        let fields = vec![FormField::File { name: "files".into(), file }];
        let err = ReqwestTransport::multipart(fields).await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
