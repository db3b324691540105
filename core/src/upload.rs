//! Upload session manager.
//!
//! Holds the files picked or dropped by the user, keeps the submit control's
//! enablement in sync, and uploads the selection as one multipart request.
//!
//! ```text
//! Idle ──acquire──▶ Ready(≥1) ──submit──▶ Submitting ──▶ Succeeded (navigates)
//!                     ▲                        │
//!                     └──────── Failed ◀───────┘
//! ```

use rand::Rng;

use crate::config::{UPLOAD_FIELD, UPLOAD_REDIRECT_DELAY_MS};
use crate::error::SubmitError;
use crate::host::{Clock, Host, NotificationKind, Shell, Transport};
use crate::progress::UPLOAD_PROGRESS;
use crate::protocol::{Form, PreparedRequest, ServerReply};

/// Platform file handle (browser `File`, local path, test double).
pub trait FileSource: Clone {
    fn file_name(&self) -> String;
    fn size_bytes(&self) -> u64;
    fn mime_type(&self) -> String;
}

/// One user-chosen file plus the handle needed to send it.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile<F> {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub source: F,
}

impl<F: FileSource> SelectedFile<F> {
    pub fn new(source: F) -> Self {
        Self {
            name: source.file_name(),
            size_bytes: source.size_bytes(),
            mime_type: source.mime_type(),
            source,
        }
    }
}

impl<F> SelectedFile<F> {
    /// Size for the preview list, e.g. `"1.5 MB"`.
    pub fn display_size(&self) -> String {
        format_size(self.size_bytes)
    }
}

/// Human-readable byte count (powers of 1024, two decimals, trailing zeros trimmed).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut exponent = 0;
    while value >= 1024.0 && exponent < UNITS.len() - 1 {
        value /= 1024.0;
        exponent += 1;
    }
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exponent])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Ready,
    Submitting,
    Succeeded,
}

/// File selection and upload state for one upload page.
#[derive(Debug, Clone)]
pub struct UploadSession<F> {
    files: Vec<SelectedFile<F>>,
    phase: UploadPhase,
}

impl<F> Default for UploadSession<F> {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            phase: UploadPhase::Idle,
        }
    }
}

impl<F: FileSource> UploadSession<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[SelectedFile<F>] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.files.is_empty() && !self.is_locked()
    }

    /// Replace the selection with `files` (picker change or drop).
    ///
    /// Ignored once a submission is in flight or has succeeded.
    pub fn acquire<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = F>,
    {
        if self.is_locked() {
            return;
        }
        self.files = files.into_iter().map(SelectedFile::new).collect();
        self.phase = self.resting_phase();
        log::debug!("📁 {} file(s) selected", self.files.len());
    }

    /// Drop the file at `index`; out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<SelectedFile<F>> {
        if self.is_locked() || index >= self.files.len() {
            return None;
        }
        let removed = self.files.remove(index);
        self.phase = self.resting_phase();
        Some(removed)
    }

    /// Enter `Submitting` and build the multipart request.
    ///
    /// `None` when there is nothing to send, a request is already out, or
    /// the upload already succeeded.
    pub fn begin_submit(&mut self, upload_url: &str) -> Option<PreparedRequest<F>> {
        if !self.can_submit() {
            return None;
        }
        let form = self
            .files
            .iter()
            .fold(Form::new(), |form, f| form.file(UPLOAD_FIELD, f.source.clone()));
        self.phase = UploadPhase::Submitting;
        Some(PreparedRequest {
            url: upload_url.to_string(),
            form,
        })
    }

    /// Record the outcome. A failure keeps the selection for a retry.
    pub fn settle(&mut self, outcome: &Result<ServerReply, SubmitError>) {
        self.phase = match outcome {
            Ok(_) => UploadPhase::Succeeded,
            Err(_) => self.resting_phase(),
        };
    }

    /// Run the whole upload flow against `host`.
    ///
    /// Returns `None` (no request, no notification) when the selection is empty.
    pub async fn submit<T, C, S, R>(
        &mut self,
        host: &Host<T, C, S>,
        rng: &mut R,
    ) -> Option<Result<ServerReply, SubmitError>>
    where
        T: Transport<File = F>,
        C: Clock,
        S: Shell,
        R: Rng + ?Sized,
    {
        let request = self.begin_submit(&host.config.upload_url())?;
        let outcome = perform_upload(host, request, rng).await;
        self.settle(&outcome);
        Some(outcome)
    }

    fn is_locked(&self) -> bool {
        matches!(self.phase, UploadPhase::Submitting | UploadPhase::Succeeded)
    }

    fn resting_phase(&self) -> UploadPhase {
        if self.files.is_empty() {
            UploadPhase::Idle
        } else {
            UploadPhase::Ready
        }
    }
}

/// Network half of the upload flow; touches no session state.
///
/// Disables submit, runs the optimistic progress bar, then either navigates
/// to the server's redirect after the display delay or restores the form.
pub async fn perform_upload<T, C, S, R>(
    host: &Host<T, C, S>,
    request: PreparedRequest<T::File>,
    rng: &mut R,
) -> Result<ServerReply, SubmitError>
where
    T: Transport,
    C: Clock,
    S: Shell,
    R: Rng + ?Sized,
{
    let count = request.form.fields().len();
    log::info!("📤 Uploading {} file(s)...", count);
    host.shell.set_submit_enabled(false);

    match host.dispatch(request, UPLOAD_PROGRESS, rng).await {
        Ok(reply) => {
            log::info!("✅ Upload successful, session {:?}", reply.session());
            host.shell.notify(
                reply.message.as_deref().unwrap_or("Files uploaded successfully!"),
                NotificationKind::Success,
            );
            if let Some(redirect) = reply.redirect.as_deref() {
                host.clock.sleep(UPLOAD_REDIRECT_DELAY_MS).await;
                host.shell.navigate(&host.config.resolve(redirect));
            }
            Ok(reply)
        }
        Err(e) => {
            log::error!("❌ Upload failed: {}", e);
            host.shell.hide_progress();
            host.shell.set_submit_enabled(true);
            host.shell.notify(&e.user_message("Upload failed"), NotificationKind::Error);
            Err(e)
        }
    }
}
