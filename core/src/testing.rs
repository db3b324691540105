//! In-memory collaborators for unit tests (paused tokio clock).

use std::cell::RefCell;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::host::{Clock, Host, NotificationKind, Shell, Transport};
use crate::protocol::{HttpReply, PreparedRequest};
use crate::upload::FileSource;

#[derive(Debug, Clone, PartialEq)]
pub struct TestFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl TestFile {
    pub fn new(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
            mime: "application/pdf".to_string(),
        }
    }
}

impl FileSource for TestFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn size_bytes(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> String {
        self.mime.clone()
    }
}

/// Replies once per request after a fixed latency, recording what was sent.
pub struct FakeTransport {
    pub latency_ms: u64,
    pub reply: Result<HttpReply, TransportError>,
    pub sent: RefCell<Vec<PreparedRequest<TestFile>>>,
}

impl FakeTransport {
    pub fn replying(latency_ms: u64, status: u16, body: &str) -> Self {
        Self {
            latency_ms,
            reply: Ok(HttpReply::new(status, body)),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(latency_ms: u64, message: &str) -> Self {
        Self {
            latency_ms,
            reply: Err(TransportError::new(message)),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn hanging() -> Self {
        Self::replying(86_400_000, 200, "{}")
    }
}

impl Transport for FakeTransport {
    type File = TestFile;

    async fn post_form(&self, request: PreparedRequest<TestFile>) -> Result<HttpReply, TransportError> {
        self.sent.borrow_mut().push(request);
        tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;
        self.reply.clone()
    }
}

pub struct TokioClock;

impl Clock for TokioClock {
    async fn sleep(&self, ms: u32) {
        tokio::time::sleep(Duration::from_millis(u64::from(ms))).await;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Notify(String, NotificationKind),
    ShowProgress,
    Progress(f64),
    HideProgress,
    SubmitEnabled(bool),
    Navigate(String),
}

/// Records every shell call with the (paused) time it happened at.
pub struct RecordingShell {
    start: Instant,
    pub events: RefCell<Vec<(Duration, Event)>>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            events: RefCell::new(Vec::new()),
        }
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push((self.start.elapsed(), event));
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().iter().map(|(_, e)| e.clone()).collect()
    }

    pub fn progress_values(&self) -> Vec<f64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Progress(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn at(&self, wanted: &Event) -> Option<Duration> {
        self.events
            .borrow()
            .iter()
            .find(|(_, e)| e == wanted)
            .map(|(t, _)| *t)
    }

    pub fn notifications(&self) -> Vec<(String, NotificationKind)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notify(m, k) => Some((m, k)),
                _ => None,
            })
            .collect()
    }
}

impl Shell for RecordingShell {
    fn notify(&self, message: &str, kind: NotificationKind) {
        self.push(Event::Notify(message.to_string(), kind));
    }

    fn show_progress(&self) {
        self.push(Event::ShowProgress);
    }

    fn set_progress(&self, percent: f64) {
        self.push(Event::Progress(percent));
    }

    fn hide_progress(&self) {
        self.push(Event::HideProgress);
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.push(Event::SubmitEnabled(enabled));
    }

    fn navigate(&self, target: &str) {
        self.push(Event::Navigate(target.to_string()));
    }
}

pub fn host(transport: FakeTransport) -> Host<FakeTransport, TokioClock, RecordingShell> {
    Host::new(transport, TokioClock, RecordingShell::new(), ClientConfig::same_origin())
}
