//! Browser implementations of the core collaborators.
//!
//! - [`BrowserFile`] - `web_sys::File` as a selectable upload source
//! - [`BrowserClock`] - `setTimeout` based sleep
//! - [`PageShell`] - signals behind the notification list, progress surface
//!   and submit button, plus `window.location` navigation

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use leptos::*;
use qgen_core::{Clock, FileSource, Host, NotificationKind, Shell};
use web_sys::FileList;

use super::api::GlooTransport;
use crate::config::{client_config, MAX_NOTIFICATIONS, NOTIFICATION_TIMEOUT_MS, SESSION_DATA_ELEMENT};
use crate::types::{Notification, SessionContext};

// =============================================================================
// Files
// =============================================================================

/// A file picked or dropped by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserFile(web_sys::File);

impl BrowserFile {
    pub fn inner(&self) -> &web_sys::File {
        &self.0
    }
}

impl From<web_sys::File> for BrowserFile {
    fn from(file: web_sys::File) -> Self {
        Self(file)
    }
}

impl FileSource for BrowserFile {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn size_bytes(&self) -> u64 {
        self.0.size() as u64
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }
}

/// Every file of a picker or drop, in order.
pub fn files_from_list(list: &FileList) -> Vec<BrowserFile> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(BrowserFile::from)
        .collect()
}

// =============================================================================
// Clock
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

// =============================================================================
// Shell
// =============================================================================

/// Write ends of the page signals the flows drive.
#[derive(Clone, Copy)]
pub struct PageShell {
    pub notifications: WriteSignal<Vec<Notification>>,
    pub progress_visible: WriteSignal<bool>,
    pub progress: WriteSignal<f64>,
    pub submit_enabled: WriteSignal<bool>,
}

impl Shell for PageShell {
    fn notify(&self, message: &str, kind: NotificationKind) {
        push_notification(self.notifications, Notification::new(kind, message));
    }

    fn show_progress(&self) {
        self.progress_visible.set(true);
    }

    fn set_progress(&self, percent: f64) {
        self.progress.set(percent);
    }

    fn hide_progress(&self) {
        self.progress_visible.set(false);
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.submit_enabled.set(enabled);
    }

    fn navigate(&self, target: &str) {
        log::info!("➡️ Navigating to {}", target);
        if let Err(e) = gloo_utils::window().location().set_href(target) {
            log::error!("Navigation to {} failed: {:?}", target, e);
        }
    }
}

/// Show a toast and schedule its dismissal.
pub fn push_notification(set_notifications: WriteSignal<Vec<Notification>>, notification: Notification) {
    let id = notification.id;
    log::info!("{} {}", notification.emoji(), notification.message);

    set_notifications.update(|list| {
        list.push(notification);
        if list.len() > MAX_NOTIFICATIONS {
            list.remove(0);
        }
    });

    Timeout::new(NOTIFICATION_TIMEOUT_MS, move || {
        set_notifications.update(|list| list.retain(|n| n.id != id));
    })
    .forget();
}

/// Host wired to the browser for one page.
pub type PageHost = Host<GlooTransport, BrowserClock, PageShell>;

pub fn page_host(shell: PageShell) -> PageHost {
    Host::new(GlooTransport, BrowserClock, shell, client_config())
}

// =============================================================================
// Session data
// =============================================================================

/// Topics and suggested patterns embedded by the server, if any.
pub fn read_session_context() -> SessionContext {
    gloo_utils::document()
        .get_element_by_id(SESSION_DATA_ELEMENT)
        .and_then(|element| element.text_content())
        .map(|raw| SessionContext::parse(&raw))
        .unwrap_or_default()
}
