//! Collaborators the flows run against, and the shared dispatch loop.
//!
//! The core never touches a DOM or a socket. A page (or the CLI) supplies:
//!
//! - [`Transport`] - sends a multipart POST and returns status + body
//! - [`Clock`] - async sleep, used for ticks, redirect delays and timeouts
//! - [`Shell`] - notification sink, progress surface, submit switch, navigation

use std::convert::Infallible;

use futures::future::{select, Either};
use futures::pin_mut;
use rand::Rng;

use crate::config::ClientConfig;
use crate::error::{SubmitError, SubmitResult, TransportError};
use crate::progress::{OptimisticProgress, ProgressPolicy};
use crate::protocol::{interpret, HttpReply, PreparedRequest, ServerReply};

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Sends multipart requests.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Platform file handle carried by file parts.
    type File;

    async fn post_form(&self, request: PreparedRequest<Self::File>) -> Result<HttpReply, TransportError>;
}

/// Async timer source.
#[allow(async_fn_in_trait)]
pub trait Clock {
    async fn sleep(&self, ms: u32);
}

/// Presentation surface driven by the flows.
pub trait Shell {
    fn notify(&self, message: &str, kind: NotificationKind);
    fn show_progress(&self);
    fn set_progress(&self, percent: f64);
    fn hide_progress(&self);
    fn set_submit_enabled(&self, enabled: bool);
    fn navigate(&self, target: &str);
}

/// Everything a flow needs from its environment.
pub struct Host<T, C, S> {
    pub transport: T,
    pub clock: C,
    pub shell: S,
    pub config: ClientConfig,
}

impl<T, C, S> Host<T, C, S>
where
    T: Transport,
    C: Clock,
    S: Shell,
{
    pub fn new(transport: T, clock: C, shell: S, config: ClientConfig) -> Self {
        Self {
            transport,
            clock,
            shell,
            config,
        }
    }

    /// Send `request` while an optimistic progress estimate ticks.
    ///
    /// The ticker lives inside this future: it stops when the reply arrives,
    /// when the transport fails, or when the caller drops the dispatch.
    /// A received reply snaps the progress to 100% before it is interpreted.
    pub async fn dispatch<R>(
        &self,
        request: PreparedRequest<T::File>,
        policy: ProgressPolicy,
        rng: &mut R,
    ) -> SubmitResult<ServerReply>
    where
        R: Rng + ?Sized,
    {
        log::info!("📤 POST {}", request.url);

        let mut progress = OptimisticProgress::new(policy);
        self.shell.show_progress();
        self.shell.set_progress(progress.percent());

        let reply = {
            let ticker = tick_forever(&mut progress, &self.clock, &self.shell, rng);
            let sending = self.send(request);
            pin_mut!(ticker);
            pin_mut!(sending);
            match select(sending, ticker).await {
                Either::Left((reply, _ticker)) => reply,
                Either::Right((never, _)) => match never {},
            }
        };

        let reply = reply?;
        self.shell.set_progress(progress.complete());
        log::debug!("reply {} ({} bytes)", reply.status, reply.body.len());

        interpret(&reply)
    }

    async fn send(&self, request: PreparedRequest<T::File>) -> SubmitResult<HttpReply> {
        let sending = self.transport.post_form(request);

        let Some(timeout_ms) = self.config.request_timeout_ms else {
            return sending.await.map_err(SubmitError::from);
        };

        let deadline = self.clock.sleep(timeout_ms);
        pin_mut!(sending);
        pin_mut!(deadline);
        match select(sending, deadline).await {
            Either::Left((reply, _)) => reply.map_err(SubmitError::from),
            Either::Right(((), _)) => {
                log::warn!("⏱️ request timed out after {} ms", timeout_ms);
                Err(SubmitError::Timeout(timeout_ms))
            }
        }
    }
}

async fn tick_forever<C, S, R>(
    progress: &mut OptimisticProgress,
    clock: &C,
    shell: &S,
    rng: &mut R,
) -> Infallible
where
    C: Clock,
    S: Shell,
    R: Rng + ?Sized,
{
    let interval = progress.policy().interval_ms;
    loop {
        clock.sleep(interval).await;
        shell.set_progress(progress.tick(rng));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{GENERATION_PROGRESS, UPLOAD_PROGRESS};
    use crate::protocol::Form;
    use crate::testing::{host, FakeTransport};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request() -> PreparedRequest<crate::testing::TestFile> {
        PreparedRequest {
            url: "/upload".into(),
            form: Form::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_until_reply_then_snaps_to_hundred() {
        let host = host(FakeTransport::replying(2600, 200, r#"{"status":"success"}"#));
        let mut rng = StdRng::seed_from_u64(1);

        let reply = host.dispatch(request(), UPLOAD_PROGRESS, &mut rng).await;
        assert!(reply.unwrap().is_success());

        let values = host.shell.progress_values();
        // initial 0, five ticks (500..=2500 ms), then the snap
        assert_eq!(values.len(), 7);
        assert_eq!(values[0], 0.0);
        assert!(values[1..6].iter().all(|v| *v <= 90.0));
        assert_eq!(*values.last().unwrap(), 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_after_reply() {
        let host = host(FakeTransport::replying(1500, 200, r#"{"status":"success"}"#));
        let mut rng = StdRng::seed_from_u64(2);

        host.dispatch(request(), GENERATION_PROGRESS, &mut rng).await.unwrap();
        let before = host.shell.events().len();

        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        assert_eq!(host.shell.events().len(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_does_not_snap() {
        let host = host(FakeTransport::failing(700, "connection reset"));
        let mut rng = StdRng::seed_from_u64(3);

        let err = host.dispatch(request(), UPLOAD_PROGRESS, &mut rng).await.unwrap_err();
        assert_eq!(err, SubmitError::Transport(TransportError::new("connection reset")));
        assert!(host.shell.progress_values().iter().all(|v| *v < 100.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_optional_timeout() {
        let mut host = host(FakeTransport::hanging());
        host.config.request_timeout_ms = Some(3000);
        let mut rng = StdRng::seed_from_u64(4);

        let err = host.dispatch(request(), UPLOAD_PROGRESS, &mut rng).await.unwrap_err();
        assert_eq!(err, SubmitError::Timeout(3000));
    }
}
