use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::StreamExt;
use futures::future::BoxFuture;
use tokio::sync::watch;
use tracing::debug;

use crate::core::error::{CapabilityError, HostError};
use crate::core::traits::NativeSession;
use crate::core::types::{
    AvailabilityState, GenerationInput, LanguageCandidate, LogicalCapability, ShapeTag,
};
use crate::progress::ProgressMonitorBridge;
use crate::streaming::{self, ChunkStream};

/// Normalized handle over one host-native instance.
///
/// The handle owns the native instance exclusively and releases it when
/// dropped. Its shape tag is fixed at creation.
pub struct Session {
    capability: LogicalCapability,
    shape: ShapeTag,
    native: Box<dyn NativeSession>,
    progress: ProgressMonitorBridge,
    ready: bool,
    busy: AtomicBool,
}

impl Session {
    pub(crate) fn new(
        capability: LogicalCapability,
        shape: ShapeTag,
        native: Box<dyn NativeSession>,
        progress: ProgressMonitorBridge,
    ) -> Self {
        Self {
            capability,
            shape,
            native,
            progress,
            ready: false,
            busy: AtomicBool::new(false),
        }
    }

    pub fn capability(&self) -> LogicalCapability {
        self.capability
    }

    pub fn shape(&self) -> ShapeTag {
        self.shape
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Latest availability, including states synthesized from download progress.
    pub fn availability(&self) -> AvailabilityState {
        self.progress.state()
    }

    pub fn watch_availability(&self) -> watch::Receiver<AvailabilityState> {
        self.progress.subscribe()
    }

    /// Starts a streaming generation. See [`streaming::stream_generate`].
    pub fn stream_generate(
        &self,
        input: GenerationInput,
    ) -> Result<ChunkStream<'_>, CapabilityError> {
        streaming::stream_generate(self, input)
    }

    /// Runs a generation to completion and returns the concatenated text.
    pub async fn generate(&self, input: GenerationInput) -> Result<String, CapabilityError> {
        let mut stream = self.stream_generate(input)?;
        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            text.push_str(&chunk?.text);
        }
        Ok(text)
    }

    pub async fn detect_language(
        &self,
        text: &str,
    ) -> Result<Vec<LanguageCandidate>, CapabilityError> {
        self.ensure_ready()?;
        if self.capability != LogicalCapability::LanguageDetector {
            return Err(CapabilityError::OperationUnsupported {
                capability: self.capability,
                operation: "detect".to_string(),
            });
        }

        let _guard = self.acquire()?;
        self.native
            .detect(text)
            .await
            .map_err(|host| CapabilityError::Generation {
                capability: self.capability,
                shape: self.shape,
                partial: String::new(),
                host,
            })
    }

    pub(crate) fn native(&self) -> &dyn NativeSession {
        self.native.as_ref()
    }

    pub(crate) fn ensure_ready(&self) -> Result<(), CapabilityError> {
        if self.ready {
            Ok(())
        } else {
            Err(CapabilityError::SessionNotReady {
                capability: self.capability,
                shape: self.shape,
            })
        }
    }

    /// Claims the session for one generation call.
    pub(crate) fn acquire(&self) -> Result<BusyGuard<'_>, CapabilityError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| BusyGuard { flag: &self.busy })
            .map_err(|_| CapabilityError::SessionBusy {
                capability: self.capability,
                shape: self.shape,
            })
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("capability", &self.capability)
            .field("shape", &self.shape)
            .field("ready", &self.ready)
            .field("availability", &self.availability())
            .finish_non_exhaustive()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(capability = ?self.capability, shape = ?self.shape, "releasing native session");
        self.native.destroy();
    }
}

pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// A created session whose native `ready` signal has not resolved yet.
///
/// Generation calls on [`PendingSession::session`] fail with
/// [`CapabilityError::SessionNotReady`] until [`PendingSession::ready`] completes.
pub struct PendingSession {
    session: Session,
    ready: Option<BoxFuture<'static, Result<(), HostError>>>,
}

impl PendingSession {
    pub(crate) fn new(
        session: Session,
        ready: Option<BoxFuture<'static, Result<(), HostError>>>,
    ) -> Self {
        Self { session, ready }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Awaits the native `ready` signal. An instance without one counts as ready.
    pub async fn ready(self) -> Result<Session, CapabilityError> {
        let PendingSession { mut session, ready } = self;

        if let Some(ready) = ready {
            ready.await.map_err(|host| CapabilityError::SessionInit {
                capability: session.capability,
                shape: session.shape,
                host,
            })?;
        }

        session.ready = true;
        session.progress.mark_ready();
        debug!(capability = ?session.capability, shape = ?session.shape, "session ready");
        Ok(session)
    }
}

impl fmt::Debug for PendingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSession")
            .field("session", &self.session)
            .field("has_ready_signal", &self.ready.is_some())
            .finish()
    }
}
