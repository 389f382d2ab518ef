use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::core::error::HostError;
use crate::core::types::LanguageCandidate;

/// Event name the host dispatches on the monitor object while a model downloads.
pub const DOWNLOAD_PROGRESS_EVENT: &str = "downloadprogress";

/// Read-only view of the host's global capability surface.
///
/// Implementations wrap whatever the embedding provides (wasm bindings to
/// `self`/`window`, or an in-memory [`crate::host::StaticHost`]). Lookups must be
/// side-effect free: the detector may call them on every request.
pub trait HostEnvironment: Send + Sync {
    /// Top-level global such as `Summarizer`.
    fn global(&self, name: &str) -> Option<Arc<dyn NativeCapability>>;

    /// Member of a namespace object such as `ai.summarizer`.
    fn namespace_member(&self, namespace: &str, member: &str)
    -> Option<Arc<dyn NativeCapability>>;
}

/// A host capability entry point as found in the environment.
///
/// One trait covers both drafts; which methods are meaningful depends on the
/// shape the object was found under. Methods the host object lacks keep the
/// default bodies, which reject the way calling an absent member would.
#[async_trait]
pub trait NativeCapability: Send + Sync {
    /// Reports whether the host object exposes `member` as a callable.
    fn has_member(&self, member: &str) -> bool;

    /// Current draft availability query. Returns the raw host spelling.
    async fn availability(&self, _query: &Map<String, Value>) -> Result<String, HostError> {
        Err(HostError::missing_member("availability"))
    }

    /// Legacy draft capability report.
    async fn capabilities(&self) -> Result<Box<dyn LegacyCapabilities>, HostError> {
        Err(HostError::missing_member("capabilities"))
    }

    async fn create(
        &self,
        options: NativeCreateOptions,
    ) -> Result<Box<dyn NativeSession>, HostError>;
}

/// Capability report returned by a legacy `capabilities()` call.
pub trait LegacyCapabilities: Send + Sync {
    /// The report's `available` field.
    fn available(&self) -> Option<String>;

    fn language_pair_available(&self, _source: &str, _target: &str) -> Option<String> {
        None
    }

    fn language_available(&self, _language: &str) -> Option<String> {
        None
    }
}

pub type ProgressListener = Box<dyn FnMut(NativeProgressEvent) + Send>;

/// Invoked by the host once, before `create` resolves, with the object that
/// will dispatch download progress.
pub type MonitorCallback = Box<dyn FnOnce(&mut dyn DownloadMonitor) + Send>;

/// Event-target-like object handed to a [`MonitorCallback`].
pub trait DownloadMonitor {
    fn add_event_listener(&mut self, event: &str, listener: ProgressListener);
}

/// Payload of a host `downloadprogress` event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeProgressEvent {
    pub loaded: f64,
    pub total: f64,
}

/// Options passed to a native `create`, already translated to the shape's
/// field names and spellings.
#[derive(Default)]
pub struct NativeCreateOptions {
    pub fields: Map<String, Value>,
    pub monitor: Option<MonitorCallback>,
}

impl NativeCreateOptions {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            monitor: None,
        }
    }
}

impl fmt::Debug for NativeCreateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeCreateOptions")
            .field("fields", &self.fields)
            .field("monitor", &self.monitor.is_some())
            .finish()
    }
}

/// A generation method invocation on a native instance.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeCall {
    pub method: String,
    pub arguments: Vec<Value>,
}

/// A host-native instance returned from `create`.
#[async_trait]
pub trait NativeSession: Send + Sync {
    /// Hands out the instance's `ready` promise, if it has one. Called at most once.
    fn take_ready(&mut self) -> Option<BoxFuture<'static, Result<(), HostError>>> {
        None
    }

    fn open_stream(&self, call: NativeCall) -> Result<NativeStream, HostError>;

    async fn detect(&self, _text: &str) -> Result<Vec<LanguageCandidate>, HostError> {
        Err(HostError::missing_member("detect"))
    }

    /// Event subscription on the instance itself (legacy `addEventListener`).
    /// Instances without one ignore the listener.
    fn add_event_listener(&mut self, _event: &str, _listener: ProgressListener) {}

    /// Releases the native instance. Called once when the owning session is dropped.
    fn destroy(&self) {}
}

/// The conventions a host uses to hand back generated text.
pub enum NativeStream {
    /// Asynchronous sequence (`for await`).
    Sequence(Box<dyn NativeSequence>),
    /// Pull-based stream reader.
    Reader(Box<dyn NativeReader>),
    /// Promise resolving to the complete text.
    Single(BoxFuture<'static, Result<String, HostError>>),
}

impl fmt::Debug for NativeStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(_) => f.write_str("NativeStream::Sequence"),
            Self::Reader(_) => f.write_str("NativeStream::Reader"),
            Self::Single(_) => f.write_str("NativeStream::Single"),
        }
    }
}

#[async_trait]
pub trait NativeSequence: Send {
    /// `None` once the sequence is exhausted.
    async fn next(&mut self) -> Option<Result<String, HostError>>;

    /// Early-exit hook (the iterator's `return()`).
    fn close(&mut self);
}

#[async_trait]
pub trait NativeReader: Send {
    /// `Ok(None)` signals the stream is done.
    async fn read(&mut self) -> Result<Option<String>, HostError>;

    /// Cancels the stream and releases the reader lock.
    fn release(&mut self);
}
