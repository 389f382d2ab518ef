//! Scriptable host objects shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::core::error::HostError;
use crate::core::traits::{
    DOWNLOAD_PROGRESS_EVENT, DownloadMonitor, LegacyCapabilities, NativeCall, NativeCapability,
    NativeCreateOptions, NativeProgressEvent, NativeReader, NativeSequence, NativeSession,
    NativeStream, ProgressListener,
};
use crate::core::types::LanguageCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Convention {
    Sequence,
    Reader,
    Single,
}

#[derive(Debug, Clone)]
pub(crate) struct StreamScript {
    convention: Convention,
    items: Vec<Result<String, HostError>>,
}

impl StreamScript {
    pub(crate) fn chunks(convention: Convention, chunks: &[&str]) -> Self {
        Self {
            convention,
            items: chunks.iter().map(|chunk| Ok(chunk.to_string())).collect(),
        }
    }

    pub(crate) fn failing_after(convention: Convention, chunks: &[&str], error: HostError) -> Self {
        let mut script = Self::chunks(convention, chunks);
        script.items.push(Err(error));
        script
    }
}

#[derive(Debug, Default)]
pub(crate) struct StreamStats {
    pub pulls: AtomicUsize,
    pub releases: AtomicUsize,
}

impl StreamStats {
    pub(crate) fn pulls(&self) -> usize {
        self.pulls.load(Ordering::SeqCst)
    }

    pub(crate) fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockLegacyReport {
    available: Option<String>,
    language_pairs: Vec<(String, String, String)>,
    languages: Vec<(String, String)>,
}

impl LegacyCapabilities for MockLegacyReport {
    fn available(&self) -> Option<String> {
        self.available.clone()
    }

    fn language_pair_available(&self, source: &str, target: &str) -> Option<String> {
        self.language_pairs
            .iter()
            .find(|(pair_source, pair_target, _)| pair_source == source && pair_target == target)
            .map(|(_, _, state)| state.clone())
    }

    fn language_available(&self, language: &str) -> Option<String> {
        self.languages
            .iter()
            .find(|(code, _)| code == language)
            .map(|(_, state)| state.clone())
    }
}

pub(crate) struct MockCapability {
    members: Vec<&'static str>,
    availability: Result<String, HostError>,
    legacy_report: Result<MockLegacyReport, HostError>,
    create_error: Option<HostError>,
    ready: Option<Result<(), HostError>>,
    progress: Vec<NativeProgressEvent>,
    instance_progress: Vec<NativeProgressEvent>,
    detected: Vec<LanguageCandidate>,
    scripts: Arc<Mutex<VecDeque<StreamScript>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub create_fields: Arc<Mutex<Vec<Map<String, Value>>>>,
    pub queries: Arc<Mutex<Vec<Map<String, Value>>>>,
    pub native_calls: Arc<Mutex<Vec<NativeCall>>>,
    pub stream_stats: Arc<StreamStats>,
    pub destroyed: Arc<AtomicUsize>,
}

impl MockCapability {
    fn base(members: Vec<&'static str>) -> Self {
        Self {
            members,
            availability: Err(HostError::missing_member("availability")),
            legacy_report: Err(HostError::missing_member("capabilities")),
            create_error: None,
            ready: Some(Ok(())),
            progress: Vec::new(),
            instance_progress: Vec::new(),
            detected: Vec::new(),
            scripts: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            create_fields: Arc::new(Mutex::new(Vec::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
            native_calls: Arc::new(Mutex::new(Vec::new())),
            stream_stats: Arc::new(StreamStats::default()),
            destroyed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Current-draft entry point whose `availability()` resolves to `state`.
    pub(crate) fn current(state: &str) -> Self {
        let mut mock = Self::base(vec!["availability", "create"]);
        mock.availability = Ok(state.to_string());
        mock
    }

    /// Legacy entry point whose `capabilities()` reports `available: state`.
    pub(crate) fn legacy(state: &str) -> Self {
        let mut mock = Self::base(vec!["capabilities", "create"]);
        mock.legacy_report = Ok(MockLegacyReport {
            available: Some(state.to_string()),
            ..MockLegacyReport::default()
        });
        mock
    }

    pub(crate) fn with_members(mut self, members: Vec<&'static str>) -> Self {
        self.members = members;
        self
    }

    pub(crate) fn with_availability_error(mut self, error: HostError) -> Self {
        self.availability = Err(error);
        self
    }

    pub(crate) fn with_capabilities_error(mut self, error: HostError) -> Self {
        self.legacy_report = Err(error);
        self
    }

    pub(crate) fn with_legacy_available(mut self, state: Option<&str>) -> Self {
        if let Ok(report) = &mut self.legacy_report {
            report.available = state.map(str::to_string);
        }
        self
    }

    pub(crate) fn with_language_pair(mut self, source: &str, target: &str, state: &str) -> Self {
        if let Ok(report) = &mut self.legacy_report {
            report.language_pairs.push((
                source.to_string(),
                target.to_string(),
                state.to_string(),
            ));
        }
        self
    }

    pub(crate) fn with_language(mut self, language: &str, state: &str) -> Self {
        if let Ok(report) = &mut self.legacy_report {
            report
                .languages
                .push((language.to_string(), state.to_string()));
        }
        self
    }

    pub(crate) fn with_create_error(mut self, error: HostError) -> Self {
        self.create_error = Some(error);
        self
    }

    /// `None` models an instance without a `ready` promise.
    pub(crate) fn with_ready(mut self, ready: Option<Result<(), HostError>>) -> Self {
        self.ready = ready;
        self
    }

    /// Events dispatched on the `monitor` target during `create`.
    pub(crate) fn with_progress(mut self, events: &[(f64, f64)]) -> Self {
        self.progress = progress_events(events);
        self
    }

    /// Events dispatched on the created instance while `ready` is pending.
    pub(crate) fn with_instance_progress(mut self, events: &[(f64, f64)]) -> Self {
        self.instance_progress = progress_events(events);
        self
    }

    pub(crate) fn with_detected(mut self, detected: Vec<LanguageCandidate>) -> Self {
        self.detected = detected;
        self
    }

    pub(crate) fn with_stream(self, script: StreamScript) -> Self {
        self.scripts
            .lock()
            .expect("scripts lock should not be poisoned")
            .push_back(script);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("calls lock should not be poisoned")
            .clone()
    }

    pub(crate) fn created_fields(&self) -> Vec<Map<String, Value>> {
        self.create_fields
            .lock()
            .expect("create lock should not be poisoned")
            .clone()
    }

    pub(crate) fn recorded_queries(&self) -> Vec<Map<String, Value>> {
        self.queries
            .lock()
            .expect("queries lock should not be poisoned")
            .clone()
    }

    pub(crate) fn recorded_native_calls(&self) -> Vec<NativeCall> {
        self.native_calls
            .lock()
            .expect("native calls lock should not be poisoned")
            .clone()
    }

    pub(crate) fn destroyed(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }

    fn record(&self, call: &str) {
        self.calls
            .lock()
            .expect("calls lock should not be poisoned")
            .push(call.to_string());
    }
}

#[async_trait]
impl NativeCapability for MockCapability {
    fn has_member(&self, member: &str) -> bool {
        self.members.iter().any(|candidate| *candidate == member)
    }

    async fn availability(&self, query: &Map<String, Value>) -> Result<String, HostError> {
        self.record("availability");
        self.queries
            .lock()
            .expect("queries lock should not be poisoned")
            .push(query.clone());
        self.availability.clone()
    }

    async fn capabilities(&self) -> Result<Box<dyn LegacyCapabilities>, HostError> {
        self.record("capabilities");
        self.legacy_report
            .clone()
            .map(|report| Box::new(report) as Box<dyn LegacyCapabilities>)
    }

    async fn create(
        &self,
        options: NativeCreateOptions,
    ) -> Result<Box<dyn NativeSession>, HostError> {
        self.record("create");
        self.create_fields
            .lock()
            .expect("create lock should not be poisoned")
            .push(options.fields);

        if let Some(error) = &self.create_error {
            return Err(error.clone());
        }

        if let Some(monitor) = options.monitor {
            let mut target = MockMonitor::default();
            monitor(&mut target);
            for event in &self.progress {
                target.dispatch(DOWNLOAD_PROGRESS_EVENT, *event);
            }
        }

        Ok(Box::new(MockSession {
            ready: self.ready.clone(),
            instance_progress: self.instance_progress.clone(),
            instance_listeners: Mutex::new(MockMonitor::default()),
            detected: self.detected.clone(),
            scripts: Arc::clone(&self.scripts),
            native_calls: Arc::clone(&self.native_calls),
            stream_stats: Arc::clone(&self.stream_stats),
            destroyed: Arc::clone(&self.destroyed),
        }))
    }
}

fn progress_events(events: &[(f64, f64)]) -> Vec<NativeProgressEvent> {
    events
        .iter()
        .map(|(loaded, total)| NativeProgressEvent {
            loaded: *loaded,
            total: *total,
        })
        .collect()
}

#[derive(Default)]
struct MockMonitor {
    listeners: Vec<(String, ProgressListener)>,
}

impl MockMonitor {
    fn dispatch(&mut self, event: &str, payload: NativeProgressEvent) {
        for (name, listener) in &mut self.listeners {
            if name.as_str() == event {
                listener(payload);
            }
        }
    }
}

impl DownloadMonitor for MockMonitor {
    fn add_event_listener(&mut self, event: &str, listener: ProgressListener) {
        self.listeners.push((event.to_string(), listener));
    }
}

struct MockSession {
    ready: Option<Result<(), HostError>>,
    instance_progress: Vec<NativeProgressEvent>,
    instance_listeners: Mutex<MockMonitor>,
    detected: Vec<LanguageCandidate>,
    scripts: Arc<Mutex<VecDeque<StreamScript>>>,
    native_calls: Arc<Mutex<Vec<NativeCall>>>,
    stream_stats: Arc<StreamStats>,
    destroyed: Arc<AtomicUsize>,
}

#[async_trait]
impl NativeSession for MockSession {
    fn take_ready(&mut self) -> Option<BoxFuture<'static, Result<(), HostError>>> {
        let ready = self.ready.take()?;
        let events = std::mem::take(&mut self.instance_progress);
        let mut listeners = std::mem::take(
            self.instance_listeners
                .get_mut()
                .expect("instance listeners lock should not be poisoned"),
        );
        Some(
            async move {
                for event in events {
                    listeners.dispatch(DOWNLOAD_PROGRESS_EVENT, event);
                }
                ready
            }
            .boxed(),
        )
    }

    fn add_event_listener(&mut self, event: &str, listener: ProgressListener) {
        self.instance_listeners
            .get_mut()
            .expect("instance listeners lock should not be poisoned")
            .add_event_listener(event, listener);
    }

    fn open_stream(&self, call: NativeCall) -> Result<NativeStream, HostError> {
        self.native_calls
            .lock()
            .expect("native calls lock should not be poisoned")
            .push(call);

        let script = self
            .scripts
            .lock()
            .expect("scripts lock should not be poisoned")
            .pop_front()
            .ok_or_else(|| HostError::new("InvalidStateError", "no scripted stream"))?;
        let items = VecDeque::from(script.items);
        let stats = Arc::clone(&self.stream_stats);

        Ok(match script.convention {
            Convention::Sequence => NativeStream::Sequence(Box::new(MockSequence { items, stats })),
            Convention::Reader => NativeStream::Reader(Box::new(MockReader { items, stats })),
            Convention::Single => NativeStream::Single(
                async move { items.into_iter().collect::<Result<String, HostError>>() }.boxed(),
            ),
        })
    }

    async fn detect(&self, _text: &str) -> Result<Vec<LanguageCandidate>, HostError> {
        Ok(self.detected.clone())
    }

    fn destroy(&self) {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
    }
}

struct MockSequence {
    items: VecDeque<Result<String, HostError>>,
    stats: Arc<StreamStats>,
}

#[async_trait]
impl NativeSequence for MockSequence {
    async fn next(&mut self) -> Option<Result<String, HostError>> {
        self.stats.pulls.fetch_add(1, Ordering::SeqCst);
        self.items.pop_front()
    }

    fn close(&mut self) {
        self.stats.releases.fetch_add(1, Ordering::SeqCst);
    }
}

struct MockReader {
    items: VecDeque<Result<String, HostError>>,
    stats: Arc<StreamStats>,
}

#[async_trait]
impl NativeReader for MockReader {
    async fn read(&mut self) -> Result<Option<String>, HostError> {
        self.stats.pulls.fetch_add(1, Ordering::SeqCst);
        self.items.pop_front().transpose()
    }

    fn release(&mut self) {
        self.stats.releases.fetch_add(1, Ordering::SeqCst);
    }
}
