use std::fmt;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::core::traits::{
    DOWNLOAD_PROGRESS_EVENT, DownloadMonitor, NativeCreateOptions, NativeProgressEvent,
    NativeSession, ProgressListener,
};
use crate::core::types::{AvailabilityState, ProgressEvent};

pub type ProgressHandler = Arc<dyn Fn(ProgressEvent) + Send + Sync>;
pub type AvailabilityHandler = Arc<dyn Fn(AvailabilityState) + Send + Sync>;

/// Optional callbacks an application attaches to a session's creation.
#[derive(Clone, Default)]
pub struct SessionObserver {
    pub on_progress: Option<ProgressHandler>,
    pub on_availability: Option<AvailabilityHandler>,
}

impl SessionObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_progress(mut self, handler: impl Fn(ProgressEvent) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(handler));
        self
    }

    pub fn on_availability(
        mut self,
        handler: impl Fn(AvailabilityState) + Send + Sync + 'static,
    ) -> Self {
        self.on_availability = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for SessionObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionObserver")
            .field("on_progress", &self.on_progress.is_some())
            .field("on_availability", &self.on_availability.is_some())
            .finish()
    }
}

/// Turns the host's `downloadprogress` events into [`ProgressEvent`]s and a
/// synthesized availability state.
///
/// State starts at the queried availability. The first non-terminal event
/// moves it to `Downloading`, an event with `loaded >= total` to `Available`.
/// The legacy draft cannot report `Downloading` itself, so this is the only
/// place that state appears for legacy sessions. Every non-regressive event
/// reaches `on_progress`, including those arriving once the state is settled.
#[derive(Clone)]
pub struct ProgressMonitorBridge {
    inner: Arc<Mutex<ProgressTracker>>,
    state: watch::Receiver<AvailabilityState>,
}

struct ProgressTracker {
    state: watch::Sender<AvailabilityState>,
    last_loaded: Option<f64>,
    finished: bool,
    observer: SessionObserver,
}

impl ProgressMonitorBridge {
    pub fn new(initial: AvailabilityState, observer: SessionObserver) -> Self {
        let (sender, receiver) = watch::channel(initial);
        if let Some(on_availability) = &observer.on_availability {
            on_availability(initial);
        }

        Self {
            inner: Arc::new(Mutex::new(ProgressTracker {
                state: sender,
                last_loaded: None,
                finished: initial == AvailabilityState::Available,
                observer,
            })),
            state: receiver,
        }
    }

    pub fn state(&self) -> AvailabilityState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AvailabilityState> {
        self.state.clone()
    }

    /// Forwards one native progress notification.
    pub fn record(&self, native: NativeProgressEvent) {
        let event = ProgressEvent {
            loaded: native.loaded,
            total: native.total,
        };

        let (observer, transition) = {
            let mut tracker = self
                .inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            if tracker.last_loaded.is_some_and(|last| event.loaded < last) {
                warn!(?event, last_loaded = ?tracker.last_loaded, "regressive progress dropped");
                return;
            }
            tracker.last_loaded = Some(event.loaded);

            // Once available, progress is still forwarded but the state stays put.
            let transition = if tracker.finished {
                debug!(?event, "progress after download completed");
                None
            } else if event.is_terminal() {
                tracker.finished = true;
                tracker.transition(AvailabilityState::Available)
            } else {
                tracker.transition(AvailabilityState::Downloading)
            };
            (tracker.observer.clone(), transition)
        };

        // Callbacks run outside the lock so they may query the bridge.
        if let Some(on_progress) = &observer.on_progress {
            on_progress(event);
        }
        if let (Some(state), Some(on_availability)) = (transition, &observer.on_availability) {
            on_availability(state);
        }
    }

    /// Settles the state once the native instance reports ready.
    pub fn mark_ready(&self) {
        let (observer, transition) = {
            let mut tracker = self
                .inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            tracker.finished = true;
            let transition = tracker.transition(AvailabilityState::Available);
            (tracker.observer.clone(), transition)
        };

        if let (Some(state), Some(on_availability)) = (transition, &observer.on_availability) {
            on_availability(state);
        }
    }
}

impl ProgressTracker {
    fn transition(&mut self, next: AvailabilityState) -> Option<AvailabilityState> {
        let changed = self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        changed.then_some(next)
    }
}

/// Wires `bridge` into a native `create` call through its monitor callback.
///
/// The host invokes the callback with its monitor object before `create`
/// resolves; the bridge subscribes to `downloadprogress` on it.
pub fn attach_progress(options: &mut NativeCreateOptions, bridge: &ProgressMonitorBridge) {
    let bridge = bridge.clone();
    options.monitor = Some(Box::new(move |monitor: &mut dyn DownloadMonitor| {
        monitor.add_event_listener(DOWNLOAD_PROGRESS_EVENT, progress_listener(bridge));
    }));
}

/// Subscribes `bridge` to `downloadprogress` on a created instance.
///
/// Legacy instances dispatch download progress on themselves while their
/// `ready` signal is pending.
pub fn attach_instance_progress(native: &mut dyn NativeSession, bridge: &ProgressMonitorBridge) {
    native.add_event_listener(DOWNLOAD_PROGRESS_EVENT, progress_listener(bridge.clone()));
}

fn progress_listener(bridge: ProgressMonitorBridge) -> ProgressListener {
    Box::new(move |event: NativeProgressEvent| bridge.record(event))
}
