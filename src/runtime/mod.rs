use std::sync::Arc;

use tracing::{debug, warn};

use crate::availability;
use crate::config::RuntimeConfig;
use crate::core::error::{CapabilityError, ConfigError};
use crate::core::traits::{HostEnvironment, NativeCreateOptions};
use crate::core::types::{AvailabilityState, CapabilityOptions, LogicalCapability, ShapeTag};
use crate::detect::{DetectedShape, ShapeDetector};
use crate::progress::{self, ProgressMonitorBridge, SessionObserver};
use crate::registry;
use crate::session::{PendingSession, Session};
use crate::shapes;
use crate::validation;

/// Entry point applications use instead of touching either host draft.
pub struct CapabilityRuntime {
    detector: ShapeDetector,
    config: RuntimeConfig,
}

#[derive(Default)]
pub struct CapabilityRuntimeBuilder {
    environment: Option<Arc<dyn HostEnvironment>>,
    config: RuntimeConfig,
}

impl CapabilityRuntime {
    pub fn builder() -> CapabilityRuntimeBuilder {
        CapabilityRuntimeBuilder::default()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Which draft, if any, the host exposes for `capability`.
    pub fn detect(&self, capability: LogicalCapability) -> Option<ShapeTag> {
        self.detector.detect_tag(capability)
    }

    pub async fn availability(
        &self,
        capability: LogicalCapability,
        options: &CapabilityOptions,
    ) -> Result<AvailabilityState, CapabilityError> {
        let shape = self.require_shape(capability)?;
        availability::query_availability(capability, &shape, options).await
    }

    /// Availability of detecting `language`, for hosts that can answer per language.
    pub async fn language_availability(
        &self,
        language: &str,
    ) -> Result<AvailabilityState, CapabilityError> {
        let shape = self.require_shape(LogicalCapability::LanguageDetector)?;
        availability::query_language_availability(&shape, language).await
    }

    /// Creates a native instance and returns it before its `ready` signal resolves.
    ///
    /// Options are validated before the host is asked anything. A capability
    /// that reports `Unavailable` is never created.
    pub async fn prepare_session(
        &self,
        capability: LogicalCapability,
        options: &CapabilityOptions,
        observer: SessionObserver,
    ) -> Result<PendingSession, CapabilityError> {
        let shape = self.require_shape(capability)?;
        validation::validate_options(capability, options)?;

        let state = availability::query_availability(capability, &shape, options).await?;
        if state == AvailabilityState::Unavailable {
            debug!(?capability, shape = ?shape.tag, "capability reported unavailable");
            return Err(CapabilityError::CapabilityUnavailable {
                capability,
                shape: shape.tag,
            });
        }

        let schema = registry::descriptor(capability).schema(shape.tag);
        let translator = shapes::translator_for(shape.tag);
        debug_assert_eq!(translator.shape(), shape.tag);
        let mut create_options = NativeCreateOptions::new(translator.encode_options(options));
        let bridge = ProgressMonitorBridge::new(state, observer);
        if schema.accepts_monitor {
            progress::attach_progress(&mut create_options, &bridge);
        }

        debug!(?capability, shape = ?shape.tag, ?state, "creating native session");
        let mut native = shape
            .entry_point
            .create(create_options)
            .await
            .map_err(|host| {
                warn!(?capability, shape = ?shape.tag, error = %host, "native create rejected");
                CapabilityError::SessionInit {
                    capability,
                    shape: shape.tag,
                    host,
                }
            })?;

        // Legacy instances also dispatch download progress on themselves.
        if shape.tag == ShapeTag::Legacy && schema.accepts_monitor {
            progress::attach_instance_progress(native.as_mut(), &bridge);
        }
        let ready = native.take_ready();
        Ok(PendingSession::new(
            Session::new(capability, shape.tag, native, bridge),
            ready,
        ))
    }

    pub async fn create_session(
        &self,
        capability: LogicalCapability,
        options: &CapabilityOptions,
    ) -> Result<Session, CapabilityError> {
        self.create_session_observed(capability, options, SessionObserver::new())
            .await
    }

    /// Creates a session and waits until it is ready, reporting download
    /// progress and availability changes to `observer`.
    pub async fn create_session_observed(
        &self,
        capability: LogicalCapability,
        options: &CapabilityOptions,
        observer: SessionObserver,
    ) -> Result<Session, CapabilityError> {
        self.prepare_session(capability, options, observer)
            .await?
            .ready()
            .await
    }

    fn require_shape(&self, capability: LogicalCapability) -> Result<DetectedShape, CapabilityError> {
        self.detector
            .detect(capability)
            .ok_or(CapabilityError::NoCapability { capability })
    }
}

impl CapabilityRuntimeBuilder {
    pub fn with_environment(mut self, environment: Arc<dyn HostEnvironment>) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<CapabilityRuntime, ConfigError> {
        let environment = self.environment.ok_or(ConfigError::MissingEnvironment)?;
        self.config.validate()?;

        Ok(CapabilityRuntime {
            detector: ShapeDetector::new(environment, &self.config),
            config: self.config,
        })
    }
}
