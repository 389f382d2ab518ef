use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::RuntimeConfig;
use crate::core::traits::{HostEnvironment, NativeCapability};
use crate::core::types::{LogicalCapability, ShapeTag};
use crate::registry;

/// A host entry point resolved for one capability, tagged with its draft.
#[derive(Clone)]
pub struct DetectedShape {
    pub capability: LogicalCapability,
    pub tag: ShapeTag,
    pub entry_point: Arc<dyn NativeCapability>,
}

impl fmt::Debug for DetectedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectedShape")
            .field("capability", &self.capability)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Resolves which host draft, if any, provides a capability.
///
/// Detection only reads the injected environment, so it is cheap and safe to
/// repeat on every request.
#[derive(Clone)]
pub struct ShapeDetector {
    environment: Arc<dyn HostEnvironment>,
    legacy_namespace: String,
    detect_legacy: bool,
}

impl ShapeDetector {
    pub fn new(environment: Arc<dyn HostEnvironment>, config: &RuntimeConfig) -> Self {
        Self {
            environment,
            legacy_namespace: config.legacy_namespace.clone(),
            detect_legacy: config.detect_legacy,
        }
    }

    /// Returns the current-draft entry point when present, otherwise the
    /// legacy one, otherwise `None`.
    pub fn detect(&self, capability: LogicalCapability) -> Option<DetectedShape> {
        let descriptor = registry::descriptor(capability);

        if let Some(entry_point) = self.environment.global(descriptor.global_name) {
            debug!(?capability, global = descriptor.global_name, "detected current shape");
            return Some(DetectedShape {
                capability,
                tag: ShapeTag::Current,
                entry_point,
            });
        }

        if self.detect_legacy {
            if let Some(entry_point) = self
                .environment
                .namespace_member(&self.legacy_namespace, descriptor.legacy_member)
            {
                debug!(
                    ?capability,
                    namespace = %self.legacy_namespace,
                    member = descriptor.legacy_member,
                    "detected legacy shape"
                );
                return Some(DetectedShape {
                    capability,
                    tag: ShapeTag::Legacy,
                    entry_point,
                });
            }
        }

        debug!(?capability, "no host shape present");
        None
    }

    pub fn detect_tag(&self, capability: LogicalCapability) -> Option<ShapeTag> {
        self.detect(capability).map(|shape| shape.tag)
    }
}
