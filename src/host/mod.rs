use std::sync::Arc;

use indexmap::IndexMap;

use crate::core::traits::{HostEnvironment, NativeCapability};

/// In-memory host environment assembled from named entry points.
///
/// Used by embeddings that resolve host objects up front (for example a wasm
/// glue layer that walks `self` once) and by tests.
#[derive(Clone, Default)]
pub struct StaticHost {
    globals: IndexMap<String, Arc<dyn NativeCapability>>,
    namespaces: IndexMap<String, IndexMap<String, Arc<dyn NativeCapability>>>,
}

impl StaticHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(
        mut self,
        name: impl Into<String>,
        capability: Arc<dyn NativeCapability>,
    ) -> Self {
        self.globals.insert(name.into(), capability);
        self
    }

    pub fn with_namespace_member(
        mut self,
        namespace: impl Into<String>,
        member: impl Into<String>,
        capability: Arc<dyn NativeCapability>,
    ) -> Self {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .insert(member.into(), capability);
        self
    }

    pub fn global_names(&self) -> impl Iterator<Item = &str> {
        self.globals.keys().map(String::as_str)
    }
}

impl HostEnvironment for StaticHost {
    fn global(&self, name: &str) -> Option<Arc<dyn NativeCapability>> {
        self.globals.get(name).map(Arc::clone)
    }

    fn namespace_member(
        &self,
        namespace: &str,
        member: &str,
    ) -> Option<Arc<dyn NativeCapability>> {
        self.namespaces
            .get(namespace)
            .and_then(|members| members.get(member))
            .map(Arc::clone)
    }
}
