use std::sync::Arc;

use async_trait::async_trait;
use capability_runtime::core::error::*;
use capability_runtime::core::traits::*;
use capability_runtime::core::types::*;
use serde_json::{Map, Value};

struct CompileEntryPoint;

#[async_trait]
impl NativeCapability for CompileEntryPoint {
    fn has_member(&self, member: &str) -> bool {
        matches!(member, "availability" | "create")
    }

    async fn availability(&self, _query: &Map<String, Value>) -> Result<String, HostError> {
        Ok("available".to_string())
    }

    async fn create(
        &self,
        _options: NativeCreateOptions,
    ) -> Result<Box<dyn NativeSession>, HostError> {
        Ok(Box::new(CompileInstance))
    }
}

struct CompileInstance;

#[async_trait]
impl NativeSession for CompileInstance {
    fn open_stream(&self, _call: NativeCall) -> Result<NativeStream, HostError> {
        Ok(NativeStream::Single(Box::pin(async {
            Ok::<_, HostError>("ok".to_string())
        })))
    }
}

struct CompileEnvironment;

impl HostEnvironment for CompileEnvironment {
    fn global(&self, name: &str) -> Option<Arc<dyn NativeCapability>> {
        (name == "LanguageModel").then(|| Arc::new(CompileEntryPoint) as Arc<dyn NativeCapability>)
    }

    fn namespace_member(
        &self,
        _namespace: &str,
        _member: &str,
    ) -> Option<Arc<dyn NativeCapability>> {
        None
    }
}

#[tokio::test]
async fn test_core_exports_compile() {
    let options = CapabilityOptions::LanguageModel(LanguageModelOptions {
        system_prompt: Some("Be brief.".to_string()),
        temperature: Some(0.2),
        top_k: Some(4),
    });
    assert_eq!(options.capability(), LogicalCapability::LanguageModel);

    let _config_error = ConfigError::MissingEnvironment;
    let _invalid = CapabilityError::InvalidOptions {
        capability: LogicalCapability::Translator,
        fields: vec![InvalidField::new("targetLanguage", "must not be empty")],
    };
    let _generation = CapabilityError::Generation {
        capability: LogicalCapability::Writer,
        shape: ShapeTag::Current,
        partial: "Hel".to_string(),
        host: HostError::new("AbortError", "aborted"),
    };

    let environment: Arc<dyn HostEnvironment> = Arc::new(CompileEnvironment);
    let entry_point = environment
        .global("LanguageModel")
        .expect("entry point should be exposed");

    let availability: Result<String, HostError> = entry_point.availability(&Map::new()).await;
    assert_eq!(availability, Ok("available".to_string()));

    let instance = entry_point
        .create(NativeCreateOptions::default())
        .await
        .expect("create should succeed");
    let stream = instance.open_stream(NativeCall {
        method: "promptStreaming".to_string(),
        arguments: vec![Value::from("hi")],
    });
    assert!(matches!(stream, Ok(NativeStream::Single(_))));
}
