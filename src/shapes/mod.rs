pub(crate) mod current_translate;
pub(crate) mod legacy_translate;
pub(crate) mod translator_contract;

use serde_json::{Map, Value, json};

use crate::core::traits::NativeCall;
use crate::core::types::{
    GenerationInput, OutputLength, RewriterLength, RewriterTone, ShapeTag, TextFormat, WriterTone,
};
use crate::registry;
use crate::shapes::current_translate::CurrentTranslator;
use crate::shapes::legacy_translate::LegacyTranslator;
use crate::shapes::translator_contract::ShapeTranslator;

pub(crate) fn translator_for(shape: ShapeTag) -> &'static dyn ShapeTranslator {
    match shape {
        ShapeTag::Current => &CurrentTranslator,
        ShapeTag::Legacy => &LegacyTranslator,
    }
}

/// Native method a generation input invokes under `shape`.
pub(crate) fn generation_method(shape: ShapeTag, input: &GenerationInput) -> &'static str {
    registry::descriptor(input.capability())
        .schema(shape)
        .generation_member
        .unwrap_or(input.operation())
}

pub(crate) fn native_call(method: &str, arguments: Vec<Value>) -> NativeCall {
    NativeCall {
        method: method.to_string(),
        arguments,
    }
}

/// `{ context }` per-call options object, present only when a context is given.
pub(crate) fn context_argument(context: Option<&str>) -> Option<Value> {
    context.map(|context| json!({ "context": context }))
}

pub(crate) fn insert_str(fields: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        fields.insert(key.to_string(), Value::String(value.to_string()));
    }
}

pub(crate) fn text_format(format: TextFormat) -> &'static str {
    match format {
        TextFormat::PlainText => "plain-text",
        TextFormat::Markdown => "markdown",
    }
}

pub(crate) fn output_length(length: OutputLength) -> &'static str {
    match length {
        OutputLength::Short => "short",
        OutputLength::Medium => "medium",
        OutputLength::Long => "long",
    }
}

pub(crate) fn writer_tone(tone: WriterTone) -> &'static str {
    match tone {
        WriterTone::Formal => "formal",
        WriterTone::Neutral => "neutral",
        WriterTone::Casual => "casual",
    }
}

pub(crate) fn rewriter_tone(tone: RewriterTone) -> &'static str {
    match tone {
        RewriterTone::MoreFormal => "more-formal",
        RewriterTone::AsIs => "as-is",
        RewriterTone::MoreCasual => "more-casual",
    }
}

pub(crate) fn rewriter_length(length: RewriterLength) -> &'static str {
    match length {
        RewriterLength::Shorter => "shorter",
        RewriterLength::AsIs => "as-is",
        RewriterLength::Longer => "longer",
    }
}
