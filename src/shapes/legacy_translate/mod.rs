use serde_json::{Map, Value, json};

use crate::core::traits::NativeCall;
use crate::core::types::{
    CapabilityOptions, GenerationInput, LanguageModelOptions, RewriterOptions, ShapeTag,
    SummarizerOptions, SummaryType, WriterOptions,
};
use crate::shapes::current_translate::encode_language_pair;
use crate::shapes::translator_contract::ShapeTranslator;
use crate::shapes::{
    context_argument, generation_method, insert_str, native_call, output_length, rewriter_length,
    rewriter_tone, text_format, writer_tone,
};

/// Translation table for the namespaced `ai.*` draft.
///
/// The legacy draft treats every summarizer field as optional and lets the
/// host pick defaults, so unset fields are omitted rather than filled in.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LegacyTranslator;

impl ShapeTranslator for LegacyTranslator {
    fn shape(&self) -> ShapeTag {
        ShapeTag::Legacy
    }

    fn encode_options(&self, options: &CapabilityOptions) -> Map<String, Value> {
        match options {
            CapabilityOptions::Summarizer(summarizer) => encode_summarizer(summarizer),
            CapabilityOptions::Translator(translator) => encode_language_pair(translator),
            CapabilityOptions::Writer(writer) => encode_writer(writer),
            CapabilityOptions::Rewriter(rewriter) => encode_rewriter(rewriter),
            CapabilityOptions::LanguageDetector(_) => Map::new(),
            CapabilityOptions::LanguageModel(model) => encode_language_model(model),
        }
    }

    fn encode_call(&self, input: &GenerationInput) -> NativeCall {
        let method = generation_method(ShapeTag::Legacy, input);
        let mut arguments = Vec::new();
        match input {
            GenerationInput::Summarize { text, context } => {
                arguments.push(json!(text));
                arguments.extend(context_argument(context.as_deref()));
            }
            GenerationInput::Translate { text } => arguments.push(json!(text)),
            GenerationInput::Write { prompt, context } => {
                arguments.push(json!(prompt));
                arguments.extend(context_argument(context.as_deref()));
            }
            GenerationInput::Rewrite { text, instructions } => {
                // No positional instructions here; they travel as the call context.
                arguments.push(json!(text));
                arguments.extend(context_argument(Some(instructions.as_str())));
            }
            GenerationInput::Prompt { text } => arguments.push(json!(text)),
        }
        native_call(method, arguments)
    }
}

pub(crate) fn summary_type(kind: SummaryType) -> &'static str {
    match kind {
        SummaryType::KeyPoints => "key-points",
        SummaryType::Tldr => "tl;dr",
        SummaryType::Teaser => "teaser",
        SummaryType::Headline => "headline",
    }
}

fn encode_summarizer(options: &SummarizerOptions) -> Map<String, Value> {
    let mut fields = Map::new();
    insert_str(&mut fields, "type", options.kind.map(summary_type));
    insert_str(&mut fields, "format", options.format.map(text_format));
    insert_str(&mut fields, "length", options.length.map(output_length));
    insert_str(&mut fields, "sharedContext", options.shared_context.as_deref());
    fields
}

fn encode_writer(options: &WriterOptions) -> Map<String, Value> {
    let mut fields = Map::new();
    insert_str(&mut fields, "tone", options.tone.map(writer_tone));
    insert_str(&mut fields, "format", options.format.map(text_format));
    insert_str(&mut fields, "length", options.length.map(output_length));
    insert_str(&mut fields, "sharedContext", options.shared_context.as_deref());
    fields
}

fn encode_rewriter(options: &RewriterOptions) -> Map<String, Value> {
    let mut fields = Map::new();
    insert_str(&mut fields, "tone", options.tone.map(rewriter_tone));
    insert_str(&mut fields, "format", options.format.map(text_format));
    insert_str(&mut fields, "length", options.length.map(rewriter_length));
    insert_str(&mut fields, "sharedContext", options.shared_context.as_deref());
    fields
}

fn encode_language_model(options: &LanguageModelOptions) -> Map<String, Value> {
    let mut fields = Map::new();
    insert_str(&mut fields, "systemPrompt", options.system_prompt.as_deref());
    if let Some(temperature) = options.temperature {
        fields.insert("temperature".to_string(), json!(temperature));
    }
    if let Some(top_k) = options.top_k {
        fields.insert("topK".to_string(), json!(top_k));
    }
    fields
}

#[cfg(test)]
mod tests;
