use serde_json::{Map, Value, json};

use crate::core::traits::NativeCall;
use crate::core::types::{
    CapabilityOptions, GenerationInput, LanguageModelOptions, OutputLength, RewriterOptions,
    ShapeTag, SummarizerOptions, SummaryType, TextFormat, TranslatorOptions, WriterOptions,
};
use crate::shapes::translator_contract::ShapeTranslator;
use crate::shapes::{
    context_argument, generation_method, insert_str, native_call, output_length, rewriter_length,
    rewriter_tone, text_format, writer_tone,
};

// The current draft requires type/format/length on Summarizer.create().
const DEFAULT_SUMMARY_TYPE: SummaryType = SummaryType::KeyPoints;
const DEFAULT_SUMMARY_FORMAT: TextFormat = TextFormat::Markdown;
const DEFAULT_SUMMARY_LENGTH: OutputLength = OutputLength::Medium;

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CurrentTranslator;

impl ShapeTranslator for CurrentTranslator {
    fn shape(&self) -> ShapeTag {
        ShapeTag::Current
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
        let method = generation_method(ShapeTag::Current, input);
        let arguments = match input {
            GenerationInput::Summarize { text, context } => {
                with_optional(json!(text), context_argument(context.as_deref()))
            }
            GenerationInput::Translate { text } => vec![json!(text)],
            GenerationInput::Write { prompt, context } => {
                with_optional(json!(prompt), context_argument(context.as_deref()))
            }
            GenerationInput::Rewrite { text, instructions } => {
                vec![json!(text), json!(instructions)]
            }
            GenerationInput::Prompt { text } => vec![json!(text)],
        };
        native_call(method, arguments)
    }
}

/// Query object for `availability()`. Only the translator takes one.
pub(crate) fn availability_query(options: &CapabilityOptions) -> Map<String, Value> {
    match options {
        CapabilityOptions::Translator(translator) => encode_language_pair(translator),
        _ => Map::new(),
    }
}

pub(crate) fn summary_type(kind: SummaryType) -> &'static str {
    match kind {
        SummaryType::KeyPoints => "key-points",
        SummaryType::Tldr => "tldr",
        SummaryType::Teaser => "teaser",
        SummaryType::Headline => "headline",
    }
}

fn encode_summarizer(options: &SummarizerOptions) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(
        "type".to_string(),
        json!(summary_type(options.kind.unwrap_or(DEFAULT_SUMMARY_TYPE))),
    );
    fields.insert(
        "format".to_string(),
        json!(text_format(options.format.unwrap_or(DEFAULT_SUMMARY_FORMAT))),
    );
    fields.insert(
        "length".to_string(),
        json!(output_length(options.length.unwrap_or(DEFAULT_SUMMARY_LENGTH))),
    );
    insert_str(&mut fields, "sharedContext", options.shared_context.as_deref());
    fields
}

pub(crate) fn encode_language_pair(options: &TranslatorOptions) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("sourceLanguage".to_string(), json!(options.source_language));
    fields.insert("targetLanguage".to_string(), json!(options.target_language));
    fields
}

fn encode_writer(options: &WriterOptions) -> Map<String, Value> {
    let mut fields = Map::new();
    insert_str(&mut fields, "tone", options.tone.map(writer_tone));
    insert_str(&mut fields, "format", options.format.map(text_format));
    insert_str(&mut fields, "length", options.length.map(output_length));
    insert_str(&mut fields, "context", options.shared_context.as_deref());
    fields
}

fn encode_rewriter(options: &RewriterOptions) -> Map<String, Value> {
    let mut fields = Map::new();
    insert_str(&mut fields, "tone", options.tone.map(rewriter_tone));
    insert_str(&mut fields, "format", options.format.map(text_format));
    insert_str(&mut fields, "length", options.length.map(rewriter_length));
    insert_str(&mut fields, "context", options.shared_context.as_deref());
    fields
}

fn encode_language_model(options: &LanguageModelOptions) -> Map<String, Value> {
    let mut fields = Map::new();
    if let Some(system_prompt) = &options.system_prompt {
        fields.insert(
            "initialPrompts".to_string(),
            json!([{ "role": "system", "content": system_prompt }]),
        );
    }
    if let Some(temperature) = options.temperature {
        fields.insert("temperature".to_string(), json!(temperature));
    }
    if let Some(top_k) = options.top_k {
        fields.insert("topK".to_string(), json!(top_k));
    }
    fields
}

fn with_optional(first: Value, second: Option<Value>) -> Vec<Value> {
    let mut arguments = vec![first];
    arguments.extend(second);
    arguments
}
