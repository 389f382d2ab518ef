use serde_json::{Value, json};

use super::*;
use crate::core::types::{OutputLength, TextFormat, TranslatorOptions, WriterTone};
use crate::shapes::current_translate;

fn encode(options: &CapabilityOptions) -> Value {
    Value::Object(LegacyTranslator.encode_options(options))
}

#[test]
fn test_summarizer_uses_legacy_tldr_spelling() {
    let options = CapabilityOptions::Summarizer(SummarizerOptions {
        kind: Some(SummaryType::Tldr),
        format: Some(TextFormat::PlainText),
        length: Some(OutputLength::Short),
        shared_context: None,
    });

    assert_eq!(
        encode(&options),
        json!({ "type": "tl;dr", "format": "plain-text", "length": "short" })
    );
}

#[test]
fn test_summary_type_spellings_differ_only_for_tldr() {
    for kind in [
        SummaryType::KeyPoints,
        SummaryType::Tldr,
        SummaryType::Teaser,
        SummaryType::Headline,
    ] {
        let legacy = summary_type(kind);
        let current = current_translate::summary_type(kind);
        if kind == SummaryType::Tldr {
            assert_eq!((legacy, current), ("tl;dr", "tldr"));
        } else {
            assert_eq!(legacy, current);
        }
    }
}

#[test]
fn test_unset_summarizer_fields_are_omitted() {
    let options = CapabilityOptions::Summarizer(SummarizerOptions::default());

    assert_eq!(encode(&options), json!({}));
}

#[test]
fn test_writer_sends_shared_context() {
    let options = CapabilityOptions::Writer(WriterOptions {
        tone: Some(WriterTone::Neutral),
        format: None,
        length: None,
        shared_context: Some("support replies".to_string()),
    });

    assert_eq!(
        encode(&options),
        json!({ "tone": "neutral", "sharedContext": "support replies" })
    );
}

#[test]
fn test_language_model_uses_system_prompt_field() {
    let options = CapabilityOptions::LanguageModel(LanguageModelOptions {
        system_prompt: Some("Be brief.".to_string()),
        temperature: None,
        top_k: None,
    });

    assert_eq!(encode(&options), json!({ "systemPrompt": "Be brief." }));
}

#[test]
fn test_translator_options_match_current_shape() {
    let options = CapabilityOptions::Translator(TranslatorOptions {
        source_language: "es".to_string(),
        target_language: "en".to_string(),
    });

    assert_eq!(
        encode(&options),
        json!({ "sourceLanguage": "es", "targetLanguage": "en" })
    );
}

#[test]
fn test_calls_follow_legacy_signatures() {
    let translate = LegacyTranslator.encode_call(&GenerationInput::Translate {
        text: "hola".to_string(),
    });
    assert_eq!(translate.method, "translate");
    assert_eq!(translate.arguments, vec![json!("hola")]);

    let rewrite = LegacyTranslator.encode_call(&GenerationInput::Rewrite {
        text: "hey you".to_string(),
        instructions: "more polite".to_string(),
    });
    assert_eq!(rewrite.method, "rewriteStreaming");
    assert_eq!(
        rewrite.arguments,
        vec![json!("hey you"), json!({ "context": "more polite" })]
    );

    let prompt = LegacyTranslator.encode_call(&GenerationInput::Prompt {
        text: "hi".to_string(),
    });
    assert_eq!(prompt.method, "promptStreaming");
}
