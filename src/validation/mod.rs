use crate::core::error::{CapabilityError, InvalidField};
use crate::core::types::{
    CapabilityOptions, LanguageModelOptions, LogicalCapability, TranslatorOptions,
};

/// Checks options locally, before any host interaction.
///
/// Every offending field is reported, not just the first.
pub fn validate_options(
    capability: LogicalCapability,
    options: &CapabilityOptions,
) -> Result<(), CapabilityError> {
    let mut fields = Vec::new();

    if options.capability() != capability {
        fields.push(InvalidField::new(
            "capability",
            format!("options are for {:?}", options.capability()),
        ));
    } else {
        match options {
            CapabilityOptions::Summarizer(summarizer) => {
                validate_context("sharedContext", summarizer.shared_context.as_deref(), &mut fields);
            }
            CapabilityOptions::Translator(translator) => {
                validate_language_pair(translator, &mut fields);
            }
            CapabilityOptions::Writer(writer) => {
                validate_context("sharedContext", writer.shared_context.as_deref(), &mut fields);
            }
            CapabilityOptions::Rewriter(rewriter) => {
                validate_context("sharedContext", rewriter.shared_context.as_deref(), &mut fields);
            }
            CapabilityOptions::LanguageDetector(_) => {}
            CapabilityOptions::LanguageModel(model) => {
                validate_language_model(model, &mut fields);
            }
        }
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(CapabilityError::InvalidOptions { capability, fields })
    }
}

fn validate_context(field: &str, context: Option<&str>, fields: &mut Vec<InvalidField>) {
    if context.is_some_and(|context| context.trim().is_empty()) {
        fields.push(InvalidField::new(field, "must not be blank when set"));
    }
}

fn validate_language_pair(options: &TranslatorOptions, fields: &mut Vec<InvalidField>) {
    let source_valid = validate_language_tag("sourceLanguage", &options.source_language, fields);
    let target_valid = validate_language_tag("targetLanguage", &options.target_language, fields);

    if source_valid
        && target_valid
        && options
            .source_language
            .eq_ignore_ascii_case(&options.target_language)
    {
        fields.push(InvalidField::new(
            "targetLanguage",
            "must differ from sourceLanguage",
        ));
    }
}

/// Accepts BCP 47 shaped tags: a 2-3 letter primary subtag followed by
/// alphanumeric subtags of 1-8 characters.
fn validate_language_tag(field: &str, tag: &str, fields: &mut Vec<InvalidField>) -> bool {
    if tag.is_empty() {
        fields.push(InvalidField::new(field, "must not be empty"));
        return false;
    }

    let mut subtags = tag.split('-');
    let primary_valid = subtags.next().is_some_and(|primary| {
        (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic())
    });
    let rest_valid = subtags.all(|subtag| {
        (1..=8).contains(&subtag.len()) && subtag.chars().all(|c| c.is_ascii_alphanumeric())
    });

    if primary_valid && rest_valid {
        true
    } else {
        fields.push(InvalidField::new(
            field,
            format!("{tag:?} is not a language tag"),
        ));
        false
    }
}

fn validate_language_model(options: &LanguageModelOptions, fields: &mut Vec<InvalidField>) {
    validate_context("systemPrompt", options.system_prompt.as_deref(), fields);

    match (options.temperature, options.top_k) {
        (Some(_), None) => fields.push(InvalidField::new(
            "topK",
            "must be set together with temperature",
        )),
        (None, Some(_)) => fields.push(InvalidField::new(
            "temperature",
            "must be set together with topK",
        )),
        _ => {}
    }

    if let Some(temperature) = options.temperature {
        if !temperature.is_finite() || temperature < 0.0 {
            fields.push(InvalidField::new(
                "temperature",
                "must be a finite number >= 0",
            ));
        }
    }

    if options.top_k == Some(0) {
        fields.push(InvalidField::new("topK", "must be >= 1"));
    }
}
