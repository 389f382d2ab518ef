use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalCapability {
    Summarizer,
    Translator,
    Writer,
    Rewriter,
    LanguageDetector,
    LanguageModel,
}

impl LogicalCapability {
    pub const ALL: [LogicalCapability; 6] = [
        Self::Summarizer,
        Self::Translator,
        Self::Writer,
        Self::Rewriter,
        Self::LanguageDetector,
        Self::LanguageModel,
    ];
}

/// Which host draft satisfied a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeTag {
    /// Namespaced object (`ai.summarizer`) with `capabilities()`/`create()`.
    Legacy,
    /// Top-level object (`Summarizer`) with `availability()`/`create()`.
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityState {
    Available,
    Downloadable,
    Downloading,
    Unavailable,
}

impl AvailabilityState {
    pub fn is_usable(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

/// Availability spellings reported by the legacy draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegacyAvailability {
    No,
    Readily,
    AfterDownload,
}

impl LegacyAvailability {
    pub fn normalize(self) -> AvailabilityState {
        match self {
            Self::No => AvailabilityState::Unavailable,
            Self::Readily => AvailabilityState::Available,
            Self::AfterDownload => AvailabilityState::Downloadable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "capability", rename_all = "snake_case")]
pub enum CapabilityOptions {
    Summarizer(SummarizerOptions),
    Translator(TranslatorOptions),
    Writer(WriterOptions),
    Rewriter(RewriterOptions),
    LanguageDetector(LanguageDetectorOptions),
    LanguageModel(LanguageModelOptions),
}

impl CapabilityOptions {
    pub fn capability(&self) -> LogicalCapability {
        match self {
            Self::Summarizer(_) => LogicalCapability::Summarizer,
            Self::Translator(_) => LogicalCapability::Translator,
            Self::Writer(_) => LogicalCapability::Writer,
            Self::Rewriter(_) => LogicalCapability::Rewriter,
            Self::LanguageDetector(_) => LogicalCapability::LanguageDetector,
            Self::LanguageModel(_) => LogicalCapability::LanguageModel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummarizerOptions {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SummaryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<TextFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<OutputLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryType {
    KeyPoints,
    Tldr,
    Teaser,
    Headline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextFormat {
    PlainText,
    Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputLength {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslatorOptions {
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WriterOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<WriterTone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<TextFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<OutputLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriterTone {
    Formal,
    Neutral,
    Casual,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewriterOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<RewriterTone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<TextFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<RewriterLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriterTone {
    MoreFormal,
    AsIs,
    MoreCasual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriterLength {
    Shorter,
    AsIs,
    Longer,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageDetectorOptions {}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageModelOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

/// One download progress notification, normalized from the host's
/// `downloadprogress` event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub loaded: f64,
    pub total: f64,
}

impl ProgressEvent {
    pub fn is_terminal(&self) -> bool {
        self.loaded >= self.total
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationChunk {
    /// Zero-based position of this increment within its generation call.
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationInput {
    Summarize {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<String>,
    },
    Translate {
        text: String,
    },
    Write {
        prompt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<String>,
    },
    Rewrite {
        text: String,
        instructions: String,
    },
    Prompt {
        text: String,
    },
}

impl GenerationInput {
    pub fn capability(&self) -> LogicalCapability {
        match self {
            Self::Summarize { .. } => LogicalCapability::Summarizer,
            Self::Translate { .. } => LogicalCapability::Translator,
            Self::Write { .. } => LogicalCapability::Writer,
            Self::Rewrite { .. } => LogicalCapability::Rewriter,
            Self::Prompt { .. } => LogicalCapability::LanguageModel,
        }
    }

    pub(crate) fn operation(&self) -> &'static str {
        match self {
            Self::Summarize { .. } => "summarize",
            Self::Translate { .. } => "translate",
            Self::Write { .. } => "write",
            Self::Rewrite { .. } => "rewrite",
            Self::Prompt { .. } => "prompt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageCandidate {
    #[serde(rename = "detectedLanguage")]
    pub detected_language: String,
    pub confidence: f64,
}
