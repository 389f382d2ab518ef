use crate::core::types::{LogicalCapability, ShapeTag};

/// Default namespace object holding legacy entry points (`self.ai`).
pub const DEFAULT_LEGACY_NAMESPACE: &str = "ai";

/// Static description of how one logical capability appears on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    pub capability: LogicalCapability,
    /// Top-level global name under the current draft.
    pub global_name: &'static str,
    /// Member name inside the legacy namespace.
    pub legacy_member: &'static str,
    pub current: ShapeSchema,
    pub legacy: ShapeSchema,
}

/// Members and option vocabulary one shape accepts for a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSchema {
    /// Method that reports availability (`availability` or `capabilities`).
    pub query_member: &'static str,
    /// Option field names `create` understands, excluding `monitor`.
    pub option_fields: &'static [&'static str],
    pub accepts_monitor: bool,
    /// Generation method invoked on created instances, if any.
    pub generation_member: Option<&'static str>,
}

impl CapabilityDescriptor {
    pub fn schema(&self, shape: ShapeTag) -> &ShapeSchema {
        match shape {
            ShapeTag::Current => &self.current,
            ShapeTag::Legacy => &self.legacy,
        }
    }

    /// Members an entry point must expose to be usable under `shape`.
    pub fn required_members(&self, shape: ShapeTag) -> [&'static str; 2] {
        [self.schema(shape).query_member, CREATE_MEMBER]
    }
}

pub const CREATE_MEMBER: &str = "create";
const AVAILABILITY_MEMBER: &str = "availability";
const CAPABILITIES_MEMBER: &str = "capabilities";

static DESCRIPTORS: [CapabilityDescriptor; 6] = [
    CapabilityDescriptor {
        capability: LogicalCapability::Summarizer,
        global_name: "Summarizer",
        legacy_member: "summarizer",
        current: ShapeSchema {
            query_member: AVAILABILITY_MEMBER,
            option_fields: &["type", "format", "length", "sharedContext"],
            accepts_monitor: true,
            generation_member: Some("summarizeStreaming"),
        },
        legacy: ShapeSchema {
            query_member: CAPABILITIES_MEMBER,
            option_fields: &["type", "format", "length", "sharedContext"],
            accepts_monitor: true,
            generation_member: Some("summarizeStreaming"),
        },
    },
    CapabilityDescriptor {
        capability: LogicalCapability::Translator,
        global_name: "Translator",
        legacy_member: "translator",
        current: ShapeSchema {
            query_member: AVAILABILITY_MEMBER,
            option_fields: &["sourceLanguage", "targetLanguage"],
            accepts_monitor: true,
            generation_member: Some("translateStreaming"),
        },
        legacy: ShapeSchema {
            query_member: CAPABILITIES_MEMBER,
            option_fields: &["sourceLanguage", "targetLanguage"],
            accepts_monitor: true,
            generation_member: Some("translate"),
        },
    },
    CapabilityDescriptor {
        capability: LogicalCapability::Writer,
        global_name: "Writer",
        legacy_member: "writer",
        current: ShapeSchema {
            query_member: AVAILABILITY_MEMBER,
            option_fields: &["tone", "format", "length", "context"],
            accepts_monitor: true,
            generation_member: Some("writeStreaming"),
        },
        legacy: ShapeSchema {
            query_member: CAPABILITIES_MEMBER,
            option_fields: &["tone", "format", "length", "sharedContext"],
            accepts_monitor: true,
            generation_member: Some("writeStreaming"),
        },
    },
    CapabilityDescriptor {
        capability: LogicalCapability::Rewriter,
        global_name: "Rewriter",
        legacy_member: "rewriter",
        current: ShapeSchema {
            query_member: AVAILABILITY_MEMBER,
            option_fields: &["tone", "format", "length", "context"],
            accepts_monitor: true,
            generation_member: Some("rewriteStreaming"),
        },
        legacy: ShapeSchema {
            query_member: CAPABILITIES_MEMBER,
            option_fields: &["tone", "format", "length", "sharedContext"],
            accepts_monitor: true,
            generation_member: Some("rewriteStreaming"),
        },
    },
    CapabilityDescriptor {
        capability: LogicalCapability::LanguageDetector,
        global_name: "LanguageDetector",
        legacy_member: "languageDetector",
        current: ShapeSchema {
            query_member: AVAILABILITY_MEMBER,
            option_fields: &[],
            accepts_monitor: true,
            generation_member: None,
        },
        legacy: ShapeSchema {
            query_member: CAPABILITIES_MEMBER,
            option_fields: &[],
            accepts_monitor: true,
            generation_member: None,
        },
    },
    CapabilityDescriptor {
        capability: LogicalCapability::LanguageModel,
        global_name: "LanguageModel",
        legacy_member: "languageModel",
        current: ShapeSchema {
            query_member: AVAILABILITY_MEMBER,
            option_fields: &["initialPrompts", "temperature", "topK"],
            accepts_monitor: true,
            generation_member: Some("promptStreaming"),
        },
        legacy: ShapeSchema {
            query_member: CAPABILITIES_MEMBER,
            option_fields: &["systemPrompt", "temperature", "topK"],
            accepts_monitor: true,
            generation_member: Some("promptStreaming"),
        },
    },
];

pub fn descriptor(capability: LogicalCapability) -> &'static CapabilityDescriptor {
    match capability {
        LogicalCapability::Summarizer => &DESCRIPTORS[0],
        LogicalCapability::Translator => &DESCRIPTORS[1],
        LogicalCapability::Writer => &DESCRIPTORS[2],
        LogicalCapability::Rewriter => &DESCRIPTORS[3],
        LogicalCapability::LanguageDetector => &DESCRIPTORS[4],
        LogicalCapability::LanguageModel => &DESCRIPTORS[5],
    }
}

pub fn all_descriptors() -> &'static [CapabilityDescriptor] {
    &DESCRIPTORS
}
