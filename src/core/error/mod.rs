use crate::core::types::{LogicalCapability, ShapeTag};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing host environment")]
    MissingEnvironment,
    #[error("invalid legacy namespace: {reason}")]
    InvalidLegacyNamespace { reason: String },
}

/// A rejection raised by the host runtime, in the shape of a DOM exception.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {message}")]
pub struct HostError {
    pub name: String,
    pub message: String,
}

impl HostError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn missing_member(member: &str) -> Self {
        Self::new("TypeError", format!("{member} is not a function"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub field: String,
    pub reason: String,
}

impl InvalidField {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("no host capability{context}", context = format_context(.capability, None))]
    NoCapability { capability: LogicalCapability },
    #[error(
        "invalid options{context}: {fields}",
        context = format_context(.capability, None),
        fields = format_invalid_fields(.fields)
    )]
    InvalidOptions {
        capability: LogicalCapability,
        fields: Vec<InvalidField>,
    },
    #[error(
        "capability query failed{context}: {message}{host}",
        context = format_context(.capability, Some(.shape)),
        host = format_host(.host.as_ref())
    )]
    CapabilityQuery {
        capability: LogicalCapability,
        shape: ShapeTag,
        message: String,
        host: Option<HostError>,
    },
    #[error("capability unavailable{context}", context = format_context(.capability, Some(.shape)))]
    CapabilityUnavailable {
        capability: LogicalCapability,
        shape: ShapeTag,
    },
    #[error(
        "session init failed{context}: {host}",
        context = format_context(.capability, Some(.shape))
    )]
    SessionInit {
        capability: LogicalCapability,
        shape: ShapeTag,
        host: HostError,
    },
    #[error("session not ready{context}", context = format_context(.capability, Some(.shape)))]
    SessionNotReady {
        capability: LogicalCapability,
        shape: ShapeTag,
    },
    #[error(
        "session busy with another generation{context}",
        context = format_context(.capability, Some(.shape))
    )]
    SessionBusy {
        capability: LogicalCapability,
        shape: ShapeTag,
    },
    #[error(
        "generation failed{context} after {partial_len} bytes: {host}",
        context = format_context(.capability, Some(.shape)),
        partial_len = .partial.len()
    )]
    Generation {
        capability: LogicalCapability,
        shape: ShapeTag,
        partial: String,
        host: HostError,
    },
    #[error(
        "operation {operation} not supported{context}",
        context = format_context(.capability, None)
    )]
    OperationUnsupported {
        capability: LogicalCapability,
        operation: String,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CapabilityError {
    pub fn capability(&self) -> Option<LogicalCapability> {
        match self {
            Self::NoCapability { capability }
            | Self::InvalidOptions { capability, .. }
            | Self::CapabilityQuery { capability, .. }
            | Self::CapabilityUnavailable { capability, .. }
            | Self::SessionInit { capability, .. }
            | Self::SessionNotReady { capability, .. }
            | Self::SessionBusy { capability, .. }
            | Self::Generation { capability, .. }
            | Self::OperationUnsupported { capability, .. } => Some(*capability),
            Self::Config(_) => None,
        }
    }
}

fn format_invalid_fields(fields: &[InvalidField]) -> String {
    fields
        .iter()
        .map(|field| format!("{} ({})", field.field, field.reason))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_host(host: Option<&HostError>) -> String {
    match host {
        Some(host) => format!(" ({host})"),
        None => String::new(),
    }
}

fn format_context(capability: &LogicalCapability, shape: Option<&ShapeTag>) -> String {
    let mut context = vec![format!("capability={capability:?}")];

    if let Some(shape) = shape {
        context.push(format!("shape={shape:?}"));
    }

    format!(" [{}]", context.join(", "))
}
