use tracing::debug;

use crate::core::error::{CapabilityError, HostError};
use crate::core::traits::LegacyCapabilities;
use crate::core::types::{
    AvailabilityState, CapabilityOptions, LanguageDetectorOptions, LegacyAvailability,
    LogicalCapability, ShapeTag,
};
use crate::detect::DetectedShape;
use crate::registry;
use crate::shapes::current_translate;

/// Queries the detected entry point and normalizes its answer.
///
/// Host rejections, missing members and unknown spellings surface as
/// [`CapabilityError::CapabilityQuery`]; they are never folded into
/// [`AvailabilityState::Unavailable`].
pub async fn query_availability(
    capability: LogicalCapability,
    shape: &DetectedShape,
    options: &CapabilityOptions,
) -> Result<AvailabilityState, CapabilityError> {
    ensure_members(capability, shape)?;

    let state = match shape.tag {
        ShapeTag::Current => {
            let query = current_translate::availability_query(options);
            let raw = shape
                .entry_point
                .availability(&query)
                .await
                .map_err(|host| query_rejected(capability, shape.tag, "availability()", host))?;
            parse_current(capability, &raw)?
        }
        ShapeTag::Legacy => {
            let report = shape
                .entry_point
                .capabilities()
                .await
                .map_err(|host| query_rejected(capability, shape.tag, "capabilities()", host))?;
            let raw = legacy_report_value(capability, options, report.as_ref())?;
            parse_legacy(capability, &raw)?.normalize()
        }
    };

    debug!(?capability, shape = ?shape.tag, ?state, "availability resolved");
    Ok(state)
}

/// Availability of detecting one specific language on a legacy detector.
///
/// The current draft has no per-language query, so it reports the
/// detector-wide availability instead.
pub async fn query_language_availability(
    shape: &DetectedShape,
    language: &str,
) -> Result<AvailabilityState, CapabilityError> {
    let capability = LogicalCapability::LanguageDetector;
    ensure_members(capability, shape)?;

    match shape.tag {
        ShapeTag::Current => {
            let options = CapabilityOptions::LanguageDetector(LanguageDetectorOptions::default());
            query_availability(capability, shape, &options).await
        }
        ShapeTag::Legacy => {
            let report = shape
                .entry_point
                .capabilities()
                .await
                .map_err(|host| query_rejected(capability, shape.tag, "capabilities()", host))?;
            let raw = report
                .language_available(language)
                .or_else(|| report.available())
                .ok_or_else(|| malformed(capability, shape.tag, "report has no availability"))?;
            Ok(parse_legacy(capability, &raw)?.normalize())
        }
    }
}

pub fn parse_current(
    capability: LogicalCapability,
    raw: &str,
) -> Result<AvailabilityState, CapabilityError> {
    match raw {
        "available" => Ok(AvailabilityState::Available),
        "unavailable" => Ok(AvailabilityState::Unavailable),
        "downloadable" => Ok(AvailabilityState::Downloadable),
        "downloading" => Ok(AvailabilityState::Downloading),
        other => Err(malformed(
            capability,
            ShapeTag::Current,
            &format!("unknown availability {other:?}"),
        )),
    }
}

pub fn parse_legacy(
    capability: LogicalCapability,
    raw: &str,
) -> Result<LegacyAvailability, CapabilityError> {
    match raw {
        "no" => Ok(LegacyAvailability::No),
        "readily" => Ok(LegacyAvailability::Readily),
        "after-download" => Ok(LegacyAvailability::AfterDownload),
        other => Err(malformed(
            capability,
            ShapeTag::Legacy,
            &format!("unknown availability {other:?}"),
        )),
    }
}

fn legacy_report_value(
    capability: LogicalCapability,
    options: &CapabilityOptions,
    report: &dyn LegacyCapabilities,
) -> Result<String, CapabilityError> {
    let pair_value = match options {
        CapabilityOptions::Translator(translator) => report.language_pair_available(
            &translator.source_language,
            &translator.target_language,
        ),
        _ => None,
    };

    pair_value
        .or_else(|| report.available())
        .ok_or_else(|| malformed(capability, ShapeTag::Legacy, "report has no availability"))
}

fn ensure_members(
    capability: LogicalCapability,
    shape: &DetectedShape,
) -> Result<(), CapabilityError> {
    let descriptor = registry::descriptor(capability);
    for member in descriptor.required_members(shape.tag) {
        if !shape.entry_point.has_member(member) {
            return Err(malformed(
                capability,
                shape.tag,
                &format!("entry point is missing {member}()"),
            ));
        }
    }
    Ok(())
}

fn query_rejected(
    capability: LogicalCapability,
    shape: ShapeTag,
    call: &str,
    host: HostError,
) -> CapabilityError {
    CapabilityError::CapabilityQuery {
        capability,
        shape,
        message: format!("{call} rejected"),
        host: Some(host),
    }
}

fn malformed(capability: LogicalCapability, shape: ShapeTag, message: &str) -> CapabilityError {
    CapabilityError::CapabilityQuery {
        capability,
        shape,
        message: message.to_string(),
        host: None,
    }
}
