use serde_json::{Map, Value};

use crate::core::traits::NativeCall;
use crate::core::types::{CapabilityOptions, GenerationInput, ShapeTag};

/// Per-draft translation table.
///
/// Maps normalized options and generation inputs to the field names, enum
/// spellings and call signatures one host draft expects. Implementations must
/// cover every capability; options are validated before they get here.
pub(crate) trait ShapeTranslator: Send + Sync {
    fn shape(&self) -> ShapeTag;

    /// Builds the `create()` options object, without `monitor`.
    fn encode_options(&self, options: &CapabilityOptions) -> Map<String, Value>;

    /// Builds the generation method call for `input`.
    fn encode_call(&self, input: &GenerationInput) -> NativeCall;
}
