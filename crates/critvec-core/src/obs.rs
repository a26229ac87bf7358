//! Structured tracing hooks for criterion loading and vector generation.
//!
//! Events are emitted with an `event` field so log pipelines can filter on
//! lifecycle steps: definitions loaded, vector generated, value rejected,
//! command sent.

use tracing::{debug, info, warn};

/// RAII guard that enters a vector-scoped span while a test case is built or applied.
///
/// ```ignore
/// let _span = VectorSpan::enter("boot_sequence");
/// // every event below carries vector = "boot_sequence"
/// ```
pub struct VectorSpan {
    _span: tracing::span::EnteredSpan,
}

impl VectorSpan {
    pub fn enter(vector: &str) -> Self {
        let span = tracing::info_span!("critvec.vector", vector = %vector);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: a definition source was parsed.
pub fn emit_definitions_loaded(count: usize) {
    info!(event = "definitions.loaded", count = count);
}

/// Emit event: a criterion was registered, possibly replacing an earlier one.
pub fn emit_variant_registered(name: &str, kind: &str, replaced: bool) {
    if replaced {
        warn!(event = "registry.replaced", criterion = %name, kind = %kind);
    } else {
        debug!(event = "registry.registered", criterion = %name, kind = %kind);
    }
}

/// Emit event: a vector was generated.
pub fn emit_vector_generated(criteria: usize, baseline: bool) {
    info!(event = "vector.generated", criteria = criteria, baseline = baseline);
}

/// Emit event: an override named a criterion the registry does not know.
pub fn emit_unknown_override(name: &str) {
    warn!(event = "vector.unknown_override", criterion = %name);
}

/// Emit event: a value failed validation (warning level).
pub fn emit_value_rejected(criterion: &str, value: &str) {
    warn!(event = "criterion.rejected", criterion = %criterion, value = %value);
}

/// Emit event: a command was handed to the transport.
pub fn emit_command_sent(command: &str, args: &[String]) {
    debug!(event = "transport.sent", command = %command, args = ?args);
}
