//! Test vector generation.
//!
//! Two modes share one entry point:
//! - no overrides: every known criterion is reset to `no_value` (baseline)
//! - overrides: only the named criteria are emitted (incremental delta);
//!   unlisted criteria keep whatever state the daemon already holds

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::criterion::{CriterionInstance, CriterionState, CriterionVariant};
use crate::error::Result;
use crate::obs::{emit_unknown_override, emit_vector_generated};
use crate::registry::CriterionRegistry;
use crate::vector::TestVector;

/// Raw override values keyed by criterion name.
pub type Overrides = BTreeMap<String, String>;

/// Default test type assigned to generated vectors.
pub const DEFAULT_TEST_TYPE: &str = "nominal";

/// Build instances for `variants` in order.
///
/// # Errors
///
/// Any validation failure aborts the call; no partial vector is returned.
pub fn generate(
    variants: &[Arc<CriterionVariant>],
    overrides: Option<&Overrides>,
) -> Result<Vec<CriterionInstance>> {
    let Some(overrides) = overrides else {
        let instances: Vec<CriterionInstance> = variants
            .iter()
            .map(|variant| {
                let mut instance = variant.instantiate();
                instance.reset();
                instance
            })
            .collect();
        emit_vector_generated(instances.len(), true);
        return Ok(instances);
    };

    for name in overrides.keys() {
        if !variants.iter().any(|v| v.name() == name) {
            emit_unknown_override(name);
        }
    }

    let mut instances = Vec::with_capacity(overrides.len());
    for variant in variants {
        let Some(raw) = overrides.get(variant.name()) else {
            continue;
        };
        let mut instance = variant.instantiate();
        instance.apply_raw(raw)?;
        instances.push(instance);
    }

    emit_vector_generated(instances.len(), false);
    Ok(instances)
}

/// Generates vectors against one registry.
#[derive(Debug, Clone, Copy)]
pub struct TestVectorFactory<'a> {
    registry: &'a CriterionRegistry,
}

impl<'a> TestVectorFactory<'a> {
    pub fn new(registry: &'a CriterionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a CriterionRegistry {
        self.registry
    }

    pub fn generate(&self, overrides: Option<&Overrides>) -> Result<Vec<CriterionInstance>> {
        generate(self.registry.variants(), overrides)
    }

    /// Full vector with every criterion reset.
    pub fn baseline(&self, name: &str) -> Result<TestVector> {
        self.vector(name, DEFAULT_TEST_TYPE, None)
    }

    /// Named vector tagged with `test_type`.
    pub fn vector(
        &self,
        name: &str,
        test_type: &str,
        overrides: Option<&Overrides>,
    ) -> Result<TestVector> {
        let criterions = self.generate(overrides)?;
        Ok(TestVector::new(name, test_type, criterions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::NO_VALUE;
    use crate::error::CriterionError;

    fn registry() -> CriterionRegistry {
        CriterionRegistry::from_text(
            "ExclusiveCriterion Mood : mad sad glad\nInclusiveCriterion Colors : red green blue",
        )
        .expect("load failed")
    }

    fn overrides(pairs: &[(&str, &str)]) -> Overrides {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_baseline_resets_everything() {
        let registry = registry();
        let instances = generate(registry.variants(), None).expect("generate failed");
        assert_eq!(instances.len(), registry.len());
        assert!(instances.iter().all(|i| i.is_no_value()));
        assert!(instances
            .iter()
            .all(|i| i.current_values() == vec![NO_VALUE]));
    }

    #[test]
    fn test_incremental_only_listed() {
        let registry = registry();
        let instances = generate(registry.variants(), Some(&overrides(&[("Mood", "mad")])))
            .expect("generate failed");
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].name(), "Mood");
        assert_eq!(instances[0].current_values(), vec!["mad"]);
    }

    #[test]
    fn test_order_follows_registration_not_overrides() {
        let registry = registry();
        let instances = generate(
            registry.variants(),
            Some(&overrides(&[("Colors", "blue"), ("Mood", "glad")])),
        )
        .expect("generate failed");
        let names: Vec<&str> = instances.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["Mood", "Colors"]);
    }

    #[test]
    fn test_empty_overrides_yield_empty_delta() {
        let registry = registry();
        let instances =
            generate(registry.variants(), Some(&Overrides::new())).expect("generate failed");
        assert!(instances.is_empty());
    }

    #[test]
    fn test_unknown_override_ignored() {
        let registry = registry();
        let instances = generate(
            registry.variants(),
            Some(&overrides(&[("Mood", "sad"), ("Ghost", "boo")])),
        )
        .expect("generate failed");
        assert_eq!(instances.len(), 1);
    }

    #[test]
    fn test_invalid_override_aborts() {
        let registry = registry();
        let err = generate(
            registry.variants(),
            Some(&overrides(&[("Mood", "sad"), ("Colors", "red purple")])),
        )
        .unwrap_err();
        match err {
            CriterionError::InvalidCriterionValue { criterion, value } => {
                assert_eq!(criterion, "Colors");
                assert_eq!(value, "purple");
            }
            other => panic!("Expected InvalidCriterionValue, got {:?}", other),
        }
    }

    #[test]
    fn test_factory_vector_helpers() {
        let registry = registry();
        let factory = TestVectorFactory::new(&registry);

        let baseline = factory.baseline("reset").expect("baseline failed");
        assert_eq!(baseline.name(), "reset");
        assert_eq!(baseline.test_type(), DEFAULT_TEST_TYPE);
        assert_eq!(baseline.len(), 2);

        let delta = factory
            .vector("delta", "boundary", Some(&overrides(&[("Colors", "red")])))
            .expect("vector failed");
        assert_eq!(delta.test_type(), "boundary");
        assert_eq!(delta.len(), 1);
    }
}
