//! Criterion variant registry.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::criterion::CriterionVariant;
use crate::definition::{load_definitions, parse_definitions, CriterionDefinition};
use crate::error::Result;
use crate::obs::emit_variant_registered;

/// Holds one shared [`CriterionVariant`] per criterion name, in registration order.
///
/// Registering a name twice replaces the earlier variant (last registered
/// wins) while keeping the earlier position in the ordering.
#[derive(Debug, Clone, Default)]
pub struct CriterionRegistry {
    variants: Vec<Arc<CriterionVariant>>,
    index: HashMap<String, usize>,
}

impl CriterionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from parsed definitions.
    pub fn register_all<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = CriterionDefinition>,
    {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition);
        }
        registry
    }

    /// Parse a definition source and register every criterion in it.
    pub fn from_text(text: &str) -> Result<Self> {
        Ok(Self::register_all(parse_definitions(text)?))
    }

    /// Load a definition file and register every criterion in it.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::register_all(load_definitions(path)?))
    }

    /// Register one definition and return its shared variant.
    pub fn register(&mut self, definition: CriterionDefinition) -> Arc<CriterionVariant> {
        let variant = Arc::new(CriterionVariant::new(definition));
        let name = variant.name().to_string();
        let kind = variant.kind().token();

        match self.index.get(&name).copied() {
            Some(pos) => {
                self.variants[pos] = Arc::clone(&variant);
                emit_variant_registered(&name, kind, true);
            }
            None => {
                self.index.insert(name.clone(), self.variants.len());
                self.variants.push(Arc::clone(&variant));
                emit_variant_registered(&name, kind, false);
            }
        }

        variant
    }

    pub fn get(&self, name: &str) -> Option<&Arc<CriterionVariant>> {
        self.index.get(name).map(|&pos| &self.variants[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Variants in registration order.
    pub fn variants(&self) -> &[Arc<CriterionVariant>] {
        &self.variants
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.name())
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::CriterionKind;

    #[test]
    fn test_register_all_keeps_order() {
        let registry = CriterionRegistry::from_text(
            "ExclusiveCriterion Mood : mad sad glad\nInclusiveCriterion Colors : red green blue",
        )
        .expect("load failed");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Mood", "Colors"]);
        assert_eq!(
            registry.get("Colors").map(|v| v.kind()),
            Some(CriterionKind::Inclusive)
        );
        assert!(registry.get("Missing").is_none());
    }

    #[test]
    fn test_duplicate_name_last_wins_in_place() {
        let registry = CriterionRegistry::register_all(vec![
            CriterionDefinition::new(CriterionKind::Exclusive, "A", ["x"]),
            CriterionDefinition::new(CriterionKind::Exclusive, "B", ["y"]),
            CriterionDefinition::new(CriterionKind::Inclusive, "A", ["p", "q"]),
        ]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["A", "B"]);
        let a = registry.get("A").expect("A registered");
        assert_eq!(a.kind(), CriterionKind::Inclusive);
        assert_eq!(a.allowed_values(), ["p".to_string(), "q".to_string()]);
    }

    #[test]
    fn test_variant_shared_across_instances() {
        let mut registry = CriterionRegistry::new();
        let variant = registry.register(CriterionDefinition::new(
            CriterionKind::Exclusive,
            "Mode",
            ["on", "off"],
        ));

        let _a = variant.instantiate();
        let _b = variant.instantiate();
        assert_eq!(Arc::strong_count(&variant), 4);
    }

    #[test]
    fn test_malformed_source_builds_no_registry() {
        assert!(CriterionRegistry::from_text("ExclusiveCriterion Mood").is_err());
    }
}
