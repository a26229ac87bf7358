//! Criterion variants and their runtime instances.
//!
//! A [`CriterionVariant`] is the shared, immutable descriptor for one
//! criterion name. Instances hold mutable state bound to a variant and come
//! in two flavors selected by [`CriterionKind`]:
//! - [`ExclusiveCriterion`]: exactly one value, `no_value` or an allowed one
//! - [`InclusiveCriterion`]: a set of allowed values, `{no_value}` when empty

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::definition::{CriterionDefinition, CriterionKind};
use crate::error::{CriterionError, Result};
use crate::obs::emit_value_rejected;

/// Sentinel denoting "unset" for every criterion.
pub const NO_VALUE: &str = "0";

/// Immutable descriptor shared by every instance of one criterion name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionVariant {
    name: String,
    kind: CriterionKind,
    allowed_values: Vec<String>,
}

impl CriterionVariant {
    pub fn new(definition: CriterionDefinition) -> Self {
        Self {
            name: definition.name,
            kind: definition.kind,
            allowed_values: definition.allowed_values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CriterionKind {
        self.kind
    }

    pub fn allowed_values(&self) -> &[String] {
        &self.allowed_values
    }

    pub fn no_value(&self) -> &'static str {
        NO_VALUE
    }

    /// Whether `value` is a member of the allowed set (the sentinel is not).
    pub fn allows(&self, value: &str) -> bool {
        self.allowed_values.iter().any(|v| v == value)
    }

    /// Create a fresh instance in the `no_value` state.
    pub fn instantiate(self: &Arc<Self>) -> CriterionInstance {
        match self.kind {
            CriterionKind::Exclusive => {
                CriterionInstance::Exclusive(ExclusiveCriterion::new(Arc::clone(self)))
            }
            CriterionKind::Inclusive => {
                CriterionInstance::Inclusive(InclusiveCriterion::new(Arc::clone(self)))
            }
        }
    }

    fn reject(&self, value: &str) -> CriterionError {
        emit_value_rejected(&self.name, value);
        CriterionError::invalid_value(&self.name, value)
    }
}

/// Uniform read/write contract shared by both instance flavors.
pub trait CriterionState {
    /// The variant this instance is bound to.
    fn variant(&self) -> &CriterionVariant;

    /// Apply a raw value string through the flavor's validation rules.
    ///
    /// On error the instance keeps its previous state.
    fn apply_raw(&mut self, raw: &str) -> Result<()>;

    /// Return to the initial `no_value` state.
    fn reset(&mut self);

    /// Currently held values in allowed-value order; `[no_value]` when unset.
    fn current_values(&self) -> Vec<&str>;

    /// Whether the instance is in the `no_value` state.
    fn is_no_value(&self) -> bool;

    fn name(&self) -> &str {
        self.variant().name()
    }

    fn kind(&self) -> CriterionKind {
        self.variant().kind()
    }
}

/// Criterion holding exactly one value.
#[derive(Debug, Clone)]
pub struct ExclusiveCriterion {
    variant: Arc<CriterionVariant>,
    current: String,
}

impl ExclusiveCriterion {
    pub fn new(variant: Arc<CriterionVariant>) -> Self {
        Self {
            variant,
            current: NO_VALUE.to_string(),
        }
    }

    pub fn current_value(&self) -> &str {
        &self.current
    }

    pub fn set_value(&mut self, value: &str) -> Result<()> {
        if value != NO_VALUE && !self.variant.allows(value) {
            return Err(self.variant.reject(value));
        }
        self.current = value.to_string();
        Ok(())
    }
}

impl CriterionState for ExclusiveCriterion {
    fn variant(&self) -> &CriterionVariant {
        &self.variant
    }

    fn apply_raw(&mut self, raw: &str) -> Result<()> {
        self.set_value(raw.trim())
    }

    fn reset(&mut self) {
        self.current = NO_VALUE.to_string();
    }

    fn current_values(&self) -> Vec<&str> {
        vec![self.current.as_str()]
    }

    fn is_no_value(&self) -> bool {
        self.current == NO_VALUE
    }
}

/// Criterion holding a set of values.
///
/// An empty `held` set is the `{no_value}` state, so real values and the
/// sentinel can never coexist.
#[derive(Debug, Clone)]
pub struct InclusiveCriterion {
    variant: Arc<CriterionVariant>,
    held: BTreeSet<String>,
}

impl InclusiveCriterion {
    pub fn new(variant: Arc<CriterionVariant>) -> Self {
        Self {
            variant,
            held: BTreeSet::new(),
        }
    }

    /// Whether `value` is currently held. `no_value` is held when the set is unset.
    pub fn contains(&self, value: &str) -> bool {
        if value == NO_VALUE {
            self.held.is_empty()
        } else {
            self.held.contains(value)
        }
    }

    /// Add one value. `no_value` resets the set.
    pub fn add_value(&mut self, value: &str) -> Result<()> {
        if value == NO_VALUE {
            self.held.clear();
            return Ok(());
        }
        if !self.variant.allows(value) {
            return Err(self.variant.reject(value));
        }
        self.held.insert(value.to_string());
        Ok(())
    }

    /// Remove one held value, falling back to `{no_value}` when none remain.
    pub fn remove_value(&mut self, value: &str) -> Result<()> {
        if value == NO_VALUE && self.held.is_empty() {
            return Ok(());
        }
        if !self.held.remove(value) {
            return Err(CriterionError::ValueNotSet {
                criterion: self.variant.name().to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }
}

impl CriterionState for InclusiveCriterion {
    fn variant(&self) -> &CriterionVariant {
        &self.variant
    }

    fn apply_raw(&mut self, raw: &str) -> Result<()> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(self.variant.reject(raw));
        }

        if tokens.contains(&NO_VALUE) {
            self.held.clear();
            return Ok(());
        }

        // Validate every token before touching state.
        if let Some(bad) = tokens.iter().find(|t| !self.variant.allows(t)) {
            return Err(self.variant.reject(bad));
        }

        self.held.extend(tokens.into_iter().map(str::to_string));
        Ok(())
    }

    fn reset(&mut self) {
        self.held.clear();
    }

    fn current_values(&self) -> Vec<&str> {
        if self.held.is_empty() {
            return vec![NO_VALUE];
        }
        self.variant
            .allowed_values()
            .iter()
            .filter(|v| self.held.contains(v.as_str()))
            .map(String::as_str)
            .collect()
    }

    fn is_no_value(&self) -> bool {
        self.held.is_empty()
    }
}

/// An instance of either flavor, as produced by the factory.
#[derive(Debug, Clone)]
pub enum CriterionInstance {
    Exclusive(ExclusiveCriterion),
    Inclusive(InclusiveCriterion),
}

impl CriterionInstance {
    fn state(&self) -> &dyn CriterionState {
        match self {
            CriterionInstance::Exclusive(c) => c,
            CriterionInstance::Inclusive(c) => c,
        }
    }

    fn state_mut(&mut self) -> &mut dyn CriterionState {
        match self {
            CriterionInstance::Exclusive(c) => c,
            CriterionInstance::Inclusive(c) => c,
        }
    }

    pub fn as_exclusive(&self) -> Option<&ExclusiveCriterion> {
        match self {
            CriterionInstance::Exclusive(c) => Some(c),
            CriterionInstance::Inclusive(_) => None,
        }
    }

    pub fn as_inclusive(&self) -> Option<&InclusiveCriterion> {
        match self {
            CriterionInstance::Inclusive(c) => Some(c),
            CriterionInstance::Exclusive(_) => None,
        }
    }

    pub fn as_inclusive_mut(&mut self) -> Option<&mut InclusiveCriterion> {
        match self {
            CriterionInstance::Inclusive(c) => Some(c),
            CriterionInstance::Exclusive(_) => None,
        }
    }
}

impl CriterionState for CriterionInstance {
    fn variant(&self) -> &CriterionVariant {
        self.state().variant()
    }

    fn apply_raw(&mut self, raw: &str) -> Result<()> {
        self.state_mut().apply_raw(raw)
    }

    fn reset(&mut self) {
        self.state_mut().reset()
    }

    fn current_values(&self) -> Vec<&str> {
        self.state().current_values()
    }

    fn is_no_value(&self) -> bool {
        self.state().is_no_value()
    }
}
