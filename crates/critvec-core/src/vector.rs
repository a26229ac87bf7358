//! Test vectors: named snapshots of criterion states for one test case.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::criterion::{CriterionInstance, CriterionState};
use crate::definition::CriterionKind;

/// One `(name, kind, values)` triple, ready for a per-criterion "set" command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CriterionCommand {
    pub name: String,
    pub kind: CriterionKind,
    pub values: Vec<String>,
}

impl CriterionCommand {
    fn from_instance(instance: &CriterionInstance) -> Self {
        Self {
            name: instance.name().to_string(),
            kind: instance.kind(),
            values: instance
                .current_values()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Serializable view of a vector, used for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VectorReport {
    pub name: String,
    pub test_type: String,
    pub digest: String,
    pub criteria: Vec<CriterionCommand>,
}

/// Criterion states for a single test case.
///
/// The criterion list is fixed at construction; only the test type can be
/// retagged by the driver.
#[derive(Debug, Clone)]
pub struct TestVector {
    name: String,
    test_type: String,
    criterions: Vec<CriterionInstance>,
}

impl TestVector {
    pub fn new(
        name: impl Into<String>,
        test_type: impl Into<String>,
        criterions: Vec<CriterionInstance>,
    ) -> Self {
        Self {
            name: name.into(),
            test_type: test_type.into(),
            criterions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn test_type(&self) -> &str {
        &self.test_type
    }

    pub fn set_test_type(&mut self, test_type: impl Into<String>) {
        self.test_type = test_type.into();
    }

    pub fn criterions(&self) -> &[CriterionInstance] {
        &self.criterions
    }

    pub fn get(&self, name: &str) -> Option<&CriterionInstance> {
        self.criterions.iter().find(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.criterions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criterions.is_empty()
    }

    /// Per-criterion commands in vector order.
    pub fn commands(&self) -> Vec<CriterionCommand> {
        self.criterions
            .iter()
            .map(CriterionCommand::from_instance)
            .collect()
    }

    /// Human-readable report: the test type, then one line per criterion.
    pub fn render(&self) -> String {
        let mut out = format!("testType: {}\n", self.test_type);
        out.push_str(&self.render_criteria());
        out
    }

    /// SHA-256 over the criterion lines; the test type does not contribute.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.render_criteria().as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn to_report(&self) -> VectorReport {
        VectorReport {
            name: self.name.clone(),
            test_type: self.test_type.clone(),
            digest: self.digest(),
            criteria: self.commands(),
        }
    }

    fn render_criteria(&self) -> String {
        let mut out = String::new();
        for criterion in &self.criterions {
            out.push_str(criterion.name());
            out.push_str(" = ");
            out.push_str(&criterion.current_values().join(" "));
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Display for TestVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
