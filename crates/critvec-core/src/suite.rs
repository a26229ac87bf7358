//! Test suites: ordered test cases turned into vectors.
//!
//! A suite file is JSON:
//!
//! ```json
//! {
//!   "cases": [
//!     { "name": "reset" },
//!     { "name": "sad_red", "test_type": "nominal",
//!       "criteria": { "Mood": "sad", "Colors": "red" } }
//!   ]
//! }
//! ```
//!
//! A case without `criteria` produces a baseline vector.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::criterion::CriterionState;
use crate::error::{CriterionError, Result};
use crate::factory::{Overrides, TestVectorFactory, DEFAULT_TEST_TYPE};
use crate::obs::VectorSpan;
use crate::vector::TestVector;

fn default_test_type() -> String {
    DEFAULT_TEST_TYPE.to_string()
}

/// One test case description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,

    #[serde(default = "default_test_type")]
    pub test_type: String,

    /// Raw values for the criteria that change; `None` requests a baseline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Overrides>,
}

impl TestCase {
    pub fn baseline(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            test_type: default_test_type(),
            criteria: None,
        }
    }

    pub fn with_criteria(name: impl Into<String>, criteria: Overrides) -> Self {
        Self {
            name: name.into(),
            test_type: default_test_type(),
            criteria: Some(criteria),
        }
    }

    pub fn with_test_type(mut self, test_type: impl Into<String>) -> Self {
        self.test_type = test_type.into();
        self
    }

    /// Build this case's vector.
    pub fn generate(&self, factory: &TestVectorFactory<'_>) -> Result<TestVector> {
        let _span = VectorSpan::enter(&self.name);
        factory
            .vector(&self.name, &self.test_type, self.criteria.as_ref())
            .map_err(|e| CriterionError::TestCase {
                case: self.name.clone(),
                source: Box::new(e),
            })
    }
}

/// Ordered list of test cases.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestSuite {
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self { cases }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build every case's vector in order, stopping at the first failing case.
    pub fn generate_all(&self, factory: &TestVectorFactory<'_>) -> Result<Vec<TestVector>> {
        self.cases.iter().map(|case| case.generate(factory)).collect()
    }
}

/// Daemon-side criterion state accumulated over a sequence of vectors.
///
/// Criteria absent from an incremental vector keep their previous values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveState {
    values: BTreeMap<String, Vec<String>>,
}

impl EffectiveState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, vector: &TestVector) {
        for criterion in vector.criterions() {
            let values = criterion
                .current_values()
                .into_iter()
                .map(str::to_string)
                .collect();
            self.values.insert(criterion.name().to_string(), values);
        }
    }

    /// Values last set for `name`, if any vector touched it.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
