//! Criterion definition loading.
//!
//! A definition source holds one criterion per line:
//!
//! ```text
//! ExclusiveCriterion Mood : mad sad glad
//! InclusiveCriterion Colors : red green blue
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CriterionError, Result};
use crate::obs::emit_definitions_loaded;

/// Behavioral kind of a criterion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    /// Holds exactly one value at a time.
    Exclusive,

    /// Holds zero or more values simultaneously.
    Inclusive,
}

impl CriterionKind {
    /// Canonical token used in definition sources.
    pub fn token(&self) -> &'static str {
        match self {
            CriterionKind::Exclusive => "ExclusiveCriterion",
            CriterionKind::Inclusive => "InclusiveCriterion",
        }
    }

    /// Parse a kind token. Accepts the canonical token and its short alias.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ExclusiveCriterion" | "Exclusive" => Some(CriterionKind::Exclusive),
            "InclusiveCriterion" | "Inclusive" => Some(CriterionKind::Inclusive),
            _ => None,
        }
    }
}

impl std::fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.token())
    }
}

/// One parsed criterion definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CriterionDefinition {
    /// Exclusive or inclusive behavior.
    pub kind: CriterionKind,

    /// Criterion name, matched exactly against override keys.
    pub name: String,

    /// Allowed lexical values in declaration order, without duplicates.
    pub allowed_values: Vec<String>,
}

impl CriterionDefinition {
    pub fn new<I, S>(kind: CriterionKind, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut allowed_values: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !allowed_values.contains(&value) {
                allowed_values.push(value);
            }
        }
        Self {
            kind,
            name: name.into(),
            allowed_values,
        }
    }
}

/// Parse a definition source into ordered definitions.
///
/// # Errors
///
/// `CriterionError::MalformedDefinition` for the first line that is blank,
/// lacks the `:` separator or carries more than one, does not carry exactly
/// a kind and a name before the separator, has an empty value list, or names
/// an unknown kind.
pub fn parse_definitions(text: &str) -> Result<Vec<CriterionDefinition>> {
    let mut definitions = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        definitions.push(parse_line(idx + 1, line)?);
    }

    emit_definitions_loaded(definitions.len());
    Ok(definitions)
}

/// Read and parse a definition file.
pub fn load_definitions(path: &Path) -> Result<Vec<CriterionDefinition>> {
    let text = std::fs::read_to_string(path)?;
    parse_definitions(&text)
}

fn parse_line(line_no: usize, line: &str) -> Result<CriterionDefinition> {
    let (head, values) = line
        .split_once(':')
        .ok_or_else(|| CriterionError::malformed(line_no, line, "missing ':' separator"))?;
    if values.contains(':') {
        return Err(CriterionError::malformed(line_no, line, "multiple ':' separators"));
    }

    let head: Vec<&str> = head.split_whitespace().collect();
    let [kind, name] = head.as_slice() else {
        return Err(CriterionError::malformed(
            line_no,
            line,
            format!("expected '<kind> <name>', found {} token(s)", head.len()),
        ));
    };

    let kind = CriterionKind::from_token(kind).ok_or_else(|| {
        CriterionError::malformed(line_no, line, format!("unknown criterion kind {kind:?}"))
    })?;

    let values: Vec<&str> = values.split_whitespace().collect();
    if values.is_empty() {
        return Err(CriterionError::malformed(line_no, line, "empty value list"));
    }

    Ok(CriterionDefinition::new(kind, *name, values))
}
