//! Transport seam for pushing vectors to a tuning daemon.
//!
//! The daemon connection itself lives outside this crate. Implementors of
//! [`Transport`] send one named command with string arguments and hand back
//! the daemon's output and error text. An in-memory implementation is
//! provided for tests via the `fakes` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CriterionError, Result};
use crate::obs::{emit_command_sent, VectorSpan};
use crate::vector::TestVector;

/// Command that sets one criterion: `setCriterionState <name> <values...>`.
pub const SET_CRITERION_COMMAND: &str = "setCriterionState";

/// Command that asks the daemon to apply the pending criterion states.
pub const APPLY_COMMAND: &str = "applyConfigurations";

/// What the daemon returned for one command.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandOutput {
    pub output: String,
    pub error: String,
}

impl CommandOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: String::new(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            error: error.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// Remote command channel to the daemon under test.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `command` with `args` and return the daemon's reply.
    async fn send(&self, command: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Outcome of pushing one vector.
#[derive(Debug, Clone)]
pub struct ApplyReport {
    /// Vector name.
    pub vector: String,

    /// Number of `setCriterionState` commands issued.
    pub commands_sent: usize,

    /// Replies in send order, the final `applyConfigurations` reply included.
    pub outputs: Vec<CommandOutput>,
}

/// Issues the command stream for test vectors over a [`Transport`].
pub struct VectorApplier<'a, T: Transport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> VectorApplier<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Send one set command per criterion in vector order, then apply.
    ///
    /// Stops at the first command whose reply carries an error.
    pub async fn apply(&self, vector: &TestVector) -> Result<ApplyReport> {
        let _span = VectorSpan::enter(vector.name());
        let mut outputs = Vec::with_capacity(vector.len() + 1);

        for command in vector.commands() {
            let mut args = Vec::with_capacity(command.values.len() + 1);
            args.push(command.name);
            args.extend(command.values);
            outputs.push(self.send_checked(SET_CRITERION_COMMAND, &args).await?);
        }
        let commands_sent = outputs.len();

        outputs.push(self.send_checked(APPLY_COMMAND, &[]).await?);

        info!(
            event = "vector.applied",
            vector = %vector.name(),
            test_type = %vector.test_type(),
            commands_sent = commands_sent,
        );

        Ok(ApplyReport {
            vector: vector.name().to_string(),
            commands_sent,
            outputs,
        })
    }

    /// Apply vectors in order, stopping at the first failure.
    pub async fn apply_all(&self, vectors: &[TestVector]) -> Result<Vec<ApplyReport>> {
        let mut reports = Vec::with_capacity(vectors.len());
        for vector in vectors {
            reports.push(self.apply(vector).await?);
        }
        Ok(reports)
    }

    async fn send_checked(&self, command: &str, args: &[String]) -> Result<CommandOutput> {
        emit_command_sent(command, args);
        let reply = self.transport.send(command, args).await?;
        if reply.is_error() {
            return Err(CriterionError::Transport(format!(
                "{} {}: {}",
                command,
                args.join(" "),
                reply.error
            )));
        }
        Ok(reply)
    }
}
