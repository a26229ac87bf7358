//! In-memory fakes for the transport seam (testing only).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::transport::{CommandOutput, Transport};

/// Transport that records every command and replies `Done`.
///
/// `fail_on` makes a given command name reply with an error instead.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(String, Vec<String>)>>,
    failures: Vec<(String, String)>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(mut self, command: impl Into<String>, error: impl Into<String>) -> Self {
        self.failures.push((command.into(), error.into()));
        self
    }

    /// Commands sent so far, in order.
    pub fn sent(&self) -> Vec<(String, Vec<String>)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, command: &str, args: &[String]) -> Result<CommandOutput> {
        self.sent
            .lock()
            .unwrap()
            .push((command.to_string(), args.to_vec()));

        let reply = match self.failures.iter().find(|(c, _)| c == command) {
            Some((_, error)) => CommandOutput::failed(error.clone()),
            None => CommandOutput::ok("Done"),
        };
        Ok(reply)
    }
}
