//! Local hardware probing through external commands.

pub mod disks;

pub use disks::{discover_disks, parse_key_value_pairs};

use crate::{InventoryError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs a local command and hands back its stdout.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute_command_with_output(&self, command: &str, args: &[&str]) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct CommandExecutor {
    timeout: Duration,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

impl CommandExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Executor for CommandExecutor {
    async fn execute_command_with_output(&self, command: &str, args: &[&str]) -> Result<String> {
        let child = Command::new(command)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                InventoryError::Probe(format!(
                    "{} timed out after {}s",
                    command,
                    self.timeout.as_secs()
                ))
            })??;

        if !output.status.success() {
            return Err(InventoryError::Probe(format!(
                "{} {} exited with {}: {}",
                command,
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_command_executor_captures_stdout() {
        let executor = CommandExecutor::default();
        let output = executor
            .execute_command_with_output("sh", &["-c", "echo hello"])
            .await
            .unwrap();
        assert_eq!(output.trim(), "hello");
    }

    #[tokio::test]
    async fn test_command_executor_reports_failure() {
        let executor = CommandExecutor::default();
        let err = executor
            .execute_command_with_output("sh", &["-c", "echo broken >&2; exit 3"])
            .await
            .unwrap_err();
        match err {
            InventoryError::Probe(message) => assert!(message.contains("broken")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
