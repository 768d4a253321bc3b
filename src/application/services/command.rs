//! Retrying command execution

use std::io;
use std::process::Output;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use crate::application::ApplicationResult;
use crate::domain::RetryInvoker;
use crate::infrastructure::traits::CommandRunner;

/// Why a single command attempt failed.
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error("cannot start command: {0}")]
    Spawn(#[from] io::Error),

    #[error("exit code {code:?}: {stderr}")]
    Exit { code: Option<i32>, stderr: String },
}

impl AttemptError {
    /// A missing or non-executable program will not appear between attempts.
    pub fn is_retryable(&self) -> bool {
        match self {
            AttemptError::Spawn(e) => !matches!(
                e.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
            ),
            AttemptError::Exit { .. } => true,
        }
    }
}

/// Runs external commands under a retry budget.
pub struct CommandService {
    cmd: Arc<dyn CommandRunner>,
    invoker: RetryInvoker,
}

impl CommandService {
    pub fn new(cmd: Arc<dyn CommandRunner>, invoker: RetryInvoker) -> Self {
        Self { cmd, invoker }
    }

    /// Run `program` until it exits successfully or the budget is spent.
    #[instrument(level = "debug", skip(self))]
    pub fn run_with_retry(&self, program: &str, args: &[&str]) -> ApplicationResult<Output> {
        let output = self.invoker.invoke_if(
            || -> Result<Output, AttemptError> {
                let output = self.cmd.run(program, args)?;
                if output.status.success() {
                    Ok(output)
                } else {
                    Err(AttemptError::Exit {
                        code: output.status.code(),
                        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    })
                }
            },
            AttemptError::is_retryable,
        )?;
        info!(program, "command succeeded");
        Ok(output)
    }
}
