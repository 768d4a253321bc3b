//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        ApplicationError::Domain(e).into()
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(ApplicationError::Config { .. }) => crate::exitcode::CONFIG,
                InfraError::Application(ApplicationError::Domain(domain)) => match domain {
                    DomainError::InvalidArgument(_)
                    | DomainError::IndexOutOfRange { .. }
                    | DomainError::InvalidTreeSpec { .. }
                    | DomainError::CycleDetected(_) => crate::exitcode::DATAERR,
                    DomainError::OperationTimedOut { .. } => crate::exitcode::TEMPFAIL,
                    DomainError::OperationFailed { .. } => crate::exitcode::UNAVAILABLE,
                },
                InfraError::Application(ApplicationError::NotFound(_)) => crate::exitcode::NOINPUT,
                InfraError::Application(ApplicationError::OperationFailed { .. }) => {
                    crate::exitcode::IOERR
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rstest::rstest;

    use super::*;
    use crate::exitcode;

    #[rstest]
    #[case(CliError::Usage("no command".into()), exitcode::USAGE)]
    #[case(DomainError::invalid_argument("count").into(), exitcode::DATAERR)]
    #[case(DomainError::CycleDetected("a".into()).into(), exitcode::DATAERR)]
    #[case(
        DomainError::OperationTimedOut { attempts: 3, failures: vec![] }.into(),
        exitcode::TEMPFAIL
    )]
    #[case(
        DomainError::OperationFailed { attempt: 1, message: "gone".into() }.into(),
        exitcode::UNAVAILABLE
    )]
    #[case(ApplicationError::NotFound(PathBuf::from("x.tree")).into(), exitcode::NOINPUT)]
    #[case(
        ApplicationError::Config { message: "bad".into() }.into(),
        exitcode::CONFIG
    )]
    fn given_error_when_mapping_then_uses_sysexits_code(
        #[case] error: CliError,
        #[case] expected: i32,
    ) {
        assert_eq!(error.exit_code(), expected);
    }
}
