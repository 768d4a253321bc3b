//! Tests for CommandService with a scripted command runner
#![cfg(unix)]

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};

use seqtree::application::services::{AttemptError, CommandService};
use seqtree::application::ApplicationError;
use seqtree::config::Settings;
use seqtree::domain::{DomainError, RetryInvoker};
use seqtree::infrastructure::di::ServiceContainer;
use seqtree::infrastructure::traits::{CommandRunner, RealFileSystem};
use seqtree::util::testing;

/// One scripted outcome of a command run.
enum Step {
    Exit(i32, &'static str),
    SpawnError(io::ErrorKind),
}

/// Command runner replaying a fixed script and recording every call.
struct ScriptedRunner {
    steps: Mutex<Vec<Step>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    fn new(mut steps: Vec<Step>) -> Self {
        steps.reverse();
        Self {
            steps: Mutex::new(steps),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", cmd, args.join(" ")));
        match self.steps.lock().unwrap().pop() {
            Some(Step::Exit(code, stdout)) => Ok(Output {
                status: ExitStatus::from_raw(code << 8),
                stdout: stdout.as_bytes().to_vec(),
                stderr: format!("exit {code}").into_bytes(),
            }),
            Some(Step::SpawnError(kind)) => Err(io::Error::from(kind)),
            None => panic!("runner called more often than scripted"),
        }
    }
}

fn service(runner: Arc<ScriptedRunner>, attempts: usize) -> CommandService {
    CommandService::new(runner, RetryInvoker::new(attempts).unwrap())
}

#[test]
fn given_command_failing_twice_when_running_then_third_output_is_returned() {
    testing::init_test_setup();
    let runner = Arc::new(ScriptedRunner::new(vec![
        Step::Exit(1, ""),
        Step::Exit(2, ""),
        Step::Exit(0, "ok\n"),
    ]));

    let output = service(runner.clone(), 3)
        .run_with_retry("flaky", &["--now"])
        .unwrap();

    assert_eq!(output.stdout, b"ok\n");
    assert_eq!(runner.call_count(), 3);
    assert!(runner
        .calls
        .lock()
        .unwrap()
        .iter()
        .all(|call| call == "flaky --now"));
}

#[test]
fn given_command_always_failing_when_running_then_times_out_with_every_failure() {
    let runner = Arc::new(ScriptedRunner::new(vec![
        Step::Exit(1, ""),
        Step::Exit(1, ""),
        Step::Exit(1, ""),
    ]));

    let result = service(runner.clone(), 3).run_with_retry("broken", &[]);

    match result {
        Err(ApplicationError::Domain(DomainError::OperationTimedOut { attempts, failures })) => {
            assert_eq!(attempts, 3);
            assert_eq!(failures.len(), 3);
            assert!(failures[0].contains("exit 1"), "got: {}", failures[0]);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    assert_eq!(runner.call_count(), 3);
}

#[test]
fn given_missing_program_when_running_then_fails_without_retry() {
    let runner = Arc::new(ScriptedRunner::new(vec![Step::SpawnError(
        io::ErrorKind::NotFound,
    )]));

    let result = service(runner.clone(), 3).run_with_retry("nope", &[]);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::OperationFailed { attempt: 1, .. }))
    ));
    assert_eq!(runner.call_count(), 1);
}

#[test]
fn given_transient_spawn_error_when_running_then_retries() {
    let runner = Arc::new(ScriptedRunner::new(vec![
        Step::SpawnError(io::ErrorKind::Interrupted),
        Step::Exit(0, "done"),
    ]));

    let output = service(runner.clone(), 3).run_with_retry("busy", &[]).unwrap();

    assert_eq!(output.stdout, b"done");
    assert_eq!(runner.call_count(), 2);
}

#[test]
fn given_attempt_errors_when_classifying_then_only_missing_programs_are_final() {
    assert!(!AttemptError::Spawn(io::ErrorKind::NotFound.into()).is_retryable());
    assert!(!AttemptError::Spawn(io::ErrorKind::PermissionDenied.into()).is_retryable());
    assert!(AttemptError::Spawn(io::ErrorKind::TimedOut.into()).is_retryable());
    assert!(AttemptError::Exit {
        code: Some(1),
        stderr: String::new(),
    }
    .is_retryable());
}

#[test]
fn given_container_with_scripted_runner_when_running_then_uses_configured_budget() {
    let runner = Arc::new(ScriptedRunner::new(vec![
        Step::Exit(1, ""),
        Step::Exit(1, ""),
    ]));
    let mut settings = Settings::default();
    settings.retry.max_attempts = 2;
    let container = ServiceContainer::with_deps(settings, Arc::new(RealFileSystem), runner.clone());

    let invoker = container.settings.retry_invoker().unwrap();
    let result = container.command_service(invoker).run_with_retry("x", &[]);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::OperationTimedOut { attempts: 2, .. }))
    ));
    assert_eq!(runner.call_count(), 2);
}
