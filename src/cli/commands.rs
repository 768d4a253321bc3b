//! Command dispatch

use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{fibonacci, generate_combinations, RetryInvoker, TraversalOrder};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Fib { count }) => cmd_fib(*count),
        Some(Commands::Tokenize { file }) => cmd_tokenize(container, file.as_deref()),
        Some(Commands::Combinations { k, items }) => cmd_combinations(*k, items),
        Some(Commands::Traverse { file, order }) => {
            cmd_traverse(container, file, order.map(TraversalOrder::from))
        }
        Some(Commands::Tree { file }) => cmd_tree(container, file),
        Some(Commands::Retry { attempts, command }) => cmd_retry(container, *attempts, command),
        Some(Commands::Config { command }) => {
            cmd_config(container, cli.config_dir.as_deref(), command)
        }
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Err(CliError::Usage(
            "no command given, see `seqtree --help`".to_string(),
        )),
    }
}

#[instrument]
fn cmd_fib(count: i64) -> CliResult<()> {
    output::info(&fibonacci(count)?.join(" "));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tokenize(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let service = container.text_service();
    let tokens = match file {
        Some(path) => service.tokenize_file(path)?,
        None => service.tokenize_reader(io::stdin().lock())?,
    };
    debug!("tokenize: {} tokens", tokens.len());
    output::lines(&tokens);
    Ok(())
}

#[instrument]
fn cmd_combinations(k: i64, items: &[String]) -> CliResult<()> {
    output::lines(generate_combinations(items, k)?.map(|combination| combination.join(" ")));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_traverse(
    container: &ServiceContainer,
    file: &Path,
    order: Option<TraversalOrder>,
) -> CliResult<()> {
    let order = order.unwrap_or(container.settings.traversal.order);
    debug!("traverse: order={}", order);
    let trees = container.tree_service().traverse(file, order)?;
    let numbered = trees.len() > 1;
    for (i, names) in trees.iter().enumerate() {
        if numbered {
            output::header(&format!("tree {}", i + 1));
        }
        output::lines(names);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    for rendered in container.tree_service().render(file)? {
        output::info(rendered.trim_end());
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_retry(
    container: &ServiceContainer,
    attempts: Option<usize>,
    command: &[String],
) -> CliResult<()> {
    let invoker = match attempts {
        Some(0) => {
            return Err(CliError::InvalidArgs(
                "--attempts must be at least 1".to_string(),
            ))
        }
        Some(n) => RetryInvoker::new(n)?,
        None => container.settings.retry_invoker()?,
    };
    let (program, args) = command
        .split_first()
        .ok_or_else(|| CliError::InvalidArgs("missing command".to_string()))?;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let result = container
        .command_service(invoker)
        .run_with_retry(program, &args)?;
    io::stdout()
        .write_all(&result.stdout)
        .map_err(|e| InfraError::io("write command output", e))?;
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    config_dir: Option<&Path>,
    command: &ConfigCommands,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(container.settings.to_toml()?.trim_end()),
        ConfigCommands::Template => output::info(Settings::template().trim_end()),
        ConfigCommands::Path => {
            output::header("Global");
            match global_config_path() {
                Some(path) => report_path(&path),
                None => output::warning("cannot determine global config directory"),
            }
            output::header("Local");
            let dir = config_dir.unwrap_or_else(|| Path::new("."));
            report_path(&local_config_path(dir));
        }
    }
    Ok(())
}

/// Same presence check `Settings::load` applies before reading a layer.
fn report_path(path: &Path) {
    if path.exists() {
        output::success(&path.display());
    } else {
        output::detail(&format!("{} (not found)", path.display()));
    }
}

fn cmd_completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
