use std::env;

use clap::Parser;
use seqtree::cli::args::Cli;
use seqtree::cli::commands::execute_command;
use seqtree::cli::output;
use seqtree::config::Settings;
use seqtree::exitcode;
use seqtree::infrastructure::di::ServiceContainer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let config_dir = match &cli.config_dir {
        Some(dir) => Some(dir.clone()),
        None => env::current_dir().ok(),
    };
    let settings = match Settings::load(config_dir.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&e);
            std::process::exit(exitcode::CONFIG);
        }
    };
    tracing::debug!(?settings, "settings loaded");

    let container = ServiceContainer::new(settings);
    if let Err(e) = execute_command(&cli, &container) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Stderr logging; `-d` repeated raises the level, `RUST_LOG` overrides it entirely.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    if verbosity > 3 {
        tracing::warn!(verbosity, "more than -ddd has no further effect");
    }
    tracing::info!(%level, "logging initialized");
}
