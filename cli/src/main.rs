//! CLI entrypoint for Sovereign Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{
    Deliberation, NoProgress, ProgressNotifier, RetryExecutor, RetryObserver,
    TracingRetryObserver,
};
use council_domain::{OutputFormat, Query};
use council_infrastructure::{ConfigLoader, ProviderRegistry, context_provider};
use council_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting Sovereign Council");

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).map_err(|e| anyhow!("{}", e))?
    };
    for issue in file_config.validated()? {
        warn!("{}", issue);
    }

    let query = match cli.query.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => Query::new(q),
        _ => bail!("A query is required. See --help for usage."),
    };

    // === Dependency Injection ===
    let mut council_config = file_config.to_council_config();
    if let Some(rounds) = cli.rounds {
        council_config = council_config.with_rounds(rounds);
    }
    let persona = cli
        .persona_override()
        .unwrap_or_else(|| council_config.persona().clone());

    let (progress, observer) = progress_sinks(&cli);
    let retry = RetryExecutor::new(*council_config.retry()).with_observer(observer);
    let providers = ProviderRegistry::openai_compatible(&file_config)
        .context("Failed to set up the reasoning provider")?;
    let deliberation = Deliberation::assemble(
        &file_config.to_roster(),
        &council_config,
        &providers,
        context_provider(&file_config),
        retry,
    )?;

    let output = if cli.route_only {
        let decision = deliberation
            .classify_with_progress(&query, false, progress.as_ref())
            .await?;
        ConsoleFormatter::render_route(&decision, cli.output)
    } else if cli.council_only {
        let council = deliberation
            .convene_council_with_progress(&query, &persona, progress.as_ref())
            .await?;
        ConsoleFormatter::render_council(query.text(), &council, cli.output)
    } else {
        let outcome = deliberation
            .route_and_deliberate_with_progress(&query, &persona, cli.deep, progress.as_ref())
            .await?;
        ConsoleFormatter::render(query.text(), &outcome, cli.output)
    };

    println!("{}", output);

    Ok(())
}

/// `-v` count picks the level unless `RUST_LOG` is set; `--log-file` adds a
/// plain-text file layer. The guard must live until exit to flush the file.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Progress bars on a terminal, plain lines otherwise. Plain lines go to
/// stdout, so they are skipped when stdout carries JSON.
fn progress_sinks(cli: &Cli) -> (Arc<dyn ProgressNotifier>, Arc<dyn RetryObserver>) {
    if cli.quiet {
        return (Arc::new(NoProgress), Arc::new(TracingRetryObserver));
    }
    if std::io::stderr().is_terminal() {
        let reporter = Arc::new(ProgressReporter::new());
        let observer: Arc<dyn RetryObserver> = reporter.clone();
        (reporter, observer)
    } else if cli.output != OutputFormat::Json {
        (Arc::new(SimpleProgress), Arc::new(SimpleProgress))
    } else {
        (Arc::new(NoProgress), Arc::new(TracingRetryObserver))
    }
}
