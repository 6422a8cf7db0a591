//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use roundtable_application::{NoSessionProgress, SessionProgressNotifier};
use roundtable_domain::{OutputFormat, SpeakerSelectionMethod, TransitionMode};
use roundtable_infrastructure::{
    ConfigLoader, FileConfig, JsonlTranscriptObserver, Preset, SessionBlueprint,
};
use roundtable_presentation::{ChatRepl, Cli, ConsoleObserver, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(&cli);

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting roundtable");

    // === Configuration ===
    let config = load_config(&cli)?;
    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let blueprint = SessionBlueprint::from_config(&config)?;
    let format = cli
        .format
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    let mut console = ConsoleObserver::new(format);
    let progress: Arc<dyn SessionProgressNotifier> = if cli.quiet || format == OutputFormat::Json
    {
        Arc::new(NoSessionProgress)
    } else if std::io::stderr().is_terminal() {
        let reporter = Arc::new(ProgressReporter::new());
        console = console.with_reporter(reporter.clone());
        reporter
    } else {
        Arc::new(SimpleProgress)
    };

    let mut use_case = blueprint
        .use_case
        .with_observer(Arc::new(console))
        .with_progress(progress);

    let transcript_path = cli.transcript.clone().or(config.output.transcript.clone());
    if let Some(path) = transcript_path {
        let observer = JsonlTranscriptObserver::create(&path)
            .with_context(|| format!("Could not create transcript file {}", path.display()))?;
        info!("Writing transcript to {}", observer.path().display());
        use_case = use_case.with_observer(Arc::new(observer));
    }

    let repl = ChatRepl::new(use_case, blueprint.initial_speaker)
        .with_welcome(config.output.welcome.clone());
    repl.run(cli.message.clone()).await?;

    Ok(())
}

/// Preset (if any), then files and environment, then command-line overrides.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let base = match &cli.preset {
        Some(name) => {
            let preset: Preset = name.parse()?;
            let mode = cli
                .transitions
                .map(TransitionMode::from)
                .unwrap_or(TransitionMode::Disallowed);
            preset.file_config(mode)
        }
        None => FileConfig::default(),
    };

    let mut config = if cli.no_config {
        base
    } else {
        ConfigLoader::load_over(base, cli.config.as_deref())?
    };

    if cli.preset.is_none()
        && let Some(mode) = cli.transitions
    {
        config.transitions.mode = TransitionMode::from(mode).as_str().to_string();
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.session.max_rounds = max_rounds;
    }
    if let Some(selection) = cli.selection {
        config.session.speaker_selection = SpeakerSelectionMethod::from(selection)
            .as_str()
            .to_string();
    }
    if let Some(seed) = cli.seed {
        config.session.seed = Some(seed);
    }

    Ok(config)
}

/// Initialize logging based on verbosity level, optionally teeing into a rolling file.
fn init_logging(cli: &Cli) -> Option<WorkerGuard> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(level));

    let (file, guard) = match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "roundtable.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new(level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    guard
}
