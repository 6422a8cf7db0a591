//! CLI command definitions

use clap::{Parser, ValueEnum};
use roundtable_domain::{OutputFormat, SpeakerSelectionMethod, TransitionMode};
use std::path::PathBuf;

/// Console rendering of transcript messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Colored chat lines with speaker names
    Chat,
    /// `[seq] sender: content` lines
    Plain,
    /// One JSON object per message
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Chat => OutputFormat::Chat,
            FormatArg::Plain => OutputFormat::Plain,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// How the transition graph is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransitionsArg {
    /// The graph lists who may speak next
    Allowed,
    /// The graph lists who may not speak next
    Disallowed,
    /// Anyone may speak next
    Unrestricted,
}

impl From<TransitionsArg> for TransitionMode {
    fn from(arg: TransitionsArg) -> Self {
        match arg {
            TransitionsArg::Allowed => TransitionMode::Allowed,
            TransitionsArg::Disallowed => TransitionMode::Disallowed,
            TransitionsArg::Unrestricted => TransitionMode::Unrestricted,
        }
    }
}

/// Speaker selection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SelectionArg {
    /// The coordinator proposes who speaks next
    Coordinator,
    /// Next eligible participant in roster order
    RoundRobin,
    /// Uniformly random among the eligible participants
    Random,
}

impl From<SelectionArg> for SpeakerSelectionMethod {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Coordinator => SpeakerSelectionMethod::Coordinator,
            SelectionArg::RoundRobin => SpeakerSelectionMethod::RoundRobin,
            SelectionArg::Random => SpeakerSelectionMethod::Random,
        }
    }
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Turn-based multi-participant conversations")]
#[command(long_about = r#"
Roundtable runs a group conversation between participants, one turn at a
time. After every turn the next speaker is chosen among the participants the
transition graph allows, and participants flagged for human input wait for
you to type their message.

Configuration files are loaded from (in priority order):
1. ROUNDTABLE_* environment variables
2. --config <path>          Explicit config file
3. ./roundtable.toml        Project-level config
4. ~/.config/roundtable/config.toml   Global config

While a session runs, every line you type answers the participant that is
waiting for input. Commands: /status, /cancel, /quit, /help.

Example:
  roundtable --preset tutor-math
  roundtable --preset tutor-math --transitions allowed "Can you teach me fractions?"
  roundtable --config session.toml --transcript session.jsonl
"#)]
pub struct Cli {
    /// The first message of the conversation (read from stdin when omitted)
    pub message: Option<String>,

    /// Built-in session to start from (tutor-math)
    #[arg(short, long, value_name = "NAME")]
    pub preset: Option<String>,

    /// How the preset's transition graph is read
    #[arg(long, value_enum, value_name = "MODE")]
    pub transitions: Option<TransitionsArg>,

    /// Stop after this many completed turns
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Speaker selection strategy
    #[arg(long, value_enum)]
    pub selection: Option<SelectionArg>,

    /// Seed for random speaker selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write every committed message to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Console output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write diagnostic logs to a daily rolling file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
