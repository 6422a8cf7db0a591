//! Configuration file loading for roundtable
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ROUNDTABLE_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./roundtable.toml` or `./.roundtable.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/roundtable/config.toml`
//! 5. The selected `--preset`, or the default values

mod error;
mod file_config;
mod loader;
mod preset;

pub use error::ConfigError;
pub use file_config::{
    FileConfig, FileCoordinatorConfig, FileOutputConfig, FileOutputFormat, FileParticipantConfig,
    FileSessionConfig, FileTransitionsConfig,
};
pub use loader::ConfigLoader;
pub use preset::Preset;
