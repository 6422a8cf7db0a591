//! Configuration errors

use roundtable_application::RunSessionError;
use roundtable_domain::{ConfigIssue, DomainError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or assembling a session from it
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to load configuration: {0}")]
    Load(Box<figment::Error>),

    #[error("Invalid configuration:\n{}", list(.0))]
    Invalid(Vec<ConfigIssue>),

    #[error("Invalid configuration: {0}")]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Session(#[from] RunSessionError),

    #[error("Unknown preset: {0}. Valid: tutor-math")]
    UnknownPreset(String),
}

fn list(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}
