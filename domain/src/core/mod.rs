//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] — configuration errors detected before a session starts

pub mod error;
