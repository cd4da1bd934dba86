//! Shared types, error model, and configuration for MentorScout.
//!
//! This crate is the foundation depended on by all other MentorScout crates.
//! It provides:
//! - [`MentorScoutError`] — the unified error type
//! - Domain types ([`RawResult`], [`Candidate`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, GoogleConfig, GoogleCredentials, OraclesConfig, ReportConfig,
    config_dir, config_file_path, init_config, load_config, load_config_from,
    resolve_google_credentials, resolve_oracle_token, resolve_report_key,
};
pub use error::{MentorScoutError, Result};
pub use types::{Candidate, RawResult};
