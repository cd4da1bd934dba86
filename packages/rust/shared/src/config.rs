//! Application configuration for MentorScout.
//!
//! User config lives at `~/.mentorscout/mentorscout.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MentorScoutError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "mentorscout.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".mentorscout";

// ---------------------------------------------------------------------------
// Config structs (matching mentorscout.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Google Custom Search settings.
    #[serde(default)]
    pub google: GoogleConfig,

    /// Embedding/sentiment oracle endpoints.
    #[serde(default)]
    pub oracles: OraclesConfig,

    /// Hosted language model used for competitor reports.
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Number of ranked candidates returned per request.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Results requested from the search provider per query variant.
    #[serde(default = "default_results_per_query")]
    pub results_per_query: usize,

    /// Minimum years of experience a candidate must have; 0 disables the
    /// filter entirely.
    #[serde(default)]
    pub min_experience: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            results_per_query: default_results_per_query(),
            min_experience: 0,
        }
    }
}

fn default_top_k() -> usize {
    10
}
fn default_results_per_query() -> usize {
    10
}

/// `[google]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Name of the env var holding the Custom Search Engine id.
    #[serde(default = "default_cse_id_env")]
    pub cse_id_env: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            cse_id_env: default_cse_id_env(),
        }
    }
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".into()
}
fn default_cse_id_env() -> String {
    "GOOGLE_CSE_ID".into()
}

/// `[oracles]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OraclesConfig {
    /// HTTP endpoint of the embedding model.
    #[serde(default = "default_embedding_endpoint")]
    pub embedding_endpoint: String,

    /// HTTP endpoint of the sentiment classification model.
    #[serde(default = "default_sentiment_endpoint")]
    pub sentiment_endpoint: String,

    /// Name of the env var holding the inference API token, if any.
    #[serde(default = "default_oracle_token_env")]
    pub api_token_env: String,
}

impl Default for OraclesConfig {
    fn default() -> Self {
        Self {
            embedding_endpoint: default_embedding_endpoint(),
            sentiment_endpoint: default_sentiment_endpoint(),
            api_token_env: default_oracle_token_env(),
        }
    }
}

fn default_embedding_endpoint() -> String {
    "https://api-inference.huggingface.co/models/sentence-transformers/all-MiniLM-L6-v2".into()
}
fn default_sentiment_endpoint() -> String {
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english"
        .into()
}
fn default_oracle_token_env() -> String {
    "HF_API_TOKEN".into()
}

/// `[report]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// HTTP endpoint of the report-generation model.
    #[serde(default = "default_report_endpoint")]
    pub endpoint: String,

    /// Name of the env var holding the report model API key.
    #[serde(default = "default_report_key_env")]
    pub api_key_env: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            endpoint: default_report_endpoint(),
            api_key_env: default_report_key_env(),
        }
    }
}

fn default_report_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent".into()
}
fn default_report_key_env() -> String {
    "GEMINI_API_KEY".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.mentorscout/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MentorScoutError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.mentorscout/mentorscout.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MentorScoutError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        MentorScoutError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| MentorScoutError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| MentorScoutError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| MentorScoutError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the value of the env var named by `var_name`, erroring if unset or empty.
fn require_env(var_name: &str, what: &str) -> Result<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(MentorScoutError::config(format!(
            "{what} not found. Set the {var_name} environment variable."
        ))),
    }
}

/// Resolved Google credentials, read from the env vars the config names.
#[derive(Debug, Clone)]
pub struct GoogleCredentials {
    pub api_key: String,
    pub cse_id: String,
}

/// Check that both Google env vars are set and return their values.
pub fn resolve_google_credentials(config: &AppConfig) -> Result<GoogleCredentials> {
    Ok(GoogleCredentials {
        api_key: require_env(&config.google.api_key_env, "Google API key")?,
        cse_id: require_env(&config.google.cse_id_env, "Google CSE id")?,
    })
}

/// Check that the report model API key env var is set and return its value.
pub fn resolve_report_key(config: &AppConfig) -> Result<String> {
    require_env(&config.report.api_key_env, "Report model API key")
}

/// Read the optional inference API token named by the config. Missing is fine:
/// public inference endpoints accept unauthenticated requests at low rates.
pub fn resolve_oracle_token(config: &AppConfig) -> Option<String> {
    std::env::var(&config.oracles.api_token_env)
        .ok()
        .filter(|v| !v.is_empty())
}
