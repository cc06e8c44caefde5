//! Configuration management for the PDF search CLI.
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file in the working directory, and are then adjusted by
//! command-line flags. Missing required settings abort startup before any
//! network client is constructed.

use std::fmt;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// API key for the OpenAI embedding and chat endpoints.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Postgres connection string of the pgvector database.
pub const ENV_DATABASE_URL: &str = "PGVECTOR_URL";
/// Name of the langchain collection holding the document chunks.
pub const ENV_COLLECTION: &str = "PGVECTOR_COLLECTION";
/// Embedding model used by the question tool.
pub const ENV_EMBEDDING_MODEL: &str = "OPENAI_MODEL";
/// Embedding model used by the retrieval probe.
pub const ENV_PROBE_EMBEDDING_MODEL: &str = "OPENAI_EMBEDDING_MODEL";
pub const ENV_CHAT_MODEL: &str = "OPENAI_CHAT_MODEL";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
/// YAML prompt definition overriding the built-in search prompt.
pub const ENV_PROMPT_FILE: &str = "PDFSEARCH_PROMPT_FILE";

/// Variables that must be present, in the order they are checked.
pub const REQUIRED_VARS: [&str; 3] = [ENV_API_KEY, ENV_DATABASE_URL, ENV_COLLECTION];

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// SQLAlchemy driver suffixes that Postgres drivers outside Python reject.
const SQLALCHEMY_DRIVERS: [&str; 4] = ["+psycopg2", "+psycopg", "+asyncpg", "+pg8000"];

/// Main application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// API key for the OpenAI endpoints
    pub api_key: String,

    /// Connection string as configured (may carry a SQLAlchemy driver suffix)
    pub database_url: String,

    /// Vector collection name
    pub collection: String,

    /// Embedding model for questions
    pub embedding_model: String,

    /// Embedding model for the retrieval probe
    pub probe_embedding_model: String,

    /// Chat completion model
    pub chat_model: String,

    /// Sampling temperature for answers
    pub temperature: f32,

    /// Base URL of the OpenAI-compatible API
    pub base_url: String,

    /// Optional YAML prompt definition
    pub prompt_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("collection", &self.collection)
            .field("embedding_model", &self.embedding_model)
            .field("probe_embedding_model", &self.probe_embedding_model)
            .field("chat_model", &self.chat_model)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .field("prompt_file", &self.prompt_file)
            .field("log_level", &self.log_level)
            .field("verbose", &self.verbose)
            .field("no_color", &self.no_color)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment.
    ///
    /// A missing `.env` file is fine; a malformed one is a configuration
    /// error. Variables already set in the environment win over `.env`.
    ///
    /// # Example
    /// ```no_run
    /// use pdfsearch_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Collection: {}", config.collection);
    /// ```
    pub fn load() -> AppResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(AppError::Config(format!("Failed to read .env file: {}", e))),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. The first missing required
    /// variable is reported by name.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        for key in REQUIRED_VARS {
            if get(key).is_none() {
                return Err(AppError::MissingEnv(key.to_string()));
            }
        }

        let require = |key: &str| get(key).ok_or_else(|| AppError::MissingEnv(key.to_string()));

        Ok(Self {
            api_key: require(ENV_API_KEY)?,
            database_url: require(ENV_DATABASE_URL)?,
            collection: require(ENV_COLLECTION)?,
            embedding_model: get(ENV_EMBEDDING_MODEL)
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            probe_embedding_model: get(ENV_PROBE_EMBEDDING_MODEL)
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            chat_model: get(ENV_CHAT_MODEL).unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            temperature: 0.0,
            base_url: get(ENV_BASE_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            prompt_file: get(ENV_PROMPT_FILE).map(PathBuf::from),
            log_level: get("RUST_LOG"),
            verbose: false,
            no_color: get("NO_COLOR").is_some(),
        })
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables.
    pub fn with_overrides(mut self, log_level: Option<String>, verbose: bool, no_color: bool) -> Self {
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            self.log_level = Some("debug".to_string());
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Connection string in the form the Postgres driver accepts.
    ///
    /// `postgresql+psycopg://u:p@host/db` becomes `postgresql://u:p@host/db`.
    pub fn database_url(&self) -> String {
        let url = self.database_url.trim();
        let Some((scheme, rest)) = url.split_once("://") else {
            return url.to_string();
        };

        let scheme = SQLALCHEMY_DRIVERS
            .iter()
            .find_map(|driver| scheme.strip_suffix(driver))
            .unwrap_or(scheme);

        format!("{}://{}", scheme, rest)
    }
}
