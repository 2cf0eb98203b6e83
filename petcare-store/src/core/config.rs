use std::path::PathBuf;

use crate::lifecycle::TransitionPolicy;
use crate::utils::logger::init_logger_with_file;

/// Store configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./petcare-data | Directory for the database and logs |
/// | PETCARE_DB_FILE | petcare.redb | Database file name inside WORK_DIR |
/// | LOG_LEVEL | info | Max tracing level |
/// | LOG_DIR | (unset) | Daily rolling log directory |
/// | LOG_JSON | false | JSON log lines |
/// | ENVIRONMENT | development | development / production |
/// | PETCARE_SEED_DEMO | true | Seed demo data when storage is empty |
/// | PETCARE_STRICT_TRANSITIONS | false | Enforce the reservation lifecycle graph |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/tmp/petcare PETCARE_STRICT_TRANSITIONS=true cargo run --bin petcare
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Holds the database file (and logs unless LOG_DIR is set)
    pub work_dir: String,
    pub db_file: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    /// development | production
    pub environment: String,
    pub seed_demo: bool,
    pub strict_transitions: bool,
}

impl Config {
    /// Load configuration from environment variables, using defaults for
    /// anything unset or unparseable
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./petcare-data".into()),
            db_file: std::env::var("PETCARE_DB_FILE").unwrap_or_else(|_| "petcare.redb".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            seed_demo: std::env::var("PETCARE_SEED_DEMO")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            strict_transitions: std::env::var("PETCARE_STRICT_TRANSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Environment config with a different work dir (tests)
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// Full path of the redb file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.db_file)
    }

    pub fn transition_policy(&self) -> TransitionPolicy {
        TransitionPolicy::from_strict(self.strict_transitions)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Load `.env`, create the work dir and start logging
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
    Ok(())
}
