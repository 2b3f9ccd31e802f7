use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use rust_decimal::Decimal;
use shared::ReportPolicy;
use shared::models::normalize_roles;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// Server configuration
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 8080 | listen port |
/// | DATABASE_PATH | coffeebloom.db | SQLite file, `:memory:` allowed |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | generated (development only) | at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | RESET_LINK_BASE_URL | http://localhost:5173/reset-password | reset link base |
/// | RESET_LINK_TTL_MINUTES | 60 | reset token lifetime |
/// | REGISTRATION_KEYS | empty | `key=role+role;key2=role` |
/// | MISMATCH_TOLERANCE | 0.01 | payment reconciliation tolerance |
/// | RANKING_LIMIT | 5 | top-N cutoff for rankings |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | unset | daily rolling log files when set |
/// | CORS_ALLOW_ORIGIN | * | CORS origin |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub database_path: String,
    /// development | staging | production
    pub environment: String,
    pub jwt: JwtConfig,
    pub reset_link_base_url: String,
    pub reset_link_ttl_minutes: i64,
    /// Registration key -> roles granted to the new profile
    pub registration_keys: HashMap<String, BTreeSet<String>>,
    pub report_policy: ReportPolicy,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub cors_allow_origin: String,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the defaults above. Outside development a
    /// missing or short `JWT_SECRET` is an error.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = std::env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let jwt = JwtConfig::from_env(&environment).map_err(|e| ServerError::Config(e.to_string()))?;

        let mismatch_tolerance = match std::env::var("MISMATCH_TOLERANCE") {
            Ok(raw) => Decimal::from_str(raw.trim()).map_err(|e| {
                ServerError::Config(format!("MISMATCH_TOLERANCE is not a decimal: {e}"))
            })?,
            Err(_) => defaults.report_policy.mismatch_tolerance,
        };

        let registration_keys = std::env::var("REGISTRATION_KEYS")
            .map(|raw| parse_registration_keys(&raw))
            .unwrap_or_default();

        Ok(Self {
            http_port: env_or("HTTP_PORT", defaults.http_port),
            database_path: std::env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            environment,
            jwt,
            reset_link_base_url: std::env::var("RESET_LINK_BASE_URL")
                .unwrap_or(defaults.reset_link_base_url),
            reset_link_ttl_minutes: env_or("RESET_LINK_TTL_MINUTES", defaults.reset_link_ttl_minutes),
            registration_keys,
            report_policy: ReportPolicy {
                mismatch_tolerance,
                ranking_limit: env_or("RANKING_LIMIT", defaults.report_policy.ranking_limit),
            },
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            cors_allow_origin: std::env::var("CORS_ALLOW_ORIGIN")
                .unwrap_or(defaults.cors_allow_origin),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Roles granted by a registration key, if the key is known
    pub fn roles_for_key(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.registration_keys.get(key.trim())
    }
}

/// Development defaults. Nothing is read from the environment.
impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 8080,
            database_path: "coffeebloom.db".into(),
            environment: "development".into(),
            jwt: JwtConfig::default(),
            reset_link_base_url: "http://localhost:5173/reset-password".into(),
            reset_link_ttl_minutes: 60,
            registration_keys: HashMap::new(),
            report_policy: ReportPolicy::default(),
            log_level: "info".into(),
            log_dir: None,
            cors_allow_origin: "*".into(),
        }
    }
}

/// Parse `key=role+role;key2=role`. Entries without a key or roles are skipped.
pub fn parse_registration_keys(raw: &str) -> HashMap<String, BTreeSet<String>> {
    raw.split(';')
        .filter_map(|entry| {
            let (key, roles) = entry.split_once('=')?;
            let key = key.trim();
            let roles = normalize_roles(None, Some(roles));
            (!key.is_empty() && !roles.is_empty()).then(|| (key.to_string(), roles))
        })
        .collect()
}
