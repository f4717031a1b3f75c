//! Configuration module for RakshaMitra.
//!
//! Loads configuration from YAML files and environment variables.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub mail: MailConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for any path no API route claims.
    pub static_dir: String,
    /// Largest request body the API extractors accept.
    pub body_limit_bytes: usize,
}

/// Per-client request budget.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests allowed per client within one window.
    pub max_requests: u32,
    /// Window length in seconds.
    pub window_secs: u64,
    /// Body of the rejection response.
    pub message: String,
}

/// Unsafe-pattern rule set for the classifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Ordered rules; the first match decides.
    pub unsafe_patterns: Vec<PatternConfig>,
}

/// A single named unsafe pattern.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatternConfig {
    /// Reason code reported in logs when this rule matches.
    pub name: String,
    /// Regular expression, `regex` crate syntax.
    pub pattern: String,
}

/// Outbound alert mail configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub enabled: bool,
    /// SMTP relay host (implicit TLS).
    pub relay: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `"RakshaMitra Security" <alerts@example.com>`.
    pub sender: String,
    pub subject: String,
    pub timeout_secs: u64,
    /// Alerts buffered before new ones are dropped.
    pub queue_capacity: usize,
    /// Send an alert whenever `/check` finds a suspicious link.
    pub alert_on_suspicious: bool,
    pub alert_recipient: Option<String>,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (RAKSHA__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml (if exists)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(false))
            // Layer on local overrides
            .add_source(File::with_name("config/local").required(false))
            // Layer on environment variables with RAKSHA prefix
            .add_source(
                Environment::with_prefix("RAKSHA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: "public".to_string(),
            body_limit_bytes: 100 * 1024,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 100,
            window_secs: 15 * 60,
            message: "Too many requests, please try again later.".to_string(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        // Word boundaries, digits and case folding are ASCII-only.
        let rules = [
            ("tld-ru", r"\.ru(?-u:\b)"),
            ("tld-xyz", r"\.xyz(?-u:\b)"),
            ("tld-zip", r"\.zip(?-u:\b)"),
            ("tld-mov", r"\.mov(?-u:\b)"),
            ("bait-keyword", r"(?i-u:free|bonus|gift|claim)"),
            ("phishing-digit", r"(?i-u:login|verify|update)[^a-zA-Z]*[0-9]"),
            ("url-shortener", r"(?i-u:tinyurl|bit\.ly|shorturl)"),
        ];

        Self {
            unsafe_patterns: rules
                .into_iter()
                .map(|(name, pattern)| PatternConfig {
                    name: name.to_string(),
                    pattern: pattern.to_string(),
                })
                .collect(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            relay: "smtp.gmail.com".to_string(),
            port: 465,
            username: String::new(),
            password: String::new(),
            sender: "\"RakshaMitra Security\" <alerts@localhost>".to_string(),
            subject: "Suspicious Activity Detected".to_string(),
            timeout_secs: 30,
            queue_capacity: 64,
            alert_on_suspicious: false,
            alert_recipient: None,
        }
    }
}
