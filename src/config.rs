use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use dinnerplan_shared::PlannerSettings;
use serde::Deserialize;
use std::env;

use crate::error::AppError;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub planner: PlannerSettings,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    /// Recipient of the weekly plan
    #[serde(default)]
    pub target_email: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default = "default_include_html")]
    pub include_html: bool,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            target_email: String::new(),
            from_name: default_from_name(),
            include_html: default_include_html(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    "Dinner Planner".to_string()
}

fn default_include_html() -> bool {
    true
}

fn default_max_retries() -> u32 {
    3
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DINNERPLAN__EMAIL__TARGET_EMAIL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Load config file if path provided or CONFIG_PATH env var set
        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Try to load config file (optional - ignore if not found)
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("DINNERPLAN")
                .separator("__")
                .try_parsing(true),
        );

        // Also support the plain variable names used by cron setups
        if let Ok(username) = env::var("GMAIL_USERNAME") {
            builder = builder.set_override("email.smtp_username", username)?;
        }
        if let Ok(password) = env::var("GMAIL_APP_PASSWORD") {
            builder = builder.set_override("email.smtp_password", password)?;
        }
        if let Ok(target) = env::var("TARGET_EMAIL") {
            builder = builder.set_override("email.target_email", target)?;
        }
        if let Ok(avoid) = env::var("ALLERGIES_AVOID") {
            builder = builder.set_override("planner.allergies_avoid", split_list(&avoid))?;
        }
        if let Ok(meal_types) = env::var("MEAL_TYPES") {
            builder = builder.set_override("planner.meal_types", split_list(&meal_types))?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.smtp_port == 0 {
            return Err(AppError::InvalidConfig(
                "SMTP port must be greater than 0".to_string(),
            ));
        }
        if self.email.max_retries < 1 {
            return Err(AppError::InvalidConfig(
                "Email max_retries must be at least 1".to_string(),
            ));
        }
        if self.observability.log_level.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "Log level must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Check the settings needed to actually send mail
    ///
    /// Dry runs skip this so a plan can be previewed without credentials.
    pub fn validate_delivery(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();

        if self.email.smtp_username.is_empty() {
            errors.push("email.smtp_username (GMAIL_USERNAME) is required");
        }
        if self.email.smtp_password.is_empty() {
            errors.push("email.smtp_password (GMAIL_APP_PASSWORD) is required");
        }
        if self.email.target_email.is_empty() {
            errors.push("email.target_email (TARGET_EMAIL) is required");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidConfig(errors.join("; ")))
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
