use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read plan from {path}: {source}")]
    PlanSourceError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Plan error: {0}")]
    PlanError(#[from] dinnerplan_mealplan::PlanError),

    #[error("Failed to render email: {0}")]
    RenderError(String),

    #[error("Invalid email address: {0}")]
    AddressError(#[from] lettre::address::AddressError),

    #[error("Failed to build email message: {0}")]
    MessageError(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    SmtpError(#[from] lettre::transport::smtp::Error),

    #[error("SMTP server rejected the message, check the username and app password: {0}")]
    EmailRejected(String),

    #[error("Failed to send email after {attempts} attempts: {message}")]
    EmailDeliveryError { attempts: u32, message: String },
}

// Manual From implementations for errors that don't have automatic derives
impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::RenderError(err.to_string())
    }
}

impl From<time::error::Format> for AppError {
    fn from(err: time::error::Format) -> Self {
        AppError::RenderError(err.to_string())
    }
}
