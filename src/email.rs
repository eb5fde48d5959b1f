mod builder;
mod service;

pub use builder::{build_email_content, email_subject};
pub use service::EmailService;

/// Rendered bodies of the weekly plan email.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailContent {
    pub html: String,
    pub text: String,
}
