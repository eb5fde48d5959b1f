//! Weekly plan delivery over SMTP using lettre

use std::time::Duration;

use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{info, warn};

use super::EmailContent;
use crate::config::EmailConfig;
use crate::error::AppError;

const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Email service for sending the weekly plan
#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: Mailbox,
    include_html: bool,
    max_retries: u32,
    skip_sending: bool,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> Result<Self, AppError> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "Email service initialized with authentication and STARTTLS"
            );
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            SmtpTransport::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer,
            from: from_mailbox(config)?,
            include_html: config.include_html,
            max_retries: config.max_retries.max(1),
            skip_sending: false,
        })
    }

    /// Create a mock email service for testing (skips actual SMTP)
    pub fn new_mock(config: &EmailConfig) -> Result<Self, AppError> {
        let mailer = SmtpTransport::builder_dangerous("localhost")
            .port(1025)
            .build();

        info!("Mock email service initialized (SMTP calls skipped)");

        Ok(Self {
            mailer,
            from: from_mailbox(config)?,
            include_html: config.include_html,
            max_retries: config.max_retries.max(1),
            skip_sending: true,
        })
    }

    /// Build the multipart message; the HTML part is attached only when enabled
    pub fn build_message(
        &self,
        to_email: &str,
        subject: &str,
        content: &EmailContent,
    ) -> Result<Message, AppError> {
        let plain = SinglePart::builder()
            .header(ContentType::TEXT_PLAIN)
            .body(content.text.clone());

        let mut body = MultiPart::alternative().singlepart(plain);
        if self.include_html {
            body = body.singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(content.html.clone()),
            );
        }

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_email.parse()?)
            .subject(subject)
            .multipart(body)?;

        Ok(message)
    }

    /// Send the weekly plan, retrying transient failures
    ///
    /// Permanent SMTP rejections (bad credentials, refused recipient) fail
    /// immediately.
    pub async fn send_weekly_plan(
        &self,
        to_email: &str,
        subject: &str,
        content: &EmailContent,
    ) -> Result<(), AppError> {
        let message = self.build_message(to_email, subject, content)?;

        if self.skip_sending {
            info!(to = to_email, "Mock email service: Skipping actual SMTP send (test mode)");
            return Ok(());
        }

        let mut attempt = 1;
        loop {
            match self.mailer.send(&message) {
                Ok(_) => {
                    info!(to = to_email, attempt, "Weekly plan email sent successfully");
                    return Ok(());
                }
                Err(e) if e.is_permanent() => {
                    return Err(AppError::EmailRejected(e.to_string()));
                }
                Err(e) if attempt < self.max_retries => {
                    warn!(
                        error = %e,
                        attempt,
                        max_retries = self.max_retries,
                        "SMTP error, retrying"
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(AppError::EmailDeliveryError {
                        attempts: attempt,
                        message: e.to_string(),
                    });
                }
            }
        }
    }
}

fn from_mailbox(config: &EmailConfig) -> Result<Mailbox, AppError> {
    let address = if config.smtp_username.is_empty() {
        "dinnerplan@localhost"
    } else {
        config.smtp_username.as_str()
    };

    Ok(Mailbox::new(Some(config.from_name.clone()), address.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config(include_html: bool) -> EmailConfig {
        EmailConfig {
            smtp_username: "planner@example.com".to_string(),
            smtp_password: "app-password".to_string(),
            target_email: "family@example.com".to_string(),
            include_html,
            ..EmailConfig::default()
        }
    }

    fn content() -> EmailContent {
        EmailContent {
            html: "<h1>Plan</h1>".to_string(),
            text: "Plan".to_string(),
        }
    }

    #[test]
    fn test_message_with_html_part() {
        let service = EmailService::new_mock(&config(true)).unwrap();

        let message = service
            .build_message("family@example.com", "Weekly Dinner Plan", &content())
            .unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("Subject: Weekly Dinner Plan"));
        assert!(formatted.contains("To: family@example.com"));
        assert!(formatted.contains("planner@example.com"));
        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("text/plain"));
        assert!(formatted.contains("text/html"));
    }

    #[test]
    fn test_message_without_html_part() {
        let service = EmailService::new_mock(&config(false)).unwrap();

        let message = service
            .build_message("family@example.com", "Weekly Dinner Plan", &content())
            .unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("text/plain"));
        assert!(!formatted.contains("text/html"));
    }

    #[test]
    fn test_invalid_recipient() {
        let service = EmailService::new_mock(&config(true)).unwrap();

        let result = service.build_message("not-an-address", "Subject", &content());

        assert!(matches!(result, Err(AppError::AddressError(_))));
    }

    #[tokio::test]
    async fn test_mock_send_skips_smtp() {
        let service = EmailService::new_mock(&config(true)).unwrap();

        let result = service
            .send_weekly_plan("family@example.com", "Weekly Dinner Plan", &content())
            .await;

        assert!(result.is_ok());
    }

    /// Unauthenticated config (no password) pointing at a local port
    fn local_config(port: u16, max_retries: u32) -> EmailConfig {
        EmailConfig {
            smtp_host: "127.0.0.1".to_string(),
            smtp_port: port,
            smtp_username: "planner@example.com".to_string(),
            smtp_password: String::new(),
            max_retries,
            ..EmailConfig::default()
        }
    }

    /// SMTP server that greets, accepts EHLO and rejects everything else with 550
    fn rejecting_smtp_server(connections: Arc<AtomicUsize>) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                connections.fetch_add(1, Ordering::SeqCst);

                let mut reader = BufReader::new(stream.try_clone().unwrap());
                if stream.write_all(b"220 localhost ESMTP\r\n").is_err() {
                    continue;
                }

                let mut line = String::new();
                while reader.read_line(&mut line).unwrap_or(0) > 0 {
                    let reply: &[u8] = if line.starts_with("EHLO") || line.starts_with("HELO") {
                        b"250 localhost\r\n"
                    } else if line.starts_with("QUIT") {
                        b"221 bye\r\n"
                    } else {
                        b"550 5.7.1 mailbox unavailable\r\n"
                    };
                    if stream.write_all(reply).is_err() {
                        break;
                    }
                    line.clear();
                }
            }
        });

        port
    }

    #[tokio::test]
    async fn test_send_gives_up_after_max_retries() {
        // Bind then drop to get a port nothing listens on
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let service = EmailService::new(&local_config(port, 2)).unwrap();

        let result = service
            .send_weekly_plan("family@example.com", "Weekly Dinner Plan", &content())
            .await;

        assert!(
            matches!(result, Err(AppError::EmailDeliveryError { attempts: 2, .. })),
            "unexpected result: {result:?}"
        );
    }

    #[tokio::test]
    async fn test_permanent_rejection_is_not_retried() {
        let connections = Arc::new(AtomicUsize::new(0));
        let port = rejecting_smtp_server(connections.clone());
        let service = EmailService::new(&local_config(port, 3)).unwrap();

        let result = service
            .send_weekly_plan("family@example.com", "Weekly Dinner Plan", &content())
            .await;

        assert!(
            matches!(result, Err(AppError::EmailRejected(_))),
            "unexpected result: {result:?}"
        );
        assert_eq!(connections.load(Ordering::SeqCst), 1);
    }
}
