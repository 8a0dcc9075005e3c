/**
 * Email Dispatch
 *
 * Sends verification links through an async SMTP transport. The
 * transport is optional: when SMTP is not configured, or the relay
 * builder fails, the mailer logs instead of sending and the server
 * keeps running without it. When a transport exists, send failures
 * propagate to the caller.
 */

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::ApiError;
use crate::server::config::Config;

/// Build the link embedded in a verification email.
pub fn verification_link(base_url: &str, token: &str) -> String {
    format!("{}/api/users/verify/{token}", base_url.trim_end_matches('/'))
}

/// Outgoing mail handle, cloneable into the app state
#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<String>,
    base_url: String,
}

impl Mailer {
    pub fn new(config: &Config) -> Self {
        let (transport, from) = match &config.smtp {
            Some(smtp) => match AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host) {
                Ok(builder) => {
                    let transport = builder
                        .credentials(Credentials::new(
                            smtp.username.clone(),
                            smtp.password.clone(),
                        ))
                        .build();
                    tracing::info!(host = %smtp.host, "SMTP transport configured");
                    (Some(transport), Some(smtp.from.clone()))
                }
                Err(e) => {
                    tracing::error!("failed to build SMTP transport: {e}");
                    (None, None)
                }
            },
            None => (None, None),
        };

        Self {
            transport,
            from,
            base_url: config.base_url.clone(),
        }
    }

    /// Send the verification mail for `token` to `to`.
    ///
    /// A disabled transport logs the link and reports success, so local
    /// development works without a mail server.
    pub async fn send_verification(&self, to: &str, token: &str) -> Result<(), ApiError> {
        let link = verification_link(&self.base_url, token);

        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            tracing::warn!(%to, %link, "mail transport disabled; skipping verification email");
            return Ok(());
        };

        let from: Mailbox = from
            .parse()
            .map_err(|e| ApiError::internal(format!("invalid sender address: {e}")))?;
        let to: Mailbox = to
            .parse()
            .map_err(|e| ApiError::internal(format!("invalid recipient address: {e}")))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject("Verify your email")
            .header(ContentType::TEXT_HTML)
            .body(format!(
                "<p>Welcome to Contactbook!</p>\
                 <p><a href=\"{link}\">Click here to verify your email address</a></p>"
            ))
            .map_err(|e| ApiError::internal(format!("failed to build email: {e}")))?;

        transport
            .send(message)
            .await
            .map_err(|e| ApiError::internal(format!("failed to send email: {e}")))?;

        tracing::info!("verification email sent");
        Ok(())
    }
}
