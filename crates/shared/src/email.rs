//! Email service for sending transactional emails.
//!
//! Uses `lettre` for SMTP transport. Delivery failures are the caller's
//! problem only to the extent of logging them: no operation in Bolso is
//! allowed to fail because an email did not go out.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::config::EmailConfig;
use crate::types::Money;

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new email service.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Creates an SMTP transport.
    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
            .map_err(|e| EmailError::SendError(e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(creds)
            .build();

        Ok(transport)
    }

    /// Sends a welcome email to a newly registered user.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_welcome_email(&self, to_email: &str, to_name: &str) -> Result<(), EmailError> {
        let subject = "Bem-vindo ao Bolso";
        let body = format!(
            r"Olá {to_name},

Sua conta no Bolso foi criada. Registre suas receitas e despesas e
organize seu orçamento em envelopes.

Abraços,
Equipe Bolso"
        );

        self.send_email(to_email, subject, &body).await
    }

    /// Sends a notification that a transaction was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_transaction_recorded(
        &self,
        to_email: &str,
        to_name: &str,
        description: &str,
        amount: Money,
    ) -> Result<(), EmailError> {
        let subject = "Movimentação registrada - Bolso";
        let formatted = amount.format_brl();
        let body = format!(
            r"Olá {to_name},

A movimentação abaixo foi registrada na sua conta:

    {description} - {formatted}

Se você não reconhece esta movimentação, acesse sua conta e revise
seu extrato.

Abraços,
Equipe Bolso"
        );

        self.send_email(to_email, subject, &body).await
    }

    /// Sends a generic plain-text email.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), EmailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::BuildError(e.to_string()))?;

        let transport = self.create_transport()?;
        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_config_default() {
        let config = EmailConfig::default();
        assert_eq!(config.smtp_host, "localhost");
        assert_eq!(config.smtp_port, 1025);
    }

    #[tokio::test]
    async fn test_invalid_recipient_address() {
        let service = EmailService::new(EmailConfig::default());
        let result = service
            .send_email("not an address", "subject", "body")
            .await;
        assert!(matches!(result, Err(EmailError::InvalidAddress(_))));
    }
}
