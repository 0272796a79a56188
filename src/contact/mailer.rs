//! Mail relay for contact form submissions
//!
//! Submissions are forwarded as an HTML email through the Resend API.
//! The `Mailer` trait keeps handlers testable without real deliveries.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::json;
use thiserror::Error;

use super::ContactForm;

/// Resend send-email endpoint
pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Verified sender address for the contact form
const FROM_ADDRESS: &str = "AML Contact Form <onboarding@resend.dev>";

/// Mail relay errors
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Email provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Sends a validated contact form submission somewhere useful
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, form: &ContactForm) -> Result<(), MailerError>;
}

/// `Mailer` backed by the Resend HTTP API
pub struct ResendMailer {
    /// HTTP client
    http: reqwest::Client,
    /// Send endpoint, overridable for tests
    endpoint: String,
    /// Resend API key
    api_key: String,
    /// Inbox that receives submissions
    to_email: String,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, to_email: impl Into<String>) -> Self {
        Self::with_endpoint(RESEND_ENDPOINT, api_key, to_email)
    }

    /// Mailer against a non-default endpoint (used by tests)
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        to_email: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            to_email: to_email.into(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, form: &ContactForm) -> Result<(), MailerError> {
        let payload = json!({
            "from": FROM_ADDRESS,
            "to": self.to_email,
            "reply_to": form.email,
            "subject": format!("New Contact Form Submission from {}", form.name),
            "html": build_email_html(form),
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailerError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

/// Renders the notification email body
///
/// Replying to the email replies to the submitter, so the body only needs
/// the submitted fields. All user input is escaped.
fn build_email_html(form: &ContactForm) -> String {
    let company_row = form
        .company
        .as_deref()
        .filter(|company| !company.trim().is_empty())
        .map(|company| {
            format!(
                "<p style=\"margin: 10px 0;\"><strong>Company:</strong> {}</p>\n",
                escape_html(company)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #10b981;">New Contact Form Submission</h2>
  <div style="background-color: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <p style="margin: 10px 0;"><strong>Name:</strong> {name}</p>
    <p style="margin: 10px 0;"><strong>Email:</strong> {email}</p>
    {company_row}</div>
  <div style="margin: 20px 0;">
    <h3 style="color: #374151;">Message:</h3>
    <p style="white-space: pre-wrap; line-height: 1.6;">{message}</p>
  </div>
  <hr style="border: none; border-top: 1px solid #e5e7eb; margin: 30px 0;" />
  <p style="color: #6b7280; font-size: 14px;">
    This message was sent from the AML contact form.
    <br />
    Reply directly to this email to respond to {name}.
  </p>
</div>"#,
        name = escape_html(&form.name),
        email = escape_html(&form.email),
        company_row = company_row,
        message = escape_html(&form.message),
    )
}

/// Minimal HTML escaping for user-supplied strings embedded in the email
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ===== Mailer Tests =====
