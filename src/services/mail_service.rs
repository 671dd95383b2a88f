use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Outcome reported by a mail sender. Failures stay in-band so callers
/// decide how to surface them.
#[derive(Debug, Clone, Serialize)]
pub struct SendMailResult {
    pub success: bool,
    pub message: String,
}

impl SendMailResult {
    pub fn ok() -> Self {
        SendMailResult {
            success: true,
            message: "Email sent successfully".to_string(),
        }
    }

    pub fn failed(message: String) -> Self {
        SendMailResult {
            success: false,
            message,
        }
    }
}

/// Delivery seam for the password recovery mail.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send_forgot_pass_email(&self, to: &str, username: &str, code: &str)
        -> SendMailResult;
}

/// Mail sender backed by the Resend HTTP API.
#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from,
        }
    }

    pub fn from_env() -> Self {
        let api_key = std::env::var("RESEND_API_KEY").unwrap_or_default();
        let from = std::env::var("MAIL_FROM")
            .unwrap_or_else(|_| "Placement Cell <noreply@placement.local>".to_string());
        Self::new(api_key, from)
    }
}

#[async_trait]
impl MailSender for ResendMailer {
    async fn send_forgot_pass_email(
        &self,
        to: &str,
        username: &str,
        code: &str,
    ) -> SendMailResult {
        let body = serde_json::json!({
            "from": self.from,
            "to": [to],
            "subject": "Your password recovery code",
            "html": build_forgot_pass_html(username, code),
        });

        let response = self
            .client
            .post("https://api.resend.com/emails")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                log::info!("📧 Recovery code email sent to {}", to);
                SendMailResult::ok()
            }
            Ok(resp) => {
                let status = resp.status();
                let error_text = resp
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                log::error!("❌ Mail API rejected send ({}): {}", status, error_text);
                SendMailResult::failed(format!("Email delivery failed: {}", error_text))
            }
            Err(e) => {
                log::error!("❌ Mail API unreachable: {}", e);
                SendMailResult::failed(format!("Failed to send email: {}", e))
            }
        }
    }
}

fn build_forgot_pass_html(username: &str, code: &str) -> String {
    format!(
        "<p>Hi {},</p>\
         <p>Your password recovery code is <strong>{}</strong>.</p>\
         <p>It is valid for 5 minutes. If you did not request it, you can ignore this email.</p>",
        username, code
    )
}
