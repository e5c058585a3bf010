//! Contact form submission to the configured form endpoint.

use catalog::{FetchRequest, Fetcher};
use tracing::{info, warn};

/// Fields the visitor fills in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("message".to_string(), self.message.clone()),
        ]
    }
}

/// What the page shows after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Endpoint accepted the message
    Sent,
    /// Anything else; the visitor is asked to retry or email directly
    Failed { reason: String },
}

impl ContactOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Post the form once, form-encoded, asking for a JSON reply.
///
/// Transport errors and non-2xx statuses both count as failure.
pub async fn submit_contact(
    fetcher: &dyn Fetcher,
    endpoint: &str,
    form: &ContactForm,
) -> ContactOutcome {
    if endpoint.trim().is_empty() {
        warn!("No contact endpoint configured");
        return ContactOutcome::Failed {
            reason: "no contact endpoint configured".into(),
        };
    }

    let request = FetchRequest::post_form(endpoint, form.fields())
        .header("Accept", "application/json");

    match fetcher.fetch(&request).await {
        Ok(response) if response.is_success() => {
            info!(endpoint, "Contact message sent");
            ContactOutcome::Sent
        }
        Ok(response) => {
            warn!(endpoint, status = response.status, "Contact endpoint rejected message");
            ContactOutcome::Failed {
                reason: format!("endpoint answered {}", response.status),
            }
        }
        Err(e) => {
            warn!(endpoint, error = %e, "Contact submission failed");
            ContactOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
