use crate::config::toml_config::DispatcherConfig;
use crate::domain::model::{DispatchPayload, PayloadKind};
use crate::domain::ports::NotificationDispatcher;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a BTreeMap<String, String>,
}

/// Sends notifications through the EmailJS REST API.
pub struct EmailJsDispatcher {
    client: Client,
    endpoint: String,
    service_id: String,
    booking_template_id: String,
    contact_template_id: String,
    public_key: String,
}

impl EmailJsDispatcher {
    pub fn from_config(config: &DispatcherConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint().to_string(),
            service_id: validate_required_field("dispatcher.service_id", &config.service_id)?
                .clone(),
            booking_template_id: validate_required_field(
                "dispatcher.booking_template_id",
                &config.booking_template_id,
            )?
            .clone(),
            contact_template_id: validate_required_field(
                "dispatcher.contact_template_id",
                &config.contact_template_id,
            )?
            .clone(),
            public_key: validate_required_field("dispatcher.public_key", &config.public_key)?
                .clone(),
        })
    }

    fn template_for(&self, kind: PayloadKind) -> &str {
        match kind {
            PayloadKind::Booking => &self.booking_template_id,
            PayloadKind::Contact => &self.contact_template_id,
        }
    }
}

#[async_trait]
impl NotificationDispatcher for EmailJsDispatcher {
    async fn send(&self, payload: &DispatchPayload) -> Result<()> {
        let body = SendRequest {
            service_id: &self.service_id,
            template_id: self.template_for(payload.kind),
            user_id: &self.public_key,
            template_params: &payload.params,
        };

        tracing::debug!("Posting {:?} notification to {}", payload.kind, self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| SiteError::dispatch(format!("request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("EmailJS response status: {}", status);

        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(SiteError::dispatch(format!("EmailJS returned {}: {}", status, text.trim())))
        }
    }
}
