use crate::core::form::{FormSettings, DEFAULT_RESET_DELAY};
use crate::core::rules;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com";
pub const INSTAGRAM_BASE_URL: &str = "https://graph.instagram.com";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub owner_email: String,
    pub reset_delay_seconds: Option<u64>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            owner_email: "suparnakhanna05@gmail.com".to_string(),
            reset_delay_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatcherKind {
    EmailJs,
    #[default]
    Log,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatcherConfig {
    #[serde(default)]
    pub kind: DispatcherKind,
    pub endpoint: Option<String>,
    pub service_id: Option<String>,
    pub booking_template_id: Option<String>,
    pub contact_template_id: Option<String>,
    pub public_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl DispatcherConfig {
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(EMAILJS_ENDPOINT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(30))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedsConfig {
    #[serde(default)]
    pub enabled: bool,
    pub timeout_seconds: Option<u64>,
    pub youtube: Option<YouTubeConfig>,
    pub instagram: Option<InstagramConfig>,
}

impl FeedsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(15))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    pub base_url: Option<String>,
    pub channel_id: String,
    pub api_key: String,
    pub max_results: Option<u32>,
}

impl YouTubeConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(YOUTUBE_BASE_URL)
    }

    pub fn max_results(&self) -> u32 {
        self.max_results.unwrap_or(9)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstagramConfig {
    pub base_url: Option<String>,
    pub access_token: String,
}

impl InstagramConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(INSTAGRAM_BASE_URL)
    }
}

impl SiteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn reset_delay(&self) -> Duration {
        self.site
            .reset_delay_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RESET_DELAY)
    }

    pub fn form_settings(&self) -> FormSettings {
        FormSettings::new(self.site.owner_email.clone()).with_reset_delay(self.reset_delay())
    }

    pub fn validate_config(&self) -> Result<()> {
        if rules::email(&self.site.owner_email).is_err() {
            return Err(SiteError::InvalidConfigValueError {
                field: "site.owner_email".to_string(),
                value: self.site.owner_email.clone(),
                reason: "Not a valid email address".to_string(),
            });
        }
        if let Some(seconds) = self.site.reset_delay_seconds {
            validation::validate_range("site.reset_delay_seconds", seconds, 0, 3600)?;
        }

        if self.dispatcher.kind == DispatcherKind::EmailJs {
            let d = &self.dispatcher;
            validation::validate_url("dispatcher.endpoint", d.endpoint())?;
            for (field, value) in [
                ("dispatcher.service_id", &d.service_id),
                ("dispatcher.booking_template_id", &d.booking_template_id),
                ("dispatcher.contact_template_id", &d.contact_template_id),
                ("dispatcher.public_key", &d.public_key),
            ] {
                let value = validation::validate_required_field(field, value)?;
                validation::validate_non_empty_string(field, value)?;
            }
        }

        if self.feeds.enabled {
            if let Some(seconds) = self.feeds.timeout_seconds {
                validation::validate_range("feeds.timeout_seconds", seconds, 1, 300)?;
            }
            if self.feeds.youtube.is_none() && self.feeds.instagram.is_none() {
                return Err(SiteError::ConfigValidationError {
                    field: "feeds".to_string(),
                    message: "Feeds are enabled but neither youtube nor instagram is configured"
                        .to_string(),
                });
            }
            if let Some(yt) = &self.feeds.youtube {
                validation::validate_url("feeds.youtube.base_url", yt.base_url())?;
                validation::validate_non_empty_string("feeds.youtube.channel_id", &yt.channel_id)?;
                validation::validate_non_empty_string("feeds.youtube.api_key", &yt.api_key)?;
                validation::validate_range("feeds.youtube.max_results", yt.max_results(), 1, 50)?;
            }
            if let Some(ig) = &self.feeds.instagram {
                validation::validate_url("feeds.instagram.base_url", ig.base_url())?;
                validation::validate_non_empty_string(
                    "feeds.instagram.access_token",
                    &ig.access_token,
                )?;
            }
        }

        Ok(())
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
