use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Bookable services offered on the booking page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceId {
    ContentCreation,
    VideoProduction,
    Consultation,
    Collaboration,
}

impl ServiceId {
    pub const ALL: [ServiceId; 4] = [
        ServiceId::ContentCreation,
        ServiceId::VideoProduction,
        ServiceId::Consultation,
        ServiceId::Collaboration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::ContentCreation => "content-creation",
            ServiceId::VideoProduction => "video-production",
            ServiceId::Consultation => "consultation",
            ServiceId::Collaboration => "collaboration",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceId::ContentCreation => "Content Creation",
            ServiceId::VideoProduction => "Video Production",
            ServiceId::Consultation => "Consultation",
            ServiceId::Collaboration => "Brand Collaboration",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ServiceId::ContentCreation => "Custom content creation for your brand",
            ServiceId::VideoProduction => "Professional video shooting and editing",
            ServiceId::Consultation => "Strategic advice for your social media presence",
            ServiceId::Collaboration => "Partnership opportunities for brands",
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownService(pub String);

impl fmt::Display for UnknownService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown service '{}'", self.0)
    }
}

impl std::error::Error for UnknownService {}

impl FromStr for ServiceId {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceId::ALL
            .into_iter()
            .find(|service| service.as_str() == s.trim())
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    YouTube,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::YouTube => "youtube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "youtube" => Ok(Platform::YouTube),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub category: String,
    pub platform: Platform,
    pub link: String,
    #[serde(default)]
    pub featured: bool,
    pub date: String,
}

/// A chosen date and a time of day within working hours (minutes kept as entered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// A booking that passed every rule; only the wizard constructs these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub service: ServiceId,
    pub slot: Slot,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    Booking,
    Contact,
}

/// Flat key/value message handed to a notification dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPayload {
    pub kind: PayloadKind,
    pub params: BTreeMap<String, String>,
}

impl DispatchPayload {
    pub fn new(kind: PayloadKind) -> Self {
        Self {
            kind,
            params: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Service,
    Date,
    Time,
    FullName,
    Email,
    Phone,
    Subject,
    Message,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Service => "Service",
            Field::Date => "Date",
            Field::Time => "Time",
            Field::FullName => "Full Name",
            Field::Email => "Email Address",
            Field::Phone => "Phone Number",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }
}

/// Inline error shown next to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}
