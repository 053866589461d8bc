//! Per-field form rules.
//!
//! Every rule is pure and independent: it looks at one raw input and either
//! accepts it (returning the normalized value) or yields the inline error the
//! form shows next to that field.

use crate::core::schedule;
use crate::domain::model::{Field, FieldError, ServiceId};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_CONTACT_MESSAGE_LEN: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9()\-\s]+$").expect("phone pattern compiles"));

type Rule<T> = Result<T, FieldError>;

fn required(field: Field, value: &str, message: &str) -> Rule<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FieldError::new(field, message))
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn service(value: Option<ServiceId>) -> Rule<ServiceId> {
    value.ok_or_else(|| FieldError::new(Field::Service, "Please select a service"))
}

pub fn date(value: Option<NaiveDate>, today: NaiveDate) -> Rule<NaiveDate> {
    let date = value.ok_or_else(|| FieldError::new(Field::Date, "Please select a date"))?;
    if !schedule::is_weekday(date) {
        return Err(FieldError::new(
            Field::Date,
            "Bookings are available Monday to Friday only",
        ));
    }
    if date <= today {
        return Err(FieldError::new(Field::Date, "Please choose a date after today"));
    }
    Ok(date)
}

pub fn time(value: Option<NaiveTime>) -> Rule<NaiveTime> {
    let time = value.ok_or_else(|| FieldError::new(Field::Time, "Please select a time"))?;
    if !schedule::within_working_hours(time) {
        return Err(FieldError::new(
            Field::Time,
            "Please choose a time between 9:00 AM and 5:00 PM",
        ));
    }
    Ok(time)
}

pub fn full_name(value: &str) -> Rule<String> {
    required(Field::FullName, value, "Name is required")
}

pub fn email(value: &str) -> Rule<String> {
    let email = required(Field::Email, value, "Email is required")?;
    if !EMAIL_PATTERN.is_match(&email) {
        return Err(FieldError::new(Field::Email, "Invalid email address"));
    }
    Ok(email)
}

pub fn phone(value: &str) -> Rule<String> {
    let phone = required(Field::Phone, value, "Phone number is required")?;
    if !PHONE_PATTERN.is_match(&phone) {
        return Err(FieldError::new(Field::Phone, "Invalid phone number"));
    }
    Ok(phone)
}

pub fn subject(value: &str) -> Rule<String> {
    required(Field::Subject, value, "Subject is required")
}

pub fn contact_message(value: &str) -> Rule<String> {
    let message = required(Field::Message, value, "Message is required")?;
    if message.chars().count() < MIN_CONTACT_MESSAGE_LEN {
        return Err(FieldError::new(
            Field::Message,
            format!(
                "Message must be at least {} characters",
                MIN_CONTACT_MESSAGE_LEN
            ),
        ));
    }
    Ok(message)
}

/// Booking notes are optional; blank input means no message.
pub fn optional_message(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
