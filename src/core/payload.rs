use crate::domain::model::{BookingRequest, ContactRequest, DispatchPayload, PayloadKind};
use chrono::{NaiveDate, NaiveTime};

/// "October 19, 2026"
pub const DATE_FORMAT: &str = "%B %d, %Y";
/// "10:00 AM"
pub const TIME_FORMAT: &str = "%-I:%M %p";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn booking_payload(request: &BookingRequest, to_email: &str) -> DispatchPayload {
    DispatchPayload::new(PayloadKind::Booking)
        .with("to_email", to_email)
        .with("from_name", request.full_name.as_str())
        .with("from_email", request.email.as_str())
        .with("service", request.service.as_str())
        .with("date", format_date(request.slot.date))
        .with("time", format_time(request.slot.time))
        .with("phone", request.phone.as_str())
        .with("message", request.message.clone().unwrap_or_default())
}

pub fn contact_payload(request: &ContactRequest, to_email: &str) -> DispatchPayload {
    DispatchPayload::new(PayloadKind::Contact)
        .with("to_email", to_email)
        .with("from_name", request.name.as_str())
        .with("from_email", request.email.as_str())
        .with("subject", request.subject.as_str())
        .with("message", request.message.as_str())
}
