use crate::core::payload::{format_date, format_time};
use crate::domain::model::BookingRequest;

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const SECTION: &str = "background: #f9f9f9; padding: 20px; border-radius: 8px;";

/// HTML body of the notification sent to the site owner for a booking.
pub fn render_booking_email(request: &BookingRequest) -> String {
    let message = request
        .message
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "No additional information provided".to_string());

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h1 style="color: #333; margin-bottom: 20px;">New Booking Request</h1>
  <div style="{section}">
    <h2 style="color: #444; margin-bottom: 15px;">Service Details</h2>
    <p><strong>Service:</strong> {service}</p>
    <p><strong>Date:</strong> {date}</p>
    <p><strong>Time:</strong> {time}</p>
  </div>
  <div style="{section} margin-top: 20px;">
    <h2 style="color: #444; margin-bottom: 15px;">Client Information</h2>
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Phone:</strong> {phone}</p>
  </div>
  <div style="{section} margin-top: 20px;">
    <h2 style="color: #444; margin-bottom: 15px;">Additional Information</h2>
    <p>{message}</p>
  </div>
  <div style="text-align: center; margin-top: 30px;">
    <p style="color: #666;">This is an automated email. Please do not reply.</p>
  </div>
</div>
"#,
        section = SECTION,
        service = request.service.display_name(),
        date = format_date(request.slot.date),
        time = format_time(request.slot.time),
        name = escape_html(&request.full_name),
        email = escape_html(&request.email),
        phone = escape_html(&request.phone),
        message = message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ServiceId, Slot};
    use chrono::{NaiveDate, NaiveTime};

    fn request(message: Option<&str>) -> BookingRequest {
        BookingRequest {
            service: ServiceId::Consultation,
            slot: Slot {
                date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
                time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            },
            full_name: "Ana <b>Lee</b>".to_string(),
            email: "ana@example.com".to_string(),
            phone: "+1 (555) 010-2030".to_string(),
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_render_includes_details() {
        let html = render_booking_email(&request(Some("Need a reel")));
        assert!(html.contains("<strong>Service:</strong> Consultation"));
        assert!(html.contains("October 20, 2026"));
        assert!(html.contains("2:00 PM"));
        assert!(html.contains("Need a reel"));
    }

    #[test]
    fn test_render_escapes_user_text() {
        let html = render_booking_email(&request(None));
        assert!(html.contains("Ana &lt;b&gt;Lee&lt;/b&gt;"));
        assert!(!html.contains("<b>Lee</b>"));
        assert!(html.contains("No additional information provided"));
    }
}
