use crate::core::portfolio::{CategoryFilter, PlatformFilter};
use crate::domain::model::ServiceId;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "creator-site")]
#[command(about = "Booking, contact and portfolio tools for the creator website")]
pub struct CliConfig {
    /// Path to the site TOML file; defaults are used when omitted
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Walk the booking wizard and submit a request
    Book(BookArgs),
    /// Send a contact message
    Contact(ContactArgs),
    /// List portfolio items
    Portfolio(PortfolioArgs),
    /// Show bookable hourly slots for a date
    Slots(SlotsArgs),
    /// List the services that can be booked
    Services,
}

#[derive(Debug, Clone, Args)]
pub struct BookArgs {
    /// content-creation, video-production, consultation or collaboration
    #[arg(long)]
    pub service: ServiceId,

    /// Weekday after today, YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,

    /// Time of day, e.g. 10:00 or 2:00 PM
    #[arg(long, value_parser = parse_time)]
    pub time: NaiveTime,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub message: String,

    /// Log the notification instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the HTML notification body after a successful submission
    #[arg(long)]
    pub preview: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub subject: String,

    #[arg(long)]
    pub message: String,

    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PortfolioArgs {
    #[arg(long, default_value = "All")]
    pub category: CategoryFilter,

    /// all, instagram or youtube
    #[arg(long, default_value = "all")]
    pub platform: PlatformFilter,

    /// Fetch the social feeds configured in the site file
    #[arg(long)]
    pub live: bool,

    /// Only featured items
    #[arg(long)]
    pub featured: bool,
}

#[derive(Debug, Clone, Args)]
pub struct SlotsArgs {
    #[arg(long)]
    pub date: NaiveDate,
}

/// Accepts 24-hour `10:00`, `10:00:00` and 12-hour `2:00 PM` or `2 PM`.
pub fn parse_time(input: &str) -> Result<NaiveTime, String> {
    let input = input.trim();
    // chrono needs a minute field, so "2 PM" becomes "2:00 PM"
    let normalized = match input.split_once(' ') {
        Some((hour, meridiem)) if !hour.is_empty() && hour.chars().all(|c| c.is_ascii_digit()) => {
            format!("{}:00 {}", hour, meridiem.trim())
        }
        _ => input.to_string(),
    };

    ["%H:%M", "%H:%M:%S", "%I:%M %p"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
        .ok_or_else(|| format!("invalid time '{}', expected e.g. 10:00 or 2:00 PM", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_formats() {
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let two_pm = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
        assert_eq!(parse_time("10:00"), Ok(ten));
        assert_eq!(parse_time("10:00:00"), Ok(ten));
        assert_eq!(parse_time("2:00 PM"), Ok(two_pm));
        assert_eq!(parse_time("2 PM"), Ok(two_pm));
        assert_eq!(parse_time(" 9 am "), Ok(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        assert!(parse_time("noon").is_err());
        assert!(parse_time("13 PM").is_err());
    }

    #[test]
    fn test_parse_book_command() {
        let cli = CliConfig::try_parse_from([
            "creator-site",
            "book",
            "--service",
            "video-production",
            "--date",
            "2026-10-19",
            "--time",
            "10:00",
            "--name",
            "John Doe",
            "--email",
            "john@example.com",
            "--phone",
            "555-1234",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Command::Book(args) => {
                assert_eq!(args.service, ServiceId::VideoProduction);
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
                assert!(args.dry_run);
                assert_eq!(args.message, "");
            }
            other => panic!("expected book command, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_service_rejected() {
        let result = CliConfig::try_parse_from([
            "creator-site", "book", "--service", "photography", "--date", "2026-10-19",
            "--time", "10:00", "--name", "a", "--email", "a@b.co", "--phone", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_services_command() {
        let cli = CliConfig::try_parse_from(["creator-site", "services", "--verbose"]).unwrap();
        assert!(matches!(cli.command, Command::Services));
        assert!(cli.verbose);
    }

    #[test]
    fn test_portfolio_defaults() {
        let cli = CliConfig::try_parse_from(["creator-site", "portfolio"]).unwrap();
        match cli.command {
            Command::Portfolio(args) => {
                assert_eq!(args.category, CategoryFilter::All);
                assert_eq!(args.platform, PlatformFilter::All);
                assert!(!args.live);
            }
            other => panic!("expected portfolio command, got {:?}", other),
        }
    }
}
