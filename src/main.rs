use clap::Parser;
use creator_site::config::cli::{BookArgs, Command, ContactArgs, PortfolioArgs, SlotsArgs};
use creator_site::core::contact::ContactInput;
use creator_site::core::wizard::FieldInput;
use creator_site::core::{payload, portfolio, schedule, template};
use creator_site::domain::model::{FieldError, ServiceId};
use creator_site::domain::ports::{Clock, PortfolioSource, SystemClock};
use creator_site::utils::error::ErrorSeverity;
use creator_site::utils::logger::{self, LogFormat};
use creator_site::utils::validation::Validate;
use creator_site::{
    build_dispatcher, BookingWizard, CliConfig, ContactForm, Result, SiteConfig, SocialFeed,
};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let log_format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(log_format, cli.verbose);

    tracing::info!("Starting creator-site CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let outcome = match load_config(cli.config.as_deref()) {
        Ok(config) => run(cli.command, config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<SiteConfig> {
    let config = match path {
        Some(path) => {
            tracing::info!("📋 Loading site configuration from {}", path);
            SiteConfig::from_file(path)?
        }
        None => SiteConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

async fn run(command: Command, config: SiteConfig) -> Result<()> {
    match command {
        Command::Book(args) => book(args, &config).await,
        Command::Contact(args) => contact(args, &config).await,
        Command::Portfolio(args) => show_portfolio(args, &config).await,
        Command::Slots(args) => {
            show_slots(args);
            Ok(())
        }
        Command::Services => {
            show_services();
            Ok(())
        }
    }
}

fn report(feedback: Option<FieldError>) {
    if let Some(error) = feedback {
        eprintln!("⚠️  {}", error);
    }
}

async fn book(args: BookArgs, config: &SiteConfig) -> Result<()> {
    let dispatcher = build_dispatcher(&config.dispatcher, args.dry_run)?;
    let mut wizard = BookingWizard::new(config.form_settings());

    report(wizard.input(FieldInput::Service(args.service))?);
    wizard.next()?;

    report(wizard.input(FieldInput::Date(args.date))?);
    report(wizard.input(FieldInput::Time(args.time))?);
    wizard.next()?;

    report(wizard.input(FieldInput::FullName(args.name))?);
    report(wizard.input(FieldInput::Email(args.email))?);
    report(wizard.input(FieldInput::Phone(args.phone))?);
    report(wizard.input(FieldInput::Message(args.message))?);

    let request = wizard.submit(dispatcher.as_ref()).await?;

    println!("✅ Booking request submitted!");
    println!(
        "📅 {} on {} at {}",
        request.service.display_name(),
        payload::format_date(request.slot.date),
        payload::format_time(request.slot.time)
    );
    println!("We'll get back to you shortly to confirm your appointment.");

    if args.preview {
        println!("{}", template::render_booking_email(&request));
    }
    Ok(())
}

async fn contact(args: ContactArgs, config: &SiteConfig) -> Result<()> {
    let dispatcher = build_dispatcher(&config.dispatcher, args.dry_run)?;
    let mut form = ContactForm::new(config.form_settings());

    report(form.input(ContactInput::Name(args.name))?);
    report(form.input(ContactInput::Email(args.email))?);
    report(form.input(ContactInput::Subject(args.subject))?);
    report(form.input(ContactInput::Message(args.message))?);

    form.submit(dispatcher.as_ref()).await?;

    println!("✅ Message sent successfully!");
    println!("Thank you for reaching out. I'll get back to you soon.");
    Ok(())
}

async fn show_portfolio(args: PortfolioArgs, config: &SiteConfig) -> Result<()> {
    let feed = if args.live {
        SocialFeed::from_config(&config.feeds)?
    } else {
        None
    };
    let source = feed.as_ref().map(|feed| feed as &dyn PortfolioSource);
    let items = portfolio::load_items(source).await;

    let items = if args.featured {
        portfolio::featured(&items)
    } else {
        items
    };
    let visible = portfolio::filter(&items, &args.category, args.platform);

    println!(
        "🖼️  {} item(s) | category: {} | platform: {}",
        visible.len(),
        args.category,
        args.platform
    );
    println!("Categories: {}", portfolio::categories(&items).join(", "));
    for item in &visible {
        println!(
            "- [{}] {} ({}) {}",
            item.platform, item.title, item.date, item.link
        );
    }

    if visible.is_empty() {
        tracing::info!("No portfolio items match the selected filters");
    }
    Ok(())
}

fn show_slots(args: SlotsArgs) {
    let today = SystemClock.today();
    let slots = schedule::available_slots(args.date, today);

    if slots.is_empty() {
        println!(
            "❌ {} cannot be booked. Pick a weekday after today.",
            payload::format_date(args.date)
        );
        if let Some(next) = schedule::next_bookable_date(today) {
            println!("💡 Next bookable date: {}", payload::format_date(next));
        }
        return;
    }

    println!("📅 {}", args.date.format("%A, %B %d, %Y"));
    for slot in slots {
        println!("  {}", payload::format_time(slot));
    }
}

fn show_services() {
    for service in ServiceId::ALL {
        println!("{:<18} {}", service.as_str(), service.display_name());
        println!("{:<18} {}", "", service.description());
    }
}
