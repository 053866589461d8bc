use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single lines for terminal use.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "creator_site=debug,info"
    } else {
        "creator_site=info"
    }
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let layer = match format {
        LogFormat::Compact => fmt_layer.with_target(false).compact().boxed(),
        LogFormat::Json => fmt_layer.with_target(true).json().boxed(),
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
}
