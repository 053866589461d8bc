// Adapters layer: concrete implementations of the domain ports.

pub mod emailjs;
pub mod feeds;
pub mod log;

use crate::config::toml_config::{DispatcherConfig, DispatcherKind};
use crate::domain::ports::NotificationDispatcher;
use crate::utils::error::Result;

pub use emailjs::EmailJsDispatcher;
pub use feeds::{InstagramFeed, SocialFeed, YouTubeFeed};
pub use log::LogDispatcher;

/// Picks the dispatcher named in the configuration; `dry_run` always logs instead of sending.
pub fn build_dispatcher(
    config: &DispatcherConfig,
    dry_run: bool,
) -> Result<Box<dyn NotificationDispatcher>> {
    if dry_run {
        return Ok(Box::new(LogDispatcher));
    }
    match config.kind {
        DispatcherKind::EmailJs => Ok(Box::new(EmailJsDispatcher::from_config(config)?)),
        DispatcherKind::Log => Ok(Box::new(LogDispatcher)),
    }
}
