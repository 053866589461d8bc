pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{build_dispatcher, EmailJsDispatcher, LogDispatcher, SocialFeed};
pub use config::SiteConfig;
pub use crate::core::{contact::ContactForm, form::FormSettings, wizard::BookingWizard};
pub use utils::error::{Result, SiteError};
