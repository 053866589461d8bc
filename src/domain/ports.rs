use crate::domain::model::{DispatchPayload, PortfolioItem};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};

/// Delivers a composed submission, e.g. as an email.
///
/// Called at most once per submission; implementations must not retry on
/// their own.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send(&self, payload: &DispatchPayload) -> Result<()>;
}

/// Read-only external feed of portfolio items.
#[async_trait]
pub trait PortfolioSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<PortfolioItem>>;
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
