use std::time::{Duration, Instant};

pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(5);

/// Settings shared by the booking wizard and the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    /// Destination address for every notification.
    pub owner_email: String,
    /// How long the success state stays up before the form clears itself.
    pub reset_delay: Duration,
}

impl FormSettings {
    pub fn new(owner_email: impl Into<String>) -> Self {
        Self {
            owner_email: owner_email.into(),
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }

    pub fn with_reset_delay(mut self, reset_delay: Duration) -> Self {
        self.reset_delay = reset_delay;
        self
    }

    pub fn reset_due(&self, submitted_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(submitted_at) >= self.reset_delay
    }

    /// Sleeps until the reset is due. A delay too large to land on a
    /// representable instant never elapses.
    pub async fn sleep_until_reset(&self, submitted_at: Instant) {
        match submitted_at.checked_add(self.reset_delay) {
            Some(deadline) => {
                tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_due_after_delay() {
        let settings = FormSettings::new("owner@example.com");
        let start = Instant::now();

        assert!(!settings.reset_due(start, start));
        assert!(!settings.reset_due(start, start + Duration::from_secs(4)));
        assert!(settings.reset_due(start, start + Duration::from_secs(5)));
    }

    #[test]
    fn test_zero_delay_is_due_immediately() {
        let settings = FormSettings::new("owner@example.com").with_reset_delay(Duration::ZERO);
        let start = Instant::now();
        assert!(settings.reset_due(start, start));
    }

    #[tokio::test]
    async fn test_unbounded_delay_waits_without_panicking() {
        let settings = FormSettings::new("owner@example.com").with_reset_delay(Duration::MAX);
        let start = Instant::now();

        let waited =
            tokio::time::timeout(Duration::from_millis(10), settings.sleep_until_reset(start))
                .await;
        assert!(waited.is_err());
        assert!(!settings.reset_due(start, start + Duration::from_secs(3600)));
    }

    #[tokio::test]
    async fn test_short_delay_elapses() {
        let settings =
            FormSettings::new("owner@example.com").with_reset_delay(Duration::from_millis(5));
        let start = Instant::now();
        tokio_test::assert_ok!(
            tokio::time::timeout(Duration::from_secs(1), settings.sleep_until_reset(start)).await
        );
    }
}
