use crate::domain::model::DispatchPayload;
use crate::domain::ports::NotificationDispatcher;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Dispatcher that only writes the payload to the log. Used for dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDispatcher;

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn send(&self, payload: &DispatchPayload) -> Result<()> {
        tracing::info!(
            "📝 {:?} notification (not sent): {}",
            payload.kind,
            serde_json::to_string(&payload.params)?
        );
        Ok(())
    }
}
