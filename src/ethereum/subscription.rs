//! Event subscription handles and the log-forwarding loop.

use std::sync::Arc;

use alloy::rpc::types::Log;
use alloy::sol_types::SolEvent;
use futures_util::{pin_mut, Stream, StreamExt};
use tokio::task::JoinHandle;

use crate::types::ExaminationEvent;

/// Callback invoked for each decoded event.
pub type EventCallback = Arc<dyn Fn(ExaminationEvent) + Send + Sync>;

/// Live handle to one or more contract event streams.
///
/// Delivery continues until [`EventSubscription::unsubscribe`] is called;
/// events may arrive at any time relative to in-flight request/response
/// operations.
pub struct EventSubscription {
    tasks: Vec<JoinHandle<()>>,
}

impl EventSubscription {
    pub(crate) fn new(tasks: Vec<JoinHandle<()>>) -> Self {
        Self { tasks }
    }

    /// Stop delivery and release the underlying subscriptions.
    ///
    /// No callback fires for events observed after this returns.
    pub fn unsubscribe(self) {
        for task in &self.tasks {
            task.abort();
        }
        tracing::debug!(streams = self.tasks.len(), "Event subscription released");
    }
}

/// Decode a raw log as event `E`, logging and discarding undecodable logs.
pub(crate) fn decode_log<E: SolEvent>(log: &Log) -> Option<E> {
    match E::decode_log_data(&log.inner.data) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to decode contract event");
            None
        }
    }
}

/// Spawn a task that maps each raw log through `decode` and hands the result
/// to `callback`.
///
/// Logs that fail to decode are dropped (the decoder is expected to log the
/// reason); delivery continues with the next log.
pub(crate) fn spawn_forwarder<S, F>(stream: S, decode: F, callback: EventCallback) -> JoinHandle<()>
where
    S: Stream<Item = Log> + Send + 'static,
    F: Fn(&Log) -> Option<ExaminationEvent> + Send + 'static,
{
    tokio::spawn(async move {
        pin_mut!(stream);
        while let Some(log) = stream.next().await {
            if let Some(event) = decode(&log) {
                tracing::debug!(event = event.name(), "Forwarding contract event");
                callback(event);
            }
        }
        tracing::debug!("Event stream closed");
    })
}
