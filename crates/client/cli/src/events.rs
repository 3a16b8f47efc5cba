//! Event consumer that mirrors runtime events into the log.
use runtime::{Event, RuntimeHandle, Topic};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

const TOPICS: [Topic; 5] = [
    Topic::Session,
    Topic::Level,
    Topic::Status,
    Topic::Interaction,
    Topic::Puzzle,
];

/// One task per topic; each ends when the runtime drops its event bus.
pub fn spawn_event_logger(handle: &RuntimeHandle) -> Vec<JoinHandle<()>> {
    TOPICS
        .iter()
        .map(|&topic| {
            let mut rx = handle.subscribe(topic);
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => log_event(&event),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(target: "client::events", topic = topic.as_ref(), skipped, "event consumer lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            })
        })
        .collect()
}

fn log_event(event: &Event) {
    let topic = event.topic();
    match serde_json::to_string(event) {
        Ok(payload) => {
            tracing::info!(target: "client::events", topic = topic.as_ref(), %payload);
        }
        Err(error) => {
            tracing::debug!(target: "client::events", topic = topic.as_ref(), %error, ?event, "unserializable event");
        }
    }
}
