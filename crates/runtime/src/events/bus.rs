//! Topic-based event bus implementation.

use serde::Serialize;
use strum::AsRefStr;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{InteractionEvent, LevelEvent, PuzzleEvent, SessionEvent, StatusEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, AsRefStr)]
pub enum Topic {
    /// Progression state changes, saves, session end
    Session,
    /// Level loads and completions
    Level,
    /// Status line updates
    Status,
    /// Interaction hints, dialogue and terminal subviews
    Interaction,
    /// Puzzle solves and gate changes
    Puzzle,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize)]
pub enum Event {
    Session(SessionEvent),
    Level(LevelEvent),
    Status(StatusEvent),
    Interaction(InteractionEvent),
    Puzzle(PuzzleEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Session(_) => Topic::Session,
            Event::Level(_) => Topic::Level,
            Event::Status(_) => Topic::Status,
            Event::Interaction(_) => Topic::Interaction,
            Event::Puzzle(_) => Topic::Puzzle,
        }
    }
}

struct Channels {
    session: broadcast::Sender<Event>,
    level: broadcast::Sender<Event>,
    status: broadcast::Sender<Event>,
    interaction: broadcast::Sender<Event>,
    puzzle: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Session => &self.session,
            Topic::Level => &self.level,
            Topic::Status => &self.status,
            Topic::Interaction => &self.interaction,
            Topic::Puzzle => &self.puzzle,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: events sent while a
/// topic has no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channel = || broadcast::channel(capacity).0;
        Self {
            channels: Arc::new(Channels {
                session: channel(),
                level: channel(),
                status: channel(),
                interaction: channel(),
                puzzle: channel(),
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            tracing::trace!(target: "runtime::events", topic = topic.as_ref(), "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
