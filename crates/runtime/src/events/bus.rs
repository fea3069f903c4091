//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{ContainerEvent, TransferEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Per-container changes (adds, removals, state edits)
    Inventory,
    /// Items moving between containers
    Transfer,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    Inventory(ContainerEvent),
    Transfer(TransferEvent),
}

impl SessionEvent {
    pub fn topic(&self) -> Topic {
        match self {
            SessionEvent::Inventory(_) => Topic::Inventory,
            SessionEvent::Transfer(_) => Topic::Transfer,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks and is best-effort:
/// slow receivers observe `Lagged` and events without subscribers are
/// dropped.
#[derive(Clone)]
pub struct EventBus {
    inventory: broadcast::Sender<SessionEvent>,
    transfer: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inventory: broadcast::channel(capacity).0,
            transfer: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<SessionEvent> {
        match topic {
            Topic::Inventory => &self.inventory,
            Topic::Transfer => &self.transfer,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: SessionEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<SessionEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<SessionEvent>> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerId;
    use crate::events::ContainerChange;

    fn changed(container: ContainerId) -> SessionEvent {
        SessionEvent::Inventory(ContainerEvent {
            container,
            change: ContainerChange::DataChanged,
        })
    }

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut inventory = bus.subscribe(Topic::Inventory);
        let mut transfer = bus.subscribe(Topic::Transfer);

        bus.publish(changed(ContainerId::Bag));

        let event = inventory.recv().await.unwrap();
        assert!(matches!(
            event,
            SessionEvent::Inventory(ContainerEvent {
                container: ContainerId::Bag,
                ..
            })
        ));
        assert!(transfer.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::with_capacity(1);
        bus.publish(changed(ContainerId::Overflow));

        let mut receivers = bus.subscribe_multiple(&[Topic::Inventory, Topic::Transfer]);
        bus.publish(changed(ContainerId::Overflow));
        let rx = receivers.get_mut(&Topic::Inventory).unwrap();
        assert!(matches!(rx.try_recv(), Ok(SessionEvent::Inventory(_))));
    }
}
