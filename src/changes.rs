//! In-process change notification.
//!
//! Mutating handlers publish an event after a successful write so that
//! connected dashboards can refetch. The feed is an explicitly
//! constructed handle carried in [`AppState`](crate::schemas::AppState);
//! there is no module-level registry. A subscription is just the
//! receiver half of a broadcast channel — whoever created it owns it,
//! and dropping it ends the subscription. Delivery is best-effort: a
//! lagging subscriber loses the oldest events and keeps going.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, trace};
use utoipa::ToSchema;

/// Buffered events per subscriber before lag drops the oldest.
const CHANGE_FEED_CAPACITY: usize = 64;

/// Which table changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangedEntity {
    Transaction,
    Budget,
}

/// A record changed in the given household.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChangeEvent {
    pub household_id: i32,
    pub entity: ChangedEntity,
}

/// Handle for publishing and subscribing to change events.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self { sender }
    }

    /// Publishes an event to all current subscribers.
    /// Having no subscribers is not an error.
    pub fn publish(&self, event: ChangeEvent) {
        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(receivers, "Published change event");
            }
            Err(_) => {
                trace!("Change event dropped, no subscribers");
            }
        }
    }

    /// Opens a new subscription. Only events published after this call
    /// are delivered; drop the receiver to unsubscribe.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();

        feed.publish(ChangeEvent {
            household_id: 1,
            entity: ChangedEntity::Transaction,
        });
        feed.publish(ChangeEvent {
            household_id: 2,
            entity: ChangedEntity::Budget,
        });

        let first = rx.recv().await.unwrap();
        assert_eq!(first.household_id, 1);
        assert_eq!(first.entity, ChangedEntity::Transaction);
        let second = rx.recv().await.unwrap();
        assert_eq!(second.entity, ChangedEntity::Budget);
    }

    #[tokio::test]
    async fn test_subscription_starts_at_subscribe_time() {
        let feed = ChangeFeed::new();
        feed.publish(ChangeEvent {
            household_id: 1,
            entity: ChangedEntity::Transaction,
        });

        // Opened after the first publish; must not see it
        let mut rx = feed.subscribe();
        feed.publish(ChangeEvent {
            household_id: 2,
            entity: ChangedEntity::Budget,
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(event.household_id, 2);
    }

    #[tokio::test]
    async fn test_publishing_without_subscribers_is_fine() {
        let feed = ChangeFeed::new();
        // Must not panic or error
        feed.publish(ChangeEvent {
            household_id: 1,
            entity: ChangedEntity::Transaction,
        });
    }
}
