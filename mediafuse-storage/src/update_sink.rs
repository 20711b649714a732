//! Change-event sinks.

use mediafuse_types::GraphUpdate;
use tokio::sync::broadcast;
use tracing::debug;

/// Receives the [`GraphUpdate`] emitted after each successful graph write.
///
/// A sink must never fail the write that produced the event: delivery
/// problems are the sink's to absorb (drop, buffer, retry), not the graph's.
pub trait UpdateSink: Send + Sync {
    fn publish(&self, update: GraphUpdate);
}

/// Fans updates out to in-process subscribers over a broadcast channel.
///
/// Stands in for the external change-notification bus consumed by index and
/// search downstreams. Slow subscribers lag and lose the oldest events,
/// which is the bus's at-most-once contract here.
pub struct BroadcastUpdateSink {
    sender: broadcast::Sender<GraphUpdate>,
}

impl BroadcastUpdateSink {
    /// Creates a sink buffering up to `capacity` undelivered events per
    /// subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Registers a new subscriber. Events published before subscription are
    /// not replayed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GraphUpdate> {
        self.sender.subscribe()
    }
}

impl UpdateSink for BroadcastUpdateSink {
    fn publish(&self, update: GraphUpdate) {
        if self.sender.send(update).is_err() {
            debug!("graph update published with no subscribers");
        }
    }
}

/// Discards every event. For callers that only need the write path.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopUpdateSink;

impl UpdateSink for NoopUpdateSink {
    fn publish(&self, _update: GraphUpdate) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediafuse_types::{ContentId, ResourceRef, Source};

    fn update() -> GraphUpdate {
        GraphUpdate::new(
            ResourceRef::new(ContentId::new(1), "bbc.co.uk"),
            Source::new("bbc.co.uk"),
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn subscribers_receive_published_updates() {
        let sink = BroadcastUpdateSink::new(8);
        let mut rx = sink.subscribe();

        let published = update();
        sink.publish(published.clone());

        assert_eq!(rx.recv().await.unwrap(), published);
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        BroadcastUpdateSink::new(8).publish(update());
        NoopUpdateSink.publish(update());
    }
}
