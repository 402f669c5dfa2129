//! Message bus plumbing.
//!
//! The bridge republishes every destinations lookup on a single topic;
//! a separate process consumes that topic and logs what it receives.
//! Two transports are provided:
//! - [`MqttPublisher`] / [`MqttSubscription`] talk to an MQTT broker
//! - [`MemoryBus`] is an in-process broker for tests and local runs
//!
//! Publishing is fire-and-forget: a successful `publish` means the
//! message was handed to the transport, not that a broker acknowledged it.

mod codec;
mod config;
mod error;
mod memory;
mod mqtt;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::GetAllDestinationsResponse;

pub use codec::{DestinationsMessage, decode, encode};
pub use config::BusConfig;
pub use error::BusError;
pub use memory::{MemoryBus, MemoryPublisher, MemorySubscription};
pub use mqtt::{MqttPublisher, MqttSubscription};

/// Sends destinations messages to the outbound topic.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish one message. `None` is sent as JSON `null`.
    async fn publish(&self, message: Option<&GetAllDestinationsResponse>) -> Result<(), BusError>;
}

/// Raw payloads arriving on the inbound topic, in delivery order.
#[async_trait]
pub trait Subscription: Send {
    /// Wait for the next payload. `Ok(None)` means the stream has ended.
    async fn next_message(&mut self) -> Result<Option<Vec<u8>>, BusError>;
}

/// Drain a subscription, handing each decoded message to `on_message`.
///
/// Payloads that do not decode are logged and skipped. Returns the number
/// of messages delivered once the subscription ends.
pub async fn consume<S, F>(subscription: &mut S, mut on_message: F) -> Result<usize, BusError>
where
    S: Subscription + ?Sized,
    F: FnMut(DestinationsMessage) + Send,
{
    let mut delivered = 0;

    while let Some(payload) = subscription.next_message().await? {
        match decode(&payload) {
            Ok(message) => {
                delivered += 1;
                on_message(message);
            }
            Err(e) => {
                warn!(error = %e, bytes = payload.len(), "skipping undecodable message");
            }
        }
    }

    info!(delivered, "subscription ended");
    Ok(delivered)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::domain::{Destination, DestinationResult, Metadata};

    /// Subscription replaying a fixed list of payloads.
    struct Replay(VecDeque<Vec<u8>>);

    #[async_trait]
    impl Subscription for Replay {
        async fn next_message(&mut self) -> Result<Option<Vec<u8>>, BusError> {
            Ok(self.0.pop_front())
        }
    }

    fn sample() -> GetAllDestinationsResponse {
        GetAllDestinationsResponse {
            result: DestinationResult {
                destinations: vec![
                    Destination::new("Pont de Levallois", "A"),
                    Destination::new("Gallieni", "R"),
                ],
            },
            metadata: Metadata {
                call: "GET /destinations/metros/3".into(),
                date: "2020-04-18T14:02:11+02:00".into(),
                version: 4.0,
            },
        }
    }

    #[tokio::test]
    async fn consume_delivers_in_order_and_skips_garbage() {
        let mut replay = Replay(VecDeque::from([
            encode(Some(&sample())).unwrap(),
            b"not json".to_vec(),
            encode(None).unwrap(),
        ]));

        let mut seen = Vec::new();
        let delivered = consume(&mut replay, |m| seen.push(m)).await.unwrap();

        assert_eq!(delivered, 2);
        assert_eq!(seen, vec![Some(sample()), None]);
    }

    #[tokio::test]
    async fn publish_then_consume_over_memory_bus() {
        let bus = MemoryBus::new(16);
        let mut subscription = bus.subscribe("paris-data/destinations");
        let publisher = bus.publisher("paris-data/destinations");

        publisher.publish(Some(&sample())).await.unwrap();
        publisher.publish(None).await.unwrap();
        drop(publisher);
        drop(bus);

        let mut seen = Vec::new();
        let delivered = consume(&mut subscription, |m| seen.push(m))
            .await
            .unwrap();

        assert_eq!(delivered, 2);
        assert_eq!(seen[0], Some(sample()));
        assert_eq!(seen[1], None);
    }
}
