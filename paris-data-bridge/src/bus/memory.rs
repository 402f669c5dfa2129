//! In-process message bus.
//!
//! A single broadcast channel carries every topic; subscriptions filter
//! on topic name. Messages published while nobody is subscribed are
//! dropped, as they would be on an MQTT topic without retained messages.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::GetAllDestinationsResponse;

use super::codec::encode;
use super::error::BusError;
use super::{Publisher, Subscription};

#[derive(Debug, Clone)]
struct Delivery {
    topic: Arc<str>,
    payload: Arc<[u8]>,
}

/// In-process broker.
///
/// The bus stays open while it or any publisher created from it is alive.
#[derive(Debug, Clone)]
pub struct MemoryBus {
    sender: broadcast::Sender<Delivery>,
}

impl MemoryBus {
    /// Create a bus buffering up to `capacity` undelivered messages per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publisher for `topic`.
    pub fn publisher(&self, topic: impl Into<String>) -> MemoryPublisher {
        MemoryPublisher {
            sender: self.sender.clone(),
            topic: Arc::from(topic.into()),
        }
    }

    /// Subscribe to `topic`. Only messages published after this call are seen.
    pub fn subscribe(&self, topic: impl Into<String>) -> MemorySubscription {
        MemorySubscription {
            receiver: self.sender.subscribe(),
            topic: topic.into(),
        }
    }
}

/// Publishes onto one topic of a [`MemoryBus`].
#[derive(Debug, Clone)]
pub struct MemoryPublisher {
    sender: broadcast::Sender<Delivery>,
    topic: Arc<str>,
}

#[async_trait]
impl Publisher for MemoryPublisher {
    async fn publish(&self, message: Option<&GetAllDestinationsResponse>) -> Result<(), BusError> {
        let payload = encode(message)?;
        debug!(topic = %self.topic, bytes = payload.len(), "publishing to memory bus");

        let delivery = Delivery {
            topic: Arc::clone(&self.topic),
            payload: payload.into(),
        };

        if self.sender.send(delivery).is_err() {
            debug!(topic = %self.topic, "no subscribers, message dropped");
        }

        Ok(())
    }
}

/// Receives one topic of a [`MemoryBus`].
#[derive(Debug)]
pub struct MemorySubscription {
    receiver: broadcast::Receiver<Delivery>,
    topic: String,
}

#[async_trait]
impl Subscription for MemorySubscription {
    async fn next_message(&mut self) -> Result<Option<Vec<u8>>, BusError> {
        loop {
            match self.receiver.recv().await {
                Ok(delivery) if *delivery.topic == *self.topic => {
                    return Ok(Some(delivery.payload.to_vec()));
                }
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(topic = %self.topic, missed, "subscriber lagged, messages lost");
                }
                Err(broadcast::error::RecvError::Closed) => return Ok(None),
            }
        }
    }
}
