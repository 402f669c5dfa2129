//! MQTT transport (rumqttc).

use std::time::Duration;

use async_trait::async_trait;
use rumqttc::{AsyncClient, ClientError, Event, EventLoop, Packet, QoS};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::domain::GetAllDestinationsResponse;

use super::codec::encode;
use super::config::BusConfig;
use super::error::BusError;
use super::{Publisher, Subscription};

/// Pause between event loop polls after a connection error.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Publishes to the configured outbound topic.
///
/// Owns a background task driving the client's event loop; the task is
/// aborted when the publisher is dropped.
#[derive(Debug)]
pub struct MqttPublisher {
    client: AsyncClient,
    topic: String,
    qos: QoS,
    driver: JoinHandle<()>,
}

impl MqttPublisher {
    /// Create the client and start its event loop.
    ///
    /// Must be called from within a Tokio runtime. The broker connection
    /// is established lazily by the event loop.
    pub fn connect(config: &BusConfig) -> Result<Self, BusError> {
        config.validate()?;
        let qos = config.mqtt_qos()?;

        let (client, eventloop) =
            AsyncClient::new(config.mqtt_options("publisher"), config.channel_capacity);
        let driver = tokio::spawn(drive(eventloop));

        info!(
            host = %config.host,
            port = config.port,
            topic = %config.outbound_topic,
            "MQTT publisher started"
        );

        Ok(Self {
            client,
            topic: config.outbound_topic.clone(),
            qos,
            driver,
        })
    }

    /// Topic this publisher sends to.
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl Drop for MqttPublisher {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

#[async_trait]
impl Publisher for MqttPublisher {
    async fn publish(&self, message: Option<&GetAllDestinationsResponse>) -> Result<(), BusError> {
        let payload = encode(message)?;
        debug!(topic = %self.topic, bytes = payload.len(), "sending message to MQTT topic");

        // Never wait on the request queue: it stops draining while the
        // broker is unreachable.
        self.client
            .try_publish(self.topic.as_str(), self.qos, false, payload)
            .map_err(|e| match e {
                ClientError::TryRequest(_) => BusError::QueueFull,
                other => BusError::Client(other),
            })
    }
}

/// Keep the publisher's connection alive.
///
/// rumqttc reconnects on the next poll after an error.
async fn drive(mut eventloop: EventLoop) {
    loop {
        match eventloop.poll().await {
            Ok(event) => trace!(?event, "MQTT event"),
            Err(e) => {
                warn!(error = %e, "MQTT publisher connection error");
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

/// Consumes the configured inbound topic.
pub struct MqttSubscription {
    // Kept so the request channel stays open while we poll.
    _client: AsyncClient,
    eventloop: EventLoop,
    topic: String,
}

impl MqttSubscription {
    /// Create the client and queue the subscription.
    ///
    /// The SUBSCRIBE packet goes out on the first poll.
    pub async fn connect(config: &BusConfig) -> Result<Self, BusError> {
        config.validate()?;
        let qos = config.mqtt_qos()?;

        let (client, eventloop) =
            AsyncClient::new(config.mqtt_options("subscriber"), config.channel_capacity);
        client.subscribe(config.inbound_topic.as_str(), qos).await?;

        info!(
            host = %config.host,
            port = config.port,
            topic = %config.inbound_topic,
            "MQTT subscription requested"
        );

        Ok(Self {
            _client: client,
            eventloop,
            topic: config.inbound_topic.clone(),
        })
    }
}

#[async_trait]
impl Subscription for MqttSubscription {
    async fn next_message(&mut self) -> Result<Option<Vec<u8>>, BusError> {
        loop {
            match self.eventloop.poll().await? {
                Event::Incoming(Packet::Publish(publish)) => {
                    trace!(topic = %publish.topic, bytes = publish.payload.len(), "MQTT publish received");
                    return Ok(Some(publish.payload.to_vec()));
                }
                Event::Incoming(Packet::SubAck(_)) => {
                    debug!(topic = %self.topic, "subscription acknowledged");
                }
                Event::Incoming(Packet::Disconnect) => return Ok(None),
                event => trace!(?event, "MQTT event"),
            }
        }
    }
}
