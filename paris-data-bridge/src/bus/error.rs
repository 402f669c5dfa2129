//! Message bus error types.

/// Errors from publishing to or consuming from the message bus.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// The MQTT client rejected a request (its event loop is gone)
    #[error("MQTT client error: {0}")]
    Client(#[from] rumqttc::ClientError),

    /// The connection to the broker failed
    #[error("MQTT connection error: {0}")]
    Connection(#[from] rumqttc::ConnectionError),

    /// The client's request queue is full (broker unreachable or slow)
    #[error("MQTT request queue full, message dropped")]
    QueueFull,

    /// Message could not be serialized
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    /// Payload is not a valid destinations message
    #[error("failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),

    /// QoS level outside 0..=2
    #[error("invalid QoS level {0}: expected 0, 1 or 2")]
    InvalidQos(u8),

    /// Bus configuration is unusable
    #[error("invalid bus configuration: {0}")]
    Config(String),

    /// The bus was shut down
    #[error("message bus closed")]
    Closed,
}
