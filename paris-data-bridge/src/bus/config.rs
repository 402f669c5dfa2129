//! Message bus configuration.

use std::time::Duration;

use rumqttc::{MqttOptions, QoS};
use serde::Deserialize;

use super::error::BusError;

/// Topic used on both sides unless overridden.
const DEFAULT_TOPIC: &str = "paris-data/destinations";

/// Broker connection and topic settings.
///
/// The bridge publishes to `outbound_topic`; the subscriber process
/// listens on `inbound_topic`. They only meet when both name the same
/// topic on the same broker.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Broker host name
    pub host: String,
    /// Broker port
    pub port: u16,
    /// Base MQTT client id; each side appends its role
    pub client_id: String,
    /// Topic the bridge publishes to
    pub outbound_topic: String,
    /// Topic the subscriber consumes
    pub inbound_topic: String,
    /// MQTT QoS level (0, 1 or 2)
    pub qos: u8,
    /// Keep-alive interval in seconds
    pub keep_alive_secs: u64,
    /// Capacity of the client's request channel
    pub channel_capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            client_id: "paris-data-bridge".to_string(),
            outbound_topic: DEFAULT_TOPIC.to_string(),
            inbound_topic: DEFAULT_TOPIC.to_string(),
            qos: 1,
            keep_alive_secs: 30,
            channel_capacity: 10,
        }
    }
}

impl BusConfig {
    /// Set the broker address.
    pub fn with_broker(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Use one topic for both publishing and consuming.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        let topic = topic.into();
        self.outbound_topic = topic.clone();
        self.inbound_topic = topic;
        self
    }

    /// Set the QoS level.
    pub fn with_qos(mut self, qos: u8) -> Self {
        self.qos = qos;
        self
    }

    /// QoS as the MQTT client's type.
    pub fn mqtt_qos(&self) -> Result<QoS, BusError> {
        match self.qos {
            0 => Ok(QoS::AtMostOnce),
            1 => Ok(QoS::AtLeastOnce),
            2 => Ok(QoS::ExactlyOnce),
            other => Err(BusError::InvalidQos(other)),
        }
    }

    /// Check the settings the MQTT client would otherwise panic on.
    pub fn validate(&self) -> Result<(), BusError> {
        self.mqtt_qos()?;
        if self.keep_alive_secs == 0 {
            return Err(BusError::Config("keep_alive_secs must be positive".into()));
        }
        if self.channel_capacity == 0 {
            return Err(BusError::Config("channel_capacity must be positive".into()));
        }
        if self.outbound_topic.is_empty() || self.inbound_topic.is_empty() {
            return Err(BusError::Config("topics must not be empty".into()));
        }
        Ok(())
    }

    /// Connection options for a client playing `role` ("publisher", "subscriber").
    pub(crate) fn mqtt_options(&self, role: &str) -> MqttOptions {
        let mut options = MqttOptions::new(
            format!("{}-{}", self.client_id, role),
            self.host.clone(),
            self.port,
        );
        options.set_keep_alive(Duration::from_secs(self.keep_alive_secs));
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BusConfig::default();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 1883);
        assert_eq!(config.outbound_topic, config.inbound_topic);
        assert_eq!(config.mqtt_qos().unwrap(), QoS::AtLeastOnce);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder() {
        let config = BusConfig::default()
            .with_broker("broker.local", 8883)
            .with_topic("ratp/out")
            .with_qos(0);

        assert_eq!(config.host, "broker.local");
        assert_eq!(config.port, 8883);
        assert_eq!(config.outbound_topic, "ratp/out");
        assert_eq!(config.inbound_topic, "ratp/out");
        assert_eq!(config.mqtt_qos().unwrap(), QoS::AtMostOnce);
    }

    #[test]
    fn invalid_qos_rejected() {
        let config = BusConfig::default().with_qos(3);
        assert!(matches!(config.mqtt_qos(), Err(BusError::InvalidQos(3))));
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_keep_alive_rejected() {
        let config = BusConfig {
            keep_alive_secs: 0,
            ..BusConfig::default()
        };
        assert!(matches!(config.validate(), Err(BusError::Config(_))));
    }

    #[test]
    fn client_id_carries_role() {
        let options = BusConfig::default().mqtt_options("subscriber");
        assert_eq!(options.client_id(), "paris-data-bridge-subscriber");
        assert_eq!(options.broker_address(), ("localhost".to_string(), 1883));
    }
}
