//! Broker client port and adapters for the Manta protocol.
//!
//! Every protocol component depends on the [`BrokerClient`] trait, never on
//! a transport. Two adapters are provided: [`adapters::mqtt::MqttBrokerClient`]
//! for production use over a real MQTT broker, and
//! [`adapters::memory::InMemoryBroker`] as an in-process test double.

pub mod adapters;
mod client;
mod error;
mod types;

pub use adapters::{InMemoryBroker, InMemoryBrokerClient, MqttBrokerClient};
pub use client::{BrokerClient, BrokerStream};
pub use error::BrokerError;
pub use types::{BrokerMessage, Qos};
