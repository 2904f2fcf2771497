pub mod memory;
pub mod mqtt;

pub use memory::{InMemoryBroker, InMemoryBrokerClient};
pub use mqtt::MqttBrokerClient;
