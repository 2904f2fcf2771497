//! Payment Processor state machine for the Manta protocol.
//!
//! [`PayProc`] owns the broker connection, transaction storage and merchant
//! directory lookups; [`domain::ack`] holds the pure status-transition
//! functions it builds every outgoing ack from.

pub mod domain;
mod error;
pub mod ports;
mod service;

pub use error::PayProcError;
pub use ports::outbound::MerchantDirectory;
pub use service::PayProc;
