//! Transaction state storage for the Manta Payment Processor.
//!
//! `TransactionState` is replaced wholesale rather than mutated field by
//! field; every replacement runs through [`TransactionStorage::set_ack`],
//! which is the single point where observers are notified and terminal
//! sessions are evicted.

mod error;
mod memory;
mod observer;
mod state;
mod trait_def;

pub use error::StorageError;
pub use memory::InMemoryTransactionStorage;
pub use observer::StorageObserver;
pub use state::TransactionState;
pub use trait_def::TransactionStorage;
