//! POS and Wallet client state machines for the Manta protocol.

mod error;
mod store;
mod wallet;

pub use error::ClientError;
pub use store::Store;
pub use wallet::Wallet;
