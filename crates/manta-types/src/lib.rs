//! Wire data model for the Manta point-of-sale payment protocol.
//!
//! Every message type here derives `serde::{Serialize, Deserialize}` and
//! carries a `version` field defaulted to [`PROTOCOL_VERSION`], so older
//! senders that omit it still decode. Monetary amounts are
//! [`rust_decimal::Decimal`], which (de)serializes to/from a JSON string —
//! never a binary float.

mod destination;
mod error;
mod merchant;
mod messages;
mod session;
mod status;
mod url;

pub use destination::Destination;
pub use error::TypesError;
pub use merchant::Merchant;
pub use messages::{
    AckMessage, MerchantOrderRequest, PaymentMessage, PaymentRequest, PaymentRequestEnvelope,
    WireMessage,
};
pub use session::generate_session_id;
pub use status::Status;
pub use url::{MantaUrl, DEFAULT_PORT};

/// Protocol version carried by every wire message's `version` field.
pub const PROTOCOL_VERSION: &str = "1";
