//! Static topic-pattern routing for Manta broker components.
//!
//! Routes are registered once, at construction time, into a plain
//! `Vec<(Regex, Handler)>` — there is no runtime reflection or decorator
//! scanning involved in matching an incoming topic to its handler.

mod dispatcher;
mod error;
mod pattern;

pub use dispatcher::{Dispatcher, DispatcherBuilder, Handler};
pub use error::DispatchError;
pub use pattern::mqtt_to_regex;
