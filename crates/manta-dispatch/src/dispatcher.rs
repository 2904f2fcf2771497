use std::sync::Arc;

use futures::future::BoxFuture;
use regex::Regex;

use crate::pattern::mqtt_to_regex;
use crate::DispatchError;

/// An async handler bound to a topic pattern.
///
/// Receives the wildcard segments captured from the pattern (in order) and
/// the raw message payload.
pub type Handler =
    Arc<dyn Fn(Vec<String>, Vec<u8>) -> BoxFuture<'static, Result<(), DispatchError>> + Send + Sync>;

struct Route {
    pattern: String,
    regex: Regex,
    handler: Handler,
    /// One entry per capturing group, in order: `true` for a `#` tail
    /// capture (split into multiple positional args at dispatch time),
    /// `false` for a single-level `+` capture.
    multi_segment: Vec<bool>,
}

fn multi_segment_groups(pattern: &str) -> Vec<bool> {
    pattern
        .split('/')
        .filter(|segment| *segment == "+" || *segment == "#")
        .map(|segment| segment == "#")
        .collect()
}

/// Builds a [`Dispatcher`]'s routing table.
///
/// Routes are registered once at construction time and never mutated
/// afterward — there is no runtime reflection or decorator scanning, just a
/// table built up front and matched against on every incoming message.
#[derive(Default)]
pub struct DispatcherBuilder {
    routes: Vec<Route>,
}

impl DispatcherBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` against the MQTT topic filter `pattern`.
    pub fn route(mut self, pattern: &str, handler: Handler) -> Result<Self, DispatchError> {
        let regex = mqtt_to_regex(pattern)?;
        self.routes.push(Route {
            pattern: pattern.to_string(),
            regex,
            handler,
            multi_segment: multi_segment_groups(pattern),
        });
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            routes: self.routes,
        }
    }
}

/// Routes incoming broker messages to their registered handlers by topic.
///
/// A topic may match more than one pattern (e.g. `payments/+` and a more
/// specific rule); every match runs. A handler's failure is logged and does
/// not prevent other matching handlers, or future dispatches, from running.
pub struct Dispatcher {
    routes: Vec<Route>,
}

impl Dispatcher {
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Number of registered routes, mostly useful in tests.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Dispatches `payload` received on `topic` to every matching route.
    pub async fn dispatch(&self, topic: &str, payload: Vec<u8>) {
        let mut matched = false;
        for route in &self.routes {
            let Some(captures) = route.regex.captures(topic) else {
                continue;
            };
            matched = true;
            let mut args: Vec<String> = Vec::new();
            for (i, m) in captures.iter().skip(1).enumerate() {
                let text = m.map(|m| m.as_str()).unwrap_or_default();
                if route.multi_segment.get(i).copied().unwrap_or(false) {
                    args.extend(text.split('/').map(str::to_string));
                } else {
                    args.push(text.to_string());
                }
            }

            if let Err(err) = (route.handler)(args, payload.clone()).await {
                tracing::error!(
                    topic,
                    pattern = route.pattern.as_str(),
                    error = %err,
                    "dispatch handler failed"
                );
            }
        }
        if !matched {
            tracing::debug!(topic, "no route matched incoming topic");
        }
    }
}
