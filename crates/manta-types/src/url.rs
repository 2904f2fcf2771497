use regex::Regex;
use std::sync::OnceLock;

use crate::TypesError;

/// Default MQTT broker port, used whenever a `manta://` URL omits one.
pub const DEFAULT_PORT: u16 = 1883;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^manta://((?:\w|\.)+)(?::(\d+))?/(.+)$").expect("static pattern is valid")
    })
}

/// A parsed `manta://host[:port]/session_id` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MantaUrl {
    pub host: String,
    pub port: u16,
    pub session_id: String,
}

impl MantaUrl {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, session_id: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            session_id: session_id.into(),
        }
    }

    /// Parses a `manta://` URL, defaulting the port to [`DEFAULT_PORT`] when omitted.
    pub fn parse(url: &str) -> Result<Self, TypesError> {
        let captures = url_pattern()
            .captures(url)
            .ok_or_else(|| TypesError::UrlParse(url.to_string()))?;

        let host = captures[1].to_string();
        let port = match captures.get(2) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| TypesError::UrlParse(url.to_string()))?,
            None => DEFAULT_PORT,
        };
        let session_id = captures[3].to_string();

        Ok(Self {
            host,
            port,
            session_id,
        })
    }

    /// Mints a `manta://` URL, omitting the port when it is the MQTT default.
    #[must_use]
    pub fn mint(&self) -> String {
        if self.port == DEFAULT_PORT {
            format!("manta://{}/{}", self.host, self.session_id)
        } else {
            format!("manta://{}:{}/{}", self.host, self.port, self.session_id)
        }
    }
}

impl std::fmt::Display for MantaUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.mint())
    }
}
