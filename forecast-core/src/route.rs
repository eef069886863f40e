//! Relay routes used to reach the forecast service.
//!
//! A route rewrites the canonical upstream URL into the URL actually
//! requested, and declares how the relay packages the upstream body.

use serde::{Deserialize, Serialize};
use url::{Url, form_urlencoded};

/// How a relay packages the upstream response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Envelope {
    /// Body is the upstream JSON as-is.
    #[default]
    Raw,
    /// Body is `{ "contents": "<upstream JSON as a string>" }`.
    Wrapped,
}

/// How the target URL is embedded into the relay request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum UrlTemplate {
    /// Request the target itself.
    Direct,
    /// `base?param=<encoded target>`
    Query { base: String, param: String },
    /// `prefix<encoded target>`
    EncodedPath { prefix: String },
    /// `prefix<target>`
    RawPath { prefix: String },
}

impl UrlTemplate {
    pub fn apply(&self, target: &Url) -> Result<Url, url::ParseError> {
        match self {
            UrlTemplate::Direct => Ok(target.clone()),
            UrlTemplate::Query { base, param } => {
                Url::parse_with_params(base, &[(param.as_str(), target.as_str())])
            }
            UrlTemplate::EncodedPath { prefix } => {
                let encoded: String = form_urlencoded::byte_serialize(target.as_str().as_bytes())
                    .collect();
                Url::parse(&format!("{prefix}{encoded}"))
            }
            UrlTemplate::RawPath { prefix } => Url::parse(&format!("{prefix}{target}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportRoute {
    pub name: String,
    pub template: UrlTemplate,
    #[serde(default)]
    pub envelope: Envelope,
}

impl TransportRoute {
    pub fn new(name: impl Into<String>, template: UrlTemplate, envelope: Envelope) -> Self {
        Self {
            name: name.into(),
            template,
            envelope,
        }
    }

    pub fn request_url(&self, target: &Url) -> Result<Url, url::ParseError> {
        self.template.apply(target)
    }
}

/// The public relays, in the order they are tried.
pub fn default_routes() -> Vec<TransportRoute> {
    vec![
        TransportRoute::new(
            "allorigins",
            UrlTemplate::Query {
                base: "https://api.allorigins.win/get".to_string(),
                param: "url".to_string(),
            },
            Envelope::Wrapped,
        ),
        TransportRoute::new(
            "thingproxy",
            UrlTemplate::EncodedPath {
                prefix: "https://thingproxy.freeboard.io/fetch/".to_string(),
            },
            Envelope::Raw,
        ),
        TransportRoute::new(
            "codetabs",
            UrlTemplate::Query {
                base: "https://api.codetabs.com/v1/proxy".to_string(),
                param: "quest".to_string(),
            },
            Envelope::Raw,
        ),
        TransportRoute::new(
            "cors-anywhere",
            UrlTemplate::RawPath {
                prefix: "https://cors-anywhere.herokuapp.com/".to_string(),
            },
            Envelope::Raw,
        ),
    ]
}
