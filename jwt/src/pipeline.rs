//! Pipeline step
//!
//! A configured Create/Decode step driven against a message bag the host
//! pipeline supplies. The step never reaches into global context: the bag
//! is handed in per invocation through the small [`Exchange`] interface,
//! and field extraction/placement is limited to the names the step is
//! configured with.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::Zeroizing;

use crate::codec;
use crate::error::{JwtError, Result};
use crate::types::{Algorithm, Claims};

/// Well-known bag entry carrying the message body.
///
/// Used when a step has no explicit `source`/`target` field configured.
pub const BODY: &str = "body";

/// Well-known bag entry overriding the configured key location for a
/// single message. Overrides pass the same locality check as configured
/// locations, before any I/O.
pub const KEY_LOCATION: &str = "jwt.key.location";

/// Message-bag view supplied by the host pipeline.
///
/// `remove` exists because a step discards its source field after
/// processing unless configured to retain it.
pub trait Exchange {
    /// Read a named value from the bag.
    fn get(&self, name: &str) -> Option<Value>;
    /// Write a named value into the bag.
    fn set(&mut self, name: &str, value: Value);
    /// Drop a named value from the bag.
    fn remove(&mut self, name: &str);
}

impl Exchange for HashMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        HashMap::get(self, name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }

    fn remove(&mut self, name: &str) {
        HashMap::remove(self, name);
    }
}

/// Step operation: sign-and-encode or verify-and-decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Encode and sign claims into a token
    Create,
    /// Verify a token and decode its claims
    Decode,
}

/// Shape of the decoded claims a Decode step writes back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputShape {
    /// Re-serialized JSON text
    #[default]
    Text,
    /// The claims object itself
    Map,
}

/// Step configuration.
///
/// Deserializable so hosts can read it straight from their own config
/// files; only `operation` and `algorithm` are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    /// Operation to perform
    pub operation: Operation,
    /// Algorithm bound to this step
    pub algorithm: Algorithm,
    /// Explicit opt-in for the unsigned `none` algorithm
    #[serde(default)]
    pub allow_none: bool,
    /// Key location (`file:` or `env:`); required for HS256 unless every
    /// message carries a [`KEY_LOCATION`] override
    #[serde(default)]
    pub key_location: Option<String>,
    /// Bag field holding the input; the body when unset
    #[serde(default)]
    pub source: Option<String>,
    /// Bag field receiving the output; the body when unset
    #[serde(default)]
    pub target: Option<String>,
    /// Keep the source field after processing (the body is always kept)
    #[serde(default)]
    pub retain_source: bool,
    /// Decode only: search the input for an embedded token instead of
    /// treating the whole input as one
    #[serde(default = "default_find_token")]
    pub find_token: bool,
    /// Decode only: output shape
    #[serde(default)]
    pub output: OutputShape,
}

const fn default_find_token() -> bool {
    true
}

/// A validated, ready-to-run pipeline step.
#[derive(Debug, Clone)]
pub struct Step {
    config: StepConfig,
}

impl Step {
    /// Validate a configuration and build the step.
    ///
    /// Refusals happen here, not at processing time: the `none` algorithm
    /// without its opt-in, `retain_source` without a `source`, and a
    /// non-local `key_location` are all configuration errors.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Config`] or [`JwtError::Key`] as described
    /// above.
    pub fn new(config: StepConfig) -> Result<Self> {
        if config.algorithm == Algorithm::None && !config.allow_none {
            return Err(JwtError::config(
                "algorithm \"none\" is not allowed; set allow_none to true to use it",
            ));
        }
        if config.retain_source && config.source.is_none() {
            return Err(JwtError::config("retain_source requires source to be set"));
        }
        if let Some(location) = &config.key_location {
            // Refuse key-shaped or network locations up front.
            tokn_key::KeyLocation::parse(location)?;
        }
        Ok(Self { config })
    }

    /// The configuration this step runs with.
    #[must_use]
    pub fn config(&self) -> &StepConfig {
        &self.config
    }

    /// Run the step against one message.
    ///
    /// # Errors
    ///
    /// Propagates codec and key-resolution errors; additionally returns
    /// [`JwtError::MissingInput`] when the configured source field is
    /// absent from the bag.
    pub fn process(&self, exchange: &mut dyn Exchange) -> Result<()> {
        let config = &self.config;
        tracing::debug!(
            operation = ?config.operation,
            algorithm = %config.algorithm,
            "processing message"
        );

        let key = self.resolve_key(&*exchange)?;
        let key = key.as_ref().map(|k| k.as_slice());

        let input = self.take_input(&*exchange)?;

        let output = match config.operation {
            Operation::Create => {
                let claims = claims_from_input(input)?;
                let token = codec::create(&claims, config.algorithm, key, config.allow_none)?;
                Value::String(token)
            }
            Operation::Decode => {
                let text = text_from_input(input)?;
                let claims = codec::decode(
                    &text,
                    config.algorithm,
                    key,
                    config.allow_none,
                    config.find_token,
                )?;
                match config.output {
                    OutputShape::Text => Value::String(
                        serde_json::to_string(&claims)
                            .map_err(|e| JwtError::Serialization(e.to_string()))?,
                    ),
                    OutputShape::Map => Value::Object(claims),
                }
            }
        };

        // Discard the source before writing so a shared source/target name
        // keeps the result. The body is never discarded.
        if !config.retain_source {
            if let Some(source) = &config.source {
                exchange.remove(source);
            }
        }
        exchange.set(self.target_name(), output);

        Ok(())
    }

    /// Per-message override first, configured location second; no location
    /// at all is only acceptable for the `none` algorithm.
    fn resolve_key(&self, exchange: &dyn Exchange) -> Result<Option<Zeroizing<Vec<u8>>>> {
        let location = exchange
            .get(KEY_LOCATION)
            .and_then(|v| v.as_str().map(str::to_string))
            .or_else(|| self.config.key_location.clone());

        match location {
            Some(location) => Ok(Some(tokn_key::resolve(&location)?)),
            None if self.config.algorithm == Algorithm::None => Ok(None),
            None => Err(JwtError::config("no key location provided")),
        }
    }

    fn take_input(&self, exchange: &dyn Exchange) -> Result<Value> {
        let name = self.source_name();
        exchange
            .get(name)
            .ok_or_else(|| JwtError::MissingInput(name.to_string()))
    }

    fn source_name(&self) -> &str {
        self.config.source.as_deref().unwrap_or(BODY)
    }

    fn target_name(&self) -> &str {
        self.config.target.as_deref().unwrap_or(BODY)
    }
}

fn claims_from_input(input: Value) -> Result<Claims> {
    match input {
        Value::Object(map) => Ok(map),
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            _ => Err(JwtError::Serialization(
                "claims input is not a JSON object".to_string(),
            )),
        },
        _ => Err(JwtError::Serialization(
            "claims input is not a JSON object".to_string(),
        )),
    }
}

fn text_from_input(input: Value) -> Result<String> {
    match input {
        Value::String(text) => Ok(text),
        _ => Err(JwtError::malformed("decode input must be text")),
    }
}
