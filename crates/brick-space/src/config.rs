// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Space configuration.
//!
//! Configuration is a plain serde value. Front-ends persist it however they
//! like; this module only offers JSON helpers and validation.

use brick_geom::Basis;
use serde::{Deserialize, Serialize};

use crate::attributes::{standard_defaults, Attributes};
use crate::error::ConfigError;

/// Default number of primitive slots allocated up front.
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// Tunables for a [`crate::Space`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceConfig {
    /// Primitive slots allocated before the first growth.
    pub initial_capacity: usize,
    /// Mapping from caller `(width, height, depth)` to storage axes.
    pub axes: Basis,
    /// Attribute columns and their defaults.
    pub default_attributes: Attributes,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            axes: Basis::default(),
            default_attributes: standard_defaults(),
        }
    }
}

impl SpaceConfig {
    /// Checks the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.axes.is_permutation() {
            return Err(ConfigError::DegenerateBasis);
        }
        if self.default_attributes.keys().any(String::is_empty) {
            return Err(ConfigError::EmptyAttributeKey);
        }
        Ok(())
    }

    /// Parses and validates a JSON document. Missing fields take their
    /// defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
