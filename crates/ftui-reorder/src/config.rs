#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! [`ReorderConfig`] can be built in code or, with the `policy-config`
//! feature, loaded from TOML or JSON. Missing fields fall back to defaults.
//!
//! ```toml
//! locked_positions = [0]
//! collision_bounds = "half_open"
//! drag_enabled = true
//! drag_update_hysteresis = 2.0
//! ```

use std::collections::BTreeSet;
#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::CollisionBounds;

/// Tunables for a [`ReorderEngine`](crate::ReorderEngine).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReorderConfig {
    /// Order positions that never take part in a swap. Default: empty.
    pub locked_positions: BTreeSet<usize>,
    /// Edge policy for hit tests. Default: closed.
    pub collision_bounds: CollisionBounds,
    /// Master switch for starting drags. Default: true.
    pub drag_enabled: bool,
    /// Minimum pointer travel between two collision scans. Default: 0.
    pub drag_update_hysteresis: f32,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            locked_positions: BTreeSet::new(),
            collision_bounds: CollisionBounds::Closed,
            drag_enabled: true,
            drag_update_hysteresis: 0.0,
        }
    }
}

impl ReorderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn locked_positions(mut self, positions: impl IntoIterator<Item = usize>) -> Self {
        self.locked_positions = positions.into_iter().collect();
        self
    }

    #[must_use]
    pub fn collision_bounds(mut self, bounds: CollisionBounds) -> Self {
        self.collision_bounds = bounds;
        self
    }

    #[must_use]
    pub fn drag_enabled(mut self, enabled: bool) -> Self {
        self.drag_enabled = enabled;
        self
    }

    #[must_use]
    pub fn drag_update_hysteresis(mut self, hysteresis: f32) -> Self {
        self.drag_update_hysteresis = hysteresis;
        self
    }

    /// Whether `position` is locked.
    #[must_use]
    pub fn is_locked(&self, position: usize) -> bool {
        self.locked_positions.contains(&position)
    }

    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.drag_update_hysteresis.is_finite() {
            errors.push(format!(
                "drag_update_hysteresis must be finite, got {}",
                self.drag_update_hysteresis
            ));
        } else if self.drag_update_hysteresis < 0.0 {
            errors.push(format!(
                "drag_update_hysteresis must be >= 0, got {}",
                self.drag_update_hysteresis
            ));
        }

        errors
    }

    #[cfg(feature = "policy-config")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

/// Errors that can occur when loading a [`ReorderConfig`].
#[cfg(feature = "policy-config")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
