//! Job configuration as read by the scheduler.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::bca::DiffusionParams;
use crate::error::Result;
use crate::graph::Direction;

/// Diffusion variant to run per node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Uniform fan-out.
    #[default]
    Vanilla,
    /// Predicate-aware fan-out with memoized sub-results.
    Semantic,
    /// Weighted fan-out, ordered draining, per-edge pruning.
    Stable,
}

/// Everything a scheduler needs to launch jobs.
///
/// ```
/// use bca::config::{BcaConfig, Variant};
///
/// let config = BcaConfig::from_json_str(r#"{ "variant": "stable", "alpha": 0.2 }"#).unwrap();
/// assert_eq!(config.variant, Variant::Stable);
/// assert_eq!(config.epsilon, 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BcaConfig {
    /// Which variant runs.
    pub variant: Variant,
    /// Traversal direction; the semantic variant always runs forward.
    pub direction: Direction,
    /// Retention factor in `(0, 1)`.
    pub alpha: f64,
    /// Expansion cutoff, strictly positive.
    pub epsilon: f64,
}

impl Default for BcaConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Vanilla,
            direction: Direction::Forward,
            alpha: 0.1,
            epsilon: 1e-4,
        }
    }
}

impl BcaConfig {
    /// The validated numeric parameters.
    ///
    /// # Errors
    /// See [`DiffusionParams::validate`].
    pub fn params(&self) -> Result<DiffusionParams> {
        DiffusionParams::new(self.alpha, self.epsilon)
    }

    /// Checks the numeric parameters.
    ///
    /// # Errors
    /// See [`DiffusionParams::validate`].
    pub fn validate(&self) -> Result<()> {
        self.params().map(|_| ())
    }

    /// Parses and validates a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    /// Malformed JSON, unknown fields, or invalid parameters.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("failed to parse bca config")?;
        config.validate().context("invalid bca config")?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    ///
    /// # Errors
    /// I/O failures plus everything [`BcaConfig::from_json_str`] reports.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("in config {}", path.display()))
    }
}
