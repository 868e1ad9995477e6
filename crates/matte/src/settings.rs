use std::{fs, path::Path};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::StrategyKind,
    error::Result,
    filter::BackgroundMatteFilter,
    types::{ColorPolicy, Predicate, ThresholdConfig, DEFAULT_LOWER, DEFAULT_UPPER},
};

/// Declarative filter settings, loadable from TOML or JSON.
///
/// Bounds are kept as plain integers so that out-of-range values surface as
/// configuration errors rather than parse errors.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MatteSettings {
    #[schemars(description = "Per-channel lower bound of the background color (R, G, B)")]
    pub lower: [i64; 3],
    #[schemars(description = "Per-channel upper bound of the background color (R, G, B)")]
    pub upper: [i64; 3],
    pub predicate: Predicate,
    pub background_color: ColorPolicy,
    pub strategy: StrategyKind,
}

impl Default for MatteSettings {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER.map(i64::from),
            upper: DEFAULT_UPPER.map(i64::from),
            predicate: Predicate::default(),
            background_color: ColorPolicy::default(),
            strategy: StrategyKind::default(),
        }
    }
}

impl MatteSettings {
    /// Get the JSON schema for the settings file
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(MatteSettings)
    }

    /// Validated threshold box
    pub fn threshold(&self) -> Result<ThresholdConfig> {
        ThresholdConfig::from_raw(self.lower, self.upper)
    }

    /// Build a filter from these settings
    pub fn build_filter(&self) -> Result<BackgroundMatteFilter> {
        BackgroundMatteFilter::builder()
            .threshold(self.threshold()?)
            .predicate(self.predicate)
            .color_policy(self.background_color)
            .strategy(self.strategy)
            .build()
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Convert settings to a pretty JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
