//! Search pipeline configuration

use crate::error::{Result, ScoutError};
use crate::filter::DEFAULT_DISPLAY_CAP;
use crate::query::ThresholdPolicy;
use serde::{Deserialize, Serialize};

/// Default number of nearest neighbours fetched before filtering
pub const DEFAULT_FAN_OUT: usize = 50;

/// Search configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Candidates requested from the index. Over-fetching leaves headroom
    /// for the experience filter.
    pub fan_out: usize,
    /// Maximum results returned to the presentation layer
    pub display_cap: usize,
    pub threshold_policy: ThresholdPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fan_out: DEFAULT_FAN_OUT,
            display_cap: DEFAULT_DISPLAY_CAP,
            threshold_policy: ThresholdPolicy::AnyNumber,
        }
    }
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.fan_out == 0 {
            return Err(ScoutError::Configuration("fan_out must be at least 1".into()));
        }
        if self.display_cap == 0 {
            return Err(ScoutError::Configuration(
                "display_cap must be at least 1".into(),
            ));
        }
        if self.fan_out < self.display_cap {
            tracing::warn!(
                fan_out = self.fan_out,
                display_cap = self.display_cap,
                "fan_out below display_cap; results can never fill the cap"
            );
        }
        Ok(())
    }
}

/// Builder for [`SearchConfig`]
#[derive(Debug, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn fan_out(mut self, fan_out: usize) -> Self {
        self.config.fan_out = fan_out;
        self
    }

    pub fn display_cap(mut self, cap: usize) -> Self {
        self.config.display_cap = cap;
        self
    }

    pub fn threshold_policy(mut self, policy: ThresholdPolicy) -> Self {
        self.config.threshold_policy = policy;
        self
    }

    /// Validate and return the config
    pub fn build(self) -> Result<SearchConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.fan_out, 50);
        assert_eq!(cfg.display_cap, 50);
        assert_eq!(cfg.threshold_policy, ThresholdPolicy::AnyNumber);
    }

    #[test]
    fn builder_validates() {
        let cfg = SearchConfig::builder()
            .fan_out(200)
            .display_cap(20)
            .threshold_policy(ThresholdPolicy::RequireUnit)
            .build()
            .unwrap();
        assert_eq!(cfg.fan_out, 200);
        assert_eq!(cfg.threshold_policy, ThresholdPolicy::RequireUnit);

        assert!(SearchConfig::builder().fan_out(0).build().is_err());
        assert!(SearchConfig::builder().display_cap(0).build().is_err());
    }
}
