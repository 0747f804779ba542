//! Governance configuration

use std::time::Duration;

/// What happens to a scheduled resolution when its session is torn down
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TeardownPolicy {
    /// Abort the pending resolution; the store is left untouched
    #[default]
    Cancel,
    /// Let the resolution fire and mutate the store unobserved
    LetFire,
}

/// Governance configuration
#[derive(Clone, Debug)]
pub struct GovernanceConfig {
    /// Delay between casting a ballot and applying the outcome
    pub resolution_delay: Duration,
    /// Fate of an in-flight resolution on session teardown
    pub teardown: TeardownPolicy,
    /// Approval shown on the result banner. Cosmetic; no tally is computed.
    pub displayed_approval_pct: u8,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        GovernanceConfig {
            resolution_delay: Duration::from_millis(2500),
            teardown: TeardownPolicy::Cancel,
            displayed_approval_pct: 82,
        }
    }
}

impl GovernanceConfig {
    /// Resolve on the next scheduler turn
    pub fn instant() -> Self {
        GovernanceConfig {
            resolution_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.resolution_delay = delay;
        self
    }

    pub fn with_teardown(mut self, teardown: TeardownPolicy) -> Self {
        self.teardown = teardown;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GovernanceConfig::default();
        assert_eq!(config.resolution_delay, Duration::from_millis(2500));
        assert_eq!(config.teardown, TeardownPolicy::Cancel);
        assert_eq!(config.displayed_approval_pct, 82);
    }

    #[test]
    fn test_builders() {
        let config = GovernanceConfig::instant().with_teardown(TeardownPolicy::LetFire);
        assert_eq!(config.resolution_delay, Duration::ZERO);
        assert_eq!(config.teardown, TeardownPolicy::LetFire);

        let config = config.with_delay(Duration::from_secs(1));
        assert_eq!(config.resolution_delay, Duration::from_secs(1));
    }
}
