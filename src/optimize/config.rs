//! Optimization configuration
//!
//! Selects which table passes [`crate::optimize::Optimizer`] runs and how chatty they are.

use crate::{config::ConfigDescription, Result};

/// Configuration for table optimization
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct OptimizeConfig {
    /// Remove values whose configuration is dominated by an equal value
    pub enable_deduplication: bool,

    /// Remove values whose configuration carries every axis of an excluded configuration
    /// Has no effect while `excluded_configs` is empty
    pub enable_exclusion: bool,

    /// Configurations to exclude
    pub excluded_configs: Vec<ConfigDescription>,

    /// Drop entries and types left with no values, ids or visibility
    pub remove_empty_entries: bool,

    /// Emit an info diagnostic for every removed value
    pub verbose: bool,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            enable_deduplication: true,
            enable_exclusion: true,
            excluded_configs: Vec::new(),
            remove_empty_entries: false,
            verbose: false,
        }
    }
}

impl OptimizeConfig {
    /// Creates a configuration that leaves the table untouched
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enable_deduplication: false,
            enable_exclusion: false,
            excluded_configs: Vec::new(),
            remove_empty_entries: false,
            verbose: false,
        }
    }

    /// Creates a configuration that only deduplicates
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            enable_deduplication: true,
            enable_exclusion: false,
            excluded_configs: Vec::new(),
            remove_empty_entries: false,
            verbose: false,
        }
    }

    /// Creates a configuration that runs every pass and drops emptied entries
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            enable_deduplication: true,
            enable_exclusion: true,
            excluded_configs: Vec::new(),
            remove_empty_entries: true,
            verbose: false,
        }
    }

    /// Adds configurations to exclude, parsed from qualifier strings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] for the first string that does not parse.
    pub fn with_excluded<S: AsRef<str>>(mut self, qualifiers: &[S]) -> Result<Self> {
        for qualifier in qualifiers {
            let config = ConfigDescription::parse_checked(qualifier.as_ref())?;
            self.excluded_configs.push(config);
        }
        Ok(self)
    }

    /// Turns verbose notes on or off.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_optimize_config_presets() {
        let disabled = OptimizeConfig::disabled();
        assert!(!disabled.enable_deduplication);
        assert!(!disabled.enable_exclusion);
        assert!(!disabled.remove_empty_entries);

        let minimal = OptimizeConfig::minimal();
        assert!(minimal.enable_deduplication);
        assert!(!minimal.enable_exclusion);

        let aggressive = OptimizeConfig::aggressive();
        assert!(aggressive.enable_deduplication);
        assert!(aggressive.enable_exclusion);
        assert!(aggressive.remove_empty_entries);

        let default = OptimizeConfig::default();
        assert!(default.enable_deduplication);
        assert!(default.enable_exclusion);
        assert!(!default.verbose);
        assert!(default.excluded_configs.is_empty());
    }

    #[test]
    fn test_excluded_configs_are_parsed() {
        let config = OptimizeConfig::default()
            .with_excluded(&["night", "xxhdpi"])
            .unwrap()
            .with_verbose(true);
        assert_eq!(config.excluded_configs.len(), 2);
        assert_eq!(config.excluded_configs[0].to_string(), "night-v8");
        assert!(config.verbose);

        let err = OptimizeConfig::default().with_excluded(&["night", "bogus"]);
        assert!(matches!(err, Err(Error::InvalidConfig { token, .. }) if token == "bogus"));
    }
}
