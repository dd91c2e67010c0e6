//! Removal of values built for excluded configurations.

use crate::{
    config::{ConfigDescription, ConfigFlags},
    diagnostics::{DiagnosticCategory, Diagnostics},
    optimize::TablePass,
    table::{ResourceEntry, ResourceName, ResourceTable},
};

/// Drops every non-default value whose configuration sets all axes an excluded
/// configuration sets, to the same values.
///
/// Excluding `night` removes `night` and `land-night` but keeps `land` and `v8`. The
/// default configuration is never removed.
#[derive(Debug, Clone, Default)]
pub struct ResourceExcluder {
    excluded: Vec<(ConfigDescription, ConfigFlags)>,
}

impl ResourceExcluder {
    /// Creates an excluder for `configs`. Duplicates are ignored.
    #[must_use]
    pub fn new(configs: &[ConfigDescription]) -> Self {
        let default = ConfigDescription::default_config();
        let mut excluded: Vec<_> = configs
            .iter()
            .map(|config| (*config, default.diff(config)))
            .collect();
        excluded.sort_by(|a, b| a.0.cmp(&b.0));
        excluded.dedup_by(|a, b| a.0 == b.0);

        ResourceExcluder { excluded }
    }

    /// Returns true if a value under `config` would be removed.
    #[must_use]
    pub fn is_excluded(&self, config: &ConfigDescription) -> bool {
        if config.is_default() {
            return false;
        }

        self.excluded
            .iter()
            .any(|(excluded, axes)| (*axes & config.diff(excluded)).is_empty())
    }

    /// Removes the excluded values of one entry, returning how many were removed.
    pub fn exclude_entry(
        &self,
        name: &ResourceName,
        entry: &mut ResourceEntry,
        verbose: bool,
        diag: &Diagnostics,
    ) -> usize {
        for slot in entry.values_mut() {
            if !self.is_excluded(&slot.config) {
                continue;
            }
            let Some(value) = slot.value.take() else {
                continue;
            };
            if verbose {
                diag.info_at(
                    DiagnosticCategory::Optimize,
                    value.source.clone(),
                    format!(
                        "excluded resource \"{name}\" with config {}",
                        slot.config
                    ),
                );
            }
        }
        entry.compact()
    }
}

impl TablePass for ResourceExcluder {
    fn name(&self) -> &'static str {
        "exclude"
    }

    fn description(&self) -> &'static str {
        "Removes values for excluded configurations"
    }

    fn run(&self, table: &mut ResourceTable, verbose: bool, diag: &Diagnostics) -> usize {
        if self.excluded.is_empty() {
            return 0;
        }

        let mut removed = 0;
        table.visit_entries_mut(|name, entry| {
            removed += self.exclude_entry(name, entry, verbose, diag);
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Value, ValueKind};

    fn config(qualifiers: &str) -> ConfigDescription {
        ConfigDescription::parse(qualifiers).unwrap()
    }

    fn excluder(qualifiers: &[&str]) -> ResourceExcluder {
        let configs: Vec<_> = qualifiers.iter().map(|q| config(q)).collect();
        ResourceExcluder::new(&configs)
    }

    fn entry(qualifiers: &[&str]) -> ResourceEntry {
        let mut entry = ResourceEntry::new("x");
        for q in qualifiers {
            entry.find_or_create_value(&config(q), "").value = Some(Value::new(ValueKind::Id));
        }
        entry
    }

    fn configs(entry: &ResourceEntry) -> Vec<String> {
        let mut configs: Vec<_> = entry.values().iter().map(|v| v.config.to_string()).collect();
        configs.sort();
        configs
    }

    #[test]
    fn excludes_night() {
        let excluder = excluder(&["night"]);
        let mut entry = entry(&["", "land", "night", "land-night", "v8", "notnight"]);
        let name: ResourceName = "app:id/x".parse().unwrap();

        let removed = excluder.exclude_entry(&name, &mut entry, false, &Diagnostics::new());
        assert_eq!(removed, 2);
        assert_eq!(configs(&entry), ["", "land", "notnight-v8", "v8"]);
    }

    #[test]
    fn never_excludes_default() {
        let excluder = excluder(&[""]);
        assert!(!excluder.is_excluded(&ConfigDescription::default_config()));
        assert!(excluder.is_excluded(&config("land")));
    }

    #[test]
    fn multiple_axes_must_all_match() {
        let excluder = excluder(&["land-night"]);
        assert!(excluder.is_excluded(&config("land-night")));
        assert!(excluder.is_excluded(&config("en-land-night")));
        assert!(!excluder.is_excluded(&config("land")));
        assert!(!excluder.is_excluded(&config("night")));
        assert!(!excluder.is_excluded(&config("port-night")));
    }

    #[test]
    fn duplicates_collapse() {
        let excluder = excluder(&["night", "night", "xhdpi"]);
        assert_eq!(excluder.excluded.len(), 2);
        assert!(excluder.is_excluded(&config("xhdpi")));
        assert!(!excluder.is_excluded(&config("hdpi")));
    }

    #[test]
    fn verbose_notes() {
        let excluder = excluder(&["night"]);
        let mut entry = entry(&["", "night"]);
        let name: ResourceName = "app:id/x".parse().unwrap();
        let diag = Diagnostics::new();

        excluder.exclude_entry(&name, &mut entry, true, &diag);
        assert_eq!(diag.info_count(), 1);
        assert!(diag
            .iter()
            .any(|d| d.message == "excluded resource \"app:id/x\" with config night-v8"));
    }
}
