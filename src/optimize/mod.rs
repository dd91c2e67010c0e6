//! Table optimization passes.
//!
//! Passes rewrite a [`ResourceTable`] in place, removing values no device can observe.
//! Removal happens in two steps: a pass first empties the value of a slot, then compacts
//! each entry it touched so the emptied slots disappear.
//!
//! # Architecture
//!
//! ```text
//! Optimizer (OptimizeConfig)
//!   ├─ ResourceExcluder   drop values for excluded configurations
//!   ├─ ResourceDeduper    drop values equal to a dominating value
//!   └─ prune_empty        drop entries and types left empty (optional)
//! ```
//!
//! Every pass implements [`TablePass`] and reports removed values as
//! [`crate::diagnostics::DiagnosticSeverity::Info`] notes when verbose.
//!
//! # Usage Examples
//!
//! ```rust
//! use resforge::prelude::*;
//!
//! let mut table = ResourceTable::new();
//! let diag = Diagnostics::new();
//! let name: ResourceName = "app:integer/columns".parse()?;
//! for (qualifiers, columns) in [("", 2), ("land", 2), ("night", 3), ("v21", 2)] {
//!     let value = Value::new(ValueKind::Primitive(BinaryPrimitive::int(columns)));
//!     table.add_resource(&name, &qualifiers.parse()?, "", value, &diag);
//! }
//!
//! let config = OptimizeConfig::default().with_excluded(&["night"])?;
//! let stats = Optimizer::new(config).run(&mut table, &diag);
//! assert_eq!(stats.excluded, 1);
//! assert_eq!(stats.deduplicated, 2);
//!
//! let (_, _, entry) = table.find_resource(&name).unwrap();
//! assert_eq!(entry.values().len(), 1);
//! # Ok::<(), resforge::Error>(())
//! ```

mod config;
mod dedupe;
mod exclude;

pub use config::OptimizeConfig;
pub use dedupe::ResourceDeduper;
pub use exclude::ResourceExcluder;

use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    table::ResourceTable,
};

/// A transformation over a whole resource table.
pub trait TablePass {
    /// Unique name for diagnostics.
    fn name(&self) -> &'static str;

    /// Get a description of what this pass does.
    fn description(&self) -> &'static str {
        "No description available"
    }

    /// Runs the pass, returning the number of values removed.
    ///
    /// # Arguments
    ///
    /// * `table` - The table to rewrite
    /// * `verbose` - Emit a note for every removed value
    /// * `diag` - Sink for notes
    fn run(&self, table: &mut ResourceTable, verbose: bool, diag: &Diagnostics) -> usize;
}

/// Counts of what an [`Optimizer`] run removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizeStats {
    /// Values removed for excluded configurations
    pub excluded: usize,
    /// Values removed as dominated duplicates
    pub deduplicated: usize,
    /// Entries removed because nothing was left in them
    pub empty_entries: usize,
}

impl OptimizeStats {
    /// Returns the number of values removed by all passes.
    #[must_use]
    pub fn values_removed(&self) -> usize {
        self.excluded + self.deduplicated
    }
}

/// Runs the passes an [`OptimizeConfig`] enables, in a fixed order.
///
/// Exclusion runs before deduplication so that an excluded value can never be the reason
/// another value is kept.
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizeConfig,
}

impl Optimizer {
    /// Creates an optimizer for `config`.
    #[must_use]
    pub fn new(config: OptimizeConfig) -> Self {
        Optimizer { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &OptimizeConfig {
        &self.config
    }

    /// Runs the enabled passes over `table`.
    pub fn run(&self, table: &mut ResourceTable, diag: &Diagnostics) -> OptimizeStats {
        let verbose = self.config.verbose;
        let mut stats = OptimizeStats::default();

        if self.config.enable_exclusion && !self.config.excluded_configs.is_empty() {
            let excluder = ResourceExcluder::new(&self.config.excluded_configs);
            stats.excluded = self.run_pass(&excluder, table, diag);
        }

        if self.config.enable_deduplication {
            stats.deduplicated = self.run_pass(&ResourceDeduper, table, diag);
        }

        if self.config.remove_empty_entries {
            stats.empty_entries = table.prune_empty();
            if verbose && stats.empty_entries > 0 {
                diag.info(
                    DiagnosticCategory::Optimize,
                    format!("removed {} empty entries", stats.empty_entries),
                );
            }
        }

        stats
    }

    fn run_pass(&self, pass: &dyn TablePass, table: &mut ResourceTable, diag: &Diagnostics) -> usize {
        let removed = pass.run(table, self.config.verbose, diag);
        if self.config.verbose {
            diag.info(
                DiagnosticCategory::Optimize,
                format!("{} removed {removed} values", pass.name()),
            );
        }
        removed
    }
}
