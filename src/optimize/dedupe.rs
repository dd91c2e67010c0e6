//! Removal of values made redundant by an equal value under a dominating configuration.

use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    dominator::{BottomUpVisitor, DominatorTree, NodeId},
    optimize::TablePass,
    table::{ResourceConfigValue, ResourceEntry, ResourceName, ResourceTable, Value},
};

/// Drops a value when its dominator tree parent holds an equal value.
///
/// A value is kept if a sibling whose configuration is compatible with it holds a different
/// value: removing it would let a device matching both fall back to the parent instead of
/// picking between the two.
///
/// # Examples
///
/// ```rust
/// use resforge::prelude::*;
///
/// let mut table = ResourceTable::new();
/// let diag = Diagnostics::new();
/// let name: ResourceName = "app:bool/flag".parse()?;
/// for qualifiers in ["", "land"] {
///     let value = Value::new(ValueKind::Primitive(BinaryPrimitive::boolean(true)));
///     table.add_resource(&name, &qualifiers.parse()?, "", value, &diag);
/// }
///
/// assert_eq!(ResourceDeduper.run(&mut table, false, &diag), 1);
/// let (_, _, entry) = table.find_resource(&name).unwrap();
/// assert_eq!(entry.values().len(), 1);
/// # Ok::<(), resforge::Error>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceDeduper;

impl ResourceDeduper {
    /// Deduplicates the values of one entry, returning how many were removed.
    pub fn dedupe_entry(
        name: &ResourceName,
        entry: &mut ResourceEntry,
        verbose: bool,
        diag: &Diagnostics,
    ) -> usize {
        let removed = {
            let tree = DominatorTree::new(entry.values());
            let mut remover = DominatedValueRemover {
                name,
                values: entry.values(),
                removed: vec![false; entry.values().len()],
                verbose,
                diag,
            };
            tree.accept_bottom_up(&mut remover);
            remover.removed
        };

        for (slot, removed) in entry.values_mut().iter_mut().zip(removed) {
            if removed {
                slot.value = None;
            }
        }
        entry.compact()
    }
}

impl TablePass for ResourceDeduper {
    fn name(&self) -> &'static str {
        "dedupe"
    }

    fn description(&self) -> &'static str {
        "Removes values equal to the value of a dominating configuration"
    }

    fn run(&self, table: &mut ResourceTable, verbose: bool, diag: &Diagnostics) -> usize {
        let mut removed = 0;
        table.visit_entries_mut(|name, entry| {
            removed += Self::dedupe_entry(name, entry, verbose, diag);
        });
        removed
    }
}

struct DominatedValueRemover<'a> {
    name: &'a ResourceName,
    values: &'a [ResourceConfigValue],
    removed: Vec<bool>,
    verbose: bool,
    diag: &'a Diagnostics,
}

impl<'a> DominatedValueRemover<'a> {
    /// Returns the value at `index` unless it is empty or already removed.
    fn live(&self, index: usize) -> Option<&'a Value> {
        if self.removed[index] {
            return None;
        }
        let values: &'a [ResourceConfigValue] = self.values;
        values[index].value.as_ref()
    }
}

impl BottomUpVisitor for DominatedValueRemover<'_> {
    fn visit_config(&mut self, tree: &DominatorTree, node: NodeId) {
        let node = tree.node(node);
        let Some(parent) = node.parent().map(|parent| tree.node(parent)) else {
            return;
        };
        let (Some(node_index), Some(parent_index)) = (node.value(), parent.value()) else {
            return;
        };
        let (Some(node_value), Some(parent_value)) =
            (self.live(node_index), self.live(parent_index))
        else {
            return;
        };

        for &sibling in parent.children() {
            let Some(sibling_index) = tree.node(sibling).value() else {
                continue;
            };
            let Some(sibling_value) = self.live(sibling_index) else {
                continue;
            };
            if node
                .config()
                .is_compatible_with(&self.values[sibling_index].config)
                && !node_value.equals(sibling_value)
            {
                return;
            }
        }

        if !parent_value.equals(node_value) {
            return;
        }

        if self.verbose {
            self.diag.info_at(
                DiagnosticCategory::Optimize,
                node_value.source.clone(),
                format!(
                    "removing dominated duplicate resource with name \"{}\"",
                    self.name
                ),
            );
            self.diag.info_at(
                DiagnosticCategory::Optimize,
                parent_value.source.clone(),
                "dominated here",
            );
        }
        self.removed[node_index] = true;
    }
}
