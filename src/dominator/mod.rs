//! Domination forests over the values of one resource entry.
//!
//! For every product an entry has values for, [`DominatorTree`] builds a tree rooted at a
//! synthetic node. Each real node stands for one [`ResourceConfigValue`] and is placed under
//! the most specific node whose configuration dominates it, so a parent's configuration
//! dominates every configuration below it and siblings never dominate one another.
//!
//! Nodes live in a single arena and refer to each other by [`NodeId`]. Inserting a node
//! that dominates existing children moves those children under it, which only rewrites
//! indices.
//!
//! # Usage Examples
//!
//! ```rust
//! use resforge::config::ConfigDescription;
//! use resforge::dominator::{DominatorTree, PrettyPrinter};
//! use resforge::table::ResourceConfigValue;
//!
//! let values: Vec<_> = ["", "land", "sw600dp-land-v13"]
//!     .iter()
//!     .map(|q| ResourceConfigValue::new(q.parse::<ConfigDescription>().unwrap(), ""))
//!     .collect();
//!
//! let tree = DominatorTree::new(&values);
//! let mut printer = PrettyPrinter::default();
//! tree.accept(&mut printer);
//! assert_eq!(printer.output(), "<default>\n  land\n  sw600dp-land-v13\n");
//! ```

mod visitor;

pub use crate::utils::NodeId;
pub use visitor::{BottomUpVisitor, PrettyPrinter, Visitor};

use std::collections::BTreeMap;

use crate::{config::ConfigDescription, table::ResourceConfigValue};

/// A node of a [`DominatorTree`].
#[derive(Clone, Debug)]
pub struct Node {
    value: Option<usize>,
    config: ConfigDescription,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Returns the index of the value this node stands for in the slice the tree was built
    /// from, or `None` for a root.
    #[must_use]
    pub fn value(&self) -> Option<usize> {
        self.value
    }

    /// Returns the configuration of the value. Roots report the default configuration.
    #[must_use]
    pub fn config(&self) -> &ConfigDescription {
        &self.config
    }

    /// Returns the parent, or `None` for a root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true for the synthetic root of a product.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.value.is_none()
    }

    /// Returns true if this node may be an ancestor of `other`.
    ///
    /// A root dominates everything and is only dominated by a root; other nodes compare
    /// their configurations.
    #[must_use]
    pub fn dominates(&self, other: &Node) -> bool {
        if other.is_root() {
            return self.is_root();
        }
        if self.is_root() {
            return true;
        }
        self.config.dominates(&other.config)
    }
}

/// Per-product domination trees over the values of one entry.
#[derive(Clone, Debug, Default)]
pub struct DominatorTree {
    nodes: Vec<Node>,
    roots: BTreeMap<String, NodeId>,
}

impl DominatorTree {
    /// Builds the trees for `values`, typically [`crate::table::ResourceEntry::values`].
    ///
    /// Values are inserted in slice order; each lands under the product root of its
    /// product.
    #[must_use]
    pub fn new(values: &[ResourceConfigValue]) -> Self {
        let mut tree = DominatorTree::default();

        for (index, slot) in values.iter().enumerate() {
            let root = tree.root_for(&slot.product);
            let node = tree.push(Node {
                value: Some(index),
                config: slot.config,
                parent: None,
                children: Vec::new(),
            });
            tree.try_add_child(root, node);
        }

        tree
    }

    /// Returns the node `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the root of `product`, if the entry has values for it.
    #[must_use]
    pub fn root(&self, product: &str) -> Option<NodeId> {
        self.roots.get(product).copied()
    }

    /// Iterates over `(product, root)` pairs in product order.
    pub fn roots(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.roots
            .iter()
            .map(|(product, &root)| (product.as_str(), root))
    }

    /// Returns the number of value nodes, roots excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len() - self.roots.len()
    }

    /// Returns true if the tree holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls `visitor` once per product root, in product order.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for (product, &root) in &self.roots {
            visitor.visit_tree(self, product, root);
        }
    }

    /// Calls `visitor` for every value node, children before their parent, one product at
    /// a time in product order. Roots are not visited.
    pub fn accept_bottom_up<V: BottomUpVisitor + ?Sized>(&self, visitor: &mut V) {
        for &root in self.roots.values() {
            for &child in self.node(root).children() {
                self.visit_bottom_up(child, visitor);
            }
        }
    }

    fn visit_bottom_up<V: BottomUpVisitor + ?Sized>(&self, node: NodeId, visitor: &mut V) {
        for &child in self.node(node).children() {
            self.visit_bottom_up(child, visitor);
        }
        visitor.visit_config(self, node);
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn root_for(&mut self, product: &str) -> NodeId {
        if let Some(&root) = self.roots.get(product) {
            return root;
        }

        let root = self.push(Node {
            value: None,
            config: ConfigDescription::default_config(),
            parent: None,
            children: Vec::new(),
        });
        self.roots.insert(product.to_string(), root);
        root
    }

    fn node_dominates(&self, a: NodeId, b: NodeId) -> bool {
        self.node(a).dominates(self.node(b))
    }

    /// Offers `child` to `parent`. A non-root parent refuses a child it does not dominate.
    fn try_add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        debug_assert!(!self.node(child).is_root(), "a root cannot become a child");

        if !self.node(parent).is_root() && !self.node_dominates(parent, child) {
            return false;
        }
        self.add_child(parent, child);
        true
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(!self.node(child).is_root(), "a root cannot become a child");

        let siblings = std::mem::take(&mut self.nodes[parent.index()].children);
        let mut kept = Vec::with_capacity(siblings.len());
        for sibling in siblings {
            if self.node_dominates(child, sibling) {
                self.nodes[sibling.index()].parent = Some(child);
                self.nodes[child.index()].children.push(sibling);
            } else {
                kept.push(sibling);
            }
        }

        let dominator = kept
            .iter()
            .copied()
            .find(|&sibling| self.node_dominates(sibling, child));
        self.nodes[parent.index()].children = kept;

        match dominator {
            Some(dominator) => self.add_child(dominator, child),
            None => {
                self.nodes[child.index()].parent = Some(parent);
                self.nodes[parent.index()].children.push(child);
            }
        }
    }
}
