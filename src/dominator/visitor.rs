//! Traversal interfaces over a [`DominatorTree`].

use std::fmt::Write;

use crate::dominator::{DominatorTree, NodeId};

/// Visits each product tree of a [`DominatorTree`], starting at its root.
pub trait Visitor {
    /// Called once per product with the synthetic root of that product.
    fn visit_tree(&mut self, tree: &DominatorTree, product: &str, root: NodeId);
}

/// Visits every value node of a [`DominatorTree`], children before parents.
///
/// Driven by [`DominatorTree::accept_bottom_up`]. By the time a node is visited, every
/// node below it already has been, so a pass may rely on the state it left in the subtree.
pub trait BottomUpVisitor {
    /// Called once per value node.
    fn visit_config(&mut self, tree: &DominatorTree, node: NodeId);
}

/// Renders the trees as indented configuration names, two spaces per level.
///
/// Roots are not printed; the default configuration prints as `<default>`.
#[derive(Debug, Default)]
pub struct PrettyPrinter {
    buffer: String,
}

impl PrettyPrinter {
    /// Returns everything printed so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.buffer
    }

    fn visit_node(&mut self, tree: &DominatorTree, node: NodeId, indent: usize) {
        let config = tree.node(node).config();
        for _ in 0..indent {
            self.buffer.push_str("  ");
        }
        if config.is_default() {
            self.buffer.push_str("<default>");
        } else {
            let _ = write!(self.buffer, "{config}");
        }
        self.buffer.push('\n');

        for &child in tree.node(node).children() {
            self.visit_node(tree, child, indent + 1);
        }
    }
}

impl Visitor for PrettyPrinter {
    fn visit_tree(&mut self, tree: &DominatorTree, _product: &str, root: NodeId) {
        for &child in tree.node(root).children() {
            self.visit_node(tree, child, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ConfigDescription, table::ResourceConfigValue};

    struct Order(Vec<String>);

    impl BottomUpVisitor for Order {
        fn visit_config(&mut self, tree: &DominatorTree, node: NodeId) {
            self.0.push(tree.node(node).config().to_string());
        }
    }

    struct Products(Vec<String>);

    impl Visitor for Products {
        fn visit_tree(&mut self, tree: &DominatorTree, product: &str, root: NodeId) {
            assert!(tree.node(root).is_root());
            self.0.push(product.to_string());
        }
    }

    fn slot(qualifiers: &str, product: &str) -> ResourceConfigValue {
        ResourceConfigValue::new(ConfigDescription::parse(qualifiers).unwrap(), product)
    }

    #[test]
    fn bottom_up_visits_children_first() {
        let values = vec![slot("", ""), slot("en", ""), slot("en-v21", ""), slot("land", "")];
        let tree = DominatorTree::new(&values);

        let mut order = Order(Vec::new());
        tree.accept_bottom_up(&mut order);
        assert_eq!(order.0, ["en-v21", "en", "land", ""]);
    }

    #[test]
    fn products_visited_in_sorted_order() {
        let values = vec![slot("", "tv"), slot("", ""), slot("", "phone")];
        let tree = DominatorTree::new(&values);

        let mut products = Products(Vec::new());
        tree.accept(&mut products);
        assert_eq!(products.0, ["", "phone", "tv"]);
    }
}
