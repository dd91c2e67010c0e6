//! Arena node identifiers.
//!
//! The dominator tree stores its nodes in a single vector and links them by index, so that
//! re-parenting a subtree during construction is an index update instead of an ownership
//! transfer. [`NodeId`] is the strongly-typed index into that arena.

use std::fmt;

/// A strongly-typed identifier for a node inside an arena-backed tree.
///
/// `NodeId` wraps a `usize` index, providing type safety to prevent accidental mixing of
/// node indices with other integer values such as string pool indices. Node IDs are
/// assigned sequentially starting from 0 as nodes are allocated.
///
/// # Examples
///
/// ```rust
/// use resforge::dominator::NodeId;
///
/// let node = NodeId::new(5);
/// assert_eq!(node.index(), 5);
/// assert_eq!(node.to_string(), "n5");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Creates a new `NodeId` from a raw index value.
    ///
    /// Normal usage should obtain `NodeId` values from the tree that owns the arena.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the raw index value of this node identifier.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

impl From<NodeId> for usize {
    #[inline]
    fn from(node: NodeId) -> Self {
        node.0
    }
}
