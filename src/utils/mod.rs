//! Shared low-level helpers: byte I/O for the pool format, checked conversions and the arena
//! node identifier used by the dominator tree.

pub(crate) mod io;
pub(crate) mod math;
pub(crate) mod node;

pub use node::NodeId;
pub(crate) use math::{to_u32, to_usize};
