//! # resforge Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the resforge library. Import this module to get quick access to the essential
//! types for building and optimizing resource tables.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all resforge operations
pub use crate::Error;

/// The result type used throughout resforge
pub use crate::Result;

/// Sink for non-fatal problems and verbose notes
pub use crate::diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics, Source,
};

// ================================================================================================
// Configurations
// ================================================================================================

/// A parsed set of configuration qualifiers
pub use crate::config::ConfigDescription;

/// Bitmask of configuration axes two configurations differ on
pub use crate::config::ConfigFlags;

/// Ordered axes used to break ties between incomparable configurations
pub use crate::config::PrecedenceAxis;

// ================================================================================================
// String Pool
// ================================================================================================

/// Interning pool and its reference handles
pub use crate::stringpool::{Context, StringPool, StringRef, StyleRef};

/// Styled string input
pub use crate::stringpool::{StyleSpan, StyleString};

/// Read access to a flattened `ResStringPool` chunk
pub use crate::stringpool::StringPoolView;

// ================================================================================================
// Resource Table
// ================================================================================================

/// The table and its levels
pub use crate::table::{
    ResourceConfigValue, ResourceEntry, ResourceTable, ResourceTablePackage, ResourceTableType,
};

/// Resource identities
pub use crate::table::{ResourceId, ResourceName, ResourceType};

/// Values held by the table
pub use crate::table::{
    Attribute, AttributeTypeMask, BinaryPrimitive, Reference, Value, ValueKind,
};

/// Visibility declarations
pub use crate::table::{Symbol, Visibility};

/// Policy for a value added to an occupied slot
pub use crate::table::{resolve_value_collision, CollisionResult};

// ================================================================================================
// Dominator Tree
// ================================================================================================

/// Tree of configurations ordered by domination
pub use crate::dominator::{DominatorTree, Node, NodeId};

/// Traversal interfaces and the text renderer
pub use crate::dominator::{BottomUpVisitor, PrettyPrinter, Visitor};

// ================================================================================================
// Optimization
// ================================================================================================

/// Pass driver and its configuration
pub use crate::optimize::{OptimizeConfig, OptimizeStats, Optimizer};

/// Individual passes
pub use crate::optimize::{ResourceDeduper, ResourceExcluder, TablePass};
