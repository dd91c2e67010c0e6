// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # resforge
//!
//! The core data model of a build-time Android resource compiler: device configurations and
//! how they relate, the resource table, and the string pool with its binary chunk format.
//!
//! ## Features
//!
//! - **Configuration qualifiers** - Parse and print `values-<qualifiers>` directory suffixes
//!   with the runtime's matching, specificity and precedence rules
//! - **Domination** - Arrange the values of a resource in a tree where each parent makes its
//!   children redundant when the two hold equal values
//! - **Resource table** - A sorted `package → type → entry → config` namespace with collision
//!   policy, id assignment and visibility tracking
//! - **String pool** - Reference-counted interning with priority ordering, styled strings and
//!   `ResStringPool` serialization in UTF-8 or UTF-16
//! - **Optimization** - Deduplication of dominated values and exclusion of configurations
//!
//! ## Quick Start
//!
//! ```rust
//! use resforge::prelude::*;
//!
//! let config: ConfigDescription = "en-rUS-land-xhdpi".parse()?;
//! assert_eq!(config.to_string(), "en-rUS-land-xhdpi-v4");
//!
//! let mut pool = StringPool::new();
//! let greeting = pool.make_ref("hello");
//! let bytes = StringPool::flatten(&pool, true)?;
//!
//! let view = StringPoolView::from(&bytes)?;
//! assert_eq!(view.get(greeting.index())?, "hello");
//! # Ok::<(), resforge::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - [`config::ConfigDescription`], its qualifier grammar and relations
//! - [`dominator`] - [`dominator::DominatorTree`] over the values of one entry
//! - [`table`] - [`table::ResourceTable`] and the values it holds
//! - [`stringpool`] - [`stringpool::StringPool`] and its binary form
//! - [`optimize`] - Passes that shrink a table
//! - [`diagnostics`] - The sink every non-fatal problem is reported to
//!
//! ## Error Handling
//!
//! Operations on malformed input return [`Result`] with an [`Error`]. Table mutations never
//! fail that way: they report to [`diagnostics::Diagnostics`] and return `false`, so a caller
//! can collect every problem in a build before giving up.

#[macro_use]
pub(crate) mod error;
pub(crate) mod utils;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use resforge::prelude::*;
///
/// let mut table = ResourceTable::new();
/// let diag = Diagnostics::new();
/// let name: ResourceName = "app:string/title".parse()?;
/// let value = Value::new(ValueKind::Id);
/// assert!(table.add_resource(&name, &ConfigDescription::default(), "", value, &diag));
/// # Ok::<(), resforge::Error>(())
/// ```
pub mod prelude;

/// Collection of problems found while building a table.
///
/// Diagnostics are gathered in a lock-free append-only list so passes can report through a
/// shared reference. Each entry carries a severity, a category, a message and the source
/// location it refers to.
pub mod diagnostics;

/// Device configurations.
///
/// A [`config::ConfigDescription`] is the set of qualifiers a resource directory name
/// carries: locale, screen size and density, orientation, night mode, platform version and
/// so on. This module parses and prints qualifier strings and implements the relations the
/// runtime uses to pick a value for a device.
pub mod config;

/// Dominator trees over the configurations of one resource entry.
pub mod dominator;

/// Interned strings and the `ResStringPool` chunk.
pub mod stringpool;

/// The resource table and its values.
pub mod table;

/// Table optimization passes.
pub mod optimize;

/// `resforge` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `resforge` Error type
///
/// # Examples
///
/// ```rust
/// use resforge::{config::ConfigDescription, Error};
///
/// match ConfigDescription::parse_checked("land-en") {
///     Err(Error::InvalidConfig { qualifier, .. }) => assert_eq!(qualifier, "land-en"),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub use error::Error;
