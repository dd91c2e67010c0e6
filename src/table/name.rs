//! Resource identities: types, names and packed numeric ids.

use std::{fmt, str::FromStr};

use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// The resource types a table can hold.
///
/// Variants are declared in the order the table sorts them; the string forms are the names
/// used in `package:type/entry` references.
///
/// # Examples
///
/// ```rust
/// use resforge::table::ResourceType;
///
/// let ty: ResourceType = "attr-private".parse().unwrap();
/// assert_eq!(ty, ResourceType::AttrPrivate);
/// assert_eq!(ResourceType::Drawable.to_string(), "drawable");
/// ```
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceType {
    /// Tween animations
    Anim,
    /// Property animators
    Animator,
    /// Untyped arrays
    Array,
    /// Attribute declarations
    Attr,
    /// Attributes private to the package
    #[strum(serialize = "attr-private")]
    AttrPrivate,
    /// Booleans
    Bool,
    /// Colors and color state lists
    Color,
    /// Dimensions
    Dimen,
    /// Drawables
    Drawable,
    /// Fonts and font families
    Font,
    /// Fractions
    Fraction,
    /// Identifiers
    Id,
    /// Integers
    Integer,
    /// Interpolators
    Interpolator,
    /// Layouts
    Layout,
    /// Menus
    Menu,
    /// Launcher icons
    Mipmap,
    /// Quantity strings
    Plurals,
    /// Raw files
    Raw,
    /// Strings
    String,
    /// Styles and themes
    Style,
    /// Declare-styleable groups
    Styleable,
    /// Scene transitions
    Transition,
    /// Arbitrary XML files
    Xml,
}

/// A fully qualified resource name, `package:type/entry`.
///
/// The package may be empty, meaning the package currently being compiled.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ResourceName {
    /// Package name, possibly empty
    pub package: String,
    /// Resource type
    pub ty: ResourceType,
    /// Entry name
    pub entry: String,
}

impl ResourceName {
    /// Creates a resource name from its parts.
    pub fn new(package: impl Into<String>, ty: ResourceType, entry: impl Into<String>) -> Self {
        ResourceName {
            package: package.into(),
            ty,
            entry: entry.into(),
        }
    }

    /// Returns true if every part except possibly the package is set.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.entry.is_empty()
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.package.is_empty() {
            write!(f, "{}:", self.package)?;
        }
        write!(f, "{}/{}", self.ty, self.entry)
    }
}

impl FromStr for ResourceName {
    type Err = Error;

    /// Parses `[@][package:]type/entry`.
    fn from_str(s: &str) -> Result<Self> {
        let body = s.strip_prefix('@').unwrap_or(s);
        let (package, rest) = match body.split_once(':') {
            Some((package, rest)) => (package, rest),
            None => ("", body),
        };

        let Some((ty, entry)) = rest.split_once('/') else {
            return Err(Error::InvalidResourceName(format!(
                "'{s}' is missing a type"
            )));
        };
        let ty = ResourceType::from_str(ty).map_err(|_| {
            Error::InvalidResourceName(format!("'{s}' has unknown type '{ty}'"))
        })?;
        if entry.is_empty() {
            return Err(Error::InvalidResourceName(format!(
                "'{s}' has an empty entry name"
            )));
        }

        Ok(ResourceName::new(package, ty, entry))
    }
}

/// A packed resource id, `0xPPTTEEEE`.
///
/// The package and type bytes are one-based, so a valid id never has a zero package or
/// type byte.
///
/// # Examples
///
/// ```rust
/// use resforge::table::ResourceId;
///
/// let id = ResourceId::from_parts(0x7f, 0x02, 0x0001);
/// assert_eq!(id.id, 0x7f02_0001);
/// assert!(id.is_valid());
/// assert_eq!(id.to_string(), "0x7f020001");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct ResourceId {
    /// The packed id value
    pub id: u32,
}

impl ResourceId {
    /// Wraps a raw packed id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        ResourceId { id }
    }

    /// Packs a package id, type id and entry id.
    #[must_use]
    pub const fn from_parts(package_id: u8, type_id: u8, entry_id: u16) -> Self {
        ResourceId {
            id: ((package_id as u32) << 24) | ((type_id as u32) << 16) | entry_id as u32,
        }
    }

    /// Returns true if both the package and type bytes are set.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.package_id() != 0 && self.type_id() != 0
    }

    /// Returns the package byte.
    #[must_use]
    pub const fn package_id(self) -> u8 {
        (self.id >> 24) as u8
    }

    /// Returns the type byte.
    #[must_use]
    pub const fn type_id(self) -> u8 {
        (self.id >> 16) as u8
    }

    /// Returns the entry half-word.
    #[must_use]
    pub const fn entry_id(self) -> u16 {
        self.id as u16
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.id)
    }
}

/// Returns true if `name` only uses letters, digits, `.`, `_` and `-`.
pub(crate) fn is_valid_entry_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Like [`is_valid_entry_name`], also admitting the `$` used by mangled names.
pub(crate) fn is_valid_mangled_entry_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | '$'))
}
