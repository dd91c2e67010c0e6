//! Values stored under a resource configuration.

use std::fmt;

use bitflags::bitflags;

use crate::{
    diagnostics::Source,
    stringpool::{StringRef, StyleRef},
    table::{ResourceId, ResourceName},
};

bitflags! {
    /// The formats an attribute accepts.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct AttributeTypeMask : u32 {
        /// A reference to another resource
        const REFERENCE = 0x0001;
        /// A string
        const STRING = 0x0002;
        /// An integer
        const INTEGER = 0x0004;
        /// A boolean
        const BOOLEAN = 0x0008;
        /// A color
        const COLOR = 0x0010;
        /// A floating point value
        const FLOAT = 0x0020;
        /// A dimension
        const DIMENSION = 0x0040;
        /// A fraction
        const FRACTION = 0x0080;
        /// One value out of an enumeration
        const ENUM = 0x0001_0000;
        /// A combination of flags
        const FLAGS = 0x0002_0000;
    }
}

impl AttributeTypeMask {
    /// Accepts every format; attribute uses that do not declare a format carry this mask.
    pub const TYPE_ANY: AttributeTypeMask = AttributeTypeMask::from_bits_retain(0x0000_ffff);
}

/// An attribute declaration or use.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Attribute {
    /// Accepted formats
    pub type_mask: AttributeTypeMask,
    /// Smallest accepted integer, if bounded
    pub min_int: Option<i32>,
    /// Largest accepted integer, if bounded
    pub max_int: Option<i32>,
}

impl Attribute {
    /// Creates an attribute accepting `type_mask` with no integer bounds.
    #[must_use]
    pub fn new(type_mask: AttributeTypeMask) -> Self {
        Attribute {
            type_mask,
            min_int: None,
            max_int: None,
        }
    }
}

/// A reference to another resource, by name, id or both.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Reference {
    /// Referenced name
    pub name: Option<ResourceName>,
    /// Referenced id
    pub id: Option<ResourceId>,
    /// True for `?attr` theme references
    pub is_attribute: bool,
    /// True for `@*` private references
    pub private_reference: bool,
}

/// A primitive value in its runtime encoding.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BinaryPrimitive {
    /// Runtime data type code
    pub data_type: u8,
    /// Raw data
    pub data: u32,
}

impl BinaryPrimitive {
    /// Integer in decimal notation
    pub const TYPE_INT_DEC: u8 = 0x10;
    /// Integer in hexadecimal notation
    pub const TYPE_INT_HEX: u8 = 0x11;
    /// Boolean, zero or 0xffffffff
    pub const TYPE_INT_BOOLEAN: u8 = 0x12;
    /// Color as `#aarrggbb`
    pub const TYPE_INT_COLOR_ARGB8: u8 = 0x1c;

    /// Creates a primitive.
    #[must_use]
    pub fn new(data_type: u8, data: u32) -> Self {
        BinaryPrimitive { data_type, data }
    }

    /// Creates a decimal integer.
    #[must_use]
    pub fn int(value: i32) -> Self {
        Self::new(Self::TYPE_INT_DEC, value as u32)
    }

    /// Creates a boolean.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::new(Self::TYPE_INT_BOOLEAN, if value { 0xffff_ffff } else { 0 })
    }
}

/// The payload of a [`Value`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ValueKind {
    /// A reference to another resource
    Reference(Reference),
    /// A plain string
    String(StringRef),
    /// A string with formatting spans
    StyledString(StyleRef),
    /// A path to a file compiled next to the table
    FileReference(StringRef),
    /// A primitive
    Primitive(BinaryPrimitive),
    /// An attribute declaration or use
    Attribute(Attribute),
    /// A bare identifier
    Id,
}

/// A value held by a [`crate::table::ResourceConfigValue`].
///
/// Weak values are provisional: any strong value replaces them on collision. Identifiers
/// are always weak.
///
/// # Examples
///
/// ```rust
/// use resforge::table::{BinaryPrimitive, Value, ValueKind};
///
/// let a = Value::new(ValueKind::Primitive(BinaryPrimitive::int(7)));
/// let mut b = a.clone();
/// b.comment = "different comment, same value".to_string();
/// assert!(a.equals(&b));
/// assert!(Value::id().is_weak());
/// ```
#[derive(Clone, Debug)]
pub struct Value {
    /// Where the value was defined
    pub source: Source,
    /// Documentation comment
    pub comment: String,
    /// Provisional value
    pub weak: bool,
    /// Payload
    pub kind: ValueKind,
}

impl Value {
    /// Creates a strong value without a source.
    #[must_use]
    pub fn new(kind: ValueKind) -> Self {
        let weak = matches!(kind, ValueKind::Id);
        Value {
            source: Source::default(),
            comment: String::new(),
            weak,
            kind,
        }
    }

    /// Creates an identifier value.
    #[must_use]
    pub fn id() -> Self {
        Self::new(ValueKind::Id)
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// Marks the value weak or strong. Identifiers stay weak.
    #[must_use]
    pub fn with_weak(mut self, weak: bool) -> Self {
        self.weak = weak || matches!(self.kind, ValueKind::Id);
        self
    }

    /// Returns true if the value is provisional.
    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// Returns the attribute payload, if this is an attribute.
    #[must_use]
    pub fn as_attribute(&self) -> Option<&Attribute> {
        match &self.kind {
            ValueKind::Attribute(attr) => Some(attr),
            _ => None,
        }
    }

    /// Compares payloads by content, ignoring source, comment and weakness.
    ///
    /// Strings compare by text, styled strings by text and spans, so values interned in
    /// different pools can still be equal.
    #[must_use]
    pub fn equals(&self, other: &Value) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Reference(reference) => {
                let sigil = if reference.is_attribute { '?' } else { '@' };
                match (&reference.name, reference.id) {
                    (Some(name), _) => write!(f, "{sigil}{name}"),
                    (None, Some(id)) => write!(f, "{sigil}{id}"),
                    (None, None) => write!(f, "{sigil}null"),
                }
            }
            ValueKind::String(text) => write!(f, "\"{text}\""),
            ValueKind::StyledString(style) => write!(f, "(styled) \"{}\"", style.str()),
            ValueKind::FileReference(path) => write!(f, "(file) {path}"),
            ValueKind::Primitive(prim) => {
                write!(f, "(0x{:02x}) 0x{:08x}", prim.data_type, prim.data)
            }
            ValueKind::Attribute(attr) => write!(f, "(attr) type={:#x}", attr.type_mask.bits()),
            ValueKind::Id => write!(f, "(id)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        stringpool::{StringPool, StyleSpan, StyleString},
        table::ResourceType,
    };

    #[test]
    fn ids_are_weak() {
        assert!(Value::id().is_weak());
        assert!(Value::id().with_weak(false).is_weak());

        let value = Value::new(ValueKind::Primitive(BinaryPrimitive::boolean(true)));
        assert!(!value.is_weak());
        assert!(value.with_weak(true).is_weak());
    }

    #[test]
    fn equality_ignores_metadata() {
        let a = Value::new(ValueKind::Primitive(BinaryPrimitive::int(1)))
            .with_source(Source::with_line("a.xml", 1));
        let b = Value::new(ValueKind::Primitive(BinaryPrimitive::int(1)))
            .with_source(Source::with_line("b.xml", 2))
            .with_weak(true);
        let c = Value::new(ValueKind::Primitive(BinaryPrimitive::int(2)));

        assert!(a.equals(&b));
        assert!(!a.equals(&c));
        assert!(!a.equals(&Value::id()));
    }

    #[test]
    fn strings_compare_by_content_across_pools() {
        let mut first = StringPool::new();
        let mut second = StringPool::new();
        let _padding = second.make_ref("padding");

        let a = Value::new(ValueKind::String(first.make_ref("hello")));
        let b = Value::new(ValueKind::String(second.make_ref("hello")));
        let c = Value::new(ValueKind::String(second.make_ref("bye")));
        assert!(a.equals(&b));
        assert!(!a.equals(&c));

        let styled = StyleString {
            text: "hello".to_string(),
            spans: vec![StyleSpan::new("b", 0, 4)],
        };
        let d = Value::new(ValueKind::StyledString(first.make_style_ref(&styled)));
        let e = Value::new(ValueKind::StyledString(second.make_style_ref(&styled)));
        assert!(d.equals(&e));
        assert!(!a.equals(&d));
    }

    #[test]
    fn attribute_masks() {
        assert!(AttributeTypeMask::TYPE_ANY.contains(AttributeTypeMask::STRING));
        assert!(!AttributeTypeMask::TYPE_ANY.contains(AttributeTypeMask::ENUM));

        let attr = Value::new(ValueKind::Attribute(Attribute::new(
            AttributeTypeMask::STRING | AttributeTypeMask::REFERENCE,
        )));
        assert_eq!(
            attr.as_attribute().map(|a| a.type_mask),
            Some(AttributeTypeMask::STRING | AttributeTypeMask::REFERENCE)
        );
        assert!(Value::id().as_attribute().is_none());
    }

    #[test]
    fn display_forms() {
        let reference = Value::new(ValueKind::Reference(Reference {
            name: Some(ResourceName::new("", ResourceType::Color, "accent")),
            ..Reference::default()
        }));
        assert_eq!(reference.to_string(), "@color/accent");
        assert_eq!(Value::id().to_string(), "(id)");
        assert_eq!(
            Value::new(ValueKind::Primitive(BinaryPrimitive::int(16))).to_string(),
            "(0x10) 0x00000010"
        );
    }
}
