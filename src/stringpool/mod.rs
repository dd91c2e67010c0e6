//! Interned string and style storage for compiled resources.
//!
//! Every string a compiled resource table references (string values, file paths, span tag
//! names) lives in a [`StringPool`] and is addressed by its dense pool index. Values hold
//! reference-counted handles ([`StringRef`], [`StyleRef`]) instead of indices, so the pool is
//! free to reorder, merge and prune its entries; after each such operation the handles report
//! their new index.
//!
//! # Architecture
//!
//! - [`StringPool`] - Owns the entries and styles, deduplicates plain strings
//! - [`StringRef`] / [`StyleRef`] - Counted handles, one live handle per holder
//! - [`Context`] - Priority and configuration hint used when sorting
//! - `writer` - [`StringPool::flatten`] into the binary pool format
//! - `reader` - [`StringPoolView`] over a flattened pool
//!
//! # Reference Counting
//!
//! Handles are `Rc` clones of the pool's own slot. The count of an entry is the number of
//! live handles excluding the pool's slot, so an entry with no handles has a count of zero
//! and is dropped by the next [`StringPool::prune`]. Nothing is removed eagerly.
//!
//! # Usage Examples
//!
//! ```rust
//! use resforge::stringpool::{StringPool, StyleSpan, StyleString};
//!
//! let mut pool = StringPool::new();
//! let hello = pool.make_ref("hello");
//! let again = pool.make_ref("hello");
//! assert_eq!(hello.index(), again.index());
//! assert_eq!(pool.len(), 1);
//!
//! let styled = pool.make_style_ref(&StyleString {
//!     text: "hello".to_string(),
//!     spans: vec![StyleSpan::new("b", 0, 4)],
//! });
//! assert_ne!(styled.index(), hello.index());
//!
//! let data = StringPool::flatten(&pool, true)?;
//! assert!(!data.is_empty());
//! # Ok::<(), resforge::Error>(())
//! ```

use std::{
    cell::Cell,
    cmp::Ordering,
    collections::{HashMap, HashSet},
    fmt,
    rc::Rc,
};

use widestring::{U16Str, U16String};

use crate::config::ConfigDescription;

mod reader;
mod writer;

pub use reader::StringPoolView;

/// Sorting hint attached to a pooled string.
///
/// Strings with a lower priority value sort first; the configuration groups strings that
/// are used by the same configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Context {
    /// Sort priority, lower first.
    pub priority: u32,
    /// Configuration of the value that references the string.
    pub config: ConfigDescription,
}

impl Context {
    /// Priority for strings that should come first.
    pub const HIGH_PRIORITY: u32 = 1;
    /// Priority of strings created without an explicit context.
    pub const NORMAL_PRIORITY: u32 = 0x7fff_ffff;
    /// Priority for strings that should come last.
    pub const LOW_PRIORITY: u32 = 0xffff_ffff;

    /// Creates a context with the given priority and the default configuration.
    #[must_use]
    pub fn with_priority(priority: u32) -> Self {
        Self {
            priority,
            config: ConfigDescription::default_config(),
        }
    }

    /// Creates a context with normal priority for the given configuration.
    #[must_use]
    pub fn with_config(config: ConfigDescription) -> Self {
        Self {
            priority: Self::NORMAL_PRIORITY,
            config,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::with_priority(Self::NORMAL_PRIORITY)
    }
}

/// One interned string.
#[derive(Debug)]
pub struct Entry {
    value: U16String,
    context: Context,
    index: Cell<usize>,
}

impl Entry {
    /// Returns the UTF-16 content.
    #[must_use]
    pub fn value(&self) -> &U16Str {
        &self.value
    }

    /// Returns the sorting context.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Returns the current dense index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index.get()
    }
}

/// Counted handle to a plain pool string.
///
/// Cloning the handle counts as an additional reference, dropping it releases one.
#[derive(Clone)]
pub struct StringRef(Rc<Entry>);

impl StringRef {
    /// Returns the current index of the string in its pool.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0.index()
    }

    /// Returns the UTF-16 content.
    #[must_use]
    pub fn value(&self) -> &U16Str {
        self.0.value()
    }

    /// Returns the sorting context.
    #[must_use]
    pub fn context(&self) -> &Context {
        self.0.context()
    }

    /// Returns the content as a Rust string, replacing unpaired surrogates.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        self.0.value.to_string_lossy()
    }

    /// Returns the number of live handles to this string, excluding the pool's own slot.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0).saturating_sub(1)
    }

    /// Returns true if both handles point at the same pool entry.
    #[must_use]
    pub fn ptr_eq(&self, other: &StringRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for StringRef {
    /// Handles compare by content, not by identity.
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for StringRef {}

impl fmt::Debug for StringRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringRef({}, {:?})", self.index(), self.to_string_lossy())
    }
}

impl fmt::Display for StringRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

/// A formatting span of a pooled style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Tag name, interned in the same pool as the style.
    pub name: StringRef,
    /// Index of the first UTF-16 unit the span covers.
    pub first_char: u32,
    /// Index of the last UTF-16 unit the span covers, inclusive.
    pub last_char: u32,
}

/// A styled string: a backing string entry plus its spans.
#[derive(Debug)]
pub struct StyleEntry {
    str: StringRef,
    spans: Vec<Span>,
}

impl StyleEntry {
    /// Returns the handle of the backing string.
    #[must_use]
    pub fn str(&self) -> &StringRef {
        &self.str
    }

    /// Returns the spans in insertion order.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }
}

/// Counted handle to a pooled style.
#[derive(Clone)]
pub struct StyleRef(Rc<StyleEntry>);

impl StyleRef {
    /// Returns the index of the backing string, which is also the style's index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0.str.index()
    }

    /// Returns the handle of the backing string.
    #[must_use]
    pub fn str(&self) -> &StringRef {
        &self.0.str
    }

    /// Returns the spans of the style.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.0.spans
    }

    /// Returns the number of live handles to this style, excluding the pool's own slot.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0).saturating_sub(1)
    }

    /// Returns true if both handles point at the same pool style.
    #[must_use]
    pub fn ptr_eq(&self, other: &StyleRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for StyleRef {
    /// Styles compare by text and spans, not by identity.
    fn eq(&self, other: &Self) -> bool {
        self.str() == other.str() && self.spans() == other.spans()
    }
}

impl Eq for StyleRef {}

impl fmt::Debug for StyleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleRef")
            .field("index", &self.index())
            .field("str", &self.str().to_string_lossy())
            .field("spans", &self.spans().len())
            .finish()
    }
}

/// Span description used to build a style, with an unpooled tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    /// Tag name such as `b` or `font;color=red`.
    pub name: String,
    /// Index of the first UTF-16 unit the span covers.
    pub first_char: u32,
    /// Index of the last UTF-16 unit the span covers, inclusive.
    pub last_char: u32,
}

impl StyleSpan {
    /// Creates a span description.
    pub fn new(name: impl Into<String>, first_char: u32, last_char: u32) -> Self {
        Self {
            name: name.into(),
            first_char,
            last_char,
        }
    }
}

/// A styled string before it is pooled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleString {
    /// The text.
    pub text: String,
    /// Formatting spans over `text`.
    pub spans: Vec<StyleSpan>,
}

/// Owner of interned strings and styles.
///
/// Plain strings are deduplicated by content and priority. Styled strings are never
/// deduplicated, since two spans over equal text still carry separate identities.
#[derive(Debug, Default)]
pub struct StringPool {
    strings: Vec<Rc<Entry>>,
    styles: Vec<Rc<StyleEntry>>,
    indexed: HashMap<(U16String, u32), usize>,
}

impl StringPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a plain string with the default context.
    pub fn make_ref(&mut self, value: &str) -> StringRef {
        self.make_ref_with_context(value, Context::default())
    }

    /// Interns a plain string with an explicit context.
    ///
    /// An existing entry with equal content and priority is reused; its original context
    /// is kept.
    pub fn make_ref_with_context(&mut self, value: &str, context: Context) -> StringRef {
        self.make_ref_impl(U16String::from_str(value), context, true)
    }

    /// Interns the content and context of a handle from another pool.
    pub fn make_ref_from(&mut self, other: &StringRef) -> StringRef {
        self.make_ref_impl(other.value().to_owned(), other.context().clone(), true)
    }

    fn make_ref_impl(&mut self, value: U16String, context: Context, unique: bool) -> StringRef {
        let key = (value, context.priority);
        if unique {
            if let Some(&position) = self.indexed.get(&key) {
                return StringRef(Rc::clone(&self.strings[position]));
            }
        }

        let position = self.strings.len();
        let entry = Rc::new(Entry {
            value: key.0.clone(),
            context,
            index: Cell::new(position),
        });
        self.strings.push(Rc::clone(&entry));
        if unique {
            self.indexed.insert(key, position);
        }

        StringRef(entry)
    }

    /// Adds a styled string with the default context.
    pub fn make_style_ref(&mut self, style: &StyleString) -> StyleRef {
        self.make_style_ref_with_context(style, Context::default())
    }

    /// Adds a styled string.
    ///
    /// The text always gets a fresh entry that is not reachable through deduplication; span
    /// names are interned as plain strings.
    pub fn make_style_ref_with_context(
        &mut self,
        style: &StyleString,
        context: Context,
    ) -> StyleRef {
        let text = self.make_ref_impl(U16String::from_str(&style.text), context, false);
        let spans = style
            .spans
            .iter()
            .map(|span| Span {
                name: self.make_ref(&span.name),
                first_char: span.first_char,
                last_char: span.last_char,
            })
            .collect();

        self.push_style(text, spans)
    }

    /// Copies a style from another pool into this one.
    pub fn make_style_ref_from(&mut self, other: &StyleRef) -> StyleRef {
        let text = self.make_ref_impl(
            other.str().value().to_owned(),
            other.str().context().clone(),
            false,
        );
        let spans = other
            .spans()
            .iter()
            .map(|span| Span {
                name: self.make_ref_from(&span.name),
                first_char: span.first_char,
                last_char: span.last_char,
            })
            .collect();

        self.push_style(text, spans)
    }

    fn push_style(&mut self, text: StringRef, spans: Vec<Span>) -> StyleRef {
        let style = Rc::new(StyleEntry { str: text, spans });
        self.styles.push(Rc::clone(&style));
        StyleRef(style)
    }

    /// Moves every entry and style of `other` into this pool.
    ///
    /// Handles created by `other` stay valid and now report indices in this pool. Entries
    /// are not deduplicated against the existing ones.
    pub fn merge(&mut self, mut other: StringPool) {
        self.strings.append(&mut other.strings);
        self.styles.append(&mut other.styles);
        self.reassign_indices();
    }

    /// Removes every entry and style that no handle references any more.
    ///
    /// Styles are pruned first, so the backing strings of dropped styles are released in
    /// the same pass.
    pub fn prune(&mut self) {
        self.styles.retain(|style| Rc::strong_count(style) > 1);
        self.strings.retain(|entry| Rc::strong_count(entry) > 1);
        self.reassign_indices();
    }

    /// Reorders the entries with `cmp`, then reorders styles to follow their backing
    /// strings.
    pub fn sort<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&Entry, &Entry) -> Ordering,
    {
        self.strings.sort_by(|a, b| cmp(&**a, &**b));
        self.reassign_indices();
        self.styles.sort_by_key(|style| style.str.index());
    }

    /// Sorts by context priority, then configuration, then content.
    pub fn sort_by_context(&mut self) {
        self.sort(|a, b| {
            a.context
                .priority
                .cmp(&b.context.priority)
                .then_with(|| a.context.config.cmp(&b.context.config))
                .then_with(|| a.value.as_slice().cmp(b.value.as_slice()))
        });
    }

    fn reassign_indices(&mut self) {
        self.indexed.clear();
        for (position, entry) in self.strings.iter().enumerate() {
            entry.index.set(position);
        }

        let styled: HashSet<usize> = self.styles.iter().map(|s| s.str.index()).collect();
        for (position, entry) in self.strings.iter().enumerate() {
            if styled.contains(&position) {
                continue;
            }
            self.indexed
                .entry((entry.value.clone(), entry.context.priority))
                .or_insert(position);
        }
    }

    /// Returns the number of string entries, styled ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if the pool holds no strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Returns the number of styles.
    #[must_use]
    pub fn styles_len(&self) -> usize {
        self.styles.len()
    }

    /// Iterates over the entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.strings.iter().map(|entry| entry.as_ref())
    }

    /// Iterates over the styles in their current order.
    pub fn styles(&self) -> impl Iterator<Item = &StyleEntry> {
        self.styles.iter().map(|style| style.as_ref())
    }
}
