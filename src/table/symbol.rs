//! Symbol visibility of table entries.

use crate::diagnostics::Source;

/// Visibility of a resource outside its package.
///
/// Ordered so that a state can only move upwards: `Undefined < Private < Public`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum Visibility {
    /// Nothing declared
    #[default]
    Undefined,
    /// Declared private to the package
    Private,
    /// Declared public
    Public,
}

/// Declared symbol state of an entry or type.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Symbol {
    /// Visibility level
    pub state: Visibility,
    /// Overlays may add this entry even though the base does not define it
    pub allow_new: bool,
    /// Where the state was declared
    pub source: Source,
    /// Documentation comment of the declaration
    pub comment: String,
}

impl Symbol {
    /// Creates a symbol with the given visibility.
    #[must_use]
    pub fn new(state: Visibility) -> Self {
        Symbol {
            state,
            ..Symbol::default()
        }
    }

    /// Sets the declaration source.
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// Sets the `allow_new` flag.
    #[must_use]
    pub fn with_allow_new(mut self, allow_new: bool) -> Self {
        self.allow_new = allow_new;
        self
    }

    /// Folds `incoming` into this state.
    ///
    /// `allow_new` can only be switched on. An undefined or lower visibility leaves the
    /// state alone; otherwise the state, source and comment are replaced.
    pub(crate) fn merge(&mut self, incoming: &Symbol) {
        if incoming.allow_new {
            self.allow_new = true;
        }

        if incoming.state != Visibility::Undefined && incoming.state >= self.state {
            self.state = incoming.state;
            self.source = incoming.source.clone();
            self.comment = incoming.comment.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_only_goes_up() {
        let mut symbol = Symbol::new(Visibility::Private);
        symbol.merge(&Symbol::new(Visibility::Undefined));
        assert_eq!(symbol.state, Visibility::Private);

        symbol.merge(&Symbol::new(Visibility::Public).with_source(Source::new("public.xml")));
        assert_eq!(symbol.state, Visibility::Public);
        assert_eq!(symbol.source.path, "public.xml");

        symbol.merge(&Symbol::new(Visibility::Private).with_source(Source::new("other.xml")));
        assert_eq!(symbol.state, Visibility::Public);
        assert_eq!(symbol.source.path, "public.xml");
    }

    #[test]
    fn allow_new_is_sticky() {
        let mut symbol = Symbol::default();
        symbol.merge(&Symbol::default().with_allow_new(true));
        assert!(symbol.allow_new);
        assert_eq!(symbol.state, Visibility::Undefined);

        symbol.merge(&Symbol::new(Visibility::Private));
        assert!(symbol.allow_new);
    }
}
