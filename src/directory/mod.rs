//! Keyword tables ("directories").
//!
//! A directory is a static, ordered table of keywords. Several entries may
//! share a name and differ only in arity; the first entry whose name and
//! arity both match a typed line is the one that runs. Entries without a
//! handler are display-only: they contribute help text but never dispatch.
//!
//! Tables are meant to live in `static` items so that pointer identity can
//! tell whether a given directory is still the active one.

use crate::error::ArgError;

// Sub-modules
pub mod dispatch;

pub use dispatch::{CommandContext, Dispatcher, Label, exit};

/// Command handler.
///
/// Receives the full token list (`argv[0]` is the command name). Returning
/// `ArgError::Invalid(k)` names `argv[k]` as the bad token.
pub type Handler<X> = fn(&mut CommandContext<'_, X>, &[&str]) -> Result<(), ArgError>;

/// Number of arguments (excluding the name) an entry accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many
    Exact(usize),

    /// Any count; the handler validates
    Any,
}

impl Arity {
    /// Check if `received` arguments satisfy this arity.
    pub fn accepts(&self, received: usize) -> bool {
        match *self {
            Arity::Exact(n) => n == received,
            Arity::Any => true,
        }
    }
}

/// One entry in a keyword table.
pub struct Keyword<X: 'static> {
    /// Command name as typed
    pub name: &'static str,

    /// Handler; `None` for display-only entries
    pub handler: Option<Handler<X>>,

    /// Accepted argument count
    pub arity: Arity,

    /// Usage text printed by `name ?`
    pub help: Option<&'static str>,

    /// One-line summary for `?` listings (falls back to `help`)
    pub brief: Option<&'static str>,
}

impl<X: 'static> Keyword<X> {
    /// Callable entry.
    pub const fn new(
        name: &'static str,
        handler: Handler<X>,
        arity: Arity,
        help: &'static str,
    ) -> Self {
        Self {
            name,
            handler: Some(handler),
            arity,
            help: Some(help),
            brief: None,
        }
    }

    /// Display-only entry: listed and described, never dispatched.
    pub const fn display_only(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            handler: None,
            arity: Arity::Any,
            help: Some(help),
            brief: None,
        }
    }

    /// Callable overload that adds no help text of its own.
    pub const fn overload(name: &'static str, handler: Handler<X>, arity: Arity) -> Self {
        Self {
            name,
            handler: Some(handler),
            arity,
            help: None,
            brief: None,
        }
    }

    /// Set the one-line summary.
    pub const fn with_brief(mut self, brief: &'static str) -> Self {
        self.brief = Some(brief);
        self
    }

    /// Check if this entry can be dispatched.
    pub fn is_callable(&self) -> bool {
        self.handler.is_some()
    }

    /// Text for `?` listings.
    pub fn summary(&self) -> &'static str {
        self.brief.or(self.help).unwrap_or("")
    }
}

impl<X: 'static> core::fmt::Debug for Keyword<X> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Keyword")
            .field("name", &self.name)
            .field("callable", &self.handler.is_some())
            .field("arity", &self.arity)
            .finish()
    }
}

/// Keyword table.
pub struct Directory<X: 'static> {
    /// Directory name (for logging)
    pub name: &'static str,

    /// Entries in dispatch order
    pub keywords: &'static [Keyword<X>],
}

impl<X: 'static> Directory<X> {
    /// All entries with this name, in table order.
    pub fn find<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Keyword<X>> + 'a {
        self.keywords.iter().filter(move |k| k.name == name)
    }

    /// First entry of each distinct name, in table order.
    pub fn listing(&self) -> impl Iterator<Item = &Keyword<X>> {
        self.keywords
            .iter()
            .enumerate()
            .filter(|(i, k)| !self.keywords[..*i].iter().any(|prev| prev.name == k.name))
            .map(|(_, k)| k)
    }
}

impl<X: 'static> core::fmt::Debug for Directory<X> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Directory")
            .field("name", &self.name)
            .field("keywords", &self.keywords.len())
            .finish()
    }
}
