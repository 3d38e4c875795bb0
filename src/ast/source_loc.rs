use std::{fmt, path::PathBuf};

/// Where the translation unit came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// The unit was read from a file.
    File { path: PathBuf },
    /// The unit lives in memory, e.g. in tests.
    InMemory { name: String },
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File { path } => write!(f, "{}", path.display()),
            Source::InMemory { name } => write!(f, "{}", name),
        }
    }
}

impl Default for Source {
    fn default() -> Source {
        Source::InMemory {
            name: "<unknown>".to_string(),
        }
    }
}

impl Source {
    pub fn file(path: PathBuf) -> Source { Source::File { path } }

    pub fn in_memory(name: impl Into<String>) -> Source { Source::InMemory { name: name.into() } }
}

/// A location in the unit's source text.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub enum Loc {
    /// A byte offset into the source text.
    Offset(usize),

    /// No location information.
    #[default]
    None,
}

impl From<usize> for Loc {
    fn from(offset: usize) -> Loc { Loc::Offset(offset) }
}

impl Loc {
    pub fn offset(self) -> Option<usize> {
        match self {
            Loc::Offset(offset) => Some(offset),
            Loc::None => None,
        }
    }
}

impl fmt::Debug for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loc::Offset(offset) => write!(f, "{}", offset),
            Loc::None => write!(f, "<none>"),
        }
    }
}

/// A half-open span in the unit's source text.
///
/// Spans are location anchors only; the identity of an entity is its arena
/// id, never its span.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Loc,
    pub end: Loc,
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{:?}", self.start, self.end)
    }
}

impl Span {
    pub fn new(start: Loc, end: Loc) -> Span { Span { start, end } }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Span {
        Span::new(Loc::Offset(start), Loc::Offset(end))
    }
}
