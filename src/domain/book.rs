use serde::Serialize;

use crate::domain::{BookId, Level};

/// A catalog item that can be lent to a member of the same level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub(crate) id: BookId,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) level: Level,
    /// Cleared while a member holds the book.
    pub(crate) is_available: bool,
}

impl Book {
    pub(crate) const fn new(id: BookId, title: String, author: String, level: Level) -> Self {
        Self {
            id,
            title,
            author,
            level,
            is_available: true,
        }
    }

    /// The book's identifier.
    #[must_use]
    pub const fn id(&self) -> BookId {
        self.id
    }

    /// The book's title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The book's author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// The level a member needs in order to borrow this book.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Whether the book is on the shelf.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.is_available
    }
}
