use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{Book, BookId, Level, MemberId};

/// A borrower registered with the library.
///
/// A member never owns the books it holds. It only records their identifiers;
/// the books themselves stay in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub(crate) id: MemberId,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) level: Level,
    pub(crate) borrowed: Vec<BookId>,
}

/// Reasons a member may not borrow a particular book.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Ineligible {
    /// The member's level differs from the book's level.
    #[error("a level {member} member cannot borrow a level {book} book")]
    LevelMismatch {
        /// Level of the member.
        member: Level,
        /// Level of the book.
        book: Level,
    },
    /// The book is already out on loan.
    #[error("the book is not available for borrowing")]
    Unavailable,
}

/// The member tried to return a book they do not hold.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("book {0} is not borrowed by this member")]
pub struct NotBorrowed(pub BookId);

impl Member {
    pub(crate) const fn new(id: MemberId, name: String, email: String, level: Level) -> Self {
        Self {
            id,
            name,
            email,
            level,
            borrowed: Vec::new(),
        }
    }

    /// The member's identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// The member's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The member's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The member's level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Identifiers of the books currently held, in borrowing order.
    #[must_use]
    pub fn borrowed(&self) -> &[BookId] {
        &self.borrowed
    }

    /// Whether the member currently holds the given book.
    #[must_use]
    pub fn holds(&self, book: BookId) -> bool {
        self.borrowed.contains(&book)
    }

    /// Checks whether this member may borrow `book`, without changing anything.
    ///
    /// # Errors
    ///
    /// Returns [`Ineligible::LevelMismatch`] if the levels differ, or
    /// [`Ineligible::Unavailable`] if the book is out on loan.
    pub fn check_eligibility(&self, book: &Book) -> Result<(), Ineligible> {
        if self.level != book.level {
            return Err(Ineligible::LevelMismatch {
                member: self.level,
                book: book.level,
            });
        }
        if !book.is_available {
            return Err(Ineligible::Unavailable);
        }
        Ok(())
    }

    /// Borrows `book`, marking it unavailable.
    ///
    /// Nothing changes if the member is not eligible.
    ///
    /// # Errors
    ///
    /// See [`Member::check_eligibility`].
    #[instrument(level = "debug", skip_all, fields(member = %self.id, book = %book.id))]
    pub fn borrow(&mut self, book: &mut Book) -> Result<(), Ineligible> {
        self.check_eligibility(book)?;
        self.borrowed.push(book.id);
        book.is_available = false;
        Ok(())
    }

    /// Returns `book`, marking it available again.
    ///
    /// # Errors
    ///
    /// Returns [`NotBorrowed`] if the member does not hold the book. Nothing
    /// changes in that case.
    #[instrument(level = "debug", skip_all, fields(member = %self.id, book = %book.id))]
    pub fn return_book(&mut self, book: &mut Book) -> Result<(), NotBorrowed> {
        let position = self
            .borrowed
            .iter()
            .position(|id| *id == book.id)
            .ok_or(NotBorrowed(book.id))?;
        self.borrowed.remove(position);
        book.is_available = true;
        Ok(())
    }
}
