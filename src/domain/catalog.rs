//! The library's catalog of books and members.
//!
//! The [`Catalog`] owns every [`Book`] and [`Member`]. Members refer to the
//! books they hold by [`BookId`], so all borrowing goes through the catalog,
//! which resolves both sides before applying the member's borrowing rule.

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    Book, BookId, IdAllocator, Level, Member, MemberId,
    member::{Ineligible, NotBorrowed},
};

/// Errors from member maintenance operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No member has the given identifier.
    #[error("member {0} not found")]
    MemberNotFound(MemberId),
}

/// Reasons a borrow request did not go through.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BorrowError {
    /// No member has the given identifier.
    #[error("member {0} not found")]
    MemberNotFound(MemberId),
    /// No book has the given title.
    #[error("book '{0}' not found")]
    BookNotFound(String),
    /// Both exist, but the member may not borrow the book.
    #[error(transparent)]
    Ineligible(#[from] Ineligible),
}

/// Reasons a return request did not go through.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReturnError {
    /// No member has the given identifier.
    #[error("member {0} not found")]
    MemberNotFound(MemberId),
    /// No book has the given title.
    #[error("book '{0}' not found")]
    BookNotFound(String),
    /// The member does not hold any book with the given title.
    #[error(transparent)]
    NotBorrowed(#[from] NotBorrowed),
}

/// In-memory store of all books and members.
///
/// Collections keep insertion order and are searched linearly.
#[derive(Debug, Default)]
pub struct Catalog {
    books: Vec<Book>,
    members: Vec<Member>,
    ids: IdAllocator,
}

impl Catalog {
    /// Creates an empty catalog whose identifiers start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new, available book to the catalog.
    #[instrument(level = "debug", skip(self))]
    pub fn add_book(&mut self, title: &str, author: &str, level: Level) -> &Book {
        let id = self.ids.next_book();
        let book = Book::new(id, title.to_string(), author.to_string(), level);
        self.books.push(book);
        info!(%id, "book added");
        self.books
            .last()
            .unwrap_or_else(|| unreachable!("book {id} was just added"))
    }

    /// Registers a new member holding no books.
    #[instrument(level = "debug", skip(self))]
    pub fn add_member(&mut self, name: &str, email: &str, level: Level) -> &Member {
        let id = self.ids.next_member();
        let member = Member::new(id, name.to_string(), email.to_string(), level);
        self.members.push(member);
        info!(%id, "member added");
        self.members
            .last()
            .unwrap_or_else(|| unreachable!("member {id} was just added"))
    }

    /// All books, in the order they were added.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All members, in the order they were added.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Looks up a book by identifier.
    #[must_use]
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Returns the first book whose title matches exactly.
    ///
    /// Titles are not unique; later books with the same title are shadowed.
    #[must_use]
    pub fn find_book_by_title(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.title == title)
    }

    /// Looks up a member by identifier.
    #[must_use]
    pub fn find_member_by_id(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Replaces a member's name, email and level.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MemberNotFound`] if no member has the
    /// identifier. The catalog is left unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn edit_member(
        &mut self,
        id: MemberId,
        name: &str,
        email: &str,
        level: Level,
    ) -> Result<&Member, CatalogError> {
        let member = self
            .members
            .iter_mut()
            .find(|member| member.id == id)
            .ok_or(CatalogError::MemberNotFound(id))?;

        member.name = name.to_string();
        member.email = email.to_string();
        member.level = level;
        info!(%id, "member updated");
        Ok(&*member)
    }

    /// Removes a member, returning the removed record.
    ///
    /// Books the member still holds are *not* returned: they stay unavailable
    /// with no holder. Use [`Catalog::delete_member_and_release`] to put them
    /// back on the shelf.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MemberNotFound`] if no member has the
    /// identifier.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_member(&mut self, id: MemberId) -> Result<Member, CatalogError> {
        let position = self
            .members
            .iter()
            .position(|member| member.id == id)
            .ok_or(CatalogError::MemberNotFound(id))?;

        let member = self.members.remove(position);
        if !member.borrowed.is_empty() {
            warn!(
                %id,
                held = member.borrowed.len(),
                "deleted member still held books"
            );
        }
        info!(%id, "member deleted");
        Ok(member)
    }

    /// Removes a member and marks every book they held as available.
    ///
    /// The returned member still lists the released books.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MemberNotFound`] if no member has the
    /// identifier.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_member_and_release(&mut self, id: MemberId) -> Result<Member, CatalogError> {
        let position = self
            .members
            .iter()
            .position(|member| member.id == id)
            .ok_or(CatalogError::MemberNotFound(id))?;

        let member = self.members.remove(position);
        for book in self
            .books
            .iter_mut()
            .filter(|book| member.borrowed.contains(&book.id))
        {
            book.is_available = true;
            debug!(book = %book.id, "released on member deletion");
        }
        info!(%id, "member deleted");
        Ok(member)
    }

    /// Lends the first book titled `title` to the member.
    ///
    /// # Errors
    ///
    /// Returns [`BorrowError::MemberNotFound`] or [`BorrowError::BookNotFound`]
    /// if either side is missing, and [`BorrowError::Ineligible`] if the
    /// member may not borrow the book. Nothing changes on error.
    #[instrument(level = "debug", skip(self))]
    pub fn borrow(&mut self, member_id: MemberId, title: &str) -> Result<&Book, BorrowError> {
        let member = self
            .members
            .iter_mut()
            .find(|member| member.id == member_id)
            .ok_or(BorrowError::MemberNotFound(member_id))?;
        let book = self
            .books
            .iter_mut()
            .find(|book| book.title == title)
            .ok_or_else(|| BorrowError::BookNotFound(title.to_string()))?;

        if let Err(reason) = member.borrow(book) {
            debug!(%reason, "borrow refused");
            return Err(reason.into());
        }
        info!(member = %member_id, book = %book.id, "book borrowed");
        Ok(&*book)
    }

    /// Takes back the first book titled `title` from the member.
    ///
    /// # Errors
    ///
    /// Returns [`ReturnError::MemberNotFound`] or [`ReturnError::BookNotFound`]
    /// if either side is missing, and [`ReturnError::NotBorrowed`] if the
    /// member does not hold the book. Nothing changes on error.
    #[instrument(level = "debug", skip(self))]
    pub fn return_book(&mut self, member_id: MemberId, title: &str) -> Result<&Book, ReturnError> {
        let member = self
            .members
            .iter_mut()
            .find(|member| member.id == member_id)
            .ok_or(ReturnError::MemberNotFound(member_id))?;
        let book = self
            .books
            .iter_mut()
            .find(|book| book.title == title)
            .ok_or_else(|| ReturnError::BookNotFound(title.to_string()))?;

        if let Err(reason) = member.return_book(book) {
            debug!(%reason, "return refused");
            return Err(reason.into());
        }
        info!(member = %member_id, book = %book.id, "book returned");
        Ok(&*book)
    }
}
