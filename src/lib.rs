//! Library Catalog
//!
//! An in-memory catalog of books and members with level-gated borrowing.

pub mod domain;
pub use domain::{
    Book, BookId, BorrowError, Catalog, CatalogError, Config, Level, Member, MemberId,
    ReturnError,
};

pub mod validate;
