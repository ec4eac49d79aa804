//! Domain models for the library catalog.
//!
//! This module contains the core record types: books, members, their levels
//! and identifiers, and the catalog that owns them.

mod book;
pub use book::Book;

/// The catalog aggregate and its operations.
pub mod catalog;
pub use catalog::{BorrowError, Catalog, CatalogError, ReturnError};

mod config;
pub use config::Config;

mod id;
pub use id::{BookId, IdAllocator, MemberId, ParseIdError};

mod level;
pub use level::{Level, LevelError};

/// Members and the borrowing rule.
pub mod member;
pub use member::Member;
