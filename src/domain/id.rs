use std::{fmt, num::NonZeroUsize, str::FromStr};

use serde::{Deserialize, Serialize};

/// Identifier of a book in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(NonZeroUsize);

/// Identifier of a library member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(NonZeroUsize);

impl BookId {
    /// Wraps a raw, non-zero identifier.
    #[must_use]
    pub const fn new(id: NonZeroUsize) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl MemberId {
    /// Wraps a raw, non-zero identifier.
    #[must_use]
    pub const fn new(id: NonZeroUsize) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a member ID cannot be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid member ID '{0}': expected a positive integer")]
pub struct ParseIdError(String);

impl FromStr for MemberId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<NonZeroUsize>()
            .map(Self)
            .map_err(|_| ParseIdError(s.to_string()))
    }
}

/// Hands out sequential identifiers, one counter per entity kind.
///
/// Both counters start at zero, so the first book and the first member are
/// each numbered 1. Identifiers are never handed out twice, even after the
/// entity they named has been removed.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    books: usize,
    members: usize,
}

impl IdAllocator {
    /// Creates an allocator with both counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            books: 0,
            members: 0,
        }
    }

    /// Allocates the next book identifier.
    pub fn next_book(&mut self) -> BookId {
        self.books += 1;
        BookId(Self::non_zero(self.books))
    }

    /// Allocates the next member identifier.
    pub fn next_member(&mut self) -> MemberId {
        self.members += 1;
        MemberId(Self::non_zero(self.members))
    }

    // counters are incremented before use, so they are never zero here
    const fn non_zero(value: usize) -> NonZeroUsize {
        match NonZeroUsize::new(value) {
            Some(id) => id,
            None => NonZeroUsize::MIN,
        }
    }
}
