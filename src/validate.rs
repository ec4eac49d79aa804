//! Each predicate answers whether a raw value is acceptable for a field.
//! None of them trims or normalizes its input.

use std::sync::LazyLock;

use regex::Regex;

use crate::Level;

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z0-9]+$").expect("title pattern is valid"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9!@#$%^&*()_+{}\[\]:;<>,.?~_-]+$").expect("email pattern is valid")
});

/// A member name needs at least three characters.
#[must_use]
pub fn member_name(name: &str) -> bool {
    name.chars().count() >= 3
}

/// A book title needs at least three characters, all ASCII letters or digits.
#[must_use]
pub fn book_title(title: &str) -> bool {
    title.len() >= 3 && TITLE.is_match(title)
}

/// An author needs at least one letter or digit.
#[must_use]
pub fn author(author: &str) -> bool {
    author.chars().any(char::is_alphanumeric)
}

/// An email needs at least three characters from a restricted ASCII set.
///
/// This is a plausibility check, not an address parser.
#[must_use]
pub fn email(email: &str) -> bool {
    email.len() >= 3 && EMAIL.is_match(email)
}

/// A level must be one of A, B or C, in either case.
#[must_use]
pub fn level(level: &str) -> bool {
    level.parse::<Level>().is_ok()
}
