use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A coarse access tier shared by books and members.
///
/// A member may only borrow a book of exactly the same level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Level A.
    A,
    /// Level B.
    B,
    /// Level C.
    C,
}

impl Level {
    /// All accepted levels, in display order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Returns the canonical (uppercase) single-letter form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the accepted levels.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid level '{0}': must be one of A, B or C")]
pub struct LevelError(String);

impl FromStr for Level {
    type Err = LevelError;

    /// Parses a level, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            _ => Err(LevelError(s.to_string())),
        }
    }
}

impl TryFrom<&str> for Level {
    type Error = LevelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("A", Level::A; "uppercase a")]
    #[test_case("b", Level::B; "lowercase b")]
    #[test_case("c", Level::C; "lowercase c")]
    fn parses_case_insensitively(input: &str, expected: Level) {
        assert_eq!(input.parse::<Level>().unwrap(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("D"; "outside set")]
    #[test_case("AB"; "two letters")]
    #[test_case(" A"; "leading whitespace")]
    fn rejects_anything_else(input: &str) {
        assert_eq!(input.parse::<Level>(), Err(LevelError(input.to_string())));
    }

    #[test]
    fn displays_uppercase() {
        let rendered: Vec<String> = Level::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["A", "B", "C"]);
    }

    #[test]
    fn error_display() {
        let error = "x".parse::<Level>().unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid level 'x': must be one of A, B or C"
        );
    }
}
