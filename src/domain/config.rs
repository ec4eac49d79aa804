use std::{num::NonZeroU8, path::Path};

use serde::{Deserialize, Serialize};

/// Configuration for the interactive session.
///
/// Every field has a default, so a file containing only the version tag is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// How many times the user may re-enter an invalid email, author or level
    /// before the command is abandoned.
    attempts: NonZeroU8,

    /// The author recorded for a new book when every author entry was
    /// rejected.
    fallback_author: String,

    /// Whether deleting a member puts the books they hold back on the shelf.
    ///
    /// When `false` (default) such books stay unavailable with no holder.
    pub release_loans_on_delete: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            fallback_author: default_fallback_author(),
            release_loans_on_delete: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the retry budget for re-prompted fields.
    #[must_use]
    pub const fn attempts(&self) -> u8 {
        self.attempts.get()
    }

    /// Sets the retry budget. Zero is raised to one.
    pub fn set_attempts(&mut self, attempts: u8) {
        self.attempts = NonZeroU8::new(attempts).unwrap_or(NonZeroU8::MIN);
    }

    /// Returns the author used when no valid author was entered.
    #[must_use]
    pub fn fallback_author(&self) -> &str {
        &self.fallback_author
    }
}

const fn default_attempts() -> NonZeroU8 {
    match NonZeroU8::new(3) {
        Some(attempts) => attempts,
        None => NonZeroU8::MIN,
    }
}

fn default_fallback_author() -> String {
    "Unknown".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        /// Retry budget for re-prompted fields.
        #[serde(default = "default_attempts")]
        attempts: NonZeroU8,

        #[serde(default = "default_fallback_author")]
        fallback_author: String,

        #[serde(default)]
        release_loans_on_delete: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                attempts,
                fallback_author,
                release_loans_on_delete,
            } => Self {
                attempts,
                fallback_author,
                release_loans_on_delete,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            attempts: config.attempts,
            fallback_author: config.fallback_author,
            release_loans_on_delete: config.release_loans_on_delete,
        }
    }
}
