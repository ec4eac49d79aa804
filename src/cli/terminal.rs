//! Terminal capability detection and utilities

use owo_colors::{OwoColorize, colors::css};

/// Widest the welcome banner is allowed to grow.
const MAX_BANNER_WIDTH: usize = 100;

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Width of the welcome banner: the terminal width, capped.
pub fn banner_width() -> usize {
    terminal_width().map_or(MAX_BANNER_WIDTH, |w| usize::from(w).min(MAX_BANNER_WIDTH))
}

/// Centres `text` in a line of dashes.
pub fn banner(text: &str, width: usize) -> String {
    format!("{text:-^width$}")
}

/// How a line of console feedback is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// A record was added, changed, lent or taken back.
    Done,
    /// A request was refused, or a deletion stranded some loans.
    Refused,
    /// Side notes: a fallback author, books put back on the shelf.
    Aside,
}

impl Tone {
    /// Styles `text` if stdout supports color.
    pub fn paint(self, text: &str) -> String {
        self.paint_if(text, supports_color())
    }

    fn paint_if(self, text: &str, color: bool) -> String {
        if !color {
            return text.to_string();
        }
        match self {
            Self::Done => text.fg::<css::Green>().to_string(),
            Self::Refused => text.fg::<css::Orange>().to_string(),
            Self::Aside => text.dimmed().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_centres_text() {
        assert_eq!(banner(" Hi ", 10), "--- Hi ---");
    }

    #[test]
    fn banner_never_truncates() {
        assert_eq!(banner(" Welcome ", 4), " Welcome ");
    }

    #[test]
    fn plain_when_color_is_off() {
        for tone in [Tone::Done, Tone::Refused, Tone::Aside] {
            assert_eq!(tone.paint_if("Book added.", false), "Book added.");
        }
    }

    #[test]
    fn each_tone_styles_differently() {
        let done = Tone::Done.paint_if("ok", true);
        let refused = Tone::Refused.paint_if("ok", true);
        let aside = Tone::Aside.paint_if("ok", true);

        for styled in [&done, &refused, &aside] {
            assert!(styled.starts_with('\u{1b}'));
            assert!(styled.contains("ok"));
        }
        assert_ne!(done, refused);
        assert_ne!(refused, aside);
        assert_ne!(done, aside);
    }

    #[test]
    fn banner_width_is_capped() {
        assert!(banner_width() <= MAX_BANNER_WIDTH);
    }
}
