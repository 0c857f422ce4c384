//! Terminal styling for text output.
//!
//! Colors are plain ANSI sequences; [`ColorPalette::detect`] drops them when
//! the environment asks for uncolored output.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for headings and names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements (ids, descriptions).
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for coordinates.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for distances.
    pub const GREEN: &str = "\x1b[32m";
}

/// Resolved color codes, either ANSI sequences or empty strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub heading: &'static str,
    pub muted: &'static str,
    pub coordinate: &'static str,
    pub distance: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            heading: colors::WHITE_BOLD,
            muted: colors::GRAY,
            coordinate: colors::CYAN,
            distance: colors::GREEN,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            heading: "",
            muted: "",
            coordinate: "",
            distance: "",
        }
    }

    /// `colored()` if the terminal supports ANSI colors, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects `NO_COLOR` (https://no-color.org/) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
