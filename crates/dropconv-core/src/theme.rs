//! Light/dark theme state.

use std::fmt;

/// Visual color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Light scheme.
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl Theme {
    /// Value for the `data-scheme` attribute on `<html>`.
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Whether this is the dark scheme.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// Theme switcher driven by the OS preference and a manual toggle.
///
/// Either trigger recomputes the theme; the last one wins. Nothing is
/// persisted, so a reload starts from the OS preference again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    theme: Theme,
}

impl ThemeState {
    /// Initial state from the OS `prefers-color-scheme: dark` match.
    #[must_use]
    pub const fn from_os(prefers_dark: bool) -> Self {
        Self {
            theme: Theme::from_dark(prefers_dark),
        }
    }

    /// The OS preference changed.
    pub const fn os_changed(&mut self, prefers_dark: bool) {
        self.theme = Theme::from_dark(prefers_dark);
    }

    /// The manual toggle was flipped.
    pub const fn toggle(&mut self) {
        self.theme = Theme::from_dark(!self.theme.is_dark());
    }

    /// Current theme.
    #[must_use]
    pub const fn theme(self) -> Theme {
        self.theme
    }

    /// Checked state of the toggle control. Checked means light.
    #[must_use]
    pub const fn toggle_checked(self) -> bool {
        !self.theme.is_dark()
    }

    /// State class for the toggle icon.
    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self.theme {
            Theme::Light => "is-sun-icon",
            Theme::Dark => "is-moon-icon",
        }
    }
}
