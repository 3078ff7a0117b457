use std::fmt;
use std::str::FromStr;

/// Local storage key holding the only persisted preference.
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Class applied to `<body>`; dark is the unstyled default.
    pub fn body_class(self) -> &'static str {
        match self {
            Theme::Dark => "",
            Theme::Light => "light-theme",
        }
    }

    /// Font Awesome icon shown on the toggle button.
    pub fn icon_class(self) -> &'static str {
        match self {
            Theme::Dark => "fas fa-moon",
            Theme::Light => "fas fa-sun",
        }
    }

    /// Anything other than a stored `light` falls back to dark.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|raw| raw.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme {other:?}")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
