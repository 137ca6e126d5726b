use serde::{Deserialize, Serialize};

pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const WHITE: &str = "\x1b[37m";
    pub const GRAY: &str = "\x1b[90m";
    pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[3J\x1b[H";

    pub fn paint(color: &str, text: &str) -> String {
        format!("{}{}{}", color, text, RESET)
    }
}

/// xterm colour scheme the page applies when the theme changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TerminalTheme {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub foreground: &'static str,
    pub background: &'static str,
    pub cursor: &'static str,
}

pub const THEMES: &[TerminalTheme] = &[
    TerminalTheme {
        key: "default",
        name: "LinkOS Default",
        description: "Classic macOS-inspired terminal",
        foreground: "#f0f0f0",
        background: "#1e1e1e",
        cursor: "#ffffff",
    },
    TerminalTheme {
        key: "matrix",
        name: "Matrix",
        description: "Green rain on black",
        foreground: "#00ff41",
        background: "#000000",
        cursor: "#00ff41",
    },
    TerminalTheme {
        key: "retro",
        name: "Retro Amber",
        description: "Amber phosphor monitor",
        foreground: "#ffb000",
        background: "#1a1000",
        cursor: "#ffb000",
    },
    TerminalTheme {
        key: "apple-ii",
        name: "Apple II",
        description: "Green screen from 1977",
        foreground: "#33ff33",
        background: "#0a0a0a",
        cursor: "#33ff33",
    },
    TerminalTheme {
        key: "alien",
        name: "ABDULMELINK",
        description: "Retro-futuristic ship computer",
        foreground: "#7fffd4",
        background: "#000805",
        cursor: "#7fffd4",
    },
];

pub fn find(key: &str) -> Option<&'static TerminalTheme> {
    THEMES.iter().find(|t| t.key == key)
}

/// light/dark mode of the surrounding desktop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SiteTheme {
    Light,
    #[default]
    Dark,
}

impl SiteTheme {
    pub fn toggled(self) -> Self {
        match self {
            SiteTheme::Light => SiteTheme::Dark,
            SiteTheme::Dark => SiteTheme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SiteTheme::Light => "light",
            SiteTheme::Dark => "dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_theme() {
        assert_eq!(find("matrix").map(|t| t.name), Some("Matrix"));
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_site_theme_toggle() {
        assert_eq!(SiteTheme::default().toggled(), SiteTheme::Light);
        assert_eq!(SiteTheme::Light.toggled().as_str(), "dark");
    }
}
