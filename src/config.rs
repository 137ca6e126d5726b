use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub email: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Abdulmelik Saylan".to_string(),
            title: "Full-Stack Developer".to_string(),
            email: "contact@abdulme.link".to_string(),
        }
    }
}

/// terminal settings handed over from the page as json.
/// every field is optional, missing ones fall back to the defaults below
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub user: String,
    pub host: String,
    /// initial working directory, also the floor for `cd ..`
    pub root: Vec<String>,
    pub filesystem_url: String,
    pub about_url: String,
    pub portfolio_url: String,
    pub history_limit: usize,
    pub columns: usize,
    pub animation_delay_ms: u32,
    pub animation_chunk: usize,
    pub animate_help: bool,
    pub theme: String,
    pub log_level: String,
    pub persist_session: bool,
    pub storage_key: String,
    pub links: Vec<Link>,
    pub profile: Profile,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            user: "guest".to_string(),
            host: "linkos".to_string(),
            root: vec!["home".to_string()],
            filesystem_url: "/api/filesystem".to_string(),
            about_url: "/api/about".to_string(),
            portfolio_url: "/api/portfolio".to_string(),
            history_limit: 100,
            columns: 80,
            animation_delay_ms: 10,
            animation_chunk: 1,
            animate_help: true,
            theme: "default".to_string(),
            log_level: "info".to_string(),
            persist_session: true,
            storage_key: "terminal_session".to_string(),
            links: vec![
                Link { label: "GitHub".to_string(), url: "https://github.com/abdulmalik".to_string() },
                Link { label: "Portfolio".to_string(), url: "https://abdulme.link".to_string() },
                Link { label: "Email".to_string(), url: "mailto:contact@abdulme.link".to_string() },
            ],
            profile: Profile::default(),
        }
    }
}

impl TerminalConfig {
    /// parse config json, falling back to defaults when it's garbage
    pub fn from_json(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<TerminalConfig>(raw) {
            Ok(mut config) => {
                // an empty root would let `cd ..` underflow
                if config.root.is_empty() {
                    log::warn!("config: empty root, using defaults");
                    config.root = Self::default().root;
                }
                if config.animation_chunk == 0 {
                    config.animation_chunk = 1;
                }
                config
            }
            Err(e) => {
                log::warn!("config: ignoring invalid json ({})", e);
                Self::default()
            }
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TerminalConfig::from_json(r#"{"user": "visitor", "history_limit": 5}"#);
        assert_eq!(config.user, "visitor");
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.host, "linkos");
        assert_eq!(config.root, vec!["home".to_string()]);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert_eq!(TerminalConfig::from_json("{nope"), TerminalConfig::default());
        assert_eq!(TerminalConfig::from_json(""), TerminalConfig::default());
    }

    #[test]
    fn test_empty_root_is_rejected() {
        let config = TerminalConfig::from_json(r#"{"root": [], "animation_chunk": 0}"#);
        assert_eq!(config.root, vec!["home".to_string()]);
        assert_eq!(config.animation_chunk, 1);
    }

    #[test]
    fn test_log_level_parsing() {
        let config = TerminalConfig::from_json(r#"{"log_level": "debug"}"#);
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
        let config = TerminalConfig::from_json(r#"{"log_level": "loud"}"#);
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }
}
