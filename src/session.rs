use crate::config::TerminalConfig;
use crate::error::VfsError;
use crate::history::History;
use crate::path::PathState;
use crate::storage::{SessionSnapshot, SNAPSHOT_VERSION};
use crate::theme::{ansi, SiteTheme};
use crate::vfs::VirtualFileSystem;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// something the page around the terminal has to react to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Effect {
    OpenApp { app: String },
    SwitchSiteTheme { theme: SiteTheme },
    TerminalTheme { theme: String },
    CloseTerminal,
}

/// all per-terminal state the command handlers work on. output is
/// buffered here and flushed by the terminal after each step
pub struct TerminalSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    pub config: TerminalConfig,
    fs: Option<VirtualFileSystem>,
    pub path: PathState,
    pub history: History,
    pub theme: String,
    pub site_theme: SiteTheme,
    best_scores: HashMap<String, u32>,
    catalog: Vec<(String, String)>,
    out: String,
    effects: Vec<Effect>,
}

impl TerminalSession {
    pub fn new(config: TerminalConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            path: PathState::new(&config.root),
            history: History::new(config.history_limit),
            theme: config.theme.clone(),
            site_theme: SiteTheme::default(),
            best_scores: HashMap::new(),
            catalog: Vec::new(),
            fs: None,
            out: String::new(),
            effects: Vec::new(),
            config,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// first block of the session id, enough to tell sessions apart in logs
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn fs(&self) -> Result<&VirtualFileSystem, VfsError> {
        self.fs.as_ref().ok_or(VfsError::NotInitialized)
    }

    pub fn has_filesystem(&self) -> bool {
        self.fs.is_some()
    }

    pub fn set_filesystem(&mut self, fs: VirtualFileSystem) {
        self.fs = Some(fs);
    }

    /// (name, description) of every registered command, in help order
    pub fn catalog(&self) -> &[(String, String)] {
        &self.catalog
    }

    pub fn set_catalog(&mut self, catalog: Vec<(String, String)>) {
        self.catalog = catalog;
    }

    pub fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub fn writeln(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push_str("\r\n");
    }

    pub fn write_error(&mut self, text: &str) {
        self.writeln(&ansi::paint(ansi::RED, text));
    }

    pub fn write_success(&mut self, text: &str) {
        self.writeln(&ansi::paint(ansi::GREEN, text));
    }

    pub fn write_info(&mut self, text: &str) {
        self.writeln(&ansi::paint(ansi::CYAN, text));
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.out)
    }

    pub fn emit(&mut self, effect: Effect) {
        log::debug!("effect: {:?}", effect);
        self.effects.push(effect);
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn best_score(&self, game: &str) -> u32 {
        self.best_scores.get(game).copied().unwrap_or(0)
    }

    /// returns true on a new record
    pub fn record_score(&mut self, game: &str, score: u32) -> bool {
        let best = self.best_scores.entry(game.to_string()).or_insert(0);
        if score > *best {
            *best = score;
            true
        } else {
            false
        }
    }

    pub fn prompt(&self) -> String {
        format!(
            "{}{}@{}{}:{}{}{}$ ",
            ansi::GREEN,
            self.config.user,
            self.config.host,
            ansi::RESET,
            ansi::BLUE,
            self.path.render(),
            ansi::RESET
        )
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            history: self.history.entries().to_vec(),
            cwd: self.path.segments().to_vec(),
            theme: Some(self.theme.clone()),
            site_theme: Some(self.site_theme),
            best_scores: self.best_scores.clone(),
            saved_at: Utc::now(),
        }
    }

    /// apply a stored snapshot. the directory only comes back if it
    /// still exists in the current filesystem
    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        self.history.replace(snapshot.history);
        if let Some(theme) = snapshot.theme {
            self.theme = theme;
        }
        if let Some(site_theme) = snapshot.site_theme {
            self.site_theme = site_theme;
        }
        self.best_scores = snapshot.best_scores;

        let cwd_ok = match self.fs.as_ref() {
            Some(fs) => fs.resolve(&snapshot.cwd).map(|n| n.is_dir()).unwrap_or(false),
            None => false,
        };
        if cwd_ok {
            self.path.set(snapshot.cwd);
        } else if !snapshot.cwd.is_empty() {
            log::info!("session: stored cwd {:?} is gone, staying at root", snapshot.cwd);
        }
    }
}
