pub mod game2048;
pub mod snake;
pub mod tetris;
pub mod typing;

use crate::editor::Key;

/// what a program wants after a keystroke or a clock tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramStep {
    /// keep the keyboard, write this frame
    Continue(String),
    /// hand the keyboard back to the prompt
    Exit { output: String, score: Option<u32> },
}

/// a full-screen program that owns the keyboard until it exits
pub trait Program {
    fn name(&self) -> &str;

    /// where the best score is kept, defaults to the program name
    fn score_key(&self) -> String {
        self.name().to_string()
    }

    /// first frame, written when the program is launched
    fn start(&mut self) -> String;

    fn on_key(&mut self, key: &Key) -> ProgramStep;

    /// milliseconds until the next clock tick, `None` for programs that
    /// only move on keys. asked again before every tick
    fn tick_interval(&self) -> Option<u32> {
        None
    }

    fn on_tick(&mut self) -> ProgramStep {
        ProgramStep::Continue(String::new())
    }
}

/// (name, description) for the `games` listing
pub const GAMES: &[(&str, &str)] = &[
    ("snake", "Classic snake game"),
    ("tetris", "Block puzzle game"),
    ("typing", "Typing speed test"),
    ("2048", "Number puzzle game"),
];

/// banner used by the real-time games when they end
pub(crate) fn game_over_banner(title: &str) -> String {
    let mut out = String::from("\x1b[2J\x1b[H\r\n");
    let blank = format!("\x1b[41m\x1b[37m{}\x1b[0m\r\n", " ".repeat(36));
    out.push_str(&blank);
    out.push_str(&format!("\x1b[41m\x1b[37m{}\x1b[0m\r\n", crate::render::center(title, 36)));
    out.push_str(&blank);
    out.push_str("\r\n");
    out
}
