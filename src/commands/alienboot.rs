use crate::command::{Command, CommandResult, Execution};
use crate::session::TerminalSession;
use crate::theme::ansi;

/// alienboot
/// Typed-out boot log of the ABDULMELINK ship computer.
pub struct AlienBootCommand;

const BAR_WIDTH: usize = 20;

const STAGES: &[(u32, &str)] = &[
    (15, "WEYLAND-YUTANI BIOS v6.0.0 INITIALIZED"),
    (30, "RUNNING SYSTEM DIAGNOSTICS..."),
    (45, "MEMORY CHECK: 262144KB OK"),
    (60, "LOADING MOTHER INTERFACE..."),
    (75, "MOUNTING NOSTROMO FILESYSTEM..."),
    (90, "ESTABLISHING NETWORK PROTOCOLS..."),
    (100, ">>> SYSTEM OPERATIONAL <<<"),
];

fn progress_bar(percent: u32) -> String {
    let filled = (percent as usize * BAR_WIDTH) / 100;
    format!("[{}{}] {:>3}%", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled), percent)
}

/// the boot log, one stage per line
pub fn boot_log() -> String {
    let mut out = String::new();
    for (percent, stage) in STAGES {
        out.push_str(&format!("{} {}\r\n", ansi::paint(ansi::GREEN, &progress_bar(*percent)), stage));
    }
    out.push_str("\r\n");
    out.push_str(&format!("{}\r\n", ansi::paint(ansi::GREEN, "✓ Boot sequence complete")));
    out.push_str(&format!("{}\r\n\r\n", ansi::paint(ansi::CYAN, "System online - ABDULMELINK operational")));
    out
}

impl Command for AlienBootCommand {
    fn name(&self) -> &'static str {
        "alienboot"
    }

    fn description(&self) -> &'static str {
        "Show ABDULMELINK boot screen"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        session.writeln("");
        session.write_info("Initiating ABDULMELINK boot sequence...");
        Ok(Execution::Animate(boot_log()))
    }
}
