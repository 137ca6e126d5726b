use crate::command::{Command, CommandResult, Execution};
use crate::session::TerminalSession;
use crate::theme::ansi;

/// mylinks
pub struct MyLinksCommand;

impl Command for MyLinksCommand {
    fn name(&self) -> &'static str {
        "mylinks"
    }

    fn description(&self) -> &'static str {
        "Show my links"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        if session.config.links.is_empty() {
            session.writeln("No links configured.");
            return Ok(Execution::Done);
        }
        let width = session.config.links.iter().map(|l| l.label.len()).max().unwrap_or(0) + 1;
        let lines: Vec<String> = session
            .config
            .links
            .iter()
            .map(|l| format!("  {} {}", ansi::paint(ansi::YELLOW, &format!("{:<width$}", format!("{}:", l.label), width = width)), l.url))
            .collect();
        for line in lines {
            session.writeln(&line);
        }
        Ok(Execution::Done)
    }
}
