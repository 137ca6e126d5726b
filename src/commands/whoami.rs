use crate::command::{Command, CommandResult, Execution};
use crate::render::center;
use crate::session::TerminalSession;
use crate::theme::ansi;

/// whoami
/// Print the profile card.
pub struct WhoAmICommand;

const CARD_WIDTH: usize = 33;

impl Command for WhoAmICommand {
    fn name(&self) -> &'static str {
        "whoami"
    }

    fn description(&self) -> &'static str {
        "Display user information"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        let profile = session.config.profile.clone();
        let edge = ansi::paint(ansi::CYAN, "│");
        let bar = "─".repeat(CARD_WIDTH);
        session.writeln("");
        session.writeln(&ansi::paint(ansi::CYAN, &format!("╭{}╮", bar)));
        session.writeln(&format!("{}{}{}", edge, center(&ansi::paint(ansi::GREEN, &profile.name), CARD_WIDTH), edge));
        session.writeln(&format!("{}{}{}", edge, center(&ansi::paint(ansi::YELLOW, &profile.title), CARD_WIDTH), edge));
        session.writeln(&ansi::paint(ansi::CYAN, &format!("╰{}╯", bar)));
        session.writeln("");
        if !profile.email.is_empty() {
            session.writeln(&format!("  {} {}", ansi::paint(ansi::GREEN, "Email:"), profile.email));
        }
        let user = format!("{}@{}", session.config.user, session.config.host);
        session.writeln(&format!("  {} {}", ansi::paint(ansi::GREEN, "Session:"), user));
        session.writeln("");
        Ok(Execution::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};
    use crate::render::{strip_ansi, visible_width};

    #[test]
    fn test_whoami_card() {
        let mut s = session();
        let out = run(&WhoAmICommand, &[], &mut s).unwrap();
        let plain = strip_ansi(&out);
        assert!(plain.contains(&s.config.profile.name));
        assert!(plain.contains("Session: guest@linkos"));
        // box rows line up whatever the colours
        let rows: Vec<&str> = out.split("\r\n").filter(|l| l.contains('│')).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| visible_width(r) == CARD_WIDTH + 2));
    }
}
