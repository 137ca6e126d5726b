use crate::command::{Command, CommandResult, Execution};
use crate::session::{Effect, TerminalSession};

/// exit
/// Leave the alien ship computer, or ask the page to close the terminal.
pub struct ExitCommand;

impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Close the terminal"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        session.writeln("");
        if session.theme == "alien" {
            session.write_info("Exiting ABDULMELINK system...");
            session.theme = "default".to_string();
            session.emit(Effect::TerminalTheme { theme: "default".to_string() });
        } else {
            session.write_info("Closing terminal...");
            session.emit(Effect::CloseTerminal);
        }
        session.writeln("");
        Ok(Execution::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};
    use crate::render::strip_ansi;

    #[test]
    fn test_exit_closes_terminal() {
        let mut s = session();
        let out = strip_ansi(&run(&ExitCommand, &[], &mut s).unwrap());
        assert_eq!(out, "\r\nClosing terminal...\r\n\r\n");
        assert_eq!(s.take_effects(), vec![Effect::CloseTerminal]);
    }

    #[test]
    fn test_exit_leaves_alien_theme_first() {
        let mut s = session();
        s.theme = "alien".to_string();
        let out = strip_ansi(&run(&ExitCommand, &[], &mut s).unwrap());
        assert!(out.contains("Exiting ABDULMELINK system..."));
        assert_eq!(s.theme, "default");
        assert_eq!(s.take_effects(), vec![Effect::TerminalTheme { theme: "default".to_string() }]);
    }
}
