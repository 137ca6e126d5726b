use crate::command::{Command, CommandResult, Execution};
use crate::session::TerminalSession;
use crate::theme::ansi;

/// clear
/// Wipe the screen and the scrollback.
pub struct ClearCommand;

impl Command for ClearCommand {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn description(&self) -> &'static str {
        "Clear the terminal"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        session.write(ansi::CLEAR_SCREEN);
        Ok(Execution::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};

    #[test]
    fn test_clear_sequence() {
        let mut s = session();
        assert_eq!(run(&ClearCommand, &[], &mut s).unwrap(), "\x1b[2J\x1b[3J\x1b[H");
    }
}
