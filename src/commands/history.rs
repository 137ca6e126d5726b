use crate::command::{Command, CommandResult, Execution};
use crate::error::CommandError;
use crate::session::TerminalSession;

/// history [-c]
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn name(&self) -> &'static str {
        "history"
    }

    fn description(&self) -> &'static str {
        "Show command history (-c clears it)"
    }

    fn execute(&self, args: &[String], session: &mut TerminalSession) -> CommandResult {
        if args.is_empty() {
            let out = session
                .history
                .entries()
                .iter()
                .enumerate()
                .map(|(i, cmd)| format!("{:4}  {}\r\n", i + 1, cmd))
                .collect::<String>();
            session.write(&out);
            Ok(Execution::Done)
        } else if args.len() == 1 && args[0] == "-c" {
            session.history.clear();
            session.write_success("History cleared");
            Ok(Execution::Done)
        } else {
            Err(CommandError::Usage("history: usage: history [-c]".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};

    #[test]
    fn test_history_listing() {
        let mut s = session();
        s.history.push("ls");
        s.history.push("cd projects");
        assert_eq!(run(&HistoryCommand, &[], &mut s).unwrap(), "   1  ls\r\n   2  cd projects\r\n");
    }

    #[test]
    fn test_history_clear() {
        let mut s = session();
        s.history.push("ls");
        run(&HistoryCommand, &["-c"], &mut s).unwrap();
        assert!(s.history.is_empty());
        assert!(run(&HistoryCommand, &["-x"], &mut s).is_err());
    }
}
