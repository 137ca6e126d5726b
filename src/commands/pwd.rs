use crate::command::{Command, CommandResult, Execution};
use crate::session::TerminalSession;

/// pwd
/// Print the current working directory.
pub struct PwdCommand;

impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn description(&self) -> &'static str {
        "Print the current directory"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        let path = session.path.render();
        session.writeln(&path);
        Ok(Execution::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};

    #[test]
    fn test_pwd() {
        let mut s = session();
        assert_eq!(run(&PwdCommand, &[], &mut s).unwrap(), "home\r\n");
        s.path.push("projects");
        assert_eq!(run(&PwdCommand, &[], &mut s).unwrap(), "home/projects\r\n");
    }
}
