use crate::command::{Command, CommandResult, Execution};
use crate::session::TerminalSession;

/// help
/// List every registered command with its description.
pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "Show available commands"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        let mut output = String::from("Available commands:\r\n");
        for (name, description) in session.catalog() {
            output.push_str(&format!("- {}: {}\r\n", name, description));
        }
        if session.config.animate_help {
            return Ok(Execution::Animate(output));
        }
        session.write(&output);
        Ok(Execution::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandRegistry;
    use crate::commands::testing::{args, run, session};

    #[test]
    fn test_help_lists_catalog() {
        let mut s = session();
        s.set_catalog(CommandRegistry::default_commands().catalog());
        let out = run(&HelpCommand, &[], &mut s).unwrap();
        assert!(out.starts_with("Available commands:\r\n- help: Show available commands\r\n"));
        assert!(out.contains("- cd: Change the current directory\r\n"));
    }

    #[test]
    fn test_help_is_animated_when_configured() {
        let mut s = session();
        s.config.animate_help = true;
        s.set_catalog(vec![("pwd".to_string(), "Print the current directory".to_string())]);
        match HelpCommand.execute(&args(&[]), &mut s) {
            Ok(Execution::Animate(text)) => {
                assert_eq!(text, "Available commands:\r\n- pwd: Print the current directory\r\n")
            }
            _ => panic!("expected an animation"),
        }
        assert_eq!(s.take_output(), "");
    }
}
