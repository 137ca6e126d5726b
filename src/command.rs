use crate::error::CommandError;
use crate::games::Program;
use crate::session::TerminalSession;
use futures::future::LocalBoxFuture;

/// output of a command that has to wait for the network
pub type Deferred = LocalBoxFuture<'static, Result<String, CommandError>>;

/// how a command finished, or what it left running
pub enum Execution {
    /// done, everything was written to the session
    Done,
    /// type this text out, the prompt comes back afterwards
    Animate(String),
    /// wait for this future and write what it resolves to
    Deferred(Deferred),
    /// hand the keyboard to a program until it exits
    Program(Box<dyn Program>),
}

pub type CommandResult = Result<Execution, CommandError>;

pub trait Command {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn execute(&self, args: &[String], session: &mut TerminalSession) -> CommandResult;
}

/// registered commands in registration order, which is also help order
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }

    /// a later registration under the same name replaces the earlier one
    pub fn register_command(&mut self, cmd: Box<dyn Command>) {
        match self.commands.iter().position(|c| c.name() == cmd.name()) {
            Some(idx) => self.commands[idx] = cmd,
            None => self.commands.push(cmd),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.iter().find(|c| c.name() == name).map(|c| &**c)
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn catalog(&self) -> Vec<(String, String)> {
        self.commands
            .iter()
            .map(|c| (c.name().to_string(), c.description().to_string()))
            .collect()
    }

    pub fn default_commands() -> Self {
        let mut reg = Self::new();
        reg.register_command(Box::new(crate::commands::help::HelpCommand));
        reg.register_command(Box::new(crate::commands::ls::LsCommand));
        reg.register_command(Box::new(crate::commands::cd::CdCommand));
        reg.register_command(Box::new(crate::commands::pwd::PwdCommand));
        reg.register_command(Box::new(crate::commands::cat::CatCommand));
        reg.register_command(Box::new(crate::commands::clear::ClearCommand));
        reg.register_command(Box::new(crate::commands::about::AboutCommand));
        reg.register_command(Box::new(crate::commands::portfolio::PortfolioCommand));
        reg.register_command(Box::new(crate::commands::mylinks::MyLinksCommand));
        reg.register_command(Box::new(crate::commands::whoami::WhoAmICommand));
        reg.register_command(Box::new(crate::commands::neofetch::NeofetchCommand));
        reg.register_command(Box::new(crate::commands::switchtheme::SwitchThemeCommand));
        reg.register_command(Box::new(crate::commands::theme::ThemeCommand));
        reg.register_command(Box::new(crate::commands::history::HistoryCommand));
        reg.register_command(Box::new(crate::commands::alienboot::AlienBootCommand));
        reg.register_command(Box::new(crate::commands::exit::ExitCommand));
        reg.register_command(Box::new(crate::commands::games::GamesCommand));
        reg.register_command(Box::new(crate::commands::games::SnakeCommand));
        reg.register_command(Box::new(crate::commands::games::TetrisCommand));
        reg.register_command(Box::new(crate::commands::games::TypingCommand));
        reg.register_command(Box::new(crate::commands::games::Game2048Command));
        reg
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::default_commands()
    }
}

/// split a submitted line into the command name and its arguments.
/// only the name is case-folded, arguments keep their case.
/// `None` for a blank line
pub fn parse_line(input: &str) -> Option<(String, Vec<String>)> {
    let mut parts = input.split_whitespace();
    let cmd = parts.next()?.to_lowercase();
    let args = parts.map(|s| s.to_string()).collect();
    Some((cmd, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  LS  Projects "), Some(("ls".to_string(), vec!["Projects".to_string()])));
        assert_eq!(parse_line("pwd"), Some(("pwd".to_string(), vec![])));
        assert_eq!(parse_line("   "), None);
    }

    #[test]
    fn test_registry_order_and_lookup() {
        let reg = CommandRegistry::default_commands();
        let names = reg.get_command_names();
        assert_eq!(names.first().map(String::as_str), Some("help"));
        assert!(names.contains(&"2048".to_string()));
        assert!(reg.get("cd").is_some());
        assert!(reg.get("foobar").is_none());
        assert_eq!(reg.catalog().len(), names.len());
    }

    struct Quiet;

    impl Command for Quiet {
        fn name(&self) -> &'static str {
            "pwd"
        }
        fn description(&self) -> &'static str {
            "replacement"
        }
        fn execute(&self, _args: &[String], _session: &mut TerminalSession) -> CommandResult {
            Ok(Execution::Done)
        }
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut reg = CommandRegistry::default_commands();
        let before = reg.get_command_names().len();
        reg.register_command(Box::new(Quiet));
        assert_eq!(reg.get_command_names().len(), before);
        assert_eq!(reg.get("pwd").map(|c| c.description()), Some("replacement"));
    }
}
