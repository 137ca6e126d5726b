use crate::command::{Command, CommandResult, Execution};
use crate::error::{CommandError, VfsError};
use crate::session::TerminalSession;

/// cd [DIR]
/// Change the working directory. no argument or `~` goes back to the root.
pub struct CdCommand;

const CD_HELP: &str = "Usage: cd [DIR]\r\nChange the current directory. '..' goes up, '~' goes home.";

impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn description(&self) -> &'static str {
        "Change the current directory"
    }

    fn execute(&self, args: &[String], session: &mut TerminalSession) -> CommandResult {
        if args.iter().any(|a| a == "--help") {
            session.writeln(CD_HELP);
            return Ok(Execution::Done);
        }
        if args.len() > 1 {
            return Err(CommandError::Usage("cd: too many arguments".to_string()));
        }
        let target = match args.first() {
            Some(t) => t.as_str(),
            None => "~",
        };

        let fs = session.fs()?;
        let segments = session.path.join(target);
        match fs.resolve(&segments) {
            Ok(node) if node.is_dir() => {}
            Ok(_) => return Err(CommandError::Usage(format!("Not a directory: {}", target))),
            Err(VfsError::NotFound(_)) => {
                return Err(CommandError::Usage(format!("Directory not found: {}", target)))
            }
            Err(e) => return Err(e.into()),
        }
        log::debug!("cd {} -> {}", target, segments.join("/"));
        session.path.set(segments);
        Ok(Execution::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};
    use crate::config::TerminalConfig;

    #[test]
    fn test_cd_into_child() {
        let mut s = session();
        assert_eq!(run(&CdCommand, &["projects"], &mut s).unwrap(), "");
        assert_eq!(s.path.render(), "home/projects");
    }

    #[test]
    fn test_cd_parent_stops_at_root() {
        let mut s = session();
        run(&CdCommand, &["projects/web"], &mut s).unwrap();
        assert_eq!(s.path.render(), "home/projects/web");
        run(&CdCommand, &[".."], &mut s).unwrap();
        assert_eq!(s.path.render(), "home/projects");
        run(&CdCommand, &["../../.."], &mut s).unwrap();
        assert_eq!(s.path.render(), "home");
    }

    #[test]
    fn test_cd_home() {
        let mut s = session();
        run(&CdCommand, &["projects"], &mut s).unwrap();
        run(&CdCommand, &[], &mut s).unwrap();
        assert_eq!(s.path.render(), "home");
        run(&CdCommand, &["projects"], &mut s).unwrap();
        run(&CdCommand, &["~"], &mut s).unwrap();
        assert_eq!(s.path.render(), "home");
    }

    #[test]
    fn test_cd_nonexistent_directory() {
        let mut s = session();
        let err = run(&CdCommand, &["nope"], &mut s).unwrap_err();
        assert_eq!(err.to_string(), "Directory not found: nope");
        assert_eq!(s.path.render(), "home");
    }

    #[test]
    fn test_cd_to_file() {
        let mut s = session();
        let err = run(&CdCommand, &["about.txt"], &mut s).unwrap_err();
        assert_eq!(err.to_string(), "Not a directory: about.txt");
    }

    #[test]
    fn test_cd_too_many_arguments() {
        let mut s = session();
        let err = run(&CdCommand, &["projects", "web"], &mut s).unwrap_err();
        assert_eq!(err.to_string(), "cd: too many arguments");
        assert_eq!(s.path.render(), "home");
    }

    #[test]
    fn test_cd_without_filesystem() {
        let mut s = TerminalSession::new(TerminalConfig::default());
        let err = run(&CdCommand, &["projects"], &mut s).unwrap_err();
        assert_eq!(err.to_string(), "Filesystem not initialized.");
    }
}
