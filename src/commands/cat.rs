use crate::command::{Command, CommandResult, Execution};
use crate::error::{CommandError, VfsError};
use crate::render::crlf;
use crate::session::TerminalSession;

/// cat FILE
/// Print a file from the virtual filesystem.
pub struct CatCommand;

const CAT_HELP: &str = "Usage: cat FILE\r\nPrint the contents of FILE.";

impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn description(&self) -> &'static str {
        "Read file contents"
    }

    fn execute(&self, args: &[String], session: &mut TerminalSession) -> CommandResult {
        let target = match args.first() {
            Some(t) if t == "--help" || t == "-h" => {
                session.writeln(CAT_HELP);
                return Ok(Execution::Done);
            }
            Some(t) => t.as_str(),
            None => return Err(CommandError::Usage("cat: missing file operand".to_string())),
        };

        let fs = session.fs()?;
        let node = match fs.resolve(&session.path.join(target)) {
            Ok(node) => node,
            Err(VfsError::NotFound(_)) => {
                return Err(CommandError::Usage(format!("File not found: {}", target)))
            }
            Err(e) => return Err(e.into()),
        };
        let content = fs
            .get_content(node)
            .map_err(|_| CommandError::Usage(format!("Not a file: {}", target)))?;

        let mut text = crlf(content);
        if !text.is_empty() && !text.ends_with("\r\n") {
            text.push_str("\r\n");
        }
        // the alien theme types files out
        if session.theme == "alien" {
            return Ok(Execution::Animate(text));
        }
        session.write(&text);
        Ok(Execution::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};

    #[test]
    fn test_cat_file() {
        let mut s = session();
        assert_eq!(run(&CatCommand, &["about.txt"], &mut s).unwrap(), "hello\r\nworld\r\n");
    }

    #[test]
    fn test_cat_nested_path() {
        let mut s = session();
        assert_eq!(run(&CatCommand, &["projects/linkos.md"], &mut s).unwrap(), "# LinkOS\r\n");
    }

    #[test]
    fn test_cat_missing_file() {
        let mut s = session();
        let err = run(&CatCommand, &["nope.txt"], &mut s).unwrap_err();
        assert_eq!(err.to_string(), "File not found: nope.txt");
    }

    #[test]
    fn test_cat_directory() {
        let mut s = session();
        let err = run(&CatCommand, &["projects"], &mut s).unwrap_err();
        assert_eq!(err.to_string(), "Not a file: projects");
    }

    #[test]
    fn test_cat_needs_operand() {
        let mut s = session();
        assert!(run(&CatCommand, &[], &mut s).is_err());
    }

    #[test]
    fn test_alien_theme_types_out() {
        let mut s = session();
        s.theme = "alien".to_string();
        let args = crate::commands::testing::args(&["about.txt"]);
        match CatCommand.execute(&args, &mut s) {
            Ok(Execution::Animate(text)) => assert_eq!(text, "hello\r\nworld\r\n"),
            _ => panic!("expected an animation"),
        }
    }
}
