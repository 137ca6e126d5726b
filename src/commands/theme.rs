use crate::command::{Command, CommandResult, Execution};
use crate::error::CommandError;
use crate::session::{Effect, TerminalSession};
use crate::theme::{self, ansi, THEMES};

/// theme [NAME]
/// Without a name, list the terminal themes. With one, switch to it.
pub struct ThemeCommand;

impl Command for ThemeCommand {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn description(&self) -> &'static str {
        "Change terminal theme"
    }

    fn execute(&self, args: &[String], session: &mut TerminalSession) -> CommandResult {
        let Some(name) = args.first() else {
            session.writeln("");
            session.writeln(&ansi::paint(ansi::CYAN, "Available Themes"));
            session.writeln("");
            for t in THEMES {
                let marker = if t.key == session.theme { "*" } else { " " };
                let line = format!("{} {} {}", marker, ansi::paint(ansi::YELLOW, &format!("{:<15}", t.key)), t.name);
                session.writeln(&line);
                session.writeln(&format!("  {:<15} {}", "", ansi::paint(ansi::GRAY, t.description)));
            }
            session.writeln("");
            session.writeln(&format!("{} theme <name>", ansi::paint(ansi::CYAN, "Usage:")));
            return Ok(Execution::Done);
        };

        let key = name.to_lowercase();
        let Some(found) = theme::find(&key) else {
            let names: Vec<&str> = THEMES.iter().map(|t| t.key).collect();
            return Err(CommandError::Usage(format!(
                "theme: '{}' not found. Available themes: {}",
                key,
                names.join(", ")
            )));
        };
        session.theme = found.key.to_string();
        session.emit(Effect::TerminalTheme { theme: found.key.to_string() });
        session.write_success(&format!("Theme changed to '{}'", found.name));
        Ok(Execution::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};
    use crate::render::strip_ansi;

    #[test]
    fn test_theme_listing_marks_current() {
        let mut s = session();
        let out = strip_ansi(&run(&ThemeCommand, &[], &mut s).unwrap());
        assert!(out.contains("* default"));
        assert!(out.contains("  matrix"));
    }

    #[test]
    fn test_theme_switch() {
        let mut s = session();
        let out = strip_ansi(&run(&ThemeCommand, &["Matrix"], &mut s).unwrap());
        assert_eq!(out, "Theme changed to 'Matrix'\r\n");
        assert_eq!(s.theme, "matrix");
        assert_eq!(s.take_effects(), vec![Effect::TerminalTheme { theme: "matrix".to_string() }]);
    }

    #[test]
    fn test_unknown_theme() {
        let mut s = session();
        let err = run(&ThemeCommand, &["neon"], &mut s).unwrap_err();
        assert!(err.to_string().starts_with("theme: 'neon' not found"));
        assert_eq!(s.theme, "default");
    }
}
