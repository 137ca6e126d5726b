use crate::command::{Command, CommandResult, Execution};
use crate::session::{Effect, TerminalSession};

/// switchtheme
/// Flip the desktop between light and dark mode.
pub struct SwitchThemeCommand;

impl Command for SwitchThemeCommand {
    fn name(&self) -> &'static str {
        "switchtheme"
    }

    fn description(&self) -> &'static str {
        "Switch the theme of the application"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        let theme = session.site_theme.toggled();
        session.site_theme = theme;
        session.emit(Effect::SwitchSiteTheme { theme });
        session.writeln(&format!("Theme is set to {} mode.", theme.as_str()));
        Ok(Execution::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};
    use crate::theme::SiteTheme;

    #[test]
    fn test_switchtheme_toggles() {
        let mut s = session();
        assert_eq!(run(&SwitchThemeCommand, &[], &mut s).unwrap(), "Theme is set to light mode.\r\n");
        assert_eq!(s.take_effects(), vec![Effect::SwitchSiteTheme { theme: SiteTheme::Light }]);
        assert_eq!(run(&SwitchThemeCommand, &[], &mut s).unwrap(), "Theme is set to dark mode.\r\n");
    }
}
