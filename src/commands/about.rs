use crate::api;
use crate::command::{Command, CommandResult, Execution};
use crate::session::TerminalSession;

/// about
/// Fetch the profile from the about endpoint and print it.
pub struct AboutCommand;

impl Command for AboutCommand {
    fn name(&self) -> &'static str {
        "about"
    }

    fn description(&self) -> &'static str {
        "Learn more about me"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        let url = session.config.about_url.clone();
        session.write_info("Loading profile...");
        Ok(Execution::Deferred(Box::pin(async move {
            let raw = api::fetch_text(&url).await?;
            let about = api::parse_about(&raw)?;
            Ok(api::render_about(&about))
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{args, session};
    use futures::executor::block_on;

    #[test]
    fn test_about_is_deferred() {
        let mut s = session();
        let fut = match AboutCommand.execute(&args(&[]), &mut s) {
            Ok(Execution::Deferred(fut)) => fut,
            _ => panic!("expected a deferred execution"),
        };
        assert!(s.take_output().contains("Loading profile..."));
        // no network outside the browser
        let err = block_on(fut).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load data:"));
    }
}
