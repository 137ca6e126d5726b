use crate::api;
use crate::command::{Command, CommandResult, Execution};
use crate::error::CommandError;
use crate::session::{Effect, TerminalSession};

/// portfolio [open]
/// Print the project list, or ask the desktop to open the Portfolio app.
pub struct PortfolioCommand;

impl Command for PortfolioCommand {
    fn name(&self) -> &'static str {
        "portfolio"
    }

    fn description(&self) -> &'static str {
        "View my portfolio"
    }

    fn execute(&self, args: &[String], session: &mut TerminalSession) -> CommandResult {
        match args.first().map(String::as_str) {
            Some("open") => {
                session.emit(Effect::OpenApp { app: "portfolio".to_string() });
                session.write_info("Opening Portfolio...");
                Ok(Execution::Done)
            }
            Some(other) => Err(CommandError::Usage(format!("portfolio: unknown option '{}'. Usage: portfolio [open]", other))),
            None => {
                let url = session.config.portfolio_url.clone();
                session.write_info("Loading projects...");
                Ok(Execution::Deferred(Box::pin(async move {
                    let raw = api::fetch_text(&url).await?;
                    let portfolio = api::parse_portfolio(&raw)?;
                    Ok(api::render_portfolio(&portfolio))
                })))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{args, run, session};

    #[test]
    fn test_portfolio_open_emits_effect() {
        let mut s = session();
        run(&PortfolioCommand, &["open"], &mut s).unwrap();
        assert_eq!(s.take_effects(), vec![Effect::OpenApp { app: "portfolio".to_string() }]);
    }

    #[test]
    fn test_portfolio_listing_is_deferred() {
        let mut s = session();
        assert!(matches!(PortfolioCommand.execute(&args(&[]), &mut s), Ok(Execution::Deferred(_))));
        assert!(PortfolioCommand.execute(&args(&["nope"]), &mut s).is_err());
    }
}
