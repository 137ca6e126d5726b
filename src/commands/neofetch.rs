use crate::command::{Command, CommandResult, Execution};
use crate::session::TerminalSession;
use crate::theme::ansi;
use chrono::Utc;

/// neofetch
/// System information next to a logo. Everything shown comes from the
/// config and the live session.
pub struct NeofetchCommand;

const LOGO_WIDTH: usize = 40;

const LOGO: &[&str] = &[
    "                  -`",
    "                 .o+`",
    "                `ooo/",
    "               `+oooo:",
    "              `+oooooo:",
    "              -+oooooo+:",
    "            `/:-:++oooo+:",
    "           `/++++/+++++++:",
    "          `/++++++++++++++:",
    "         `/+++ooooooooo+++/`",
    "        ./ooosssso++osssssso+`",
    "       .oossssso-````/ossssss+`",
    "      -osssssso.      :ssssssso.",
    "     :osssssss/        osssso+++.",
    "    /ossssssss/        +ssssooo/-",
    "  `/ossssso+/:-        -:/+osssso+-",
    " `+sso+:-`                 `.-/+oso:",
    "`++:.                           `-/+/",
    ".`                                 `/",
];

/// `1h 5m`, `3m 20s` or `42s`
pub fn format_uptime(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let (hours, minutes, secs) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

fn field(label: &str, value: &str) -> String {
    format!("{} {}", ansi::paint(ansi::YELLOW, &format!("{}:", label)), value)
}

impl Command for NeofetchCommand {
    fn name(&self) -> &'static str {
        "neofetch"
    }

    fn description(&self) -> &'static str {
        "Display system information"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        let user = format!("{}@{}", session.config.user, session.config.host);
        let uptime = format_uptime((Utc::now() - session.started_at()).num_seconds());
        let info = vec![
            ansi::paint(ansi::GREEN, &user),
            ansi::paint(ansi::GREEN, &"-".repeat(user.chars().count())),
            field("OS", "LinkOS (Web Browser)"),
            field("Shell", "linkos-terminal"),
            field("Terminal", "xterm.js"),
            field("Theme", &session.theme),
            field("Site", session.site_theme.as_str()),
            field("Commands", &session.catalog().len().to_string()),
            field("History", &session.history.len().to_string()),
            field("CWD", &session.path.render()),
            field("Session", &session.short_id()),
            field("Uptime", &uptime),
        ];

        for (i, logo) in LOGO.iter().enumerate() {
            match info.get(i) {
                Some(text) => {
                    let art = ansi::paint(ansi::BLUE, &format!("{:<width$}", logo, width = LOGO_WIDTH));
                    session.writeln(&format!("{}{}", art, text));
                }
                None => session.writeln(&ansi::paint(ansi::BLUE, logo)),
            }
        }
        Ok(Execution::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};
    use crate::render::strip_ansi;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(42), "42s");
        assert_eq!(format_uptime(200), "3m 20s");
        assert_eq!(format_uptime(3900), "1h 5m");
        assert_eq!(format_uptime(-3), "0s");
    }

    #[test]
    fn test_neofetch_shows_session_details() {
        let mut s = session();
        s.history.push("ls");
        s.path.push("projects");
        s.set_catalog(vec![("ls".to_string(), "List".to_string()), ("cd".to_string(), "Go".to_string())]);
        let out = strip_ansi(&run(&NeofetchCommand, &[], &mut s).unwrap());
        let lines: Vec<&str> = out.split("\r\n").collect();
        assert_eq!(lines.len(), LOGO.len() + 1);
        assert!(lines[0].ends_with("guest@linkos"));
        assert!(out.contains("Theme: default"));
        assert!(out.contains("Site: dark"));
        assert!(out.contains("Commands: 2"));
        assert!(out.contains("History: 1"));
        assert!(out.contains("CWD: home/projects"));
        assert!(out.contains(&format!("Session: {}", s.short_id())));
        assert!(out.contains("Uptime: "));
    }
}
