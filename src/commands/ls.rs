use crate::command::{Command, CommandResult, Execution};
use crate::error::{CommandError, VfsError};
use crate::render::columns;
use crate::session::TerminalSession;
use crate::theme::ansi;
use crate::vfs::VfsNode;

/// ls [-l] [-a] [PATH]
/// List directory contents in document order.
pub struct LsCommand;

const LS_HELP: &str = "Usage: ls [-l] [-a] [PATH]\r\n\r\n  -l   long listing format\r\n  -a   include entries starting with .";

#[derive(Default)]
struct Flags {
    long: bool,
    all: bool,
}

fn colored(name: &str, node: &VfsNode) -> String {
    if node.is_dir() {
        ansi::paint(ansi::BLUE, name)
    } else {
        name.to_string()
    }
}

fn long_line(name: &str, node: &VfsNode) -> String {
    let meta = node.meta();
    let kind = if node.is_dir() { 'd' } else { '-' };
    let modified = meta.modified.as_deref().unwrap_or("Jan 1 00:00");
    format!(
        "{}{} {:<8} {:>8} {} {}",
        kind,
        meta.permissions,
        meta.owner,
        node.size(),
        modified,
        colored(name, node)
    )
}

impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn description(&self) -> &'static str {
        "List directory contents"
    }

    fn execute(&self, args: &[String], session: &mut TerminalSession) -> CommandResult {
        let mut flags = Flags::default();
        let mut target: Option<&str> = None;
        for arg in args {
            if arg == "--help" {
                session.writeln(LS_HELP);
                return Ok(Execution::Done);
            }
            if let Some(opts) = arg.strip_prefix('-') {
                for c in opts.chars() {
                    match c {
                        'l' => flags.long = true,
                        'a' => flags.all = true,
                        other => return Err(CommandError::Usage(format!("ls: invalid option -- '{}'", other))),
                    }
                }
            } else {
                target = Some(arg);
            }
        }

        let fs = session.fs()?;
        let segments = match target {
            Some(t) => session.path.join(t),
            None => session.path.segments().to_vec(),
        };
        let node = match fs.resolve(&segments) {
            Ok(node) => node,
            Err(VfsError::NotFound(_)) => {
                let shown = target.unwrap_or(".");
                return Err(CommandError::Usage(format!("ls: cannot access '{}': No such file or directory", shown)));
            }
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<(&str, &VfsNode)> = match fs.list_children(node) {
            Ok(children) => children
                .iter()
                .filter(|(name, _)| flags.all || !name.starts_with('.'))
                .map(|(name, child)| (name.as_str(), child))
                .collect(),
            // ls on a file lists just that file
            Err(_) => vec![(segments.last().map(String::as_str).unwrap_or(""), node)],
        };

        let out = if flags.long {
            entries
                .iter()
                .map(|(name, node)| long_line(name, node) + "\r\n")
                .collect::<String>()
        } else {
            let items: Vec<String> = entries.iter().map(|(name, node)| colored(name, node)).collect();
            columns(&items, session.config.columns)
        };
        session.write(&out);
        Ok(Execution::Done)
    }
}
