use crate::path::PathState;
use crate::vfs::VirtualFileSystem;

/// what a Tab press did to the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// nothing matched, the line stays as typed
    Unchanged,
    /// exactly one match
    Single(String),
    /// one of several matches. `started` is true on the first Tab of a
    /// cycle, when the caller should list `candidates` below the line
    Cycle { line: String, candidates: Vec<String>, started: bool },
}

#[derive(Debug, Clone)]
struct CycleState {
    base_input: String,
    lines: Vec<String>,
    cursor: usize,
}

impl CycleState {
    fn offered(&self) -> &str {
        &self.lines[self.cursor]
    }
}

pub struct CompletionContext<'a> {
    pub fs: Option<&'a VirtualFileSystem>,
    pub cwd: &'a PathState,
    pub commands: &'a [String],
}

/// Tab completion for command names and filesystem paths. a cycle lives
/// until any other key is pressed
#[derive(Debug, Default)]
pub struct Autocompleter {
    cycle: Option<CycleState>,
}

impl Autocompleter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.cycle = None;
    }

    #[cfg(test)]
    pub fn is_cycling(&self) -> bool {
        self.cycle.is_some()
    }

    /// the line that started the running cycle, if any
    #[cfg(test)]
    pub fn base_input(&self) -> Option<&str> {
        self.cycle.as_ref().map(|c| c.base_input.as_str())
    }

    pub fn complete(&mut self, input: &str, ctx: &CompletionContext<'_>) -> Completion {
        // repeated Tab on the line we offered last time: next candidate
        if let Some(cycle) = self.cycle.as_mut() {
            if cycle.offered() == input {
                cycle.cursor = (cycle.cursor + 1) % cycle.lines.len();
                return Completion::Cycle {
                    line: cycle.offered().to_string(),
                    candidates: Vec::new(),
                    started: false,
                };
            }
        }
        self.cycle = None;

        let (names, lines) = match candidates(input, ctx) {
            Some(found) => found,
            None => return Completion::Unchanged,
        };
        match lines.len() {
            0 => Completion::Unchanged,
            1 => Completion::Single(lines[0].clone()),
            _ => {
                let first = lines[0].clone();
                self.cycle = Some(CycleState { base_input: input.to_string(), lines, cursor: 0 });
                Completion::Cycle { line: first, candidates: names, started: true }
            }
        }
    }
}

/// matching names plus the full line each one completes to.
/// `None` when the directory part of the path doesn't resolve
fn candidates(input: &str, ctx: &CompletionContext<'_>) -> Option<(Vec<String>, Vec<String>)> {
    let Some(split) = input.rfind(' ') else {
        // still typing the command itself
        let names: Vec<String> = ctx.commands.iter().filter(|c| c.starts_with(input)).cloned().collect();
        return Some((names.clone(), names));
    };

    let head = &input[..split];
    let arg = &input[split + 1..];
    let command = head.split_whitespace().next().unwrap_or("");
    let dirs_only = command.eq_ignore_ascii_case("cd");

    let (dir_part, prefix) = match arg.rfind('/') {
        Some(idx) => (&arg[..=idx], &arg[idx + 1..]),
        None => ("", arg),
    };

    let fs = ctx.fs?;
    let parent = fs.resolve(&ctx.cwd.join(dir_part)).ok()?;
    let children = fs.list_children(parent).ok()?;

    let names: Vec<String> = children
        .iter()
        .filter(|(name, node)| name.starts_with(prefix) && (!dirs_only || node.is_dir()))
        .map(|(name, _)| name.clone())
        .collect();
    let lines = names.iter().map(|name| format!("{} {}{}", head, dir_part, name)).collect();
    Some((names, lines))
}
