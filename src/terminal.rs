use crate::animation::Typewriter;
use crate::command::{parse_line, CommandRegistry, Deferred, Execution};
use crate::completion::{Autocompleter, Completion, CompletionContext};
use crate::config::TerminalConfig;
use crate::editor::{decode, Key, LineEditor};
use crate::error::{CommandError, LoadError, VfsError};
use crate::games::{Program, ProgramStep};
use crate::render::{center, columns};
use crate::session::{Effect, TerminalSession};
use crate::storage::SessionSnapshot;
use crate::theme::ansi;
use crate::vfs::VirtualFileSystem;
use chrono::{Local, Timelike};
use futures::stream::AbortHandle;

const BANNER_MIN: usize = 40;
const BANNER_MAX: usize = 53;

enum Mode {
    Idle,
    /// waiting on a deferred command
    Executing { line: String },
    /// typing out output, Ctrl+C aborts
    Animating { line: String, abort: AbortHandle },
    /// a program has the keyboard. `id` tells launches apart for the clock
    Program { id: u64, line: String, program: Box<dyn Program> },
}

/// async work the host has to drive, then report back with
/// [`Terminal::complete_deferred`], [`Terminal::finish_animation`] or
/// [`Terminal::program_tick`]
pub enum Task {
    Wait(Deferred),
    Animate(Typewriter),
    /// keep ticking the program launched as `program` while
    /// [`Terminal::tick_interval`] says so
    Clock { program: u64 },
}

/// everything one call produced
#[derive(Default)]
pub struct Step {
    pub output: String,
    pub effects: Vec<Effect>,
    pub task: Option<Task>,
    /// a command line ran to completion, worth saving the session
    pub finished: bool,
}

pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

/// the terminal session state machine: line editing while idle, busy
/// while a command is waiting, animating or running a program
pub struct Terminal {
    session: TerminalSession,
    registry: CommandRegistry,
    editor: LineEditor,
    completer: Autocompleter,
    command_names: Vec<String>,
    mode: Mode,
    finished: bool,
    launches: u64,
}

impl Terminal {
    pub fn new(config: TerminalConfig) -> Self {
        Self::with_registry(config, CommandRegistry::default_commands())
    }

    pub fn with_registry(config: TerminalConfig, registry: CommandRegistry) -> Self {
        let mut session = TerminalSession::new(config);
        session.set_catalog(registry.catalog());
        Self {
            session,
            command_names: registry.get_command_names(),
            registry,
            editor: LineEditor::new(),
            completer: Autocompleter::new(),
            mode: Mode::Idle,
            finished: false,
            launches: 0,
        }
    }

    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TerminalSession {
        &mut self.session
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.mode, Mode::Idle)
    }

    pub fn input(&self) -> String {
        self.editor.text()
    }

    /// first output: install the filesystem (or report why there is none),
    /// bring back the stored session, then the banner and a prompt
    pub fn start(&mut self, fs: Result<VirtualFileSystem, LoadError>, snapshot: Option<SessionSnapshot>) -> Step {
        let load_error = match fs {
            Ok(fs) => {
                self.session.set_filesystem(fs);
                None
            }
            Err(e) => {
                log::error!("filesystem unavailable: {}", e);
                Some(e)
            }
        };
        if let Some(snapshot) = snapshot {
            self.session.restore(snapshot);
        }
        let banner = self.welcome_banner(Local::now().hour());
        self.session.write(&banner);
        if let Some(e) = load_error {
            self.session.write_error(&format!("Failed to load filesystem: {}", e));
        }
        self.write_prompt();
        self.collect(None)
    }

    pub fn welcome_banner(&self, hour: u32) -> String {
        let width = self.session.config.columns.saturating_sub(8).clamp(BANNER_MIN, BANNER_MAX);
        let session_line = format!(
            "Session: {} commands | CWD: {}",
            self.session.history.len(),
            self.session.path.render()
        );
        let hint = format!(
            "Type {} to list commands | Type {} for games",
            ansi::paint(ansi::YELLOW, "help"),
            ansi::paint(ansi::YELLOW, "games")
        );
        let rows = [
            ansi::paint(ansi::GREEN, "LinkOS Terminal"),
            String::new(),
            format!("{}, welcome to LinkOS", greeting(hour)),
            "An authentic macOS-inspired terminal experience".to_string(),
            String::new(),
            hint,
            String::new(),
            session_line,
        ];
        let mut out = format!("╭{}╮\r\n", "─".repeat(width));
        for row in &rows {
            out.push_str(&format!("│{}│\r\n", center(row, width)));
        }
        out.push_str(&format!("╰{}╯\r\n\r\n", "─".repeat(width)));
        out
    }

    /// raw data from the terminal: a keystroke, an escape sequence or a paste
    pub fn handle_input(&mut self, data: &str) -> Step {
        let mut task = None;
        for key in decode(data) {
            match self.mode {
                Mode::Idle => {
                    if let Some(t) = self.idle_key(key) {
                        task = Some(t);
                    }
                }
                Mode::Animating { ref abort, .. } => {
                    if key == Key::CtrlC {
                        log::debug!("animation cancelled");
                        abort.abort();
                    }
                }
                Mode::Program { .. } => self.program_key(&key),
                Mode::Executing { .. } => log::debug!("busy, dropping {:?}", key),
            }
        }
        self.collect(task)
    }

    /// run a whole line as if it was typed and submitted, without echo
    pub fn submit_line(&mut self, line: &str) -> Step {
        if self.is_busy() {
            log::debug!("busy, dropping line {:?}", line);
            return Step::default();
        }
        self.editor.take();
        self.completer.reset();
        self.session.history.stop_navigating();
        let task = self.dispatch(line);
        self.collect(task)
    }

    /// a deferred command resolved
    pub fn complete_deferred(&mut self, result: Result<String, CommandError>) -> Step {
        let line = match std::mem::replace(&mut self.mode, Mode::Idle) {
            Mode::Executing { line } => line,
            other => {
                log::warn!("deferred result arrived while not executing");
                self.mode = other;
                return Step::default();
            }
        };
        match result {
            Ok(text) => {
                self.session.write(&text);
                if !text.is_empty() && !text.ends_with('\n') {
                    self.session.write("\r\n");
                }
            }
            Err(e) => self.session.write_error(&e.to_string()),
        }
        self.finish_line(&line);
        self.collect(None)
    }

    /// the typewriter ran dry or was aborted
    pub fn finish_animation(&mut self, completed: bool) -> Step {
        let line = match std::mem::replace(&mut self.mode, Mode::Idle) {
            Mode::Animating { line, .. } => line,
            other => {
                self.mode = other;
                return Step::default();
            }
        };
        if !completed {
            self.session.write("^C\r\n");
        }
        self.finish_line(&line);
        self.collect(None)
    }

    /// delay before the next clock tick of program `program`. `None` once
    /// that launch has exited, which stops the host's clock
    pub fn tick_interval(&self, program: u64) -> Option<u32> {
        match &self.mode {
            Mode::Program { id, program: running, .. } if *id == program => running.tick_interval(),
            _ => None,
        }
    }

    /// one clock tick for program `program`, `None` when it is no longer running
    pub fn program_tick(&mut self, program: u64) -> Option<Step> {
        let Mode::Program { id, program: running, .. } = &mut self.mode else {
            return None;
        };
        if *id != program {
            return None;
        }
        let step = running.on_tick();
        self.program_step(step);
        Some(self.collect(None))
    }

    fn idle_key(&mut self, key: Key) -> Option<Task> {
        if key != Key::Tab {
            self.completer.reset();
        }
        let out = match key {
            Key::Enter => return self.submit(),
            Key::Tab => {
                self.complete();
                return None;
            }
            Key::Up => match self.session.history.recall_previous() {
                Some(line) => {
                    let line = line.to_string();
                    self.editor.replace(&line)
                }
                None => String::new(),
            },
            Key::Down => match self.session.history.recall_next() {
                Some(line) => {
                    let line = line.to_string();
                    self.editor.replace(&line)
                }
                None => String::new(),
            },
            Key::Left => self.editor.left(),
            Key::Right => self.editor.right(),
            Key::Home | Key::CtrlA => self.editor.home(),
            Key::End | Key::CtrlE => self.editor.end(),
            Key::CtrlC => {
                self.editor.take();
                self.session.history.stop_navigating();
                self.session.write("^C\r\n");
                self.write_prompt();
                return None;
            }
            Key::CtrlL => {
                self.session.write(ansi::CLEAR_SCREEN);
                self.write_prompt();
                self.editor.render()
            }
            Key::Escape | Key::Unknown => String::new(),
            edit => {
                // anything that changes the text ends history navigation
                self.session.history.stop_navigating();
                match edit {
                    Key::Char(c) => self.editor.insert(c.encode_utf8(&mut [0; 4])),
                    Key::Backspace => self.editor.backspace(),
                    Key::Delete => self.editor.delete(),
                    Key::CtrlU => self.editor.kill_to_start(),
                    Key::CtrlK => self.editor.kill_to_end(),
                    Key::CtrlW => self.editor.delete_word(),
                    _ => String::new(),
                }
            }
        };
        self.session.write(&out);
        None
    }

    fn submit(&mut self) -> Option<Task> {
        self.session.write("\r\n");
        let line = self.editor.take();
        self.session.history.stop_navigating();
        self.completer.reset();
        self.dispatch(&line)
    }

    fn dispatch(&mut self, line: &str) -> Option<Task> {
        let Some((name, args)) = parse_line(line) else {
            self.write_prompt();
            return None;
        };
        let Some(command) = self.registry.get(&name) else {
            log::info!("unknown command: {}", name);
            self.session.write_error(&CommandError::UnknownCommand(name).to_string());
            self.finish_line(line);
            return None;
        };

        log::debug!("running {} {:?}", name, args);
        self.mode = Mode::Executing { line: line.to_string() };
        match command.execute(&args, &mut self.session) {
            Ok(Execution::Done) => {
                self.finish_line(line);
                None
            }
            Ok(Execution::Animate(text)) => {
                let (typewriter, abort) = Typewriter::new(&text, self.session.config.animation_chunk);
                self.mode = Mode::Animating { line: line.to_string(), abort };
                Some(Task::Animate(typewriter))
            }
            Ok(Execution::Deferred(fut)) => Some(Task::Wait(fut)),
            Ok(Execution::Program(mut program)) => {
                log::info!("launching {}", program.name());
                let frame = program.start();
                self.session.write(&frame);
                self.launches += 1;
                let id = self.launches;
                let clock = program.tick_interval().map(|_| Task::Clock { program: id });
                self.mode = Mode::Program { id, line: line.to_string(), program };
                clock
            }
            Err(e) => {
                log::warn!("{} failed: {}", name, e);
                self.session.write_error(&e.to_string());
                self.finish_line(line);
                None
            }
        }
    }

    fn program_key(&mut self, key: &Key) {
        let Mode::Program { program, .. } = &mut self.mode else {
            return;
        };
        let step = program.on_key(key);
        self.program_step(step);
    }

    fn program_step(&mut self, step: ProgramStep) {
        match step {
            ProgramStep::Continue(frame) => self.session.write(&frame),
            ProgramStep::Exit { output, score } => {
                self.session.write(&output);
                if let Mode::Program { line, program, .. } = std::mem::replace(&mut self.mode, Mode::Idle) {
                    log::info!("{} exited", program.name());
                    if let Some(score) = score {
                        if self.session.record_score(&program.score_key(), score) {
                            self.session.write_success("New high score!");
                        }
                    }
                    self.finish_line(&line);
                }
            }
        }
    }

    fn complete(&mut self) {
        let input = self.editor.text();
        if input.contains(' ') && !self.session.has_filesystem() {
            self.session.write("\r\n");
            self.session.write_error(&VfsError::NotInitialized.to_string());
            self.write_prompt();
            let line = self.editor.render();
            self.session.write(&line);
            return;
        }

        let ctx = CompletionContext {
            fs: self.session.fs().ok(),
            cwd: &self.session.path,
            commands: &self.command_names,
        };
        match self.completer.complete(&input, &ctx) {
            Completion::Unchanged => {}
            Completion::Single(line) => {
                let out = self.editor.replace(&line);
                self.session.write(&out);
            }
            Completion::Cycle { line, candidates, started: true } => {
                self.editor.replace(&line);
                let listing = columns(&candidates, self.session.config.columns);
                self.session.write("\r\n");
                self.session.write(&listing);
                self.write_prompt();
                let line = self.editor.render();
                self.session.write(&line);
            }
            Completion::Cycle { line, .. } => {
                let out = self.editor.replace(&line);
                self.session.write(&out);
            }
        }
    }

    fn finish_line(&mut self, line: &str) {
        self.mode = Mode::Idle;
        self.session.history.push(line);
        self.finished = true;
        self.write_prompt();
    }

    fn write_prompt(&mut self) {
        let prompt = self.session.prompt();
        self.session.write(&prompt);
    }

    fn collect(&mut self, task: Option<Task>) -> Step {
        Step {
            output: self.session.take_output(),
            effects: self.session.take_effects(),
            task,
            finished: std::mem::take(&mut self.finished),
        }
    }
}
