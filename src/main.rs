// native REPL around the terminal engine
// usage: linkos-terminal [FILESYSTEM.json] [CONFIG.json]
use futures::executor::block_on;
use linkos_terminal::session::Effect;
use linkos_terminal::{animation, logging, persist, restore_snapshot, vfs, Step, Task, Terminal, TerminalConfig};
use std::io::{self, BufRead, Write};

// what the page would otherwise track: the running program clock and
// whether `exit` asked to close
#[derive(Default)]
struct Host {
    clock: Option<u64>,
    closed: bool,
}

fn drive(term: &mut Terminal, host: &mut Host, mut step: Step) -> io::Result<()> {
    let mut stdout = io::stdout();
    loop {
        stdout.write_all(step.output.as_bytes())?;
        stdout.flush()?;
        if step.finished {
            persist(term);
        }
        if step.effects.contains(&Effect::CloseTerminal) {
            host.closed = true;
        }
        step = match step.task {
            None => return Ok(()),
            Some(Task::Clock { program }) => {
                host.clock = Some(program);
                return Ok(());
            }
            Some(Task::Wait(fut)) => term.complete_deferred(block_on(fut)),
            Some(Task::Animate(typewriter)) => {
                let completed = block_on(animation::play(typewriter, || animation::tick(0), |chunk| {
                    print!("{}", chunk);
                }));
                term.finish_animation(completed)
            }
        };
    }
}

fn main() -> io::Result<()> {
    logging::init(log::LevelFilter::Warn);
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match args.get(1) {
        Some(path) => TerminalConfig::from_json(&std::fs::read_to_string(path)?),
        None => TerminalConfig::default(),
    };
    logging::init(config.log_level());

    let fs = match args.first() {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(raw) => vfs::load_document(&raw),
            Err(e) => Err(linkos_terminal::error::LoadError::Fetch(format!("{}: {}", path, e))),
        },
        None => Err(linkos_terminal::error::LoadError::Fetch("no filesystem document given".to_string())),
    };
    let snapshot = restore_snapshot(&config);

    let mut term = Terminal::new(config);
    let mut host = Host::default();
    let step = term.start(fs, snapshot);
    drive(&mut term, &mut host, step)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        // a running program reads keys, the line's Enter included
        let step = if term.is_busy() {
            term.handle_input(&format!("{}\r", line))
        } else {
            term.submit_line(&line)
        };
        drive(&mut term, &mut host, step)?;

        // no timer on stdin, every line is one clock tick
        if let Some(program) = host.clock {
            match term.program_tick(program) {
                Some(step) => drive(&mut term, &mut host, step)?,
                None => host.clock = None,
            }
        }
        if host.closed {
            break;
        }
    }
    println!();
    Ok(())
}
