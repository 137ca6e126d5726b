use crate::command::{Command, CommandResult, Execution};
use crate::error::CommandError;
use crate::games::game2048::Game2048;
use crate::games::snake::SnakeGame;
use crate::games::tetris::TetrisGame;
use crate::games::typing::{self, Difficulty, TypingGame};
use crate::games::GAMES;
use crate::session::TerminalSession;
use crate::theme::ansi;

/// games
pub struct GamesCommand;

impl Command for GamesCommand {
    fn name(&self) -> &'static str {
        "games"
    }

    fn description(&self) -> &'static str {
        "Show available games"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        session.writeln("");
        session.writeln(&ansi::paint(ansi::MAGENTA, "Available Games"));
        session.writeln("");
        for (name, description) in GAMES {
            session.writeln(&format!("  {} - {}", ansi::paint(ansi::YELLOW, &format!("{:<8}", name)), description));
        }
        session.writeln("");
        session.write_info("Tip: Press q or ESC to exit a game");
        Ok(Execution::Done)
    }
}

/// snake
pub struct SnakeCommand;

impl Command for SnakeCommand {
    fn name(&self) -> &'static str {
        "snake"
    }

    fn description(&self) -> &'static str {
        "Classic snake game"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        let best = session.best_score("snake");
        Ok(Execution::Program(Box::new(SnakeGame::from_entropy(best))))
    }
}

/// tetris
pub struct TetrisCommand;

impl Command for TetrisCommand {
    fn name(&self) -> &'static str {
        "tetris"
    }

    fn description(&self) -> &'static str {
        "Block puzzle game"
    }

    fn execute(&self, _args: &[String], _session: &mut TerminalSession) -> CommandResult {
        Ok(Execution::Program(Box::new(TetrisGame::from_entropy())))
    }
}

/// typing [easy|medium|hard]
/// Opens on the difficulty menu, medium unless one is given.
pub struct TypingCommand;

impl Command for TypingCommand {
    fn name(&self) -> &'static str {
        "typing"
    }

    fn description(&self) -> &'static str {
        "Typing speed test"
    }

    fn execute(&self, args: &[String], session: &mut TerminalSession) -> CommandResult {
        let difficulty = match args.first() {
            None => Difficulty::default(),
            Some(arg) => Difficulty::parse(arg).ok_or_else(|| {
                CommandError::Usage(format!("typing: unknown difficulty '{}' (easy, medium, hard)", arg))
            })?,
        };
        let bests = Difficulty::ALL.map(|d| session.best_score(&typing::score_key(d)));
        Ok(Execution::Program(Box::new(TypingGame::from_entropy(difficulty, bests))))
    }
}

/// 2048
pub struct Game2048Command;

impl Command for Game2048Command {
    fn name(&self) -> &'static str {
        "2048"
    }

    fn description(&self) -> &'static str {
        "Number puzzle game"
    }

    fn execute(&self, _args: &[String], session: &mut TerminalSession) -> CommandResult {
        let best = session.best_score("2048");
        Ok(Execution::Program(Box::new(Game2048::from_entropy(best))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{args, run, session};
    use crate::render::strip_ansi;

    #[test]
    fn test_games_listing() {
        let mut s = session();
        let out = strip_ansi(&run(&GamesCommand, &[], &mut s).unwrap());
        assert!(out.contains("snake    - Classic snake game"));
        assert!(out.contains("tetris   - Block puzzle game"));
        assert!(out.contains("typing   - Typing speed test"));
        assert!(out.contains("2048     - Number puzzle game"));
    }

    #[test]
    fn test_realtime_games_ask_for_a_clock() {
        let mut s = session();
        for cmd in [&SnakeCommand as &dyn Command, &TetrisCommand as &dyn Command] {
            match cmd.execute(&args(&[]), &mut s) {
                Ok(Execution::Program(program)) => {
                    assert_eq!(program.name(), cmd.name());
                    assert!(program.tick_interval().is_some());
                }
                _ => panic!("expected a program"),
            }
        }
    }

    #[test]
    fn test_typing_difficulty_argument() {
        let mut s = session();
        match TypingCommand.execute(&args(&["HARD"]), &mut s) {
            Ok(Execution::Program(program)) => {
                assert_eq!(program.score_key(), "typing-hard");
                assert_eq!(program.tick_interval(), None);
            }
            _ => panic!("expected a program"),
        }
        match TypingCommand.execute(&args(&["insane"]), &mut s) {
            Err(e) => assert!(e.to_string().contains("unknown difficulty 'insane'")),
            _ => panic!("expected a usage error"),
        }
    }

    #[test]
    fn test_2048_launches_program() {
        let mut s = session();
        match Game2048Command.execute(&args(&[]), &mut s) {
            Ok(Execution::Program(program)) => assert_eq!(program.name(), "2048"),
            _ => panic!("expected a program"),
        }
    }
}
