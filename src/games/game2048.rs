use super::{Program, ProgramStep};
use crate::editor::Key;
use crate::theme::ansi;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SIZE: usize = 4;
const GOAL: u32 = 2048;

pub type Board = [[u32; SIZE]; SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

fn tile_color(value: u32) -> &'static str {
    match value {
        2 => "\x1b[47m\x1b[30m",
        4 => "\x1b[46m\x1b[30m",
        8 => "\x1b[43m\x1b[30m",
        16 => "\x1b[42m\x1b[30m",
        32 => "\x1b[45m\x1b[30m",
        64 => "\x1b[41m\x1b[37m",
        128 => "\x1b[44m\x1b[37m",
        256 => "\x1b[40m\x1b[33m",
        512 => "\x1b[40m\x1b[32m",
        1024 => "\x1b[40m\x1b[36m",
        2048 => "\x1b[40m\x1b[31m",
        _ => ansi::WHITE,
    }
}

/// slide one line towards index 0, each tile merges at most once.
/// returns the new line and the points scored
fn merge_line(line: [u32; SIZE]) -> ([u32; SIZE], u32) {
    let tiles: Vec<u32> = line.iter().copied().filter(|v| *v != 0).collect();
    let mut out = [0; SIZE];
    let mut score = 0;
    let mut idx = 0;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            out[idx] = tiles[i] * 2;
            score += out[idx];
            i += 2;
        } else {
            out[idx] = tiles[i];
            i += 1;
        }
        idx += 1;
    }
    (out, score)
}

pub struct Game2048 {
    board: Board,
    score: u32,
    best: u32,
    paused: bool,
    rng: StdRng,
}

impl Game2048 {
    pub fn new(rng: StdRng, best: u32) -> Self {
        Self { board: [[0; SIZE]; SIZE], score: 0, best, paused: false, rng }
    }

    pub fn from_entropy(best: u32) -> Self {
        Self::new(StdRng::from_entropy(), best)
    }

    #[cfg(test)]
    fn with_board(board: Board, seed: u64) -> Self {
        let mut game = Self::new(StdRng::seed_from_u64(seed), 0);
        game.board = board;
        game
    }

    #[cfg(test)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn score(&self) -> u32 {
        self.score
    }

    fn add_random_tile(&mut self) {
        let empty: Vec<(usize, usize)> = (0..SIZE)
            .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| self.board[r][c] == 0)
            .collect();
        if empty.is_empty() {
            return;
        }
        let (r, c) = empty[self.rng.gen_range(0..empty.len())];
        self.board[r][c] = if self.rng.gen_bool(0.9) { 2 } else { 4 };
    }

    /// apply a move; false (and no change) when nothing could slide
    pub fn slide(&mut self, dir: Direction) -> bool {
        let mut moved = false;
        let mut gained = 0;
        for i in 0..SIZE {
            // read the line in the direction of travel
            let cells: [(usize, usize); SIZE] = std::array::from_fn(|j| match dir {
                Direction::Left => (i, j),
                Direction::Right => (i, SIZE - 1 - j),
                Direction::Up => (j, i),
                Direction::Down => (SIZE - 1 - j, i),
            });
            let line = cells.map(|(r, c)| self.board[r][c]);
            let (merged, score) = merge_line(line);
            if merged != line {
                moved = true;
                for (j, &(r, c)) in cells.iter().enumerate() {
                    self.board[r][c] = merged[j];
                }
            }
            gained += score;
        }
        if moved {
            self.score += gained;
        }
        moved
    }

    pub fn has_won(&self) -> bool {
        self.board.iter().flatten().any(|&v| v >= GOAL)
    }

    pub fn is_over(&self) -> bool {
        for r in 0..SIZE {
            for c in 0..SIZE {
                let v = self.board[r][c];
                if v == 0 {
                    return false;
                }
                if c + 1 < SIZE && self.board[r][c + 1] == v {
                    return false;
                }
                if r + 1 < SIZE && self.board[r + 1][c] == v {
                    return false;
                }
            }
        }
        true
    }

    fn render(&self) -> String {
        let mut lines = vec![
            ansi::paint(ansi::CYAN, "2048 GAME"),
            ansi::paint(ansi::GRAY, "WASD/Arrow Keys: Move tiles | SPACE: Pause | Q/ESC: Quit"),
            ansi::paint(ansi::GRAY, "Combine tiles with the same number to reach 2048!"),
            String::new(),
        ];
        if self.paused {
            lines.push("\x1b[43m\x1b[30m PAUSED - Press SPACE to continue \x1b[0m".to_string());
            lines.push(String::new());
        }
        lines.push(format!("Score: {}   Best: {}", ansi::paint(ansi::CYAN, &self.score.to_string()), self.best.max(self.score)));
        lines.push(String::new());

        lines.push(format!("┌{}────┐", "────┬".repeat(SIZE - 1)));
        for (r, row) in self.board.iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .map(|&v| if v == 0 { "    ".to_string() } else { format!("{}{:>4}{}", tile_color(v), v, ansi::RESET) })
                .collect();
            lines.push(format!("│{}│", cells.join("│")));
            if r + 1 < SIZE {
                lines.push(format!("├{}────┤", "────┼".repeat(SIZE - 1)));
            }
        }
        lines.push(format!("└{}────┘", "────┴".repeat(SIZE - 1)));

        let mut out = String::from("\x1b[2J\x1b[H");
        for line in lines {
            out.push_str(&line);
            out.push_str("\r\n");
        }
        out
    }

    fn finish(&self, won: bool) -> ProgramStep {
        let mut out = self.render();
        if won {
            out.push_str(&format!("\r\n{}\r\n", ansi::paint(ansi::GREEN, "CONGRATULATIONS! YOU REACHED 2048!")));
        } else {
            out.push_str(&format!("\r\n{}\r\n", ansi::paint(ansi::RED, "Game Over!")));
        }
        out.push_str(&format!("Final Score: {}\r\n", ansi::paint(ansi::CYAN, &self.score.to_string())));
        out.push_str(&format!("High Score: {}\r\n", ansi::paint(ansi::YELLOW, &self.best.max(self.score).to_string())));
        ProgramStep::Exit { output: out, score: Some(self.score) }
    }
}

impl Program for Game2048 {
    fn name(&self) -> &str {
        "2048"
    }

    fn start(&mut self) -> String {
        self.board = [[0; SIZE]; SIZE];
        self.score = 0;
        self.paused = false;
        self.add_random_tile();
        self.add_random_tile();
        self.render()
    }

    fn on_key(&mut self, key: &Key) -> ProgramStep {
        let dir = match key {
            Key::Char('q') | Key::Char('Q') | Key::Escape | Key::CtrlC => return self.finish(false),
            Key::Char(' ') => {
                self.paused = !self.paused;
                return ProgramStep::Continue(self.render());
            }
            Key::Char('w') | Key::Char('W') | Key::Up => Direction::Up,
            Key::Char('s') | Key::Char('S') | Key::Down => Direction::Down,
            Key::Char('a') | Key::Char('A') | Key::Left => Direction::Left,
            Key::Char('d') | Key::Char('D') | Key::Right => Direction::Right,
            _ => return ProgramStep::Continue(String::new()),
        };
        if self.paused || !self.slide(dir) {
            return ProgramStep::Continue(String::new());
        }
        self.add_random_tile();
        if self.has_won() {
            self.finish(true)
        } else if self.is_over() {
            self.finish(false)
        } else {
            ProgramStep::Continue(self.render())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(board: &Board) -> usize {
        board.iter().flatten().filter(|v| **v != 0).count()
    }

    #[test]
    fn test_merge_line_once_per_tile() {
        assert_eq!(merge_line([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
        assert_eq!(merge_line([2, 0, 2, 4]), ([4, 4, 0, 0], 4));
        assert_eq!(merge_line([4, 4, 8, 0]), ([8, 8, 0, 0], 8));
        assert_eq!(merge_line([2, 4, 8, 16]), ([2, 4, 8, 16], 0));
    }

    #[test]
    fn test_start_places_two_tiles() {
        let mut game = Game2048::new(StdRng::seed_from_u64(7), 0);
        game.start();
        assert_eq!(tiles(game.board()), 2);
        assert!(game.board().iter().flatten().all(|v| [0, 2, 4].contains(v)));
    }

    #[test]
    fn test_slide_right_and_down() {
        let mut game = Game2048::with_board([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 1);
        assert!(game.slide(Direction::Right));
        assert_eq!(game.board()[0], [0, 0, 0, 4]);
        assert_eq!(game.score(), 4);
        assert!(game.slide(Direction::Down));
        assert_eq!(game.board()[3], [0, 0, 0, 4]);
    }

    #[test]
    fn test_blocked_move_changes_nothing() {
        let mut game = Game2048::with_board([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]], 1);
        assert!(!game.slide(Direction::Left));
        assert!(!game.slide(Direction::Up));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_effective_move_spawns_tile() {
        let mut game = Game2048::with_board([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 3);
        match game.on_key(&Key::Right) {
            ProgramStep::Continue(frame) => assert!(frame.contains("2048 GAME")),
            other => panic!("expected a frame, got {:?}", other),
        }
        assert_eq!(tiles(game.board()), 2);
    }

    #[test]
    fn test_game_over_detection() {
        let full = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        assert!(Game2048::with_board(full, 1).is_over());
        let mergeable = [[2, 2, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        assert!(!Game2048::with_board(mergeable, 1).is_over());
    }

    #[test]
    fn test_reaching_2048_wins() {
        let mut game = Game2048::with_board([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]], 1);
        match game.on_key(&Key::Char('a')) {
            ProgramStep::Exit { output, score } => {
                assert!(output.contains("YOU REACHED 2048"));
                assert_eq!(score, Some(2048));
            }
            other => panic!("expected exit, got {:?}", other),
        }
    }

    #[test]
    fn test_quit_and_pause() {
        let mut game = Game2048::with_board([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 1);
        game.on_key(&Key::Char(' '));
        assert_eq!(game.on_key(&Key::Right), ProgramStep::Continue(String::new()));
        assert_eq!(game.board()[0], [2, 0, 0, 0]);
        assert!(matches!(game.on_key(&Key::Char('q')), ProgramStep::Exit { .. }));
    }
}
