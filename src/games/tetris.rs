use super::{game_over_banner, Program, ProgramStep};
use crate::editor::Key;
use crate::theme::ansi;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const WIDTH: usize = 10;
pub const HEIGHT: usize = 20;

type Shape = &'static [&'static [u8]];

const I: usize = 0;
const O: usize = 1;

// every rotation of I, O, T, S, Z, J, L in turn order
const PIECES: &[&[Shape]] = &[
    &[
        &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
        &[&[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0]],
        &[&[0, 0, 0, 0], &[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0]],
        &[&[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0]],
    ],
    &[&[&[1, 1], &[1, 1]]],
    &[
        &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
        &[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]],
        &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]],
        &[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]],
    ],
    &[&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]], &[&[0, 1, 0], &[0, 1, 1], &[0, 0, 1]]],
    &[&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]], &[&[0, 0, 1], &[0, 1, 1], &[0, 1, 0]]],
    &[
        &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]],
        &[&[0, 1, 1], &[0, 1, 0], &[0, 1, 0]],
        &[&[0, 0, 0], &[1, 1, 1], &[0, 0, 1]],
        &[&[0, 1, 0], &[0, 1, 0], &[1, 1, 0]],
    ],
    &[
        &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]],
        &[&[0, 1, 0], &[0, 1, 0], &[0, 1, 1]],
        &[&[0, 0, 0], &[1, 1, 1], &[1, 0, 0]],
        &[&[1, 1, 0], &[0, 1, 0], &[0, 1, 0]],
    ],
];

const LINE_POINTS: [u32; 5] = [0, 40, 100, 300, 1200];
const CELL_COLORS: [&str; 7] = ["\x1b[41m", "\x1b[42m", "\x1b[44m", "\x1b[45m", "\x1b[46m", "\x1b[47m", "\x1b[40m"];

/// 0 is empty, otherwise the piece kind + 1
pub type Board = [[u8; WIDTH]; HEIGHT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Piece {
    kind: usize,
    rotation: usize,
    x: i32,
    y: i32,
}

impl Piece {
    fn shape(&self) -> Shape {
        PIECES[self.kind][self.rotation]
    }

    /// board coordinates of the filled cells, rows above the board included
    fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape().iter().enumerate().flat_map(move |(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v != 0)
                .map(move |(dx, _)| (self.x + dx as i32, self.y + dy as i32))
        })
    }
}

pub struct TetrisGame {
    board: Board,
    piece: Piece,
    score: u32,
    level: u32,
    lines: u32,
    over: bool,
    rng: StdRng,
}

impl TetrisGame {
    pub fn new(rng: StdRng) -> Self {
        Self {
            board: [[0; WIDTH]; HEIGHT],
            piece: Piece { kind: O, rotation: 0, x: 0, y: 0 },
            score: 0,
            level: 1,
            lines: 0,
            over: false,
            rng,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    #[cfg(test)]
    fn with_board(board: Board, kind: usize, seed: u64) -> Self {
        let mut game = Self::new(StdRng::seed_from_u64(seed));
        game.board = board;
        game.spawn_kind(kind);
        game
    }

    #[cfg(test)]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[cfg(test)]
    pub fn lines(&self) -> u32 {
        self.lines
    }

    #[cfg(test)]
    pub fn is_over(&self) -> bool {
        self.over
    }

    fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y)| {
            x < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 || (y >= 0 && self.board[y as usize][x as usize] != 0)
        })
    }

    fn spawn(&mut self) {
        let kind = self.rng.gen_range(0..PIECES.len());
        self.spawn_kind(kind);
    }

    /// put a new piece at the top. no room ends the game
    fn spawn_kind(&mut self, kind: usize) {
        let (width, y) = match kind {
            I => (4, -2),
            O => (2, 0),
            _ => (3, -1),
        };
        self.piece = Piece { kind, rotation: 0, x: (WIDTH as i32 - width) / 2, y };
        if self.collides(&self.piece) {
            self.over = true;
        }
    }

    /// sideways move, false when blocked
    pub fn shift(&mut self, dx: i32) -> bool {
        let moved = Piece { x: self.piece.x + dx, ..self.piece };
        if self.collides(&moved) {
            return false;
        }
        self.piece = moved;
        true
    }

    /// one row down. a blocked piece locks, full rows clear and the next piece spawns
    pub fn drop_one(&mut self) {
        let moved = Piece { y: self.piece.y + 1, ..self.piece };
        if !self.collides(&moved) {
            self.piece = moved;
            return;
        }
        self.lock();
        self.clear_lines();
        self.spawn();
    }

    /// turn clockwise, nudging off walls when the turn doesn't fit
    pub fn rotate(&mut self) {
        if self.piece.kind == O {
            return;
        }
        let rotation = (self.piece.rotation + 1) % PIECES[self.piece.kind].len();
        let mut kicks = vec![0, -1, 1, 2];
        if self.piece.kind == I {
            kicks.push(-2);
        }
        for dx in kicks {
            let turned = Piece { rotation, x: self.piece.x + dx, ..self.piece };
            if !self.collides(&turned) {
                self.piece = turned;
                return;
            }
        }
    }

    fn lock(&mut self) {
        let value = self.piece.kind as u8 + 1;
        let cells: Vec<(i32, i32)> = self.piece.cells().collect();
        for (x, y) in cells {
            if y >= 0 {
                self.board[y as usize][x as usize] = value;
            }
        }
    }

    /// remove full rows, score them and level up every ten lines
    fn clear_lines(&mut self) -> u32 {
        let kept: Vec<[u8; WIDTH]> = self.board.iter().filter(|row| row.iter().any(|v| *v == 0)).copied().collect();
        let cleared = HEIGHT - kept.len();
        if cleared == 0 {
            return 0;
        }
        let mut board = [[0; WIDTH]; HEIGHT];
        board[cleared..].copy_from_slice(&kept);
        self.board = board;

        self.lines += cleared as u32;
        self.score += LINE_POINTS[cleared.min(4)] * self.level;
        self.level = self.level.max(self.lines / 10 + 1);
        cleared as u32
    }

    fn render(&self) -> String {
        let mut display = self.board.map(|row| row.map(|v| v as i8));
        for (x, y) in self.piece.cells() {
            if (0..WIDTH as i32).contains(&x) && (0..HEIGHT as i32).contains(&y) {
                display[y as usize][x as usize] = -1;
            }
        }

        let mut out = String::from("\x1b[2J\x1b[H");
        out.push_str(&format!("{}\r\n", ansi::paint(ansi::MAGENTA, "TETRIS")));
        out.push_str(&format!("{}\r\n", ansi::paint(ansi::GRAY, "A/D: Move | S: Drop | W: Rotate | Q/ESC: Quit")));
        out.push_str(&format!(
            "Score: {} | Level: {} | Lines: {}\r\n\r\n",
            ansi::paint(ansi::CYAN, &self.score.to_string()),
            ansi::paint(ansi::YELLOW, &self.level.to_string()),
            ansi::paint(ansi::GREEN, &self.lines.to_string())
        ));
        out.push_str(&format!("┌{}┐\r\n", "─".repeat(WIDTH)));
        for row in display.iter() {
            out.push('│');
            for &cell in row.iter() {
                match cell {
                    -1 => out.push_str("\x1b[43m \x1b[0m"),
                    0 => out.push(' '),
                    v => {
                        out.push_str(CELL_COLORS[(v as usize - 1) % CELL_COLORS.len()]);
                        out.push_str(" \x1b[0m");
                    }
                }
            }
            out.push_str("│\r\n");
        }
        out.push_str(&format!("└{}┘\r\n", "─".repeat(WIDTH)));
        out
    }

    fn finish(&self) -> ProgramStep {
        let mut out = game_over_banner("GAME OVER!");
        out.push_str(&format!("Final Score: {}\r\n", ansi::paint(ansi::YELLOW, &self.score.to_string())));
        out.push_str(&format!("Level Reached: {}\r\n", ansi::paint(ansi::YELLOW, &self.level.to_string())));
        out.push_str(&format!("Lines Cleared: {}\r\n", ansi::paint(ansi::YELLOW, &self.lines.to_string())));
        ProgramStep::Exit { output: out, score: Some(self.score) }
    }
}

impl Program for TetrisGame {
    fn name(&self) -> &str {
        "tetris"
    }

    fn start(&mut self) -> String {
        self.board = [[0; WIDTH]; HEIGHT];
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.over = false;
        self.spawn();
        self.render()
    }

    fn on_key(&mut self, key: &Key) -> ProgramStep {
        let changed = match key {
            Key::Char('q') | Key::Char('Q') | Key::Escape | Key::CtrlC => return self.finish(),
            Key::Char('a') | Key::Char('A') | Key::Left => self.shift(-1),
            Key::Char('d') | Key::Char('D') | Key::Right => self.shift(1),
            Key::Char('s') | Key::Char('S') | Key::Down => {
                self.drop_one();
                true
            }
            Key::Char('w') | Key::Char('W') | Key::Up => {
                self.rotate();
                true
            }
            _ => false,
        };
        if self.over {
            return self.finish();
        }
        if changed {
            ProgramStep::Continue(self.render())
        } else {
            ProgramStep::Continue(String::new())
        }
    }

    /// gravity speeds up 75ms per level, never below 50ms
    fn tick_interval(&self) -> Option<u32> {
        Some(800u32.saturating_sub((self.level - 1) * 75).max(50))
    }

    fn on_tick(&mut self) -> ProgramStep {
        self.drop_one();
        if self.over {
            return self.finish();
        }
        ProgramStep::Continue(self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: usize = 2;

    fn full_row(gap: Option<usize>) -> [u8; WIDTH] {
        let mut row = [3; WIDTH];
        if let Some(x) = gap {
            row[x] = 0;
        }
        row
    }

    #[test]
    fn test_spawn_positions() {
        let game = TetrisGame::with_board([[0; WIDTH]; HEIGHT], I, 1);
        assert_eq!((game.piece.x, game.piece.y), (3, -2));
        let game = TetrisGame::with_board([[0; WIDTH]; HEIGHT], O, 1);
        assert_eq!((game.piece.x, game.piece.y), (4, 0));
        let game = TetrisGame::with_board([[0; WIDTH]; HEIGHT], T, 1);
        assert_eq!((game.piece.x, game.piece.y), (3, -1));
    }

    #[test]
    fn test_start_renders_board() {
        let mut game = TetrisGame::new(StdRng::seed_from_u64(4));
        let frame = game.start();
        assert!(frame.contains("TETRIS"));
        assert!(frame.contains("\x1b[43m \x1b[0m"));
        assert!(!game.is_over());
    }

    #[test]
    fn test_walls_block_shifts() {
        let mut game = TetrisGame::with_board([[0; WIDTH]; HEIGHT], O, 1);
        for _ in 0..4 {
            assert!(game.shift(-1));
        }
        assert!(!game.shift(-1));
        assert_eq!(game.piece.x, 0);
    }

    #[test]
    fn test_blocked_drop_locks_piece() {
        let mut game = TetrisGame::with_board([[0; WIDTH]; HEIGHT], O, 1);
        game.piece.y = 18;
        game.drop_one();
        assert_eq!(game.board[18][4], 2);
        assert_eq!(game.board[19][5], 2);
        assert!(!game.is_over());
    }

    #[test]
    fn test_clearing_lines_scores_by_level() {
        let mut board = [[0; WIDTH]; HEIGHT];
        board[19] = full_row(None);
        board[18] = full_row(Some(0));
        let mut game = TetrisGame::with_board(board, O, 1);
        assert_eq!(game.clear_lines(), 1);
        assert_eq!(game.score(), 40);
        assert_eq!(game.lines(), 1);
        // the partial row fell to the bottom
        assert_eq!(game.board[19], full_row(Some(0)));

        let mut board = [[0; WIDTH]; HEIGHT];
        for row in board.iter_mut().skip(16) {
            *row = full_row(None);
        }
        let mut game = TetrisGame::with_board(board, O, 1);
        game.level = 2;
        assert_eq!(game.clear_lines(), 4);
        assert_eq!(game.score(), 2400);
    }

    #[test]
    fn test_tenth_line_levels_up_and_speeds_up() {
        let mut board = [[0; WIDTH]; HEIGHT];
        board[19] = full_row(None);
        let mut game = TetrisGame::with_board(board, O, 1);
        game.lines = 9;
        assert_eq!(game.tick_interval(), Some(800));
        game.clear_lines();
        assert_eq!(game.level(), 2);
        assert_eq!(game.tick_interval(), Some(725));
        game.level = 20;
        assert_eq!(game.tick_interval(), Some(50));
    }

    #[test]
    fn test_rotation_kicks_off_the_wall() {
        let mut game = TetrisGame::with_board([[0; WIDTH]; HEIGHT], I, 1);
        game.piece = Piece { kind: I, rotation: 1, x: 7, y: 5 };
        game.rotate();
        assert_eq!(game.piece, Piece { kind: I, rotation: 2, x: 6, y: 5 });
    }

    #[test]
    fn test_square_does_not_rotate() {
        let mut game = TetrisGame::with_board([[0; WIDTH]; HEIGHT], O, 1);
        let before = game.piece;
        game.on_key(&Key::Char('w'));
        assert_eq!(game.piece, before);
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut board = [[0; WIDTH]; HEIGHT];
        board[0] = full_row(Some(0));
        let mut game = TetrisGame::with_board(board, O, 1);
        assert!(game.is_over());
        match game.on_tick() {
            ProgramStep::Exit { output, score } => {
                assert!(output.contains("Lines Cleared"));
                assert_eq!(score, Some(0));
            }
            other => panic!("expected exit, got {:?}", other),
        }
    }
}
