use super::game2048::Direction;
use super::{game_over_banner, Program, ProgramStep};
use crate::editor::Key;
use crate::theme::ansi;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub const WIDTH: i32 = 30;
pub const HEIGHT: i32 = 20;
const TICK_MS: u32 = 150;
const FOOD_POINTS: u32 = 10;

pub type Cell = (i32, i32);

fn delta(dir: Direction) -> Cell {
    match dir {
        Direction::Up => (0, -1),
        Direction::Down => (0, 1),
        Direction::Left => (-1, 0),
        Direction::Right => (1, 0),
    }
}

fn is_horizontal(dir: Direction) -> bool {
    matches!(dir, Direction::Left | Direction::Right)
}

/// snake on a 30x20 board, one cell per clock tick
pub struct SnakeGame {
    // front is the head
    snake: VecDeque<Cell>,
    food: Option<Cell>,
    heading: Direction,
    score: u32,
    best: u32,
    paused: bool,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new(rng: StdRng, best: u32) -> Self {
        Self {
            snake: VecDeque::from([(WIDTH / 2, HEIGHT / 2)]),
            food: None,
            heading: Direction::Right,
            score: 0,
            best,
            paused: false,
            rng,
        }
    }

    pub fn from_entropy(best: u32) -> Self {
        Self::new(StdRng::from_entropy(), best)
    }

    #[cfg(test)]
    fn with_snake(cells: &[Cell], heading: Direction, food: Cell, seed: u64) -> Self {
        let mut game = Self::new(StdRng::seed_from_u64(seed), 0);
        game.snake = cells.iter().copied().collect();
        game.heading = heading;
        game.food = Some(food);
        game
    }

    #[cfg(test)]
    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    #[cfg(test)]
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    #[cfg(test)]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// food goes on a random free cell, `None` once the snake fills the board
    fn place_food(&mut self) {
        let free: Vec<Cell> = (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|cell| !self.snake.contains(cell))
            .collect();
        self.food = if free.is_empty() { None } else { Some(free[self.rng.gen_range(0..free.len())]) };
    }

    /// only quarter turns, reversing into the body is ignored
    pub fn turn(&mut self, dir: Direction) {
        if is_horizontal(dir) != is_horizontal(self.heading) {
            self.heading = dir;
        }
    }

    /// move one cell. false when the head hit a wall or the body
    pub fn advance(&mut self) -> bool {
        let Some(&(x, y)) = self.snake.front() else {
            return false;
        };
        let (dx, dy) = delta(self.heading);
        let head = (x + dx, y + dy);
        if head.0 < 0 || head.0 >= WIDTH || head.1 < 0 || head.1 >= HEIGHT {
            return false;
        }
        if self.snake.iter().skip(1).any(|c| *c == head) {
            return false;
        }
        self.snake.push_front(head);
        if self.food == Some(head) {
            self.score += FOOD_POINTS;
            self.place_food();
        } else {
            self.snake.pop_back();
        }
        true
    }

    fn render(&self) -> String {
        let mut out = String::from("\x1b[2J\x1b[H");
        out.push_str(&format!("{}\r\n", ansi::paint(ansi::GREEN, "SNAKE GAME")));
        out.push_str(&format!("{}\r\n", ansi::paint(ansi::GRAY, "WASD/Arrow Keys: Move | SPACE: Pause | Q/ESC: Quit")));
        out.push_str(&format!(
            "Score: {} | Length: {}\r\n",
            ansi::paint(ansi::CYAN, &self.score.to_string()),
            ansi::paint(ansi::YELLOW, &self.snake.len().to_string())
        ));
        if self.paused {
            out.push_str("\x1b[43m\x1b[30m PAUSED - Press SPACE to continue \x1b[0m\r\n");
        }
        out.push_str("\r\n");

        let head = self.snake.front().copied();
        out.push_str(&format!("┌{}┐\r\n", "─".repeat(WIDTH as usize)));
        for y in 0..HEIGHT {
            out.push('│');
            for x in 0..WIDTH {
                let cell = (x, y);
                if head == Some(cell) {
                    out.push_str(&ansi::paint(ansi::GREEN, "●"));
                } else if self.snake.contains(&cell) {
                    out.push_str(&ansi::paint(ansi::GREEN, "○"));
                } else if self.food == Some(cell) {
                    out.push_str(&ansi::paint(ansi::RED, "♦"));
                } else {
                    out.push(' ');
                }
            }
            out.push_str("│\r\n");
        }
        out.push_str(&format!("└{}┘\r\n", "─".repeat(WIDTH as usize)));
        out
    }

    fn finish(&self) -> ProgramStep {
        let mut out = game_over_banner("GAME OVER!");
        out.push_str(&format!("Final Score: {}\r\n", ansi::paint(ansi::YELLOW, &self.score.to_string())));
        out.push_str(&format!("High Score: {}\r\n", ansi::paint(ansi::YELLOW, &self.best.max(self.score).to_string())));
        out.push_str(&format!("Snake Length: {}\r\n", ansi::paint(ansi::YELLOW, &self.snake.len().to_string())));
        ProgramStep::Exit { output: out, score: Some(self.score) }
    }
}

impl Program for SnakeGame {
    fn name(&self) -> &str {
        "snake"
    }

    fn start(&mut self) -> String {
        self.snake = VecDeque::from([(WIDTH / 2, HEIGHT / 2)]);
        self.heading = Direction::Right;
        self.score = 0;
        self.paused = false;
        self.place_food();
        self.render()
    }

    fn on_key(&mut self, key: &Key) -> ProgramStep {
        let dir = match key {
            Key::Char('q') | Key::Char('Q') | Key::Escape | Key::CtrlC => return self.finish(),
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
        // the turn shows on the next tick
        self.turn(dir);
        ProgramStep::Continue(String::new())
    }

    fn tick_interval(&self) -> Option<u32> {
        Some(TICK_MS)
    }

    fn on_tick(&mut self) -> ProgramStep {
        if self.paused {
            return ProgramStep::Continue(String::new());
        }
        if !self.advance() || self.food.is_none() {
            return self.finish();
        }
        ProgramStep::Continue(self.render())
    }
}
