use super::{Program, ProgramStep};
use crate::editor::Key;
use crate::theme::ansi;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EASY: &[&str] = &[
    "The cat sat on the mat.",
    "A quick brown fox jumps over a lazy dog.",
    "Hello world! This is an easy typing test.",
    "Simple words make typing practice fun and easy.",
];

const MEDIUM: &[&str] = &[
    "The quick brown fox jumps over the lazy dog. This pangram contains every letter of the English alphabet at least once.",
    "In a hole in the ground there lived a hobbit. Not a nasty, dirty, wet hole filled with worms and oozy smells.",
    "Programming is the art of telling another human what one wants the computer to do. It requires logical thinking and creativity.",
    "Artificial intelligence is intelligence demonstrated by machines, in contrast to the natural intelligence displayed by humans.",
    "The best way to predict the future is to invent it. Technology advances through innovation and persistent effort.",
];

const HARD: &[&str] = &[
    "Code is like humor. When you have to explain it, it's bad. Good code should be self-documenting and elegant.",
    "Debugging is twice as hard as writing the code in the first place. Therefore, if you write code as cleverly as possible, you are not smart enough to debug it.",
    "The complexity of software is an essential property, not an accidental one. Hence, descriptions of a software entity that abstract away its complexity often abstract away its essence.",
    "Any fool can write code that a computer can understand. Good programmers write code that humans can understand. - Martin Fowler",
    "First, solve the problem. Then, write the code. Don't try to do both at the same time, or you'll end up with neither working properly.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    fn texts(&self) -> &'static [&'static str] {
        match self {
            Difficulty::Easy => EASY,
            Difficulty::Medium => MEDIUM,
            Difficulty::Hard => HARD,
        }
    }

    fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

/// best score key for one difficulty
pub fn score_key(difficulty: Difficulty) -> String {
    format!("typing-{}", difficulty.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Select,
    Running,
}

/// typing speed test: a difficulty menu, then one text typed against the clock
pub struct TypingGame {
    difficulty: Difficulty,
    stage: Stage,
    text: Vec<char>,
    input: Vec<char>,
    index: usize,
    errors: u32,
    correct: u32,
    total: u32,
    started: Option<DateTime<Utc>>,
    // best wpm per difficulty, easy/medium/hard
    bests: [u32; 3],
    rng: StdRng,
}

impl TypingGame {
    pub fn new(difficulty: Difficulty, bests: [u32; 3], rng: StdRng) -> Self {
        Self {
            difficulty,
            stage: Stage::Select,
            text: Vec::new(),
            input: Vec::new(),
            index: 0,
            errors: 0,
            correct: 0,
            total: 0,
            started: None,
            bests,
            rng,
        }
    }

    pub fn from_entropy(difficulty: Difficulty, bests: [u32; 3]) -> Self {
        Self::new(difficulty, bests, StdRng::from_entropy())
    }

    #[cfg(test)]
    fn running(text: &str) -> Self {
        let mut game = Self::new(Difficulty::Easy, [0; 3], StdRng::seed_from_u64(1));
        game.stage = Stage::Running;
        game.text = text.chars().collect();
        game
    }

    fn begin(&mut self) -> String {
        let texts = self.difficulty.texts();
        self.text = texts[self.rng.gen_range(0..texts.len())].chars().collect();
        self.stage = Stage::Running;
        self.input.clear();
        self.index = 0;
        self.errors = 0;
        self.correct = 0;
        self.total = 0;
        self.started = None;
        self.render_test(Utc::now())
    }

    /// one printable character typed at `at`
    pub fn type_at(&mut self, c: char, at: DateTime<Utc>) -> ProgramStep {
        let started = *self.started.get_or_insert(at);
        self.input.push(c);
        self.total += 1;
        if self.text.get(self.index) == Some(&c) {
            self.correct += 1;
        } else {
            self.errors += 1;
        }
        // mistakes still move on
        self.index += 1;

        if self.index >= self.text.len() {
            return self.complete(seconds_between(started, at));
        }
        ProgramStep::Continue(self.render_test(at))
    }

    fn backspace(&mut self, at: DateTime<Utc>) -> ProgramStep {
        if self.input.pop().is_none() {
            return ProgramStep::Continue(String::new());
        }
        self.index = self.index.saturating_sub(1);
        ProgramStep::Continue(self.render_test(at))
    }

    fn accuracy(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (self.correct as f64 / self.total as f64 * 100.0).round() as u32
    }

    fn live_wpm(&self, at: DateTime<Utc>) -> u32 {
        match self.started {
            Some(started) if self.index > 0 => {
                let minutes = seconds_between(started, at) / 60.0;
                (self.index as f64 / 5.0 / minutes).round() as u32
            }
            _ => 0,
        }
    }

    fn render_select(&self) -> String {
        let lines = [
            ansi::paint(ansi::BLUE, "TYPING SPEED TEST"),
            ansi::paint(ansi::GRAY, "Select difficulty or start with current setting"),
            String::new(),
            format!("Current difficulty: {}", ansi::paint(ansi::YELLOW, &self.difficulty.as_str().to_uppercase())),
            String::new(),
            format!("{} - Easy (short, simple words)", ansi::paint(ansi::CYAN, "1")),
            format!("{} - Medium (standard sentences)", ansi::paint(ansi::YELLOW, "2")),
            format!("{} - Hard (complex programming text)", ansi::paint(ansi::RED, "3")),
            String::new(),
            format!("{} - Start test with current difficulty", ansi::paint(ansi::GREEN, "ENTER")),
            format!("{} - Return to terminal", ansi::paint(ansi::GRAY, "ESC / Ctrl+C")),
        ];
        let mut out = String::from("\x1b[2J\x1b[H");
        for line in lines {
            out.push_str(&line);
            out.push_str("\r\n");
        }
        out
    }

    fn render_test(&self, at: DateTime<Utc>) -> String {
        let progress = if self.text.is_empty() { 0 } else { self.index * 100 / self.text.len() };
        let mut out = String::from("\x1b[2J\x1b[H");
        out.push_str(&format!(
            "{} {}\r\n",
            ansi::paint(ansi::BLUE, "TYPING SPEED TEST"),
            ansi::paint(ansi::GRAY, &format!("({})", self.difficulty.as_str().to_uppercase()))
        ));
        out.push_str(&format!("{}\r\n", ansi::paint(ansi::GRAY, "Type the text below as accurately and quickly as possible.")));
        out.push_str(&format!("{}\r\n\r\n", ansi::paint(ansi::GRAY, "Press ESC or Ctrl+C to quit.")));
        out.push_str(&format!(
            "WPM: {} | Accuracy: {} | Progress: {}\r\n",
            ansi::paint(ansi::CYAN, &self.live_wpm(at).to_string()),
            ansi::paint(ansi::GREEN, &format!("{}%", self.accuracy())),
            ansi::paint(ansi::CYAN, &format!("{}%", progress))
        ));
        out.push_str(&format!(
            "Errors: {} | Correct: {}\r\n\r\n",
            ansi::paint(ansi::RED, &self.errors.to_string()),
            ansi::paint(ansi::GREEN, &self.correct.to_string())
        ));

        out.push_str("Text to type:\r\n");
        for (i, c) in self.text.iter().enumerate() {
            let styled = match self.input.get(i) {
                Some(typed) if typed == c => ansi::paint(ansi::GREEN, &c.to_string()),
                Some(_) => format!("\x1b[41m\x1b[37m{}\x1b[0m", c),
                None if i == self.index => format!("\x1b[43m\x1b[30m{}\x1b[0m", c),
                None => ansi::paint(ansi::GRAY, &c.to_string()),
            };
            out.push_str(&styled);
        }
        out.push_str("\r\n\r\nYour input:\r\n");
        let typed: String = self.input.iter().collect();
        out.push_str(&format!("{}{}\r\n", ansi::paint(ansi::CYAN, &typed), ansi::paint(ansi::YELLOW, "▋")));
        out
    }

    /// the whole text was typed in `seconds`
    fn complete(&mut self, seconds: f64) -> ProgramStep {
        let len = self.text.len() as f64;
        let wpm = (len / 5.0 / seconds * 60.0).round() as u32;
        let accuracy = ((len - self.errors as f64) / len * 100.0).round().max(0.0) as u32;
        let diff = self.difficulty.as_str().to_uppercase();

        let mut out = String::from("\x1b[2J\x1b[H");
        out.push_str(&format!("{}\r\n\r\n", ansi::paint(ansi::GREEN, "✓ TYPING TEST COMPLETED!")));
        out.push_str(&format!("{}\r\n", ansi::paint(ansi::CYAN, "Final Results:")));
        out.push_str(&format!("  WPM: {}\r\n", ansi::paint(ansi::YELLOW, &wpm.to_string())));
        out.push_str(&format!("  Accuracy: {}\r\n", ansi::paint(ansi::GREEN, &format!("{}%", accuracy))));
        out.push_str(&format!("  Errors: {}\r\n", ansi::paint(ansi::RED, &self.errors.to_string())));
        out.push_str(&format!("  Time: {}\r\n", ansi::paint(ansi::CYAN, &format!("{:.1}s", seconds))));
        out.push_str(&format!("  Difficulty: {}\r\n\r\n", ansi::paint(ansi::MAGENTA, &diff)));

        let best = &mut self.bests[self.difficulty.index()];
        if wpm <= *best {
            out.push_str(&format!("{}\r\n", ansi::paint(ansi::CYAN, &format!("Your best {} WPM: {}", diff, best))));
        }
        *best = (*best).max(wpm);
        out.push_str(&format!("\r\n{}\r\n", ansi::paint(ansi::GRAY, "--- Personal Bests ---")));
        for difficulty in Difficulty::ALL {
            let label = difficulty.as_str().to_uppercase();
            match self.bests[difficulty.index()] {
                0 => out.push_str(&format!("{}: {}\r\n", label, ansi::paint(ansi::GRAY, "No record"))),
                record => {
                    out.push_str(&format!("{}: {}\r\n", label, ansi::paint(ansi::YELLOW, &format!("{} WPM", record))))
                }
            }
        }
        ProgramStep::Exit { output: out, score: Some(wpm) }
    }
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    // a zero-length run would divide by zero
    ((to - from).num_milliseconds().max(1)) as f64 / 1000.0
}

impl Program for TypingGame {
    fn name(&self) -> &str {
        "typing"
    }

    fn score_key(&self) -> String {
        score_key(self.difficulty)
    }

    fn start(&mut self) -> String {
        self.stage = Stage::Select;
        self.render_select()
    }

    fn on_key(&mut self, key: &Key) -> ProgramStep {
        match self.stage {
            Stage::Select => match key {
                Key::Escape | Key::CtrlC => ProgramStep::Exit { output: String::new(), score: None },
                Key::Enter => ProgramStep::Continue(self.begin()),
                Key::Char(c @ '1'..='3') => {
                    self.difficulty = Difficulty::ALL[(*c as u8 - b'1') as usize];
                    ProgramStep::Continue(self.render_select())
                }
                _ => ProgramStep::Continue(String::new()),
            },
            Stage::Running => match key {
                Key::Escape | Key::CtrlC => ProgramStep::Exit {
                    output: format!("\x1b[2J\x1b[H{}\r\n", ansi::paint(ansi::YELLOW, "Test cancelled.")),
                    score: None,
                },
                Key::Backspace => self.backspace(Utc::now()),
                Key::Char(c) if *c >= ' ' => self.type_at(*c, Utc::now()),
                _ => ProgramStep::Continue(String::new()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::strip_ansi;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn type_text(game: &mut TypingGame, text: &str, total: Duration) -> ProgramStep {
        let chars: Vec<char> = text.chars().collect();
        let mut last = ProgramStep::Continue(String::new());
        for (i, c) in chars.iter().enumerate() {
            let at = if i + 1 == chars.len() { t0() + total } else { t0() + Duration::milliseconds(i as i64 * 100) };
            last = game.type_at(*c, at);
        }
        last
    }

    #[test]
    fn test_select_screen_changes_difficulty() {
        let mut game = TypingGame::new(Difficulty::Medium, [0; 3], StdRng::seed_from_u64(2));
        assert!(strip_ansi(&game.start()).contains("Current difficulty: MEDIUM"));
        match game.on_key(&Key::Char('3')) {
            ProgramStep::Continue(frame) => assert!(strip_ansi(&frame).contains("Current difficulty: HARD")),
            other => panic!("expected frame, got {:?}", other),
        }
        assert_eq!(game.score_key(), "typing-hard");
    }

    #[test]
    fn test_enter_picks_a_text_for_the_difficulty() {
        let mut game = TypingGame::new(Difficulty::Easy, [0; 3], StdRng::seed_from_u64(5));
        game.start();
        game.on_key(&Key::Enter);
        let text: String = game.text.iter().collect();
        assert!(EASY.contains(&text.as_str()));
    }

    #[test]
    fn test_perfect_run_reports_wpm() {
        let mut game = TypingGame::running("hello");
        // five characters in twelve seconds is one word per twelve seconds
        match type_text(&mut game, "hello", Duration::seconds(12)) {
            ProgramStep::Exit { output, score } => {
                let plain = strip_ansi(&output);
                assert!(plain.contains("TYPING TEST COMPLETED!"));
                assert!(plain.contains("WPM: 5"));
                assert!(plain.contains("Accuracy: 100%"));
                assert!(plain.contains("Time: 12.0s"));
                assert!(plain.contains("EASY: 5 WPM"));
                assert_eq!(score, Some(5));
            }
            other => panic!("expected exit, got {:?}", other),
        }
    }

    #[test]
    fn test_mistakes_count_against_accuracy() {
        let mut game = TypingGame::running("hello");
        match type_text(&mut game, "hxllo", Duration::seconds(6)) {
            ProgramStep::Exit { output, .. } => {
                let plain = strip_ansi(&output);
                assert!(plain.contains("Errors: 1"));
                assert!(plain.contains("Accuracy: 80%"));
            }
            other => panic!("expected exit, got {:?}", other),
        }
    }

    #[test]
    fn test_backspace_steps_back() {
        let mut game = TypingGame::running("hello");
        game.type_at('x', t0());
        game.backspace(t0());
        assert_eq!(game.index, 0);
        assert!(game.input.is_empty());
        assert_eq!(game.errors, 1);
        game.type_at('h', t0());
        assert_eq!(game.correct, 1);
    }

    #[test]
    fn test_escape_cancels_running_test() {
        let mut game = TypingGame::running("hello");
        game.type_at('h', t0());
        match game.on_key(&Key::Escape) {
            ProgramStep::Exit { output, score } => {
                assert!(strip_ansi(&output).contains("Test cancelled."));
                assert_eq!(score, None);
            }
            other => panic!("expected exit, got {:?}", other),
        }
    }

    #[test]
    fn test_slower_run_shows_existing_best() {
        let mut game = TypingGame::running("hello");
        game.bests = [30, 0, 0];
        match type_text(&mut game, "hello", Duration::seconds(12)) {
            ProgramStep::Exit { output, .. } => {
                let plain = strip_ansi(&output);
                assert!(plain.contains("Your best EASY WPM: 30"));
                assert!(plain.contains("MEDIUM: No record"));
            }
            other => panic!("expected exit, got {:?}", other),
        }
    }
}
