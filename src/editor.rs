// line editing for the prompt. every edit returns the escape sequence
// that brings the screen in sync, starting from where the cursor is
const CLEAR_TO_END: &str = "\x1b[K";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Escape,
    CtrlA,
    CtrlC,
    CtrlE,
    CtrlK,
    CtrlL,
    CtrlU,
    CtrlW,
    Unknown,
}

/// split raw terminal data (a keystroke or a whole paste) into keys
pub fn decode(data: &str) -> Vec<Key> {
    let chars: Vec<char> = data.chars().collect();
    let mut keys = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        let key = match c {
            '\x1b' => {
                if i < chars.len() && (chars[i] == '[' || chars[i] == 'O') {
                    // CSI / SS3: parameters then a final byte in @..~
                    let start = i;
                    i += 1;
                    while i < chars.len() && !('@'..='~').contains(&chars[i]) {
                        i += 1;
                    }
                    let end = (i + 1).min(chars.len());
                    let seq: String = chars[start..end].iter().collect();
                    i = end;
                    escape_key(&seq)
                } else {
                    Key::Escape
                }
            }
            '\r' => Key::Enter,
            '\n' => {
                if i >= 2 && chars[i - 2] == '\r' {
                    continue;
                }
                Key::Enter
            }
            '\x7f' | '\x08' => Key::Backspace,
            '\t' => Key::Tab,
            '\x01' => Key::CtrlA,
            '\x03' => Key::CtrlC,
            '\x05' => Key::CtrlE,
            '\x0b' => Key::CtrlK,
            '\x0c' => Key::CtrlL,
            '\x15' => Key::CtrlU,
            '\x17' => Key::CtrlW,
            c if c.is_control() => Key::Unknown,
            c => Key::Char(c),
        };
        keys.push(key);
    }
    keys
}

fn escape_key(seq: &str) -> Key {
    match seq {
        "[A" | "OA" => Key::Up,
        "[B" | "OB" => Key::Down,
        "[C" | "OC" => Key::Right,
        "[D" | "OD" => Key::Left,
        "[H" | "OH" | "[1~" => Key::Home,
        "[F" | "OF" | "[4~" => Key::End,
        "[3~" => Key::Delete,
        _ => Key::Unknown,
    }
}

pub fn cursor_back(n: usize) -> String {
    if n == 0 { String::new() } else { format!("\x1b[{}D", n) }
}

pub fn cursor_forward(n: usize) -> String {
    if n == 0 { String::new() } else { format!("\x1b[{}C", n) }
}

/// the text after the prompt plus a cursor, `0 <= cursor <= len`
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    chars: Vec<char>,
    cursor: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn tail(&self) -> String {
        self.chars[self.cursor..].iter().collect()
    }

    /// echo the inserted run and whatever followed it, then step back
    pub fn insert(&mut self, run: &str) -> String {
        let new: Vec<char> = run.chars().collect();
        if new.is_empty() {
            return String::new();
        }
        let n = new.len();
        self.chars.splice(self.cursor..self.cursor, new);
        self.cursor += n;
        let tail = self.tail();
        let tail_len = self.chars.len() - self.cursor;
        format!("{}{}{}", run, tail, cursor_back(tail_len))
    }

    pub fn backspace(&mut self) -> String {
        if self.cursor == 0 {
            return String::new();
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        let tail_len = self.chars.len() - self.cursor;
        format!("\x08{} {}", self.tail(), cursor_back(tail_len + 1))
    }

    pub fn delete(&mut self) -> String {
        if self.cursor == self.chars.len() {
            return String::new();
        }
        self.chars.remove(self.cursor);
        let tail_len = self.chars.len() - self.cursor;
        format!("{} {}", self.tail(), cursor_back(tail_len + 1))
    }

    pub fn left(&mut self) -> String {
        if self.cursor == 0 {
            return String::new();
        }
        self.cursor -= 1;
        "\x1b[D".to_string()
    }

    pub fn right(&mut self) -> String {
        if self.cursor == self.chars.len() {
            return String::new();
        }
        self.cursor += 1;
        "\x1b[C".to_string()
    }

    pub fn home(&mut self) -> String {
        let out = cursor_back(self.cursor);
        self.cursor = 0;
        out
    }

    pub fn end(&mut self) -> String {
        let out = cursor_forward(self.chars.len() - self.cursor);
        self.cursor = self.chars.len();
        out
    }

    /// Ctrl+U
    pub fn kill_to_start(&mut self) -> String {
        self.remove_before(0)
    }

    /// Ctrl+K
    pub fn kill_to_end(&mut self) -> String {
        self.chars.truncate(self.cursor);
        CLEAR_TO_END.to_string()
    }

    /// Ctrl+W: trailing spaces then the word before the cursor
    pub fn delete_word(&mut self) -> String {
        let mut start = self.cursor;
        while start > 0 && self.chars[start - 1] == ' ' {
            start -= 1;
        }
        while start > 0 && self.chars[start - 1] != ' ' {
            start -= 1;
        }
        self.remove_before(start)
    }

    fn remove_before(&mut self, start: usize) -> String {
        let removed = self.cursor - start;
        if removed == 0 {
            return String::new();
        }
        self.chars.drain(start..self.cursor);
        self.cursor = start;
        let tail = self.tail();
        let tail_len = self.chars.len() - self.cursor;
        format!("{}{}{}{}", cursor_back(removed), tail, CLEAR_TO_END, cursor_back(tail_len))
    }

    /// swap in a whole new line (history recall, completion), cursor at end
    pub fn replace(&mut self, text: &str) -> String {
        let out = format!("{}{}{}", cursor_back(self.cursor), CLEAR_TO_END, text);
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
        out
    }

    /// full redraw of the line, used right after a fresh prompt
    pub fn render(&self) -> String {
        format!("{}{}", self.text(), cursor_back(self.chars.len() - self.cursor))
    }

    /// hand the line over and start empty
    pub fn take(&mut self) -> String {
        let text = self.text();
        self.chars.clear();
        self.cursor = 0;
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> LineEditor {
        let mut ed = LineEditor::new();
        ed.insert(s);
        ed
    }

    #[test]
    fn test_decode_keys() {
        assert_eq!(decode("a"), vec![Key::Char('a')]);
        assert_eq!(decode("\x1b[A\x1b[D\x1b[3~"), vec![Key::Up, Key::Left, Key::Delete]);
        assert_eq!(decode("\r"), vec![Key::Enter]);
        assert_eq!(decode("\x7f\t\x03"), vec![Key::Backspace, Key::Tab, Key::CtrlC]);
        assert_eq!(decode("\x1b"), vec![Key::Escape]);
        assert_eq!(decode("\x1bOH"), vec![Key::Home]);
    }

    #[test]
    fn test_decode_paste() {
        assert_eq!(
            decode("ls\r\npwd"),
            vec![Key::Char('l'), Key::Char('s'), Key::Enter, Key::Char('p'), Key::Char('w'), Key::Char('d')]
        );
    }

    #[test]
    fn test_insert_at_end_echoes() {
        let mut ed = LineEditor::new();
        assert_eq!(ed.insert("l"), "l");
        assert_eq!(ed.insert("s"), "s");
        assert_eq!(ed.text(), "ls");
        assert_eq!(ed.cursor(), 2);
    }

    #[test]
    fn test_insert_in_middle_rewrites_tail() {
        let mut ed = typed("ac");
        ed.left();
        assert_eq!(ed.insert("b"), "bc\x1b[1D");
        assert_eq!(ed.text(), "abc");
        assert_eq!(ed.cursor(), 2);
    }

    #[test]
    fn test_backspace() {
        let mut ed = typed("abc");
        ed.left();
        assert_eq!(ed.backspace(), "\x08c \x1b[2D");
        assert_eq!(ed.text(), "ac");
        assert_eq!(ed.cursor(), 1);
        ed.home();
        assert_eq!(ed.backspace(), "");
        assert_eq!(ed.text(), "ac");
    }

    #[test]
    fn test_arrows_stop_at_bounds() {
        let mut ed = typed("ab");
        assert_eq!(ed.right(), "");
        assert_eq!(ed.left(), "\x1b[D");
        assert_eq!(ed.left(), "\x1b[D");
        assert_eq!(ed.left(), "");
        assert_eq!(ed.cursor(), 0);
        assert_eq!(ed.end(), "\x1b[2C");
    }

    #[test]
    fn test_delete_under_cursor() {
        let mut ed = typed("abc");
        ed.home();
        assert_eq!(ed.delete(), "bc \x1b[3D");
        assert_eq!(ed.text(), "bc");
        ed.end();
        assert_eq!(ed.delete(), "");
    }

    #[test]
    fn test_kill_and_word_delete() {
        let mut ed = typed("cat notes.txt  ");
        ed.delete_word();
        assert_eq!(ed.text(), "cat ");
        let mut ed = typed("hello world");
        for _ in 0..5 {
            ed.left();
        }
        assert_eq!(ed.kill_to_end(), "\x1b[K");
        assert_eq!(ed.text(), "hello ");
        assert_eq!(ed.kill_to_start(), "\x1b[6D\x1b[K");
        assert!(ed.is_empty());
    }

    #[test]
    fn test_replace_and_take() {
        let mut ed = typed("pw");
        assert_eq!(ed.replace("cd x"), "\x1b[2D\x1b[Kcd x");
        assert_eq!(ed.cursor(), 4);
        assert_eq!(ed.take(), "cd x");
        assert!(ed.is_empty());
        assert_eq!(ed.cursor(), 0);
    }
}
