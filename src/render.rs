use regex::Regex;
use std::sync::OnceLock;

fn ansi_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").ok()).as_ref()
}

pub fn strip_ansi(text: &str) -> String {
    match ansi_pattern() {
        Some(pattern) => pattern.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}

/// width on screen, colour codes don't count
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

pub fn pad_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(text));
    format!("{}{}", text, " ".repeat(pad))
}

pub fn center(text: &str, width: usize) -> String {
    let total = width.saturating_sub(visible_width(text));
    let left = total / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(total - left))
}

/// lay items out in as many equal columns as fit into `width`.
/// each row ends with \r\n
pub fn columns(items: &[String], width: usize) -> String {
    if items.is_empty() {
        return String::new();
    }
    let cell = items.iter().map(|i| visible_width(i)).max().unwrap_or(0) + 2;
    let per_row = (width / cell).max(1);
    let mut out = String::new();
    for row in items.chunks(per_row) {
        let line: String = row.iter().map(|item| pad_right(item, cell)).collect();
        out.push_str(line.trim_end());
        out.push_str("\r\n");
    }
    out
}

/// terminal wants \r\n, documents carry \n
pub fn crlf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}
