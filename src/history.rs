/// submitted command lines plus the up/down recall cursor.
/// `cursor == None` means "not navigating"
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self { entries: Vec::new(), cursor: None, limit }
    }

    pub fn push(&mut self, line: &str) {
        self.entries.push(line.to_string());
        if self.limit > 0 && self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
        self.cursor = None;
    }

    /// Up arrow. `None` when there is nothing to recall.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let idx = match self.cursor {
            None => self.entries.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(idx);
        Some(&self.entries[idx])
    }

    /// Down arrow. walking past the newest entry stops navigating and
    /// hands back an empty line
    pub fn recall_next(&mut self) -> Option<&str> {
        let idx = self.cursor? + 1;
        if idx >= self.entries.len() {
            self.cursor = None;
            return Some("");
        }
        self.cursor = Some(idx);
        Some(&self.entries[idx])
    }

    pub fn stop_navigating(&mut self) {
        self.cursor = None;
    }

    #[cfg(test)]
    pub fn is_navigating(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// used when restoring a saved session
    pub fn replace(&mut self, entries: Vec<String>) {
        self.entries = entries;
        if self.limit > 0 && self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
        self.cursor = None;
    }
}
