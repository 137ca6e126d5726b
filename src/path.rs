/// working directory as a stack of segments. the first `floor` segments
/// are the session root and can never be popped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathState {
    segments: Vec<String>,
    floor: usize,
}

impl PathState {
    pub fn new(root: &[String]) -> Self {
        let segments = if root.is_empty() { vec!["home".to_string()] } else { root.to_vec() };
        let floor = segments.len();
        Self { segments, floor }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn root(&self) -> &[String] {
        &self.segments[..self.floor]
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn push(&mut self, segment: &str) {
        self.segments.push(segment.to_string());
    }

    /// returns false when already at the root
    pub fn pop(&mut self) -> bool {
        if self.segments.len() > self.floor {
            self.segments.pop();
            true
        } else {
            false
        }
    }

    pub fn set(&mut self, segments: Vec<String>) {
        if segments.len() >= self.floor && segments[..self.floor] == self.segments[..self.floor] {
            self.segments = segments;
        }
    }

    pub fn reset(&mut self) {
        self.segments.truncate(self.floor);
    }

    /// the path as shown by pwd and the prompt
    pub fn render(&self) -> String {
        self.segments.join("/")
    }

    /// absolute segments for a relative argument. `~` and a leading `/`
    /// start from the root, `.` is skipped and `..` never climbs above
    /// the root
    pub fn join(&self, rel: &str) -> Vec<String> {
        let (mut out, rest) = if rel == "~" {
            (self.root().to_vec(), "")
        } else if let Some(rest) = rel.strip_prefix("~/") {
            (self.root().to_vec(), rest)
        } else if let Some(rest) = rel.strip_prefix('/') {
            (self.root().to_vec(), rest)
        } else {
            (self.segments.clone(), rel)
        };
        for part in rest.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    if out.len() > self.floor {
                        out.pop();
                    }
                }
                name => out.push(name.to_string()),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> PathState {
        PathState::new(&["home".to_string()])
    }

    #[test]
    fn test_pop_never_underflows() {
        let mut path = home();
        assert!(!path.pop());
        assert_eq!(path.depth(), 1);
        path.push("projects");
        assert!(path.pop());
        assert!(!path.pop());
        assert_eq!(path.render(), "home");
    }

    #[test]
    fn test_join_relative() {
        let mut path = home();
        path.push("projects");
        assert_eq!(path.join("web/app"), vec!["home", "projects", "web", "app"]);
        assert_eq!(path.join("../docs"), vec!["home", "docs"]);
        assert_eq!(path.join("./a//b/"), vec!["home", "projects", "a", "b"]);
    }

    #[test]
    fn test_join_clamps_at_root() {
        let mut path = home();
        path.push("projects");
        assert_eq!(path.join("../../.."), vec!["home"]);
        assert_eq!(path.join("~"), vec!["home"]);
        assert_eq!(path.join("~/docs"), vec!["home", "docs"]);
        assert_eq!(path.join("/docs"), vec!["home", "docs"]);
    }

    #[test]
    fn test_set_rejects_paths_outside_root() {
        let mut path = home();
        path.set(vec!["etc".to_string()]);
        assert_eq!(path.render(), "home");
        path.set(vec!["home".to_string(), "x".to_string()]);
        assert_eq!(path.render(), "home/x");
        path.reset();
        assert_eq!(path.render(), "home");
    }
}
