// about / portfolio endpoints: json shapes, terminal rendering, fetch
use crate::error::LoadError;
use crate::theme::ansi;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// the `{success, data}` wrapper every endpoint answers with
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default = "yes")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

fn yes() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AboutData {
    pub personal: Personal,
    // either a flat list or `{category: [skill, ...]}`
    pub skills: Value,
    pub social: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    pub demo: Option<String>,
    pub github: Option<String>,
    pub live: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub technologies: Vec<String>,
    pub featured: bool,
    pub status: Option<String>,
    pub links: ProjectLinks,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioMeta {
    pub total_projects: Option<u64>,
    pub featured_count: Option<u64>,
    pub last_updated: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioData {
    pub data: Vec<Project>,
    pub meta: PortfolioMeta,
}

fn unwrap_response<T: DeserializeOwned>(raw: &str) -> Result<T, LoadError> {
    let resp: ApiResponse<T> = serde_json::from_str(raw)?;
    if !resp.success {
        let reason = resp.message.unwrap_or_else(|| "server reported success=false".to_string());
        return Err(LoadError::malformed("$.success", reason));
    }
    resp.data.ok_or_else(|| LoadError::malformed("$.data", "missing"))
}

pub fn parse_about(raw: &str) -> Result<AboutData, LoadError> {
    unwrap_response(raw)
}

pub fn parse_portfolio(raw: &str) -> Result<PortfolioData, LoadError> {
    unwrap_response(raw)
}

fn skill_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn skill_list(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().filter_map(skill_name).collect::<Vec<_>>().join(", "),
        other => skill_name(other).unwrap_or_default(),
    }
}

pub fn render_about(about: &AboutData) -> String {
    let mut lines = Vec::new();
    let p = &about.personal;
    lines.push(String::new());
    lines.push(ansi::paint(ansi::GREEN, &p.name));
    if !p.title.is_empty() {
        lines.push(ansi::paint(ansi::YELLOW, &p.title));
    }
    if let Some(location) = &p.location {
        lines.push(format!("{} {}", ansi::paint(ansi::GRAY, "Location:"), location));
    }
    if !p.bio.is_empty() {
        lines.push(String::new());
        lines.extend(p.bio.lines().map(str::to_string));
    }

    match &about.skills {
        Value::Object(categories) if !categories.is_empty() => {
            lines.push(String::new());
            lines.push(ansi::paint(ansi::CYAN, "Skills:"));
            for (category, skills) in categories {
                lines.push(format!("  {}: {}", ansi::paint(ansi::YELLOW, category), skill_list(skills)));
            }
        }
        Value::Array(items) if !items.is_empty() => {
            lines.push(String::new());
            lines.push(format!("{} {}", ansi::paint(ansi::CYAN, "Skills:"), skill_list(&about.skills)));
        }
        _ => {}
    }

    let social: Vec<String> = about
        .social
        .iter()
        .filter_map(|(name, v)| {
            let url = match v {
                Value::String(s) => Some(s.as_str()),
                Value::Object(obj) => obj.get("url").and_then(Value::as_str),
                _ => None,
            }?;
            (!url.is_empty()).then(|| format!("  {} {}", ansi::paint(ansi::YELLOW, &format!("{}:", name)), url))
        })
        .collect();
    if !social.is_empty() {
        lines.push(String::new());
        lines.push(ansi::paint(ansi::CYAN, "Social:"));
        lines.extend(social);
    }
    lines.push(String::new());
    lines.join("\r\n") + "\r\n"
}

pub fn render_portfolio(portfolio: &PortfolioData) -> String {
    let mut lines = vec![String::new(), ansi::paint(ansi::CYAN, "Portfolio"), String::new()];
    if portfolio.data.is_empty() {
        lines.push("No projects yet.".to_string());
    }
    for project in &portfolio.data {
        let star = if project.featured { ansi::paint(ansi::YELLOW, " *") } else { String::new() };
        let mut head = format!("{}{}", ansi::paint(ansi::GREEN, &project.title), star);
        if let Some(category) = &project.category {
            head.push_str(&format!(" {}", ansi::paint(ansi::GRAY, &format!("[{}]", category))));
        }
        lines.push(head);
        if !project.description.is_empty() {
            lines.push(format!("  {}", project.description));
        }
        if !project.technologies.is_empty() {
            lines.push(format!("  {} {}", ansi::paint(ansi::GRAY, "Tech:"), project.technologies.join(", ")));
        }
        let links = &project.links;
        for (label, url) in [("Live", &links.live), ("Demo", &links.demo), ("GitHub", &links.github)] {
            if let Some(url) = url.as_deref().filter(|u| !u.is_empty()) {
                lines.push(format!("  {} {}", ansi::paint(ansi::GRAY, &format!("{}:", label)), url));
            }
        }
        lines.push(String::new());
    }

    let meta = &portfolio.meta;
    let total = meta.total_projects.unwrap_or(portfolio.data.len() as u64);
    let featured = meta
        .featured_count
        .unwrap_or(portfolio.data.iter().filter(|p| p.featured).count() as u64);
    lines.push(format!("Total projects: {} | Featured: {}", total, featured));
    if let Some(updated) = &meta.last_updated {
        lines.push(ansi::paint(ansi::GRAY, &format!("Last updated: {}", updated)));
    }
    lines.push(ansi::paint(ansi::CYAN, "Tip: 'portfolio open' opens the Portfolio app"));
    lines.join("\r\n") + "\r\n"
}

/// GET `url` and hand back the body text
#[cfg(target_arch = "wasm32")]
pub async fn fetch_text(url: &str) -> Result<String, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

    let mut opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    let headers = Headers::new().map_err(|_| LoadError::Fetch("could not build headers".to_string()))?;
    headers.set("Accept", "application/json").ok();
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| LoadError::Fetch(format!("invalid url: {}", url)))?;
    let window = web_sys::window().ok_or_else(|| LoadError::Fetch("no window".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| LoadError::Fetch(format!("{:?}", e)))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| LoadError::Fetch("fetch did not return a Response".to_string()))?;
    if !resp.ok() {
        return Err(LoadError::Status(resp.status()));
    }
    let text_promise = resp.text().map_err(|e| LoadError::Fetch(format!("{:?}", e)))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| LoadError::Fetch(format!("{:?}", e)))?;
    log::debug!("fetched {}", url);
    text.as_string().ok_or_else(|| LoadError::Fetch("response body is not text".to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_text(url: &str) -> Result<String, LoadError> {
    Err(LoadError::Fetch(format!("{}: network access is only available in the browser", url)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::strip_ansi;

    const ABOUT: &str = r#"{
        "success": true,
        "data": {
            "personal": {"name": "Ada", "title": "Engineer", "bio": "Builds things.", "profileImage": "/a.png"},
            "skills": {"Backend": [{"name": "Rust", "level": 90}, "Laravel"], "Frontend": ["Vue"]},
            "social": {"github": {"url": "https://github.com/ada"}, "twitter": {"url": ""}}
        }
    }"#;

    const PORTFOLIO: &str = r#"{
        "success": true,
        "data": {
            "data": [
                {"id": 1, "title": "LinkOS", "description": "Desktop in a browser", "category": "web",
                 "technologies": ["Laravel", "Vue"], "featured": true, "status": "live",
                 "links": {"live": "https://abdulme.link", "github": null}},
                {"id": 2, "title": "Tool", "description": "", "technologies": [], "featured": false, "links": {}}
            ],
            "meta": {"total_projects": 2, "featured_count": 1, "last_updated": "2024-01-01", "categories": ["web"]}
        }
    }"#;

    #[test]
    fn test_render_about() {
        let about = parse_about(ABOUT).unwrap();
        let text = strip_ansi(&render_about(&about));
        assert!(text.contains("Ada\r\nEngineer"));
        assert!(text.contains("Backend: Rust, Laravel"));
        assert!(text.contains("github: https://github.com/ada"));
        assert!(!text.contains("twitter"));
    }

    #[test]
    fn test_render_portfolio() {
        let portfolio = parse_portfolio(PORTFOLIO).unwrap();
        assert_eq!(portfolio.data.len(), 2);
        let text = strip_ansi(&render_portfolio(&portfolio));
        assert!(text.contains("LinkOS * [web]"));
        assert!(text.contains("Tech: Laravel, Vue"));
        assert!(text.contains("Live: https://abdulme.link"));
        assert!(text.contains("Total projects: 2 | Featured: 1"));
    }

    #[test]
    fn test_failed_response() {
        let err = parse_about(r#"{"success": false, "message": "down"}"#).unwrap_err();
        assert!(err.to_string().contains("down"));
        assert!(matches!(parse_portfolio("<html>"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_native_fetch_is_unavailable() {
        let err = futures::executor::block_on(fetch_text("/api/about")).unwrap_err();
        assert!(matches!(err, LoadError::Fetch(_)));
    }
}
