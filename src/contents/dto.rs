use serde::Deserialize;

use super::services::{ContentInput, DEFAULT_PAGE_SIZE};

#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub is_free: bool,
}

impl From<ContentRequest> for ContentInput {
    fn from(r: ContentRequest) -> Self {
        Self {
            title: r.title.trim().to_string(),
            description: r.description.trim().to_string(),
            url: r.url.trim().to_string(),
            type_name: r.type_name.trim().to_lowercase(),
            is_free: r.is_free,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}
fn default_page() -> i64 {
    1
}
fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_request_reads_type_field() {
        let req: ContentRequest = serde_json::from_value(serde_json::json!({
            "title": " Intro ",
            "url": "https://cdn.example.com/1",
            "type": "Video",
            "is_free": true
        }))
        .unwrap();
        let input = ContentInput::from(req);
        assert_eq!(input.title, "Intro");
        assert_eq!(input.type_name, "video");
        assert_eq!(input.description, "");
        assert!(input.is_free);
    }

    #[test]
    fn page_query_defaults() {
        let q: PageQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!((q.page, q.page_size), (1, 10));
    }
}
