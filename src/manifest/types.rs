use chrono::NaiveDate;
use serde::Deserialize;

/// A single article record from the manifest.
///
/// Every field is decoded leniently: a record missing `tags` (or any other
/// field) deserializes with that field defaulted instead of failing the whole
/// manifest. A malformed record therefore degrades to an empty tile rather
/// than a blank page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Article {
    /// Slash-delimited path; first segment is the category, second the
    /// subcategory. May be empty for uncategorized articles.
    pub relative_path: String,
    /// Display heading. Also the article's pseudo-identifier in locations.
    pub title: String,
    pub quick_blurb: String,
    pub tags: Vec<String>,
    /// Optional image URL shown as a marker on the tile.
    pub random_image: Option<String>,
    /// Pre-rendered markup of the full article body.
    pub html: String,
    /// Date string as produced by the manifest build, normally YYYY-MM-DD.
    pub published_date: String,
}

impl Default for Article {
    fn default() -> Self {
        Self {
            relative_path: String::new(),
            title: String::new(),
            quick_blurb: String::new(),
            tags: Vec::new(),
            random_image: None,
            html: String::new(),
            published_date: String::new(),
        }
    }
}

impl Article {
    /// First path segment, or None when the path has no non-empty one.
    pub fn category(&self) -> Option<&str> {
        self.relative_path.split('/').next().filter(|s| !s.is_empty())
    }

    /// Second path segment, or None when absent or empty.
    pub fn subcategory(&self) -> Option<&str> {
        self.relative_path.split('/').nth(1).filter(|s| !s.is_empty())
    }

    /// Parse `published_date` as a calendar date.
    ///
    /// The manifest build emits YYYY-MM-DD, with "unknown" for articles it
    /// could not date. Anything unparseable yields None.
    pub fn published(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.published_date, "%Y-%m-%d").ok()
    }

    /// Location of this article's detail view, `/{relative_path}/{title}.md`.
    pub fn location(&self) -> String {
        format!("/{}/{}.md", self.relative_path, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Article {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_full_record() {
        let a = decode(
            r#"{
                "relative_path": "blog/2023/a",
                "title": "A",
                "quick_blurb": "x",
                "tags": ["t1", "t2"],
                "random_image": "https://example.com/i.jpg",
                "html": "<p>A</p>",
                "published_date": "2023-01-01"
            }"#,
        );
        assert_eq!(a.relative_path, "blog/2023/a");
        assert_eq!(a.tags, vec!["t1", "t2"]);
        assert_eq!(a.random_image.as_deref(), Some("https://example.com/i.jpg"));
    }

    #[test]
    fn test_missing_fields_default() {
        let a = decode(r#"{"title": "B"}"#);
        assert_eq!(a.title, "B");
        assert!(a.tags.is_empty());
        assert!(a.random_image.is_none());
        assert_eq!(a.relative_path, "");
    }

    #[test]
    fn test_path_segments() {
        let a = decode(r#"{"relative_path": "blog/2023/a"}"#);
        assert_eq!(a.category(), Some("blog"));
        assert_eq!(a.subcategory(), Some("2023"));

        let top_only = decode(r#"{"relative_path": "notes"}"#);
        assert_eq!(top_only.category(), Some("notes"));
        assert_eq!(top_only.subcategory(), None);

        let empty = decode(r#"{"relative_path": ""}"#);
        assert_eq!(empty.category(), None);
        assert_eq!(empty.subcategory(), None);

        // A trailing slash yields an empty second segment, not a submenu entry
        let trailing = decode(r#"{"relative_path": "blog/"}"#);
        assert_eq!(trailing.category(), Some("blog"));
        assert_eq!(trailing.subcategory(), None);
    }

    #[test]
    fn test_published_date_parsing() {
        let a = decode(r#"{"published_date": "2023-02-02"}"#);
        assert_eq!(a.published(), NaiveDate::from_ymd_opt(2023, 2, 2));

        let unknown = decode(r#"{"published_date": "unknown"}"#);
        assert_eq!(unknown.published(), None);
    }

    #[test]
    fn test_location() {
        let a = decode(r#"{"relative_path": "blog/2023/a", "title": "A"}"#);
        assert_eq!(a.location(), "/blog/2023/a/A.md");
    }
}
