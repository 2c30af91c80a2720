//! OpenLibrary Search API client
//!
//! Direct REST integration with the public catalog endpoint:
//! `GET {base}/search.json?title=<query>&limit=<n>&offset=<n>`.
//!
//! The wire types here mirror the API's field names (`numFound`,
//! `author_name`, `cover_i`); everything public is mapped into the
//! bookfind-core view-model types before it leaves this module.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use bookfind_core::{BookError, BookSummary, Result, SearchBackend, SearchPage};

/// Default base URL for the OpenLibrary API
pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

/// Longest error-response body kept in a failure message
const MAX_ERROR_BODY: usize = 500;

/// Truncate a response body for error messages, backing up to a char
/// boundary so a multi-byte character at the cut never panics.
fn truncate_body(text: &str) -> &str {
    if text.len() <= MAX_ERROR_BODY {
        return text;
    }
    let mut end = MAX_ERROR_BODY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Raw API response structure
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(rename = "numFound", default)]
    num_found: u64,
    #[serde(default)]
    docs: Vec<ApiDoc>,
}

#[derive(Debug, Deserialize)]
struct ApiDoc {
    key: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author_name: Vec<String>,
    cover_i: Option<u64>,
}

impl From<ApiDoc> for BookSummary {
    fn from(doc: ApiDoc) -> Self {
        Self {
            key: doc.key,
            title: doc.title,
            author_names: doc.author_name,
            cover_id: doc.cover_i,
        }
    }
}

/// OpenLibrary search client
pub struct OpenLibraryClient {
    client: Client,
    base_url: String,
}

impl OpenLibraryClient {
    /// Create a client against the public OpenLibrary endpoint
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (tests, mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one page of title matches.
    ///
    /// Every failure mode (transport error, non-success status,
    /// undecodable body) collapses into `BookError::Fetch`; the
    /// caller only ever needs the message.
    pub async fn search_titles(&self, query: &str, limit: u32, offset: u64) -> Result<SearchPage> {
        let url = format!("{}/search.json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("title", query),
                ("limit", &limit.to_string()),
                ("offset", &offset.to_string()),
            ])
            .send()
            .await
            .map_err(|err| BookError::fetch(format!("request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            // Truncate error response to keep stored messages readable
            let truncated = truncate_body(&error_text);
            let ellipsis = if truncated.len() < error_text.len() {
                "..."
            } else {
                ""
            };
            return Err(BookError::fetch(format!(
                "API request failed ({status}): {truncated}{ellipsis}"
            )));
        }

        let data: ApiResponse = response
            .json()
            .await
            .map_err(|err| BookError::fetch(format!("failed to parse response: {err}")))?;

        Ok(SearchPage {
            docs: data.docs.into_iter().map(BookSummary::from).collect(),
            num_found: data.num_found,
        })
    }
}

impl Default for OpenLibraryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchBackend for OpenLibraryClient {
    async fn search(&self, query: &str, limit: u32, offset: u64) -> Result<SearchPage> {
        self.search_titles(query, limit, offset).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_doc() {
        let json = r#"{
            "numFound": 1,
            "docs": [
                {"key": "/works/1", "title": "Dune",
                 "author_name": ["Frank Herbert"], "cover_i": 123}
            ]
        }"#;
        let resp: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.num_found, 1);
        let book = BookSummary::from(resp.docs.into_iter().next().unwrap());
        assert_eq!(book.key, "/works/1");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author_names, vec!["Frank Herbert".to_string()]);
        assert_eq!(book.cover_id, Some(123));
    }

    #[test]
    fn test_decode_missing_optional_fields() {
        // The API omits docs/numFound on some responses and
        // author_name/cover_i per doc; all must default.
        let resp: ApiResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.num_found, 0);
        assert!(resp.docs.is_empty());

        let json = r#"{"docs": [{"key": "/works/9"}]}"#;
        let resp: ApiResponse = serde_json::from_str(json).unwrap();
        let book = BookSummary::from(resp.docs.into_iter().next().unwrap());
        assert!(book.author_names.is_empty());
        assert_eq!(book.cover_id, None);
        assert!(book.title.is_empty());
    }

    #[test]
    fn test_truncate_body_on_char_boundary() {
        // 'é' is two bytes and straddles the 500-byte cut
        let mut body = "a".repeat(MAX_ERROR_BODY - 1);
        body.push('é');
        body.push_str(" server error");
        let truncated = truncate_body(&body);
        assert_eq!(truncated.len(), MAX_ERROR_BODY - 1);
        assert!(truncated.chars().all(|c| c == 'a'));

        // Short and exactly-at-limit bodies pass through unchanged
        assert_eq!(truncate_body("oops"), "oops");
        let exact = "b".repeat(MAX_ERROR_BODY);
        assert_eq!(truncate_body(&exact), exact);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OpenLibraryClient::with_base_url("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
