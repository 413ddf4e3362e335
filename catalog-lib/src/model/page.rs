//! Paginated collection envelope

use serde::Deserialize;
use serde::Serialize;

/// Opaque server-issued descriptor for one page of a collection.
///
/// The API hands back full request descriptors in `next`/`previous` (absolute
/// URLs in the reference deployment). The client replays them verbatim and
/// never interprets them as page numbers or synthesizes adjacent pages
/// locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wraps a server-issued page descriptor.
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self(descriptor.into())
    }

    /// Returns the descriptor for replay.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of a paginated collection.
///
/// `next` and `previous` are `None` at the respective ends of the collection.
/// Walking `next` and then the returned `previous` lands on a page with the
/// same result identifiers (a server guarantee the client relies on but does
/// not verify).
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    results: Vec<T>,
    next: Option<Cursor>,
    previous: Option<Cursor>,
}

impl<T> Page<T> {
    /// Creates a page with no surrounding cursors.
    pub fn new(results: Vec<T>) -> Self {
        Self {
            results,
            next: None,
            previous: None,
        }
    }

    /// Sets the cursor of the following page.
    pub fn with_next(mut self, next: Cursor) -> Self {
        self.next = Some(next);
        self
    }

    /// Sets the cursor of the preceding page.
    pub fn with_previous(mut self, previous: Cursor) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Returns the records in this page.
    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// Consumes the page and returns the records.
    pub fn into_results(self) -> Vec<T> {
        self.results
    }

    /// Returns the cursor of the following page, if any.
    pub fn next(&self) -> Option<&Cursor> {
        self.next.as_ref()
    }

    /// Returns the cursor of the preceding page, if any.
    pub fn previous(&self) -> Option<&Cursor> {
        self.previous.as_ref()
    }

    /// Returns `true` if a following page exists.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns `true` if a preceding page exists.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_envelope() {
        let page: Page<String> = serde_json::from_str(
            r#"{
                "results": ["a", "b"],
                "next": "http://127.0.0.1:8000/api/products/?page=2&page_size=5",
                "previous": null
            }"#,
        )
        .unwrap();

        assert_eq!(page.results(), &["a".to_string(), "b".to_string()]);
        assert!(page.has_next());
        assert!(!page.has_previous());
        assert_eq!(
            page.next().unwrap().as_str(),
            "http://127.0.0.1:8000/api/products/?page=2&page_size=5"
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page: Page<String> = serde_json::from_str(
            r#"{"results": [], "next": null, "previous": "http://host/api/products/?page=1&page_size=5"}"#,
        )
        .unwrap();

        assert!(page.is_empty());
        assert!(!page.has_next());
        assert!(page.has_previous());
    }
}
