use crate::core::{Row, RowSource};
use crate::utils::error::Result;

/// Slug comparison key: surrounding whitespace dropped, lowercased.
pub fn normalize_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}

/// Finds partner rows by slug. Every lookup re-reads the whole sheet; there
/// is no index, the partner list is small.
pub struct BusinessResolver<S: RowSource> {
    source: S,
}

impl<S: RowSource> BusinessResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn fetch_all(&self) -> Result<Vec<Row>> {
        self.source.fetch_rows().await
    }

    /// First row whose normalized `slug` equals the normalized request, or
    /// `None`. A missing slug is not an error.
    pub async fn resolve_by_slug(&self, slug: &str) -> Result<Option<Row>> {
        let rows = self.fetch_all().await?;
        Ok(find_by_slug(rows, slug))
    }

    /// Raw slugs of every row that has one. Fetch failures are logged and
    /// produce an empty list so callers can skip ahead-of-time rendering.
    pub async fn known_slugs(&self) -> Vec<String> {
        match self.fetch_all().await {
            Ok(rows) => rows
                .into_iter()
                .map(|row| row.slug().to_string())
                .filter(|slug| !slug.is_empty())
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, category = ?e.category(), "error generating known slugs");
                Vec::new()
            }
        }
    }
}

pub fn find_by_slug(rows: Vec<Row>, slug: &str) -> Option<Row> {
    let target = normalize_slug(slug);
    rows.into_iter()
        .find(|row| normalize_slug(row.slug()) == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FlagshipError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticRows {
        rows: Vec<Row>,
        calls: AtomicUsize,
    }

    impl StaticRows {
        fn new(rows: Vec<Row>) -> Self {
            Self {
                rows,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RowSource for StaticRows {
        async fn fetch_rows(&self) -> Result<Vec<Row>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.clone())
        }
    }

    struct FailingRows;

    #[async_trait]
    impl RowSource for FailingRows {
        async fn fetch_rows(&self) -> Result<Vec<Row>> {
            Err(FlagshipError::SheetsApiError {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                url: "http://sheets.test".to_string(),
                range: "Sheet1!A1:Z9".to_string(),
                body: String::new(),
            })
        }
    }

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs.iter().copied().collect()
    }

    #[tokio::test]
    async fn test_resolve_ignores_case_and_whitespace_on_both_sides() {
        let resolver = BusinessResolver::new(StaticRows::new(vec![
            row(&[("slug", "casa-madrid")]),
            row(&[("slug", " Le-Grand-Hotel "), ("city", "Paris")]),
        ]));

        let found = resolver.resolve_by_slug("  le-grand-hotel").await.unwrap();
        assert_eq!(found.unwrap().field("city"), "Paris");
    }

    #[tokio::test]
    async fn test_resolve_returns_first_match() {
        let resolver = BusinessResolver::new(StaticRows::new(vec![
            row(&[("slug", "dup"), ("city", "Paris")]),
            row(&[("slug", "DUP"), ("city", "Madrid")]),
        ]));

        let found = resolver.resolve_by_slug("dup").await.unwrap().unwrap();
        assert_eq!(found.field("city"), "Paris");
    }

    #[tokio::test]
    async fn test_unknown_slug_is_none_not_error() {
        let resolver = BusinessResolver::new(StaticRows::new(vec![row(&[("slug", "a")])]));
        assert_eq!(resolver.resolve_by_slug("nowhere").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rows_without_slug_never_match() {
        let resolver = BusinessResolver::new(StaticRows::new(vec![row(&[("city", "Paris")])]));
        assert_eq!(resolver.resolve_by_slug("paris").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_every_lookup_refetches() {
        let resolver = BusinessResolver::new(StaticRows::new(vec![row(&[("slug", "a")])]));
        resolver.resolve_by_slug("a").await.unwrap();
        resolver.resolve_by_slug("a").await.unwrap();
        assert_eq!(resolver.source().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_known_slugs_skips_blank_and_keeps_raw_value() {
        let resolver = BusinessResolver::new(StaticRows::new(vec![
            row(&[("slug", "Le-Grand-Hotel")]),
            row(&[("slug", "")]),
            row(&[("city", "Nowhere")]),
        ]));

        assert_eq!(resolver.known_slugs().await, vec!["Le-Grand-Hotel".to_string()]);
    }

    #[tokio::test]
    async fn test_known_slugs_swallows_fetch_errors() {
        let resolver = BusinessResolver::new(FailingRows);
        assert!(resolver.known_slugs().await.is_empty());
        assert!(resolver.resolve_by_slug("a").await.is_err());
    }
}
