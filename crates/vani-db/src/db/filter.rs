//! Video list query translation
//!
//! Turns the optional `q`, `platform` and `scripture` list parameters into a predicate over
//! the video `document` column:
//!
//! - `q` matches, case-insensitively and as a substring, the title OR any tag OR any
//!   embedded scripture name
//! - `platform` is an exact match
//! - `scripture` is a case-insensitive substring match on embedded scripture names only
//!
//! Present conditions are AND'ed. There is no ranking.

use sqlx::{Postgres, QueryBuilder};

use super::collection::DocumentFilter;

pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 200;
pub const DEFAULT_LIMIT: i64 = 50;

const TITLE_MATCH: &str = "document->>'title' ILIKE ";
// Array fields holding null or a scalar are treated as empty; jsonb_array_elements raises on them.
const TAG_MATCH: &str = "EXISTS (SELECT 1 FROM jsonb_array_elements_text(CASE WHEN jsonb_typeof(document->'tags') = 'array' THEN document->'tags' ELSE '[]'::jsonb END) AS tags(tag) WHERE tag ILIKE ";
const SCRIPTURE_MATCH: &str = "EXISTS (SELECT 1 FROM jsonb_array_elements(CASE WHEN jsonb_typeof(document->'scriptures') = 'array' THEN document->'scriptures' ELSE '[]'::jsonb END) AS refs(entry) WHERE entry->>'scripture' ILIKE ";
const PLATFORM_MATCH: &str = "document->>'platform' = ";

/// Wraps `term` as an `ILIKE` substring pattern, escaping `%`, `_` and `\` so user input
/// is matched literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Filter conditions for listing videos. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoFilter {
    pub search: Option<String>,
    pub platform: Option<String>,
    pub scripture: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl VideoFilter {
    pub fn new(
        search: Option<String>,
        platform: Option<String>,
        scripture: Option<String>,
    ) -> Self {
        Self {
            search: non_empty(search),
            platform: non_empty(platform),
            scripture: non_empty(scripture),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.platform.is_none() && self.scripture.is_none()
    }

    /// Number of AND'ed conditions
    pub fn count(&self) -> usize {
        [&self.search, &self.platform, &self.scripture]
            .iter()
            .filter(|c| c.is_some())
            .count()
    }
}

fn push_conjunction(builder: &mut QueryBuilder<'_, Postgres>, pushed: &mut usize) {
    builder.push(if *pushed == 0 { " WHERE " } else { " AND " });
    *pushed += 1;
}

impl DocumentFilter for VideoFilter {
    fn push_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        let mut pushed = 0;

        if let Some(term) = &self.search {
            push_conjunction(builder, &mut pushed);
            let pattern = contains_pattern(term);
            builder
                .push("(")
                .push(TITLE_MATCH)
                .push_bind(pattern.clone())
                .push(" OR ")
                .push(TAG_MATCH)
                .push_bind(pattern.clone())
                .push(") OR ")
                .push(SCRIPTURE_MATCH)
                .push_bind(pattern)
                .push("))");
        }

        if let Some(platform) = &self.platform {
            push_conjunction(builder, &mut pushed);
            builder.push(PLATFORM_MATCH).push_bind(platform.clone());
        }

        if let Some(scripture) = &self.scripture {
            push_conjunction(builder, &mut pushed);
            builder
                .push(SCRIPTURE_MATCH)
                .push_bind(contains_pattern(scripture))
                .push(")");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::collection::select_documents;

    fn where_clause(filter: &VideoFilter) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id FROM video");
        filter.push_predicate(&mut builder);
        builder
            .sql()
            .trim_start_matches("SELECT id FROM video")
            .to_string()
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("gita"), "%gita%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\x"), "%c:\\\\x%");
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let filter = VideoFilter::new(Some(String::new()), Some(String::new()), None);
        assert!(filter.is_empty());
        assert_eq!(where_clause(&filter), "");
    }

    #[test]
    fn test_search_ors_title_tags_and_scriptures() {
        let filter = VideoFilter::new(Some("gita".to_string()), None, None);
        let sql = where_clause(&filter);

        assert!(sql.starts_with(" WHERE ("));
        assert!(sql.contains("document->>'title' ILIKE $1"));
        assert!(sql.contains("WHERE tag ILIKE $2"));
        assert!(sql.contains("entry->>'scripture' ILIKE $3"));
        assert_eq!(sql.matches(" OR ").count(), 2);
        assert!(!sql.contains(" AND "));
        assert!(sql.ends_with("))"));
    }

    #[test]
    fn test_platform_is_exact_match() {
        let filter = VideoFilter::new(None, Some("instagram".to_string()), None);
        assert_eq!(where_clause(&filter), " WHERE document->>'platform' = $1");
    }

    #[test]
    fn test_scripture_filter_restricted_to_scripture_names() {
        let filter = VideoFilter::new(None, None, Some("Bhagavatam".to_string()));
        let sql = where_clause(&filter);
        assert!(sql.contains("entry->>'scripture' ILIKE $1"));
        assert!(!sql.contains("title"));
        assert!(!sql.contains("tag ILIKE"));
    }

    #[test]
    fn test_all_conditions_are_anded() {
        let filter = VideoFilter::new(
            Some("naam".to_string()),
            Some("youtube".to_string()),
            Some("Gita".to_string()),
        );
        assert_eq!(filter.count(), 3);

        let sql = where_clause(&filter);
        assert_eq!(sql.matches(" AND ").count(), 2);
        assert!(sql.contains(" AND document->>'platform' = $4"));
        assert!(sql.contains("entry->>'scripture' ILIKE $5)"));
    }

    #[test]
    fn test_limit_bound_after_filter_values() {
        let filter = VideoFilter::new(None, Some("youtube".to_string()), None);
        let builder = select_documents("video", &filter, 10);
        assert!(builder
            .sql()
            .ends_with("WHERE document->>'platform' = $1 ORDER BY seq ASC LIMIT $2"));
    }

    #[test]
    fn test_array_fields_guarded_against_non_arrays() {
        let filter = VideoFilter::new(Some("bhakti".to_string()), None, Some("Gita".to_string()));
        let sql = where_clause(&filter);
        assert!(sql.contains("CASE WHEN jsonb_typeof(document->'tags') = 'array'"));
        assert_eq!(
            sql.matches("CASE WHEN jsonb_typeof(document->'scriptures') = 'array'")
                .count(),
            2
        );
        assert!(!sql.contains("COALESCE"));
    }

    #[test]
    fn test_parentheses_balanced() {
        let filter = VideoFilter::new(
            Some("x".to_string()),
            Some("other".to_string()),
            Some("y".to_string()),
        );
        let sql = where_clause(&filter);
        assert_eq!(sql.matches('(').count(), sql.matches(')').count());
    }
}
