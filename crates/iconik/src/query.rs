//! The recursive collection search query.
//!
//! The same body is sent on the first request and on every scroll request.

use serde::Serialize;

/// Fields searched by the free-text query.
const SEARCH_FIELDS: &[&str] = &[
    "title",
    "description",
    "segment_text",
    "file_names.lower",
    "metadata",
    "transcription_text",
];

/// Search request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// Free-text query.
    pub query: String,
    /// Document types to return.
    pub doc_types: Vec<String>,
    /// Term filter.
    pub filter: Filter,
    /// Facet filters (always empty).
    pub facets_filters: Vec<serde_json::Value>,
    /// Fields the free-text query is matched against.
    pub search_fields: Vec<String>,
    /// Facets to compute (always empty).
    pub facets: Vec<String>,
    /// Sort order.
    pub sort: Vec<SortField>,
}

/// Boolean term filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    /// `AND` / `OR`.
    pub operator: String,
    /// Terms combined by `operator`.
    pub terms: Vec<FilterTerm>,
}

/// One `name = value` term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterTerm {
    /// Field name.
    pub name: String,
    /// Required value.
    pub value: String,
}

/// Sort specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortField {
    /// Field name.
    pub name: String,
    /// `asc` / `desc`.
    pub order: String,
}

impl SearchQuery {
    /// Every ACTIVE asset and collection below `collection_id`, at any depth,
    /// newest first.
    #[must_use]
    pub fn collection_descendants(collection_id: &str) -> Self {
        Self {
            query: format!("ancestor_collections:{}", collection_id),
            doc_types: vec!["assets".to_string(), "collections".to_string()],
            filter: Filter {
                operator: "AND".to_string(),
                terms: vec![FilterTerm {
                    name: "status".to_string(),
                    value: "ACTIVE".to_string(),
                }],
            },
            facets_filters: Vec::new(),
            search_fields: SEARCH_FIELDS.iter().map(|s| (*s).to_string()).collect(),
            facets: Vec::new(),
            sort: vec![SortField {
                name: "date_created".to_string(),
                order: "desc".to_string(),
            }],
        }
    }
}
