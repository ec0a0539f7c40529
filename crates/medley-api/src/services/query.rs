//! In-memory filtering, searching, sorting, and pagination of listings.
//!
//! Runs entirely over the reconciled view; nothing here touches storage
//! or the metadata store.

use medley_core::constants::DEFAULT_PAGE_LIMIT;
use medley_core::models::ReconciledFile;
use serde::Deserialize;

/// Sort key for listings, parsed leniently: unknown values fall back to
/// creation time so a stale client cannot break the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    CreatedAt,
}

impl SortField {
    fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("name") => SortField::Name,
            _ => SortField::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Query parameters accepted by the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFilter {
    #[serde(default)]
    pub search_text: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl Default for FileFilter {
    fn default() -> Self {
        FileFilter {
            search_text: None,
            file_type: None,
            sort_by: None,
            sort_order: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Apply kind filter, free-text search, sort, and pagination, in that order.
/// Returns the requested page and the total match count before paging.
pub fn apply(files: Vec<ReconciledFile>, filter: &FileFilter) -> (Vec<ReconciledFile>, usize) {
    let mut files: Vec<ReconciledFile> = files
        .into_iter()
        .filter(|file| matches_kind(file, filter.file_type.as_deref()))
        .filter(|file| matches_search(file, filter.search_text.as_deref()))
        .collect();

    let total = files.len();

    sort_files(
        &mut files,
        SortField::from_param(filter.sort_by.as_deref()),
        SortOrder::from_param(filter.sort_order.as_deref()),
    );

    let page = files
        .into_iter()
        .skip(filter.offset)
        .take(filter.limit)
        .collect();
    (page, total)
}

fn matches_kind(file: &ReconciledFile, file_type: Option<&str>) -> bool {
    match file_type {
        None | Some("") | Some("all") => true,
        Some(kind) => file.file_type.as_str() == kind,
    }
}

/// Case-insensitive substring match against the display name, or against the
/// analysis fields when metadata exists. Files without metadata can only
/// match by name.
fn matches_search(file: &ReconciledFile, query: Option<&str>) -> bool {
    let query = match query {
        Some(text) if !text.is_empty() => text.to_lowercase(),
        _ => return true,
    };

    if file.name.to_lowercase().contains(&query) {
        return true;
    }
    if !file.has_metadata {
        return false;
    }

    let analysis = match &file.ai_analysis {
        Some(analysis) => analysis,
        None => return false,
    };
    analysis
        .tags
        .iter()
        .any(|tag| tag.to_lowercase().contains(&query))
        || analysis
            .topics
            .iter()
            .any(|topic| topic.to_lowercase().contains(&query))
        || analysis.transcript.to_lowercase().contains(&query)
        || analysis.extracted_text.to_lowercase().contains(&query)
}

fn sort_files(files: &mut [ReconciledFile], field: SortField, order: SortOrder) {
    match field {
        SortField::Name => files.sort_by_cached_key(|file| file.name.to_lowercase()),
        SortField::CreatedAt => files.sort_by_key(|file| file.created_at),
    }
    if order == SortOrder::Desc {
        files.reverse();
    }
}
