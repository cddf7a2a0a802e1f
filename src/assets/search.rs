use serde::Serialize;

use crate::error::{HostContext, ProvisionResult};
use crate::host::{AssetRecord, SceneHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    Substring,
    Prefix,
    Exact,
}

impl Relevance {
    fn classify(name_lower: &str, term_lower: &str) -> Self {
        if name_lower == term_lower {
            Relevance::Exact
        } else if name_lower.starts_with(term_lower) {
            Relevance::Prefix
        } else {
            Relevance::Substring
        }
    }

    /// Exact implies prefix, so the exact tier carries both bonuses.
    pub fn score(self) -> u32 {
        match self {
            Relevance::Exact => 6,
            Relevance::Prefix => 3,
            Relevance::Substring => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub record: AssetRecord,
    pub relevance: Relevance,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub search_term: String,
    pub asset_class_filter: Option<String>,
    pub total_matches: usize,
    pub assets: Vec<SearchHit>,
}

/// Ties keep index order. At most `limit` hits are returned.
pub fn search(
    host: &dyn SceneHost,
    term: &str,
    class_filter: Option<&str>,
    limit: usize,
) -> ProvisionResult<SearchResult> {
    let index = host.asset_index().during("search assets")?;
    let mut result = rank(index, term, class_filter.filter(|filter| !filter.is_empty()), limit);
    // Echo the filter as given, even when it was empty and therefore ignored.
    result.asset_class_filter = class_filter.map(str::to_string);
    Ok(result)
}

pub(crate) fn rank(
    index: Vec<AssetRecord>,
    term: &str,
    class_filter: Option<&str>,
    limit: usize,
) -> SearchResult {
    let term_lower = term.to_lowercase();
    let filter_lower = class_filter.map(str::to_lowercase);

    let mut hits: Vec<SearchHit> = index
        .into_iter()
        .filter_map(|record| {
            let name_lower = record.name.to_lowercase();
            let matches_text =
                name_lower.contains(&term_lower) || record.package_path.to_lowercase().contains(&term_lower);
            let matches_class = filter_lower
                .as_deref()
                .map_or(true, |filter| record.class_name.to_lowercase().contains(filter));
            if !(matches_text && matches_class) {
                return None;
            }
            let relevance = Relevance::classify(&name_lower, &term_lower);
            Some(SearchHit { record, relevance, score: relevance.score() })
        })
        .collect();

    // sort_by is stable, so equal tiers stay in scan order.
    hits.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    let total_matches = hits.len();
    hits.truncate(limit);

    SearchResult {
        search_term: term.to_string(),
        asset_class_filter: class_filter.map(str::to_string),
        total_matches,
        assets: hits,
    }
}
