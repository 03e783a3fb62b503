//! Fuzzy search over extracted paths

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

use crate::graph::PathRecord;

/// Search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub score: i64,
}

/// Rank paths against a query, best first. Ties keep path order.
pub fn search(paths: &[PathRecord], query: &str, limit: usize) -> Vec<SearchResult> {
    let matcher = SkimMatcherV2::default();
    let mut results: Vec<(i64, &PathRecord)> = paths
        .iter()
        .filter_map(|record| {
            matcher
                .fuzzy_match(&record.id, query)
                .map(|score| (score, record))
        })
        .collect();

    results.sort_by(|a, b| b.0.cmp(&a.0));

    results
        .into_iter()
        .take(limit)
        .map(|(score, record)| SearchResult {
            path: record.id.clone(),
            description: record.description.clone(),
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> PathRecord {
        PathRecord {
            id: id.to_string(),
            full_path: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_search_ranks_matches() {
        let paths = vec![
            record("vegalite"),
            record("vegalite.encoding.color"),
            record("vegalite.mark"),
            record("vegalite.config.axis.labelColor"),
        ];
        let results = search(&paths, "color", 10);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.path.to_lowercase().contains("color")));
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn test_search_limit() {
        let paths = vec![record("vegalite.a"), record("vegalite.b"), record("vegalite.c")];
        assert_eq!(search(&paths, "vegalite", 2).len(), 2);
        assert!(search(&paths, "zzz", 5).is_empty());
    }
}
