//! The single matching primitive behind every reference-table lookup.
//!
//! Policy, first success wins: exact equality, then containment in either
//! direction, then best edit-distance ratio above a confidence floor.
//! Containment is intentionally generous ("tomato" matches both
//! "cherry tomato" and "tomatoes"); the downstream scoring weights were
//! tuned against exactly this behavior.

use serde::{Deserialize, Serialize};

/// Default confidence floor used across the system.
pub const DEFAULT_MIN_CONFIDENCE: u32 = 70;

/// Which policy step produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Exact,
    Substring,
    Fuzzy,
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Exact => "exact",
            Self::Substring => "substring",
            Self::Fuzzy => "fuzzy",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of matching one query token against one candidate set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Canonical key of the matched candidate, as supplied by the caller.
    pub key: String,
    /// Confidence in [0, 100].
    pub confidence: u32,
    pub method: MatchMethod,
}

/// Normalize for comparison: trim, lower-case, underscores to spaces.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace('_', " ")
}

/// Character-level similarity ratio in [0, 100].
pub fn similarity_ratio(a: &str, b: &str) -> u32 {
    (strsim::normalized_levenshtein(a, b) * 100.0).round() as u32
}

/// Match `query` against `candidates`, first policy step that succeeds
/// wins. Returns `None` when no candidate clears any step.
pub fn match_ingredient<'a, I>(
    query: &str,
    candidates: I,
    min_confidence: u32,
) -> Option<MatchResult>
where
    I: IntoIterator<Item = &'a str>,
{
    let q = normalize(query);
    if q.is_empty() {
        return None;
    }

    let normalized: Vec<(&str, String)> = candidates
        .into_iter()
        .map(|c| (c, normalize(c)))
        .collect();

    for (original, candidate) in &normalized {
        if *candidate == q {
            return Some(MatchResult {
                key: (*original).to_string(),
                confidence: 100,
                method: MatchMethod::Exact,
            });
        }
    }

    for (original, candidate) in &normalized {
        if candidate.is_empty() {
            continue;
        }
        if candidate.contains(&q) || q.contains(candidate.as_str()) {
            return Some(MatchResult {
                key: (*original).to_string(),
                confidence: 100,
                method: MatchMethod::Substring,
            });
        }
    }

    // Best ratio wins; earlier candidates win ties.
    let mut best: Option<(&str, u32)> = None;
    for (original, candidate) in &normalized {
        let ratio = similarity_ratio(&q, candidate);
        if best.map_or(true, |(_, b)| ratio > b) {
            best = Some((*original, ratio));
        }
    }

    match best {
        Some((original, ratio)) if ratio >= min_confidence => Some(MatchResult {
            key: original.to_string(),
            confidence: ratio,
            method: MatchMethod::Fuzzy,
        }),
        _ => None,
    }
}

/// True when either normalized string contains the other. This is the
/// containment half of the policy, exposed for recipe scoring which
/// awards full credit on containment and partial credit on fuzzy.
pub fn contains_either_way(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || a.contains(&b) || b.contains(&a)
}

/// Best similarity ratio of `query` over `candidates`, 0 when empty.
pub fn best_ratio<'a, I>(query: &str, candidates: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let q = normalize(query);
    candidates
        .into_iter()
        .map(|c| similarity_ratio(&q, &normalize(c)))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_wins_over_fuzzy() {
        let cands = candidates(&["tomato", "tomatoes"]);
        let result = match_ingredient(
            "tomato",
            cands.iter().map(String::as_str),
            DEFAULT_MIN_CONFIDENCE,
        )
        .unwrap();
        assert_eq!(result.key, "tomato");
        assert_eq!(result.confidence, 100);
        assert_eq!(result.method, MatchMethod::Exact);
    }

    #[test]
    fn test_containment_both_directions() {
        let cands = candidates(&["cherry tomato"]);
        let result = match_ingredient("tomato", cands.iter().map(String::as_str), 70).unwrap();
        assert_eq!(result.method, MatchMethod::Substring);
        assert_eq!(result.confidence, 100);

        let cands = candidates(&["tomato"]);
        let result = match_ingredient("tomatoes", cands.iter().map(String::as_str), 70).unwrap();
        assert_eq!(result.method, MatchMethod::Substring);
    }

    #[test]
    fn test_underscore_normalization() {
        let cands = candidates(&["olive_oil"]);
        let result = match_ingredient("olive oil", cands.iter().map(String::as_str), 70).unwrap();
        assert_eq!(result.method, MatchMethod::Exact);
        assert_eq!(result.key, "olive_oil");
    }

    #[test]
    fn test_fuzzy_accepted_above_threshold() {
        let cands = candidates(&["banana"]);
        let result = match_ingredient("bananna", cands.iter().map(String::as_str), 70).unwrap();
        assert_eq!(result.method, MatchMethod::Fuzzy);
        assert!(result.confidence >= 70);
        assert!(result.confidence < 100);
    }

    #[test]
    fn test_rejected_below_threshold() {
        let cands = candidates(&["chicken", "broccoli", "yogurt"]);
        assert!(match_ingredient("xyz", cands.iter().map(String::as_str), 70).is_none());
    }

    #[test]
    fn test_empty_query_and_empty_candidates() {
        let cands = candidates(&["tomato"]);
        assert!(match_ingredient("", cands.iter().map(String::as_str), 70).is_none());
        assert!(match_ingredient("tomato", std::iter::empty(), 70).is_none());
    }

    #[test]
    fn test_fuzzy_tie_keeps_first_candidate() {
        let cands = candidates(&["pepper", "popper"]);
        let result = match_ingredient("pipper", cands.iter().map(String::as_str), 60).unwrap();
        assert_eq!(result.key, "pepper");
    }

    #[test]
    fn test_contains_either_way() {
        assert!(contains_either_way("tomato", "cherry tomato"));
        assert!(contains_either_way("soy_sauce", "soy sauce"));
        assert!(!contains_either_way("tomato", "bread"));
        assert!(!contains_either_way("", "bread"));
    }

    #[test]
    fn test_best_ratio_empty_is_zero() {
        assert_eq!(best_ratio("tomato", std::iter::empty()), 0);
    }
}
