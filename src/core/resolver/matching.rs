//! Tiered name matching

use super::normalize::strip_decorations;
use crate::core::remote::NamedEntity;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Which rule of the cascade produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    Exact,
    CaseInsensitive,
    Stripped,
    StrippedCaseInsensitive,
    CandidateContainsSearch,
    SearchContainsCandidate,
    StrippedCandidateContainsSearch,
    StrippedSearchContainsCandidate,
    NoMatch,
}

impl MatchReason {
    pub fn score(self) -> u8 {
        match self {
            MatchReason::Exact => 100,
            MatchReason::CaseInsensitive => 90,
            MatchReason::Stripped => 80,
            MatchReason::StrippedCaseInsensitive => 70,
            MatchReason::CandidateContainsSearch => 60,
            MatchReason::SearchContainsCandidate => 50,
            MatchReason::StrippedCandidateContainsSearch => 40,
            MatchReason::StrippedSearchContainsCandidate => 30,
            MatchReason::NoMatch => 0,
        }
    }

    /// Only the two equality tiers on the raw text count as exact
    pub fn is_exact(self) -> bool {
        matches!(self, MatchReason::Exact | MatchReason::CaseInsensitive)
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MatchReason::Exact => "exact match",
            MatchReason::CaseInsensitive => "case-insensitive match",
            MatchReason::Stripped => "match ignoring emoji",
            MatchReason::StrippedCaseInsensitive => "case-insensitive match ignoring emoji",
            MatchReason::CandidateContainsSearch => "name contains search term",
            MatchReason::SearchContainsCandidate => "search term contains name",
            MatchReason::StrippedCandidateContainsSearch => {
                "name contains search term ignoring emoji"
            }
            MatchReason::StrippedSearchContainsCandidate => {
                "search term contains name ignoring emoji"
            }
            MatchReason::NoMatch => "no match",
        };
        f.write_str(text)
    }
}

/// How well one candidate name matches a search term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub is_match: bool,
    /// 0 to 100
    pub score: u8,
    pub exact_match: bool,
    pub reason: MatchReason,
}

impl From<MatchReason> for MatchResult {
    fn from(reason: MatchReason) -> Self {
        Self {
            is_match: reason != MatchReason::NoMatch,
            score: reason.score(),
            exact_match: reason.is_exact(),
            reason,
        }
    }
}

/// A matching entity together with its score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredCandidate {
    pub entity: NamedEntity,
    /// Container the entity was found in, for workspace-wide searches
    pub container_id: Option<String>,
    pub result: MatchResult,
}

impl ScoredCandidate {
    /// Exact first, then higher score, then most recently updated
    pub fn ranking(a: &Self, b: &Self) -> Ordering {
        b.result
            .exact_match
            .cmp(&a.result.exact_match)
            .then_with(|| b.result.score.cmp(&a.result.score))
            .then_with(|| match (a.entity.updated_at, b.entity.updated_at) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }

    /// Indistinguishable from `other` under [`ScoredCandidate::ranking`]
    pub fn ties_with(&self, other: &Self) -> bool {
        Self::ranking(self, other) == Ordering::Equal
    }
}

/// Score `candidate` against `search`, first matching tier wins
pub fn score_candidate(search: &str, candidate: &str) -> MatchResult {
    MatchResult::from(match_reason(search, candidate))
}

fn match_reason(search: &str, candidate: &str) -> MatchReason {
    if candidate.trim().is_empty() || search.trim().is_empty() {
        return MatchReason::NoMatch;
    }
    if search == candidate {
        return MatchReason::Exact;
    }

    let search_lower = search.to_lowercase();
    let candidate_lower = candidate.to_lowercase();
    if search_lower == candidate_lower {
        return MatchReason::CaseInsensitive;
    }

    let search_stripped = strip_decorations(search);
    let candidate_stripped = strip_decorations(candidate);
    let stripped_usable = !search_stripped.is_empty() && !candidate_stripped.is_empty();
    if stripped_usable && search_stripped == candidate_stripped {
        return MatchReason::Stripped;
    }

    let search_stripped = search_stripped.to_lowercase();
    let candidate_stripped = candidate_stripped.to_lowercase();
    if stripped_usable && search_stripped == candidate_stripped {
        return MatchReason::StrippedCaseInsensitive;
    }

    if candidate_lower.contains(&search_lower) {
        return MatchReason::CandidateContainsSearch;
    }
    if search_lower.contains(&candidate_lower) {
        return MatchReason::SearchContainsCandidate;
    }

    if stripped_usable {
        if candidate_stripped.contains(&search_stripped) {
            return MatchReason::StrippedCandidateContainsSearch;
        }
        if search_stripped.contains(&candidate_stripped) {
            return MatchReason::StrippedSearchContainsCandidate;
        }
    }

    MatchReason::NoMatch
}

/// Every matching candidate, best first
///
/// Full ties keep their input order.
pub fn rank_candidates<'a>(
    search: &str,
    candidates: impl IntoIterator<Item = &'a NamedEntity>,
) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> = candidates
        .into_iter()
        .filter_map(|entity| {
            let result = score_candidate(search, &entity.name);
            result.is_match.then(|| ScoredCandidate {
                entity: entity.clone(),
                container_id: None,
                result,
            })
        })
        .collect();
    ranked.sort_by(ScoredCandidate::ranking);
    ranked
}

/// The best matching candidate, if any matches at all
pub fn select_best(search: &str, candidates: &[NamedEntity]) -> Option<ScoredCandidate> {
    rank_candidates(search, candidates).into_iter().next()
}
