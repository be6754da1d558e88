//! Filtering, ordering and bookmarking over the candidate catalog.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{Candidate, CandidateId};

/// Minimum match score for the "Best match" chip.
pub const BEST_MATCH_THRESHOLD: u8 = 90;

/// Duration fragments that mark a listing as part-time.
pub const PART_TIME_MARKERS: [&str; 2] = ["3-4", "2-4"];

/// Single active filter chip. Filters do not compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    BestMatch,
    Remote,
    DelhiNcr,
    PartTime,
}

impl Filter {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::All,
            Self::BestMatch,
            Self::Remote,
            Self::DelhiNcr,
            Self::PartTime,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::BestMatch => "Best match",
            Self::Remote => "Remote",
            Self::DelhiNcr => "Delhi NCR",
            Self::PartTime => "Part-time",
        }
    }

    /// Unrecognized labels fall back to [`Filter::All`].
    pub fn from_label(value: &str) -> Self {
        Self::ordered()
            .into_iter()
            .find(|filter| filter.label().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(Self::All)
    }

    pub fn matches(self, candidate: &Candidate) -> bool {
        match self {
            Self::All => true,
            Self::BestMatch => candidate.match_score >= BEST_MATCH_THRESHOLD,
            Self::Remote => candidate.mode.contains("Remote"),
            Self::DelhiNcr => candidate.location.contains("Delhi"),
            Self::PartTime => PART_TIME_MARKERS
                .iter()
                .any(|marker| candidate.duration.contains(marker)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Match,
    Stipend,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Stipend => "stipend",
        }
    }

    /// Unrecognized keys fall back to [`SortKey::Match`].
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "stipend" => Self::Stipend,
            _ => Self::Match,
        }
    }
}

/// Integer formed by every digit in the stipend string; `0` when there are none.
///
/// Values past `u64::MAX` saturate, so long digit runs still rank above short ones.
pub fn stipend_value(stipend: &str) -> u64 {
    stipend
        .chars()
        .filter_map(|ch| ch.to_digit(10))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit))
        })
}

/// Filter-then-sort over the full candidate set. Ties keep catalog order.
pub fn rank<'a>(candidates: &'a [Candidate], filter: Filter, sort: SortKey) -> Vec<&'a Candidate> {
    let mut ranked: Vec<&Candidate> = candidates
        .iter()
        .filter(|candidate| filter.matches(candidate))
        .collect();

    match sort {
        SortKey::Match => ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score)),
        SortKey::Stipend => {
            ranked.sort_by_key(|candidate| Reverse(stipend_value(&candidate.stipend)))
        }
    }

    ranked
}

/// Bookmarked candidate ids; orthogonal to ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SavedCandidates {
    ids: BTreeSet<CandidateId>,
}

impl SavedCandidates {
    /// Flips the bookmark and returns whether the candidate is now saved.
    pub fn toggle(&mut self, id: &CandidateId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn contains(&self, id: &CandidateId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateId> {
        self.ids.iter()
    }
}

/// Recommendations screen state: the active chip, sort key and bookmarks.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    filter: Filter,
    sort: SortKey,
    saved: SavedCandidates,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn saved(&self) -> &SavedCandidates {
        &self.saved
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    pub fn toggle_saved(&mut self, id: &CandidateId) -> bool {
        self.saved.toggle(id)
    }

    /// Recomputed on every call from the full candidate set.
    pub fn view<'a>(&self, candidates: &'a [Candidate]) -> RecommendationView<'a> {
        let ranked = rank(candidates, self.filter, self.sort);
        let entries = ranked
            .into_iter()
            .map(|candidate| RankedCandidate {
                saved: self.saved.contains(&candidate.id),
                candidate,
            })
            .collect();

        RecommendationView {
            filter: self.filter,
            sort: self.sort,
            entries,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate<'a> {
    pub candidate: &'a Candidate,
    pub saved: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView<'a> {
    pub filter: Filter,
    pub sort: SortKey,
    pub entries: Vec<RankedCandidate<'a>>,
}

impl RecommendationView<'_> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the empty state should offer a reset back to [`Filter::All`].
    pub fn suggests_reset(&self) -> bool {
        self.is_empty() && self.filter != Filter::All
    }
}
