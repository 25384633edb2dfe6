//! Ranking sort policy.
//!
//! The sort order is data, not code: an ordered list of (key, direction)
//! steps applied as successive tie-breaks. The default is seeders first,
//! quality score second; deployments that care about audio language can
//! insert a language-preference step without touching the pipeline.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::episode::ParsedEpisodeEntry;

/// Attribute a sort step orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Seeders,
    QualityScore,
    /// Prefer candidates whose languages appear early in the configured
    /// preference list.
    LanguagePreference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

fn default_direction() -> Direction {
    Direction::Descending
}

/// One step of the sort policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortStep {
    pub key: SortKey,
    #[serde(default = "default_direction")]
    pub direction: Direction,
}

/// Ordered list of sort steps, applied as successive tie-breaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortPolicy(pub Vec<SortStep>);

impl Default for SortPolicy {
    fn default() -> Self {
        Self(vec![
            SortStep {
                key: SortKey::Seeders,
                direction: Direction::Descending,
            },
            SortStep {
                key: SortKey::QualityScore,
                direction: Direction::Descending,
            },
        ])
    }
}

/// A candidate carrying its per-request annotations through the pipeline.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    /// Episode interpretations (series requests only).
    pub entries: Vec<ParsedEpisodeEntry>,
    /// Quality score, recomputed per request.
    pub score: f64,
}

impl SortPolicy {
    /// Sort candidates according to the policy steps.
    pub fn sort(&self, candidates: &mut [ScoredCandidate], preferred_languages: &[String]) {
        candidates.sort_by(|a, b| self.compare(a, b, preferred_languages));
    }

    fn compare(
        &self,
        a: &ScoredCandidate,
        b: &ScoredCandidate,
        preferred_languages: &[String],
    ) -> Ordering {
        for step in &self.0 {
            let natural = match step.key {
                SortKey::Seeders => a.candidate.seeders.cmp(&b.candidate.seeders),
                SortKey::QualityScore => {
                    a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal)
                }
                SortKey::LanguagePreference => language_score(&a.candidate, preferred_languages)
                    .cmp(&language_score(&b.candidate, preferred_languages)),
            };
            let ordered = match step.direction {
                Direction::Ascending => natural,
                Direction::Descending => natural.reverse(),
            };
            if ordered != Ordering::Equal {
                return ordered;
            }
        }
        Ordering::Equal
    }
}

/// Higher is better: a language earlier in the preference list scores
/// higher; candidates matching nothing score zero.
fn language_score(candidate: &Candidate, preferred: &[String]) -> usize {
    candidate
        .languages
        .iter()
        .filter_map(|lang| {
            preferred
                .iter()
                .position(|p| p.eq_ignore_ascii_case(&lang.code))
                .map(|pos| preferred.len() - pos)
        })
        .max()
        .unwrap_or(0)
}
