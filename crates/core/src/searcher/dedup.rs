//! Deduplication of candidate lists by info hash.

use std::collections::HashSet;

use crate::candidate::Candidate;

/// Deduplicate candidates by `info_hash`, first occurrence wins.
///
/// Multiple search strategies run per request and routinely return
/// overlapping sets, so this must happen before any other pipeline stage.
/// Hashes are compared case-insensitively. Candidates without an info hash
/// cannot be deduplicated and are all kept. Input order is preserved.
pub fn dedup_candidates(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if candidate.info_hash.is_empty() {
            result.push(candidate);
            continue;
        }
        if seen.insert(candidate.info_hash.to_lowercase()) {
            result.push(candidate);
        }
    }

    result
}
