//! Season/episode membership parsing for torrent release names.
//!
//! Structured data from the indexer always wins: when a candidate carries a
//! non-empty `episodes` list it is returned verbatim and the name parser
//! never runs. Otherwise an ordered cascade of `(pattern, extractor)` rules
//! is evaluated against the lowercased release name. Every rule runs - a
//! name like "show s01e01-03" legitimately yields both the single-episode
//! and the range interpretation - and entries are deduplicated by
//! `(season, sorted episode set)`. Nothing is discarded until matching time.

use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex_lite::{Captures, Regex};

use crate::candidate::Candidate;

/// One interpretation of a candidate's season/episode membership.
///
/// An empty `episodes` set means a whole-season pack. `season: None`
/// is the weakest signal (a bare "EP5" with no season context) and never
/// satisfies a season/episode-specific request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEpisodeEntry {
    pub season: Option<u32>,
    pub episodes: BTreeSet<u32>,
}

impl ParsedEpisodeEntry {
    fn season_pack(season: u32) -> Self {
        Self {
            season: Some(season),
            episodes: BTreeSet::new(),
        }
    }

    fn single(season: Option<u32>, episode: u32) -> Self {
        Self {
            season,
            episodes: BTreeSet::from([episode]),
        }
    }

    fn range(season: u32, from: u32, to: u32) -> Option<Self> {
        if from > to {
            return None;
        }
        Some(Self {
            season: Some(season),
            episodes: (from..=to).collect(),
        })
    }
}

/// An extractor inspects one regex match (plus the surrounding text, for
/// rules that must not fire on input already consumed by an earlier rule)
/// and produces zero or more entries.
type Extractor = fn(&Captures<'_>, &str) -> Vec<ParsedEpisodeEntry>;

static RULES: Lazy<Vec<(Regex, Extractor)>> = Lazy::new(|| {
    vec![
        // 1. s01e02 / s01 e02 - single episode
        (
            Regex::new(r"\bs(\d{1,2})\s?e(\d{1,3})\b").expect("episode rule 1"),
            extract_single,
        ),
        // 2a. s01e01-03 / s01e01-e03 - inclusive episode range
        (
            Regex::new(r"\bs(\d{1,2})\s?e(\d{1,3})-e?(\d{1,3})\b").expect("episode rule 2a"),
            extract_episode_range,
        ),
        // 2b. s01ep(1-3) - inclusive episode range
        (
            Regex::new(r"\bs(\d{1,2})\s?ep\((\d{1,3})-(\d{1,3})\)").expect("episode rule 2b"),
            extract_episode_range,
        ),
        // 3. season 1 episode 2 / season 1 ep 2 - word form
        (
            Regex::new(r"\bseason\s+(\d{1,2})\s+(?:episode|ep)\.?\s*(\d{1,3})\b")
                .expect("episode rule 3"),
            extract_single_known_season,
        ),
        // 4a. s01-s03 - season-pack range
        (
            Regex::new(r"\bs(\d{1,2})-s(\d{1,2})\b").expect("episode rule 4a"),
            extract_season_range,
        ),
        // 4b. season 1-3 / seasons 1-3 - season-pack range
        (
            Regex::new(r"\bseasons?\s+(\d{1,2})\s*-\s*(\d{1,2})\b").expect("episode rule 4b"),
            extract_season_range,
        ),
        // 5a. bare s01 - single season pack
        (
            Regex::new(r"\bs(\d{1,2})\b").expect("episode rule 5a"),
            extract_bare_season,
        ),
        // 5b. bare season 1 - single season pack
        (
            Regex::new(r"\bseason\s+(\d{1,2})\b").expect("episode rule 5b"),
            extract_bare_season_word,
        ),
        // 6. ep5 / ep.5 with no season context - weakest signal
        (
            Regex::new(r"\bep\.?\s?(\d{1,3})\b").expect("episode rule 6"),
            extract_bare_episode,
        ),
    ]
});

// Guards used by the bare-season extractors to reject matches that belong
// to rules 1-4 (regex-lite has no lookaround, so the extractors inspect
// the text around the match instead).
static AFTER_BARE_S: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s?ep?\.?\s?\d").expect("bare season guard"));
static AFTER_BARE_SEASON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:-\s*\d|(?:episode|ep)\.?\s*\d)").expect("season word guard"));

fn parse_num(caps: &Captures<'_>, idx: usize) -> Option<u32> {
    caps.get(idx)?.as_str().parse().ok()
}

fn extract_single(caps: &Captures<'_>, _text: &str) -> Vec<ParsedEpisodeEntry> {
    match (parse_num(caps, 1), parse_num(caps, 2)) {
        (Some(season), Some(episode)) => vec![ParsedEpisodeEntry::single(Some(season), episode)],
        _ => vec![],
    }
}

fn extract_single_known_season(caps: &Captures<'_>, _text: &str) -> Vec<ParsedEpisodeEntry> {
    extract_single(caps, _text)
}

fn extract_episode_range(caps: &Captures<'_>, _text: &str) -> Vec<ParsedEpisodeEntry> {
    match (parse_num(caps, 1), parse_num(caps, 2), parse_num(caps, 3)) {
        (Some(season), Some(from), Some(to)) => {
            ParsedEpisodeEntry::range(season, from, to).into_iter().collect()
        }
        _ => vec![],
    }
}

fn extract_season_range(caps: &Captures<'_>, _text: &str) -> Vec<ParsedEpisodeEntry> {
    match (parse_num(caps, 1), parse_num(caps, 2)) {
        (Some(from), Some(to)) if from <= to => {
            (from..=to).map(ParsedEpisodeEntry::season_pack).collect()
        }
        _ => vec![],
    }
}

fn extract_bare_season(caps: &Captures<'_>, text: &str) -> Vec<ParsedEpisodeEntry> {
    let Some(m) = caps.get(0) else { return vec![] };
    // Part of "s01-s03" or followed by an episode marker: rules 1-4 own it.
    if text[..m.start()].ends_with('-') {
        return vec![];
    }
    let rest = &text[m.end()..];
    if rest.starts_with('-') || AFTER_BARE_S.is_match(rest) {
        return vec![];
    }
    match parse_num(caps, 1) {
        Some(season) => vec![ParsedEpisodeEntry::season_pack(season)],
        None => vec![],
    }
}

fn extract_bare_season_word(caps: &Captures<'_>, text: &str) -> Vec<ParsedEpisodeEntry> {
    let Some(m) = caps.get(0) else { return vec![] };
    if AFTER_BARE_SEASON_WORD.is_match(&text[m.end()..]) {
        return vec![];
    }
    match parse_num(caps, 1) {
        Some(season) => vec![ParsedEpisodeEntry::season_pack(season)],
        None => vec![],
    }
}

fn extract_bare_episode(caps: &Captures<'_>, _text: &str) -> Vec<ParsedEpisodeEntry> {
    match parse_num(caps, 1) {
        Some(episode) => vec![ParsedEpisodeEntry::single(None, episode)],
        None => vec![],
    }
}

/// Parse season/episode membership for a candidate.
///
/// Structured indexer data wins over the name cascade. An empty result
/// means "unknown - do not assume a match".
pub fn parse_episodes(candidate: &Candidate) -> Vec<ParsedEpisodeEntry> {
    if !candidate.episodes.is_empty() {
        return candidate
            .episodes
            .iter()
            .map(|group| ParsedEpisodeEntry {
                season: Some(group.season),
                episodes: group.episodes.iter().copied().collect(),
            })
            .collect();
    }
    parse_name(&candidate.torrent.name)
}

/// Run the name cascade. Every rule is evaluated; entries are deduplicated
/// by `(season, sorted episode set)` while preserving first-seen order.
pub fn parse_name(name: &str) -> Vec<ParsedEpisodeEntry> {
    let text = name.to_lowercase();
    let mut seen: HashSet<(Option<u32>, Vec<u32>)> = HashSet::new();
    let mut entries = Vec::new();

    for (pattern, extract) in RULES.iter() {
        for caps in pattern.captures_iter(&text) {
            for entry in extract(&caps, &text) {
                let key = (entry.season, entry.episodes.iter().copied().collect());
                if seen.insert(key) {
                    entries.push(entry);
                }
            }
        }
    }

    entries
}

/// Does any parsed entry place the candidate in the requested episode?
///
/// A season pack (empty episode set) matches every episode of its season.
/// Entries without a season never match.
pub fn matches_episode(entries: &[ParsedEpisodeEntry], season: u32, episode: u32) -> bool {
    entries.iter().any(|entry| {
        entry.season == Some(season)
            && (entry.episodes.is_empty() || entry.episodes.contains(&episode))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{ContentType, EpisodeGroup, TorrentInfo, VideoAttributes};

    fn entry(season: Option<u32>, episodes: &[u32]) -> ParsedEpisodeEntry {
        ParsedEpisodeEntry {
            season,
            episodes: episodes.iter().copied().collect(),
        }
    }

    fn make_candidate(name: &str, groups: Vec<EpisodeGroup>) -> Candidate {
        Candidate {
            info_hash: "abc123".to_string(),
            content_type: ContentType::Series,
            title: "Test".to_string(),
            languages: vec![],
            episodes: groups,
            video: VideoAttributes::default(),
            torrent: TorrentInfo {
                name: name.to_string(),
                size_bytes: 0,
                file_type: None,
                tag_names: vec![],
                magnet_uri: None,
            },
            seeders: 0,
            leechers: 0,
            published_at: None,
        }
    }

    #[test]
    fn test_single_episode() {
        let entries = parse_name("Show.Name.S01E02.1080p.WEB-DL");
        assert!(entries.contains(&entry(Some(1), &[2])));
    }

    #[test]
    fn test_single_episode_with_space() {
        let entries = parse_name("Show Name S02 E05 720p");
        assert!(entries.contains(&entry(Some(2), &[5])));
    }

    #[test]
    fn test_episode_range() {
        let entries = parse_name("Show S01E01-03 complete");
        assert!(entries.contains(&entry(Some(1), &[1, 2, 3])));
        // The single-episode rule also fires on the leading s01e01.
        assert!(entries.contains(&entry(Some(1), &[1])));
    }

    #[test]
    fn test_episode_range_with_e_prefix() {
        let entries = parse_name("Show S01E01-E04");
        assert!(entries.contains(&entry(Some(1), &[1, 2, 3, 4])));
    }

    #[test]
    fn test_episode_range_paren_form() {
        let entries = parse_name("Show S02EP(1-3)");
        assert!(entries.contains(&entry(Some(2), &[1, 2, 3])));
    }

    #[test]
    fn test_reversed_episode_range_ignored() {
        let entries = parse_name("Show S01E05-02");
        assert!(!entries.iter().any(|e| e.episodes.len() > 1));
    }

    #[test]
    fn test_word_form() {
        let entries = parse_name("Show Season 3 Episode 7");
        assert!(entries.contains(&entry(Some(3), &[7])));
    }

    #[test]
    fn test_word_form_ep() {
        let entries = parse_name("Show Season 1 Ep 4");
        assert!(entries.contains(&entry(Some(1), &[4])));
    }

    #[test]
    fn test_season_range() {
        let entries = parse_name("Show S01-S03 complete");
        assert!(entries.contains(&entry(Some(1), &[])));
        assert!(entries.contains(&entry(Some(2), &[])));
        assert!(entries.contains(&entry(Some(3), &[])));
    }

    #[test]
    fn test_season_range_word_form() {
        let entries = parse_name("Show Seasons 1-2 1080p");
        assert!(entries.contains(&entry(Some(1), &[])));
        assert!(entries.contains(&entry(Some(2), &[])));
    }

    #[test]
    fn test_bare_season() {
        let entries = parse_name("Show S04 complete 1080p");
        assert_eq!(entries, vec![entry(Some(4), &[])]);
    }

    #[test]
    fn test_bare_season_word_form() {
        let entries = parse_name("Show Season 2 complete");
        assert!(entries.contains(&entry(Some(2), &[])));
    }

    #[test]
    fn test_bare_season_does_not_fire_on_episode_marker() {
        // s01 here belongs to the s01e02 rule, not the season-pack rule.
        let entries = parse_name("Show S01E02");
        assert!(!entries.contains(&entry(Some(1), &[])));
    }

    #[test]
    fn test_bare_season_does_not_fire_on_season_range() {
        let entries = parse_name("Show S01-S03");
        // Exactly the three packs from the range rule, no stray bare matches.
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.episodes.is_empty()));
    }

    #[test]
    fn test_bare_season_word_does_not_fire_on_word_episode() {
        let entries = parse_name("Show Season 1 Episode 2");
        assert!(entries.contains(&entry(Some(1), &[2])));
        assert!(!entries.contains(&entry(Some(1), &[])));
    }

    #[test]
    fn test_bare_episode_without_season() {
        let entries = parse_name("Show EP5 special");
        assert!(entries.contains(&entry(None, &[5])));
    }

    #[test]
    fn test_bare_episode_inside_word_ignored() {
        let entries = parse_name("Deep5 documentary");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_unknown_name_yields_empty() {
        assert!(parse_name("Some Movie 2019 1080p BluRay").is_empty());
    }

    #[test]
    fn test_dedup_across_rules() {
        // Both the single rule and the word rule would produce (1, {2})
        // for this doubled-up name; only one entry survives.
        let entries = parse_name("Show S01E02 Season 1 Episode 2");
        let matching: Vec<_> = entries
            .iter()
            .filter(|e| **e == entry(Some(1), &[2]))
            .collect();
        assert_eq!(matching.len(), 1);
    }

    #[test]
    fn test_structured_data_wins() {
        let candidate = make_candidate(
            "Name that would parse as S09E09",
            vec![EpisodeGroup {
                season: 1,
                episodes: vec![1, 2, 3],
            }],
        );
        let entries = parse_episodes(&candidate);
        assert_eq!(entries, vec![entry(Some(1), &[1, 2, 3])]);
    }

    #[test]
    fn test_structured_empty_falls_back_to_name() {
        let candidate = make_candidate("Show S02E04", vec![]);
        let entries = parse_episodes(&candidate);
        assert!(entries.contains(&entry(Some(2), &[4])));
    }

    #[test]
    fn test_match_structured_entry() {
        let candidate = make_candidate(
            "whatever",
            vec![EpisodeGroup {
                season: 1,
                episodes: vec![1, 2, 3],
            }],
        );
        let entries = parse_episodes(&candidate);
        assert!(matches_episode(&entries, 1, 2));
        assert!(!matches_episode(&entries, 2, 1));
        assert!(!matches_episode(&entries, 1, 4));
    }

    #[test]
    fn test_season_pack_matches_any_episode() {
        let entries = vec![entry(Some(1), &[])];
        assert!(matches_episode(&entries, 1, 1));
        assert!(matches_episode(&entries, 1, 99));
        assert!(!matches_episode(&entries, 2, 1));
    }

    #[test]
    fn test_seasonless_entry_never_matches() {
        let entries = vec![entry(None, &[5])];
        assert!(!matches_episode(&entries, 1, 5));
    }

    #[test]
    fn test_no_entries_no_match() {
        assert!(!matches_episode(&[], 1, 1));
    }
}
