//! Quality scoring and low-quality detection for candidates.
//!
//! Scores are recomputed per request and never persisted. The scoring
//! table is intentionally simple and additive: resolution tier dominates,
//! everything else nudges.

use crate::candidate::{Candidate, Resolution};

const HDR_MARKERS: [&str; 5] = ["hdr", "dolby vision", "dolby.vision", "dolbyvision", "dovi"];

/// Markers that flag a release as low quality wherever they appear in the
/// name, source, or modifier. "ts" and "cam" are substring matches and can
/// false-positive on unrelated text (e.g. "Tsunami", "Camelot"); that is a
/// known, accepted limitation of the heuristic.
const LOW_QUALITY_MARKERS: [&str; 6] = ["telecine", "ts", "cam", "hd-ts", "hd-cam", "web-rip"];

fn resolution_points(resolution: Option<Resolution>) -> f64 {
    match resolution {
        Some(Resolution::R4320p) => 100.0,
        Some(Resolution::R2160p) => 90.0,
        Some(Resolution::R1440p) => 70.0,
        Some(Resolution::R1080p) => 50.0,
        Some(Resolution::R720p) => 30.0,
        Some(Resolution::R576p)
        | Some(Resolution::R540p)
        | Some(Resolution::R480p)
        | Some(Resolution::R360p) => 10.0,
        None => 0.0,
    }
}

/// Compute the quality score for a candidate. Pure function, non-negative.
pub fn score(candidate: &Candidate) -> f64 {
    let name = candidate.torrent.name.to_lowercase();
    let mut score = resolution_points(candidate.video.resolution);

    let is_remux = candidate
        .video
        .modifier
        .as_deref()
        .is_some_and(|m| m.eq_ignore_ascii_case("remux"))
        || name.contains("remux");
    if is_remux || HDR_MARKERS.iter().any(|m| name.contains(m)) {
        score += 15.0;
    }

    let codec = candidate
        .video
        .codec
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    if codec.contains("265") || name.contains("x265") || name.contains("h265") {
        score += 10.0;
    } else if codec.contains("264") || name.contains("x264") || name.contains("h264") {
        score += 5.0;
    }

    // Audio bonuses are mutually exclusive, best marker wins.
    if name.contains("dts-hd") || name.contains("atmos") {
        score += 10.0;
    } else if name.contains("truehd") || name.contains("dts") {
        score += 5.0;
    }

    if name.contains(".mkv") {
        score += 5.0;
    }

    score += (candidate.size_gib().min(50.0) * 0.2).min(10.0);

    score
}

/// Is this candidate a low-quality release?
///
/// True for sub-720p resolutions and for releases whose name, source, or
/// modifier carries a low-quality marker (telecine, cam rips, web-rips).
pub fn is_low_quality(candidate: &Candidate) -> bool {
    if let Some(resolution) = candidate.video.resolution {
        if resolution.height() <= 576 {
            return true;
        }
    }

    let haystack = format!(
        "{} {} {}",
        candidate.torrent.name,
        candidate.video.source.as_deref().unwrap_or(""),
        candidate.video.modifier.as_deref().unwrap_or(""),
    )
    .to_lowercase();

    LOW_QUALITY_MARKERS.iter().any(|m| haystack.contains(m))
}

/// Display label for the output stream ("1080p", "unknown", ...).
pub fn quality_label(candidate: &Candidate) -> String {
    match candidate.video.resolution {
        Some(resolution) => resolution.label().to_string(),
        None => "unknown".to_string(),
    }
}
