//! Meeting-detection predicates.
//!
//! # Responsibility
//! - Decide whether a page snapshot indicates an active video-conference.
//! - Export the DOM marker selectors host-side observers should watch.
//!
//! # Invariants
//! - Detection is a pure function over the snapshot; DOM observation and
//!   polling stay on the host side.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// DOM marker selectors whose presence indicates an active meeting.
///
/// Hosts query these against the page and report which ones matched.
pub const MEETING_MARKER_SELECTORS: &[&str] = &[
    "[data-meeting-id]",
    "[data-participant-id]",
    "[aria-label*=\"meeting\"]",
    ".u6vdEc",
    "[jsname=\"BOHaEe\"]",
];

static MEET_ROOM_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://meet\.google\.com/[a-z]{3}-[a-z]{4}-[a-z]{3}(?:$|[/?#])")
        .expect("valid meet room url regex")
});

/// Page observation reported by a host-side observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Current page URL.
    pub url: String,
    /// Current document title.
    pub title: String,
    /// Marker selectors from `MEETING_MARKER_SELECTORS` found on the page.
    pub matched_selectors: Vec<String>,
}

/// Returns whether the URL is a Google Meet room URL.
pub fn is_meet_url(url: &str) -> bool {
    MEET_ROOM_URL_RE.is_match(url.trim())
}

/// Returns whether the snapshot indicates an active meeting.
///
/// True when any known marker selector matched, or the URL itself is a
/// Meet room URL.
pub fn meeting_signal(snapshot: &PageSnapshot) -> bool {
    let marker_hit = snapshot
        .matched_selectors
        .iter()
        .any(|selector| MEETING_MARKER_SELECTORS.contains(&selector.as_str()));
    marker_hit || is_meet_url(&snapshot.url)
}
