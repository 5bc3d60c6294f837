//! Pattern-matching fallback extractor for action items.
//!
//! # Responsibility
//! - Scan free-text notes line by line and produce candidate action items
//!   with optional assignee and deadline fields.
//!
//! # Invariants
//! - Each line contributes at most one item; rules are tried in a fixed
//!   order and the first match wins.
//! - Assignee/deadline searches run on the captured task text, not on the
//!   full original line.
//! - Identical task text on multiple lines yields multiple items; there is
//!   no deduplication.

use crate::model::action_item::ActionItem;
use once_cell::sync::Lazy;
use regex::Regex;

// Line rules, in precedence order. Cues are deliberately not word-anchored:
// `will` inside `goodwill` or a hyphen inside `follow-up` still match.
static VERB_CUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:need to|should|must|will|todo|action item:?)\s+(.+)")
        .expect("valid verb cue regex")
});
static CHECKBOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[[ x]\]\s*(.+)").expect("valid checkbox regex"));
static DEADLINE_LIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)-\s*(.+(?:by|before|due).+)").expect("valid deadline list regex"));

// Post-match searches applied to the captured task text.
static ASSIGNEE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:for|@|assignee:?)\s*([a-zA-Z]+)").expect("valid assignee regex"));
static DEADLINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:by|before|due|deadline:?)\s*([a-zA-Z0-9\s,]+)")
        .expect("valid deadline regex")
});

/// Extracts candidate action items from free-text meeting notes.
///
/// Pure and total: never fails, returns an empty list when nothing matches.
/// Safe to call repeatedly and from independent contexts.
///
/// # Contract
/// - Input is split on `'\n'`; lines are processed independently, in order.
/// - Per line, the first matching rule (verb cue, markdown checkbox, list
///   item containing a deadline word) determines the captured task text.
/// - The captured text is trimmed into `task`; assignee and deadline phrases
///   are searched inside it and stay embedded in the task text.
pub fn extract_action_items(notes: &str) -> Vec<ActionItem> {
    notes.split('\n').filter_map(extract_from_line).collect()
}

fn extract_from_line(line: &str) -> Option<ActionItem> {
    let rules: [&Regex; 3] = [&*VERB_CUE_RE, &*CHECKBOX_RE, &*DEADLINE_LIST_RE];

    for rule in rules {
        let Some(captures) = rule.captures(line) else {
            continue;
        };
        let task = captures
            .get(1)
            .map(|capture| capture.as_str().trim().to_string())?;

        let assignee = ASSIGNEE_RE
            .captures(&task)
            .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()));
        let deadline = DEADLINE_RE
            .captures(&task)
            .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()));

        return Some(ActionItem {
            task,
            assignee,
            deadline,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::extract_action_items;

    #[test]
    fn empty_notes_yield_no_items() {
        assert!(extract_action_items("").is_empty());
    }

    #[test]
    fn verb_cue_captures_text_after_cue() {
        let items = extract_action_items("we need to send the report by Friday");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].task, "send the report by Friday");
        assert_eq!(items[0].assignee, None);
        assert_eq!(items[0].deadline.as_deref(), Some("Friday"));
    }

    #[test]
    fn checkbox_rule_detects_assignee() {
        let items = extract_action_items("[ ] call the vendor for John");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].task, "call the vendor for John");
        assert_eq!(items[0].assignee.as_deref(), Some("John"));
    }

    #[test]
    fn unrelated_line_yields_nothing() {
        assert!(extract_action_items("random unrelated sentence.").is_empty());
    }

    #[test]
    fn verb_cue_wins_over_checkbox() {
        let items = extract_action_items("[ ] must review the deck");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].task, "review the deck");
    }

    #[test]
    fn one_line_contributes_at_most_one_item() {
        let items = extract_action_items("- [x] should email minutes by Monday");
        assert_eq!(items.len(), 1);
    }
}
