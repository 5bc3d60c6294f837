//! Action item value type.
//!
//! # Responsibility
//! - Define the task record produced by assistant or fallback extraction.
//!
//! # Invariants
//! - `task` is non-empty after trimming.
//! - `assignee`/`deadline` substrings are not stripped out of `task`; they
//!   stay embedded in the task text.

use serde::{Deserialize, Serialize};

/// One task extracted from free-text meeting notes.
///
/// Items carry no identity and no relations; each is derived independently
/// from exactly one source line, and a new extraction call fully replaces
/// the previous result set held by the owning session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// Trimmed task text, required and non-empty.
    pub task: String,
    /// Bare name token when an assignee cue was detected, else `None`.
    ///
    /// Serialized as `null` when absent; tolerated as missing on input.
    #[serde(default)]
    pub assignee: Option<String>,
    /// Trimmed date/time phrase when a deadline cue was detected, else `None`.
    ///
    /// Serialized as `null` when absent; tolerated as missing on input.
    #[serde(default)]
    pub deadline: Option<String>,
}

impl ActionItem {
    /// Creates an item carrying only task text.
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            assignee: None,
            deadline: None,
        }
    }

    /// Returns whether the item satisfies the non-empty task contract.
    pub fn is_valid(&self) -> bool {
        !self.task.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ActionItem;

    #[test]
    fn absent_fields_serialize_as_null() {
        let item = ActionItem::new("send the report");
        let json = serde_json::to_value(&item).expect("item should serialize");
        assert_eq!(json["task"], "send the report");
        assert!(json["assignee"].is_null());
        assert!(json["deadline"].is_null());
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let item: ActionItem =
            serde_json::from_str(r#"{"task":"call the vendor"}"#).expect("item should parse");
        assert_eq!(item.task, "call the vendor");
        assert_eq!(item.assignee, None);
        assert_eq!(item.deadline, None);
    }

    #[test]
    fn blank_task_is_invalid() {
        assert!(!ActionItem::new("   ").is_valid());
        assert!(ActionItem::new("review deck").is_valid());
    }
}
