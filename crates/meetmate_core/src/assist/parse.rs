//! Strict parsing of model output into action items.
//!
//! # Responsibility
//! - Turn raw assistant text into a validated `Vec<ActionItem>`.
//!
//! # Invariants
//! - Only a JSON array of task objects is accepted; anything else is a
//!   parse failure, which callers treat as a fallback trigger.

use crate::model::action_item::ActionItem;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Parse failures for assistant extraction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionItemParseError {
    /// Output is not valid JSON, or not an array of task objects.
    InvalidJson(String),
    /// A parsed item carries an empty task after trimming.
    BlankTask { index: usize },
}

impl Display for ActionItemParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(message) => {
                write!(f, "assistant output is not an action-item list: {message}")
            }
            Self::BlankTask { index } => {
                write!(f, "assistant output item {index} has a blank task")
            }
        }
    }
}

impl Error for ActionItemParseError {}

/// Parses raw assistant output as a JSON array of task objects.
///
/// `assignee`/`deadline` may be `null` or missing on each object; `task`
/// must be present and non-blank.
pub fn parse_action_items_json(raw: &str) -> Result<Vec<ActionItem>, ActionItemParseError> {
    let items: Vec<ActionItem> = serde_json::from_str(raw)
        .map_err(|err| ActionItemParseError::InvalidJson(err.to_string()))?;

    for (index, item) in items.iter().enumerate() {
        if !item.is_valid() {
            return Err(ActionItemParseError::BlankTask { index });
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::{parse_action_items_json, ActionItemParseError};

    #[test]
    fn parses_array_of_task_objects() {
        let raw = r#"[
            {"task":"send the report","assignee":"John","deadline":"Friday"},
            {"task":"book a room","assignee":null,"deadline":null},
            {"task":"share slides"}
        ]"#;
        let items = parse_action_items_json(raw).expect("valid list should parse");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].assignee.as_deref(), Some("John"));
        assert_eq!(items[1].assignee, None);
        assert_eq!(items[2].deadline, None);
    }

    #[test]
    fn rejects_non_array_json() {
        let err = parse_action_items_json(r#"{"task":"one object"}"#)
            .expect_err("single object must be rejected");
        assert!(matches!(err, ActionItemParseError::InvalidJson(_)));
    }

    #[test]
    fn rejects_prose_output() {
        let err = parse_action_items_json("Here are your action items: ...")
            .expect_err("prose must be rejected");
        assert!(matches!(err, ActionItemParseError::InvalidJson(_)));
    }

    #[test]
    fn rejects_blank_task() {
        let err = parse_action_items_json(r#"[{"task":"  "}]"#)
            .expect_err("blank task must be rejected");
        assert_eq!(err, ActionItemParseError::BlankTask { index: 0 });
    }

    #[test]
    fn empty_array_is_a_valid_empty_list() {
        let items = parse_action_items_json("[]").expect("empty array should parse");
        assert!(items.is_empty());
    }
}
