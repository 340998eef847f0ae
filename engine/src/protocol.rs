//! Wire types shared by hosts that drive a game over JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    pub id: String,
    pub label: String,
    /// Whether the action needs a `row`/`col` target.
    pub targets_cell: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub title: String,
    pub board_size: usize,
    pub actions: Vec<ActionDescriptor>,
}

/// `cells[row][col]` with `row = 0` at the top; `None` marks an empty cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GridView {
    pub cells: Vec<Vec<Option<String>>>,
    pub highlighted: Vec<CellRef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineInfo {
    pub frame: usize,
    pub first_frame: usize,
    pub history_len: usize,
    pub can_rewind: bool,
    pub can_forward: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub frame: usize,
    pub stats: Vec<Stat>,
    pub grid: Option<GridView>,
    pub state: serde_json::Value,
}

impl Snapshot {
    pub fn stat(&self, label: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.value.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub action_id: String,
    #[serde(default)]
    pub row: Option<usize>,
    #[serde(default)]
    pub col: Option<usize>,
}

impl ActionRequest {
    pub fn new(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            row: None,
            col: None,
        }
    }

    pub fn at(action_id: impl Into<String>, row: usize, col: usize) -> Self {
        Self {
            action_id: action_id.into(),
            row: Some(row),
            col: Some(col),
        }
    }
}

/// Body of the rewind and forward routes. A missing count moves one frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FramesRequest {
    #[serde(default = "one_frame")]
    pub frames: usize,
}

fn one_frame() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_request_position_is_optional() {
        let parsed: ActionRequest =
            serde_json::from_str(r#"{"actionId":"spin"}"#).expect("request JSON should parse");
        assert_eq!(parsed, ActionRequest::new("spin"));

        let parsed: ActionRequest = serde_json::from_str(r#"{"actionId":"select","row":2,"col":3}"#)
            .expect("request JSON should parse");
        assert_eq!(parsed, ActionRequest::at("select", 2, 3));
    }

    #[test]
    fn grid_view_serializes_empty_cells_as_null() {
        let view = GridView {
            cells: vec![vec![Some("x".to_string()), None]],
            highlighted: vec![CellRef { row: 0, col: 1 }],
        };
        let json = serde_json::to_value(&view).expect("grid view should serialize");
        assert_eq!(
            json,
            serde_json::json!({"cells": [["x", null]], "highlighted": [{"row": 0, "col": 1}]})
        );
    }

    #[test]
    fn frames_request_defaults_to_one() {
        let parsed: FramesRequest = serde_json::from_str("{}").expect("request JSON should parse");
        assert_eq!(parsed.frames, 1);
        let parsed: FramesRequest =
            serde_json::from_str(r#"{"frames":4}"#).expect("request JSON should parse");
        assert_eq!(parsed.frames, 4);
    }
}
