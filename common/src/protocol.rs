use serde::{Deserialize, Serialize};

use crate::models::Cell;

/// A complete board state pushed by the server. Always replaces, never
/// patches, the locally held board.
pub type BoardSnapshot = Vec<Vec<Cell>>;

/// Player intent sent over the channel, carrying zero-based grid coordinates.
/// Coordinates are not range-checked client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PlayerAction {
    Reveal { row: usize, col: usize },
    Flag { row: usize, col: usize },
}

/// One decoded inbound frame. Frames are distinguished only by the presence
/// of a `board` field; every other shape is ignored rather than rejected.
#[derive(Debug, Clone)]
pub enum ServerFrame {
    /// The frame carried a `board` field: a full replacement snapshot.
    Snapshot(BoardSnapshot),
    /// Valid JSON without a `board` field.
    Unknown,
}

#[derive(Deserialize)]
struct RawFrame {
    board: Option<BoardSnapshot>,
}

impl ServerFrame {
    /// Decode a single inbound frame. Invalid JSON (or a `board` field that
    /// is not a cell matrix) is a decode failure the caller discards; the
    /// channel itself stays open.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        let raw: RawFrame = serde_json::from_str(text)?;
        Ok(match raw.board {
            Some(board) => ServerFrame::Snapshot(board),
            None => ServerFrame::Unknown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_with_action_tag() {
        let reveal = PlayerAction::Reveal { row: 2, col: 5 };
        assert_eq!(
            serde_json::to_string(&reveal).unwrap(),
            r#"{"action":"reveal","row":2,"col":5}"#
        );

        let flag = PlayerAction::Flag { row: 0, col: 7 };
        assert_eq!(
            serde_json::to_string(&flag).unwrap(),
            r#"{"action":"flag","row":0,"col":7}"#
        );
    }

    #[test]
    fn frame_with_board_decodes_to_snapshot() {
        let json = r#"{"board":[[{"isMine":false,"isRevealed":true,"isFlagged":false,"adjacentMines":1}]],"extra":42}"#;
        match ServerFrame::decode(json).unwrap() {
            ServerFrame::Snapshot(board) => {
                assert_eq!(board.len(), 1);
                assert_eq!(board[0][0].adjacent_mines, 1);
                assert!(board[0][0].is_revealed);
            }
            ServerFrame::Unknown => panic!("expected a snapshot"),
        }
    }

    #[test]
    fn frame_without_board_is_unknown() {
        assert!(matches!(
            ServerFrame::decode(r#"{"status":"ok"}"#).unwrap(),
            ServerFrame::Unknown
        ));
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        assert!(ServerFrame::decode("not-json").is_err());
    }
}
