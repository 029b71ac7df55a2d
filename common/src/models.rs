use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty levels accepted by the server's create endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Medium,
    Expert,
}

impl Level {
    /// Path segment used in `/game/create/{level}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Expert => "expert",
        }
    }

    /// Static difficulty table mapping each level to its board shape.
    pub fn field(&self) -> FieldSpec {
        match self {
            Level::Easy => FieldSpec {
                rows: 8,
                columns: 8,
                mines: 10,
            },
            Level::Medium => FieldSpec {
                rows: 16,
                columns: 16,
                mines: 40,
            },
            Level::Expert => FieldSpec {
                rows: 30,
                columns: 16,
                mines: 99,
            },
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Board dimensions and mine count for one difficulty level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub rows: usize,
    pub columns: usize,
    pub mines: usize,
}

/// One board cell exactly as the server serializes it. The client only ever
/// replaces whole boards, never toggles individual fields.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

/// Request body for session creation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub player_name: String,
}

/// Immutable per-session configuration, derived once at bootstrap from the
/// difficulty table plus the server-issued session id.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub rows: usize,
    pub columns: usize,
    pub mine_count: usize,
    pub session_id: String,
    pub player_name: String,
}

impl SessionConfig {
    pub fn new(level: Level, session_id: String, player_name: String) -> Self {
        let field = level.field();
        Self {
            rows: field.rows,
            columns: field.columns,
            mine_count: field.mines,
            session_id,
            player_name,
        }
    }
}
