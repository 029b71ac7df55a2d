//! Shared data model and wire protocol for the sweeper session client.
//!
//! Everything here mirrors what the game server serializes: the client never
//! derives any of these values itself.

pub mod models;
pub mod protocol;
