//! Sweeper Client Library
//!
//! Session controller for a server-authoritative minesweeper: the server owns
//! every game rule (mine placement, flood-fill reveal, win/loss); this crate
//! only manages session bootstrap, the realtime channel and the locally
//! derived UI feedback, and hands complete board snapshots to a renderer.
//!
//! ## Usage
//!
//! ### High-Level Interface (Recommended)
//!
//! The `GameSession` struct bootstraps a session from a difficulty choice and
//! keeps the board store fed from the channel:
//!
//! ```rust,no_run
//! use sweeper_client::{GameSession, Level};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let session = GameSession::start("http://localhost:8000", Level::Easy, "ada").await?;
//!
//!     // Send player intents; the server pushes back full snapshots
//!     session.reveal(0, 0).await;
//!     session.flag(1, 1).await;
//!
//!     // Read the board as last pushed by the server
//!     let board = session.board();
//!     let board = board.read().await;
//!     println!("{} x {}", board.rows(), board.columns());
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Low-Level Interface
//!
//! For more control, use the `SweeperClient` and `Connection` directly:
//!
//! ```rust,no_run
//! use sweeper_client::{Connection, Level, PlayerAction, ServerFrame, SweeperClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = SweeperClient::new("http://localhost:8000")?;
//!     let config = client.create_session(Level::Easy, "ada").await?;
//!
//!     let ws_url = client.websocket_url(&config.session_id)?;
//!     let mut connection = Connection::open(&ws_url).await?;
//!
//!     connection.send(PlayerAction::Reveal { row: 0, col: 0 }).await;
//!
//!     if let Some(ServerFrame::Snapshot(board)) = connection.next_frame().await {
//!         println!("Received a {}-row snapshot", board.len());
//!     }
//!
//!     connection.close().await?;
//!     Ok(())
//! }
//! ```

mod board;
mod client;
mod connection;
mod session;
mod ui;

pub use board::BoardStore;
pub use client::SweeperClient;
pub use connection::{ActionSender, ChannelState, Connection};
pub use session::{GameSession, SessionEvent};
pub use ui::{Face, TIMER_CAP_SECONDS, UiState};

// Re-export common types for convenience
pub use sweeper_common::{models::*, protocol::*};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
