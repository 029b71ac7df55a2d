use std::sync::Arc;

use sweeper_common::models::{Level, SessionConfig};
use sweeper_common::protocol::{PlayerAction, ServerFrame};
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::connection::{ActionSender, ChannelState, Connection};
use crate::{BoardStore, Result, SweeperClient, UiState};

/// Events emitted towards the rendering layer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A new snapshot replaced the board.
    BoardUpdated,
    /// The channel reached a terminal state.
    ConnectionLost,
}

/// One play-through: the immutable session configuration, the realtime
/// channel, the server-fed board store and the locally derived UI state.
///
/// The session never computes game logic itself; every board mutation comes
/// from the server as a full snapshot, applied in the order received.
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    board: Arc<RwLock<BoardStore>>,
    ui: UiState,
    actions: ActionSender,
    channel_state: Arc<RwLock<ChannelState>>,
    event_sender: Arc<RwLock<Option<mpsc::UnboundedSender<SessionEvent>>>>,
    listener_task: JoinHandle<()>,
}

impl GameSession {
    /// Bootstrap a session: create it over HTTP for the chosen difficulty,
    /// open the realtime channel and start applying inbound snapshots.
    pub async fn start(server_url: &str, level: Level, player_name: &str) -> Result<Self> {
        let client = SweeperClient::new(server_url)?;
        Self::start_with(&client, level, player_name).await
    }

    /// Bootstrap a session using an existing HTTP client.
    pub async fn start_with(
        client: &SweeperClient,
        level: Level,
        player_name: &str,
    ) -> Result<Self> {
        let config = client.create_session(level, player_name).await?;
        info!(
            "Starting session {} for {}: {}x{} with {} mines",
            config.session_id, config.player_name, config.rows, config.columns, config.mine_count
        );

        let ws_url = client.websocket_url(&config.session_id)?;
        let connection = Connection::open(&ws_url).await?;

        let board = Arc::new(RwLock::new(BoardStore::blank(config.rows, config.columns)));
        let ui = UiState::new(config.mine_count);
        let actions = connection.action_sender();
        let channel_state = connection.state_handle();
        let event_sender = Arc::new(RwLock::new(None));

        let listener_task = Self::start_listener(connection, board.clone(), event_sender.clone());

        Ok(Self {
            config,
            board,
            ui,
            actions,
            channel_state,
            event_sender,
            listener_task,
        })
    }

    /// The immutable per-session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Rendering-side view of the board.
    pub fn board(&self) -> Arc<RwLock<BoardStore>> {
        self.board.clone()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    /// Current lifecycle state of the session's channel.
    pub async fn channel_state(&self) -> ChannelState {
        *self.channel_state.read().await
    }

    /// Subscribe to session events. Returns a receiver for session events.
    pub async fn subscribe_events(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut event_sender = self.event_sender.write().await;
        *event_sender = Some(sender);
        receiver
    }

    /// Ask the server to reveal a cell. Dropped silently if the channel is
    /// not open.
    pub async fn reveal(&self, row: usize, col: usize) {
        debug!("Revealing cell at ({}, {})", row, col);
        self.actions.send(PlayerAction::Reveal { row, col }).await;
    }

    /// Ask the server to toggle a flag. Dropped silently if the channel is
    /// not open.
    pub async fn flag(&self, row: usize, col: usize) {
        debug!("Flagging cell at ({}, {})", row, col);
        self.actions.send(PlayerAction::Flag { row, col }).await;
    }

    /// Local-only restart: blanks the board and resets the UI facets without
    /// emitting any channel frame.
    ///
    /// TODO: the wire protocol has no restart action, so the server keeps
    /// playing the old game until one is added.
    pub async fn restart(&mut self) {
        info!("Restarting session {} locally", self.config.session_id);
        self.ui.reset().await;
        self.board
            .write()
            .await
            .reset(self.config.rows, self.config.columns);
    }

    /// Tear down the inbound listener and the channel.
    ///
    /// Nothing calls this automatically when a session is dropped; a caller
    /// that abandons a session without it leaks the channel to the server.
    pub async fn disconnect(self) {
        self.listener_task.abort();
        let _ = self.listener_task.await;
        info!("Disconnected from session {}", self.config.session_id);
    }

    /// Start the background listener applying inbound frames.
    fn start_listener(
        mut connection: Connection,
        board: Arc<RwLock<BoardStore>>,
        event_sender: Arc<RwLock<Option<mpsc::UnboundedSender<SessionEvent>>>>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(frame) = connection.next_frame().await {
                match frame {
                    ServerFrame::Snapshot(snapshot) => {
                        debug!("Applying snapshot with {} rows", snapshot.len());
                        board.write().await.replace(snapshot);

                        if let Some(ref sender) = *event_sender.read().await {
                            let _ = sender.send(SessionEvent::BoardUpdated);
                        }
                    }
                    ServerFrame::Unknown => {
                        debug!("Ignoring frame without a board field");
                    }
                }
            }

            // terminal channel state; no reconnection is attempted
            if let Some(ref sender) = *event_sender.read().await {
                let _ = sender.send(SessionEvent::ConnectionLost);
            }
        })
    }
}
