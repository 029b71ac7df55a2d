use std::sync::Arc;

use futures_util::{SinkExt, StreamExt, stream::SplitStream};
use sweeper_common::protocol::{PlayerAction, ServerFrame};
use tokio::net::TcpStream;
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::Result;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsReader = SplitStream<WsStream>;

/// Lifecycle of the realtime channel. `Closed` and `Errored` are terminal
/// for the channel; there is no client-initiated reconnection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Disconnected,
    Connecting,
    Open,
    Closed,
    Errored,
}

/// Sending half of the channel, gated on the channel being `Open`.
#[derive(Clone, Debug)]
pub struct ActionSender {
    sender: mpsc::UnboundedSender<PlayerAction>,
    state: Arc<RwLock<ChannelState>>,
}

impl ActionSender {
    /// Queue a player action for the server.
    ///
    /// A no-op unless the channel is currently `Open`: actions attempted in
    /// any other state are dropped, not queued and not reported.
    pub async fn send(&self, action: PlayerAction) {
        if *self.state.read().await != ChannelState::Open {
            return;
        }
        let _ = self.sender.send(action);
    }
}

/// The single realtime channel of a session: decodes inbound frames into
/// board snapshots and encodes outbound player actions. Exactly one exists
/// per session, addressed by the session id.
pub struct Connection {
    actions: ActionSender,
    reader: WsReader,
    state: Arc<RwLock<ChannelState>>,
    writer_task: JoinHandle<()>,
}

impl Connection {
    /// Open the channel for a session. A handshake failure leaves the
    /// channel `Errored`.
    pub async fn open(url: &str) -> Result<Self> {
        info!("Connecting to channel: {}", url);
        let state = Arc::new(RwLock::new(ChannelState::Disconnected));

        *state.write().await = ChannelState::Connecting;
        let ws_stream = match connect_async(url).await {
            Ok((ws_stream, _)) => ws_stream,
            Err(e) => {
                warn!("Channel handshake failed: {}", e);
                *state.write().await = ChannelState::Errored;
                return Err(e.into());
            }
        };

        *state.write().await = ChannelState::Open;
        info!("Channel established");

        let (writer, reader) = ws_stream.split();

        // Create MPSC channel for sending actions
        let (sender, mut receiver) = mpsc::unbounded_channel::<PlayerAction>();

        // Spawn writer task that handles all outgoing frames
        let writer_state = state.clone();
        let writer_task = tokio::spawn(async move {
            let mut writer = writer;
            while let Some(action) = receiver.recv().await {
                let json = match serde_json::to_string(&action) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!("Failed to serialize action: {}", e);
                        continue;
                    }
                };

                debug!("Sending action frame: {}", json);
                if let Err(e) = writer.send(Message::Text(json.into())).await {
                    warn!("Failed to send action frame: {}", e);
                    *writer_state.write().await = ChannelState::Errored;
                    break;
                }
            }

            // Close the writer when done
            let _ = writer.close().await;
        });

        let actions = ActionSender {
            sender,
            state: state.clone(),
        };

        Ok(Self {
            actions,
            reader,
            state,
            writer_task,
        })
    }

    /// Current lifecycle state of the channel.
    pub async fn state(&self) -> ChannelState {
        *self.state.read().await
    }

    pub(crate) fn state_handle(&self) -> Arc<RwLock<ChannelState>> {
        self.state.clone()
    }

    /// Get a cloneable, state-gated sender for player actions.
    pub fn action_sender(&self) -> ActionSender {
        self.actions.clone()
    }

    /// Queue a player action; see [`ActionSender::send`].
    pub async fn send(&self, action: PlayerAction) {
        self.actions.send(action).await;
    }

    /// Receive the next decoded inbound frame.
    ///
    /// Frames that are not valid JSON are logged and discarded with the
    /// channel staying `Open`. Returns `None` once the channel has reached a
    /// terminal state.
    pub async fn next_frame(&mut self) -> Option<ServerFrame> {
        loop {
            let message = match self.reader.next().await {
                Some(Ok(message)) => message,
                Some(Err(e)) => {
                    warn!("Channel transport error: {}", e);
                    *self.state.write().await = ChannelState::Errored;
                    return None;
                }
                None => {
                    info!("Channel closed by peer");
                    *self.state.write().await = ChannelState::Closed;
                    return None;
                }
            };

            match message {
                Message::Text(text) => {
                    debug!("Received frame: {}", text);
                    match ServerFrame::decode(&text) {
                        Ok(frame) => return Some(frame),
                        Err(e) => {
                            warn!("Discarding undecodable frame: {}", e);
                        }
                    }
                }
                Message::Close(_) => {
                    info!("Channel closed by peer");
                    *self.state.write().await = ChannelState::Closed;
                    return None;
                }
                _ => {
                    // ping/pong and binary frames carry no game data
                }
            }
        }
    }

    /// Close the channel from this side.
    pub async fn close(self) -> Result<()> {
        // Drop the sender to signal the writer task to close
        drop(self.actions);

        // Wait for the writer task to complete
        let _ = self.writer_task.await;

        *self.state.write().await = ChannelState::Closed;
        Ok(())
    }
}
