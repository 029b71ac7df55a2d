use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

/// Elapsed-seconds cap. Ticking stops silently once the cap is reached.
pub const TIMER_CAP_SECONDS: u16 = 999;

/// The emoji-like status indicator above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Face {
    #[default]
    Neutral,
    /// A pointer button is held down over the board container.
    Pressed,
    Won,
    Lost,
}

impl Face {
    /// Glyph a renderer leaf can display directly.
    pub fn glyph(&self) -> &'static str {
        match self {
            Face::Neutral => "🙂",
            Face::Pressed => "🙃",
            Face::Won => "🥳",
            Face::Lost => "🥺",
        }
    }
}

#[derive(Debug)]
struct Facets {
    face: Face,
    elapsed_seconds: u16,
    mines_remaining: usize,
    live: bool,
}

/// Locally derived UI feedback: face, elapsed-time counter and
/// remaining-mine counter.
///
/// Runs orthogonally to the board data: it reacts to pointer events, timer
/// ticks and session reconfiguration, never to board contents. The timer is
/// an explicit cancellable task, armed when `live` becomes true and disarmed
/// when `live` drops, the cap is reached or the facets are reset.
#[derive(Debug)]
pub struct UiState {
    mine_count: usize,
    facets: Arc<RwLock<Facets>>,
    timer: Option<JoinHandle<()>>,
}

impl UiState {
    pub fn new(mine_count: usize) -> Self {
        Self {
            mine_count,
            facets: Arc::new(RwLock::new(Facets {
                face: Face::Neutral,
                elapsed_seconds: 0,
                mines_remaining: mine_count,
                live: false,
            })),
            timer: None,
        }
    }

    pub async fn face(&self) -> Face {
        self.facets.read().await.face
    }

    pub async fn elapsed_seconds(&self) -> u16 {
        self.facets.read().await.elapsed_seconds
    }

    // TODO: no event decrements this when a flag is placed; it needs a
    // flag-count signal in the protocol.
    pub async fn mines_remaining(&self) -> usize {
        self.facets.read().await.mines_remaining
    }

    pub async fn is_live(&self) -> bool {
        self.facets.read().await.live
    }

    /// Pointer button pressed anywhere over the board container.
    pub async fn press(&self) {
        self.facets.write().await.face = Face::Pressed;
    }

    /// Pointer button released.
    pub async fn release(&self) {
        self.facets.write().await.face = Face::Neutral;
    }

    /// Start or stop the elapsed-time counter.
    ///
    /// TODO: no session code path sets this yet; the protocol carries no
    /// first-reveal or game-over signal, so the timer facet stays dormant
    /// until one exists. The `Won`/`Lost` faces are unreachable for the same
    /// reason.
    pub async fn set_live(&mut self, live: bool) {
        {
            let mut facets = self.facets.write().await;
            if facets.live == live {
                return;
            }
            facets.live = live;
        }

        if live {
            self.arm_timer();
        } else {
            self.disarm_timer();
        }
    }

    /// Local-only reset of all three facets; sends nothing to the server.
    pub async fn reset(&mut self) {
        self.disarm_timer();

        let mut facets = self.facets.write().await;
        facets.face = Face::Neutral;
        facets.elapsed_seconds = 0;
        facets.mines_remaining = self.mine_count;
        facets.live = false;
    }

    fn arm_timer(&mut self) {
        self.disarm_timer();

        let facets = self.facets.clone();
        self.timer = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // the first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;

                let mut facets = facets.write().await;
                if !facets.live || facets.elapsed_seconds >= TIMER_CAP_SECONDS {
                    break;
                }
                facets.elapsed_seconds += 1;
                debug!("Timer tick: {}s", facets.elapsed_seconds);
            }
        }));
    }

    fn disarm_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for UiState {
    fn drop(&mut self) {
        self.disarm_timer();
    }
}
