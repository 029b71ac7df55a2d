use sweeper_client::{GameSession, Level, SessionEvent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Bootstrap a session: difficulty choice plus player name
    let session = GameSession::start("http://localhost:8000", Level::Easy, "player-one").await?;

    let config = session.config().clone();
    println!(
        "Session {} started for {}: {}x{} with {} mines",
        config.session_id, config.player_name, config.rows, config.columns, config.mine_count
    );

    let mut events = session.subscribe_events().await;

    // Ask the server to reveal the top-left cell; the reply is a full snapshot
    session.reveal(0, 0).await;

    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::BoardUpdated => {
                let board = session.board();
                let board = board.read().await;
                for row in board.cells() {
                    for cell in row {
                        let glyph = if cell.is_revealed {
                            if cell.is_mine {
                                "*".to_string()
                            } else {
                                cell.adjacent_mines.to_string()
                            }
                        } else if cell.is_flagged {
                            "F".to_string()
                        } else {
                            ".".to_string()
                        };
                        print!("{glyph} ");
                    }
                    println!();
                }
                break;
            }
            SessionEvent::ConnectionLost => {
                println!("Connection lost");
                break;
            }
        }
    }

    println!(
        "Face: {}  mines remaining: {}",
        session.ui().face().await.glyph(),
        session.ui().mines_remaining().await
    );

    session.disconnect().await;
    Ok(())
}
