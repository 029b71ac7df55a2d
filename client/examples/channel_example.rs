use sweeper_client::{Connection, Level, PlayerAction, ServerFrame, SweeperClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Create a client connecting to the server
    let client = SweeperClient::new("http://localhost:8000")?;

    // Create a session and derive its configuration
    let config = client.create_session(Level::Easy, "player-one").await?;
    println!(
        "Created session {}: {}x{} with {} mines",
        config.session_id, config.rows, config.columns, config.mine_count
    );

    // Open the realtime channel for the session
    let ws_url = client.websocket_url(&config.session_id)?;
    let mut connection = Connection::open(&ws_url).await?;

    // Send a reveal action
    connection.send(PlayerAction::Reveal { row: 0, col: 0 }).await;
    println!("Sent reveal for (0, 0)");

    // Wait for the next snapshot push
    while let Some(frame) = connection.next_frame().await {
        match frame {
            ServerFrame::Snapshot(board) => {
                println!("Received a snapshot with {} rows", board.len());
                for (row_index, row) in board.iter().enumerate() {
                    let revealed = row.iter().filter(|c| c.is_revealed).count();
                    println!("  row {row_index}: {revealed} revealed");
                }
                break;
            }
            ServerFrame::Unknown => {
                println!("Ignoring a frame without a board field");
            }
        }
    }

    // Close the connection
    connection.close().await?;
    println!("Connection closed");

    Ok(())
}
