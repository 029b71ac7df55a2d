use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use sweeper_client::{Cell, ChannelState, Face, GameSession, Level, SessionEvent};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_test::{assert_err, assert_ok};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

/// Answer the one-shot session creation request with the free-text body the
/// real server produces.
async fn serve_create(stream: &mut TcpStream, body: &str) {
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        request.extend_from_slice(&chunk[..n]);
        // request body is a JSON object
        if n == 0 || request.ends_with(b"}") {
            break;
        }
    }

    let response = format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await.unwrap();
    stream.shutdown().await.unwrap();
}

/// A full mock game server: first connection creates the session, the second
/// one is the realtime channel.
async fn spawn_game_server() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        serve_create(&mut stream, r#""New game created: sess1""#).await;

        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();

        // wait for the first player action before pushing a snapshot
        match ws.next().await.unwrap().unwrap() {
            Message::Text(text) => {
                assert_eq!(text.as_str(), r#"{"action":"reveal","row":0,"col":1}"#)
            }
            other => panic!("expected an action frame, got {other:?}"),
        }

        let mut board = vec![vec![Cell::default(); 8]; 8];
        board[0][1] = Cell {
            is_revealed: true,
            adjacent_mines: 1,
            ..Default::default()
        };
        let frame = serde_json::json!({ "board": board }).to_string();
        ws.send(Message::text(frame)).await.unwrap();

        // a local restart must not produce any outbound frame: the next
        // thing on the wire has to be the teardown, not an action
        match ws.next().await {
            Some(Ok(Message::Text(text))) => panic!("unexpected frame after restart: {text}"),
            _ => {}
        }
    });

    (format!("http://{addr}"), server)
}

#[tokio::test]
async fn session_bootstrap_and_snapshot_round_trip() {
    let (base_url, server) = spawn_game_server().await;

    let mut session =
        tokio_test::assert_ok!(GameSession::start(&base_url, Level::Easy, "Ada").await);

    // freshly created: config from the difficulty table, blank board,
    // counters at their initial values
    assert_eq!(session.config().session_id, "sess1");
    assert_eq!(session.config().player_name, "Ada");
    assert_eq!(session.config().rows, 8);
    assert_eq!(session.config().columns, 8);
    assert_eq!(session.config().mine_count, 10);
    assert_eq!(session.channel_state().await, ChannelState::Open);

    {
        let board = session.board();
        let board = board.read().await;
        assert_eq!(board.rows(), 8);
        assert_eq!(board.columns(), 8);
        assert!(board.cell(0, 1).is_some_and(|c| !c.is_revealed));
    }
    assert_eq!(session.ui().face().await, Face::Neutral);
    assert_eq!(session.ui().elapsed_seconds().await, 0);
    assert_eq!(session.ui().mines_remaining().await, 10);

    let mut events = session.subscribe_events().await;
    session.reveal(0, 1).await;

    let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("no event within 5s");
    assert!(matches!(event, Some(SessionEvent::BoardUpdated)));

    // the pushed snapshot replaced the board wholesale
    {
        let board = session.board();
        let board = board.read().await;
        let cell = board.cell(0, 1).copied().unwrap();
        assert!(cell.is_revealed);
        assert_eq!(cell.adjacent_mines, 1);
    }

    // restart is local-only: board and facets reset, nothing on the wire
    session.ui().press().await;
    session.restart().await;
    {
        let board = session.board();
        let board = board.read().await;
        assert!(board.cell(0, 1).is_some_and(|c| !c.is_revealed));
    }
    assert_eq!(session.ui().face().await, Face::Neutral);
    assert_eq!(session.ui().elapsed_seconds().await, 0);
    assert_eq!(session.ui().mines_remaining().await, 10);

    session.disconnect().await;
    server.await.unwrap();
}

#[tokio::test]
async fn failed_creation_forms_no_session() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut chunk = [0u8; 1024];
        let _ = stream.read(&mut chunk).await;
        let response =
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });

    let result = GameSession::start(&format!("http://{addr}"), Level::Medium, "Ada").await;
    tokio_test::assert_err!(result);
}
