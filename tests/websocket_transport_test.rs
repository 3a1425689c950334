//! Socket transport against a local tokio-tungstenite server.

use std::time::Duration;

use chitchat::adapters::TungsteniteTransport;
use chitchat::models::OutgoingMessage;
use chitchat::traits::{ChatTransport, ConnectionState};
use chitchat::websocket::WsClientConfig;
use futures_util::{SinkExt, Stream, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::Message};

async fn listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}/ws", listener.local_addr().unwrap());
    (listener, url)
}

fn config(url: String) -> WsClientConfig {
    WsClientConfig {
        url,
        max_retries: 3,
        max_backoff_secs: 1,
    }
}

/// Next text frame from the client, parsed as JSON.
async fn next_json<S>(socket: &mut S) -> serde_json::Value
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("timed out waiting for frame")
            .expect("socket closed")
            .unwrap();
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

#[tokio::test]
async fn test_join_push_and_send() {
    let (listener, url) = listener().await;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(stream).await.unwrap();

        let join = next_json(&mut socket).await;
        assert_eq!(join["event"], "join");
        assert_eq!(join["data"], "me");

        let push = serde_json::json!({
            "event": "receive_message",
            "data": { "senderId": "alice", "receiverId": "me", "message": "hi" }
        });
        socket.send(Message::Text(push.to_string())).await.unwrap();
        // Malformed frames are skipped by the client
        socket.send(Message::Text("not json".to_string())).await.unwrap();

        next_json(&mut socket).await
    });

    let transport = TungsteniteTransport::connect(config(url)).await.unwrap();
    assert_eq!(*transport.state().borrow(), ConnectionState::Connected);
    let mut pushes = transport.subscribe();

    transport.join("me").await.unwrap();
    let push = tokio::time::timeout(Duration::from_secs(5), pushes.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(push.sender_id, "alice");
    assert_eq!(push.message, "hi");

    transport
        .send(OutgoingMessage {
            sender_id: "me".to_string(),
            receiver_id: "alice".to_string(),
            message: "hello back".to_string(),
        })
        .await
        .unwrap();

    let sent = server.await.unwrap();
    assert_eq!(sent["event"], "send_message");
    assert_eq!(sent["data"]["receiverId"], "alice");
    assert_eq!(sent["data"]["message"], "hello back");

    transport.shutdown();
}

#[tokio::test]
async fn test_reconnect_re_announces_user() {
    let (listener, url) = listener().await;
    let server = tokio::spawn(async move {
        // First connection: read the join, then drop the socket
        let (stream, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(stream).await.unwrap();
        let join = next_json(&mut socket).await;
        assert_eq!(join["event"], "join");
        drop(socket);

        // Second connection: the client must join again on its own
        let (stream, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(stream).await.unwrap();
        let rejoin = next_json(&mut socket).await;
        // Keep the second socket open while the test inspects the state
        (rejoin, socket)
    });

    let transport = TungsteniteTransport::connect(config(url)).await.unwrap();
    let mut state = transport.state();
    transport.join("me").await.unwrap();

    let (rejoin, _socket) = tokio::time::timeout(Duration::from_secs(10), server)
        .await
        .expect("server timed out")
        .unwrap();
    assert_eq!(rejoin["event"], "join");
    assert_eq!(rejoin["data"], "me");

    // The state settles back on Connected after the reconnect
    tokio::time::timeout(Duration::from_secs(5), async {
        while *state.borrow_and_update() != ConnectionState::Connected {
            state.changed().await.unwrap();
        }
    })
    .await
    .unwrap();

    transport.shutdown();
}

#[tokio::test]
async fn test_send_after_shutdown_fails() {
    let (listener, url) = listener().await;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(stream).await.unwrap();
        // Drain until the client closes
        while let Some(Ok(_)) = socket.next().await {}
    });

    let transport = TungsteniteTransport::connect(config(url)).await.unwrap();
    let mut state = transport.state();
    transport.shutdown();

    tokio::time::timeout(Duration::from_secs(5), async {
        while *state.borrow_and_update() != ConnectionState::Disconnected {
            state.changed().await.unwrap();
        }
    })
    .await
    .unwrap();

    let result = transport
        .send(OutgoingMessage {
            sender_id: "me".to_string(),
            receiver_id: "alice".to_string(),
            message: "late".to_string(),
        })
        .await;
    assert!(result.is_err());
    let _ = tokio::time::timeout(Duration::from_secs(5), server).await;
}

#[tokio::test]
async fn test_send_after_server_closed_is_not_delivered() {
    let (listener, url) = listener().await;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let socket = accept_async(stream).await.unwrap();
        // Close the socket and stop listening, so the reconnect gives up
        drop(socket);
        drop(listener);
    });

    let transport = TungsteniteTransport::connect(WsClientConfig {
        url,
        max_retries: 1,
        max_backoff_secs: 1,
    })
    .await
    .unwrap();
    let mut state = transport.state();
    server.await.unwrap();

    tokio::time::timeout(Duration::from_secs(10), async {
        while *state.borrow_and_update() != ConnectionState::Disconnected {
            state.changed().await.unwrap();
        }
    })
    .await
    .unwrap();

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        transport.send(OutgoingMessage {
            sender_id: "me".to_string(),
            receiver_id: "alice".to_string(),
            message: "lost".to_string(),
        }),
    )
    .await
    .expect("send should resolve once the loop has ended");
    assert_eq!(result, Err(chitchat::error::TransportFailure::Disconnected));
}
