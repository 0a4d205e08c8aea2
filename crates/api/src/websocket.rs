use async_tungstenite::tokio::TokioAdapter;
use async_tungstenite::tungstenite::Message;
use async_tungstenite::WebSocketStream;
use futures::channel::mpsc::{unbounded, UnboundedSender};
use futures::stream::SplitStream;
use futures::{pin_mut, select, FutureExt, StreamExt, TryStreamExt};
use serde::Serialize;
use tokio::net::{TcpListener, TcpStream};

use haven_database::events::client::{EventV1, Ping, WebSocketError};
use haven_database::events::fanout::{Fanout, Subscription};
use haven_database::events::server::ClientMessage;

type WsReader = SplitStream<WebSocketStream<TokioAdapter<TcpStream>>>;

/// Accept WebSocket connections and spawn a client worker for each one.
pub async fn launch(fanout: Fanout) {
    let bind = haven_config::config().await.api.ws;
    info!("Listening on host {bind}");
    let try_socket = TcpListener::bind(bind).await;
    let listener = try_socket.expect("Failed to bind");

    while let Ok((stream, addr)) = listener.accept().await {
        let fanout = fanout.clone();
        tokio::task::spawn(async move {
            info!("Viewer connected from {addr:?}");
            client(stream, fanout).await;
            info!("Viewer disconnected from {addr:?}");
        });
    }
}

/// Serve a single viewer connection for its lifetime.
async fn client(stream: TcpStream, fanout: Fanout) {
    let Ok(ws) = async_tungstenite::tokio::accept_async(stream).await else {
        return;
    };

    // Split the socket to simultaneously read and write.
    let (write, read) = ws.split();
    let (tx, rx) = unbounded();

    // Subscribe before the first poll so nothing published from here on is missed.
    let subscription = fanout.subscribe();

    let forward = rx.map(Ok).forward(write).fuse();
    let listener = listener(subscription, tx.clone()).fuse();
    let worker = worker(read, tx).fuse();

    // Wait for disconnect or for one of the workers to die; dropping the
    // subscription afterwards unsubscribes this viewer.
    pin_mut!(forward, listener, worker);
    select!(
        _ = forward => {},
        () = listener => {},
        () = worker => {}
    );
}

/// Push published events down the socket in publish order.
async fn listener(mut subscription: Subscription, tx: UnboundedSender<Message>) {
    while let Some(event) = subscription.rx.next().await {
        let Ok(text) = serde_json::to_string(&event) else {
            continue;
        };

        if tx.unbounded_send(Message::Text(text)).is_err() {
            return;
        }
    }
}

/// Handle serverbound traffic for as long as the connection lives.
async fn worker(mut read: WsReader, tx: UnboundedSender<Message>) {
    while let Ok(Some(msg)) = read.try_next().await {
        let payload = match msg {
            Message::Text(text) => serde_json::from_str::<ClientMessage>(&text),
            Message::Ping(data) => {
                send(&tx, &EventV1::Pong {
                    data: Ping::Binary(data),
                });
                continue;
            }
            Message::Close(_) => return,
            _ => continue,
        };

        match payload {
            Ok(ClientMessage::Ping { data }) => send(&tx, &EventV1::Pong { data }),
            Err(why) => send(
                &tx,
                &WebSocketError::MalformedData {
                    msg: why.to_string(),
                },
            ),
        }
    }
}

/// Queue a payload for the connection's write half.
fn send<T: Serialize>(tx: &UnboundedSender<Message>, payload: &T) {
    let Ok(text) = serde_json::to_string(payload) else {
        return;
    };

    if tx.unbounded_send(Message::Text(text)).is_err() {
        debug!("Failed to queue message for websocket stream.");
    }
}
