mod common;

use std::time::Duration;

use common::TestApp;
use futures::StreamExt;
use serde_json::Value;
use shared::message::{Collection, LiveMessage};
use shared::models::{PreOrderCreate, Role};
use shared::order::OrderAction;
use tiffin_server::CurrentUser;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn serve(app: &TestApp) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn next_snapshot(socket: &mut Socket) -> (Collection, Vec<Value>) {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("no frame within 5s")
            .expect("socket closed")
            .unwrap();
        if let Message::Text(text) = frame {
            match serde_json::from_str::<LiveMessage>(&text).unwrap() {
                LiveMessage::Snapshot {
                    collection,
                    documents,
                } => return (collection, documents),
                other => panic!("unexpected live message: {other:?}"),
            }
        }
    }
}

fn submit(app: &TestApp, phone: &str) -> String {
    let body: PreOrderCreate = serde_json::from_value(common::preorder_body(phone)).unwrap();
    app.state.orders.submit(body).unwrap().id
}

fn admin_user() -> CurrentUser {
    CurrentUser {
        uid: "admin-uid".into(),
        email: "admin@tiffin.test".into(),
    }
}

#[tokio::test]
async fn test_customer_tracker_gets_snapshot_after_status_change() {
    let app = TestApp::new();
    let id = submit(&app, "98400");
    submit(&app, "11111");
    let addr = serve(&app).await;

    let (mut socket, _) = connect_async(format!("ws://{addr}/api/live/orders?phone=98400"))
        .await
        .unwrap();

    let (collection, docs) = next_snapshot(&mut socket).await;
    assert_eq!(collection, Collection::Preorders);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["status"], "pending");

    app.state
        .orders
        .apply(&id, OrderAction::Approve, &admin_user(), Role::Admin)
        .unwrap();

    let (_, docs) = next_snapshot(&mut socket).await;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["status"], "approved");
}

#[tokio::test]
async fn test_kitchen_socket_tracks_the_board() {
    let app = TestApp::new();
    let chef = app.chef();
    let id = submit(&app, "98400");
    let addr = serve(&app).await;

    let (mut socket, _) = connect_async(format!("ws://{addr}/api/live/kitchen?token={chef}"))
        .await
        .unwrap();
    let (_, docs) = next_snapshot(&mut socket).await;
    assert!(docs.is_empty());

    app.state
        .orders
        .apply(&id, OrderAction::Approve, &admin_user(), Role::Admin)
        .unwrap();
    let (_, docs) = next_snapshot(&mut socket).await;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["id"], id.as_str());
}

#[tokio::test]
async fn test_staff_sockets_check_token_and_role() {
    let app = TestApp::new();
    let chef = app.chef();
    let admin = app.admin();
    let addr = serve(&app).await;

    assert!(
        connect_async(format!("ws://{addr}/api/live/kitchen"))
            .await
            .is_err()
    );
    assert!(
        connect_async(format!("ws://{addr}/api/live/preorders?token={chef}"))
            .await
            .is_err()
    );
    assert!(
        connect_async(format!("ws://{addr}/api/live/accounts?token={admin}"))
            .await
            .is_err()
    );

    let (mut socket, _) =
        connect_async(format!("ws://{addr}/api/live/menu_items?token={admin}"))
            .await
            .unwrap();
    let (collection, docs) = next_snapshot(&mut socket).await;
    assert_eq!(collection, Collection::MenuItems);
    assert!(docs.is_empty());
}

#[tokio::test]
async fn test_live_connections_are_capped_per_subscriber() {
    let app = TestApp::new();
    let addr = serve(&app).await;
    let url = format!("ws://{addr}/api/live/orders?phone=98400");

    let mut open = Vec::new();
    for _ in 0..tiffin_server::message::MAX_LIVE_PER_KEY {
        let (mut socket, _) = connect_async(url.as_str()).await.unwrap();
        next_snapshot(&mut socket).await;
        open.push(socket);
    }
    assert!(connect_async(url.as_str()).await.is_err());

    if let Some(mut socket) = open.pop() {
        socket.close(None).await.unwrap();
    }
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(connect_async(url.as_str()).await.is_ok());
}
