//! Live WebSocket handlers
//!
//! Every socket gets a [`LiveMessage::Snapshot`] right away and a fresh one
//! after each relevant change. Frames from the client are ignored apart from
//! close.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use futures::{Sink, SinkExt, StreamExt};
use shared::client::{PhoneQuery, TokenQuery};
use shared::message::{Collection, LiveMessage};
use shared::models::Role;
use tokio::time::Duration;

use crate::auth::{CurrentUser, JwtError, authorize, lookup_role};
use crate::core::ServerState;
use crate::message::LiveSlot;
use crate::orders::queries;
use crate::security_log;
use crate::store::{Direction, Query as StoreQuery, Watch};
use crate::utils::{AppError, ErrorCode};

const PING_INTERVAL: Duration = Duration::from_secs(30);

/// GET /api/live/orders?phone=
pub async fn orders(
    State(state): State<ServerState>,
    Query(query): Query<PhoneQuery>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let phone = query
        .phone
        .as_deref()
        .and_then(shared::util::non_blank)
        .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "phone is required"))?
        .to_string();

    let key = format!("phone:{phone}");
    let slot = acquire(&state, &key)?;
    let watch = state.store.watch(Collection::Preorders, queries::by_phone(&phone));

    Ok(ws.on_upgrade(move |socket| live_session(socket, state, watch, slot, key)))
}

/// GET /api/live/kitchen?token=
pub async fn kitchen(
    State(state): State<ServerState>,
    Query(query): Query<TokenQuery>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let user = verify_staff(&state, query.token.as_deref(), &[Role::Chef])?;

    let key = format!("uid:{}", user.uid);
    let slot = acquire(&state, &key)?;
    let watch = state.store.watch(Collection::Preorders, queries::kitchen());

    Ok(ws.on_upgrade(move |socket| live_session(socket, state, watch, slot, key)))
}

/// GET /api/live/{collection}?token=
pub async fn collection(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    Query(query): Query<TokenQuery>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let collection = name
        .parse::<Collection>()
        .ok()
        .filter(Collection::is_admin_watchable)
        .ok_or_else(|| AppError::not_found(format!("Live collection {name}")))?;

    let user = verify_staff(&state, query.token.as_deref(), &[Role::Admin])?;

    let key = format!("uid:{}", user.uid);
    let slot = acquire(&state, &key)?;
    let watch = state.store.watch(collection, admin_query(collection));

    Ok(ws.on_upgrade(move |socket| live_session(socket, state, watch, slot, key)))
}

/// Dashboard ordering: menu oldest first, everything else newest first
fn admin_query(collection: Collection) -> StoreQuery {
    match collection {
        Collection::Preorders => queries::all(),
        Collection::MenuItems => StoreQuery::new().order_by("created_at", Direction::Asc),
        _ => StoreQuery::new().order_by("created_at", Direction::Desc),
    }
}

/// 手动验证 JWT 和角色
fn verify_staff(
    state: &ServerState,
    token: Option<&str>,
    allowed: &'static [Role],
) -> Result<CurrentUser, AppError> {
    let token = token
        .and_then(shared::util::non_blank)
        .ok_or_else(AppError::unauthorized)?;

    let claims = state.get_jwt_service().validate_token(token).map_err(|e| {
        security_log!(WARN, "live_auth_failed", error = %e);
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    let user = CurrentUser::from(claims);
    let lookup = lookup_role(&state.store, &user.uid);
    authorize(Some(&user), Some(&lookup), allowed)?;
    Ok(user)
}

fn acquire(state: &ServerState, key: &str) -> Result<LiveSlot, AppError> {
    state.live_connections.try_acquire(key).map_err(|current| {
        tracing::warn!(subscriber = %key, current = current, "Too many live connections");
        AppError::with_message(
            ErrorCode::TooManyConnections,
            format!("Too many live connections ({current})"),
        )
    })
}

async fn live_session(
    socket: WebSocket,
    state: ServerState,
    mut watch: Watch,
    _slot: LiveSlot,
    subscriber: String,
) {
    let (mut sink, mut stream) = socket.split();
    let collection = watch.collection();
    let shutdown = state.bus.shutdown_token();

    tracing::info!(subscriber = %subscriber, collection = %collection, "Live socket connected");

    let mut ping_interval = tokio::time::interval(PING_INTERVAL);
    ping_interval.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }

            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(Vec::new().into())).await.is_err() {
                    break;
                }
            }

            next = watch.next() => {
                let msg = match next {
                    Some(Ok(documents)) => LiveMessage::Snapshot { collection, documents },
                    Some(Err(e)) => {
                        let err = AppError::from(e);
                        tracing::error!(subscriber = %subscriber, collection = %collection, error = %err, "Live query failed");
                        let _ = send_message(&mut sink, &LiveMessage::Error {
                            code: err.code.code(),
                            message: err.message,
                        })
                        .await;
                        break;
                    }
                    None => break,
                };
                if send_message(&mut sink, &msg).await.is_err() {
                    break;
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }

    tracing::info!(subscriber = %subscriber, collection = %collection, "Live socket disconnected");
}

async fn send_message<S>(sink: &mut S, msg: &LiveMessage) -> Result<(), ()>
where
    S: Sink<Message> + Unpin,
{
    let text = serde_json::to_string(msg).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize live message");
    })?;
    sink.send(Message::Text(text.into())).await.map_err(|_| ())
}
