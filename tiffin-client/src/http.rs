//! HTTP client for the Tiffin server

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::client::{LoginRequest, LoginResponse, UploadResponse};
use shared::error::ApiResponse;
use shared::message::LiveMessage;
use shared::models::{
    Contact, ContactCreate, Feedback, FeedbackCreate, GalleryItem, MenuItem, MenuItemCreate,
    PreOrder, PreOrderCreate, Reservation, ReservationCreate, RoleLookup,
};
use shared::order::OrderAction;
use tokio_tungstenite::tungstenite::Message;

use crate::api::{TiffinApi, order_action_path};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::subscription::{LiveTopic, Subscription, SubscriptionFeed};

/// HTTP client for making network requests to the Tiffin server
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
    token: RwLock<Option<String>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
            token: RwLock::new(config.token.clone()),
        })
    }

    /// Get the current token
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.get(self.config.url(path)));
        Self::handle_response(request.send().await?).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.config.url(path)).json(body));
        Self::handle_response(request.send().await?).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.config.url(path)));
        Self::handle_response(request.send().await?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.delete(self.config.url(path)));
        Self::handle_response(request.send().await?).await
    }

    /// Make a POST request whose success carries no payload
    pub async fn post_unit(&self, path: &str) -> ClientResult<()> {
        let request = self.authorized(self.client.post(self.config.url(path)));
        Self::envelope::<serde_json::Value>(request.send().await?).await?;
        Ok(())
    }

    /// Unwrap the `{code, message, data}` envelope
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        Self::envelope::<T>(response)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".to_string()))
    }

    /// Error envelopes become [`ClientError::Api`]; a non-JSON failure keeps
    /// the status and body text.
    async fn envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<ApiResponse<T>> {
        let status = response.status();
        let bytes = response.bytes().await?;

        let envelope: ApiResponse<T> = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(ClientError::InvalidResponse(format!(
                    "{status}: {}",
                    String::from_utf8_lossy(&bytes)
                )));
            }
        };

        if !envelope.is_success() {
            let err = envelope
                .into_error()
                .ok_or_else(|| ClientError::InvalidResponse(status.to_string()))?;
            return Err(err.into());
        }
        if !status.is_success() {
            return Err(ClientError::InvalidResponse(format!(
                "{status} with a success envelope"
            )));
        }
        Ok(envelope)
    }

    fn live_url(&self, topic: &LiveTopic) -> ClientResult<Url> {
        let mut url = Url::parse(&self.config.ws_url(&topic.path()))
            .map_err(|e| ClientError::InvalidResponse(format!("Bad live URL: {e}")))?;
        if let LiveTopic::Orders { phone } = topic {
            url.query_pairs_mut().append_pair("phone", phone);
        }
        if topic.needs_token()
            && let Some(token) = self.token()
        {
            url.query_pairs_mut().append_pair("token", &token);
        }
        Ok(url)
    }
}

#[async_trait]
impl TiffinApi for HttpClient {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("/api/auth/login", &request).await?;
        self.set_token(Some(response.token.clone()));
        Ok(response)
    }

    async fn logout(&self) -> ClientResult<()> {
        let result = self.post_unit("/api/auth/logout").await;
        self.set_token(None);
        result
    }

    async fn role(&self) -> ClientResult<RoleLookup> {
        self.get("/api/auth/role").await
    }

    async fn list_menu(&self) -> ClientResult<Vec<MenuItem>> {
        self.get("/api/menu").await
    }

    async fn create_menu_item(&self, item: &MenuItemCreate) -> ClientResult<MenuItem> {
        self.post("/api/menu", item).await
    }

    async fn delete_menu_item(&self, id: &str) -> ClientResult<()> {
        self.delete::<bool>(&format!("/api/menu/{id}")).await?;
        Ok(())
    }

    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<String> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let request = self.authorized(
            self.client
                .post(self.config.url("/api/uploads/image"))
                .multipart(form),
        );
        let uploaded: UploadResponse = Self::handle_response(request.send().await?).await?;
        Ok(uploaded.url)
    }

    async fn list_gallery(&self) -> ClientResult<Vec<GalleryItem>> {
        self.get("/api/gallery").await
    }

    async fn create_reservation(&self, reservation: &ReservationCreate) -> ClientResult<Reservation> {
        self.post("/api/reservations", reservation).await
    }

    async fn submit_preorder(&self, order: &PreOrderCreate) -> ClientResult<PreOrder> {
        self.post("/api/preorders", order).await
    }

    async fn send_contact(&self, contact: &ContactCreate) -> ClientResult<Contact> {
        self.post("/api/contacts", contact).await
    }

    async fn send_feedback(&self, feedback: &FeedbackCreate) -> ClientResult<Feedback> {
        self.post("/api/feedback", feedback).await
    }

    async fn list_reservations(&self) -> ClientResult<Vec<Reservation>> {
        self.get("/api/reservations").await
    }

    async fn list_preorders(&self) -> ClientResult<Vec<PreOrder>> {
        self.get("/api/preorders").await
    }

    async fn list_contacts(&self) -> ClientResult<Vec<Contact>> {
        self.get("/api/contacts").await
    }

    async fn list_feedback(&self) -> ClientResult<Vec<Feedback>> {
        self.get("/api/feedback").await
    }

    async fn kitchen_orders(&self) -> ClientResult<Vec<PreOrder>> {
        self.get("/api/kitchen/orders").await
    }

    async fn update_order(&self, id: &str, action: OrderAction) -> ClientResult<PreOrder> {
        self.post_empty(&order_action_path(id, action)).await
    }

    async fn subscribe(&self, topic: LiveTopic) -> ClientResult<Subscription> {
        let url = self.live_url(&topic)?;
        let (socket, _) = tokio_tungstenite::connect_async(url.as_str()).await?;

        tracing::debug!(topic = ?topic, "Live socket opened");
        let (feed, subscription) = Subscription::channel(topic);
        tokio::spawn(read_live(socket, feed));
        Ok(subscription)
    }
}

/// Socket reader task; ends when the subscription is dropped or the socket closes
async fn read_live<S>(socket: tokio_tungstenite::WebSocketStream<S>, feed: SubscriptionFeed)
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            _ = feed.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }

            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => match serde_json::from_str::<LiveMessage>(&text) {
                        Ok(msg) => {
                            if !feed.send(msg).await {
                                let _ = sink.send(Message::Close(None)).await;
                                break;
                            }
                        }
                        Err(e) => tracing::warn!(error = %e, "Ignoring malformed live frame"),
                    },
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Live socket failed");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live socket closed");
}
