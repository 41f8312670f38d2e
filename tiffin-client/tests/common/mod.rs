//! In-memory [`TiffinApi`] for driving the views without a server

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::message::{Collection, LiveMessage};
use shared::models::{
    Contact, ContactCreate, CustomerInfo, Feedback, FeedbackCreate, GalleryItem, MenuCategory,
    MenuItem, MenuItemCreate, OrderLine, PreOrder, PreOrderCreate, Reservation, ReservationCreate,
    Role, RoleLookup,
};
use shared::order::{OrderAction, OrderStatus};
use tiffin_client::{
    ClientError, ClientResult, LiveTopic, LoginResponse, Subscription, SubscriptionFeed,
    TiffinApi, UserInfo,
};

pub const PASSWORD: &str = "kitchen-secret-1";

#[derive(Default)]
pub struct FakeState {
    pub accounts: HashMap<String, (String, Option<Role>)>,
    pub signed_in: Option<String>,
    pub role_lookup_fails: bool,
    pub fail_writes: bool,
    pub menu: Vec<MenuItem>,
    pub preorders: Vec<PreOrder>,
    pub reservations: Vec<Reservation>,
    pub contacts: Vec<Contact>,
    pub feedback: Vec<Feedback>,
    pub uploads: Vec<(String, usize)>,
    pub feeds: Vec<(LiveTopic, SubscriptionFeed)>,
    pub logouts: usize,
}

/// Records every write and hands out feeds the test pushes into
#[derive(Default)]
pub struct FakeApi {
    pub state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        let api = Self::default();
        {
            let mut state = api.state.lock().unwrap();
            state
                .accounts
                .insert("admin@tiffin.test".into(), ("u-admin".into(), Some(Role::Admin)));
            state
                .accounts
                .insert("chef@tiffin.test".into(), ("u-chef".into(), Some(Role::Chef)));
            state
                .accounts
                .insert("new@tiffin.test".into(), ("u-new".into(), None));
            state.menu = vec![
                dish("m1", "Idli Sambar", 120, MenuCategory::Morning),
                dish("m2", "Masala Dosa", 150, MenuCategory::Morning),
                dish("m3", "Parotta", 90, MenuCategory::Night),
            ];
        }
        api
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    /// Feed opened for `topic`, most recent first
    pub fn feed(&self, topic: &LiveTopic) -> Option<SubscriptionFeed> {
        self.with(|s| {
            s.feeds
                .iter()
                .rev()
                .find(|(t, _)| t == topic)
                .map(|(_, f)| f.clone())
        })
    }

    fn write_guard(&self) -> ClientResult<()> {
        if self.with(|s| s.fail_writes) {
            return Err(AppError::internal("write failed").into());
        }
        Ok(())
    }
}

pub fn dish(id: &str, name: &str, price: i64, category: MenuCategory) -> MenuItem {
    MenuItem {
        id: id.into(),
        name: name.into(),
        description: String::new(),
        price: Decimal::from(price),
        category,
        image: None,
    }
}

pub fn order(id: &str, phone: &str, status: OrderStatus, minutes: i64) -> PreOrder {
    PreOrder {
        id: id.into(),
        customer_info: CustomerInfo {
            name: "Lakshmi".into(),
            phone: phone.into(),
            order_date: "2026-11-02".into(),
            order_time: "08:30".into(),
        },
        items: vec![OrderLine {
            menu_item_id: "m1".into(),
            name: "Idli Sambar".into(),
            quantity: 2,
            price: Decimal::from(120),
        }],
        total_amount: Decimal::from(240),
        status,
        created_at: Utc.with_ymd_and_hms(2026, 11, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes),
    }
}

pub fn snapshot<T: serde::Serialize>(collection: Collection, rows: &[T]) -> LiveMessage {
    LiveMessage::Snapshot {
        collection,
        documents: rows
            .iter()
            .map(|r| serde_json::to_value(r).unwrap())
            .collect(),
    }
}

fn stamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 11, 1, 9, 0, 0).unwrap()
}

#[async_trait]
impl TiffinApi for FakeApi {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        self.with(|s| {
            let uid = match s.accounts.get(email) {
                Some((uid, _)) if password == PASSWORD => uid.clone(),
                _ => return Err(AppError::invalid_credentials().into()),
            };
            s.signed_in = Some(email.to_string());
            Ok(LoginResponse {
                token: format!("token-{uid}"),
                user: UserInfo {
                    uid,
                    email: email.to_string(),
                },
            })
        })
    }

    async fn logout(&self) -> ClientResult<()> {
        self.with(|s| {
            s.signed_in = None;
            s.logouts += 1;
        });
        Ok(())
    }

    async fn role(&self) -> ClientResult<RoleLookup> {
        self.with(|s| {
            if s.role_lookup_fails {
                return Err(AppError::new(ErrorCode::RoleLookupFailed).into());
            }
            let email = s.signed_in.as_ref().ok_or_else(AppError::unauthorized)?;
            Ok(match s.accounts.get(email).and_then(|(_, role)| *role) {
                Some(role) => RoleLookup::Found { role },
                None => RoleLookup::NotFound,
            })
        })
    }

    async fn list_menu(&self) -> ClientResult<Vec<MenuItem>> {
        Ok(self.with(|s| s.menu.clone()))
    }

    async fn create_menu_item(&self, item: &MenuItemCreate) -> ClientResult<MenuItem> {
        self.write_guard()?;
        self.with(|s| {
            let created = MenuItem {
                id: format!("m{}", s.menu.len() + 1),
                name: item.name.clone(),
                description: item.description.clone(),
                price: item.price,
                category: item.category,
                image: item.image.clone(),
            };
            s.menu.push(created.clone());
            Ok(created)
        })
    }

    async fn delete_menu_item(&self, id: &str) -> ClientResult<()> {
        self.write_guard()?;
        self.with(|s| {
            let before = s.menu.len();
            s.menu.retain(|m| m.id != id);
            if s.menu.len() == before {
                return Err(AppError::new(ErrorCode::MenuItemNotFound).into());
            }
            Ok(())
        })
    }

    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<String> {
        self.write_guard()?;
        self.with(|s| s.uploads.push((file_name.to_string(), bytes.len())));
        Ok(format!("https://images.test/{file_name}"))
    }

    async fn list_gallery(&self) -> ClientResult<Vec<GalleryItem>> {
        Ok(Vec::new())
    }

    async fn create_reservation(&self, r: &ReservationCreate) -> ClientResult<Reservation> {
        self.write_guard()?;
        self.with(|s| {
            let created = Reservation {
                id: format!("r{}", s.reservations.len() + 1),
                name: r.name.clone(),
                phone: r.phone.clone(),
                email: r.email.clone(),
                date: r.date.clone(),
                time: r.time.clone(),
                party_size: r.party_size,
                special_requests: r.special_requests.clone(),
                status: "pending".into(),
                created_at: stamp(),
            };
            s.reservations.push(created.clone());
            Ok(created)
        })
    }

    async fn submit_preorder(&self, order: &PreOrderCreate) -> ClientResult<PreOrder> {
        self.write_guard()?;
        self.with(|s| {
            let created = PreOrder {
                id: format!("o{}", s.preorders.len() + 1),
                customer_info: order.customer_info.clone(),
                items: order.items.clone(),
                total_amount: shared::models::compute_total(&order.items).unwrap_or_default(),
                status: OrderStatus::Pending,
                created_at: stamp(),
            };
            s.preorders.push(created.clone());
            Ok(created)
        })
    }

    async fn send_contact(&self, c: &ContactCreate) -> ClientResult<Contact> {
        self.write_guard()?;
        self.with(|s| {
            let created = Contact {
                id: format!("c{}", s.contacts.len() + 1),
                name: c.name.clone(),
                email: c.email.clone(),
                phone: c.phone.clone(),
                subject: c.subject.clone(),
                message: c.message.clone(),
                created_at: stamp(),
            };
            s.contacts.push(created.clone());
            Ok(created)
        })
    }

    async fn send_feedback(&self, f: &FeedbackCreate) -> ClientResult<Feedback> {
        self.write_guard()?;
        self.with(|s| {
            let created = Feedback {
                id: format!("f{}", s.feedback.len() + 1),
                name: f.name.clone(),
                email: f.email.clone(),
                rating: f.rating,
                message: f.message.clone(),
                created_at: stamp(),
            };
            s.feedback.push(created.clone());
            Ok(created)
        })
    }

    async fn list_reservations(&self) -> ClientResult<Vec<Reservation>> {
        Ok(self.with(|s| s.reservations.clone()))
    }

    async fn list_preorders(&self) -> ClientResult<Vec<PreOrder>> {
        Ok(self.with(|s| s.preorders.clone()))
    }

    async fn list_contacts(&self) -> ClientResult<Vec<Contact>> {
        Ok(self.with(|s| s.contacts.clone()))
    }

    async fn list_feedback(&self) -> ClientResult<Vec<Feedback>> {
        Ok(self.with(|s| s.feedback.clone()))
    }

    async fn kitchen_orders(&self) -> ClientResult<Vec<PreOrder>> {
        Ok(self.with(|s| {
            s.preorders
                .iter()
                .filter(|o| o.status.is_in_kitchen())
                .cloned()
                .collect()
        }))
    }

    async fn update_order(&self, id: &str, action: OrderAction) -> ClientResult<PreOrder> {
        self.write_guard()?;
        self.with(|s| {
            let order = s
                .preorders
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or_else(|| ClientError::Api(AppError::new(ErrorCode::OrderNotFound)))?;
            let to = action
                .apply(order.status)
                .map_err(|e| AppError::with_message(ErrorCode::OrderInvalidTransition, e.to_string()))?;
            order.status = to;
            Ok(order.clone())
        })
    }

    async fn subscribe(&self, topic: LiveTopic) -> ClientResult<Subscription> {
        let (feed, subscription) = Subscription::channel(topic.clone());
        self.with(|s| s.feeds.push((topic, feed)));
        Ok(subscription)
    }
}
