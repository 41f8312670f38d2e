//! 预订单生命周期
//!
//! 顾客提交 (总是 pending)，之后只能按状态表推进：
//!
//! | From | To | Actor |
//! |------|----|-------|
//! | pending | approved / rejected | admin |
//! | approved → taken → cooking → ready | | chef |
//! | ready | completed | admin |
//!
//! 非法转换返回 409 且不写入。合法转换只写 `status` 一个字段，
//! 没有比较并交换，最后写入者生效。

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use shared::message::Collection;
use shared::models::{
    CustomerInfo, MAX_LINE_PRICE, MAX_LINE_QUANTITY, OrderLine, PreOrder, PreOrderCreate, Role,
    compute_total,
};
use shared::order::{OrderAction, OrderStatus, TransitionError};
use validator::Validate;

use crate::audit_log;
use crate::auth::CurrentUser;
use crate::store::DocumentStore;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Stored body of a new pre-order
#[derive(Serialize)]
struct NewPreOrder<'a> {
    customer_info: &'a CustomerInfo,
    items: &'a [OrderLine],
    total_amount: Decimal,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

/// 预订单服务
#[derive(Clone)]
pub struct OrderLifecycle {
    store: DocumentStore,
}

impl OrderLifecycle {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// 创建预订单
    ///
    /// 服务端重新计算总价，强制 `pending`，写入 `created_at`。
    /// 客户端传来的 `total_amount` 只用于比对日志。
    pub fn submit(&self, payload: PreOrderCreate) -> AppResult<PreOrder> {
        payload.validate()?;
        let total_amount = validate_lines(&payload.items)?;
        if let Some(claimed) = payload.total_amount
            && claimed != total_amount
        {
            tracing::debug!(%claimed, %total_amount, "Client total differs, using recomputed total");
        }

        let body = NewPreOrder {
            customer_info: &payload.customer_info,
            items: &payload.items,
            total_amount,
            status: OrderStatus::Pending,
            created_at: shared::util::now(),
        };
        let doc = self.store.insert(Collection::Preorders, &body)?;
        let order: PreOrder = parse(doc)?;

        tracing::info!(
            order_id = %order.id,
            lines = order.items.len(),
            total = %order.total_amount,
            "Pre-order submitted"
        );
        Ok(order)
    }

    pub fn get(&self, id: &str) -> AppResult<PreOrder> {
        self.store
            .get_as::<PreOrder>(Collection::Preorders, id)?
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
            })
    }

    /// 执行一个后台动作
    ///
    /// `role` 是调用者当前的角色，必须是该动作的执行者。
    pub fn apply(
        &self,
        id: &str,
        action: OrderAction,
        actor: &CurrentUser,
        role: Role,
    ) -> AppResult<PreOrder> {
        let order = self.get(id)?;
        let from = order.status;

        let to = action
            .apply(from)
            .and_then(|to| from.transition(to, role))
            .map_err(|e| transition_error(id, action, e))?;

        let mut patch = Map::new();
        patch.insert("status".to_string(), Value::String(to.as_str().to_string()));
        let doc = self.store.update_fields(Collection::Preorders, id, patch)?;

        audit_log!(
            actor.uid.as_str(),
            action.as_str(),
            format!("preorder:{id}"),
            format!("{from} -> {to}")
        );
        tracing::info!(order_id = %id, %from, %to, "Pre-order status changed");

        parse(doc)
    }
}

/// Checks every line and returns the recomputed total
fn validate_lines(lines: &[OrderLine]) -> AppResult<Decimal> {
    if lines.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for line in lines {
        if line.quantity == 0 || line.quantity > MAX_LINE_QUANTITY {
            return Err(AppError::new(ErrorCode::OrderInvalidQuantity)
                .with_detail("menu_item_id", line.menu_item_id.as_str())
                .with_detail("max", MAX_LINE_QUANTITY));
        }
        if line.price < Decimal::ZERO || line.price > MAX_LINE_PRICE {
            return Err(AppError::validation(format!(
                "Line price must be between 0 and {MAX_LINE_PRICE}"
            ))
            .with_detail("menu_item_id", line.menu_item_id.as_str()));
        }
    }
    compute_total(lines).ok_or_else(|| AppError::validation("Order total is out of range"))
}

fn transition_error(id: &str, action: OrderAction, e: TransitionError) -> AppError {
    let mut err = AppError::with_message(ErrorCode::OrderInvalidTransition, e.to_string())
        .with_detail("order_id", id)
        .with_detail("action", action.as_str())
        .with_detail("from", e.from.as_str());
    if let Some(to) = e.to {
        err = err.with_detail("to", to.as_str());
    }
    err
}

fn parse(doc: Value) -> AppResult<PreOrder> {
    serde_json::from_value(doc)
        .map_err(|e| AppError::database(format!("Malformed pre-order document: {e}")))
}
