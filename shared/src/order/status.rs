//! Pre-order status machine
//!
//! ```text
//! pending ──approve──▶ approved ──▶ taken ──▶ cooking ──▶ ready ──complete──▶ completed
//!    │                   └─────────── kitchen (chef) ───────────┘
//!    └──reject──▶ rejected
//! ```
//!
//! Front-of-house moves (approve, reject, complete) belong to the admin;
//! the kitchen moves belong to the chef. Nothing ever leaves `completed`
//! or `rejected`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
    Taken,
    Cooking,
    Ready,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Rejected,
        OrderStatus::Taken,
        OrderStatus::Cooking,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ];

    /// Statuses the kitchen board shows
    pub const KITCHEN: [OrderStatus; 4] = [
        OrderStatus::Approved,
        OrderStatus::Taken,
        OrderStatus::Cooking,
        OrderStatus::Ready,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Taken => "taken",
            Self::Cooking => "cooking",
            Self::Ready => "ready",
            Self::Completed => "completed",
        }
    }

    /// Customer-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending Approval",
            Self::Approved => "Approved",
            Self::Taken => "Order Taken",
            Self::Cooking => "Cooking",
            Self::Ready => "Ready for Pickup",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
        }
    }

    /// Progress bar value on the customer tracker
    pub fn progress_percent(&self) -> u8 {
        match self {
            Self::Pending => 25,
            Self::Approved | Self::Taken => 50,
            Self::Cooking => 75,
            Self::Ready | Self::Completed => 100,
            Self::Rejected => 0,
        }
    }

    /// Progress bar value on the kitchen board; `None` off the board
    pub fn kitchen_progress(&self) -> Option<u8> {
        match self {
            Self::Approved => Some(25),
            Self::Taken => Some(50),
            Self::Cooking => Some(75),
            Self::Ready => Some(100),
            _ => None,
        }
    }

    pub fn is_in_kitchen(&self) -> bool {
        Self::KITCHEN.contains(self)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }

    /// The status a chef moves this order to next
    pub fn next_kitchen_status(&self) -> Option<OrderStatus> {
        match self {
            Self::Approved => Some(Self::Taken),
            Self::Taken => Some(Self::Cooking),
            Self::Cooking => Some(Self::Ready),
            _ => None,
        }
    }

    /// Button text for the chef's next move
    pub fn kitchen_action_label(&self) -> Option<&'static str> {
        match self {
            Self::Approved => Some("Mark as Taken"),
            Self::Taken => Some("Start Cooking"),
            Self::Cooking => Some("Mark as Ready"),
            _ => None,
        }
    }

    /// Role allowed to move an order from `self` to `to`, if the move exists
    pub fn transition_owner(&self, to: OrderStatus) -> Option<Role> {
        use OrderStatus::*;
        match (self, to) {
            (Pending, Approved) | (Pending, Rejected) | (Ready, Completed) => Some(Role::Admin),
            (Approved, Taken) | (Taken, Cooking) | (Cooking, Ready) => Some(Role::Chef),
            _ => None,
        }
    }

    /// Check a move against the transition table
    pub fn transition(&self, to: OrderStatus, actor: Role) -> Result<OrderStatus, TransitionError> {
        match self.transition_owner(to) {
            Some(owner) if owner == actor => Ok(to),
            _ => Err(TransitionError {
                from: *self,
                to: Some(to),
                actor,
            }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status change the table does not allow
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{actor} cannot move order from {from} to {}", target_name(.to))]
pub struct TransitionError {
    pub from: OrderStatus,
    /// `None` when the action has no next status from `from`
    pub to: Option<OrderStatus>,
    pub actor: Role,
}

fn target_name(to: &Option<OrderStatus>) -> &'static str {
    to.map(|s| s.as_str()).unwrap_or("a next status")
}

/// Named back-office actions, one per endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderAction {
    Approve,
    Reject,
    /// Chef's next kitchen step
    Advance,
    Complete,
}

impl OrderAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Advance => "advance",
            Self::Complete => "complete",
        }
    }

    /// Role that performs this action
    pub fn actor(&self) -> Role {
        match self {
            Self::Advance => Role::Chef,
            _ => Role::Admin,
        }
    }

    /// Resolve the target status for an order currently in `from`
    pub fn apply(&self, from: OrderStatus) -> Result<OrderStatus, TransitionError> {
        let target = match self {
            Self::Approve => Some(OrderStatus::Approved),
            Self::Reject => Some(OrderStatus::Rejected),
            Self::Complete => Some(OrderStatus::Completed),
            Self::Advance => from.next_kitchen_status(),
        };
        match target {
            Some(to) => from.transition(to, self.actor()),
            None => Err(TransitionError {
                from,
                to: None,
                actor: self.actor(),
            }),
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_table() {
        let expected = [
            (OrderStatus::Pending, 25),
            (OrderStatus::Approved, 50),
            (OrderStatus::Taken, 50),
            (OrderStatus::Cooking, 75),
            (OrderStatus::Ready, 100),
            (OrderStatus::Completed, 100),
            (OrderStatus::Rejected, 0),
        ];
        for (status, pct) in expected {
            assert_eq!(status.progress_percent(), pct, "{status}");
        }
    }

    #[test]
    fn test_kitchen_progress_only_on_board() {
        assert_eq!(OrderStatus::Approved.kitchen_progress(), Some(25));
        assert_eq!(OrderStatus::Taken.kitchen_progress(), Some(50));
        assert_eq!(OrderStatus::Cooking.kitchen_progress(), Some(75));
        assert_eq!(OrderStatus::Ready.kitchen_progress(), Some(100));
        assert_eq!(OrderStatus::Pending.kitchen_progress(), None);
        assert_eq!(OrderStatus::Completed.kitchen_progress(), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(OrderStatus::Pending.label(), "Pending Approval");
        assert_eq!(OrderStatus::Taken.label(), "Order Taken");
        assert_eq!(OrderStatus::Ready.label(), "Ready for Pickup");
    }

    #[test]
    fn test_kitchen_sequence_and_buttons() {
        let mut status = OrderStatus::Approved;
        let mut buttons = Vec::new();
        while let Some(next) = status.next_kitchen_status() {
            buttons.push(status.kitchen_action_label().unwrap());
            status = status.transition(next, Role::Chef).unwrap();
        }
        assert_eq!(status, OrderStatus::Ready);
        assert_eq!(buttons, ["Mark as Taken", "Start Cooking", "Mark as Ready"]);
        assert!(OrderStatus::Ready.kitchen_action_label().is_none());
    }

    #[test]
    fn test_transition_table_is_exhaustive() {
        let allowed = [
            (OrderStatus::Pending, OrderStatus::Approved, Role::Admin),
            (OrderStatus::Pending, OrderStatus::Rejected, Role::Admin),
            (OrderStatus::Approved, OrderStatus::Taken, Role::Chef),
            (OrderStatus::Taken, OrderStatus::Cooking, Role::Chef),
            (OrderStatus::Cooking, OrderStatus::Ready, Role::Chef),
            (OrderStatus::Ready, OrderStatus::Completed, Role::Admin),
        ];
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                for actor in [Role::Admin, Role::Chef] {
                    let ok = allowed.contains(&(from, to, actor));
                    assert_eq!(
                        from.transition(to, actor).is_ok(),
                        ok,
                        "{from} -> {to} by {actor}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_illegal_moves() {
        assert!(OrderStatus::Pending.transition(OrderStatus::Cooking, Role::Chef).is_err());
        assert!(OrderStatus::Pending.transition(OrderStatus::Approved, Role::Chef).is_err());
        assert!(OrderStatus::Completed.transition(OrderStatus::Pending, Role::Admin).is_err());
    }

    #[test]
    fn test_actions() {
        assert_eq!(OrderAction::Approve.apply(OrderStatus::Pending), Ok(OrderStatus::Approved));
        assert_eq!(OrderAction::Advance.apply(OrderStatus::Taken), Ok(OrderStatus::Cooking));
        assert_eq!(OrderAction::Complete.apply(OrderStatus::Ready), Ok(OrderStatus::Completed));

        let err = OrderAction::Advance.apply(OrderStatus::Ready).unwrap_err();
        assert_eq!(err.to, None);
        assert_eq!(err.actor, Role::Chef);

        let err = OrderAction::Reject.apply(OrderStatus::Approved).unwrap_err();
        assert_eq!(err.to, Some(OrderStatus::Rejected));
        assert_eq!(
            err.to_string(),
            "admin cannot move order from approved to rejected"
        );
    }

    #[test]
    fn test_terminal_statuses() {
        for s in OrderStatus::ALL {
            if s.is_terminal() {
                assert!(OrderStatus::ALL.iter().all(|t| s.transition_owner(*t).is_none()));
            }
        }
    }
}
