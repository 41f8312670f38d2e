//! Client route table and role gate
//!
//! The gate is a pure function over what the caller knows about the
//! current visitor. A gated route that fails the gate renders the login
//! form in place; there is no redirect.

use serde::{Deserialize, Serialize};

use crate::models::{Role, RoleLookup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    Menu,
    Gallery,
    Reservations,
    PreOrder,
    Orders,
    Contact,
    Feedback,
    Admin,
    Chef,
}

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Home,
        Route::Menu,
        Route::Gallery,
        Route::Reservations,
        Route::PreOrder,
        Route::Orders,
        Route::Contact,
        Route::Feedback,
        Route::Admin,
        Route::Chef,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Menu => "/menu",
            Self::Gallery => "/gallery",
            Self::Reservations => "/reservations",
            Self::PreOrder => "/pre-order",
            Self::Orders => "/orders",
            Self::Contact => "/contact",
            Self::Feedback => "/feedback",
            Self::Admin => "/admin",
            Self::Chef => "/chef",
        }
    }

    /// Match a path, ignoring query string, fragment and trailing slash
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|r| r.path() == normalized)
    }

    /// Roles that may open this route; `None` for public pages
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Self::Admin => Some(&[Role::Admin]),
            Self::Chef => Some(&[Role::Chef]),
            _ => None,
        }
    }
}

/// Why the login form is shown instead of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginReason {
    NoIdentity,
    NoRole,
    RoleNotAllowed,
    LookupFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Login(LoginReason),
}

/// Decide whether the visitor may see a page restricted to `allowed`
pub fn gate(identity_present: bool, lookup: &RoleLookup, allowed: &[Role]) -> Access {
    if !identity_present {
        return Access::Login(LoginReason::NoIdentity);
    }
    match lookup {
        RoleLookup::Found { role } if allowed.contains(role) => Access::Granted,
        RoleLookup::Found { .. } => Access::Login(LoginReason::RoleNotAllowed),
        RoleLookup::NotFound => Access::Login(LoginReason::NoRole),
        RoleLookup::LookupError { .. } => Access::Login(LoginReason::LookupFailed),
    }
}

/// What the gate needs to know about the current visitor
pub trait Visitor {
    fn has_identity(&self) -> bool;
    fn role_lookup(&self) -> &RoleLookup;
}

/// What to render for a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Page(Route),
    Login { route: Route, reason: LoginReason },
    NotFound,
}

pub fn resolve(path: &str, visitor: &impl Visitor) -> Screen {
    let Some(route) = Route::from_path(path) else {
        return Screen::NotFound;
    };
    let Some(allowed) = route.allowed_roles() else {
        return Screen::Page(route);
    };
    match gate(visitor.has_identity(), visitor.role_lookup(), allowed) {
        Access::Granted => Screen::Page(route),
        Access::Login(reason) => Screen::Login { route, reason },
    }
}
