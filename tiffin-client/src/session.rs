//! Signed-in identity and its role

use shared::client::UserInfo;
use shared::models::RoleLookup;
use shared::route::{Access, Route, Screen, Visitor, gate, resolve};

use crate::api::TiffinApi;
use crate::error::ClientResult;

/// Who is using the client right now
///
/// A plain value owned by the caller. Nothing here is global; two sessions
/// against the same server are independent.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: Option<UserInfo>,
    role: RoleLookup,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            user: None,
            role: RoleLookup::NotFound,
        }
    }

    /// Sign in, then look up the role of the new identity
    ///
    /// A failed credential check leaves the session signed out. A failed role
    /// lookup keeps the identity and records [`RoleLookup::LookupError`], so
    /// gated pages keep showing the login form.
    pub async fn sign_in<A: TiffinApi + ?Sized>(
        &mut self,
        api: &A,
        email: &str,
        password: &str,
    ) -> ClientResult<&UserInfo> {
        let response = api.login(email, password).await?;
        tracing::info!(uid = %response.user.uid, "Signed in");

        self.role = RoleLookup::NotFound;
        let user = self.user.insert(response.user);
        let role = lookup_role(api).await;
        self.role = role;
        Ok(user)
    }

    /// Repeat the role lookup for the current identity
    pub async fn refresh_role<A: TiffinApi + ?Sized>(&mut self, api: &A) -> &RoleLookup {
        if self.user.is_some() {
            self.role = lookup_role(api).await;
        }
        &self.role
    }

    /// Clear identity and role
    ///
    /// The local session is cleared even when the server call fails.
    pub async fn sign_out<A: TiffinApi + ?Sized>(&mut self, api: &A) {
        if let Err(e) = api.logout().await {
            tracing::warn!(error = %e, "Logout request failed");
        }
        self.user = None;
        self.role = RoleLookup::NotFound;
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn role_lookup(&self) -> &RoleLookup {
        &self.role
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Apply the role gate for `route`; public routes are always granted
    pub fn access(&self, route: Route) -> Access {
        match route.allowed_roles() {
            Some(allowed) => gate(self.is_signed_in(), &self.role, allowed),
            None => Access::Granted,
        }
    }

    /// What to render for `path`
    pub fn resolve(&self, path: &str) -> Screen {
        resolve(path, self)
    }
}

impl Visitor for Session {
    fn has_identity(&self) -> bool {
        self.is_signed_in()
    }

    fn role_lookup(&self) -> &RoleLookup {
        &self.role
    }
}

async fn lookup_role<A: TiffinApi + ?Sized>(api: &A) -> RoleLookup {
    match api.role().await {
        Ok(lookup) => lookup,
        Err(e) => {
            tracing::error!(error = %e, "Role lookup failed");
            RoleLookup::LookupError {
                message: e.to_string(),
            }
        }
    }
}
