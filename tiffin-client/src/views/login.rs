//! Staff login form, rendered in place of a gated page

use shared::route::LoginReason;

use crate::api::TiffinApi;
use crate::notice::Notice;
use crate::session::Session;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Why the form is showing, if a gated page sent us here
    pub reason: Option<LoginReason>,
}

impl LoginForm {
    pub fn new(reason: Option<LoginReason>) -> Self {
        Self {
            reason,
            ..Self::default()
        }
    }

    /// Hint shown above the form
    pub fn hint(&self) -> Option<&'static str> {
        self.reason.map(|reason| match reason {
            LoginReason::NoIdentity => "Please sign in to continue.",
            LoginReason::NoRole => "This account has no staff role.",
            LoginReason::RoleNotAllowed => "This account cannot open this page.",
            LoginReason::LookupFailed => "Could not check your role. Please try again.",
        })
    }

    /// Sign in through `session`
    ///
    /// There is no redirect afterwards: the caller resolves the current path
    /// again and the page renders if the gate now grants access.
    pub async fn submit<A: TiffinApi + ?Sized>(&mut self, session: &mut Session, api: &A) -> Notice {
        let email = self.email.trim().to_string();
        match session.sign_in(api, &email, &self.password).await {
            Ok(_) => {
                self.password.clear();
                Notice::success("Login Successful", "Welcome to the admin panel!")
            }
            Err(e) => {
                tracing::error!(error = %e, "Login failed");
                self.password.clear();
                Notice {
                    title: "Login Failed".to_string(),
                    ..Notice::error("Invalid credentials. Please try again.")
                }
            }
        }
    }
}
