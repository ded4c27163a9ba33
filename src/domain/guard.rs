//! The route guard: per-navigation authorization decisions.
//!
//! "No access" is a valid outcome here, never an error. The guard
//! distinguishes an unresolved auth status, an unauthenticated visitor, and
//! an authenticated principal with the wrong roles, because the caller
//! routes each case differently (spinner, login page, unauthorized page).

use serde::{Deserialize, Serialize};

use super::role::{Principal, RoleSet};

/// Whether a principal holding `user_roles` may enter a route admitting
/// `allowed_roles`.
///
/// Returns `true` iff `user_roles` is non-empty and either `allowed_roles`
/// is empty (any authenticated principal) or the two sets intersect. A
/// principal with no roles is never allowed anywhere.
#[must_use]
pub fn is_route_allowed(user_roles: &RoleSet, allowed_roles: &RoleSet) -> bool {
    !user_roles.is_empty() && (allowed_roles.is_empty() || user_roles.intersects(allowed_roles))
}

/// The resolution status of the current session, as seen by the guard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Auth status not yet resolved. No decision may be rendered.
    #[default]
    Unknown,
    /// The visitor is not signed in.
    Unauthenticated,
    /// The visitor is signed in as the given principal.
    Authenticated(Principal),
}

/// The guard's verdict for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    /// Auth status unresolved: show a neutral loading indicator and
    /// re-evaluate once resolved. Not a terminal decision.
    Pending,
    /// Terminal: send the visitor to the login page.
    RedirectToLogin,
    /// Terminal: the principal is authenticated but holds none of the
    /// admitted roles. Send them to the unauthorized page, not to login.
    RedirectToUnauthorized,
    /// Terminal: render the protected content.
    Allow,
}

impl RouteDecision {
    /// Whether this decision ends the navigation attempt.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Evaluates the guard state machine for one navigation attempt.
///
/// An empty `allowed_roles` set means the route admits any authenticated
/// principal; it is not an error.
#[must_use]
pub fn evaluate_route(state: &AuthState, allowed_roles: &RoleSet) -> RouteDecision {
    match state {
        AuthState::Unknown => RouteDecision::Pending,
        AuthState::Unauthenticated => RouteDecision::RedirectToLogin,
        AuthState::Authenticated(principal) => {
            if is_route_allowed(principal.roles(), allowed_roles) {
                RouteDecision::Allow
            } else {
                RouteDecision::RedirectToUnauthorized
            }
        }
    }
}
