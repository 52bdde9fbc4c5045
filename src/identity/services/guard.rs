//! Route access decisions.

use crate::identity::domain::{AccessPolicy, Role, Route, Session};
use tracing::debug;

/// Why a navigation was redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Nobody is signed in.
    Unauthenticated,
    /// The signed-in role may not open the route.
    RoleNotPermitted,
    /// A signed-in user opened the sign-in form.
    AlreadyAuthenticated,
    /// The root path forwards to the role's landing route.
    Landing,
}

/// Outcome of evaluating a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the requested view.
    Allow,
    /// Navigate elsewhere instead.
    Redirect {
        /// Destination route.
        to: Route,
        /// Cause of the redirect.
        reason: RedirectReason,
    },
}

impl AccessDecision {
    /// Returns `true` for [`AccessDecision::Allow`].
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Allows rendering only when a session exists and its role is in
/// `allowed_roles`; otherwise redirects to the sign-in form.
#[must_use]
pub fn authorize(session: Option<&Session>, allowed_roles: &[Role]) -> AccessDecision {
    match session {
        None => AccessDecision::Redirect {
            to: Route::Login,
            reason: RedirectReason::Unauthenticated,
        },
        Some(active) if allowed_roles.contains(&active.role()) => AccessDecision::Allow,
        Some(_) => AccessDecision::Redirect {
            to: Route::Login,
            reason: RedirectReason::RoleNotPermitted,
        },
    }
}

/// Evaluates a navigation to `route` for the given session snapshot.
///
/// Called on every navigation; the decision depends only on its inputs.
#[must_use]
pub fn evaluate(session: Option<&Session>, route: Route) -> AccessDecision {
    let decision = match (route, session) {
        (Route::Login, Some(active)) => AccessDecision::Redirect {
            to: Route::landing_for(active.role()),
            reason: RedirectReason::AlreadyAuthenticated,
        },
        (Route::Home, Some(active)) => AccessDecision::Redirect {
            to: Route::landing_for(active.role()),
            reason: RedirectReason::Landing,
        },
        _ => match route.policy() {
            AccessPolicy::Public => AccessDecision::Allow,
            AccessPolicy::AnyAuthenticated => authorize(session, &Role::ALL),
            AccessPolicy::Roles(roles) => authorize(session, roles),
        },
    };

    if let AccessDecision::Redirect { to, reason } = decision {
        debug!(from = %route, %to, ?reason, "navigation redirected");
    }
    decision
}
