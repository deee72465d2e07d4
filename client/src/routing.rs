//! Route access control.
//!
//! Every navigation is resolved by a pure decision function over the
//! session phase and the route's access requirement. Nothing here
//! performs the navigation; the outcome says what the shell should do.

use crate::state::SessionPhase;
use crate::types::User;

/// Where unauthenticated visitors are sent to sign in.
pub const LOGIN_PATH: &str = "/auth/login";

/// The landing page for hosts.
pub const HOST_HOME: &str = "/admin/dashboard";

/// The landing page for attendees.
pub const ATTENDEE_HOME: &str = "/home";

/// The post-authentication destination for a user with no captured
/// return path.
#[must_use]
pub fn role_home(user: &User) -> &'static str {
    if user.is_host { HOST_HOME } else { ATTENDEE_HOME }
}

/// Access requirement attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRequirement {
    /// Reachable by anyone.
    Public,
    /// Reachable only while signed out (the auth pages). Signed-in
    /// users are bounced to their role's home.
    PublicOnly,
    /// Requires any authenticated session.
    RequiresAuth,
    /// Requires an authenticated session with the host role.
    RequiresHost,
}

/// The outcome of resolving a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session restoration has not finished; render nothing yet.
    /// Premature redirects while the stored session is still being
    /// read would bounce a returning user off pages they may access.
    Loading,
    /// Render the requested route.
    Render,
    /// Send to the login page, remembering where the user was headed.
    RedirectToLogin { from: String },
    /// Send elsewhere (role home for signed-in users on auth pages).
    Redirect { to: String },
    /// Authenticated but lacking the role; show the denial view
    /// rather than silently redirecting.
    AccessDenied,
}

/// Resolve a navigation attempt. Pure: same inputs, same decision.
#[must_use]
pub fn decide_route(
    requirement: RouteRequirement,
    phase: &SessionPhase,
    path: &str,
) -> RouteDecision {
    match phase {
        // Fully public routes depend on nothing the stored session can
        // change, so they render immediately instead of blanking the
        // page while restoration runs. Everything else, including
        // `PublicOnly`, waits: the restored role decides its outcome.
        SessionPhase::Loading => match requirement {
            RouteRequirement::Public => RouteDecision::Render,
            _ => RouteDecision::Loading,
        },
        SessionPhase::Anonymous => match requirement {
            RouteRequirement::Public | RouteRequirement::PublicOnly => RouteDecision::Render,
            RouteRequirement::RequiresAuth | RouteRequirement::RequiresHost => {
                RouteDecision::RedirectToLogin {
                    from: path.to_string(),
                }
            }
        },
        SessionPhase::Authenticated(session) => match requirement {
            RouteRequirement::Public | RouteRequirement::RequiresAuth => RouteDecision::Render,
            RouteRequirement::PublicOnly => RouteDecision::Redirect {
                to: role_home(&session.user).to_string(),
            },
            RouteRequirement::RequiresHost => {
                if session.user.is_host {
                    RouteDecision::Render
                } else {
                    RouteDecision::AccessDenied
                }
            }
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::types::{Session, User, UserId};

    fn user(is_host: bool) -> User {
        User {
            id: UserId::new("u1"),
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            is_host,
        }
    }

    fn authed(is_host: bool) -> SessionPhase {
        SessionPhase::Authenticated(Session {
            token: "t".to_string(),
            user: user(is_host),
        })
    }

    #[test]
    fn loading_defers_all_protected_routes() {
        for req in [
            RouteRequirement::PublicOnly,
            RouteRequirement::RequiresAuth,
            RouteRequirement::RequiresHost,
        ] {
            assert_eq!(
                decide_route(req, &SessionPhase::Loading, "/events/1"),
                RouteDecision::Loading
            );
        }
        assert_eq!(
            decide_route(RouteRequirement::Public, &SessionPhase::Loading, "/home"),
            RouteDecision::Render
        );
    }

    #[test]
    fn anonymous_on_protected_route_captures_origin() {
        let decision = decide_route(
            RouteRequirement::RequiresAuth,
            &SessionPhase::Anonymous,
            "/my-bookings",
        );
        assert_eq!(
            decision,
            RouteDecision::RedirectToLogin {
                from: "/my-bookings".to_string()
            }
        );
    }

    #[test]
    fn signed_in_user_bounced_off_auth_pages_to_role_home() {
        assert_eq!(
            decide_route(RouteRequirement::PublicOnly, &authed(true), LOGIN_PATH),
            RouteDecision::Redirect {
                to: HOST_HOME.to_string()
            }
        );
        assert_eq!(
            decide_route(RouteRequirement::PublicOnly, &authed(false), LOGIN_PATH),
            RouteDecision::Redirect {
                to: ATTENDEE_HOME.to_string()
            }
        );
    }

    #[test]
    fn attendee_denied_on_host_route() {
        assert_eq!(
            decide_route(
                RouteRequirement::RequiresHost,
                &authed(false),
                "/admin/dashboard"
            ),
            RouteDecision::AccessDenied
        );
        assert_eq!(
            decide_route(
                RouteRequirement::RequiresHost,
                &authed(true),
                "/admin/dashboard"
            ),
            RouteDecision::Render
        );
    }
}
