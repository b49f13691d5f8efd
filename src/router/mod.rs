//! Role-gated routing
//!
//! Every navigation re-derives the route state from a fresh decode of the
//! stored credential, so a credential swapped or cleared elsewhere takes
//! effect on the very next navigation.

mod navigator;

use std::sync::Arc;

#[cfg(test)]
pub use navigator::RecordingNavigator;
pub use navigator::{Navigator, TerminalNavigator};

use crate::error::{ApiError, DecodeError, Error, Result};
use crate::session::{Role, Scheduled, Session, SessionManager};

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Admin,
    Volunteer,
}

/// A navigable screen
#[derive(Debug, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub title: &'static str,
    pub access: Access,
}

pub static LOGIN_ROUTE: Route = Route {
    path: "/",
    title: "Login",
    access: Access::Public,
};

pub static ROUTES: [Route; 13] = [
    Route { path: "/", title: "Login", access: Access::Public },
    Route { path: "/admin", title: "Admin dashboard", access: Access::Admin },
    Route { path: "/admin/patient", title: "Patients", access: Access::Admin },
    Route { path: "/admin/volunteers", title: "Volunteers", access: Access::Admin },
    Route { path: "/admin/equipment", title: "Equipment", access: Access::Admin },
    Route { path: "/admin/consumables", title: "Consumables", access: Access::Admin },
    Route { path: "/admin/procedures", title: "Procedures", access: Access::Admin },
    Route { path: "/admin/visits", title: "Visits", access: Access::Admin },
    Route { path: "/admin/assign-volunteer", title: "Assign volunteer", access: Access::Admin },
    Route { path: "/admin/createnewvisit", title: "Create visit", access: Access::Admin },
    Route { path: "/volunteer", title: "Volunteer dashboard", access: Access::Volunteer },
    Route { path: "/volunteer/todays-visits", title: "Today's visits", access: Access::Volunteer },
    Route { path: "/volunteer/completed-visits", title: "Completed visits", access: Access::Volunteer },
];

/// Look up a route by exact path. A trailing slash is ignored.
pub fn find_route(path: &str) -> Option<&'static Route> {
    let normalized = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    ROUTES.iter().find(|route| route.path == normalized)
}

/// Landing route for a role after login
pub fn landing_route(role: Role) -> &'static Route {
    let path = match role {
        Role::Admin => "/admin",
        Role::Volunteer => "/volunteer",
    };
    find_route(path).unwrap_or(&LOGIN_ROUTE)
}

/// Session state as seen by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteState {
    Anonymous,
    Admin,
    Volunteer,
}

impl RouteState {
    fn permits(self, access: Access) -> bool {
        matches!(
            (self, access),
            (_, Access::Public)
                | (RouteState::Admin, Access::Admin)
                | (RouteState::Volunteer, Access::Volunteer)
        )
    }
}

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allowed(&'static Route),
    /// Role mismatch or no session; the navigator was sent to login
    Redirected { requested: &'static Route },
    /// Unknown path; the navigator was sent to login
    NotFound,
}

/// Decides which routes the current session may open.
#[derive(Clone)]
pub struct Router {
    session: Arc<SessionManager>,
}

impl Router {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }

    /// Current state, from a fresh decode of the stored credential.
    pub fn state(&self) -> RouteState {
        match self.session.current() {
            Ok(session) => match session.role {
                Role::Admin => RouteState::Admin,
                Role::Volunteer => RouteState::Volunteer,
            },
            Err(DecodeError::Missing) => RouteState::Anonymous,
            Err(e) => {
                log::debug!("Stored credential not usable: {}", e);
                RouteState::Anonymous
            }
        }
    }

    pub fn navigate(&self, path: &str) -> Navigation {
        let navigator = self.session.navigator();

        let Some(route) = find_route(path) else {
            log::debug!("No route for {}; redirecting to login", path);
            navigator.navigate_to(&LOGIN_ROUTE);
            return Navigation::NotFound;
        };

        if self.state().permits(route.access) {
            navigator.navigate_to(route);
            Navigation::Allowed(route)
        } else {
            log::debug!("Access to {} denied; redirecting to login", route.path);
            navigator.navigate_to(&LOGIN_ROUTE);
            Navigation::Redirected { requested: route }
        }
    }

    /// Navigate, converting anything but `Allowed` into an error.
    ///
    /// A missing session reports as unauthenticated; a wrong role as access denied.
    pub fn require(&self, path: &str) -> Result<&'static Route> {
        match self.navigate(path) {
            Navigation::Allowed(route) => Ok(route),
            Navigation::Redirected { requested } => match self.state() {
                RouteState::Anonymous => Err(ApiError::Unauthenticated.into()),
                _ => Err(Error::AccessDenied {
                    requested: requested.path.to_string(),
                }),
            },
            Navigation::NotFound => Err(Error::Other(format!("Unknown route: {}", path))),
        }
    }

    /// Accept a freshly issued credential.
    ///
    /// A credential whose role is missing or unrecognized is rejected and the
    /// store is left untouched. One that has already expired is stored only
    /// long enough for the auto-logout to clear it again.
    pub fn complete_login(&self, credential: &str) -> Result<Session> {
        let session = Session::decode(credential)?;

        if self.session.begin(credential)? == Scheduled::LoggedOut {
            log::warn!("Server issued a credential that has already expired");
            return Err(DecodeError::Expired.into());
        }
        let landing = landing_route(session.role);
        self.session.navigator().navigate_to(landing);
        log::info!("Logged in as {} ({})", session.display_name, session.role);

        Ok(session)
    }

    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryTokenStore, TokenStore, encode_test_token};
    use serde_json::json;

    fn router() -> (Arc<MemoryTokenStore>, Arc<RecordingNavigator>, Router) {
        let store = Arc::new(MemoryTokenStore::new());
        let nav = Arc::new(RecordingNavigator::new());
        let session = Arc::new(SessionManager::new(store.clone(), nav.clone()));
        (store, nav, Router::new(session))
    }

    fn admin_token() -> String {
        encode_test_token(&json!({ "userType": "ADMIN", "sub": "admin@carehome.org" }))
    }

    #[tokio::test]
    async fn test_admin_login_lands_on_admin() {
        let (_store, nav, router) = router();

        let session = router.complete_login(&admin_token()).unwrap();
        assert_eq!(session.role, Role::Admin);
        assert_eq!(nav.last(), Some("/admin"));
        assert_eq!(router.state(), RouteState::Admin);
    }

    #[tokio::test]
    async fn test_admin_redirected_from_volunteer_routes() {
        let (_store, nav, router) = router();
        router.complete_login(&admin_token()).unwrap();

        let outcome = router.navigate("/volunteer/todays-visits");
        assert!(matches!(
            outcome,
            Navigation::Redirected { requested } if requested.path == "/volunteer/todays-visits"
        ));
        assert_eq!(nav.last(), Some("/"));

        assert!(matches!(
            router.require("/volunteer"),
            Err(Error::AccessDenied { .. })
        ));
    }

    #[tokio::test]
    async fn test_volunteer_login_lands_on_volunteer() {
        let (_store, nav, router) = router();
        let token = encode_test_token(&json!({ "userType": "VOLUNTEER" }));

        router.complete_login(&token).unwrap();
        assert_eq!(nav.last(), Some("/volunteer"));
        assert!(matches!(router.navigate("/admin/patient"), Navigation::Redirected { .. }));
        assert!(matches!(
            router.navigate("/volunteer/completed-visits"),
            Navigation::Allowed(_)
        ));
    }

    #[test]
    fn test_unrecognized_role_leaves_store_untouched() {
        let (store, nav, router) = router();
        store.set("previous.credential.value").unwrap();

        let token = encode_test_token(&json!({ "userType": "DOCTOR" }));
        let err = router.complete_login(&token).unwrap_err();

        assert!(matches!(
            err,
            Error::Session(DecodeError::UnrecognizedRole(ref r)) if r == "DOCTOR"
        ));
        assert_eq!(store.get().as_deref(), Some("previous.credential.value"));
        assert!(nav.paths().is_empty());
    }

    #[tokio::test]
    async fn test_expired_login_is_rejected_without_landing() {
        let (store, nav, router) = router();
        let token = encode_test_token(&json!({ "userType": "ADMIN", "exp": 1 }));

        let err = router.complete_login(&token).unwrap_err();

        assert!(matches!(err, Error::Session(DecodeError::Expired)));
        assert!(store.get().is_none());
        assert_eq!(nav.paths(), vec!["/"]);
        assert_eq!(router.state(), RouteState::Anonymous);
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        let (_store, nav, router) = router();

        assert_eq!(router.state(), RouteState::Anonymous);
        assert!(matches!(router.navigate("/admin"), Navigation::Redirected { .. }));
        assert!(matches!(router.navigate("/"), Navigation::Allowed(_)));
        assert!(matches!(
            router.require("/admin/visits"),
            Err(Error::Api(ApiError::Unauthenticated))
        ));
        assert_eq!(nav.count("/"), 3);
    }

    #[test]
    fn test_unknown_path_goes_to_login() {
        let (_store, nav, router) = router();
        assert_eq!(router.navigate("/reports/export"), Navigation::NotFound);
        assert_eq!(nav.last(), Some("/"));
    }

    #[test]
    fn test_state_follows_store_changes() {
        let (store, _nav, router) = router();
        store.set(&admin_token()).unwrap();
        assert_eq!(router.state(), RouteState::Admin);

        store.clear().unwrap();
        assert_eq!(router.state(), RouteState::Anonymous);

        store.set("garbage").unwrap();
        assert_eq!(router.state(), RouteState::Anonymous);
    }

    #[test]
    fn test_find_route_ignores_trailing_slash() {
        assert_eq!(find_route("/admin/").map(|r| r.path), Some("/admin"));
        assert_eq!(find_route("").map(|r| r.path), Some("/"));
        assert!(find_route("/admin/unknown").is_none());
    }
}
