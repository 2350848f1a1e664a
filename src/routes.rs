use crate::data::{Role, SessionUser};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Contact,
    Docs,
    Auth,
    Admin,
    Investor,
    Entrepreneur,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Home,
        Route::About,
        Route::Contact,
        Route::Docs,
        Route::Auth,
        Route::Admin,
        Route::Investor,
        Route::Entrepreneur,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Contact => "/contact",
            Route::Docs => "/docs",
            Route::Auth => "/auth",
            Route::Admin => "/admin",
            Route::Investor => "/investor",
            Route::Entrepreneur => "/entrepreneur",
        }
    }

    /// Accepts trailing slashes, query strings and fragments.
    pub fn from_path(input: &str) -> Option<Route> {
        let path = input
            .trim()
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Admin => Some(Role::Admin),
            Route::Investor => Some(Role::Investor),
            Route::Entrepreneur => Some(Role::Entrepreneur),
            _ => None,
        }
    }

    pub fn dashboard_for(role: Role) -> Route {
        match role {
            Role::Admin => Route::Admin,
            Role::Investor => Route::Investor,
            Role::Entrepreneur => Route::Entrepreneur,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Contact => "Contact",
            Route::Docs => "Docs",
            Route::Auth => "Sign In",
            Route::Admin => "Administrator Dashboard",
            Route::Investor => "Investor Portal",
            Route::Entrepreneur => "Entrepreneur Portal",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(Route),
}

/// Client-side check run when a page mounts. Advisory only.
pub fn guard(route: Route, user: Option<&SessionUser>) -> GuardOutcome {
    match (route.required_role(), user) {
        (Some(_), None) => GuardOutcome::Redirect(Route::Auth),
        (Some(required), Some(user)) if user.role() != required => GuardOutcome::Redirect(Route::Home),
        (None, Some(user)) if matches!(route, Route::Home | Route::Auth) => {
            GuardOutcome::Redirect(Route::dashboard_for(user.role()))
        }
        _ => GuardOutcome::Allow,
    }
}

/// Follows guard redirects until a page accepts the visitor.
pub fn resolve(route: Route, user: Option<&SessionUser>) -> Route {
    let mut current = route;
    for _ in 0..Route::ALL.len() {
        match guard(current, user) {
            GuardOutcome::Allow => return current,
            GuardOutcome::Redirect(next) => {
                log::debug!("Guard redirected {} -> {}", current, next);
                current = next;
            }
        }
    }
    log::warn!("Guard redirect loop starting at {}; falling back to home", route);
    Route::Home
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PlatformData;

    fn user(role: Role) -> SessionUser {
        PlatformData::bundled()
            .unwrap()
            .users
            .with_role(role)
            .next()
            .unwrap()
            .redact()
    }

    #[test]
    fn parses_paths() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("/admin/"), Some(Route::Admin));
        assert_eq!(Route::from_path("/auth?next=/admin"), Some(Route::Auth));
        assert_eq!(Route::from_path("/docs#api"), Some(Route::Docs));
        assert_eq!(Route::from_path("/pricing"), None);
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn anonymous_visitors_are_sent_to_sign_in() {
        for route in [Route::Admin, Route::Investor, Route::Entrepreneur] {
            assert_eq!(guard(route, None), GuardOutcome::Redirect(Route::Auth));
        }
        for route in [Route::Home, Route::About, Route::Contact, Route::Docs, Route::Auth] {
            assert_eq!(guard(route, None), GuardOutcome::Allow);
        }
    }

    #[test]
    fn wrong_role_goes_home_then_to_own_dashboard() {
        let investor = user(Role::Investor);
        assert_eq!(guard(Route::Admin, Some(&investor)), GuardOutcome::Redirect(Route::Home));
        assert_eq!(resolve(Route::Admin, Some(&investor)), Route::Investor);
        assert_eq!(guard(Route::Investor, Some(&investor)), GuardOutcome::Allow);
    }

    #[test]
    fn signed_in_users_skip_home_and_sign_in() {
        for role in Role::ALL {
            let u = user(role);
            assert_eq!(resolve(Route::Home, Some(&u)), Route::dashboard_for(role));
            assert_eq!(resolve(Route::Auth, Some(&u)), Route::dashboard_for(role));
            assert_eq!(resolve(Route::Docs, Some(&u)), Route::Docs);
        }
    }
}
