//! Login/logout lifecycle as a pure transition function.
//!
//! ```text
//! Anonymous ──LoginRequested──▶ Authenticating ──Accepted──▶ Authenticated(role)
//!     ▲                              │ Rejected                    │
//!     │                              ▼                             │ LogoutRequested
//!     └──LogoutCompleted── LoggingOut ◀────────────────────────────┘
//! ```
//!
//! Navigation is an [`Effect`] produced when a terminal state is entered.

use crate::data::{Role, SessionUser};
use crate::routes::Route;

pub const SIGNING_IN_TEXT: &str = "Signing you in...";
pub const LOGGING_OUT_TEXT: &str = "Logging you out...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    /// `resume` is where a rejected attempt falls back to.
    Authenticating { resume: Option<Role> },
    Authenticated(Role),
    LoggingOut,
}

impl SessionState {
    pub fn restored(user: Option<&SessionUser>) -> Self {
        match user {
            Some(user) => SessionState::Authenticated(user.role()),
            None => SessionState::Anonymous,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Authenticating { .. } | SessionState::LoggingOut)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoginRequested,
    CredentialsAccepted(SessionUser),
    CredentialsRejected,
    LogoutRequested,
    LogoutCompleted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ShowLoading(&'static str),
    HideLoading,
    Persist(SessionUser),
    ClearPersisted,
    Navigate(Route),
    LoginFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn ignore(state: SessionState) -> Self {
        Self {
            next: state,
            effects: Vec::new(),
        }
    }
}

pub fn transition(state: SessionState, event: SessionEvent) -> Transition {
    use SessionEvent::*;
    use SessionState::*;

    match (state, event) {
        (Anonymous, LoginRequested) => Transition {
            next: Authenticating { resume: None },
            effects: vec![Effect::ShowLoading(SIGNING_IN_TEXT)],
        },
        (Authenticated(role), LoginRequested) => Transition {
            next: Authenticating { resume: Some(role) },
            effects: vec![Effect::ShowLoading(SIGNING_IN_TEXT)],
        },
        (Authenticating { .. }, CredentialsAccepted(user)) => {
            let role = user.role();
            Transition {
                next: Authenticated(role),
                effects: vec![
                    Effect::Persist(user),
                    Effect::Navigate(Route::dashboard_for(role)),
                    Effect::HideLoading,
                ],
            }
        }
        (Authenticating { resume }, CredentialsRejected) => Transition {
            next: resume.map(Authenticated).unwrap_or(Anonymous),
            effects: vec![Effect::HideLoading, Effect::LoginFailed],
        },
        // Logging out without a session still clears storage and goes home.
        (Authenticated(_) | Anonymous, LogoutRequested) => Transition {
            next: LoggingOut,
            effects: vec![Effect::ShowLoading(LOGGING_OUT_TEXT)],
        },
        (LoggingOut, LogoutCompleted) => Transition {
            next: Anonymous,
            effects: vec![
                Effect::ClearPersisted,
                Effect::Navigate(Route::Home),
                Effect::HideLoading,
            ],
        },
        (state, event) => {
            log::debug!("Ignoring {:?} in state {:?}", event, state);
            Transition::ignore(state)
        }
    }
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
    fn accepted_login_navigates_to_role_dashboard() {
        for role in Role::ALL {
            let t = transition(SessionState::Anonymous, SessionEvent::LoginRequested);
            assert_eq!(t.next, SessionState::Authenticating { resume: None });
            assert_eq!(t.effects, vec![Effect::ShowLoading(SIGNING_IN_TEXT)]);

            let u = user(role);
            let t = transition(t.next, SessionEvent::CredentialsAccepted(u.clone()));
            assert_eq!(t.next, SessionState::Authenticated(role));
            assert_eq!(
                t.effects,
                vec![
                    Effect::Persist(u),
                    Effect::Navigate(Route::dashboard_for(role)),
                    Effect::HideLoading
                ]
            );
        }
    }

    #[test]
    fn rejected_login_resumes_previous_state_without_navigation() {
        let t = transition(
            SessionState::Authenticating { resume: None },
            SessionEvent::CredentialsRejected,
        );
        assert_eq!(t.next, SessionState::Anonymous);
        assert!(!t.effects.iter().any(|e| matches!(e, Effect::Navigate(_))));
        assert!(t.effects.contains(&Effect::LoginFailed));

        let t = transition(
            SessionState::Authenticating {
                resume: Some(Role::Investor),
            },
            SessionEvent::CredentialsRejected,
        );
        assert_eq!(t.next, SessionState::Authenticated(Role::Investor));
    }

    #[test]
    fn logout_clears_and_goes_home() {
        let t = transition(
            SessionState::Authenticated(Role::Admin),
            SessionEvent::LogoutRequested,
        );
        assert_eq!(t.next, SessionState::LoggingOut);
        let t = transition(t.next, SessionEvent::LogoutCompleted);
        assert_eq!(t.next, SessionState::Anonymous);
        assert_eq!(
            t.effects,
            vec![
                Effect::ClearPersisted,
                Effect::Navigate(Route::Home),
                Effect::HideLoading
            ]
        );
    }

    #[test]
    fn busy_states_ignore_new_requests() {
        let busy = SessionState::Authenticating { resume: None };
        assert!(busy.is_busy());
        assert!(SessionState::LoggingOut.is_busy());
        assert!(!SessionState::Anonymous.is_busy());
        assert!(!SessionState::Authenticated(Role::Admin).is_busy());
        assert_eq!(transition(busy, SessionEvent::LoginRequested), Transition::ignore(busy));
        assert_eq!(transition(busy, SessionEvent::LogoutRequested), Transition::ignore(busy));
        let t = transition(SessionState::LoggingOut, SessionEvent::LoginRequested);
        assert_eq!(t.next, SessionState::LoggingOut);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn stray_outcomes_are_ignored() {
        let t = transition(
            SessionState::Anonymous,
            SessionEvent::CredentialsAccepted(user(Role::Admin)),
        );
        assert_eq!(t.next, SessionState::Anonymous);
        assert!(t.effects.is_empty());
        let t = transition(SessionState::Anonymous, SessionEvent::LogoutCompleted);
        assert!(t.effects.is_empty());
    }
}
