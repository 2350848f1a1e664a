pub mod driver;
pub mod machine;

pub use driver::Delays;
pub use machine::{transition, Effect, SessionEvent, SessionState, Transition};

use crate::data::{PlatformData, SessionUser, UserPatch};
use crate::error::StorageError;
use crate::loading::LoadingController;
use crate::storage::KeyValueStore;
use std::rc::Rc;

pub const SESSION_KEY: &str = "user";

/// Holds the signed-in user and mirrors it into local storage.
pub struct SessionStore<S: KeyValueStore> {
    state: SessionState,
    user: Option<SessionUser>,
    storage: S,
    data: Rc<PlatformData>,
    loading: Rc<LoadingController>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S, data: Rc<PlatformData>, loading: Rc<LoadingController>) -> Self {
        let mut store = Self {
            state: SessionState::Anonymous,
            user: None,
            storage,
            data,
            loading,
        };
        store.user = store.read_persisted();
        store.state = SessionState::restored(store.user.as_ref());
        if let Some(user) = &store.user {
            log::info!("Restored session for {} ({})", user.email, user.role());
        }
        store
    }

    fn read_persisted(&mut self) -> Option<SessionUser> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Could not read persisted session: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Discarding unreadable persisted session: {}", e);
                if let Err(e) = self.storage.remove(SESSION_KEY) {
                    log::warn!("Could not remove persisted session: {}", e);
                }
                None
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn data(&self) -> &Rc<PlatformData> {
        &self.data
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Runs one transition and applies its storage and overlay effects.
    pub fn dispatch(&mut self, event: SessionEvent) -> Vec<Effect> {
        let Transition { next, effects } = transition(self.state, event);
        if next != self.state {
            log::debug!("Session {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        for effect in &effects {
            self.apply(effect);
        }
        effects
    }

    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::ShowLoading(text) => {
                self.loading.set_loading_text(*text);
                self.loading.set_loading(true);
            }
            Effect::HideLoading => self.loading.set_loading(false),
            Effect::Persist(user) => {
                self.user = Some(user.clone());
                if let Err(e) = self.persist() {
                    log::warn!("Session for {} kept in memory only: {}", user.email, e);
                }
            }
            Effect::ClearPersisted => {
                self.user = None;
                if let Err(e) = self.storage.remove(SESSION_KEY) {
                    log::warn!("Could not clear persisted session: {}", e);
                }
            }
            Effect::Navigate(_) | Effect::LoginFailed => {}
        }
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        match &self.user {
            Some(user) => {
                let json = serde_json::to_string(user)?;
                self.storage.set(SESSION_KEY, &json)
            }
            None => Ok(()),
        }
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Option<SessionUser> {
        self.data
            .users
            .find_by_credentials(email, password)
            .map(|record| record.redact())
    }

    pub fn begin_login(&mut self) -> Vec<Effect> {
        self.dispatch(SessionEvent::LoginRequested)
    }

    pub fn finish_login(&mut self, outcome: Option<SessionUser>) -> Vec<Effect> {
        match outcome {
            Some(user) => {
                log::info!("Signed in {} as {}", user.email, user.role());
                self.dispatch(SessionEvent::CredentialsAccepted(user))
            }
            None => {
                log::info!("Sign-in rejected");
                self.dispatch(SessionEvent::CredentialsRejected)
            }
        }
    }

    pub fn login_now(&mut self, email: &str, password: &str) -> (bool, Vec<Effect>) {
        let mut effects = self.begin_login();
        if !matches!(self.state, SessionState::Authenticating { .. }) {
            return (false, effects);
        }
        let outcome = self.authenticate(email, password);
        let success = outcome.is_some();
        effects.extend(self.finish_login(outcome));
        (success, effects)
    }

    pub fn begin_logout(&mut self) -> Vec<Effect> {
        self.dispatch(SessionEvent::LogoutRequested)
    }

    pub fn finish_logout(&mut self) -> Vec<Effect> {
        let effects = self.dispatch(SessionEvent::LogoutCompleted);
        if !effects.is_empty() {
            log::info!("Signed out");
        }
        effects
    }

    pub fn logout_now(&mut self) -> Vec<Effect> {
        let mut effects = self.begin_logout();
        effects.extend(self.finish_logout());
        effects
    }

    // False when nobody is signed in or nothing changed.
    pub fn update_user(&mut self, patch: UserPatch) -> bool {
        let Some(user) = self.user.as_mut() else {
            return false;
        };
        if !user.apply(patch) {
            return false;
        }
        if let Err(e) = self.persist() {
            log::warn!("Updated session kept in memory only: {}", e);
        }
        true
    }
}
