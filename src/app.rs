use crate::config::AppConfig;
use crate::data::{PlatformData, SessionUser};
use crate::error::Result;
use crate::loading::LoadingController;
use crate::messaging::MessageStore;
use crate::routes::{self, Route};
use crate::session::{self, Delays, Effect, SessionStore};
use crate::storage::{KeyValueStore, MemoryStore, SqliteStore};
use std::rc::Rc;

pub type DynStore = Box<dyn KeyValueStore>;

pub struct App<S: KeyValueStore = DynStore> {
    pub data: Rc<PlatformData>,
    pub session: SessionStore<S>,
    pub messages: MessageStore,
    pub loading: Rc<LoadingController>,
    pub delays: Delays,
    route: Route,
}

impl App<DynStore> {
    /// Loads the fixture and opens local storage as configured. Falls back to
    /// an in-memory store when no data directory exists.
    pub fn bootstrap(config: &AppConfig) -> Result<Self> {
        let data = match &config.fixture_path {
            Some(path) => PlatformData::load(path)?,
            None => PlatformData::bundled()?,
        };
        let storage: DynStore = match &config.storage_path {
            Some(path) => Box::new(SqliteStore::open(path)?),
            None => match SqliteStore::open_default() {
                Ok(store) => Box::new(store),
                Err(e) => {
                    log::warn!("Local storage unavailable, session will not persist: {}", e);
                    Box::new(MemoryStore::new())
                }
            },
        };
        Ok(Self::new(data, storage, config.delays))
    }
}

impl<S: KeyValueStore> App<S> {
    pub fn new(data: PlatformData, storage: S, delays: Delays) -> Self {
        let data = Rc::new(data);
        let loading = Rc::new(LoadingController::new());
        let session = SessionStore::new(storage, data.clone(), loading.clone());
        let messages = MessageStore::new(data.messages.clone());
        let route = routes::resolve(Route::Home, session.user());
        Self {
            data,
            session,
            messages,
            loading,
            delays,
            route,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.session.user()
    }

    pub fn navigate(&mut self, target: Route) -> Route {
        self.route = routes::resolve(target, self.session.user());
        if self.route != target {
            log::info!("Requested {} but landed on {}", target, self.route);
        }
        self.route
    }

    pub fn apply_effects(&mut self, effects: &[Effect]) {
        for effect in effects {
            if let Effect::Navigate(route) = effect {
                self.navigate(*route);
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let delays = self.delays;
        let (ok, effects) = session::driver::login(&mut self.session, &delays, email, password).await;
        self.apply_effects(&effects);
        ok
    }

    pub async fn logout(&mut self) {
        let delays = self.delays;
        let effects = session::driver::logout(&mut self.session, &delays).await;
        self.apply_effects(&effects);
    }

    // Without a session nothing is sent.
    pub fn send_message(&mut self, receiver_id: &str, body: &str) -> Option<String> {
        let Some(sender) = self.session.user() else {
            log::warn!("Dropping message to {}: nobody is signed in", receiver_id);
            return None;
        };
        Some(self.messages.send_message(sender, receiver_id, body).id.clone())
    }

    pub fn unread_count(&self) -> usize {
        self.session
            .user()
            .map(|u| self.messages.get_unread_count(&u.id))
            .unwrap_or(0)
    }
}
