use super::{Effect, SessionState, SessionStore};
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

/// Simulated latency around sign-in and sign-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delays {
    pub login_ms: u64,
    pub redirect_ms: u64,
    pub logout_ms: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            login_ms: 1500,
            redirect_ms: 500,
            logout_ms: 1000,
        }
    }
}

impl Delays {
    pub const NONE: Delays = Delays {
        login_ms: 0,
        redirect_ms: 0,
        logout_ms: 0,
    };

    pub fn login(&self) -> Duration {
        Duration::from_millis(self.login_ms)
    }

    pub fn redirect(&self) -> Duration {
        Duration::from_millis(self.redirect_ms)
    }

    pub fn logout(&self) -> Duration {
        Duration::from_millis(self.logout_ms)
    }
}

/// Signs in with the configured latency. Rejections resolve after the login
/// delay; acceptances additionally wait for the redirect delay before the
/// session is entered and navigation is emitted.
pub async fn login<S: KeyValueStore>(
    store: &mut SessionStore<S>,
    delays: &Delays,
    email: &str,
    password: &str,
) -> (bool, Vec<Effect>) {
    let mut effects = store.begin_login();
    if !matches!(store.state(), SessionState::Authenticating { .. }) {
        return (false, effects);
    }
    sleep(delays.login()).await;

    let outcome = store.authenticate(email, password);
    let success = outcome.is_some();
    if success {
        sleep(delays.redirect()).await;
    }
    effects.extend(store.finish_login(outcome));
    (success, effects)
}

pub async fn logout<S: KeyValueStore>(store: &mut SessionStore<S>, delays: &Delays) -> Vec<Effect> {
    let mut effects = store.begin_logout();
    if store.state() != SessionState::LoggingOut {
        return effects;
    }
    sleep(delays.logout()).await;
    effects.extend(store.finish_logout());
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PlatformData;
    use crate::loading::LoadingController;
    use crate::routes::Route;
    use crate::storage::MemoryStore;
    use std::rc::Rc;
    use tokio::time::Instant;

    fn store() -> SessionStore<MemoryStore> {
        SessionStore::new(
            MemoryStore::new(),
            Rc::new(PlatformData::bundled().unwrap()),
            Rc::new(LoadingController::new()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn accepted_login_waits_for_login_and_redirect_delays() {
        let mut store = store();
        let delays = Delays::default();
        let started = Instant::now();
        let (ok, effects) = login(&mut store, &delays, "admin@imeer.ai", "Admin123").await;
        assert!(ok);
        assert!(started.elapsed() >= delays.login() + delays.redirect());
        assert!(effects.contains(&Effect::Navigate(Route::Admin)));
        let persisted = effects.iter().position(|e| matches!(e, Effect::Persist(_)));
        let navigated = effects.iter().position(|e| matches!(e, Effect::Navigate(_)));
        assert!(persisted.is_some() && persisted < navigated);
        assert!(store.storage().get(crate::session::SESSION_KEY).unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_login_only_waits_for_login_delay() {
        let mut store = store();
        let delays = Delays::default();
        let started = Instant::now();
        let (ok, effects) = login(&mut store, &delays, "admin@imeer.ai", "wrong").await;
        assert!(!ok);
        let elapsed = started.elapsed();
        assert!(elapsed >= delays.login());
        assert!(elapsed < delays.login() + delays.redirect());
        assert!(!effects.iter().any(|e| matches!(e, Effect::Navigate(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn logout_waits_then_navigates_home() {
        let mut store = store();
        let delays = Delays::default();
        assert!(login(&mut store, &Delays::NONE, "investor@imeer.ai", "investor").await.0);

        let started = Instant::now();
        let effects = logout(&mut store, &delays).await;
        assert!(started.elapsed() >= delays.logout());
        assert_eq!(effects.last(), Some(&Effect::HideLoading));
        assert!(effects.contains(&Effect::Navigate(Route::Home)));
        assert!(store.user().is_none());
    }
}
