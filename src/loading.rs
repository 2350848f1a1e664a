use std::cell::{Cell, RefCell};

pub const DEFAULT_LOADING_TEXT: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingSnapshot {
    pub active: bool,
    pub text: String,
}

type Listener = Box<dyn Fn(&LoadingSnapshot)>;

/// Full-screen overlay flag shared by everything on the UI thread.
///
/// There is no timeout: whoever turns the overlay on must turn it off.
pub struct LoadingController {
    active: Cell<bool>,
    text: RefCell<String>,
    listeners: RefCell<Vec<Listener>>,
}

impl Default for LoadingController {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingController {
    pub fn new() -> Self {
        Self {
            active: Cell::new(false),
            text: RefCell::new(DEFAULT_LOADING_TEXT.to_string()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.active.get()
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn snapshot(&self) -> LoadingSnapshot {
        LoadingSnapshot {
            active: self.is_loading(),
            text: self.text(),
        }
    }

    pub fn set_loading(&self, active: bool) {
        if self.active.replace(active) != active {
            log::debug!("Loading overlay {}", if active { "shown" } else { "hidden" });
            self.notify();
        }
    }

    pub fn set_loading_text(&self, text: impl Into<String>) {
        let text = text.into();
        if *self.text.borrow() == text {
            return;
        }
        *self.text.borrow_mut() = text;
        self.notify();
    }

    /// Listeners run on every change, in subscription order. They must not
    /// subscribe further listeners from inside the callback.
    pub fn subscribe(&self, listener: impl Fn(&LoadingSnapshot) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn starts_hidden_with_default_text() {
        let loading = LoadingController::new();
        assert!(!loading.is_loading());
        assert_eq!(loading.text(), DEFAULT_LOADING_TEXT);
    }

    #[test]
    fn listeners_see_changes_only() {
        let loading = LoadingController::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        loading.subscribe(move |s| sink.borrow_mut().push(s.clone()));

        loading.set_loading_text("Signing you in...");
        loading.set_loading(true);
        loading.set_loading(true);
        loading.set_loading(false);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(
            seen[1],
            LoadingSnapshot {
                active: true,
                text: "Signing you in...".into()
            }
        );
        assert!(!seen[2].active);
    }
}
