use adw::prelude::*;
use adw::Application;
use business_nexus::routes::Route;
use business_nexus::session::{Effect, SessionState};
use business_nexus::App;
use gtk4 as gtk;
use gtk4::glib;
use std::cell::RefCell;
use std::rc::Rc;

pub const LOGIN_FAILED_NOTICE: &str =
    "Invalid email or password. Please check your credentials and try again.";

/// One window hosting every route in a stack, with the loading overlay on top.
pub struct Shell {
    pub app: RefCell<App>,
    stack: gtk::Stack,
    toasts: adw::ToastOverlay,
    session_button: gtk::Button,
}

pub fn show_main_window(application: &Application, state: App) {
    let window = adw::ApplicationWindow::builder()
        .application(application)
        .title("Business Nexus")
        .default_width(1100)
        .default_height(720)
        .build();

    let stack = gtk::Stack::builder()
        .transition_type(gtk::StackTransitionType::Crossfade)
        .vexpand(true)
        .hexpand(true)
        .build();

    // Full-screen blocking overlay, driven by the loading controller.
    let loading_box = gtk::Box::new(gtk::Orientation::Vertical, 12);
    loading_box.set_halign(gtk::Align::Fill);
    loading_box.set_valign(gtk::Align::Fill);
    loading_box.set_hexpand(true);
    loading_box.set_vexpand(true);
    loading_box.add_css_class("osd");
    let spinner = gtk::Spinner::new();
    spinner.set_size_request(64, 64);
    spinner.set_valign(gtk::Align::End);
    spinner.set_vexpand(true);
    spinner.start();
    let loading_text = gtk::Label::new(Some(&state.loading.text()));
    loading_text.add_css_class("title-3");
    loading_text.set_valign(gtk::Align::Start);
    loading_text.set_vexpand(true);
    loading_box.append(&spinner);
    loading_box.append(&loading_text);
    loading_box.set_visible(state.loading.is_loading());
    {
        let loading_box = loading_box.clone();
        let loading_text = loading_text.clone();
        state.loading.subscribe(move |snapshot| {
            loading_text.set_label(&snapshot.text);
            loading_box.set_visible(snapshot.active);
        });
    }

    let overlay = gtk::Overlay::new();
    overlay.set_child(Some(&stack));
    overlay.add_overlay(&loading_box);

    let toasts = adw::ToastOverlay::new();
    toasts.set_child(Some(&overlay));

    let header = adw::HeaderBar::new();
    let title = gtk::Label::new(Some("Business Nexus"));
    title.add_css_class("heading");
    header.set_title_widget(Some(&title));

    let session_button = gtk::Button::with_label("Sign In");
    session_button.add_css_class("suggested-action");
    header.pack_end(&session_button);

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    container.append(&header);
    container.append(&toasts);
    window.set_content(Some(&container));

    let shell = Rc::new(Shell {
        app: RefCell::new(state),
        stack,
        toasts,
        session_button: session_button.clone(),
    });

    for route in [Route::Home, Route::About, Route::Docs, Route::Contact] {
        let button = gtk::Button::with_label(route.title());
        button.add_css_class("flat");
        let shell = shell.clone();
        button.connect_clicked(move |_| Shell::show(&shell, route));
        header.pack_start(&button);
    }

    {
        let shell = shell.clone();
        session_button.connect_clicked(move |_| {
            let (busy, signed_in) = {
                let app = shell.app.borrow();
                (app.session.state().is_busy(), app.current_user().is_some())
            };
            if busy {
                return;
            }
            if signed_in {
                Shell::logout(&shell);
            } else {
                Shell::show(&shell, Route::Auth);
            }
        });
    }

    let start = shell.app.borrow().route();
    Shell::show(&shell, start);
    window.present();
}

impl Shell {
    pub fn toast(&self, text: &str) {
        self.toasts.add_toast(adw::Toast::new(text));
    }

    /// Guards `target`, rebuilds the page it settles on and shows it.
    pub fn show(this: &Rc<Self>, target: Route) {
        let route = this.app.borrow_mut().navigate(target);
        let name = route.path();
        if let Some(old) = this.stack.child_by_name(name) {
            this.stack.remove(&old);
        }
        let page = crate::ui::pages::build(this, route);
        this.stack.add_named(&page, Some(name));
        this.stack.set_visible_child_name(name);
        this.sync_header();
    }

    fn sync_header(&self) {
        let app = self.app.borrow();
        let signed_in = app.current_user().is_some();
        self.session_button
            .set_label(if signed_in { "Log Out" } else { "Sign In" });
        self.session_button.set_sensitive(!app.session.state().is_busy());
    }

    pub fn apply(this: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Navigate(route) => Shell::show(this, route),
                Effect::LoginFailed => this.toast(LOGIN_FAILED_NOTICE),
                _ => {}
            }
        }
    }

    /// Same steps as the async driver, timed on the GTK main loop.
    pub fn login(this: &Rc<Self>, email: String, password: String) {
        let delays = {
            let mut app = this.app.borrow_mut();
            app.session.begin_login();
            if !matches!(app.session.state(), SessionState::Authenticating { .. }) {
                return;
            }
            app.delays
        };
        let shell = this.clone();
        glib::timeout_add_local_once(delays.login(), move || {
            let outcome = shell.app.borrow().session.authenticate(&email, &password);
            match outcome {
                Some(user) => {
                    glib::timeout_add_local_once(delays.redirect(), move || {
                        let effects = shell.app.borrow_mut().session.finish_login(Some(user));
                        Shell::apply(&shell, effects);
                    });
                }
                None => {
                    let effects = shell.app.borrow_mut().session.finish_login(None);
                    Shell::apply(&shell, effects);
                }
            }
        });
    }

    pub fn logout(this: &Rc<Self>) {
        let delays = {
            let mut app = this.app.borrow_mut();
            app.session.begin_logout();
            if app.session.state() != SessionState::LoggingOut {
                return;
            }
            app.delays
        };
        let shell = this.clone();
        glib::timeout_add_local_once(delays.logout(), move || {
            let effects = shell.app.borrow_mut().session.finish_logout();
            Shell::apply(&shell, effects);
        });
    }
}
