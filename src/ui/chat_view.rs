use crate::ui::main_window::Shell;
use crate::ui::sidebar::{PartnerItem, Sidebar};
use crate::ui::{muted, padded_box, scrolled};
use business_nexus::data::Role;
use business_nexus::App;
use gtk4 as gtk;
use gtk4::prelude::*;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Conversation list plus the open thread and a composer.
pub struct ChatView {
    shell: Rc<Shell>,
    root: gtk::Paned,
    sidebar: Sidebar,
    thread: gtk::Box,
    scroller: gtk::ScrolledWindow,
    entry: gtk::Entry,
    partner: RefCell<Option<String>>,
    on_change: RefCell<Option<Box<dyn Fn()>>>,
}

impl ChatView {
    pub fn new(shell: &Rc<Shell>) -> Rc<Self> {
        let sidebar = Sidebar::new();

        let right = padded_box(gtk::Orientation::Vertical, 6, 8);
        let thread = gtk::Box::new(gtk::Orientation::Vertical, 6);
        let scroller = scrolled(&thread);
        right.append(&scroller);

        let input_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let entry = gtk::Entry::new();
        entry.set_hexpand(true);
        entry.set_placeholder_text(Some("Type a message..."));
        let send_btn = gtk::Button::with_label("Send");
        send_btn.add_css_class("suggested-action");
        input_row.append(&entry);
        input_row.append(&send_btn);
        right.append(&input_row);

        let root = gtk::Paned::new(gtk::Orientation::Horizontal);
        root.set_start_child(Some(&sidebar.widget()));
        root.set_end_child(Some(&right));
        root.set_vexpand(true);

        let view = Rc::new(Self {
            shell: shell.clone(),
            root,
            sidebar,
            thread,
            scroller,
            entry: entry.clone(),
            partner: RefCell::new(None),
            on_change: RefCell::new(None),
        });

        let weak = Rc::downgrade(&view);
        view.sidebar.connect_open(move |id| {
            if let Some(view) = weak.upgrade() {
                view.open(id);
            }
        });

        let send = {
            let weak: Weak<Self> = Rc::downgrade(&view);
            Rc::new(move || {
                if let Some(view) = weak.upgrade() {
                    view.send();
                }
            })
        };
        {
            let send = send.clone();
            send_btn.connect_clicked(move |_| send());
        }
        entry.connect_activate(move |_| send());

        view.refresh();
        view
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    /// Runs after anything that changes read state or the log.
    pub fn connect_changed<F: Fn() + 'static>(&self, f: F) {
        *self.on_change.borrow_mut() = Some(Box::new(f));
    }

    pub fn open(&self, partner: &str) {
        {
            let mut app = self.shell.app.borrow_mut();
            let Some(reader) = app.current_user().map(|u| u.id.clone()) else {
                return;
            };
            let flipped = app.messages.mark_conversation_read(&reader, partner);
            log::debug!("Opened conversation with {}, {} marked read", partner, flipped);
        }
        *self.partner.borrow_mut() = Some(partner.to_string());
        self.refresh();
        self.notify();
    }

    fn send(&self) {
        let text = self.entry.text().trim().to_string();
        if text.is_empty() {
            return;
        }
        let Some(partner) = self.partner.borrow().clone() else {
            self.shell.toast("Pick a conversation first.");
            return;
        };
        let sent = self.shell.app.borrow_mut().send_message(&partner, &text);
        if sent.is_none() {
            self.shell.toast("Sign in to send messages.");
            return;
        }
        self.entry.set_text("");
        self.refresh();
        self.notify();
    }

    fn notify(&self) {
        if let Some(f) = self.on_change.borrow().as_ref() {
            f();
        }
    }

    pub fn refresh(&self) {
        let partner = self.partner.borrow().clone();
        let (items, lines) = {
            let app = self.shell.app.borrow();
            (partner_items(&app), thread_lines(&app, partner.as_deref()))
        };
        self.sidebar.set_items(&items, partner.as_deref());

        while let Some(child) = self.thread.first_child() {
            self.thread.remove(&child);
        }
        if partner.is_none() {
            self.thread.append(&muted("Select a conversation to start messaging."));
            return;
        }
        if lines.is_empty() {
            self.thread.append(&muted("No messages yet. Say hello!"));
        }
        for line in lines {
            let bubble = gtk::Box::new(gtk::Orientation::Vertical, 2);
            bubble.set_halign(if line.mine { gtk::Align::End } else { gtk::Align::Start });
            let body = gtk::Label::new(Some(&line.body));
            body.set_wrap(true);
            body.set_max_width_chars(60);
            body.set_xalign(0.0);
            if line.mine {
                body.add_css_class("accent");
            }
            bubble.append(&body);
            let stamp = muted(&line.stamp);
            stamp.add_css_class("caption");
            bubble.append(&stamp);
            self.thread.append(&bubble);
        }
        let adj = self.scroller.vadjustment();
        adj.set_value(adj.upper());
    }
}

struct ThreadLine {
    body: String,
    stamp: String,
    mine: bool,
}

fn thread_lines(app: &App, partner: Option<&str>) -> Vec<ThreadLine> {
    let (Some(user), Some(partner)) = (app.current_user(), partner) else {
        return Vec::new();
    };
    app.messages
        .get_conversation(&user.id, partner)
        .into_iter()
        .map(|m| ThreadLine {
            body: m.body.clone(),
            stamp: m.timestamp.format("%b %d, %H:%M").to_string(),
            mine: m.sender_id == user.id,
        })
        .collect()
}

/// Existing conversations first, then every counterpart not yet contacted.
fn partner_items(app: &App) -> Vec<PartnerItem> {
    let Some(user) = app.current_user() else {
        return Vec::new();
    };
    let mut ids = app.messages.conversation_partners(&user.id);
    let counterparts = app.data.users.iter().filter(|u| match user.role() {
        Role::Investor => u.role() == Role::Entrepreneur,
        Role::Entrepreneur => u.role() == Role::Investor,
        Role::Admin => u.role() != Role::Admin,
    });
    for record in counterparts {
        if !ids.iter().any(|id| id == record.id()) {
            ids.push(record.id().to_string());
        }
    }

    ids.into_iter()
        .map(|id| {
            let record = app.data.users.find_by_id(&id);
            let unread = app
                .messages
                .messages()
                .iter()
                .filter(|m| m.sender_id == id && m.is_unread_for(&user.id))
                .count();
            PartnerItem {
                name: record.map(|r| r.user.name.clone()).unwrap_or_else(|| id.clone()),
                subtitle: record.map(|r| r.user.company.clone()).unwrap_or_default(),
                unread,
                id,
            }
        })
        .collect()
}
