use gtk4 as gtk;
use gtk4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// One counterpart in the conversation list.
#[derive(Debug, Clone)]
pub struct PartnerItem {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    pub unread: usize,
}

pub struct Sidebar {
    root: gtk::Box,
    list: gtk::ListBox,
    ids: Rc<RefCell<Vec<String>>>,
}

impl Sidebar {
    pub fn new() -> Self {
        let root = crate::ui::padded_box(gtk::Orientation::Vertical, 6, 8);
        root.set_width_request(240);

        let title = gtk::Label::new(Some("Conversations"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let list = gtk::ListBox::new();
        list.add_css_class("navigation-sidebar");
        list.set_selection_mode(gtk::SelectionMode::Single);
        root.append(&crate::ui::scrolled(&list));

        Self {
            root,
            list,
            ids: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    /// Called with the partner id when a row is activated by the user.
    pub fn connect_open<F: Fn(&str) + 'static>(&self, f: F) {
        let ids = self.ids.clone();
        self.list.connect_row_activated(move |_, row| {
            let id = usize::try_from(row.index())
                .ok()
                .and_then(|i| ids.borrow().get(i).cloned());
            if let Some(id) = id {
                f(id.as_str());
            }
        });
    }

    pub fn set_items(&self, items: &[PartnerItem], selected: Option<&str>) {
        crate::ui::clear_list(&self.list);
        let mut ids = self.ids.borrow_mut();
        ids.clear();
        for item in items {
            let row = gtk::ListBoxRow::new();
            let inner = gtk::Box::new(gtk::Orientation::Horizontal, 8);
            inner.set_margin_top(6);
            inner.set_margin_bottom(6);
            inner.set_margin_start(6);
            inner.set_margin_end(6);

            let text = gtk::Box::new(gtk::Orientation::Vertical, 2);
            text.set_hexpand(true);
            text.append(&crate::ui::label(&item.name));
            text.append(&crate::ui::muted(&item.subtitle));
            inner.append(&text);

            if item.unread > 0 {
                let badge = gtk::Label::new(Some(&item.unread.to_string()));
                badge.add_css_class("accent");
                badge.set_valign(gtk::Align::Center);
                inner.append(&badge);
            }

            row.set_child(Some(&inner));
            self.list.append(&row);
            if selected == Some(item.id.as_str()) {
                self.list.select_row(Some(&row));
            }
            ids.push(item.id.clone());
        }
    }
}
