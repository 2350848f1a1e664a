pub mod chat_view;
pub mod dashboards;
pub mod login;
pub mod main_window;
pub mod pages;
pub mod sidebar;

use gtk4 as gtk;
use gtk4::prelude::*;

pub fn label(text: &str) -> gtk::Label {
    let lbl = gtk::Label::new(Some(text));
    lbl.set_halign(gtk::Align::Start);
    lbl.set_xalign(0.0);
    lbl.set_wrap(true);
    lbl
}

pub fn heading(text: &str) -> gtk::Label {
    let lbl = label(text);
    lbl.add_css_class("title-2");
    lbl
}

pub fn muted(text: &str) -> gtk::Label {
    let lbl = label(text);
    lbl.add_css_class("dim-label");
    lbl
}

pub fn padded_box(orientation: gtk::Orientation, spacing: i32, margin: i32) -> gtk::Box {
    let root = gtk::Box::new(orientation, spacing);
    root.set_margin_top(margin);
    root.set_margin_bottom(margin);
    root.set_margin_start(margin);
    root.set_margin_end(margin);
    root
}

/// Headline figure with a caption, as used across the dashboards.
pub fn stat_card(title: &str, value: &str, caption: &str) -> gtk::Widget {
    let frame = gtk::Frame::new(Some(title));
    let inner = padded_box(gtk::Orientation::Vertical, 4, 12);
    let value = label(value);
    value.add_css_class("title-1");
    inner.append(&value);
    inner.append(&muted(caption));
    frame.set_child(Some(&inner));
    frame.set_hexpand(true);
    frame.upcast()
}

pub fn scrolled(child: &impl IsA<gtk::Widget>) -> gtk::ScrolledWindow {
    let scroller = gtk::ScrolledWindow::builder()
        .vexpand(true)
        .hexpand(true)
        .build();
    scroller.set_child(Some(child));
    scroller
}

pub fn clear_list(list: &gtk::ListBox) {
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }
}
