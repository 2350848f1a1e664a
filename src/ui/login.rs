use crate::ui::main_window::Shell;
use crate::ui::{label, muted, padded_box};
use adw::prelude::*;
use gtk4 as gtk;
use std::rc::Rc;

const DEMO_CREDENTIALS: [(&str, &str); 3] = [
    ("Admin", "admin@imeer.ai / Admin123"),
    ("Investor", "investor@imeer.ai / investor"),
    ("Entrepreneur", "entrepreneur@imeer.ai / entrepreneur"),
];

pub fn auth_page(shell: &Rc<Shell>) -> gtk::Widget {
    let root = padded_box(gtk::Orientation::Vertical, 12, 24);
    root.set_halign(gtk::Align::Center);
    root.set_valign(gtk::Align::Center);
    root.set_width_request(420);

    let title = label("Welcome to Business Nexus");
    title.add_css_class("title-2");
    root.append(&title);
    root.append(&muted("Connect with investors and entrepreneurs worldwide"));

    let tabs = gtk::Notebook::new();
    tabs.append_page(&sign_in_form(shell), Some(&gtk::Label::new(Some("Sign In"))));
    tabs.append_page(&sign_up_form(shell), Some(&gtk::Label::new(Some("Sign Up"))));
    root.append(&tabs);

    root.upcast()
}

fn sign_in_form(shell: &Rc<Shell>) -> gtk::Box {
    let form = padded_box(gtk::Orientation::Vertical, 8, 12);

    let email_entry = gtk::Entry::new();
    email_entry.set_placeholder_text(Some("Email address"));
    email_entry.set_hexpand(true);

    let pass_entry = gtk::PasswordEntry::new();
    pass_entry.set_placeholder_text(Some("Password"));
    pass_entry.set_show_peek_icon(true);
    pass_entry.set_hexpand(true);

    let login_btn = gtk::Button::with_label("Sign In");
    login_btn.add_css_class("suggested-action");
    login_btn.set_halign(gtk::Align::End);

    form.append(&email_entry);
    form.append(&pass_entry);
    form.append(&login_btn);

    let demo = gtk::Frame::new(Some("Demo Credentials"));
    let demo_rows = padded_box(gtk::Orientation::Vertical, 4, 8);
    for (role, credentials) in DEMO_CREDENTIALS {
        demo_rows.append(&muted(&format!("{role}: {credentials}")));
    }
    demo.set_child(Some(&demo_rows));
    form.append(&demo);

    let on_submit = {
        let shell = shell.clone();
        let email_entry = email_entry.clone();
        let pass_entry = pass_entry.clone();
        move || {
            let email = email_entry.text().to_string();
            let password = pass_entry.text().to_string();
            if email.is_empty() || password.is_empty() {
                shell.toast("Please enter your email and password.");
                return;
            }
            Shell::login(&shell, email, password);
        }
    };

    let on_submit: Rc<dyn Fn()> = Rc::new(on_submit);
    {
        let on_submit = on_submit.clone();
        login_btn.connect_clicked(move |_| (on_submit)());
    }
    {
        let on_submit = on_submit.clone();
        email_entry.connect_activate(move |_| (on_submit)());
    }
    {
        let on_submit = on_submit.clone();
        pass_entry.connect_activate(move |_| (on_submit)());
    }

    form
}

fn sign_up_form(shell: &Rc<Shell>) -> gtk::Box {
    let form = padded_box(gtk::Orientation::Vertical, 8, 12);
    for placeholder in ["Full name", "Email address"] {
        let entry = gtk::Entry::new();
        entry.set_placeholder_text(Some(placeholder));
        form.append(&entry);
    }
    let password = gtk::PasswordEntry::new();
    password.set_placeholder_text(Some("Password"));
    form.append(&password);

    let role = gtk::DropDown::from_strings(&["Investor", "Entrepreneur"]);
    form.append(&role);

    let create_btn = gtk::Button::with_label("Create Account");
    create_btn.set_halign(gtk::Align::End);
    {
        let shell = shell.clone();
        create_btn.connect_clicked(move |_| {
            shell.toast("Registration functionality will be available soon. Please use demo credentials for now.");
        });
    }
    form.append(&create_btn);
    form
}
