use crate::ui::main_window::Shell;
use crate::ui::{heading, label, muted, padded_box, scrolled, stat_card};
use adw::prelude::*;
use business_nexus::routes::Route;
use gtk4 as gtk;
use gtk4::glib;
use std::rc::Rc;
use std::time::Duration;

const CONTACT_EMAIL: &str = "admin@imeer.ai";

pub fn build(shell: &Rc<Shell>, route: Route) -> gtk::Widget {
    match route {
        Route::Home => home(shell),
        Route::About => about(),
        Route::Contact => contact(shell),
        Route::Docs => docs(),
        Route::Auth => crate::ui::login::auth_page(shell),
        Route::Admin => crate::ui::dashboards::admin(shell),
        Route::Investor => crate::ui::dashboards::investor(shell),
        Route::Entrepreneur => crate::ui::dashboards::entrepreneur(shell),
    }
}

fn section(title: &str, paragraphs: &[&str]) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
    let title = label(title);
    title.add_css_class("title-4");
    root.append(&title);
    for text in paragraphs {
        root.append(&muted(text));
    }
    root
}

fn page(children: &[gtk::Widget]) -> gtk::Widget {
    let root = padded_box(gtk::Orientation::Vertical, 18, 32);
    for child in children {
        root.append(child);
    }
    scrolled(&root).upcast()
}

fn home(shell: &Rc<Shell>) -> gtk::Widget {
    let stats = shell.app.borrow().data.platform_stats.clone();

    let hero = gtk::Box::new(gtk::Orientation::Vertical, 8);
    hero.append(&muted("Connecting Innovation with Investment"));
    let title = label("Where Entrepreneurs Meet Investors");
    title.add_css_class("title-1");
    hero.append(&title);
    hero.append(&muted(
        "Business Nexus connects founders with verified investors, with secure messaging and deal tracking in one place.",
    ));
    let cta = gtk::Button::with_label("Get Started");
    cta.add_css_class("suggested-action");
    cta.add_css_class("pill");
    cta.set_halign(gtk::Align::Start);
    {
        let shell = shell.clone();
        cta.connect_clicked(move |_| Shell::show(&shell, Route::Auth));
    }
    hero.append(&cta);

    let figures = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    figures.append(&stat_card("Users", &stats.total_users.to_string(), "on the platform"));
    figures.append(&stat_card("Funding", &stats.total_funding, "facilitated"));
    figures.append(&stat_card("Success Rate", &stats.success_rate, "deal completion"));

    let features = section(
        "Why Business Nexus",
        &[
            "Verified profiles: every investor and founder is reviewed before going live.",
            "Direct messaging: talk to counterparts without leaving the platform.",
            "Deal tracking: follow every investment from first contact to close.",
        ],
    );

    page(&[hero.upcast(), figures.upcast(), features.upcast()])
}

fn about() -> gtk::Widget {
    let mission = section(
        "Our Mission",
        &["Business Nexus exists to democratize access to investment opportunities and entrepreneurial talent."],
    );
    let team = section(
        "Team",
        &[
            "Zameer Ahmed, Founder (zameer@imeer.ai)",
            "Meer Hassan, Engineering (meer@imeer.ai)",
            "Areeba Khan, Partnerships (areeba@imeer.ai)",
        ],
    );
    page(&[heading("About Business Nexus").upcast(), mission.upcast(), team.upcast()])
}

fn docs() -> gtk::Widget {
    let investors = section(
        "For Investors",
        &[
            "Browse and filter startup opportunities.",
            "Search by name, company or industry from the Entrepreneurs tab.",
        ],
    );
    let founders = section(
        "For Entrepreneurs",
        &[
            "Keep your startup profiles and funding progress up to date.",
            "Find investors by name, company or investment field.",
        ],
    );
    let support_line = format!("Email support: {} (Response within 24 hours)", CONTACT_EMAIL);
    let support = section("Support", &[support_line.as_str()]);
    page(&[
        heading("Documentation").upcast(),
        investors.upcast(),
        founders.upcast(),
        support.upcast(),
    ])
}

fn contact(shell: &Rc<Shell>) -> gtk::Widget {
    let form = gtk::Box::new(gtk::Orientation::Vertical, 8);
    let first = gtk::Entry::builder().placeholder_text("First name").build();
    let last = gtk::Entry::builder().placeholder_text("Last name").build();
    let email = gtk::Entry::builder().placeholder_text("Email").build();
    let subject = gtk::Entry::builder().placeholder_text("Subject").build();
    let body = gtk::TextView::new();
    body.set_wrap_mode(gtk::WrapMode::WordChar);
    body.set_size_request(-1, 120);
    let send = gtk::Button::with_label("Send Message");
    send.add_css_class("suggested-action");
    send.set_halign(gtk::Align::End);

    form.append(&first);
    form.append(&last);
    form.append(&email);
    form.append(&subject);
    form.append(&body);
    form.append(&send);

    {
        let shell = shell.clone();
        let entries = [first, last, email, subject];
        send.connect_clicked(move |button| {
            button.set_sensitive(false);
            let shell = shell.clone();
            let button = button.clone();
            let entries = entries.clone();
            let body = body.clone();
            // Submission is simulated; nothing leaves the process.
            glib::timeout_add_local_once(Duration::from_millis(1000), move || {
                shell.toast("Message Sent! We'll get back to you within 24 hours.");
                for entry in &entries {
                    entry.set_text("");
                }
                body.buffer().set_text("");
                button.set_sensitive(true);
            });
        });
    }

    page(&[
        heading("Get in Touch").upcast(),
        muted(&format!("Have questions or need support? Write to {} or use the form below.", CONTACT_EMAIL)).upcast(),
        form.upcast(),
    ])
}
