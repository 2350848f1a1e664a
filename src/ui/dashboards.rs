use crate::ui::chat_view::ChatView;
use crate::ui::main_window::Shell;
use crate::ui::{clear_list, heading, label, muted, padded_box, scrolled, stat_card};
use business_nexus::dashboard::{AdminDashboard, EntrepreneurDashboard, InvestorDashboard};
use business_nexus::data::{Role, SessionUser, UserRecord};
use business_nexus::routes::Route;
use gtk4 as gtk;
use gtk4::prelude::*;
use std::path::Path;
use std::rc::Rc;

/// A directory entry flattened for display.
struct PersonRow {
    id: String,
    name: String,
    headline: String,
    detail: String,
    verified: bool,
}

impl PersonRow {
    fn from_record(record: &UserRecord, detail: String) -> Self {
        let user = &record.user;
        let headline = if user.company.is_empty() {
            user.title.clone()
        } else {
            format!("{} at {}", user.title, user.company)
        };
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            headline,
            detail,
            verified: user.verified,
        }
    }
}

fn signed_in_user(shell: &Shell, role: Role) -> Option<SessionUser> {
    shell
        .app
        .borrow()
        .current_user()
        .filter(|u| u.role() == role)
        .cloned()
}

fn no_session(shell: &Rc<Shell>) -> gtk::Widget {
    let root = padded_box(gtk::Orientation::Vertical, 12, 32);
    root.set_valign(gtk::Align::Center);
    root.set_halign(gtk::Align::Center);
    root.append(&heading("You are not signed in"));
    let button = gtk::Button::with_label("Go to Sign In");
    button.add_css_class("suggested-action");
    {
        let shell = shell.clone();
        button.connect_clicked(move |_| Shell::show(&shell, Route::Auth));
    }
    root.append(&button);
    root.upcast()
}

fn header(user: &SessionUser, subtitle: &str) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    root.append(&avatar(user));
    let text = gtk::Box::new(gtk::Orientation::Vertical, 2);
    text.append(&heading(&format!("Welcome back, {}", user.name)));
    text.append(&muted(subtitle));
    root.append(&text);
    root
}

/// Initials unless the avatar (or the placeholder) is a readable local image.
fn avatar(user: &SessionUser) -> adw::Avatar {
    let avatar = adw::Avatar::new(56, Some(&user.name), true);
    let source = user.avatar_or_placeholder();
    let path = Path::new(source);
    if path.is_file() {
        match gtk::gdk::Texture::from_filename(path) {
            Ok(texture) => avatar.set_custom_image(Some(&texture)),
            Err(e) => log::debug!("Avatar {} not loaded: {}", source, e),
        }
    }
    avatar
}

fn row(title: &str, lines: &[&str]) -> gtk::ListBoxRow {
    let row = gtk::ListBoxRow::new();
    let inner = padded_box(gtk::Orientation::Vertical, 2, 6);
    let title = label(title);
    title.add_css_class("heading");
    inner.append(&title);
    for line in lines.iter().filter(|l| !l.is_empty()) {
        inner.append(&muted(line));
    }
    row.set_child(Some(&inner));
    row
}

fn list() -> gtk::ListBox {
    let list = gtk::ListBox::new();
    list.add_css_class("boxed-list");
    list.set_selection_mode(gtk::SelectionMode::None);
    list
}

fn tab(notebook: &gtk::Notebook, title: &str, child: &impl IsA<gtk::Widget>) -> u32 {
    notebook.append_page(child, Some(&gtk::Label::new(Some(title))))
}

fn fill_people(list: &gtk::ListBox, people: &[PersonRow], on_message: &Rc<dyn Fn(&str)>) {
    clear_list(list);
    if people.is_empty() {
        list.append(&row("No matches", &["Try a different search."]));
        return;
    }
    for person in people {
        let row = gtk::ListBoxRow::new();
        let inner = padded_box(gtk::Orientation::Horizontal, 12, 6);
        let text = gtk::Box::new(gtk::Orientation::Vertical, 2);
        text.set_hexpand(true);
        let name = label(&if person.verified {
            format!("{} (verified)", person.name)
        } else {
            person.name.clone()
        });
        name.add_css_class("heading");
        text.append(&name);
        text.append(&muted(&person.headline));
        text.append(&muted(&person.detail));
        inner.append(&text);

        let message = gtk::Button::with_label("Message");
        message.set_valign(gtk::Align::Center);
        {
            let on_message = on_message.clone();
            let id = person.id.clone();
            message.connect_clicked(move |_| on_message(id.as_str()));
        }
        inner.append(&message);
        row.set_child(Some(&inner));
        list.append(&row);
    }
}

/// Messages tab wired to a live unread counter.
fn messages_tab(shell: &Rc<Shell>, notebook: &gtk::Notebook, unread: &gtk::Label) -> (Rc<ChatView>, u32) {
    let chat = ChatView::new(shell);
    let page = tab(notebook, "Messages", &chat.widget());
    {
        let shell = shell.clone();
        let unread = unread.clone();
        chat.connect_changed(move || {
            let count = shell.app.borrow().unread_count();
            unread.set_label(&count.to_string());
        });
    }
    (chat, page)
}

fn unread_card(count: usize) -> (gtk::Widget, gtk::Label) {
    let frame = gtk::Frame::new(Some("Unread Messages"));
    let inner = padded_box(gtk::Orientation::Vertical, 4, 12);
    let value = label(&count.to_string());
    value.add_css_class("title-1");
    inner.append(&value);
    inner.append(&muted("in your inbox"));
    frame.set_child(Some(&inner));
    frame.set_hexpand(true);
    (frame.upcast(), value)
}

/// Opens the messages tab on a conversation with `id`.
fn message_opener(notebook: &gtk::Notebook, chat: &Rc<ChatView>, page: u32) -> Rc<dyn Fn(&str)> {
    let notebook = notebook.clone();
    let chat = Rc::downgrade(chat);
    Rc::new(move |id: &str| {
        if let Some(chat) = chat.upgrade() {
            notebook.set_current_page(Some(page));
            chat.open(id);
        }
    })
}

pub fn admin(shell: &Rc<Shell>) -> gtk::Widget {
    let Some(user) = signed_in_user(shell, Role::Admin) else {
        return no_session(shell);
    };
    let app = shell.app.borrow();
    let view = AdminDashboard::build(&app.data, &user);

    let root = padded_box(gtk::Orientation::Vertical, 16, 24);
    root.append(&header(&user, "Platform administration"));

    let figures = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    figures.append(&stat_card(
        "Total Users",
        &view.stats.total_users.to_string(),
        &format!(
            "{} investors, {} entrepreneurs",
            view.stats.total_investors, view.stats.total_entrepreneurs
        ),
    ));
    figures.append(&stat_card(
        "Deals",
        &view.stats.total_deals.to_string(),
        &format!("{} completed", view.stats.completed_deals),
    ));
    figures.append(&stat_card("Funding", &view.stats.total_funding, "facilitated"));
    figures.append(&stat_card("Revenue", &view.stats.platform_revenue, &view.stats.monthly_growth));
    figures.append(&stat_card("Pending", &view.pending.to_string(), "unread notifications"));
    root.append(&figures);

    let notebook = gtk::Notebook::new();
    notebook.set_vexpand(true);

    let overview = list();
    for record in &view.recent_users {
        overview.append(&row(
            &record.user.name,
            &[format!("{} · {}", record.role(), record.user.email).as_str()],
        ));
    }
    tab(&notebook, "Recent Users", &scrolled(&overview));

    let users = list();
    for record in &view.managed_users {
        let status = if record.user.verified { "Verified" } else { "Pending verification" };
        users.append(&row(
            &record.user.name,
            &[format!("{} · {}", record.role(), record.user.company).as_str(), status],
        ));
    }
    tab(&notebook, "Users", &scrolled(&users));

    let deals = list();
    for deal in &view.deals {
        deals.append(&row(
            &deal.parties(),
            &[
                format!("{} for {} equity", deal.deal.amount, deal.deal.equity).as_str(),
                format!("{:?} · {}", deal.deal.status, deal.deal.date.format("%Y-%m-%d")).as_str(),
            ],
        ));
    }
    tab(&notebook, "Deals", &scrolled(&deals));

    let notifications = list();
    for n in &view.notifications {
        let title = if n.read { n.title.clone() } else { format!("{} (new)", n.title) };
        notifications.append(&row(&title, &[n.message.as_str()]));
    }
    tab(&notebook, "Notifications", &scrolled(&notifications));

    let contacts = list();
    for submission in view.contact_submissions {
        contacts.append(&row(
            &submission.subject,
            &[
                format!("{} <{}>", submission.full_name(), submission.email).as_str(),
                submission.message.as_str(),
                format!("{:?}", submission.status).as_str(),
            ],
        ));
    }
    tab(&notebook, "Contact", &scrolled(&contacts));

    drop(app);
    root.append(&notebook);
    scrolled(&root).upcast()
}

pub fn investor(shell: &Rc<Shell>) -> gtk::Widget {
    let Some(user) = signed_in_user(shell, Role::Investor) else {
        return no_session(shell);
    };
    let (people, unread, portfolio) = {
        let app = shell.app.borrow();
        let view = InvestorDashboard::build(&app.data, &user, &app.messages, "");
        (
            entrepreneur_rows(&view),
            view.unread_messages,
            user.as_investor().map(|i| i.portfolio_companies.len()).unwrap_or(0),
        )
    };

    let root = padded_box(gtk::Orientation::Vertical, 16, 24);
    root.append(&header(&user, "Discover promising startups"));

    let figures = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    let (unread_widget, unread_label) = unread_card(unread);
    figures.append(&unread_widget);
    figures.append(&stat_card("Portfolio", &portfolio.to_string(), "companies"));
    figures.append(&stat_card(
        "Investments",
        &user
            .as_investor()
            .and_then(|i| i.total_investments)
            .unwrap_or(0)
            .to_string(),
        "to date",
    ));
    root.append(&figures);

    let notebook = gtk::Notebook::new();
    notebook.set_vexpand(true);

    let search = gtk::SearchEntry::new();
    search.set_placeholder_text(Some("Search by name, company or industry"));
    let results = list();
    let browse = gtk::Box::new(gtk::Orientation::Vertical, 8);
    browse.append(&search);
    browse.append(&scrolled(&results));
    tab(&notebook, "Entrepreneurs", &browse);

    let (chat, chat_page) = messages_tab(shell, &notebook, &unread_label);
    let on_message = message_opener(&notebook, &chat, chat_page);
    fill_people(&results, &people, &on_message);
    {
        let shell = shell.clone();
        let results = results.clone();
        search.connect_search_changed(move |entry| {
            let query = entry.text();
            let people = {
                let app = shell.app.borrow();
                InvestorDashboard::build(&app.data, &user, &app.messages, &query)
                    .entrepreneurs
                    .iter()
                    .map(|r| PersonRow::from_record(r, entrepreneur_detail(r)))
                    .collect::<Vec<_>>()
            };
            fill_people(&results, &people, &on_message);
        });
    }

    root.append(&notebook);
    root.upcast()
}

fn entrepreneur_rows(view: &InvestorDashboard) -> Vec<PersonRow> {
    view.entrepreneurs
        .iter()
        .map(|r| PersonRow::from_record(r, entrepreneur_detail(r)))
        .collect()
}

fn entrepreneur_detail(record: &UserRecord) -> String {
    match record.user.as_entrepreneur() {
        Some(e) => {
            let mut parts = vec![e.industry.clone()];
            parts.extend(e.stage.clone());
            parts.extend(e.funding_needed.as_ref().map(|f| format!("seeking {}", f)));
            parts.retain(|p| !p.is_empty());
            parts.join(" · ")
        }
        None => String::new(),
    }
}

fn investor_detail(record: &UserRecord) -> String {
    match record.user.as_investor() {
        Some(i) => {
            let mut detail = i.investment_fields.join(", ");
            if let Some(range) = &i.investment_range {
                detail = format!("{} · {}", detail, range);
            }
            detail
        }
        None => String::new(),
    }
}

pub fn entrepreneur(shell: &Rc<Shell>) -> gtk::Widget {
    let Some(user) = signed_in_user(shell, Role::Entrepreneur) else {
        return no_session(shell);
    };

    let notebook = gtk::Notebook::new();
    notebook.set_vexpand(true);
    let startups = list();

    let (people, unread, startup_count) = {
        let app = shell.app.borrow();
        let view = EntrepreneurDashboard::build(&app.data, &user, &app.messages, "");
        for startup in view.startups() {
            startups.append(&row(
                &startup.name,
                &[
                    startup.description.as_str(),
                    format!("{} · raised {} of {}", startup.stage, startup.current_funding, startup.funding_goal).as_str(),
                ],
            ));
        }
        let people: Vec<PersonRow> = view
            .investors
            .iter()
            .map(|r| PersonRow::from_record(r, investor_detail(r)))
            .collect();
        (people, view.unread_messages, view.startups().len())
    };
    if startup_count == 0 {
        startups.append(&row("No startups yet", &["Add your first venture to attract investors."]));
    }

    let root = padded_box(gtk::Orientation::Vertical, 16, 24);
    root.append(&header(&user, "Connect with investors"));

    let figures = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    let (unread_widget, unread_label) = unread_card(unread);
    figures.append(&unread_widget);
    figures.append(&stat_card("Startups", &startup_count.to_string(), "in your portfolio"));
    figures.append(&stat_card(
        "Funding Needed",
        user.as_entrepreneur()
            .and_then(|e| e.funding_needed.as_deref())
            .unwrap_or("n/a"),
        "current round",
    ));
    root.append(&figures);

    let search = gtk::SearchEntry::new();
    search.set_placeholder_text(Some("Search by name, company or investment field"));
    let results = list();
    let browse = gtk::Box::new(gtk::Orientation::Vertical, 8);
    browse.append(&search);
    browse.append(&scrolled(&results));
    tab(&notebook, "Investors", &browse);
    tab(&notebook, "My Startups", &scrolled(&startups));

    let (chat, chat_page) = messages_tab(shell, &notebook, &unread_label);
    let on_message = message_opener(&notebook, &chat, chat_page);
    fill_people(&results, &people, &on_message);
    {
        let shell = shell.clone();
        let results = results.clone();
        search.connect_search_changed(move |entry| {
            let query = entry.text();
            let people = {
                let app = shell.app.borrow();
                EntrepreneurDashboard::build(&app.data, &user, &app.messages, &query)
                    .investors
                    .iter()
                    .map(|r| PersonRow::from_record(r, investor_detail(r)))
                    .collect::<Vec<_>>()
            };
            fill_people(&results, &people, &on_message);
        });
    }

    root.append(&notebook);
    root.upcast()
}
