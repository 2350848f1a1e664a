mod ui;

use adw::prelude::*;
use adw::Application;
use business_nexus::{App, AppConfig};
use gtk4::glib;

fn main() -> glib::ExitCode {
    let config = AppConfig::load();
    business_nexus::utils::init_logging(config.log_filter.as_deref());

    let app = Application::builder()
        .application_id("ai.imeer.BusinessNexus")
        .build();
    app.connect_activate(move |app| match App::bootstrap(&config) {
        Ok(state) => crate::ui::main_window::show_main_window(app, state),
        Err(e) => {
            log::error!("Failed to start Business Nexus: {}", e);
            app.quit();
        }
    });
    app.run()
}
