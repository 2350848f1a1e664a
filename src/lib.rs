pub mod app;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod loading;
pub mod messaging;
pub mod routes;
pub mod session;
pub mod storage;
pub mod utils;

pub use app::App;
pub use config::AppConfig;
pub use error::{Error, Result};
