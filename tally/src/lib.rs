mod app;
pub mod app_core;
mod background;
pub mod commands;
pub mod events;
pub mod input;
pub mod logging;
pub mod notifications;
pub mod preferences;
pub mod report;
pub mod state;
pub mod ui;
mod utils;

pub use app::App;

// Always expose testing module (integration tests need it)
pub mod testing;
