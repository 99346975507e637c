// Library interface for tagpost (shared by the binary and integration tests)
#[macro_use]
pub mod logging;

pub mod api;
pub mod app;
pub mod config;
pub mod server_config;
pub mod tagging;
pub mod terminal;
pub mod ui;
