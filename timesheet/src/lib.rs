pub mod app;
pub mod command;
pub mod view;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
