pub mod actions;
pub mod api_client;
pub mod domain;
pub mod error;
pub mod session;
pub mod settings;
pub mod store;
pub mod utils;
