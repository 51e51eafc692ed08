//! Application lifecycle: service construction, HTTP server, shutdown

pub mod lifetime;
pub mod server;

pub use lifetime::startup::{StartupContext, prepare_server_startup};
pub use server::{run_server, serve};
