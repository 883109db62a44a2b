pub mod health_api;
pub mod openai_compat;
pub mod server;
pub mod streaming;

pub use server::{build_router, serve, start_server, GatewaySettings, GatewayState};
