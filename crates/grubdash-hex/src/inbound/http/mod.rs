mod dishes;
mod orders;
mod server;

pub use server::{AppState, HttpServer, HttpServerConfig, Payload};
