//! HTTP server and error responses.

pub mod error;
pub mod server;

pub use server::HttpServer;
