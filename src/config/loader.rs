//! Configuration loading from the environment.
//!
//! The proxy reads its listening port from `PORT` and nothing else; every
//! other knob keeps its default. Resolution happens once at startup and the
//! resulting value is passed into the server constructor.

use crate::config::schema::ProxyConfig;

/// Environment variable naming the listening port.
pub const PORT_VAR: &str = "PORT";

/// Resolve configuration from the environment.
pub fn load_from_env() -> ProxyConfig {
    let mut config = ProxyConfig::default();

    if let Ok(port) = std::env::var(PORT_VAR) {
        match port.parse() {
            Ok(port) => config.listener.port = port,
            Err(_) => {
                tracing::warn!(value = %port, "ignoring unparseable PORT, using default")
            }
        }
    }

    config
}
