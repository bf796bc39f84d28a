//! Client configuration bundled with the web build.

use railhead_core::ClientConfig;
use std::sync::OnceLock;

static CLIENT_CONFIG: OnceLock<ClientConfig> = OnceLock::new();

const BUNDLED_CONFIG: &str = include_str!("../static/config.json");

/// Load the bundled config, applying the compile-time router base.
///
/// A broken bundle is logged and replaced by defaults so the client still
/// renders.
#[must_use]
pub fn load_client_config() -> ClientConfig {
    let mut config = parse_or_default(BUNDLED_CONFIG);
    if config.router_base.is_none() {
        config.router_base = crate::paths::router_base();
    }
    config
}

/// The config every part of the client shares, loaded on first use.
#[must_use]
pub fn client_config() -> &'static ClientConfig {
    CLIENT_CONFIG.get_or_init(load_client_config)
}

/// Base path for pushed locations and link targets.
#[must_use]
pub fn configured_router_base() -> Option<&'static str> {
    client_config().router_base.as_deref()
}

fn parse_or_default(json: &str) -> ClientConfig {
    ClientConfig::from_json(json).unwrap_or_else(|err| {
        log::warn!("bundled config rejected, using defaults: {err}");
        ClientConfig::default()
    })
}
