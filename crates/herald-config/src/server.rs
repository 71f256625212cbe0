use std::net::SocketAddr;

use serde::Deserialize;

/// `[server]` section
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket to bind; `0.0.0.0:3000` when absent
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    /// Header-presence CSRF check on unsafe methods, off when absent
    #[serde(default)]
    pub csrf: Option<CsrfConfig>,
}

/// `[server.health]` section
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    pub enabled: bool,
    /// Route answering `ok`, must start with `/`
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/health".to_owned(),
        }
    }
}

/// `[server.csrf]` section
///
/// Requests other than `GET`, `HEAD` and `OPTIONS` must carry `header_name`
/// or are refused with a classified 403.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsrfConfig {
    pub enabled: bool,
    pub header_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            header_name: "X-Herald-CSRF-Protection".to_owned(),
        }
    }
}
