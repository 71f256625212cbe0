//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use herald_config::{Config, CsrfConfig, HealthConfig, ServerConfig, TelemetryConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    csrf: None,
                },
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Require the given CSRF header on unsafe methods
    pub fn with_csrf(mut self, header_name: &str) -> Self {
        self.config.server.csrf = Some(CsrfConfig {
            enabled: true,
            header_name: header_name.to_owned(),
        });
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
