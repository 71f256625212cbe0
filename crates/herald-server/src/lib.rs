//! HTTP boundary for Herald
//!
//! Renders errors into JSON responses and assembles the reference server.

#![allow(clippy::must_use_candidate)]

mod api_error;
mod csrf;
mod envelope;
mod health;
mod responder;
mod users;
mod writer;

use std::net::SocketAddr;

use axum::Router;
use herald_config::Config;
use http::HeaderName;
use tower_http::trace::TraceLayer;

pub use api_error::ApiError;
pub use envelope::{ErrorBody, ErrorResponse};
pub use responder::{FALLBACK_MESSAGE, Responder, respond};
pub use users::{CreateUser, User, UserStore, user_router};
pub use writer::{BufferedResponse, ResponseWriter};

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured CSRF header name is not a valid
    /// HTTP header name
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let mut app = Router::new();

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        app = app.merge(user_router(UserStore::new()));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CSRF protection
        if let Some(ref csrf_config) = config.server.csrf
            && csrf_config.enabled
        {
            let header_name = HeaderName::try_from(csrf_config.header_name.as_str())
                .map_err(|e| anyhow::anyhow!("invalid CSRF header name '{}': {e}", csrf_config.header_name))?;
            app = app.layer(axum::middleware::from_fn(move |req, next| {
                let header_name = header_name.clone();
                async move { csrf::csrf_middleware(header_name, req, next).await }
            }));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
