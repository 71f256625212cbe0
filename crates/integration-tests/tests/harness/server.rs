//! A Herald server bound to an ephemeral localhost port

use std::net::SocketAddr;

use herald_config::Config;
use herald_server::Server;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Herald running in a background task; stops when dropped
pub struct TestServer {
    addr: SocketAddr,
    stop: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Assemble the router from `config` and serve it
    ///
    /// The configured listen address is ignored; the OS picks a free port.
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let router = Server::new(&config)?.into_router();
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let stop = CancellationToken::new();
        let stopped = stop.clone().cancelled_owned();
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).with_graceful_shutdown(stopped).await {
                eprintln!("test server on {addr} failed: {e}");
            }
        });

        Ok(Self {
            addr,
            stop,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}
