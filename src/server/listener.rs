use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::registry::ClientRegistry;

/// Binds the configured port and serves until the accept timeout fires.
pub async fn run(cfg: Arc<Config>, registry: ClientRegistry) -> anyhow::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", cfg.port)).await?;
    info!("Server is running on port {}...", cfg.port);
    serve(listener, cfg, registry).await
}

/// Accept loop over an already-bound listener.
///
/// Each connection gets its own task; the only state shared between
/// tasks is the client registry. When no connection arrives within the
/// server timeout the loop returns and the server shuts down.
pub async fn serve(
    listener: TcpListener,
    cfg: Arc<Config>,
    registry: ClientRegistry,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match timeout(cfg.server_timeout, listener.accept()).await {
            Ok(accepted) => accepted?,
            Err(_) => {
                warn!(
                    "No connection within {}s, shutting down",
                    cfg.server_timeout.as_secs()
                );
                return Ok(());
            }
        };

        let ip = peer.ip();
        if registry.add(ip) {
            info!("New connection from {}", ip);
        }

        let cfg = Arc::clone(&cfg);
        let registry = registry.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, peer, cfg);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
            // Runs on every exit path; the socket closes on drop.
            registry.remove(ip);
            info!("Connection closed: {}", ip);
        });
    }
}
