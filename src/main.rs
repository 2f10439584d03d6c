use std::sync::Arc;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use hearth::config::Config;
use hearth::server::{self, ClientRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let _guard = init_logging(cfg.debug);

    let registry = ClientRegistry::new();

    tokio::select! {
        res = server::listener::run(Arc::new(cfg), registry) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

/// Logs to stdout, and additionally to logs/server.log when the log
/// directory can be created. A failed file sink only suppresses file
/// logging; it never prevents the server from starting.
fn init_logging(debug: bool) -> Option<WorkerGuard> {
    let level = if debug { Level::DEBUG } else { Level::INFO };

    match std::fs::create_dir_all("logs") {
        Ok(()) => {
            let file = tracing_appender::rolling::never("logs", "server.log");
            let (file, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .with_ansi(false)
                .with_max_level(level)
                .with_writer(std::io::stdout.and(file))
                .init();
            Some(guard)
        }
        Err(e) => {
            eprintln!("failed to set up log directory: {e}");
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .with_max_level(level)
                .init();
            None
        }
    }
}
