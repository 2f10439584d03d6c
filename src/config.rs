use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};

/// HTTP protocol version spoken in responses.
///
/// The negotiated version also decides the keep-alive default: HTTP/1.1
/// connections persist unless the client asks otherwise, HTTP/1.0
/// connections close after a single response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HttpVersion {
    /// HTTP/1.0 - one request per connection
    #[value(name = "1.0")]
    V1_0,
    /// HTTP/1.1 - persistent connections by default
    #[value(name = "1.1")]
    V1_1,
}

impl HttpVersion {
    /// Protocol string used in response status lines.
    pub fn line(&self) -> &'static str {
        match self {
            HttpVersion::V1_0 => "HTTP/1.0",
            HttpVersion::V1_1 => "HTTP/1.1",
        }
    }

    /// Whether connections stay open after a response unless the client
    /// sends `Connection: close`.
    pub fn persistent_by_default(&self) -> bool {
        matches!(self, HttpVersion::V1_1)
    }
}

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "hearth")]
#[command(about = "Static content HTTP server")]
pub struct Cli {
    /// Directory all served content must live under
    #[arg(long, value_name = "DIR")]
    pub document_root: PathBuf,

    /// TCP port to listen on
    #[arg(long, value_parser = clap::value_parser!(u16).range(8000..=9999))]
    pub port: u16,

    /// Protocol version used in responses
    #[arg(long, value_enum, default_value = "1.1")]
    pub protocol_version: HttpVersion,

    /// Log received request lines and served paths
    #[arg(long, default_value_t = false)]
    pub debug_mode: bool,

    /// Seconds an idle connection is held open before being dropped
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub client_timeout: u64,

    /// Seconds the accept loop waits for a connection before shutting down
    #[arg(long, value_name = "SECS", default_value_t = 500)]
    pub server_timeout: u64,

    /// Document served for requests to "/"
    #[arg(long, value_name = "PATH", default_value = "www.scu.edu/index.html")]
    pub default_document: String,
}

/// Validated process-wide configuration, shared read-only by all
/// connection handlers.
#[derive(Debug, Clone)]
pub struct Config {
    /// Canonical document root; every served file must resolve under it.
    pub document_root: PathBuf,
    pub port: u16,
    pub protocol: HttpVersion,
    pub debug: bool,
    /// Idle timeout applied to each read on a persistent connection.
    pub client_timeout: Duration,
    /// Accept-loop timeout; firing it shuts the server down.
    pub server_timeout: Duration,
    /// Root-relative path served for "/".
    pub default_document: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    /// Validates the parsed arguments and fixes the canonical document root.
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let meta = std::fs::metadata(&cli.document_root).with_context(|| {
            format!("document root not found: {}", cli.document_root.display())
        })?;
        anyhow::ensure!(
            meta.is_dir(),
            "document root is not a directory: {}",
            cli.document_root.display()
        );

        let document_root = cli.document_root.canonicalize().with_context(|| {
            format!(
                "failed to canonicalize document root: {}",
                cli.document_root.display()
            )
        })?;

        Ok(Self {
            document_root,
            port: cli.port,
            protocol: cli.protocol_version,
            debug: cli.debug_mode,
            client_timeout: Duration::from_secs(cli.client_timeout),
            server_timeout: Duration::from_secs(cli.server_timeout),
            default_document: cli.default_document,
        })
    }
}
