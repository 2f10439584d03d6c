use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::Config;
use crate::content::resolver::{self, ResolvedTarget};
use crate::content::mime_type_of;
use crate::http::parser::{self, ParseStatus};
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::writer::ResponseWriter;

pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    cfg: Arc<Config>,
    buffer: BytesMut,
    at_eof: bool,
    /// Sticky for the life of the connection: starts from the protocol
    /// default and only ever drops to false on `Connection: close`.
    keep_alive: bool,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(Response),
    Closed,
}

/// What a read attempt produced.
enum ReadOutcome {
    Request(Request),
    /// The head was unparseable; answer 400 and consult keep-alive.
    Malformed,
    /// Clean end of the keep-alive session.
    Eof,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr, cfg: Arc<Config>) -> Self {
        let keep_alive = cfg.protocol.persistent_by_default();
        Self {
            stream,
            peer,
            cfg,
            buffer: BytesMut::with_capacity(4096),
            at_eof: false,
            keep_alive,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    match timeout(self.cfg.client_timeout, self.read_request()).await {
                        Err(_) => {
                            // The client idled out; close silently.
                            debug!("[{}] persistent connection timed out", self.peer);
                            self.state = ConnectionState::Closed;
                        }
                        Ok(outcome) => match outcome? {
                            ReadOutcome::Request(req) => {
                                self.state = ConnectionState::Processing(req);
                            }
                            ReadOutcome::Malformed => {
                                let response =
                                    Self::error_response(&self.cfg, StatusCode::BadRequest).await;
                                self.state = ConnectionState::Writing(response);
                            }
                            ReadOutcome::Eof => {
                                self.state = ConnectionState::Closed;
                            }
                        },
                    }
                }

                ConnectionState::Processing(req) => {
                    debug!("[{}] received: {} {}", self.peer, req.method, req.path);

                    if req.wants_close() {
                        self.keep_alive = false;
                    }

                    let response = Self::handle_request(&self.cfg, req).await;
                    self.state = ConnectionState::Writing(response);
                }

                ConnectionState::Writing(response) => {
                    let writer = ResponseWriter::new(self.cfg.protocol);
                    writer.write(&mut self.stream, response).await?;

                    if self.keep_alive && self.cfg.protocol.persistent_by_default() {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the buffer frames one request head.
    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            match parser::parse_request(&self.buffer, self.at_eof) {
                ParseStatus::Complete(request, consumed) => {
                    self.buffer.advance(consumed);
                    return Ok(ReadOutcome::Request(request));
                }
                ParseStatus::Malformed(err, consumed) => {
                    self.buffer.advance(consumed);
                    warn!("[{}] malformed request: {:?}", self.peer, err);
                    return Ok(ReadOutcome::Malformed);
                }
                ParseStatus::Incomplete => {
                    if self.at_eof {
                        return Ok(ReadOutcome::Eof);
                    }
                }
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;
            if n == 0 {
                self.at_eof = true;
            }
        }
    }

    /// Maps one request to a response. Method and extension checks run
    /// before any filesystem access.
    async fn handle_request(cfg: &Config, req: &Request) -> Response {
        if !req.is_get() || !resolver::is_allowed_resource(&req.path) {
            warn!("400 Bad Request: {} {}", req.method, req.path);
            return Self::error_response(cfg, StatusCode::BadRequest).await;
        }

        match resolver::resolve(&req.path, &cfg.document_root, &cfg.default_document) {
            ResolvedTarget::File(path) => match Self::open_file(&path).await {
                Ok((file, len)) => {
                    debug!("serving {}", path.display());
                    ResponseBuilder::new(StatusCode::Ok)
                        .header("Content-Type", mime_type_of(&path))
                        .file(file, len, path)
                        .build()
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!("404 Not Found: {}", req.path);
                    Self::error_response(cfg, StatusCode::NotFound).await
                }
                Err(e) => {
                    warn!("403 Forbidden: {} ({})", req.path, e);
                    Self::error_response(cfg, StatusCode::Forbidden).await
                }
            },
            ResolvedTarget::NotFound | ResolvedTarget::OutsideRoot => {
                warn!("404 Not Found: {}", req.path);
                Self::error_response(cfg, StatusCode::NotFound).await
            }
        }
    }

    /// Builds an error response: the configured on-disk page when it is
    /// present and readable, a minimal inline body otherwise. Filesystem
    /// error details stay in the log, never in the response.
    async fn error_response(cfg: &Config, status: StatusCode) -> Response {
        if let Some(page) = status.error_page() {
            let path = cfg.document_root.join(page);
            if let Ok((file, len)) = Self::open_file(&path).await {
                return ResponseBuilder::new(status)
                    .header("Content-Type", mime_type_of(&path))
                    .file(file, len, path)
                    .build();
            }
        }

        let text = format!("{} {}", status.as_u16(), status.reason_phrase());
        ResponseBuilder::new(status)
            .header("Content-Type", "text/plain")
            .body(text.into_bytes())
            .build()
    }

    async fn open_file(path: &Path) -> std::io::Result<(tokio::fs::File, u64)> {
        let file = tokio::fs::File::open(path).await?;
        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Err(std::io::Error::new(ErrorKind::NotFound, "not a regular file"));
        }
        Ok((file, meta.len()))
    }
}
