//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.0 and HTTP/1.1 subset the server
//! speaks: request line + headers in, status line + headers + body out,
//! with keep-alive support on persistent connections.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation and header lookup utilities
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data (idle timeout)
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve the path, open the file
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hearth::config::Config;
//! use hearth::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! async fn accept_loop(cfg: Arc<Config>) -> anyhow::Result<()> {
//!     let listener = TcpListener::bind(("0.0.0.0", cfg.port)).await?;
//!
//!     loop {
//!         let (socket, peer) = listener.accept().await?;
//!         let cfg = Arc::clone(&cfg);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, peer, cfg);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
