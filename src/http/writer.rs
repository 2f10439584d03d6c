use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::HttpVersion;
use crate::http::response::{Body, Response};

/// Chunk size for streaming file bodies; files are never loaded whole.
const BUFFER_SIZE: usize = 8192;

/// Value of the `Server` identification header.
const SERVER_NAME: &str = concat!("hearth/", env!("CARGO_PKG_VERSION"));

/// Serializes responses onto a connection.
///
/// The status line always carries the server's configured protocol
/// version; the client's version token is not echoed back.
pub struct ResponseWriter {
    protocol: HttpVersion,
}

impl ResponseWriter {
    pub fn new(protocol: HttpVersion) -> Self {
        Self { protocol }
    }

    fn serialize_head(&self, resp: &Response) -> Vec<u8> {
        let mut buf = Vec::new();

        // Status line
        let status_line = format!(
            "{} {} {}\r\n",
            self.protocol.line(),
            resp.status.as_u16(),
            resp.status.reason_phrase()
        );
        buf.extend_from_slice(status_line.as_bytes());

        // Identification and date headers precede the per-response set.
        buf.extend_from_slice(format!("Server: {SERVER_NAME}\r\n").as_bytes());
        buf.extend_from_slice(format!("Date: {}\r\n", http_date()).as_bytes());

        for (k, v) in &resp.headers {
            buf.extend_from_slice(k.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(v.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }

        // Header/body separator
        buf.extend_from_slice(b"\r\n");

        buf
    }

    /// Writes the head and body to `stream`.
    ///
    /// File bodies are copied through a bounded buffer. Any I/O error is
    /// a transport failure: the caller logs it and closes the connection
    /// without attempting another response.
    pub async fn write<W>(&self, stream: &mut W, response: &mut Response) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        stream.write_all(&self.serialize_head(response)).await?;

        match &mut response.body {
            Body::Inline(bytes) => stream.write_all(bytes).await?,
            Body::File { file, .. } => copy_chunked(file, stream).await?,
        }

        stream.flush().await?;
        Ok(())
    }
}

async fn copy_chunked<R, W>(reader: &mut R, writer: &mut W) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = [0u8; BUFFER_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n]).await?;
    }
    Ok(())
}

/// RFC 1123 date in GMT, e.g. `Tue, 07 Jan 2025 18:30:00 GMT`.
fn http_date() -> String {
    chrono::Utc::now()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}
