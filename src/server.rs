//! The server: binds a TCP listener, accepts connections, and answers each
//! request with whatever the registered handler returns. Every connection is
//! handled in its own task; there is no shared state between them.

use crate::error::{ServerError, ServerResult};
use crate::handler::{Handler, IntoResponse};
use crate::http::{Method, Request, Response};
use std::collections::HashMap;
use std::io::{Error, ErrorKind};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

/// A server with a single handler in place of a router: every request, no
/// matter its method or path, is passed to the same handler.
///
/// # Example
///
/// ```no_run
/// use sinem_web::{Response, Server};
///
/// let server = Server::new(|_req| async { Ok(Response::text("hello\n")) });
/// server.listen("0.0.0.0:3333").unwrap();
/// ```
pub struct Server {
    handler: Box<dyn Handler>,
}

impl Server {
    /// Creates a server that answers every request with `handler`.
    pub fn new<F, R>(handler: F) -> Self
    where
        F: Fn(Request) -> R + Send + Sync + Clone + 'static,
        R: IntoResponse + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }

    /// Starts the server and blocks the calling thread until the process is
    /// terminated. Returns only on failure; a bind failure is reported as
    /// [`ServerError::Bind`].
    ///
    /// # Arguments
    /// * `addr` - Address to listen on (e.g. "0.0.0.0:3333")
    pub fn listen(self, addr: &str) -> ServerResult<()> {
        let runtime = Runtime::new()?;
        runtime.block_on(self.serve(addr))
    }

    /// The async body of [`listen`](Server::listen), for callers that already
    /// run inside a tokio runtime.
    pub async fn serve(self, addr: &str) -> ServerResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;

        println!("Server running at http://{}/", addr);

        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let handler = self.handler.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, handler).await {
                            eprintln!("Connection error: {}", e);
                        }
                    });
                }
                Err(e) => eprintln!("Connection failed: {}", e),
            }
        }
    }
}

/// Reads one request off the stream, logs it, and writes the handler's
/// response. The request content is read in full to drain the socket but is
/// never inspected beyond the request line and headers.
async fn handle_connection<S>(mut stream: S, handler: Box<dyn Handler>) -> Result<(), Error>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf_reader = BufReader::new(&mut stream);
    let mut request_line = String::new();
    buf_reader.read_line(&mut request_line).await?;

    // Client connected and closed without sending anything.
    if request_line.is_empty() {
        return Ok(());
    }

    // Parse the request line
    let mut parts = request_line.trim().split_whitespace();
    let method = parts
        .next()
        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "Invalid request line"))?
        .to_string();

    let full_path = parts
        .next()
        .ok_or_else(|| Error::new(ErrorKind::InvalidData, "Invalid request line"))?;

    // Split path and query
    let mut path_parts = full_path.split('?');
    let path = path_parts.next().unwrap_or("/").to_string();
    let query = path_parts.next().map(parse_query).unwrap_or_default();

    // Collect headers
    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        buf_reader.read_line(&mut line).await?;

        if line.trim().is_empty() {
            break;
        }

        if let Some((key, value)) = line.trim().split_once(':') {
            headers.insert(key.trim().to_lowercase(), value.trim().to_string());
        }
    }

    // Drain the body if Content-Length is present
    let mut body = Vec::new();
    if let Some(content_length) = headers.get("content-length") {
        if let Ok(length) = content_length.parse::<usize>() {
            body.reserve(length);
            let mut take = buf_reader.take(length as u64);
            take.read_to_end(&mut body).await?;
        }
    }

    println!("request received");

    let request = Request {
        method: Method::from_string(&method),
        path,
        query,
        headers,
        body,
    };

    let response = match handler.handle(request).await {
        Ok(response) => response,
        Err(err) => Response::error(err),
    };

    stream.write_all(response.to_wire().as_bytes()).await?;
    Ok(())
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.split('=');
            Some((
                parts.next()?.to_string(),
                parts.next().unwrap_or("").to_string(),
            ))
        })
        .collect()
}
