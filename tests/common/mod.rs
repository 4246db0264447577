//! Programmable HTTP backend for end-to-end tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// How the backend answers one request.
#[derive(Debug, Clone, Copy)]
pub struct Reply {
    pub status: u16,
    pub delay: Duration,
}

impl Reply {
    pub fn ok() -> Self {
        Self { status: 200, delay: Duration::ZERO }
    }

    pub fn status(status: u16) -> Self {
        Self { status, delay: Duration::ZERO }
    }

    pub fn delayed(delay: Duration) -> Self {
        Self { status: 200, delay }
    }
}

pub struct Backend {
    pub url: String,
    counters: Arc<Counters>,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU32,
    accepts: AtomicU32,
    close_requests: AtomicU32,
}

impl Backend {
    /// Requests received so far.
    pub fn hits(&self) -> u32 {
        self.counters.hits.load(Ordering::SeqCst)
    }

    /// TCP connections accepted so far.
    pub fn accepts(&self) -> u32 {
        self.counters.accepts.load(Ordering::SeqCst)
    }

    /// Requests that carried `Connection: close`.
    pub fn close_requests(&self) -> u32 {
        self.counters.close_requests.load(Ordering::SeqCst)
    }
}

/// Start a backend on an ephemeral port. `respond` gets the zero-based
/// index of each request. Connections stay open between requests unless the
/// client sends `Connection: close`.
pub async fn start_backend<F>(respond: F) -> Backend
where
    F: Fn(u32) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let counters = Arc::new(Counters::default());
    let respond = Arc::new(respond);

    let shared = counters.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            shared.accepts.fetch_add(1, Ordering::SeqCst);
            let counters = shared.clone();
            let respond = respond.clone();
            tokio::spawn(async move {
                while let Some(head) = read_request_head(&mut stream).await {
                    let index = counters.hits.fetch_add(1, Ordering::SeqCst);
                    let close = head
                        .lines()
                        .any(|line| line.eq_ignore_ascii_case("connection: close"));
                    if close {
                        counters.close_requests.fetch_add(1, Ordering::SeqCst);
                    }

                    let reply = respond(index);
                    tokio::time::sleep(reply.delay).await;

                    let body = "pong";
                    let response = format!(
                        "HTTP/1.1 {} Reply\r\nContent-Length: {}\r\nConnection: {}\r\n\r\n{}",
                        reply.status,
                        body.len(),
                        if close { "close" } else { "keep-alive" },
                        body
                    );
                    if stream.write_all(response.as_bytes()).await.is_err() || close {
                        break;
                    }
                }
                let _ = stream.shutdown().await;
            });
        }
    });

    Backend {
        url: format!("http://{}/health", addr),
        counters,
    }
}

async fn read_request_head(stream: &mut tokio::net::TcpStream) -> Option<String> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 512];
    loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            return Some(String::from_utf8_lossy(&buf).into_owned());
        }
    }
}

/// An address nothing is listening on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/health", addr)
}
