//! Mock Notte API server
//!
//! A minimal HTTP/1.1 server for testing the client without a real API
//! deployment. Routes are declared up front; every request is recorded so
//! tests can assert on call counts, paths, headers, and bodies.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Installs the test log subscriber once, honoring `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One declared route: exact method + path match.
#[derive(Debug, Clone)]
struct MockRoute {
    method: String,
    path: String,
    status: u16,
    body: Value,
    delay: Option<Duration>,
}

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl RecordedRequest {
    /// Returns a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Builder for a [`MockServer`].
#[derive(Debug, Default)]
pub struct MockServerBuilder {
    routes: Vec<MockRoute>,
}

impl MockServerBuilder {
    /// Declares a route returning `status` with a JSON `body`.
    pub fn route(mut self, method: &str, path: &str, status: u16, body: Value) -> Self {
        self.routes.push(MockRoute {
            method: method.to_string(),
            path: path.to_string(),
            status,
            body,
            delay: None,
        });
        self
    }

    /// Declares a route that sleeps before responding, for timeout tests.
    pub fn slow_route(
        mut self,
        method: &str,
        path: &str,
        delay: Duration,
        status: u16,
        body: Value,
    ) -> Self {
        self.routes.push(MockRoute {
            method: method.to_string(),
            path: path.to_string(),
            status,
            body,
            delay: Some(delay),
        });
        self
    }

    /// Binds to an ephemeral local port and starts serving.
    pub async fn start(self) -> MockServer {
        init_tracing();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("local addr");

        let routes = Arc::new(self.routes);
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let accept_routes = Arc::clone(&routes);
        let accept_requests = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        let Ok((stream, _)) = result else { break };
                        let routes = Arc::clone(&accept_routes);
                        let requests = Arc::clone(&accept_requests);
                        tokio::spawn(handle_connection(stream, routes, requests));
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
        });

        MockServer {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }
}

/// Mock Notte API server bound to an ephemeral local port.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockServer {
    /// Starts building a server.
    pub fn builder() -> MockServerBuilder {
        MockServerBuilder::default()
    }

    /// Base URL to point a client at.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests matching the given method and path.
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Serves exactly one request on the stream, then closes it.
async fn handle_connection(
    mut stream: TcpStream,
    routes: Arc<Vec<MockRoute>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let Some(request) = read_request(&mut stream).await else {
        return;
    };

    let route = routes
        .iter()
        .find(|r| r.method == request.method && r.path == request.path)
        .cloned();

    requests.lock().push(request);

    let (status, body, delay) = match route {
        Some(route) => (route.status, route.body, route.delay),
        None => (404, serde_json::json!({"detail": "Not found"}), None),
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let payload = body.to_string();
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len(),
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Reads and parses one HTTP/1.1 request from the stream.
async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    // Read until the end of the header block.
    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
        if buf.len() > 64 * 1024 {
            return None;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");

    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();
    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q.to_string())),
        None => (target, None),
    };

    let mut headers = HashMap::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let mut body_bytes = buf[header_end + 4..].to_vec();
    while body_bytes.len() < content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body_bytes.extend_from_slice(&chunk[..n]);
    }

    let body = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    Some(RecordedRequest {
        method,
        path,
        query,
        headers,
        body,
    })
}

/// Finds the `\r\n\r\n` terminating the header block.
fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
