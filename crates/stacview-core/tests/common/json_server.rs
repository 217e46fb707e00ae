//! Minimal HTTP/1.1 server for fetch pipeline integration tests.
//!
//! Serves a route table that can be filled in after startup (bodies often
//! need to reference the server's own base URL) and records every request
//! path so tests can assert how many requests actually hit the network.
//! Routes can delay their response to simulate a slow proxy.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Canned response for one path.
#[derive(Debug, Clone)]
pub struct Route {
    /// Status line tail, e.g. `"200 OK"` or `"404 Not Found"`.
    pub status: &'static str,
    pub content_type: &'static str,
    pub body: String,
    /// Optional delay before responding (slow-proxy simulation).
    pub delay: Option<Duration>,
}

impl Route {
    pub fn json(body: &str) -> Self {
        Self {
            status: "200 OK",
            content_type: "application/json",
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn status(status: &'static str, content_type: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: "204 No Content",
            content_type: "application/json",
            body: String::new(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Running server handle: base URL, mutable route table, request log.
pub struct Server {
    pub base_url: String,
    routes: Arc<Mutex<HashMap<String, Route>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Server {
    /// Registers (or replaces) the response for a path.
    pub fn route(&self, path: &str, route: Route) {
        self.routes.lock().unwrap().insert(path.to_string(), route);
    }

    /// Paths requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }
}

/// Starts a server in a background thread. Unknown paths get a JSON 404
/// with a `message` field. The server runs until the process exits.
pub fn start() -> Server {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<Mutex<HashMap<String, Route>>> = Arc::default();
    let requests: Arc<Mutex<Vec<String>>> = Arc::default();
    let table = Arc::clone(&routes);
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let table = Arc::clone(&table);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &table, &log));
        }
    });
    Server {
        base_url: format!("http://127.0.0.1:{}/", port),
        routes,
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &Mutex<HashMap<String, Route>>,
    log: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = match request_path(request) {
        Some(p) => p.to_string(),
        None => return,
    };
    log.lock().unwrap().push(path.clone());

    let route = routes.lock().unwrap().get(&path).cloned().unwrap_or_else(|| {
        Route::status(
            "404 Not Found",
            "application/json",
            r#"{"message": "no such resource"}"#,
        )
    });
    if let Some(delay) = route.delay {
        thread::sleep(delay);
    }

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        route.content_type,
        route.body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(route.body.as_bytes());
}

/// Request-target path from the request line, e.g. `/catalog`.
fn request_path(request: &str) -> Option<&str> {
    let line = request.lines().next()?;
    line.split_whitespace().nth(1)
}
