//! Common test utilities for ruleshare integration tests

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use tempfile::TempDir;

/// A test workspace for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Read shared.lock as JSON
    pub fn read_lock_json(&self) -> serde_json::Value {
        let raw = self.read_file(".claude/rules/shared.lock");
        serde_json::from_str(&raw).expect("Failed to parse shared.lock")
    }

    /// Raw bytes of shared.lock, for byte-stability assertions
    pub fn read_lock_bytes(&self) -> Vec<u8> {
        std::fs::read(self.path.join(".claude/rules/shared.lock")).expect("Failed to read lock")
    }
}

/// Minimal single-threaded HTTP server serving canned bodies per path
///
/// Lets sync tests run fully offline while exercising the real blocking
/// HTTP client. Bodies can be swapped between requests to simulate remote
/// drift.
#[allow(dead_code)]
pub struct FixtureServer {
    addr: SocketAddr,
    routes: Arc<Mutex<HashMap<String, String>>>,
}

#[allow(dead_code)]
impl FixtureServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind fixture server");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let routes: Arc<Mutex<HashMap<String, String>>> = Arc::new(Mutex::new(HashMap::new()));

        let handler_routes = Arc::clone(&routes);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                handle_request(stream, &handler_routes);
            }
        });

        Self { addr, routes }
    }

    /// Full URL for a server path (path must start with `/`)
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Set or replace the body served for a path
    pub fn set_body(&self, path: &str, body: &str) {
        self.routes
            .lock()
            .expect("routes poisoned")
            .insert(path.to_string(), body.to_string());
    }

    /// Stop serving a path (requests get a 404)
    pub fn remove(&self, path: &str) {
        self.routes.lock().expect("routes poisoned").remove(path);
    }
}

fn handle_request(mut stream: TcpStream, routes: &Arc<Mutex<HashMap<String, String>>>) {
    let mut buffer = [0u8; 4096];
    let Ok(read) = stream.read(&mut buffer) else {
        return;
    };

    let request = String::from_utf8_lossy(&buffer[..read]);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let body = routes.lock().expect("routes poisoned").get(&path).cloned();
    let response = match body {
        Some(body) => format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ),
        None => {
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
        }
    };

    let _ = stream.write_all(response.as_bytes());
}
