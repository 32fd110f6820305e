#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

// Common test constants
pub const TEST_FILE_SIZE: usize = 8052;
pub const TEST_PARTIAL_SIZE: usize = 3506;
pub const TEST_HEADER: &str = "x-installer";
pub const TEST_HEADER_VALUE: &str = "rangefetch-test";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// Asserts that a file holds exactly `expected`
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let actual = fs::read(path).expect("Failed to read file");
    assert_eq!(actual.len(), expected.len(), "File size mismatch at path: {:?}", path);
    assert!(actual == expected, "File content mismatch at path: {:?}", path);
}

// === Mock servers ===

/// Serves a resource the way a range-capable server does: `206` with the
/// requested tail when a `Range: bytes=N-` header asks for it, `200` with
/// the whole body otherwise.
pub struct RangeResponder {
    content: Vec<u8>,
}

impl RangeResponder {
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    fn requested_offset(request: &Request) -> Option<usize> {
        request
            .headers
            .get("range")?
            .to_str()
            .ok()?
            .strip_prefix("bytes=")?
            .strip_suffix('-')?
            .parse()
            .ok()
    }
}

impl Respond for RangeResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let len = self.content.len();
        match Self::requested_offset(request) {
            Some(offset) if offset < len => ResponseTemplate::new(206)
                .insert_header(
                    "content-range",
                    format!("bytes {}-{}/{}", offset, len - 1, len),
                )
                .set_body_bytes(self.content[offset..].to_vec()),
            Some(_) => ResponseTemplate::new(416)
                .insert_header("content-range", format!("bytes */{}", len)),
            None => ResponseTemplate::new(200).set_body_bytes(self.content.clone()),
        }
    }
}

/// Starts a server exposing `content` at `route` with range support.
pub async fn start_range_server(route: &str, content: Vec<u8>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(RangeResponder::new(content))
        .mount(&server)
        .await;
    server
}

/// Starts a server exposing `content` at `route` that ignores range requests.
pub async fn start_full_server(route: &str, content: Vec<u8>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .mount(&server)
        .await;
    server
}

/// Starts a server answering every GET on `route` with `status`.
pub async fn start_status_server(route: &str, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

/// Starts a bare HTTP/1.1 server streaming `content` in `chunk_size` pieces
/// with `delay` between them, then closing the connection.
///
/// With `advertise_length` unset the response carries no `Content-Length`,
/// so the body is delimited by the connection close. Range requests are
/// ignored. Returns the URL of the resource.
pub async fn start_streaming_server(
    content: Vec<u8>,
    chunk_size: usize,
    delay: Duration,
    advertise_length: bool,
) -> String {
    let mut headers = Vec::new();
    if advertise_length {
        headers.push(format!("Content-Length: {}", content.len()));
    }
    start_raw_server("200 OK", headers, content, chunk_size, delay).await
}

/// Starts a bare HTTP/1.1 server answering every request with `status`,
/// the given header lines and `body`, streamed like
/// [`start_streaming_server`] does. Nothing about the response is checked
/// against the body, so it can lie about ranges and lengths.
pub async fn start_raw_server(
    status: &'static str,
    headers: Vec<String>,
    body: Vec<u8>,
    chunk_size: usize,
    delay: Duration,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind streaming server");
    let addr = listener.local_addr().expect("Failed to read local address");

    let mut head = format!("HTTP/1.1 {}\r\nConnection: close\r\n", status);
    for header in &headers {
        head.push_str(header);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let head = head.clone();
            let body = body.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                if socket.write_all(head.as_bytes()).await.is_err() {
                    return;
                }

                for chunk in body.chunks(chunk_size.max(1)) {
                    tokio::time::sleep(delay).await;
                    if socket.write_all(chunk).await.is_err() {
                        return;
                    }
                    let _ = socket.flush().await;
                }
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}/stream.bin", addr)
}
