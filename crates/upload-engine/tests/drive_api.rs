//! Drive backend behavior against a local stub of the Drive v3 API.
//!
//! A tiny HTTP/1.1 responder on a loopback port stands in for both the
//! metadata and upload endpoints, counting requests so the tests can
//! assert call shapes (lookup-before-create, single upload, sharing).

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use certmill_render_engine::Artifact;
use certmill_roster_model::{sample_roster, UploadConfig};
use certmill_upload_engine::{DriveBackend, UploadBackend};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Default)]
struct DriveStub {
    folder_exists: AtomicBool,
    fail_uploads: AtomicBool,
    lookups: AtomicUsize,
    creates: AtomicUsize,
    uploads: AtomicUsize,
    shares: AtomicUsize,
}

impl DriveStub {
    fn respond(&self, method: &str, target: &str) -> (u16, &'static str) {
        if target.starts_with("/upload/drive/v3/files") {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            if self.fail_uploads.load(Ordering::SeqCst) {
                return (503, r#"{"error":"backend unavailable"}"#);
            }
            return (200, r#"{"id":"file-9"}"#);
        }
        if method == "POST" && target.contains("/permissions") {
            self.shares.fetch_add(1, Ordering::SeqCst);
            return (200, "{}");
        }
        if method == "GET" && target.starts_with("/drive/v3/files") {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.folder_exists.load(Ordering::SeqCst) {
                return (200, r#"{"files":[{"id":"folder-1","name":"certificates"}]}"#);
            }
            return (200, r#"{"files":[]}"#);
        }
        if method == "POST" && target.starts_with("/drive/v3/files") {
            self.creates.fetch_add(1, Ordering::SeqCst);
            self.folder_exists.store(true, Ordering::SeqCst);
            return (200, r#"{"id":"folder-1"}"#);
        }
        (404, "{}")
    }
}

/// Bind a loopback listener, serve the stub in the background, and hand
/// back the base URL to point the backend at.
async fn serve(stub: Arc<DriveStub>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(handle(socket, stub.clone()));
        }
    });
    format!("http://{addr}")
}

async fn handle(mut socket: TcpStream, stub: Arc<DriveStub>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let Ok(n) = socket.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    // Drain the request body before responding.
    let mut body_read = buf.len() - header_end;
    while body_read < content_length {
        let Ok(n) = socket.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            break;
        }
        body_read += n;
    }

    let (status, body) = stub.respond(&method, &target);
    let reason = match status {
        200 => "OK",
        503 => "Service Unavailable",
        _ => "Not Found",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    socket.write_all(response.as_bytes()).await.ok();
    socket.shutdown().await.ok();
}

fn backend_for(base: &str, config: &UploadConfig) -> DriveBackend {
    DriveBackend::with_base_urls(
        config,
        format!("{base}/drive/v3"),
        format!("{base}/upload/drive/v3"),
    )
}

fn artifact() -> Artifact {
    let entry = sample_roster().remove(0);
    let filename = entry.certificate_filename();
    Artifact {
        entry,
        filename,
        png: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

#[tokio::test]
async fn upload_to_existing_folder_succeeds_without_creating_one() {
    let stub = Arc::new(DriveStub::default());
    stub.folder_exists.store(true, Ordering::SeqCst);
    let base = serve(stub.clone()).await;
    let backend = backend_for(&base, &UploadConfig::default());

    let outcome = backend.upload(&artifact(), Some("token")).await;

    assert!(outcome.is_success(), "error: {:?}", outcome.error());
    assert_eq!(
        outcome.url(),
        Some("https://drive.google.com/file/d/file-9/view")
    );
    assert!(outcome.uploaded_at().is_some());
    assert_eq!(stub.creates.load(Ordering::SeqCst), 0);
    assert_eq!(stub.uploads.load(Ordering::SeqCst), 1);
    // Default config asks for public links, so one permission grant.
    assert_eq!(stub.shares.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_folder_is_created_exactly_once() {
    let stub = Arc::new(DriveStub::default());
    let base = serve(stub.clone()).await;
    let backend = backend_for(&base, &UploadConfig::default());

    let first = backend.ensure_container(Some("token")).await.unwrap();
    let second = backend.ensure_container(Some("token")).await.unwrap();

    assert_eq!(first, "folder-1");
    assert_eq!(second, "folder-1");
    assert_eq!(stub.lookups.load(Ordering::SeqCst), 2);
    assert_eq!(stub.creates.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn server_rejection_becomes_a_failure_outcome() {
    let stub = Arc::new(DriveStub::default());
    stub.folder_exists.store(true, Ordering::SeqCst);
    stub.fail_uploads.store(true, Ordering::SeqCst);
    let base = serve(stub.clone()).await;
    let backend = backend_for(&base, &UploadConfig::default());

    let outcome = backend.upload(&artifact(), Some("token")).await;

    assert!(!outcome.is_success());
    assert!(outcome.error().unwrap().contains("backend unavailable"));
}

#[tokio::test]
async fn public_link_sharing_is_skipped_when_disabled() {
    let stub = Arc::new(DriveStub::default());
    stub.folder_exists.store(true, Ordering::SeqCst);
    let base = serve(stub.clone()).await;
    let config = UploadConfig {
        generate_public_links: false,
        ..UploadConfig::default()
    };
    let backend = backend_for(&base, &config);

    let outcome = backend.upload(&artifact(), Some("token")).await;

    assert!(outcome.is_success());
    assert_eq!(stub.shares.load(Ordering::SeqCst), 0);
}
