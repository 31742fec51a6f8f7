//! Exercises `StatsClient` against a real loopback HTTP listener.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use procdash::client::{ClientError, StatsClient};
use procdash::stats::snapshot::ProcessStatus;

/// Serves exactly one HTTP exchange on a loopback port, then shuts down.
/// Returns the base URL and the thread handle yielding the raw request.
fn serve_once(status_line: &str, body: &str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let response = format!(
        "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut buf = [0u8; 4096];
        let n = stream.read(&mut buf).unwrap_or(0);
        let request = String::from_utf8_lossy(&buf[..n]).to_string();
        stream.write_all(response.as_bytes()).expect("write response");
        request
    });

    (format!("http://{addr}"), handle)
}

fn client_for(base_url: &str) -> StatsClient {
    StatsClient::new(base_url, Duration::from_secs(2))
}

#[tokio::test(flavor = "current_thread")]
async fn fetch_parses_a_good_payload() {
    let body = r#"{
        "cpu_usage": 37.5,
        "memory_usage": 52.0,
        "memory_used": 2147483648,
        "memory_total": 8589934592,
        "processes": [
            {"pid": 12, "name": "nginx", "username": "www",
             "cpu_percent": 4.2, "memory_percent": 1.1, "status": "running"}
        ]
    }"#;
    let (base_url, server) = serve_once("HTTP/1.1 200 OK", body);

    let snapshot = client_for(&base_url).fetch_snapshot().await.expect("fetch");
    assert!((snapshot.cpu_usage - 37.5).abs() < f64::EPSILON);
    assert_eq!(snapshot.processes.len(), 1);
    assert_eq!(snapshot.processes[0].pid, 12);
    assert_eq!(snapshot.processes[0].status, ProcessStatus::Running);

    let request = server.join().expect("server thread");
    assert!(request.starts_with("GET /stats"));
    assert!(request.to_lowercase().contains("cache-control: no-store"));
}

#[tokio::test(flavor = "current_thread")]
async fn fetch_tolerates_partial_payload() {
    let (base_url, server) = serve_once("HTTP/1.1 200 OK", r#"{"processes": null}"#);

    let snapshot = client_for(&base_url).fetch_snapshot().await.expect("fetch");
    assert_eq!(snapshot.cpu_usage, 0.0);
    assert!(snapshot.processes.is_empty());
    server.join().expect("server thread");
}

#[tokio::test(flavor = "current_thread")]
async fn non_2xx_fetch_is_unreachable() {
    let (base_url, server) = serve_once("HTTP/1.1 500 Internal Server Error", "boom");

    let err = client_for(&base_url).fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, ClientError::Unreachable(_)));
    assert!(err.to_string().contains("500"));
    server.join().expect("server thread");
}

#[tokio::test(flavor = "current_thread")]
async fn garbage_body_is_unreachable() {
    let (base_url, server) = serve_once("HTTP/1.1 200 OK", "not json at all");

    let err = client_for(&base_url).fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, ClientError::Unreachable(_)));
    server.join().expect("server thread");
}

#[tokio::test(flavor = "current_thread")]
async fn connection_refused_is_unreachable() {
    // Bind then drop, so the port is very likely closed.
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("addr"));
    drop(listener);

    let err = client_for(&base_url).fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, ClientError::Unreachable(_)));
}

#[tokio::test(flavor = "current_thread")]
async fn kill_posts_to_the_pid_route() {
    let (base_url, server) = serve_once("HTTP/1.1 200 OK", r#"{"status":"terminated"}"#);

    client_for(&base_url).kill(4242).await.expect("kill");
    let request = server.join().expect("server thread");
    assert!(request.starts_with("POST /kill/4242"));
}

#[tokio::test(flavor = "current_thread")]
async fn rejected_kill_carries_status_and_body() {
    let (base_url, server) = serve_once("HTTP/1.1 404 Not Found", "Process not found");

    let err = client_for(&base_url).kill(1).await.unwrap_err();
    match err {
        ClientError::KillRejected { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Process not found");
        }
        other => panic!("expected KillRejected, got {other:?}"),
    }
    server.join().expect("server thread");
}
