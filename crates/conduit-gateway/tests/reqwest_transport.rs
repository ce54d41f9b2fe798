//! `ReqwestTransport` against a local one-shot HTTP server.

use std::sync::Arc;
use std::time::Duration;

use conduit_gateway::{ReqwestTransport, ServiceClient};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one canned response and return the base URL.
async fn serve_once(status_line: &'static str, body: &'static str) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut received = Vec::new();
        let mut buf = [0_u8; 1024];
        while !received.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => received.extend_from_slice(&buf[..n]),
            }
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    Ok(format!("http://{addr}"))
}

/// Answer one request with `201 Created` and hand back the raw request.
async fn capture_once() -> anyhow::Result<(String, JoinHandle<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return String::new();
        };
        let mut received = Vec::new();
        let mut buf = [0_u8; 1024];
        loop {
            let text = String::from_utf8_lossy(&received).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if received.len() >= header_end + 4 + length {
                    break;
                }
            }
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => received.extend_from_slice(&buf[..n]),
            }
        }
        let _ = socket
            .write_all(b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
            .await;
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&received).to_string()
    });

    Ok((format!("http://{addr}"), handle))
}

fn client(base_url: &str) -> anyhow::Result<ServiceClient> {
    let transport = ReqwestTransport::new(Duration::from_secs(5))?;
    Ok(ServiceClient::new(base_url, Arc::new(transport)))
}

#[tokio::test]
async fn decodes_successful_json_response() -> anyhow::Result<()> {
    let base = serve_once("200 OK", r#"{"data":{"id":"usr_1"}}"#).await?;

    let response = client(&base)?.get("/api/users/usr_1", &[]).await;

    assert!(response.is_success());
    assert_eq!(response.data, Some(json!({"id": "usr_1"})));
    Ok(())
}

#[tokio::test]
async fn not_found_is_a_failure_envelope() -> anyhow::Result<()> {
    let base = serve_once("404 Not Found", "").await?;

    let response = client(&base)?.get("/api/users/missing", &[]).await;

    assert!(!response.is_success());
    assert_eq!(response.error.as_deref(), Some("Service error: 404 Not Found"));
    Ok(())
}

#[tokio::test]
async fn refused_connection_is_a_failure_envelope() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let response = client(&format!("http://{addr}"))?
        .get("/api/users/usr_1", &[])
        .await;

    assert!(!response.is_success());
    assert!(!response.error_message().is_empty());
    Ok(())
}

#[tokio::test]
async fn post_sends_json_body_and_headers() -> anyhow::Result<()> {
    let (base, request) = capture_once().await?;

    let response = client(&base)?
        .post(
            "/api/articles",
            Some(&json!({"title": "Dragons"})),
            &[("X-User-ID", "usr_1")],
        )
        .await;
    let request = request.await?.to_ascii_lowercase();

    assert!(response.is_success());
    assert!(request.starts_with("post /api/articles http/1.1"));
    assert!(request.contains("content-type: application/json"));
    assert!(request.contains("x-user-id: usr_1"));
    assert!(request.ends_with(r#"{"title":"dragons"}"#));
    Ok(())
}
