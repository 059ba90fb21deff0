//! In-process JSON-RPC nodes for seed selection tests

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub enum Behaviour {
    /// Answer `getblockcount` with `height` after `delay`
    Height { height: u64, delay: Duration },
    /// Reply with a bare HTTP status
    Status(u16),
    /// Reply 200 with an arbitrary body
    Body(String),
    /// Accept the connection and never answer
    Hang,
}

pub struct MockNode {
    pub url: String,
    hits: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl MockNode {
    pub async fn spawn(behaviour: Behaviour) -> MockNode {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let behaviour = behaviour.clone();
                let counter = counter.clone();
                tokio::spawn(async move {
                    serve(stream, behaviour, counter).await;
                });
            }
        });
        MockNode {
            url: format!("http://{addr}"),
            hits,
            handle,
        }
    }

    pub async fn height(height: u64, delay_ms: u64) -> MockNode {
        Self::spawn(Behaviour::Height {
            height,
            delay: Duration::from_millis(delay_ms),
        })
        .await
    }

    /// Requests that reached the node
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A URL on a port nobody listens on
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

async fn read_request_body(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        if let Some(end) = find_header_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let body_start = end + 4;
            while buf.len() < body_start + length {
                let n = stream.read(&mut chunk).await.ok()?;
                if n == 0 {
                    return None;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            return Some(buf[body_start..body_start + length].to_vec());
        }
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

async fn respond(stream: &mut TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

async fn serve(mut stream: TcpStream, behaviour: Behaviour, hits: Arc<AtomicUsize>) {
    let Some(body) = read_request_body(&mut stream).await else {
        return;
    };
    hits.fetch_add(1, Ordering::SeqCst);

    match behaviour {
        Behaviour::Height { height, delay } => {
            let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            tokio::time::sleep(delay).await;
            let reply = if request["method"] == "getblockcount" && request["jsonrpc"] == "2.0" {
                json!({"jsonrpc": "2.0", "id": request["id"], "result": height})
            } else {
                json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32601, "message": "Method not found"}})
            };
            respond(&mut stream, "200 OK", &reply.to_string()).await;
        }
        Behaviour::Status(code) => {
            respond(&mut stream, &format!("{code} Mock Status"), "").await;
        }
        Behaviour::Body(body) => {
            respond(&mut stream, "200 OK", &body).await;
        }
        Behaviour::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    }
}
