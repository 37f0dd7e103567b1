//! 共享测试工具：本地桩节点

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use lxd_connector_client::NodeEndpoint;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub const TEST_API_KEY: &str = "test-api-key-12345";

/// 桩节点收到的原始请求
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// 请求行 + 头部（原样）
    pub head: String,
    /// 请求体
    pub body: String,
}

impl CapturedRequest {
    /// 请求行，如 `GET /api/getinfo?hostname=c1 HTTP/1.1`
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    /// 按名称（大小写不敏感）读取请求头
    pub fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }
}

/// 桩节点的应答方式
pub enum Reply {
    /// 返回给定状态码与响应体
    Respond { status: u16, body: String },
    /// 读取请求后不作应答，保持连接直到给定时长
    Hang(Duration),
}

/// 启动一个只处理一次请求的桩节点
pub async fn spawn_node(reply: Reply) -> (NodeEndpoint, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub node");
    let addr = listener.local_addr().expect("stub node address");

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept connection");
        let captured = read_request(&mut stream).await;

        match reply {
            Reply::Respond { status, body } => {
                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream
                    .write_all(response.as_bytes())
                    .await
                    .expect("write response");
                let _ = stream.shutdown().await;
            }
            Reply::Hang(duration) => {
                tokio::time::sleep(duration).await;
            }
        }

        captured
    });

    (endpoint_for(addr), handle)
}

/// 一个确定无人监听的地址
pub async fn unreachable_node() -> NodeEndpoint {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    endpoint_for(addr)
}

fn endpoint_for(addr: SocketAddr) -> NodeEndpoint {
    NodeEndpoint::new(addr.ip().to_string(), addr.port(), TEST_API_KEY)
}

async fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.expect("read request");
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end.min(buf.len())]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.expect("read body");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = (header_end + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[header_end.min(buf.len())..body_end]).to_string();

    CapturedRequest {
        head: head.trim_end().to_string(),
        body,
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
