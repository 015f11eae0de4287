// SPDX-License-Identifier: MPL-2.0
//! REST gateway against a one-shot local HTTP server.

use image_depot::application::port::{ImageGateway, TransferError};
use image_depot::domain::image::{ImageId, ImageRecord};
use image_depot::domain::upload::SelectedFile;
use image_depot::infrastructure::RemoteGateway;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug)]
struct Request {
    method: String,
    path: String,
    /// Header block, lowercased.
    headers: String,
    body: Vec<u8>,
}

impl Request {
    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn response(status: &str, headers: &[(&str, &str)], body: &[u8]) -> Vec<u8> {
    let mut head = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n",
        body.len()
    );
    for (name, value) in headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str("\r\n");
    let mut bytes = head.into_bytes();
    bytes.extend_from_slice(body);
    bytes
}

fn json_response(status: &str, body: &str) -> Vec<u8> {
    response(status, &[("Content-Type", "application/json")], body.as_bytes())
}

/// Accepts one connection, records the request and replies with `reply`.
async fn serve_once(reply: Vec<u8>) -> (String, JoinHandle<Request>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base_url = format!("http://{}/api/images", listener.local_addr().expect("addr"));

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.expect("read");
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find(&buf, b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.lines();
        let request_line = lines.next().expect("request line").to_string();
        let mut parts = request_line.split_whitespace();
        let method = parts.next().expect("method").to_string();
        let path = parts.next().expect("path").to_string();
        let headers = lines.collect::<Vec<_>>().join("\n").to_lowercase();

        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .map(|value| value.trim().parse::<usize>().expect("length"));
        let chunked = headers.contains("transfer-encoding: chunked");

        loop {
            let received = buf.len() - header_end;
            let complete = match content_length {
                Some(length) => received >= length,
                None if chunked => find(&buf[header_end..], b"0\r\n\r\n").is_some(),
                None => true,
            };
            if complete {
                break;
            }
            let n = socket.read(&mut chunk).await.expect("read body");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        socket.write_all(&reply).await.expect("write reply");
        socket.shutdown().await.ok();

        Request {
            method,
            path,
            headers,
            body: buf[header_end..].to_vec(),
        }
    });

    (base_url, handle)
}

fn gateway(base_url: &str) -> RemoteGateway {
    RemoteGateway::new(base_url).expect("client")
}

#[tokio::test]
async fn list_gets_base_path() {
    let (url, server) = serve_once(json_response(
        "200 OK",
        r#"[{"id":1,"fileName":"a.png","data":"AAAA"},{"id":2,"fileName":"b.gif","data":null}]"#,
    ))
    .await;

    let images = gateway(&url).list().await.expect("list");
    let request = server.await.expect("server task");

    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/images");
    assert_eq!(
        images,
        vec![
            ImageRecord::new(ImageId::new(1), "a.png", "AAAA"),
            ImageRecord::new(ImageId::new(2), "b.gif", ""),
        ]
    );
}

#[tokio::test]
async fn upload_posts_multipart_file_field() {
    let (url, server) = serve_once(json_response(
        "200 OK",
        r#"{"id":7,"fileName":"a.png","data":"iVBO"}"#,
    ))
    .await;
    let file = SelectedFile::in_memory("a.png", "image/png", b"PNGDATA".to_vec());

    let record = gateway(&url).upload(&file).await.expect("upload");
    let request = server.await.expect("server task");

    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/images");
    assert!(request.headers.contains("content-type: multipart/form-data"));
    let body = request.body_text();
    assert!(body.contains(r#"name="file""#), "body: {body}");
    assert!(body.contains(r#"filename="a.png""#));
    assert!(body.contains("Content-Type: image/png"));
    assert!(body.contains("PNGDATA"));
    assert_eq!(record.id, ImageId::new(7));
}

#[tokio::test]
async fn replace_puts_to_item_path() {
    let (url, server) = serve_once(json_response(
        "200 OK",
        r#"{"id":5,"fileName":"b.webp","data":"UklG"}"#,
    ))
    .await;
    let file = SelectedFile::in_memory("b.webp", "image/webp", b"RIFF".to_vec());

    let record = gateway(&url)
        .replace(ImageId::new(5), &file)
        .await
        .expect("replace");
    let request = server.await.expect("server task");

    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/api/images/5");
    assert!(request.body_text().contains(r#"name="file""#));
    assert_eq!(record.id, ImageId::new(5));
    assert_eq!(record.file_name, "b.webp");
}

#[tokio::test]
async fn delete_sends_delete() {
    let (url, server) = serve_once(response("200 OK", &[], b"")).await;

    gateway(&url).delete(ImageId::new(3)).await.expect("delete");
    let request = server.await.expect("server task");

    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/api/images/3");
}

#[tokio::test]
async fn missing_image_maps_to_not_found() {
    let (url, server) = serve_once(response("404 Not Found", &[], b"")).await;

    let result = gateway(&url).fetch(ImageId::new(12)).await;
    let request = server.await.expect("server task");

    assert_eq!(request.path, "/api/images/12");
    assert_eq!(result, Err(TransferError::NotFound));
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let (url, server) = serve_once(response("500 Internal Server Error", &[], b"boom")).await;

    let result = gateway(&url).delete(ImageId::new(1)).await;
    server.await.expect("server task");

    assert_eq!(result, Err(TransferError::Status(500)));
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let (url, server) = serve_once(json_response("200 OK", "not json")).await;

    let result = gateway(&url).list().await;
    server.await.expect("server task");

    assert!(matches!(result, Err(TransferError::Decode(_))), "{result:?}");
}

#[tokio::test]
async fn download_uses_content_disposition() {
    let (url, server) = serve_once(response(
        "200 OK",
        &[
            ("Content-Type", "image/gif"),
            ("Content-Disposition", r#"attachment; filename="party.gif""#),
        ],
        b"GIF89a",
    ))
    .await;

    let image = gateway(&url).download(ImageId::new(4)).await.expect("download");
    let request = server.await.expect("server task");

    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/images/download/4");
    assert_eq!(image.file_name, "party.gif");
    assert_eq!(image.content_type, "image/gif");
    assert_eq!(image.bytes, b"GIF89a".to_vec());
}

#[tokio::test]
async fn download_without_headers_falls_back() {
    let (url, server) = serve_once(response("200 OK", &[], &[1, 2, 3])).await;

    let image = gateway(&url).download(ImageId::new(4)).await.expect("download");
    server.await.expect("server task");

    assert_eq!(image.file_name, "image.jpg");
    assert_eq!(image.content_type, "image/jpeg");
    assert_eq!(image.bytes, vec![1, 2, 3]);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let url = format!("http://{}/api/images", listener.local_addr().expect("addr"));
    drop(listener);

    let result = gateway(&url).list().await;

    assert!(matches!(result, Err(TransferError::Transport(_))), "{result:?}");
}
