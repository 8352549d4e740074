//! `HttpSearchClient` against a one-shot local HTTP stub.

use catsearch::{HttpSearchClient, SearchClient, SearchError};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Serve exactly one request with `status` and `body`; the handle yields
/// the request line that was received.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();

        let text = String::from_utf8_lossy(&request).to_string();
        text.lines().next().unwrap_or_default().to_string()
    });

    (base_url, handle)
}

const TWO_HITS: &str = r#"{
    "found": 14,
    "hits": [
        {"document": {"id": "1", "title": "Trail Shoe", "price": 12999, "productType": "Shoes",
                      "inventoryQuantity": 4, "image": {"src": "https://cdn.example.com/1.png"}}},
        {"document": {"title": "Mystery Box", "price": 500, "inventoryQuantity": -1}}
    ]
}"#;

#[test]
fn fetches_and_decodes_a_page() {
    let (base_url, server) = serve_once("200 OK", TWO_HITS);
    let client = HttpSearchClient::new(format!("{}/", base_url)).unwrap();

    let page = client.search("trail shoe", 2, 12).unwrap();
    let request_line = server.join().unwrap();

    assert_eq!(request_line, "GET /search?q=trail+shoe&page=2&pageSize=12 HTTP/1.1");
    assert_eq!(page.total_found, 14);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].image_url(), Some("https://cdn.example.com/1.png"));
    assert_eq!(page.items[1].id, None);
    assert_eq!(page.items[1].product_type, "");
    assert_eq!(page.items[1].image_url(), None);
}

#[test]
fn empty_query_is_sent_as_wildcard() {
    let (base_url, server) = serve_once("200 OK", r#"{"found": 0, "hits": []}"#);
    let client = HttpSearchClient::new(base_url).unwrap();

    let page = client.search("", 1, 12).unwrap();
    assert!(page.items.is_empty());
    assert_eq!(
        server.join().unwrap(),
        "GET /search?q=*&page=1&pageSize=12 HTTP/1.1"
    );
}

#[test]
fn error_status_carries_server_message() {
    let (base_url, server) = serve_once(
        "500 Internal Server Error",
        r#"{"message": "index unavailable"}"#,
    );
    let client = HttpSearchClient::new(base_url).unwrap();

    let err = client.search("shoe", 1, 12).unwrap_err();
    server.join().unwrap();
    assert_eq!(
        err,
        SearchError::Http {
            status: 500,
            message: Some("index unavailable".to_string())
        }
    );
}

#[test]
fn error_status_without_message_reports_code() {
    let (base_url, server) = serve_once("503 Service Unavailable", "");
    let client = HttpSearchClient::new(base_url).unwrap();

    let err = client.search("shoe", 1, 12).unwrap_err();
    server.join().unwrap();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.message(), "HTTP error! status: 503");
}

#[test]
fn unreachable_backend_is_network_error() {
    // Grab a free port, then close it again
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = HttpSearchClient::new(format!("http://127.0.0.1:{}", port)).unwrap();

    let err = client.search("shoe", 1, 12).unwrap_err();
    assert!(matches!(err, SearchError::Network(_)), "got {:?}", err);
}
