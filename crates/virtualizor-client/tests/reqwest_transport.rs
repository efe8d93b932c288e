use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use virtualizor_client::*;

// Minimal panel: answers one request with a canned response and hands back
// the raw request text
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;
        request
    });

    (format!("http://{addr}"), handle)
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .map_or(0, |value| value.trim().parse::<usize>().unwrap());
        if buf.len() >= end + 4 + length {
            break;
        }
    }
    String::from_utf8(buf).unwrap()
}

fn client(api: &str, key: &str, secret: &str) -> PanelClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    PanelClient::with_transport(
        ClientConfig::new(api, key, secret),
        ReqwestTransport::with_client(http),
    )
}

#[tokio::test]
async fn test_get_request_line() {
    let (api, server) = serve_once(
        "200 OK",
        r#"{"info":{"ip":"1.2.3.4","vps":{"os_name":"alma"},"bandwidth":{}}}"#,
    )
    .await;

    let details = client(&api, "key", "secret")
        .get_server_details(101)
        .await
        .unwrap()
        .normalized()
        .unwrap();
    assert_eq!(details.os, Some(json!("alma")));

    let request = server.await.unwrap();
    assert!(request.starts_with(
        "GET /index.php?act=vpsmanage&api=json&apikey=key&apipass=secret&svs=101 HTTP/1.1\r\n"
    ));
}

#[tokio::test]
async fn test_non_success_status_maps_to_api_error() {
    let (api, server) = serve_once("500 Internal Server Error", "oops").await;

    let err = client(&api, "key", "secret").get_cpu(7).await.unwrap_err();
    assert!(
        matches!(err, ClientError::Api { status: 500, ref message } if message == "oops"),
        "unexpected error: {err:?}"
    );
    server.await.unwrap();
}

#[tokio::test]
async fn test_undecodable_body_hides_credentials() {
    let (api, server) = serve_once("200 OK", "<html>not json").await;

    let err = client(&api, "k3y-value", "s3cr3t-pass")
        .get_cpu(7)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(_)), "unexpected error: {err:?}");

    let display = err.to_string();
    let debug = format!("{err:?}");
    for text in [&display, &debug] {
        assert!(!text.contains("s3cr3t-pass"), "secret leaked: {text}");
        assert!(!text.contains("k3y-value"), "key leaked: {text}");
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_failure_hides_credentials() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"), "k3y-value", "s3cr3t-pass")
        .list_servers()
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(_)), "unexpected error: {err:?}");
    assert!(!err.to_string().contains("s3cr3t-pass"));
}

#[tokio::test]
async fn test_credentials_are_query_encoded() {
    let (api, server) =
        serve_once("200 OK", r#"{"cpu":{"usage":3},"time_taken":"0.1","vpsid":"7"}"#).await;

    let cpu = client(&api, "k&y+1", "p w").get_cpu(7).await.unwrap();
    assert_eq!(cpu.cpu, Some(json!({ "usage": 3 })));

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.contains("apikey=k%26y%2B1"), "{request_line}");
    assert!(request_line.contains("apipass=p+w"), "{request_line}");
}

#[tokio::test]
async fn test_bandwidth_form_on_the_wire() {
    let (api, server) = serve_once(
        "200 OK",
        r#"{"bandwidth":{"used":10},"time_taken":"0.2","vpsid":"7"}"#,
    )
    .await;

    let report = client(&api, "key", "secret")
        .get_bandwidth(7, 3)
        .await
        .unwrap();
    assert_eq!(report.bandwidth, Some(json!({ "used": 10 })));

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("POST /index.php?"), "{request_line}");
    assert!(request_line.contains("act=bandwidth"));
    assert!(request_line.contains("svs=7"));
    assert!(
        request
            .to_lowercase()
            .contains("content-type: application/x-www-form-urlencoded\r\n")
    );
    assert!(request.ends_with("\r\n\r\nshow=3"), "{request}");
}
