//! `GeminiLlm` and `GeminiClient` against a one-shot HTTP server on 127.0.0.1.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use pretty_assertions::assert_eq;
use ycs_ai::gemini::GeminiClient;
use ycs_ai::llm::gemini_llm::GeminiLlm;
use ycs_ai::llm::Llm;

struct Recorded {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Accept one connection, record the request, reply with `status` and a JSON `body`.
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<Recorded>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("addr"));
    let status = status.to_string();
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));

        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("request line");
        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("header");
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
            }
        }
        let len = headers
            .iter()
            .find(|(n, _)| n == "content-length")
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(0);
        let mut request_body = vec![0u8; len];
        reader.read_exact(&mut request_body).expect("body");

        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .expect("write response");
        stream.flush().expect("flush");

        Recorded {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: String::from_utf8(request_body).expect("utf8 body"),
        }
    });
    (base_url, handle)
}

fn llm(base_url: &str) -> GeminiLlm {
    GeminiLlm::new(GeminiClient::new(base_url, "gm-key").expect("client"))
}

#[test]
fn posts_prompt_and_joins_candidate_parts() {
    let reply = r#"{"candidates":[{"content":{"role":"model","parts":[
        {"text":"1. Good\n"},{"text":"2. Bad"}]},"finishReason":"STOP"}]}"#;
    let (base_url, server) = serve_once("200 OK", reply);

    let prompt = "Classify:\n1. \"chala bagundi\"\n2. \"worst\"";
    let text = llm(&base_url)
        .generate("gemini-2.5-flash", prompt)
        .expect("generate");
    let seen = server.join().expect("server");

    assert_eq!(text, "1. Good\n2. Bad");
    assert_eq!(
        seen.request_line,
        "POST /v1beta/models/gemini-2.5-flash:generateContent HTTP/1.1"
    );
    assert_eq!(seen.header("x-goog-api-key"), Some("gm-key"));
    assert!(!seen.request_line.contains("gm-key"));

    let sent: serde_json::Value = serde_json::from_str(&seen.body).expect("json body");
    assert_eq!(sent["contents"][0]["role"], "user");
    assert_eq!(sent["contents"][0]["parts"][0]["text"], prompt);
}

#[test]
fn blocked_prompt_is_empty_response_with_reason() {
    let (base_url, server) =
        serve_once("200 OK", r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);

    let err = llm(&base_url)
        .generate("gemini-2.5-flash", "1. \"x\"")
        .expect_err("blocked");
    server.join().expect("server");

    assert_eq!(err.code, "CLASSIFY_EMPTY_RESPONSE");
    assert_eq!(err.details.as_deref(), Some("reason=SAFETY"));
}

#[test]
fn candidate_without_text_reports_finish_reason() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"candidates":[{"content":{"parts":[]},"finishReason":"MAX_TOKENS"}]}"#,
    );

    let err = llm(&base_url)
        .generate("gemini-2.5-flash", "1. \"x\"")
        .expect_err("empty");
    server.join().expect("server");

    assert_eq!(err.code, "CLASSIFY_EMPTY_RESPONSE");
    assert_eq!(err.details.as_deref(), Some("reason=MAX_TOKENS"));
}

#[test]
fn rate_limit_is_retryable_classify_failure() {
    let (base_url, server) = serve_once(
        "429 Too Many Requests",
        r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#,
    );

    let err = llm(&base_url)
        .generate("gemini-2.5-flash", "1. \"x\"")
        .expect_err("rate limited");
    server.join().expect("server");

    assert_eq!(err.code, "CLASSIFY_FAILED");
    assert!(err.retryable);
    let details = err.details.unwrap_or_default();
    assert!(details.contains("status=429"), "{details}");
    assert!(details.contains("Resource has been exhausted"), "{details}");
}

#[test]
fn bad_request_is_not_retryable() {
    let (base_url, server) = serve_once(
        "400 Bad Request",
        r#"{"error":{"code":400,"message":"API key not valid"}}"#,
    );

    let err = llm(&base_url)
        .generate("gemini-2.5-flash", "1. \"x\"")
        .expect_err("rejected");
    server.join().expect("server");

    assert_eq!(err.code, "CLASSIFY_FAILED");
    assert!(!err.retryable);
}

#[test]
fn health_check_lists_one_model() {
    let (base_url, server) = serve_once("200 OK", r#"{"models":[]}"#);
    let client = GeminiClient::new(&base_url, "gm-key").expect("client");

    client.health_check().expect("healthy");
    let seen = server.join().expect("server");

    assert_eq!(seen.request_line, "GET /v1beta/models?pageSize=1 HTTP/1.1");
    assert_eq!(seen.header("x-goog-api-key"), Some("gm-key"));
}

#[test]
fn health_check_rejection_is_unhealthy() {
    let (base_url, server) = serve_once("403 Forbidden", r#"{"error":{"message":"denied"}}"#);
    let client = GeminiClient::new(&base_url, "gm-key").expect("client");

    let err = client.health_check().expect_err("unhealthy");
    server.join().expect("server");

    assert_eq!(err.code, "AI_GEMINI_UNHEALTHY");
    assert_eq!(err.details.as_deref(), Some("status=403"));
}

#[test]
fn unreachable_server_is_retryable() {
    // Bind then drop to get a local port with nothing listening.
    let port = TcpListener::bind("127.0.0.1:0")
        .expect("bind")
        .local_addr()
        .expect("addr")
        .port();
    let client = GeminiClient::new(&format!("http://127.0.0.1:{port}"), "gm-key").expect("client");

    let err = client.health_check().expect_err("unreachable");
    assert_eq!(err.code, "AI_GEMINI_UNREACHABLE");
    assert!(err.retryable);
}
