//! Shared procedures and request helpers for server tests.
#![allow(dead_code)]

use reqwest::{Client, Method};
use stubhttp_server::{Headers, MockServer, Procedure, Recorder, ResponseTemplate};

/// Procedures mirroring a small account service.
pub fn procedures() -> Vec<Procedure> {
    vec![
        Procedure::new("GET", "/").respond_with(ResponseTemplate::new().with_body("getRoot")),
        Procedure::new("POST", "/").respond_with(ResponseTemplate::new().with_body("postRoot")),
        Procedure::new("GET", "/get/header").respond_with(
            ResponseTemplate::new()
                .with_status(202)
                .with_header("some-key", "some-value")
                .with_body("getResponseHeader"),
        ),
        Procedure::new("GET", "/get/auth")
            .respond_with(ResponseTemplate::new().with_body("getRootAuth")),
        Procedure::new("GET", "/my_account")
            .respond_with(ResponseTemplate::new().with_body("getAccount")),
        Procedure::new("GET", "/my_account.json")
            .respond_with(ResponseTemplate::new().with_body("getAccountJSON")),
    ]
}

pub async fn start() -> (MockServer, Recorder) {
    stubhttp_server::logging::init();
    let recorder = Recorder::new();
    let server = MockServer::start(&recorder, procedures())
        .await
        .expect("start mock server");
    (server, recorder)
}

/// Response status, headers and body as plain values.
pub struct Received {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}

pub async fn send(
    client: &Client,
    method: &str,
    url: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> Received {
    let method = Method::from_bytes(method.as_bytes()).expect("valid method");
    let mut request = client.request(method, url).body(body.to_owned());
    for (name, value) in headers {
        request = request.header(*name, *value);
    }

    let response = request.send().await.expect("send request");
    let status = response.status().as_u16();
    let mut received_headers = Headers::new();
    for (name, value) in response.headers() {
        received_headers
            .entry(name.as_str().to_owned())
            .or_default()
            .push(value.to_str().expect("ascii header").to_owned());
    }
    let body = response.bytes().await.expect("read body").to_vec();

    Received {
        status,
        headers: received_headers,
        body,
    }
}

pub fn h(pairs: &[(&str, &str)]) -> Headers {
    let mut headers = Headers::new();
    for (k, v) in pairs {
        headers
            .entry((*k).to_owned())
            .or_default()
            .push((*v).to_owned());
    }
    headers
}

/// Headers added by the client or the transport rather than by the test.
const TRANSPORT_HEADERS: &[&str] = &[
    "accept",
    "accept-encoding",
    "connection",
    "content-length",
    "content-type",
    "host",
    "transfer-encoding",
    "user-agent",
];

/// Recorded headers minus the ones the HTTP client adds on its own.
pub fn custom_headers(recorded: &Headers) -> Headers {
    recorded
        .iter()
        .filter(|(name, _)| !TRANSPORT_HEADERS.contains(&name.to_lowercase().as_str()))
        .map(|(name, values)| (name.clone(), values.clone()))
        .collect()
}
