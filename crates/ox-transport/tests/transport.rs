use std::time::Duration;

use ox_transport::{
    BearerAuth, Endpoint, HttpMethod, Method, MultipartForm, OperationOutput, RawRequest,
    RequestContext, RequestInterceptor, Transport, TransportError,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

#[derive(Debug, Serialize)]
struct Ping<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Pong {
    echo: String,
}

fn transport(server: &MockServer) -> Transport {
    Transport::new(reqwest::Client::new(), format!("{}/v1", server.uri()))
        .with_interceptor(BearerAuth::new("sk-test"))
}

struct OperationHeader;

impl RequestInterceptor for OperationHeader {
    fn intercept(
        &self,
        ctx: &RequestContext,
        headers: &mut HeaderMap,
    ) -> Result<(), TransportError> {
        let value = HeaderValue::from_str(&ctx.operation_id)
            .map_err(|e| TransportError::InvalidHeader(e.to_string()))?;
        headers.insert("x-operation", value);
        Ok(())
    }
}

#[test]
fn test_url_joining() {
    let transport = Transport::new(reqwest::Client::new(), "https://api.example.com/v1/");
    assert_eq!(
        transport.url_for("/chat/completions"),
        "https://api.example.com/v1/chat/completions"
    );
    assert_eq!(transport.base_url(), "https://api.example.com/v1/");
}

#[test]
fn test_http_method_conversion() {
    assert_eq!(Method::from(HttpMethod::Get), Method::GET);
    assert_eq!(Method::from(HttpMethod::Post), Method::POST);
    assert_eq!(Method::from(HttpMethod::Put), Method::PUT);
    assert_eq!(Method::from(HttpMethod::Delete), Method::DELETE);
    assert_eq!(Method::from(HttpMethod::Patch), Method::PATCH);
}

#[test]
fn test_endpoint_creation() {
    let endpoint = Endpoint::post("createSpeech", "audio/speech");
    assert_eq!(endpoint.path, "audio/speech");
    assert_eq!(endpoint.method, HttpMethod::Post);
    assert_eq!(endpoint.operation_id, "createSpeech");
}

#[test]
fn test_operation_output_map() {
    let ok: OperationOutput<u32> = OperationOutput::Ok(2);
    assert_eq!(ok.map(|v| v * 2), OperationOutput::Ok(4));

    let undocumented: OperationOutput<u32> = OperationOutput::Undocumented {
        status_code: 500,
        payload: "boom".into(),
    };
    let mapped = undocumented.map(|v| v * 2);
    assert!(!mapped.is_ok());
    assert!(matches!(
        mapped,
        OperationOutput::Undocumented { status_code: 500, .. }
    ));
}

#[tokio::test]
async fn test_json_operation_adds_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/echo"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_json(json!({ "message": "hi" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "echo": "hi" })))
        .expect(1)
        .mount(&server)
        .await;

    let output: OperationOutput<Pong> = transport(&server)
        .execute_json(&Endpoint::post("echo", "echo"), &Ping { message: "hi" })
        .await
        .unwrap();

    assert_eq!(
        output,
        OperationOutput::Ok(Pong {
            echo: "hi".to_string()
        })
    );
}

#[tokio::test]
async fn test_interceptors_run_in_order_with_context() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/echo"))
        .and(header("x-operation", "echoOperation"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "echo": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let output: OperationOutput<Pong> = transport(&server)
        .with_interceptor(OperationHeader)
        .execute_json(
            &Endpoint::post("echoOperation", "/echo"),
            &Ping { message: "ok" },
        )
        .await
        .unwrap();

    assert!(output.is_ok());
}

#[tokio::test]
async fn test_non_success_is_undocumented_with_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/echo"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let output: OperationOutput<Pong> = transport(&server)
        .execute_json(&Endpoint::post("echo", "echo"), &Ping { message: "hi" })
        .await
        .unwrap();

    match output {
        OperationOutput::Undocumented {
            status_code,
            payload,
        } => {
            assert_eq!(status_code, 429);
            assert_eq!(&payload[..], b"slow down");
        }
        OperationOutput::Ok(_) => panic!("expected undocumented response"),
    }
}

#[tokio::test]
async fn test_success_with_wrong_shape_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/echo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let result: Result<OperationOutput<Pong>, _> = transport(&server)
        .execute_json(&Endpoint::post("echo", "echo"), &Ping { message: "hi" })
        .await;

    match result {
        Err(TransportError::Decode { status_code, body, .. }) => {
            assert_eq!(status_code, 200);
            assert!(body.contains("unexpected"));
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_binary_operation_collects_whole_body() {
    let server = MockServer::start().await;
    let audio: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();
    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/aac")
                .set_body_bytes(audio.clone()),
        )
        .mount(&server)
        .await;

    let output = transport(&server)
        .execute_binary(
            &Endpoint::post("createSpeech", "audio/speech"),
            &json!({ "input": "hello" }),
        )
        .await
        .unwrap();

    match output {
        OperationOutput::Ok(bytes) => assert_eq!(&bytes[..], &audio[..]),
        OperationOutput::Undocumented { status_code, .. } => {
            panic!("unexpected status {status_code}")
        }
    }
}

#[tokio::test]
async fn test_raw_request_skips_interceptors() {
    let server = MockServer::start().await;
    let form = MultipartForm::with_boundary("Boundary-test")
        .file("file", "a.txt", "abc", "text/plain")
        .text("model", "whisper-1");
    let body = form.encode();

    Mock::given(method("POST"))
        .and(path("/v1/upload"))
        .and(header(
            "content-type",
            "multipart/form-data; boundary=Boundary-test",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(&server);
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(&form.content_type()).unwrap());

    let response = transport
        .send_raw(
            RawRequest::builder()
                .method(Method::POST)
                .url(transport.url_for("upload"))
                .headers(headers)
                .body(body.clone())
                .timeout(Duration::from_secs(5))
                .build(),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(&response.body[..], b"created");

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("authorization").is_none());
    assert_eq!(received[0].body, body.to_vec());
}
