use std::sync::Arc;
use promptshot::{
  ClientConfig, CompletionClient, CompletionRequest, CompletionResult
, FailureKind, PromptPage, PromptTemplate, Usage
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-pro:generateContent";
const TEST_KEY: &str = "test-key";

fn init_logging()
{   let _ = env_logger::builder().is_test(true).try_init();
}

fn client_for(server: &MockServer) -> CompletionClient
{   CompletionClient::new(ClientConfig::new(
      format!("{}{}", server.uri(), GENERATE_PATH)
    , TEST_KEY
    ))
}

async fn mount_reply(server: &MockServer, status: u16, body: &str)
{   Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .respond_with(
        ResponseTemplate::new(status)
          .set_body_raw(body.to_string(), "application/json")
      )
      .expect(1)
      .mount(server)
      .await;
}

fn request_body(req: &wiremock::Request) -> serde_json::Value
{   serde_json::from_slice(&req.body).unwrap()
}

#[tokio::test]
async fn test_transport_failure_is_network_error()
{   init_logging();
    // grab a free port, then close it so the connect is refused
    let port = {
      let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
      listener.local_addr().unwrap().port()
    };
    let client = CompletionClient::new(ClientConfig::new(
      format!("http://127.0.0.1:{}{}", port, GENERATE_PATH)
    , TEST_KEY
    ));

    let request = client.request_for("hello", None).unwrap();
    match client.complete(request).await
    {   CompletionResult::Failure { kind, detail } => {
          assert_eq!(kind, FailureKind::NetworkError);
          assert!(!detail.is_empty());
          assert!(!detail.contains(TEST_KEY), "key leaked: {}", detail);
        }
      , other => panic!("expected network failure, got {:?}", other)
    }
}

#[tokio::test]
async fn test_rate_limited_is_http_error()
{   init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .respond_with(
        ResponseTemplate::new(429).set_body_string("rate limited")
      )
      .expect(1)
      .mount(&server)
      .await;

    let client = client_for(&server);
    let result = client
      .complete(client.request_for("hello", None).unwrap())
      .await;

    match &result
    {   CompletionResult::Failure { kind, .. } => {
          assert_eq!(
            kind
          , &FailureKind::HttpError
            {   status: 429
              , body: "rate limited".to_string()
            }
          );
        }
      , other => panic!("expected http failure, got {:?}", other)
    }
    assert_eq!(result.display_text(), "API Error: rate limited429 ");
}

#[tokio::test]
async fn test_success_extracts_first_text()
{   init_logging();
    let server = MockServer::start().await;
    mount_reply(
      &server
    , 200
    , r#"{"candidates":[{"content":{"parts":[{"text":"Hello"}]}}]}"#
    ).await;

    let client = client_for(&server);
    let result = client
      .complete(client.request_for("hi", None).unwrap())
      .await;

    assert_eq!(
      result
    , CompletionResult::Success
      {   text: "Hello".to_string()
        , usage: None
      }
    );
}

#[tokio::test]
async fn test_success_reports_usage_total()
{   init_logging();
    let server = MockServer::start().await;
    mount_reply(
      &server
    , 200
    , r#"{"candidates":[{"content":{"parts":[{"text":"Hello"}]}}],
          "usageMetadata":{"promptTokenCount":10,"candidatesTokenCount":5}}"#
    ).await;

    let client = client_for(&server);
    let result = client
      .complete(client.request_for("hi", None).unwrap())
      .await;

    assert_eq!(result.text(), Some("Hello"));
    assert_eq!(result.usage(), Some(Usage::new(10, 5)));
    assert_eq!(result.usage().map(|u| u.total_tokens), Some(15));
}

#[tokio::test]
async fn test_missing_candidates_returns_raw_body()
{   init_logging();
    let server = MockServer::start().await;
    let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
    mount_reply(&server, 200, body).await;

    let client = client_for(&server);
    let result = client
      .complete(client.request_for("hi", None).unwrap())
      .await;

    assert!(result.is_success());
    assert_eq!(result.text(), Some(body));
}

#[tokio::test]
async fn test_unparsable_success_body_returns_raw_body()
{   init_logging();
    let server = MockServer::start().await;
    mount_reply(&server, 200, "<html>gateway</html>").await;

    let client = client_for(&server);
    let result = client
      .complete(client.request_for("hi", None).unwrap())
      .await;

    assert_eq!(result.text(), Some("<html>gateway</html>"));
}

#[tokio::test]
async fn test_wire_format()
{   init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .and(query_param("key", TEST_KEY))
      .and(header("content-type", "application/json"))
      .and(body_partial_json(json!({
        "contents": [
          { "role": "user", "parts": [ { "text": "rendered prompt" } ] }
        ]
      })))
      .respond_with(ResponseTemplate::new(200).set_body_string(
        r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#
      ))
      .expect(1)
      .mount(&server)
      .await;

    let client = client_for(&server);
    let request = CompletionRequest::new(
      client.config().endpoint.clone()
    , TEST_KEY
    , "rendered prompt"
    ).with_temperature(0.5).unwrap();
    let result = client.complete(request).await;
    assert_eq!(result.text(), Some("ok"));

    let received = server.received_requests().await.unwrap();
    let body = request_body(&received[0]);
    assert_eq!(body["temperature"], json!(0.5));
    assert_eq!(body["contents"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_temperature_omitted_when_unset()
{   init_logging();
    let server = MockServer::start().await;
    mount_reply(
      &server
    , 200
    , r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#
    ).await;

    let client = client_for(&server);
    client.complete(client.request_for("p", None).unwrap()).await;

    let received = server.received_requests().await.unwrap();
    assert!(request_body(&received[0]).get("temperature").is_none());
}

#[tokio::test]
async fn test_empty_input_sends_exactly_one_request()
{   init_logging();
    let server = MockServer::start().await;
    mount_reply(
      &server
    , 200
    , r#"{"candidates":[{"content":{"parts":[{"text":"How can I help?"}]}}]}"#
    ).await;

    let template = PromptTemplate::new("You sell PC parts.")
      .with_example("Any CPUs?", "Yes.");
    let prompt = template.render("");
    assert!(prompt.ends_with("Customer: "));

    let client = client_for(&server);
    let result = client
      .complete(client.request_for(prompt.clone(), None).unwrap())
      .await;
    assert_eq!(result.text(), Some("How can I help?"));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(
      request_body(&received[0])["contents"][0]["parts"][0]["text"]
    , json!(prompt)
    );
}

#[tokio::test]
async fn test_page_round_trip()
{   init_logging();
    let server = MockServer::start().await;
    mount_reply(
      &server
    , 200
    , r#"{"candidates":[{"content":{"parts":[{"text":"Try the Ryzen 7."}]}}],
          "usageMetadata":{"promptTokenCount":120,"candidatesTokenCount":8}}"#
    ).await;

    let client = Arc::new(client_for(&server));
    let page = PromptPage::from_preset(
      promptshot::Preset::for_kind(promptshot::PresetKind::Agentic)
    , client
    );

    let reply = page.submit_latest("Best CPU for streaming?")
      .await
      .unwrap()
      .expect("only submission is current");
    assert_eq!(reply.sequence, 1);
    assert_eq!(reply.display_text(), "Try the Ryzen 7.");
    assert_eq!(reply.result.usage().unwrap().total_tokens, 128);

    let received = server.received_requests().await.unwrap();
    let body = request_body(&received[0]);
    let sent = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(sent.starts_with("ROLE: "));
    assert!(sent.ends_with("\n\nCustomer: Best CPU for streaming?"));
    assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn test_page_drops_superseded_reply()
{   init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(GENERATE_PATH))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_string(
            r#"{"candidates":[{"content":{"parts":[{"text":"slow"}]}}]}"#
          )
          .set_delay(std::time::Duration::from_millis(300))
      )
      .mount(&server)
      .await;

    let page = PromptPage::new(
      "Test"
    , PromptTemplate::new("Be brief.")
    , None
    , Arc::new(client_for(&server))
    );

    let (stale, fresh) = tokio::join!(
      page.submit_latest("first"),
      async {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        page.submit_latest("second").await
      }
    );

    assert!(stale.unwrap().is_none());
    let fresh = fresh.unwrap().expect("newest submission wins");
    assert_eq!(fresh.sequence, 2);
    assert_eq!(fresh.display_text(), "slow");
}

#[tokio::test]
async fn test_malformed_usage_keeps_reply_text()
{   init_logging();
    let server = MockServer::start().await;
    mount_reply(
      &server
    , 200
    , r#"{"candidates":[{"content":{"parts":[{"text":"Hello"}]}}],
          "usageMetadata":{"promptTokenCount":-1,"candidatesTokenCount":5}}"#
    ).await;

    let client = client_for(&server);
    let result = client
      .complete(client.request_for("hi", None).unwrap())
      .await;

    assert_eq!(
      result
    , CompletionResult::Success
      {   text: "Hello".to_string()
        , usage: None
      }
    );
}
