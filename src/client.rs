use log::{debug, trace, error};
use reqwest::header::CONTENT_TYPE;
use crate::providers::gemini;
use crate::request::{CompletionRequest, CompletionResult, FailureKind};

/// Sends one rendered prompt to the text-generation endpoint.
///
/// Holds only read-only configuration and a pooled HTTP client, so a
/// single instance can be shared by every page.
#[derive(Debug, Clone)]
pub struct CompletionClient
{   config: crate::config::ClientConfig
  , http_client: reqwest::Client
}

impl CompletionClient
{   pub fn new(config: crate::config::ClientConfig) -> Self
    {   Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a preconfigured transport (proxies, custom timeouts)
    pub fn with_http_client(
      config: crate::config::ClientConfig
    , http_client: reqwest::Client
    ) -> Self
    {   debug!("Creating CompletionClient");
        CompletionClient
        {   config
          , http_client
        }
    }

    pub fn config(&self) -> &crate::config::ClientConfig
    {   &self.config
    }

    /// Fresh request for this client's endpoint and key
    pub fn request_for(
      &self
    , prompt_text: impl Into<String>
    , temperature: Option<f32>
    ) -> Result<CompletionRequest, crate::error::Error>
    {   let request = CompletionRequest::new(
          self.config.endpoint.clone()
        , self.config.api_key.clone()
        , prompt_text
        );
        match temperature
        {   Some(t) => request.with_temperature(t)
          , None => Ok(request)
        }
    }

    /// Issue exactly one POST and fold every outcome into a result.
    /// No retry; timeouts are whatever the transport defaults to.
    pub async fn complete(
      &self
    , request: CompletionRequest
    ) -> CompletionResult
    {   debug!(
          "Sending completion ({} prompt bytes, temperature {:?})"
        , request.prompt_text.len()
        , request.temperature
        );

        let body = gemini::GenerateContentRequest::single_turn(
          &request.prompt_text
        , request.temperature
        );
        trace!("Completion request body: {:?}", body);

        let response = match self.http_client
          .post(request.endpoint.as_str())
          .query(&[("key", request.api_key.as_str())])
          .header(CONTENT_TYPE, "application/json")
          .json(&body)
          .send()
          .await
        {   Ok(response) => response
          , Err(e) => {
              // strip the url, it carries the key
              let e = e.without_url();
              error!("HTTP error: {}", e);
              return CompletionResult::Failure
              {   kind: FailureKind::NetworkError
                , detail: e.to_string()
              };
            }
        };

        let status = response.status();
        trace!("Completion response status: {}", status);

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Completion API error {}: {}", status, error_text);
            return CompletionResult::Failure
            {   kind: FailureKind::HttpError
                {   status: status.as_u16()
                  , body: error_text
                }
              , detail: format!("HTTP {}", status.as_u16())
            };
        }

        match response.text().await
        {   Ok(raw) => {
              let (text, usage) = gemini::extract_reply(&raw);
              CompletionResult::Success { text, usage }
            }
          , Err(e) => {
              let e = e.without_url();
              error!("Failed to read response body: {}", e);
              CompletionResult::Failure
              {   kind: FailureKind::MalformedResponse
                , detail: e.to_string()
              }
            }
        }
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    fn client() -> CompletionClient
    {   CompletionClient::new(crate::config::ClientConfig::new(
          "https://example.test/v1/models/m:generateContent"
        , "secret"
        ))
    }

    #[test]
    fn test_request_for_uses_config()
    {   let req = client().request_for("prompt", Some(0.7)).unwrap();
        assert_eq!(req.endpoint, "https://example.test/v1/models/m:generateContent");
        assert_eq!(req.api_key, "secret");
        assert_eq!(req.prompt_text, "prompt");
        assert_eq!(req.temperature, Some(0.7));
    }

    #[test]
    fn test_request_for_rejects_bad_temperature()
    {   assert!(client().request_for("prompt", Some(5.0)).is_err());
    }

    #[test]
    fn test_invalid_endpoint_is_network_failure()
    {   let c = client();
        let req = CompletionRequest::new("not a url", "secret", "hi");
        let result = tokio_test::block_on(c.complete(req));
        match result
        {   CompletionResult::Failure { kind, .. } => {
              assert_eq!(kind, FailureKind::NetworkError);
            }
          , other => panic!("expected failure, got {:?}", other)
        }
    }
}
