//! Request and result types for a single completion round trip

use serde::{Deserialize, Serialize};

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;

/// One outbound completion call; built fresh per submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest
{   /// Endpoint base URL (opaque)
    pub endpoint: String
  , /// API key, sent as the `key` query parameter
    pub api_key: String
  , /// Fully rendered prompt text
    pub prompt_text: String
  , /// Sampling temperature, within [0, 2]
    pub temperature: Option<f32>
}

impl CompletionRequest
{   pub fn new(
      endpoint: impl Into<String>
    , api_key: impl Into<String>
    , prompt_text: impl Into<String>
    ) -> Self
    {   CompletionRequest
        {   endpoint: endpoint.into()
          , api_key: api_key.into()
          , prompt_text: prompt_text.into()
          , temperature: None
        }
    }

    /// Attach a temperature, rejecting values outside [0, 2]
    pub fn with_temperature(mut self, temperature: f32)
      -> Result<Self, crate::error::Error>
    {   self.temperature = Some(check_temperature(temperature)?);
        Ok(self)
    }
}

pub fn check_temperature(temperature: f32)
  -> Result<f32, crate::error::Error>
{   if (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature)
    {   Ok(temperature)
    } else
    {   Err(crate::error::Error::TemperatureOutOfRange(
          temperature.to_string()
        ))
    }
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage
{   pub prompt_tokens: u64
  , pub response_tokens: u64
  , pub total_tokens: u64
}

impl Usage
{   pub fn new(prompt_tokens: u64, response_tokens: u64) -> Self
    {   Usage
        {   prompt_tokens
          , response_tokens
          , total_tokens: prompt_tokens.saturating_add(response_tokens)
        }
    }
}

/// Why a completion did not produce text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind
{   /// Transport never completed
    NetworkError
  , /// Server reached, request rejected
    HttpError
    {   status: u16
      , body: String
    }
  , /// Success status but the body could not be read
    MalformedResponse
}

/// Outcome of `CompletionClient::complete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionResult
{   Success
    {   text: String
      , usage: Option<Usage>
    }
  , Failure
    {   kind: FailureKind
      , detail: String
    }
}

impl CompletionResult
{   pub fn is_success(&self) -> bool
    {   matches!(self, CompletionResult::Success { .. })
    }

    pub fn text(&self) -> Option<&str>
    {   match self
        {   CompletionResult::Success { text, .. } => Some(text)
          , CompletionResult::Failure { .. } => None
        }
    }

    pub fn usage(&self) -> Option<Usage>
    {   match self
        {   CompletionResult::Success { usage, .. } => *usage
          , CompletionResult::Failure { .. } => None
        }
    }

    /// What a page shows for this outcome
    pub fn display_text(&self) -> String
    {   match self
        {   CompletionResult::Success { text, .. } => text.clone()
          , CompletionResult::Failure
            {   kind: FailureKind::HttpError { status, body }
              , ..
            } => format!("API Error: {}{} ", body, status)
          , CompletionResult::Failure { detail, .. } => {
              format!("Error: {}", detail)
            }
        }
    }
}
