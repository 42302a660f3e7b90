use serde::{Deserialize, Serialize};
use serde_json::Value;
use log::{trace, warn};

// ===== Outbound =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part
{   pub text: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content
{   pub role: String
  , pub parts: Vec<Part>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest
{   pub contents: Vec<Content>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
}

impl GenerateContentRequest
{   /// Single user turn carrying the whole rendered prompt
    pub fn single_turn(
      prompt_text: &str
    , temperature: Option<f32>
    ) -> Self
    {   GenerateContentRequest
        {   contents: vec![
              Content
              {   role: "user".to_string()
                , parts: vec![
                    Part { text: prompt_text.to_string() }
                  ]
              }
            ]
          , temperature
        }
    }
}

// ===== Inbound envelope =====
// The text path and the usage block are read independently, so a bad
// value in one never hides the other.

const TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// Parsed success body; field lookups tolerate any shape
#[derive(Debug, Clone)]
pub struct GenerateContentResponse
{   raw: Value
}

impl GenerateContentResponse
{   pub fn parse(body: &str) -> Result<Self, serde_json::Error>
    {   Ok(GenerateContentResponse
        {   raw: serde_json::from_str(body)?
        })
    }

    /// First candidate's first text part, if non-empty
    pub fn first_text(&self) -> Option<&str>
    {   self.raw.pointer(TEXT_POINTER)
          .and_then(Value::as_str)
          .filter(|t| !t.is_empty())
    }

    /// Usage figures; `None` when the block is absent or malformed.
    /// A count that is missing inside a present block counts as 0.
    pub fn usage(&self) -> Option<crate::request::Usage>
    {   let block = self.raw.get("usageMetadata")?.as_object()?;
        let prompt = token_count(block.get("promptTokenCount"))?;
        let response = token_count(block.get("candidatesTokenCount"))?;
        Some(crate::request::Usage::new(prompt, response))
    }
}

fn token_count(value: Option<&Value>) -> Option<u64>
{   match value
    {   None | Some(Value::Null) => Some(0)
      , Some(v) => v.as_u64().or_else(|| {
          // integral floats such as 10.0
          v.as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
            .filter(|f| *f <= u64::MAX as f64)
            .map(|f| f as u64)
        })
    }
}

/// Turn a success body into reply text and usage.
/// Unparsable JSON or a missing text path yields the raw body as text.
pub fn extract_reply(body: &str)
  -> (String, Option<crate::request::Usage>)
{   match GenerateContentResponse::parse(body)
    {   Ok(envelope) => {
          let usage = envelope.usage();
          match envelope.first_text()
          {   Some(text) => {
                trace!("Extracted {} bytes of reply text", text.len());
                (text.to_string(), usage)
              }
            , None => {
                warn!("No candidate text in response, showing raw body");
                (body.to_string(), usage)
              }
          }
        }
      , Err(e) => {
          warn!("Unparsable response body ({}), showing raw body", e);
          (body.to_string(), None)
        }
    }
}
