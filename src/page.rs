//! One configurable page: template + shared client
//!
//! Replaces per-page copies of the prompt constant and fetch logic.
//! Submissions are numbered so the caller can drop replies that were
//! overtaken by a newer submission (last request wins).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use log::{debug, info};
use crate::client::CompletionClient;
use crate::request::CompletionResult;
use crate::template::PromptTemplate;

/// Result of one submission, tagged with its sequence number
#[derive(Debug, Clone, PartialEq)]
pub struct PageReply
{   pub sequence: u64
  , pub result: CompletionResult
}

impl PageReply
{   pub fn display_text(&self) -> String
    {   self.result.display_text()
    }

    /// False once `page` has taken a newer submission
    pub fn is_current(&self, page: &PromptPage) -> bool
    {   page.is_current(self.sequence)
    }
}

#[derive(Debug, Clone)]
pub struct PromptPage
{   title: String
  , template: PromptTemplate
  , temperature: Option<f32>
  , client: Arc<CompletionClient>
  , latest: Arc<AtomicU64>
}

impl PromptPage
{   pub fn new(
      title: impl Into<String>
    , template: PromptTemplate
    , temperature: Option<f32>
    , client: Arc<CompletionClient>
    ) -> Self
    {   PromptPage
        {   title: title.into()
          , template
          , temperature
          , client
          , latest: Arc::new(AtomicU64::new(0))
        }
    }

    pub fn from_preset(
      preset: crate::presets::Preset
    , client: Arc<CompletionClient>
    ) -> Self
    {   Self::new(
          preset.title
        , preset.template
        , preset.temperature
        , client
        )
    }

    /// Build the client and page straight from configuration
    pub fn from_config(config: &crate::config::AppConfig)
      -> Result<Self, crate::error::Error>
    {   let preset = config.page.resolve()?;
        let client = Arc::new(
          CompletionClient::new(config.client.clone())
        );
        debug!("Serving page {:?}", config.page.preset);
        Ok(Self::from_preset(preset, client))
    }

    pub fn title(&self) -> &str
    {   &self.title
    }

    pub fn template(&self) -> &PromptTemplate
    {   &self.template
    }

    pub fn temperature(&self) -> Option<f32>
    {   self.temperature
    }

    /// Sequence number of the most recent submission (0 before any)
    pub fn latest_sequence(&self) -> u64
    {   self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, sequence: u64) -> bool
    {   self.latest_sequence() == sequence
    }

    /// Render `user_text`, send it, and log token usage.
    /// Always resolves; staleness is left to the caller.
    pub async fn submit(
      &self
    , user_text: &str
    ) -> Result<PageReply, crate::error::Error>
    {   let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("{}: submission #{}", self.title, sequence);

        let request = self.client.request_for(
          self.template.render(user_text)
        , self.temperature
        )?;
        let result = self.client.complete(request).await;

        match result.usage()
        {   Some(usage) => info!(
              "Tokens used - Prompt: {}, Response: {}, Total: {}"
            , usage.prompt_tokens
            , usage.response_tokens
            , usage.total_tokens
            )
          , None if result.is_success() => info!(
              "Token usage metadata not available in response."
            )
          , None => {}
        }

        Ok(PageReply { sequence, result })
    }

    /// Like `submit`, but `None` when a newer submission started
    /// while this one was in flight
    pub async fn submit_latest(
      &self
    , user_text: &str
    ) -> Result<Option<PageReply>, crate::error::Error>
    {   let reply = self.submit(user_text).await?;
        if self.is_current(reply.sequence)
        {   Ok(Some(reply))
        } else
        {   debug!(
              "{}: dropping stale reply #{}"
            , self.title
            , reply.sequence
            );
            Ok(None)
        }
    }
}
