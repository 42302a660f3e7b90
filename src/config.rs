//! Configuration for the completion client and page selection

use serde::{Deserialize, Serialize};
use log::debug;
use std::path::Path;

pub const ENDPOINT_VAR: &str = "GEMINI_URI";
pub const API_KEY_VAR: &str = "GEMINI_KEY";
pub const PRESET_VAR: &str = "PROMPT_PRESET";
pub const TEMPERATURE_VAR: &str = "PROMPT_TEMPERATURE";

// Names used by the old front-end build
const LEGACY_PREFIX: &str = "VITE_";

/// Endpoint and key, read once at startup and never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig
{   /// Base endpoint URL (opaque, not validated)
    pub endpoint: String
  , /// API key (opaque, not validated)
    pub api_key: String
}

impl ClientConfig
{   pub fn new(
      endpoint: impl Into<String>
    , api_key: impl Into<String>
    ) -> Self
    {   ClientConfig
        {   endpoint: endpoint.into()
          , api_key: api_key.into()
        }
    }

    /// Read `GEMINI_URI` / `GEMINI_KEY`, falling back to the
    /// `VITE_`-prefixed names
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env` with an injectable variable source
    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where F: Fn(&str) -> Option<String>
    {   let endpoint = required(&lookup, ENDPOINT_VAR)?;
        let api_key = required(&lookup, API_KEY_VAR)?;
        debug!("Client configured for endpoint {}", endpoint);
        Ok(ClientConfig { endpoint, api_key })
    }
}

fn required<F>(lookup: &F, name: &str)
  -> Result<String, crate::error::Error>
where F: Fn(&str) -> Option<String>
{   lookup(name)
      .or_else(|| lookup(&format!("{}{}", LEGACY_PREFIX, name)))
      .ok_or_else(|| {
        crate::error::Error::MissingConfiguration(name.to_string())
      })
}

/// Which page template to serve and how to sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig
{   /// Preset page template
    #[serde(default)]
    pub preset: crate::presets::PresetKind
  , /// Overrides the preset's temperature when set
    #[serde(default)]
    pub temperature: Option<f32>
}

impl Default for PageConfig
{   fn default() -> Self
    {   PageConfig
        {   preset: crate::presets::PresetKind::default()
          , temperature: None
        }
    }
}

impl PageConfig
{   pub fn from_env() -> Result<Self, crate::error::Error>
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where F: Fn(&str) -> Option<String>
    {   let preset = match lookup(PRESET_VAR)
        {   Some(name) => name.parse()?
          , None => crate::presets::PresetKind::default()
        };

        let temperature = match lookup(TEMPERATURE_VAR)
        {   Some(raw) => {
              let value: f32 = raw.trim().parse().map_err(|_| {
                crate::error::Error::InvalidConfiguration(
                  format!("{}={}", TEMPERATURE_VAR, raw)
                )
              })?;
              Some(crate::request::check_temperature(value)?)
            }
          , None => None
        };

        Ok(PageConfig { preset, temperature })
    }

    /// Resolve the preset into a ready template + temperature
    pub fn resolve(&self)
      -> Result<crate::presets::Preset, crate::error::Error>
    {   let mut preset = crate::presets::Preset::for_kind(self.preset);
        if let Some(t) = self.temperature
        {   preset.temperature = Some(
              crate::request::check_temperature(t)?
            );
        }
        Ok(preset)
    }
}

/// Full application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig
{   pub client: ClientConfig
  , #[serde(default)]
    pub page: PageConfig
}

impl AppConfig
{   pub fn from_env() -> Result<Self, crate::error::Error>
    {   Ok(AppConfig
        {   client: ClientConfig::from_env()?
          , page: PageConfig::from_env()?
        })
    }

    pub fn from_file(path: impl AsRef<Path>)
      -> Result<Self, crate::error::Error>
    {   let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str)
      -> Result<Self, crate::error::Error>
    {   Ok(serde_json::from_str(raw)?)
    }
}
