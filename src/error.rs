use std::fmt;

/// Custom error type for promptshot setup operations
/// Request outcomes are never errors, see `CompletionResult`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Required configuration value is absent
    MissingConfiguration(String)
  , /// Configuration value present but unusable
    InvalidConfiguration(String)
  , /// Temperature outside the accepted range
    TemperatureOutOfRange(String)
  , /// Preset name not recognised
    UnknownPreset(String)
  , /// Failed to read a config or template file
    Io(String)
  , /// Failed to parse a config or template file
    ParseError(String)
  , /// Generic error
    Other(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingConfiguration(name) => {
              write!(f, "Missing configuration: {}", name)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::TemperatureOutOfRange(value) => {
              write!(f,
                "Temperature must be within [0, 2], got {}",
                value
              )
            }
          , Error::UnknownPreset(name) => {
              write!(f, "Unknown preset: {}", name)
            }
          , Error::Io(msg) => {
              write!(f, "IO error: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::ParseError(e.to_string())
    }
}
