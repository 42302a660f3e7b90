//! Prompt templates: fixed instructions plus worked examples
//!
//! User text is spliced in verbatim. Nothing is escaped, so input that
//! contains the label tokens (e.g. "Agent:") reaches the model as plain
//! text next to the real example turns. This is a known limitation.

use serde::{Deserialize, Serialize};
use log::debug;
use std::path::Path;

const DEFAULT_INPUT_LABEL: &str = "Customer";
const DEFAULT_OUTPUT_LABEL: &str = "Agent";

fn default_input_label() -> String
{   DEFAULT_INPUT_LABEL.to_string()
}

fn default_output_label() -> String
{   DEFAULT_OUTPUT_LABEL.to_string()
}

/// One worked example shown to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example
{   pub input: String
  , pub output: String
}

impl Example
{   pub fn new(
      input: impl Into<String>
    , output: impl Into<String>
    ) -> Self
    {   Example
        {   input: input.into()
          , output: output.into()
        }
    }
}

/// Number of worked examples a template carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotKind
{   ZeroShot
  , OneShot
  , MultiShot
}

/// Immutable instructions + examples, rendered per user input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate
{   instructions: String
  , #[serde(default)]
    examples: Vec<Example>
  , #[serde(default = "default_input_label")]
    input_label: String
  , #[serde(default = "default_output_label")]
    output_label: String
}

impl PromptTemplate
{   /// Zero-shot template with the default labels
    pub fn new(instructions: impl Into<String>) -> Self
    {   PromptTemplate
        {   instructions: instructions.into()
          , examples: vec![]
          , input_label: default_input_label()
          , output_label: default_output_label()
        }
    }

    /// Append a worked example (construction only)
    pub fn with_example(
      mut self
    , input: impl Into<String>
    , output: impl Into<String>
    ) -> Self
    {   self.examples.push(Example::new(input, output));
        self
    }

    pub fn with_examples(
      mut self
    , examples: impl IntoIterator<Item = Example>
    ) -> Self
    {   self.examples.extend(examples);
        self
    }

    /// Override the speaker labels used for example and user turns
    pub fn with_labels(
      mut self
    , input_label: impl Into<String>
    , output_label: impl Into<String>
    ) -> Self
    {   self.input_label = input_label.into();
        self.output_label = output_label.into();
        self
    }

    /// Load a template from a JSON file
    pub fn from_file(path: impl AsRef<Path>)
      -> Result<Self, crate::error::Error>
    {   let path = path.as_ref();
        debug!("Loading template from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str)
      -> Result<Self, crate::error::Error>
    {   Ok(serde_json::from_str(raw)?)
    }

    pub fn instructions(&self) -> &str
    {   &self.instructions
    }

    pub fn examples(&self) -> &[Example]
    {   &self.examples
    }

    pub fn input_label(&self) -> &str
    {   &self.input_label
    }

    pub fn output_label(&self) -> &str
    {   &self.output_label
    }

    pub fn shot_count(&self) -> usize
    {   self.examples.len()
    }

    pub fn shot_kind(&self) -> ShotKind
    {   match self.examples.len()
        {   0 => ShotKind::ZeroShot
          , 1 => ShotKind::OneShot
          , _ => ShotKind::MultiShot
        }
    }

    /// Build the final prompt: instructions, examples in order,
    /// then the user turn. The output always ends with `user_text`.
    pub fn render(&self, user_text: &str) -> String
    {   let mut out = String::with_capacity(
          self.instructions.len() + user_text.len() + 64
        );
        out.push_str(&self.instructions);

        for (i, example) in self.examples.iter().enumerate()
        {   out.push_str(&format!(
              "\n\nExample {}:\n{}: {}\n{}: {}"
            , i + 1
            , self.input_label
            , example.input
            , self.output_label
            , example.output
            ));
        }

        out.push_str("\n\n");
        out.push_str(&self.input_label);
        out.push_str(": ");
        out.push_str(user_text);
        out
    }
}
