//! Built-in page presets for the PC parts sales agent

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::template::{Example, PromptTemplate};

const SELLER_INSTRUCTIONS: &str = "\
You are an AI agent working as a seller for custom PC builds.
Your job is to help customers with questions about PC parts, assembling, and peripherals like keyboards and mice only.
Do not answer questions outside of PC parts, assembly, or peripherals.
Always be friendly and try to recommend builds or compatible parts when possible.";

const AGENTIC_INSTRUCTIONS: &str = "\
ROLE: You are an expert AI sales agent for a custom PC store. Your persona is knowledgeable, friendly, and focused on helping customers build or upgrade their PCs.

TASK:
- Answer customer questions about PC parts, assembly, and compatible peripherals (such as keyboards and mice).
- Provide clear recommendations based on the customer's needs and use cases.
- List available options for requested parts and explain which is best for different scenarios.
- Encourage customers to share their preferences or requirements for more tailored advice.

CONSTRAINTS:
- Do NOT answer questions unrelated to PC parts, assembly, or peripherals.
- Avoid discussing topics outside the scope of PC hardware and building.
- Always maintain a helpful and professional tone.
- If you need more information to give a recommendation, politely ask the customer for their intended use or preferences.

FORMAT:
- Respond as \"Agent\" and address the customer directly.
- For each part, list available options and briefly describe their strengths and ideal use cases.
- Offer to help further if the customer provides more details.

EXAMPLES:";

const CPU_QUESTION: &str = "Can you tell me about available CPUs?";
const KEYBOARD_QUESTION: &str = "What keyboards do you have available?";
const BOARD_QUESTION: &str = "Which motherboards are in stock?";

const CPU_LIST: &str = "\
- Intel Core i9-13900K: Best for high-end gaming and professional workloads.
- AMD Ryzen 9 7950X: Excellent for multitasking and content creation.
- Intel Core i5-13600K: Great for mid-range gaming and everyday use.
- AMD Ryzen 5 7600X: Good for budget builds and general productivity.";

const KEYBOARD_ANSWER: &str = "\
Absolutely! Here are some keyboards we offer:
- Corsair K95 RGB Platinum: Great for gaming with customizable macros.
- Logitech MX Keys: Excellent for productivity and comfortable typing.
- Razer BlackWidow V4: Perfect for gamers who love mechanical switches.
Let me know your preferences and I can suggest the best keyboard for your needs!";

const BOARD_ANSWER: &str = "\
Here are the motherboards currently available:
- ASUS ROG Strix Z790-E: Ideal for high-end Intel builds and overclocking.
- MSI MAG B650 Tomahawk: Great for AMD Ryzen systems and gaming.
- Gigabyte B760M DS3H: Good for budget Intel builds.
If you share your CPU choice, I can recommend the most compatible motherboard!";

const AGENTIC_TEMPERATURE: f32 = 0.7;

/// Which built-in page to serve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetKind
{   ZeroShot
  , OneShot
  , #[default]
    MultiShot
  , Agentic
}

impl PresetKind
{   pub const ALL: [PresetKind; 4] = [
      PresetKind::ZeroShot
    , PresetKind::OneShot
    , PresetKind::MultiShot
    , PresetKind::Agentic
    ];

    pub fn name(&self) -> &'static str
    {   match self
        {   PresetKind::ZeroShot => "zero-shot"
          , PresetKind::OneShot => "one-shot"
          , PresetKind::MultiShot => "multi-shot"
          , PresetKind::Agentic => "agentic"
        }
    }
}

impl FromStr for PresetKind
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   let wanted = s.trim().to_ascii_lowercase();
        PresetKind::ALL.iter()
          .copied()
          .find(|k| k.name() == wanted)
          .ok_or_else(|| crate::error::Error::UnknownPreset(s.to_string()))
    }
}

/// A page: heading, template and sampling temperature
#[derive(Debug, Clone, PartialEq)]
pub struct Preset
{   pub title: String
  , pub template: PromptTemplate
  , pub temperature: Option<f32>
}

impl Preset
{   pub fn for_kind(kind: PresetKind) -> Self
    {   match kind
        {   PresetKind::ZeroShot => Preset
            {   title: "Zero-Shot Gemini Prompt".to_string()
              , template: PromptTemplate::new(SELLER_INSTRUCTIONS)
              , temperature: None
            }
          , PresetKind::OneShot => Preset
            {   title: "One-Shot Gemini Prompt".to_string()
              , template: PromptTemplate::new(SELLER_INSTRUCTIONS)
                  .with_example(CPU_QUESTION, cpu_answer("Sure!", "If you tell me your use case"))
              , temperature: None
            }
          , PresetKind::MultiShot => Preset
            {   title: "Multi-Shot Gemini Prompt".to_string()
              , template: PromptTemplate::new(SELLER_INSTRUCTIONS)
                  .with_examples(shop_examples(
                    "Sure!", "If you tell me your use case"
                  ))
              , temperature: None
            }
          , PresetKind::Agentic => Preset
            {   title: "Agentic Gemini Prompt".to_string()
              , template: PromptTemplate::new(AGENTIC_INSTRUCTIONS)
                  .with_examples(shop_examples(
                    "Certainly!", "If you let me know your main use case"
                  ))
              , temperature: Some(AGENTIC_TEMPERATURE)
            }
        }
    }
}

fn cpu_answer(opener: &str, follow_up: &str) -> String
{   format!(
      "{} Here are the CPUs we currently have in stock:\n{}\n{}, I can recommend the best CPU for you!"
    , opener
    , CPU_LIST
    , follow_up
    )
}

fn shop_examples(opener: &str, follow_up: &str) -> Vec<Example>
{   vec![
      Example::new(CPU_QUESTION, cpu_answer(opener, follow_up))
    , Example::new(KEYBOARD_QUESTION, KEYBOARD_ANSWER)
    , Example::new(BOARD_QUESTION, BOARD_ANSWER)
    ]
}
