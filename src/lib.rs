pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod template;
pub mod presets;
pub mod client;
pub mod page;

/*

promptshot: an async-only library that turns the copy-pasted
"prompt + fetch" pages into one configurable component.

user text ─► PromptTemplate::render ─► CompletionRequest
          ─► CompletionClient::complete ─► CompletionResult

promptshot/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and crate layout
│   ├── error.rs        # Setup/config error type
│   ├── config.rs       # Endpoint, key and page selection
│   ├── template.rs     # Instructions + worked examples
│   ├── presets.rs      # Built-in sales agent pages
│   ├── request.rs      # Request / result / usage types
│   ├── client.rs       # Single-shot completion client
│   ├── page.rs         # Page component, last request wins
│   └── providers/      # Provider wire formats
│       ├── mod.rs
│       └── gemini.rs
└── tests/              # End-to-end tests against a mock server

*/

pub use error::Error;
pub use config::{AppConfig, ClientConfig, PageConfig};
pub use template::{Example, PromptTemplate, ShotKind};
pub use presets::{Preset, PresetKind};
pub use request::{CompletionRequest, CompletionResult, FailureKind, Usage};
pub use client::CompletionClient;
pub use page::{PageReply, PromptPage};
