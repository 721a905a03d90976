//! llm_ollama – a typed, blocking client for the [Ollama](https://ollama.com) server
//! ===============================================================================
//!
//! ## One Call, One Request
//! - **No runtime** – Every helper is a plain blocking call on top of `ureq`; no async executor required.
//! - **Typed bodies** – Each route has its own request and response types, validated before anything hits the wire.
//! - **Bounded streams** – Model lifecycle routes (pull, push, create, ...) stream JSON lines; the decoder stops at a
//!   configurable message limit instead of reading forever.
//!
//! ---
//!
//! ```rust,no_run
//! use llm_ollama::*;
//!
//! fn main() -> OllamaResult<()> {
//!     let client = OllamaClient::from_env()?;
//!     client.pull_model("llama3.2")?;
//!
//!     let res = client.generate(
//!         &GenerateRequest::builder()
//!             .model("llama3.2")
//!             .prompt("Tell me a joke about Rust.")
//!             .build()?,
//!     )?;
//!
//!     println!("Generate response: {:#?}", res.response);
//!     Ok(())
//! }
//! ```
//!
//! ---
//!
//! ## How It Works
//!
//! ```text
//! Your Rust App
//!       │
//!       ├─→ OllamaConfig    (host / timeout / limits, from code or env)
//!       │         ↓
//!       └─→ OllamaClient    (typed handle)
//!                 │
//!                 └─→ Transport   (HttpTransport over ureq, or your own)
//! ```
//!
//! ---
//!
//! ### Endpoints ⇄ Typed Helpers
//! | HTTP Route                 | Helper on `OllamaClient`      | Request type              | Response type              |
//! |----------------------------|-------------------------------|---------------------------|----------------------------|
//! | `GET  /api/version`        | `version()`                   | –                         | [`Version`]                |
//! | `GET  /api/tags`           | `list_models()`               | –                         | [`ModelList`]              |
//! | `GET  /api/ps`             | `process_status()`            | –                         | [`ModelProcessStatus`]     |
//! | `POST /api/show`           | `show_model()`                | model name                | [`ModelInfoResult`]        |
//! | `POST /api/generate`       | `generate()` / `_stream()`    | [`GenerateRequest`]       | [`GenerateResponse`]       |
//! | `POST /api/chat`           | `chat()` / `_stream()`        | [`ChatRequest`]           | [`ChatResponse`]           |
//! | `POST /api/embed`          | `embed()`                     | [`EmbedRequest`]          | [`EmbedResponse`]          |
//! | `POST /api/pull`           | `pull_model()` ¹              | [`PullRequest`]           | [`PullModelResult`]        |
//! | `POST /api/push`           | `push_model()` ¹              | [`PushRequest`]           | [`PushModelResult`]        |
//! | `POST /api/create`         | `create_model()` ¹            | [`CreateModelRequest`]    | [`CreateModelResult`]      |
//! | `POST /api/copy`           | `copy_model()`                | source, destination       | [`StatusResult`]           |
//! | `DELETE /api/delete`       | `delete_model()`              | model name                | [`StatusResult`]           |
//! | `HEAD /api/blobs/:digest`  | `check_blob_exists()`         | digest                    | `bool`                     |
//! | `POST /api/blobs/:digest`  | `push_blob()` / `_file()`     | digest + octets           | –                          |
//!
//! ¹ Also available as `*_with_progress`, taking a callback per [`StatusUpdate`].
//!
//! ---

#[allow(unused_imports)]
use tracing::{Level, debug, error, info, span, trace, warn};

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod stream;
pub mod transport;

pub use api::{
    blob::file_digest,
    chat::*,
    create::*,
    embed::*,
    generate::*,
    list::*,
    process::*,
    pull::*,
    push::*,
    show::*,
    types::*,
    version::*,
};
pub use client::OllamaClient;
pub use config::OllamaConfig;
pub use error::{OllamaError, OllamaResult};
pub use logging::LoggingConfig;
pub use stream::{ResponseStream, StatusUpdate, StreamChunk};
pub use transport::{ClientError, Transport, TransportExt, Verb, http::HttpTransport};
