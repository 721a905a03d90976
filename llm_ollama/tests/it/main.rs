//
mod live;
mod mocked;

#[allow(unused_imports)]
use anyhow::{Error, Result, anyhow, bail};
use llm_ollama::*;
use std::time::Duration;

const PROMPT: &str = "Why is the sky blue? Answer in one sentence.";

fn mock_client(server: &mockito::ServerGuard) -> crate::Result<OllamaClient> {
    let config = OllamaConfig::builder()
        .host(server.url())
        .timeout(Duration::from_secs(10))
        .build();
    Ok(OllamaClient::from_config(config)?)
}
