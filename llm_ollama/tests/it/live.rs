//! Against a running server: `OLLAMA_HOST=... cargo test -- --ignored`.
//! The model under test comes from `OLLAMA_TEST_MODEL`.

use super::*;

fn test_model() -> String {
    std::env::var("OLLAMA_TEST_MODEL").unwrap_or_else(|_| "llama3.2:1b".to_string())
}

fn live_client() -> crate::Result<OllamaClient> {
    Ok(OllamaClient::from_env()?)
}

#[test]
#[ignore]
fn test_live_version_and_listing() -> crate::Result<()> {
    let client = live_client()?;
    let version = client.version()?;
    assert!(!version.version.is_empty());

    let list = client.list_models()?;
    println!("{:#?}", list.names().collect::<Vec<_>>());
    let status = client.process_status()?;
    println!("loaded: {:?}", status.model_names());
    Ok(())
}

#[test]
#[ignore]
fn test_live_generate_and_chat() -> crate::Result<()> {
    let client = live_client()?;
    let model = test_model();
    client.pull_model(&model)?;

    let res = client.generate(
        &GenerateRequest::builder()
            .model(model.as_str())
            .prompt(PROMPT)
            .options(serde_json::Map::from_iter([(
                "num_predict".to_string(),
                serde_json::json!(32),
            )]))
            .build()?,
    )?;
    assert!(res.done);
    assert!(!res.response.is_empty());

    let chat = client.chat(
        &ChatRequest::builder()
            .model(model.as_str())
            .messages(vec![Message::user(PROMPT)])
            .build()?,
    )?;
    assert_eq!(chat.message.role, Role::Assistant);

    let info = client.show_model(&model, false)?;
    if !info.has_capability("completion") {
        bail!("{model} cannot complete text");
    }
    Ok(())
}

#[test]
#[ignore]
fn test_live_missing_model_is_404() -> crate::Result<()> {
    let client = live_client()?;
    let err = client
        .show_model("definitely-not-a-model:never", false)
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    Ok(())
}
