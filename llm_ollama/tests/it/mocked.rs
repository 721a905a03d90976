use mockito::Matcher;
use serde_json::json;

use super::*;

#[test]
fn test_pull_then_generate() -> crate::Result<()> {
    let mut server = mockito::Server::new();
    let pull = server
        .mock("POST", "/api/pull")
        .with_body(concat!(
            "{\"status\":\"pulling manifest\"}\n",
            "{\"status\":\"pulling 74701a8c35f6\",\"digest\":\"sha256:74701a8c35f6\",\"total\":1321082688,\"completed\":1321082688}\n",
            "{\"status\":\"success\"}\n",
        ))
        .create();
    let tags = server
        .mock("GET", "/api/tags")
        .with_body(
            json!({"models": [{
                "name": "llama3.2:1b",
                "modified_at": "2024-10-01T12:00:00Z",
                "size": 1321098329u64,
                "digest": "baf6a787fdffd633537aa2eb51cfd54cb93ff08e28040095462bb63daf552878",
                "details": {"format": "gguf", "family": "llama", "parameter_size": "1.2B", "quantization_level": "Q8_0"}
            }]})
            .to_string(),
        )
        .create();
    let generate = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(
            json!({"model": "llama3.2:1b", "prompt": PROMPT, "stream": false}),
        ))
        .with_body(
            json!({
                "model": "llama3.2:1b",
                "created_at": "2024-10-01T12:00:05Z",
                "response": "Rayleigh scattering.",
                "done": true,
                "done_reason": "stop",
                "eval_count": 10,
                "eval_duration": 500000000u64
            })
            .to_string(),
        )
        .create();

    let client = mock_client(&server)?;

    let mut layers = 0;
    let pulled = client.pull_model_with_progress(
        &PullRequest::builder().model("llama3.2:1b").build(),
        |u| layers += u.digest.is_some() as usize,
    )?;
    assert!(pulled.succeeded());
    assert_eq!(layers, 1);

    let list = client.list_models()?;
    assert!(list.find("llama3.2:1b").is_some());

    let res = client.generate(
        &GenerateRequest::builder()
            .model("llama3.2:1b")
            .prompt(PROMPT)
            .build()?,
    )?;
    assert_eq!(res.response, "Rayleigh scattering.");
    assert_eq!(res.metrics.tokens_per_second(), Some(20.0));

    pull.assert();
    tags.assert();
    generate.assert();
    Ok(())
}

#[test]
fn test_chat_stream_reassembles_message() -> crate::Result<()> {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(json!({"stream": true})))
        .with_header("content-type", "application/x-ndjson")
        .with_body(concat!(
            "{\"model\":\"m\",\"created_at\":\"2024-10-01T12:00:00Z\",\"message\":{\"role\":\"assistant\",\"content\":\"Hel\"},\"done\":false}\n",
            "{\"model\":\"m\",\"created_at\":\"2024-10-01T12:00:00Z\",\"message\":{\"role\":\"assistant\",\"content\":\"lo\"},\"done\":false}\n",
            "{\"model\":\"m\",\"created_at\":\"2024-10-01T12:00:01Z\",\"message\":{\"role\":\"assistant\",\"content\":\"\"},\"done\":true,\"done_reason\":\"stop\"}\n",
        ))
        .create();

    let client = mock_client(&server)?;
    let request = ChatRequest::builder()
        .model("m")
        .messages(vec![Message::system("Be brief."), Message::user("Say hello")])
        .build()?;

    let mut text = String::new();
    let mut last = None;
    for chunk in client.chat_stream(&request)? {
        let chunk = chunk?;
        text.push_str(&chunk.message.content);
        last = Some(chunk);
    }
    assert_eq!(text, "Hello");
    let last = last.ok_or_else(|| anyhow!("stream was empty"))?;
    assert!(last.done);
    assert_eq!(last.done_reason.as_deref(), Some("stop"));
    Ok(())
}

#[test]
fn test_create_from_blob_then_cleanup() -> crate::Result<()> {
    use std::io::Write;

    let mut gguf = tempfile::NamedTempFile::new()?;
    gguf.write_all(b"GGUF fake weights")?;
    let mut bytes = b"GGUF fake weights".as_slice();
    let digest = file_digest(&mut bytes)?;
    let blob_path = format!("/api/blobs/{digest}");

    let mut server = mockito::Server::new();
    let _head = server.mock("HEAD", blob_path.as_str()).with_status(404).create();
    let upload = server
        .mock("POST", blob_path.as_str())
        .with_status(201)
        .create();
    let create = server
        .mock("POST", "/api/create")
        .match_body(Matcher::PartialJson(
            json!({"model": "tiny", "files": {"tiny.gguf": digest.as_str()}}),
        ))
        .with_body("{\"status\":\"parsing GGUF\"}\n{\"status\":\"success\"}\n")
        .create();
    let copy = server.mock("POST", "/api/copy").with_status(200).create();
    let delete = server
        .mock("DELETE", "/api/delete")
        .match_body(Matcher::Json(json!({"model": "tiny"})))
        .with_status(200)
        .create();

    let client = mock_client(&server)?;
    let pushed = client.push_blob_file(gguf.path())?;
    assert_eq!(pushed, digest);

    let created = client.create_model(
        &CreateModelRequest::builder()
            .model("tiny")
            .files([("tiny.gguf".to_string(), pushed)].into())
            .build()?,
    )?;
    assert_eq!(created.last_status(), Some("success"));

    client.copy_model("tiny", "tiny-copy")?;
    let deleted = client.delete_model("tiny")?;
    assert!(deleted.status_messages.is_empty());

    upload.assert();
    create.assert();
    copy.assert();
    delete.assert();
    Ok(())
}

#[test]
fn test_server_errors_keep_their_message() -> crate::Result<()> {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/api/embed")
        .with_status(404)
        .with_body(r#"{"error":"model \"nomic-embed-text\" not found, try pulling it first"}"#)
        .create();

    let client = mock_client(&server)?;
    let err = client
        .embed(
            &EmbedRequest::builder()
                .model("nomic-embed-text")
                .input(vec!["a", "b"])
                .build()?,
        )
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert!(err.to_string().contains("try pulling it first"));
    Ok(())
}
