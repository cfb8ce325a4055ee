use gemini_stream::cli::replay;
use gemini_stream::core::OutputFormat;
use gemini_stream::{Config, ResponseChunk, StreamError};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

const RECORDING: &str = concat!(
    "data: {\"candidates\": [{\"content\": {\"parts\": [{\"text\": \"Checking the \"}],\"role\": \"model\"},\"index\": 0}]}\r\n\r\n",
    "data: {\"candidates\": [{\"content\": {\"parts\": [{\"functionCall\": {\"name\": \"echo\",\"args\": {\"status\": \"ok\"}}}],\"role\": \"model\"},\"index\": 0}]}\r\n\r\n",
    "data: {\"candidates\": [{\"content\": {\"parts\": [{\"text\": \"status.\"}],\"role\": \"model\"},\"finishReason\": \"STOP\",\"index\": 0}],\"usageMetadata\": {\"promptTokenCount\": 4,\"totalTokenCount\": 12}}\r\n\r\n",
);

fn reader(body: &str) -> Cursor<Vec<u8>> {
    Cursor::new(body.as_bytes().to_vec())
}

fn config(enable_tools: bool, output: OutputFormat) -> Config {
    let mut config = Config::default();
    config.enable_tools = enable_tools;
    config.output = output;
    config
}

#[tokio::test]
async fn test_replay_writes_json_lines() {
    let mut output = Vec::new();
    let conversation = replay(reader(RECORDING), &mut output, &config(false, OutputFormat::Json))
        .await
        .unwrap();

    let lines: Vec<ResponseChunk> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2].extra["usageMetadata"]["totalTokenCount"], 12);
    assert_eq!(lines[2].candidates[0].extra["finishReason"], "STOP");

    assert_eq!(conversation.calls().len(), 1);
    assert!(conversation.messages().is_empty());
}

#[tokio::test]
async fn test_replay_text_with_tools() {
    let mut output = Vec::new();
    let conversation = replay(reader(RECORDING), &mut output, &config(true, OutputFormat::Text))
        .await
        .unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "Checking the status.\n");
    let messages = conversation.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, "system");
    assert_eq!(messages[0].content, r#"Result: {"status":"ok"}"#);
}

#[tokio::test]
async fn test_replay_stops_at_invalid_chunk() {
    let body = "data: {\"candidates\": []}\n\ndata: {broken\n\ndata: {\"candidates\": []}\n\n";
    let mut output = Vec::new();
    let err = replay(reader(body), &mut output, &config(false, OutputFormat::Json))
        .await
        .unwrap_err();

    assert!(matches!(err, StreamError::Decode(_)));
    assert_eq!(String::from_utf8(output).unwrap().lines().count(), 1);
}

#[tokio::test]
async fn test_replay_uses_config_file_fold_policy() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "enable_tools = true\noutput = \"json\"\n\n[fold]\nrole = \"function\"\nprefix = \"\"\n"
    )
    .unwrap();
    let config = Config::load_from(file.path()).unwrap();

    let mut output = Vec::new();
    let conversation = replay(reader(RECORDING), &mut output, &config).await.unwrap();

    let messages = conversation.into_messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, "function");
    assert_eq!(messages[0].content, r#"{"status":"ok"}"#);
}
