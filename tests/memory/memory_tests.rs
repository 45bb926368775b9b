// Memory tests - snapshot persistence through the public Memory contract

use blockmind_core::memory::{InMemoryMemory, JsonFileMemory, Memory, MemoryError};
use blockmind_core::types::{ChatMessage, ToolCall};
use std::fs;
use tempfile::tempdir;

fn conversation() -> Vec<ChatMessage> {
    let call = ToolCall::new("call_1", "get_time", "{}");
    vec![
        ChatMessage::system("You are a bot"),
        ChatMessage::user("User Alex said: time?").with_name("Alex"),
        ChatMessage::assistant_tool_call("", call.clone()),
        ChatMessage::tool_result(&call, r#"{"result":"success","message":"12:00"}"#),
        ChatMessage::assistant("It is 12:00"),
    ]
}

#[tokio::test]
async fn file_snapshot_survives_new_instance() {
    let dir = tempdir().expect("tempdir");
    JsonFileMemory::for_agent(dir.path(), "Bot")
        .save(&conversation())
        .await
        .expect("save");

    let reopened = JsonFileMemory::for_agent(dir.path(), "Bot");
    assert_eq!(reopened.path(), dir.path().join("Bot").join("memory.json"));
    let loaded = reopened.load().await.expect("load").expect("snapshot");
    assert_eq!(loaded, conversation());
}

#[tokio::test]
async fn agents_do_not_share_files() {
    let dir = tempdir().expect("tempdir");
    JsonFileMemory::for_agent(dir.path(), "Bot")
        .save(&conversation())
        .await
        .expect("save");

    let other = JsonFileMemory::for_agent(dir.path(), "Digger");
    assert!(other.load().await.expect("load").is_none());
}

#[tokio::test]
async fn save_replaces_previous_snapshot() {
    let dir = tempdir().expect("tempdir");
    let memory = JsonFileMemory::for_agent(dir.path(), "Bot");
    memory.save(&conversation()).await.expect("save");
    memory
        .save(&[ChatMessage::system("fresh")])
        .await
        .expect("save");

    let loaded = memory.load().await.expect("load").expect("snapshot");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].content, "fresh");
}

#[tokio::test]
async fn corrupt_file_is_reported() {
    let dir = tempdir().expect("tempdir");
    let memory = JsonFileMemory::for_agent(dir.path(), "Bot");
    fs::create_dir_all(dir.path().join("Bot")).expect("dir");
    fs::write(memory.path(), "not json").expect("write");

    let err = memory.load().await.expect_err("corrupt");
    assert!(matches!(err, MemoryError::Serialize { .. }));
}

#[tokio::test]
async fn in_memory_round_trip() {
    let memory = InMemoryMemory::new();
    assert!(memory.load().await.expect("load").is_none());
    memory.save(&conversation()).await.expect("save");
    assert_eq!(memory.load().await.expect("load"), Some(conversation()));
}
