// Conversation loop tests - full runs against a scripted model using the
// built-in function catalog.

#[path = "../support/mod.rs"]
mod support;

use blockmind_core::agent::{Agent, AgentOptions};
use blockmind_core::catalog::builtin_registry;
use blockmind_core::coalescer::IncomingMessage;
use blockmind_core::memory::{InMemoryMemory, Memory};
use blockmind_core::model::{ModelResponse, ToolChoice};
use blockmind_core::tooling::{ToolDispatcher, ToolStatus};
use blockmind_core::types::MessageRole;
use blockmind_core::world::{OfflineWorld, Position};
use serde_json::Value;
use std::sync::Arc;
use support::{ScriptedProvider, tool_call};

fn agent(provider: ScriptedProvider, memory: Arc<InMemoryMemory>) -> Agent<ScriptedProvider> {
    let dispatcher = ToolDispatcher::new(Arc::new(builtin_registry().expect("catalog")));
    let world = Arc::new(OfflineWorld::new("Bot", "survival", Position::new(0.0, 70.0, 0.0)));
    Agent::new(provider, dispatcher, memory, world, AgentOptions::default())
}

#[tokio::test]
async fn plans_with_tasks_then_answers() {
    let provider = ScriptedProvider::new(vec![
        tool_call("c1", "task_add", r#"{"title": "gather wood", "priority": 2}"#),
        tool_call("c2", "task_completed", "{}"),
        ModelResponse::text("Wood gathered"),
    ]);
    let memory = Arc::new(InMemoryMemory::new());
    let mut agent = agent(provider.clone(), memory.clone());
    agent.push_inputs(vec![IncomingMessage::new("Alex", "get some wood")]);

    let outcome = agent.try_respond().await.expect("finishes");
    assert_eq!(outcome.response, "Wood gathered");
    assert!(outcome.steps.iter().all(|s| s.status == ToolStatus::Success));

    let requests = provider.requests().await;
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].tool_choice, ToolChoice::Auto);
    assert_eq!(requests[1].tool_choice, ToolChoice::Required);
    assert!(
        requests[1]
            .messages
            .last()
            .is_some_and(|m| m.content.ends_with("Your active task is:\ngather wood"))
    );
    assert_eq!(requests[2].tool_choice, ToolChoice::Auto);

    let saved = memory.load().await.expect("load").expect("snapshot");
    assert_eq!(saved.as_slice(), agent.state().messages());
}

#[tokio::test]
async fn combat_tools_hidden_by_default() {
    let provider = ScriptedProvider::new(vec![ModelResponse::text("hello")]);
    let mut agent = agent(provider.clone(), Arc::new(InMemoryMemory::new()));
    agent.push_inputs(vec![IncomingMessage::new("Alex", "hi")]);
    agent.try_respond().await.expect("reply");

    let requests = provider.requests().await;
    let names: Vec<_> = requests[0]
        .tools
        .iter()
        .map(|t| t.function.name.as_str())
        .collect();
    assert!(names.contains(&"get_time"));
    assert!(names.contains(&"get_nearby_entities"));
    assert!(!names.contains(&"attack_entity"));
    assert!(!names.contains(&"take_item_from_creative"));
}

#[tokio::test]
async fn invalid_arguments_are_reported_back() {
    let provider = ScriptedProvider::new(vec![
        tool_call("c1", "walk_to_position", r#"{"x": 1}"#),
        ModelResponse::text("I need all coordinates"),
    ]);
    let mut agent = agent(provider, Arc::new(InMemoryMemory::new()));
    agent.push_inputs(vec![IncomingMessage::new("Alex", "walk")]);

    let outcome = agent.try_respond().await.expect("reply");
    assert_eq!(outcome.steps[0].status, ToolStatus::Error);

    let tool_message = agent
        .state()
        .messages()
        .iter()
        .find(|m| m.role == MessageRole::Tool)
        .expect("tool result");
    let payload: Value = serde_json::from_str(&tool_message.content).expect("json");
    assert_eq!(payload["result"], "error");
    assert!(
        payload["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("Invalid arguments: y"))
    );
}

#[tokio::test]
async fn volatile_observations_are_pruned() {
    let provider = ScriptedProvider::new(vec![
        tool_call("c1", "get_nearby_entities", "{}"),
        ModelResponse::text("Nobody around"),
    ]);
    let mut agent = agent(provider, Arc::new(InMemoryMemory::new()));
    agent.push_inputs(vec![IncomingMessage::new("Alex", "who is near?")]);
    agent.try_respond().await.expect("reply");

    assert_eq!(agent.prune_tools(&["get_nearby_entities"]).await, 1);
    assert!(
        agent
            .state()
            .messages()
            .iter()
            .all(|m| m.role != MessageRole::Tool && !m.has_tool_calls())
    );
}
