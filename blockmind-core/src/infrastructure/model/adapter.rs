//! Conversion of conversation messages to the chat-completions wire format.

use serde_json::{Map, Value, json};

use crate::domain::types::{ChatMessage, MessageRole};

pub struct MessageAdapter;

impl MessageAdapter {
    /// `[{"role": ..., "content": ..., ...}]`. Assistant tool requests carry
    /// `tool_calls`, tool results carry `tool_call_id`; the local `tool_name`
    /// tag is dropped.
    pub fn to_openai_format(messages: &[ChatMessage]) -> Vec<Value> {
        messages.iter().map(Self::to_openai_message).collect()
    }

    fn to_openai_message(message: &ChatMessage) -> Value {
        let mut wire = Map::new();
        wire.insert("role".into(), Value::from(message.role.as_str()));
        wire.insert("content".into(), Value::from(message.content.clone()));

        if let Some(name) = &message.name {
            wire.insert("name".into(), Value::from(name.clone()));
        }
        if message.role == MessageRole::Assistant && message.has_tool_calls() {
            let calls = message
                .tool_calls
                .iter()
                .map(|call| {
                    json!({
                        "id": call.id,
                        "type": "function",
                        "function": { "name": call.name, "arguments": call.arguments },
                    })
                })
                .collect();
            wire.insert("tool_calls".into(), Value::Array(calls));
        }
        if let Some(id) = &message.tool_call_id {
            wire.insert("tool_call_id".into(), Value::from(id.clone()));
        }
        Value::Object(wire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ToolCall;

    #[test]
    fn tool_round_trip_shape() {
        let call = ToolCall::new("call_9", "get_time", "{}");
        let messages = vec![
            ChatMessage::user("User Alex said: time?").with_name("Alex"),
            ChatMessage::assistant_tool_call("", call.clone()),
            ChatMessage::tool_result(&call, r#"{"result":"success","message":"12:00"}"#),
        ];
        let wire = MessageAdapter::to_openai_format(&messages);

        assert_eq!(wire[0]["name"], "Alex");
        assert_eq!(
            wire[1]["tool_calls"],
            json!([{"id": "call_9", "type": "function", "function": {"name": "get_time", "arguments": "{}"}}])
        );
        assert_eq!(wire[2]["tool_call_id"], "call_9");
        assert!(wire[2].get("tool_name").is_none());
    }
}
