// Tool dispatcher tests - validation, result normalization and failure
// containment as seen from outside the crate.

use async_trait::async_trait;
use blockmind_core::tooling::{
    HandlerError, HandlerReply, Param, ParamKind, ParameterSchema, ToolArgs, ToolContext,
    ToolDefinition, ToolDispatcher, ToolHandler, ToolRegistry, ToolReply, ToolStatus, sync_handler,
};
use blockmind_core::world::OfflineWorld;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct CountingHandler(Arc<AtomicUsize>);

#[async_trait]
impl ToolHandler for CountingHandler {
    async fn call(&self, _ctx: &mut ToolContext, args: ToolArgs) -> Result<HandlerReply, HandlerError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        let amount = args.i64("amount").unwrap_or(1);
        Ok(ToolReply::success(json!({"amount": amount})).into())
    }
}

fn setup() -> (ToolDispatcher, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ToolRegistry::new();
    registry
        .register(
            ToolDefinition::new("take", "Take items", CountingHandler(calls.clone())).with_parameters(
                ParameterSchema::new()
                    .param(Param::required("item", ParamKind::String))
                    .param(Param::optional("amount", ParamKind::integer_range(1, 64))),
            ),
        )
        .expect("take");
    registry
        .register(ToolDefinition::new(
            "grumble",
            "Always complains",
            sync_handler(|_ctx, _args| Ok("I cannot do that".into())),
        ))
        .expect("grumble");
    registry
        .register(ToolDefinition::new(
            "crash",
            "Panics",
            sync_handler(|_ctx, _args| panic!("handler bug")),
        ))
        .expect("crash");
    (ToolDispatcher::new(Arc::new(registry)), calls)
}

fn context() -> ToolContext {
    ToolContext::new(Arc::new(OfflineWorld::default()))
}

#[tokio::test]
async fn valid_call_reaches_handler() {
    let (dispatcher, calls) = setup();
    let result = dispatcher
        .invoke_json("take", &mut context(), r#"{"item": "dirt", "amount": 3}"#)
        .await;
    assert_eq!(result.status, ToolStatus::Success);
    assert_eq!(result.message, json!({"amount": 3}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn out_of_range_argument_never_reaches_handler() {
    let (dispatcher, calls) = setup();
    let result = dispatcher
        .invoke("take", &mut context(), json!({"item": "dirt", "amount": 65}))
        .await;
    assert_eq!(result.status, ToolStatus::Error);
    assert!(result.message_text().starts_with("Invalid arguments: amount"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wrong_type_is_rejected() {
    let (dispatcher, calls) = setup();
    let result = dispatcher
        .invoke("take", &mut context(), json!({"item": 5}))
        .await;
    assert_eq!(result.status, ToolStatus::Error);
    assert!(result.message_text().contains("item"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_function_is_named() {
    let (dispatcher, _) = setup();
    let result = dispatcher.invoke("fly", &mut context(), json!({})).await;
    assert_eq!(result.status, ToolStatus::Error);
    assert_eq!(result.message_text(), "Function 'fly' not found!");
}

#[tokio::test]
async fn bare_text_reply_is_an_error() {
    let (dispatcher, _) = setup();
    let result = dispatcher.invoke_json("grumble", &mut context(), "").await;
    assert_eq!(result.status, ToolStatus::Error);
    assert_eq!(result.message_text(), "I cannot do that");
    assert_eq!(
        result.to_payload(),
        json!({"result": "error", "message": "I cannot do that"})
    );
}

#[tokio::test]
async fn panicking_handler_is_contained() {
    let (dispatcher, _) = setup();
    let result = dispatcher.invoke("crash", &mut context(), json!({})).await;
    assert_eq!(result.status, ToolStatus::Error);
    assert!(result.message_text().contains("crash"));

    // The dispatcher keeps working afterwards.
    let again = dispatcher
        .invoke("take", &mut context(), json!({"item": "sand"}))
        .await;
    assert!(again.is_success());
}
