// Function registry tests - registration, filtering and schema output
//
// Exercises the public registry API the way a host application would when
// assembling its tool set.

use blockmind_core::catalog::builtin_registry;
use blockmind_core::tooling::{
    Param, ParamKind, ParameterSchema, RegistryError, ToolDefinition, ToolFilter, ToolRegistry,
    ToolReply, sync_handler,
};
use serde_json::json;

fn noop(name: &str) -> ToolDefinition {
    ToolDefinition::new(
        name,
        format!("{name} tool"),
        sync_handler(|_ctx, _args| Ok(ToolReply::success("ok").into())),
    )
}

#[test]
fn rejects_duplicate_names() {
    let mut registry = ToolRegistry::new();
    registry.register(noop("look")).expect("first");
    let err = registry.register(noop("look")).expect_err("duplicate");
    assert!(matches!(err, RegistryError::DuplicateName(name) if name == "look"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn register_all_stops_at_first_duplicate() {
    let mut registry = ToolRegistry::new();
    let result = registry.register_all([noop("a"), noop("b"), noop("a"), noop("c")]);
    assert!(result.is_err());
    assert!(registry.contains("a"));
    assert!(registry.contains("b"));
    assert!(!registry.contains("c"));
}

#[test]
fn listing_keeps_registration_order() {
    let mut registry = ToolRegistry::new();
    registry
        .register_all([noop("zeta"), noop("alpha"), noop("mid")])
        .expect("unique");
    let names: Vec<_> = registry
        .list(&ToolFilter::default())
        .map(|d| d.name.clone())
        .collect();
    assert_eq!(names, ["zeta", "alpha", "mid"]);
}

#[test]
fn groups_and_mode_gate_tools() {
    let mut registry = ToolRegistry::new();
    registry
        .register_all([
            noop("always"),
            noop("fight").with_group("combat"),
            noop("spawn").with_mode("creative"),
        ])
        .expect("unique");

    let survival = ToolFilter::new(Vec::<String>::new(), Some("survival".into()));
    let names: Vec<_> = registry.list(&survival).map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["always"]);

    let creative_fighter = ToolFilter::new(["combat"], Some("creative".into()));
    let names: Vec<_> = registry
        .list(&creative_fighter)
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, ["always", "fight", "spawn"]);
}

#[test]
fn schema_uses_function_envelope() {
    let mut registry = ToolRegistry::new();
    registry
        .register(
            noop("walk").with_parameters(
                ParameterSchema::new()
                    .param(Param::required("x", ParamKind::number()).with_description("X coordinate"))
                    .param(Param::optional("sprint", ParamKind::Boolean)),
            ),
        )
        .expect("unique");

    let schemas = registry.schemas(&ToolFilter::default());
    let value = serde_json::to_value(&schemas).expect("json");
    assert_eq!(value[0]["type"], "function");
    assert_eq!(value[0]["function"]["name"], "walk");
    assert_eq!(value[0]["function"]["parameters"]["type"], "object");
    assert_eq!(
        value[0]["function"]["parameters"]["properties"]["x"],
        json!({"type": "number", "description": "X coordinate"})
    );
    assert_eq!(value[0]["function"]["parameters"]["required"], json!(["x"]));
}

#[test]
fn builtin_catalog_registers_cleanly() {
    let registry = builtin_registry().expect("no duplicate built-ins");
    assert!(registry.contains("get_time"));
    assert!(registry.contains("task_insert"));
    assert!(registry.contains("attack_entity"));
}
