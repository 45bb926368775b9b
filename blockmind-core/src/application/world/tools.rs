use async_trait::async_trait;

use super::Position;
use crate::application::tooling::{
    HandlerError, HandlerReply, Param, ParamKind, ParameterSchema, ToolArgs, ToolContext,
    ToolDefinition, ToolHandler, ToolReply, sync_handler,
};
use crate::constants::DEFAULT_ENTITY_SEARCH_DISTANCE;

struct WalkToPosition;

#[async_trait]
impl ToolHandler for WalkToPosition {
    async fn call(&self, ctx: &mut ToolContext, args: ToolArgs) -> Result<HandlerReply, HandlerError> {
        let target = Position::new(
            args.f64("x").unwrap_or_default(),
            args.f64("y").unwrap_or_default(),
            args.f64("z").unwrap_or_default(),
        );
        let reached = ctx.world.walk_to(target).await?;
        Ok(ToolReply::new(format!("Reached to {reached}")).into())
    }
}

struct WalkToEntity;

#[async_trait]
impl ToolHandler for WalkToEntity {
    async fn call(&self, ctx: &mut ToolContext, args: ToolArgs) -> Result<HandlerReply, HandlerError> {
        let entity_id = args.str("entity_id").unwrap_or_default();
        let reached = ctx.world.walk_to_entity(entity_id).await?;
        Ok(ToolReply::new(format!("Reached to {entity_id} at {reached}")).into())
    }
}

struct AttackEntity;

#[async_trait]
impl ToolHandler for AttackEntity {
    async fn call(&self, ctx: &mut ToolContext, args: ToolArgs) -> Result<HandlerReply, HandlerError> {
        let entity_id = args.str("entity_id").unwrap_or_default();
        ctx.world.attack(entity_id).await?;
        Ok(ToolReply::new(format!("Attacking entity {entity_id}")).stop().into())
    }
}

struct NearbyEntities;

#[async_trait]
impl ToolHandler for NearbyEntities {
    async fn call(&self, ctx: &mut ToolContext, args: ToolArgs) -> Result<HandlerReply, HandlerError> {
        let max_distance = args
            .f64("max_distance")
            .unwrap_or(DEFAULT_ENTITY_SEARCH_DISTANCE);
        let mut entities = ctx.world.nearby_entities(max_distance).await?;
        entities.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(ToolReply::new(serde_json::to_value(entities)?).into())
    }
}

struct TakeCreativeItem;

#[async_trait]
impl ToolHandler for TakeCreativeItem {
    async fn call(&self, ctx: &mut ToolContext, args: ToolArgs) -> Result<HandlerReply, HandlerError> {
        let item_id = args.str("item_id").unwrap_or_default();
        let amount = args
            .i64("amount")
            .and_then(|amount| u32::try_from(amount).ok())
            .unwrap_or(1);
        let display_name = ctx.world.give_creative_item(item_id, amount).await?;
        Ok(ToolReply::new(format!("{display_name} is now in your hand")).into())
    }
}

fn entity_id_param(description: &str) -> ParameterSchema {
    ParameterSchema::new()
        .param(Param::required("entity_id", ParamKind::String).with_description(description))
}

/// Movement, combat and status tools backed by the context's [`World`](super::World).
pub fn world_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new("walk_to_position", "Walk to specified coordinates", WalkToPosition)
            .with_parameters(
                ParameterSchema::new()
                    .param(Param::required("x", ParamKind::number()))
                    .param(Param::required("y", ParamKind::number()))
                    .param(Param::required("z", ParamKind::number())),
            ),
        ToolDefinition::new(
            "walk_to_entity",
            "Walk to entity that is specified by entity_id. \
             List of nearby entities can be obtained using get_nearby_entities.",
            WalkToEntity,
        )
        .with_parameters(entity_id_param("Id of the entity to walk to")),
        ToolDefinition::new(
            "attack_entity",
            "You can use this function to attack an entity or mobs for farm or other purposes",
            AttackEntity,
        )
        .with_group("combat")
        .with_parameters(entity_id_param("The id of the entity to attack")),
        ToolDefinition::new(
            "get_nearby_entities",
            "Get the nearby entities. Returns list of: entity_id, distance (meters), \
             entity_type, username (if player)",
            NearbyEntities,
        )
        .with_parameters(ParameterSchema::new().param(
            Param::optional("max_distance", ParamKind::number_range(20.0, 1000.0))
                .with_description("The maximum distance to search for entities. Default: 100"),
        )),
        ToolDefinition::new(
            "get_hunger_level",
            "Returns level of player's hunger",
            sync_handler(|ctx, _args| {
                let level = ctx.world.food();
                Ok(ToolReply::new(format!(
                    "Food saturation is at {level} ({}%)",
                    level * 5.0
                ))
                .into())
            }),
        )
        .with_mode("survival"),
        ToolDefinition::new(
            "get_health_level",
            "Returns level of player's health",
            sync_handler(|ctx, _args| {
                let level = ctx.world.health();
                Ok(ToolReply::new(format!("Health is at {level} ({}%)", level * 5.0)).into())
            }),
        )
        .with_mode("survival"),
        ToolDefinition::new(
            "take_item_from_creative",
            "Takes item or block from creative mode menu and places it into active quickbar slot",
            TakeCreativeItem,
        )
        .with_mode("creative")
        .with_parameters(
            ParameterSchema::new()
                .param(
                    Param::required("item_id", ParamKind::String).with_description(
                        "Minecraft item id. No tag needed, e.g. \"stone\" or similar.",
                    ),
                )
                .param(
                    Param::required("amount", ParamKind::integer_range(1, 64))
                        .with_description("Amount of items to take"),
                ),
        ),
    ]
}
