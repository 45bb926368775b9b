use chrono::{DateTime, Local};

use super::handler::sync_handler;
use super::registry::ToolDefinition;
use super::result::ToolReply;
use super::schema::{Param, ParamKind, ParameterSchema};

const DEFAULT_FORMAT: &str = "%H:%M";

/// `get_time`: wall-clock time, formatted with an optional strftime pattern.
pub fn get_time_tool() -> ToolDefinition {
    ToolDefinition::new(
        "get_time",
        "Get the current local time",
        sync_handler(|_ctx, args| {
            let format = args.str("format").unwrap_or(DEFAULT_FORMAT);
            Ok(ToolReply::success(format_time(Local::now(), format)).into())
        }),
    )
    .with_parameters(ParameterSchema::new().param(
        Param::optional("format", ParamKind::String).with_description("strftime pattern, default %H:%M"),
    ))
}

fn format_time(now: DateTime<Local>, format: &str) -> String {
    use std::fmt::Write;

    let mut rendered = String::new();
    // An invalid pattern makes `Display` fail instead of producing text.
    if write!(rendered, "{}", now.format(format)).is_err() {
        return now.format(DEFAULT_FORMAT).to_string();
    }
    rendered
}
