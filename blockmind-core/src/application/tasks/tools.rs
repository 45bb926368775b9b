//! Tools that let the model plan with the [`TaskList`](super::TaskList).
//!
//! Problems are reported as bare strings so the dispatcher marks them as
//! errors; everything else is a structured success.

use serde_json::json;

use super::list::TaskDescription;
use crate::application::tooling::schema::MAX_SAFE_INTEGER;
use crate::application::tooling::{
    HandlerError, Param, ParamKind, ParameterSchema, ToolArgs, ToolDefinition, ToolReply,
    sync_handler,
};

const NO_ACTIVE_TASK: &str = "There is no active tasks!";

fn title_param() -> Param {
    Param::required("title", ParamKind::String).with_description("Short, descriptive title (max 10 words)")
}

fn markdown_param() -> Param {
    Param::optional("markdown", ParamKind::String).with_description("Detailed task description in markdown")
}

fn priority_param() -> Param {
    Param::optional("priority", ParamKind::integer())
        .with_description("Task priority. Higher value = higher priority. Default: 0")
}

fn index_param(description: &str) -> Param {
    Param::required("index", ParamKind::integer_range(0, MAX_SAFE_INTEGER)).with_description(description)
}

fn index_arg(args: &ToolArgs) -> Result<usize, HandlerError> {
    args.i64("index")
        .and_then(|index| usize::try_from(index).ok())
        .ok_or_else(|| HandlerError::message("index must be a non-negative integer"))
}

fn description_arg(args: &ToolArgs) -> TaskDescription {
    TaskDescription {
        title: args.str("title").unwrap_or_default().to_string(),
        markdown: args.str("markdown").map(str::to_string),
        priority: args.i64("priority"),
        completed: None,
    }
}

pub fn task_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "task_get_active",
            "Returns currently active (not completed) task",
            sync_handler(|ctx, _args| match ctx.tasks.active() {
                Some(task) => Ok(ToolReply::success(serde_json::to_value(task)?).into()),
                None => Ok(NO_ACTIVE_TASK.into()),
            }),
        ),
        ToolDefinition::new(
            "task_completed",
            "Marks currently active task as completed. Completed tasks become inactive. \
             Use this tool if you are absolutely sure that task is completed successfully.",
            sync_handler(|ctx, _args| match ctx.tasks.mark_completed() {
                Some(index) => {
                    Ok(ToolReply::success(format!("Task at index {index} marked as completed")).into())
                }
                None => Ok("There is no active tasks to mark complete!".into()),
            }),
        ),
        ToolDefinition::new(
            "task_revert",
            "Revert task at specified index to incomplete state. \
             Use this tool to correct mistakenly completed task.",
            sync_handler(|ctx, args| {
                let index = index_arg(&args)?;
                Ok(match ctx.tasks.mark_incomplete(index) {
                    Some(task) => ToolReply::success(format!(
                        "Task '{}' reverted to incomplete state",
                        task.title
                    ))
                    .into(),
                    None => format!("Task with index {index} is not found!").into(),
                })
            }),
        )
        .with_parameters(
            ParameterSchema::new().param(index_param("Index of task to mark incomplete.")),
        ),
        ToolDefinition::new(
            "task_list",
            "Returns list of all tasks, even if they are inactive. Tasks are sorted by priority. \
             Detailed task markdown description is omitted.",
            sync_handler(|ctx, _args| {
                if ctx.tasks.is_empty() {
                    return Ok("Task list is empty!".into());
                }
                let summary: Vec<_> = ctx
                    .tasks
                    .tasks()
                    .iter()
                    .map(|task| {
                        json!({
                            "title": task.title,
                            "priority": task.priority,
                            "completed": task.completed,
                        })
                    })
                    .collect();
                Ok(ToolReply::success(summary).into())
            }),
        ),
        ToolDefinition::new(
            "task_clear",
            "Removes all tasks from the list. Use it if you made a big error when creating \
             task list or when you are sure that all tasks are completed.",
            sync_handler(|ctx, _args| {
                ctx.tasks.clear();
                Ok(ToolReply::success("Task list is cleared").into())
            }),
        ),
        ToolDefinition::new(
            "task_set",
            "Rewrites whole task list. Tasks will be automatically sorted by priority. \
             Order of tasks with the same priority is not changed.",
            sync_handler(|ctx, args| {
                let tasks: Vec<TaskDescription> = args.parse("tasks")?.unwrap_or_default();
                if tasks.is_empty() {
                    return Ok("No task list provided!".into());
                }
                let indices = ctx.tasks.set(tasks);
                Ok(ToolReply::success(format!("Task list set. Task indices: {indices:?}")).into())
            }),
        )
        .with_parameters(ParameterSchema::new().param(Param::required(
            "tasks",
            ParamKind::array(ParamKind::object(vec![
                title_param(),
                markdown_param(),
                priority_param(),
                Param::optional("completed", ParamKind::Boolean)
                    .with_description("Task completion flag. Default: false"),
            ])),
        ))),
        ToolDefinition::new(
            "task_add",
            "Inserts one task in the task list. Index of the new task will be determined \
             based on provided priority.",
            sync_handler(|ctx, args| {
                let index = ctx.tasks.add(description_arg(&args));
                Ok(ToolReply::success(format!("Task inserted at index {index}")).into())
            }),
        )
        .with_parameters(
            ParameterSchema::new()
                .param(title_param())
                .param(markdown_param())
                .param(priority_param()),
        ),
        ToolDefinition::new(
            "task_insert",
            "Inserts one task in the task list by index. Use this function only if necessary.",
            sync_handler(|ctx, args| {
                let index = index_arg(&args)?;
                Ok(match ctx.tasks.insert(index, description_arg(&args)) {
                    Ok(inserted) => {
                        ToolReply::success(format!("Task inserted at index {inserted}")).into()
                    }
                    Err(_) => format!("Failed to create a task at index {index}").into(),
                })
            }),
        )
        .with_parameters(
            ParameterSchema::new()
                .param(index_param("Index in the list to insert task to"))
                .param(title_param())
                .param(markdown_param()),
        ),
        ToolDefinition::new(
            "task_remove",
            "Removes task from the list. Use this function only if necessary. \
             If active task is completed, use 'task_completed'.",
            sync_handler(|ctx, args| {
                let index = index_arg(&args)?;
                Ok(match ctx.tasks.remove(index) {
                    Some(task) => ToolReply::success(format!(
                        "Task '{}' at index {index} is removed",
                        task.title
                    ))
                    .into(),
                    None => format!("Task with index {index} is not found!").into(),
                })
            }),
        )
        .with_parameters(ParameterSchema::new().param(index_param("Index of the task to remove"))),
    ]
}
