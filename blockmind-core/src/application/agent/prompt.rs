use crate::application::world::Position;

pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a minecraft bot player. Your username is: {username}.
Just play the game and help other players. Use tools to interact with the game.
Tools always print out results from your point of view in the game (e.g. if tool says YOU have 100% health, it is YOUR (bot) health).
Everything you say is sent to minecraft chat, so keep it short and don't use multiline answers.

Use the task list for complex task execution (like building a house or keeping a farm running)! Break tasks into subtasks and execute them one by one.
Don't use task list for tasks that can be completed by only one tool call.
Task list can be modified by tools that start with \"task_*\".";

pub fn render_system_prompt(template: &str, username: &str) -> String {
    template.replace("{username}", username)
}

pub fn status_message(position: Position, active_task: Option<&str>) -> String {
    match active_task {
        Some(task) => format!("Your position: {position}\nYour active task is:\n{task}"),
        None => format!("Your position: {position}\nYou have no active tasks"),
    }
}

pub fn address_check(username: &str) -> String {
    format!(
        "Analyze messages and determine whether the last message could have been addressed to you. \
         Return true if so, and false otherwise.\nYour username: {username}"
    )
}

pub fn repeat_warning(tool: &str, times: usize) -> String {
    format!("You called '{tool}' {times} times in a row. Consider a different approach.")
}

pub fn repeat_blocked(tool: &str, times: usize) -> String {
    format!("Function '{tool}' was called {times} times in a row and is blocked. Try a different approach.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_names_agent() {
        let prompt = render_system_prompt(DEFAULT_SYSTEM_PROMPT, "Digger");
        assert!(prompt.contains("Your username is: Digger."));
        assert!(!prompt.contains("{username}"));
    }

    #[test]
    fn status_mentions_active_task() {
        let position = Position::new(1.0, 64.0, 2.5);
        assert_eq!(
            status_message(position, Some("build a hut")),
            "Your position: (1, 64, 2.5)\nYour active task is:\nbuild a hut"
        );
        assert!(status_message(position, None).ends_with("You have no active tasks"));
    }
}
