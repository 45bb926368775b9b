use blockmind_core::coalescer::IncomingMessage;

const ANONYMOUS: &str = "player";

/// Reads one `name: text` chat line. Lines without a name are attributed to
/// an anonymous player; blank lines and the agent's own lines are skipped.
pub fn parse_line(line: &str, own_username: &str) -> Option<IncomingMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (username, text) = match line.split_once(':') {
        Some((name, text)) if is_username(name.trim()) => (name.trim(), text.trim()),
        _ => (ANONYMOUS, line),
    };
    if text.is_empty() || username == own_username {
        return None;
    }
    Some(IncomingMessage::new(username, text))
}

fn is_username(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.len() <= 16
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
