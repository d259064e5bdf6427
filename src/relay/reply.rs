//! Reply extraction from a thread's message list

use crate::assistant::{Role, ThreadMessage};

/// Join the text of every assistant-authored message with newlines
///
/// Messages keep the order the remote API listed them in. An assistant
/// message without text contributes an empty line rather than an error,
/// and a thread with no assistant messages yields an empty string.
///
/// # Examples
///
/// ```
/// use assistant_relay::assistant::ThreadMessage;
/// use assistant_relay::relay::join_assistant_replies;
///
/// let messages = vec![
///     ThreadMessage::assistant("A"),
///     ThreadMessage::user("question"),
///     ThreadMessage::assistant("B"),
/// ];
/// assert_eq!(join_assistant_replies(&messages), "A\nB");
/// ```
pub fn join_assistant_replies(messages: &[ThreadMessage]) -> String {
    messages
        .iter()
        .filter(|m| m.role == Role::Assistant)
        .map(|m| m.text.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}
