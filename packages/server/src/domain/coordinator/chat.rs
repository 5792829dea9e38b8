//! Chat routing: room broadcast or `@name` direct message.

use super::Coordinator;
use crate::domain::{
    entity::ChatMessage,
    error::SessionError,
    outcome::ChatDelivery,
    value_object::{ConnectionId, MessageContent},
};

/// Split `@name rest` into `(name, rest)`.
///
/// `name` is the run of non-whitespace after `@`; `rest` is what follows the
/// separating whitespace and must not be blank.
pub fn parse_mention(text: &str) -> Option<(&str, &str)> {
    let body = text.strip_prefix('@')?;
    let (name, rest) = body.split_once(char::is_whitespace)?;
    let rest = rest.trim_start();
    if name.is_empty() || rest.trim().is_empty() {
        return None;
    }
    Some((name, rest))
}

impl Coordinator {
    /// Split a mention into its target and body.
    ///
    /// A registered display name (spaces allowed) is matched first; otherwise
    /// the first word is taken as an unknown name and the target is `None`.
    fn resolve_mention<'t>(&self, text: &'t str) -> Option<(Option<ConnectionId>, &'t str)> {
        let body = text.strip_prefix('@')?;
        if let Some((target, rest)) = self.registry.match_mention(body)
            && !rest.trim().is_empty()
        {
            return Some((Some(target), rest.trim_start()));
        }
        let (name, rest) = parse_mention(text)?;
        tracing::debug!("Mention target '{}' not found, dropping message", name);
        Some((None, rest))
    }

    /// Decide who receives a chat message from `from`.
    ///
    /// A mention goes only to the connection with the longest display name
    /// that follows the `@`; an unknown name yields no recipients. Anything else goes to the
    /// sender's room (and into its history), or to every other connection when
    /// the sender is in no room.
    pub fn post_chat(
        &mut self,
        from: &ConnectionId,
        content: MessageContent,
    ) -> Result<ChatDelivery, SessionError> {
        let sender_name = self.registry.lookup(from)?.clone();
        let timestamp = self.now();

        if let Some((target, rest)) = self.resolve_mention(content.as_str())
            && let Ok(body) = MessageContent::new(rest.to_string())
        {
            let recipients: Vec<ConnectionId> = target.into_iter().collect();
            return Ok(ChatDelivery {
                message: ChatMessage {
                    from: from.clone(),
                    sender_name,
                    content: body,
                    timestamp,
                },
                recipients,
                direct: true,
            });
        }

        let message = ChatMessage {
            from: from.clone(),
            sender_name,
            content,
            timestamp,
        };

        let room = match self.directory.room_of_member(from).cloned() {
            Some(key) => self.directory.get_mut(&key),
            None => None,
        };
        let recipients = match room {
            Some(room) => {
                room.push_message(message.clone(), self.chat_history_limit);
                room.members_except(from)
            }
            None => self.registry.ids_except(from),
        };

        Ok(ChatDelivery {
            message,
            recipients,
            direct: false,
        })
    }
}
