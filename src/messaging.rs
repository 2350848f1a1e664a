use crate::data::{Message, MessageKind, SessionUser};
use chrono::Utc;

/// Append-only; only the read flag ever changes. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    sent: u64,
}

impl MessageStore {
    pub fn new(seed: Vec<Message>) -> Self {
        Self {
            messages: seed,
            sent: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn send_message(&mut self, sender: &SessionUser, receiver_id: &str, body: &str) -> &Message {
        let now = Utc::now();
        self.sent += 1;
        let message = Message {
            id: format!("msg-{}-{}", now.timestamp_millis(), self.sent),
            sender_id: sender.id.clone(),
            receiver_id: receiver_id.to_string(),
            body: body.to_string(),
            timestamp: now,
            read: false,
            kind: MessageKind::Text,
        };
        log::debug!("{} -> {}: message {}", message.sender_id, message.receiver_id, message.id);
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn mark_as_read(&mut self, message_id: &str) -> bool {
        match self.messages.iter_mut().find(|m| m.id == message_id) {
            Some(message) => {
                message.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_conversation_read(&mut self, reader: &str, partner: &str) -> usize {
        let mut changed = 0;
        for message in self
            .messages
            .iter_mut()
            .filter(|m| m.sender_id == partner && m.receiver_id == reader && !m.read)
        {
            message.read = true;
            changed += 1;
        }
        changed
    }

    /// Both directions between `a` and `b`, oldest first. Equal timestamps keep
    /// insertion order, so the result does not depend on argument order.
    pub fn get_conversation(&self, a: &str, b: &str) -> Vec<&Message> {
        let mut conversation: Vec<&Message> =
            self.messages.iter().filter(|m| m.involves_pair(a, b)).collect();
        conversation.sort_by_key(|m| m.timestamp);
        conversation
    }

    pub fn get_unread_count(&self, user_id: &str) -> usize {
        self.messages.iter().filter(|m| m.is_unread_for(user_id)).count()
    }

    pub fn conversation_partners(&self, user_id: &str) -> Vec<String> {
        let mut latest: Vec<(&str, &Message)> = Vec::new();
        for message in &self.messages {
            let partner = if message.sender_id == user_id {
                message.receiver_id.as_str()
            } else if message.receiver_id == user_id {
                message.sender_id.as_str()
            } else {
                continue;
            };
            match latest.iter_mut().find(|(id, _)| *id == partner) {
                Some(entry) if entry.1.timestamp <= message.timestamp => entry.1 = message,
                Some(_) => {}
                None => latest.push((partner, message)),
            }
        }
        latest.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));
        latest.into_iter().map(|(id, _)| id.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PlatformData;

    fn fixture() -> (PlatformData, MessageStore) {
        let data = PlatformData::bundled().unwrap();
        let store = MessageStore::new(data.messages.clone());
        (data, store)
    }

    fn user(data: &PlatformData, id: &str) -> SessionUser {
        data.users.find_by_id(id).unwrap().redact()
    }

    #[test]
    fn unread_count_matches_definition() {
        let (data, store) = fixture();
        for record in data.users.iter() {
            let expected = data
                .messages
                .iter()
                .filter(|m| m.receiver_id == record.id() && !m.read)
                .count();
            assert_eq!(store.get_unread_count(record.id()), expected);
        }
    }

    #[test]
    fn send_then_read_moves_unread_count_by_one() {
        let (data, mut store) = fixture();
        let sender = user(&data, "investor-1");
        let before = store.get_unread_count("entrepreneur-3");
        let len = store.len();

        let id = store.send_message(&sender, "entrepreneur-3", "Hello Lina").id.clone();
        assert_eq!(store.len(), len + 1);
        assert_eq!(store.get_unread_count("entrepreneur-3"), before + 1);

        assert!(store.mark_as_read(&id));
        assert_eq!(store.get_unread_count("entrepreneur-3"), before);
        assert!(!store.mark_as_read("msg-missing"));
        assert_eq!(store.len(), len + 1);
    }

    #[test]
    fn sent_messages_get_distinct_ids() {
        let (data, mut store) = fixture();
        let sender = user(&data, "admin-1");
        let a = store.send_message(&sender, "investor-1", "one").id.clone();
        let b = store.send_message(&sender, "investor-1", "two").id.clone();
        assert_ne!(a, b);
        let last = store.messages().last().unwrap();
        assert_eq!(last.kind, MessageKind::Text);
        assert!(!last.read);
        assert_eq!(last.sender_id, "admin-1");
    }

    #[test]
    fn conversation_is_sorted_exact_and_symmetric() {
        let (data, mut store) = fixture();
        let founder = user(&data, "entrepreneur-1");
        store.send_message(&founder, "investor-1", "Following up on Thursday");

        let ab = store.get_conversation("investor-1", "entrepreneur-1");
        let ba = store.get_conversation("entrepreneur-1", "investor-1");
        assert_eq!(ab, ba);
        assert!(ab.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        let expected = store
            .messages()
            .iter()
            .filter(|m| m.involves_pair("investor-1", "entrepreneur-1"))
            .count();
        assert_eq!(ab.len(), expected);
        assert!(ab.iter().all(|m| m.involves_pair("entrepreneur-1", "investor-1")));
        assert_eq!(ab.last().unwrap().body, "Following up on Thursday");
    }

    #[test]
    fn marking_a_conversation_read_only_touches_incoming() {
        let (_, mut store) = fixture();
        let unread = store.get_unread_count("investor-1");
        let changed = store.mark_conversation_read("investor-1", "entrepreneur-1");
        assert_eq!(store.get_unread_count("investor-1"), unread - changed);
        assert_eq!(store.mark_conversation_read("investor-1", "entrepreneur-1"), 0);
    }

    #[test]
    fn partners_are_ordered_by_latest_message() {
        let (_, store) = fixture();
        let partners = store.conversation_partners("investor-1");
        assert_eq!(partners, vec!["entrepreneur-2".to_string(), "entrepreneur-1".to_string()]);
        assert!(store.conversation_partners("nobody").is_empty());
    }
}
