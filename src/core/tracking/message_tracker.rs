// Bounded in-memory snapshots of seen messages so deletion events can be
// surfaced later even when the platform cache has already evicted them.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

// Cap how many messages we keep in memory so the tracker can't grow unbounded.
const MAX_TRACKED_MESSAGES: usize = 5_000;

#[derive(Debug, Clone)]
pub struct TrackedMessage {
    pub message_id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub author_name: String,
    pub content: String,
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DeletedMessage {
    pub message: TrackedMessage,
    pub deleted_at: DateTime<Utc>,
}

pub struct MessageTracker {
    recent: DashMap<u64, TrackedMessage>,
    /// (guild_id, channel_id) -> most recently deleted message there.
    deleted: DashMap<(u64, u64), DeletedMessage>,
}

impl MessageTracker {
    pub fn new() -> Self {
        Self {
            recent: DashMap::new(),
            deleted: DashMap::new(),
        }
    }

    pub fn remember(&self, message: TrackedMessage) {
        self.recent.insert(message.message_id, message);

        // Simple eviction: drop an arbitrary entry once we cross the cap.
        if self.recent.len() > MAX_TRACKED_MESSAGES {
            if let Some(key) = self.recent.iter().next().map(|e| *e.key()) {
                self.recent.remove(&key);
            }
        }
    }

    /// Move a tracked message into the per-channel last-deleted slot.
    /// Unknown ids are ignored; we can't say anything useful about them.
    pub fn record_deletion(&self, message_id: u64) {
        if let Some((_, message)) = self.recent.remove(&message_id) {
            let key = (message.guild_id, message.channel_id);
            self.deleted.insert(
                key,
                DeletedMessage {
                    message,
                    deleted_at: Utc::now(),
                },
            );
        }
    }

    pub fn last_deleted(&self, guild_id: u64, channel_id: u64) -> Option<DeletedMessage> {
        self.deleted
            .get(&(guild_id, channel_id))
            .map(|entry| entry.clone())
    }
}

impl Default for MessageTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: u64, channel_id: u64) -> TrackedMessage {
        TrackedMessage {
            message_id: id,
            guild_id: 1,
            channel_id,
            author_id: 77,
            author_name: "someone".to_string(),
            content: format!("message {}", id),
            attachments: Vec::new(),
        }
    }

    #[test]
    fn recalls_the_last_deleted_message_per_channel() {
        let tracker = MessageTracker::new();
        tracker.remember(message(10, 5));
        tracker.remember(message(11, 5));

        tracker.record_deletion(10);
        tracker.record_deletion(11);

        let deleted = tracker.last_deleted(1, 5).unwrap();
        assert_eq!(deleted.message.message_id, 11);
    }

    #[test]
    fn channels_do_not_share_deletion_slots() {
        let tracker = MessageTracker::new();
        tracker.remember(message(20, 5));
        tracker.record_deletion(20);

        assert!(tracker.last_deleted(1, 6).is_none());
        assert!(tracker.last_deleted(2, 5).is_none());
    }

    #[test]
    fn untracked_deletions_are_ignored() {
        let tracker = MessageTracker::new();
        tracker.record_deletion(999);
        assert!(tracker.last_deleted(1, 1).is_none());
    }
}
