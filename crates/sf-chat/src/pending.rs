//! Replies waiting for their delivery time.
//!
//! A reply captures the character and message at the moment it is
//! scheduled. Changing the selection afterwards does not affect it.

use std::collections::VecDeque;
use std::time::Instant;

use sf_core::Character;

/// A character reply scheduled for later delivery.
#[derive(Debug, Clone)]
pub struct PendingReply {
    /// When the reply becomes due.
    pub due: Instant,
    /// The character as it was when the message was sent.
    pub character: Character,
    /// The user message being answered.
    pub prompt: String,
}

/// Queue of pending replies ordered by due time.
#[derive(Debug, Clone, Default)]
pub struct PendingReplies {
    queue: VecDeque<PendingReply>,
}

impl PendingReplies {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a reply. Replies with equal due times keep insertion order.
    pub fn schedule(&mut self, reply: PendingReply) {
        let pos = self
            .queue
            .iter()
            .position(|p| p.due > reply.due)
            .unwrap_or(self.queue.len());
        self.queue.insert(pos, reply);
    }

    /// Remove and return every reply whose due time is at or before `now`.
    pub fn take_due(&mut self, now: Instant) -> Vec<PendingReply> {
        let mut due = Vec::new();
        while self.queue.front().is_some_and(|p| p.due <= now) {
            if let Some(reply) = self.queue.pop_front() {
                due.push(reply);
            }
        }
        due
    }

    /// Earliest due time, if anything is pending.
    pub fn next_due(&self) -> Option<Instant> {
        self.queue.front().map(|p| p.due)
    }

    /// Pending replies in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingReply> {
        self.queue.iter()
    }

    /// Number of pending replies.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn reply(due: Instant, name: &str) -> PendingReply {
        PendingReply {
            due,
            character: Character::new(name, "desc", ""),
            prompt: "hi".to_string(),
        }
    }

    #[test]
    fn nothing_due_before_deadline() {
        let now = Instant::now();
        let mut q = PendingReplies::new();
        q.schedule(reply(now + Duration::from_millis(1000), "Lyra"));
        assert!(q.take_due(now).is_empty());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn due_replies_drained_in_order() {
        let now = Instant::now();
        let mut q = PendingReplies::new();
        q.schedule(reply(now + Duration::from_millis(20), "B"));
        q.schedule(reply(now + Duration::from_millis(10), "A"));
        q.schedule(reply(now + Duration::from_millis(30), "C"));

        let due = q.take_due(now + Duration::from_millis(25));
        let names: Vec<&str> = due.iter().map(|r| r.character.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_due(), Some(now + Duration::from_millis(30)));
    }

    #[test]
    fn equal_deadlines_keep_insertion_order() {
        let now = Instant::now();
        let mut q = PendingReplies::new();
        q.schedule(reply(now, "first"));
        q.schedule(reply(now, "second"));
        let due = q.take_due(now);
        assert_eq!(due[0].character.name, "first");
        assert_eq!(due[1].character.name, "second");
        assert!(q.is_empty());
        assert!(q.next_due().is_none());
    }
}
