//! Pending-message queue and reply filters.

use std::collections::VecDeque;

use msgq_core::protocol::{Envelope, Message};

/// Which messages a receive call is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyFilter {
    /// Anything that is not a reply (broadcasts, requests).
    #[default]
    NonReply,
    /// The reply to the message sent with this correlation number.
    ReplyTo(u64),
}

impl ReplyFilter {
    /// A present `reply` key makes a message a reply even when its value
    /// is not a correlation number.
    pub fn matches(self, env: &Envelope) -> bool {
        match self {
            ReplyFilter::NonReply => !env.is_reply(),
            ReplyFilter::ReplyTo(seq) => env.reply() == Some(seq),
        }
    }
}

impl From<Option<u64>> for ReplyFilter {
    fn from(seq: Option<u64>) -> Self {
        seq.map_or(ReplyFilter::NonReply, ReplyFilter::ReplyTo)
    }
}

/// Messages read off the socket that no caller has asked for yet, in arrival order.
#[derive(Debug, Default)]
pub struct MessageQueue {
    pending: VecDeque<Message>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: Message) {
        self.pending.push_back(msg);
    }

    /// Remove and return the oldest message matching `filter`.
    pub fn take_matching(&mut self, filter: ReplyFilter) -> Option<Message> {
        let pos = self
            .pending
            .iter()
            .position(|m| filter.matches(&m.envelope))?;
        self.pending.remove(pos)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
