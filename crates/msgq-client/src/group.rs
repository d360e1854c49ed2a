//! Group pub/sub operations on a [`Session`].

use msgq_core::error::{MsgqError, Result};
use msgq_core::protocol::header::{
    HEADER_FROM, HEADER_GROUP, HEADER_INSTANCE, HEADER_SEQ, INSTANCE_WILDCARD, TO_WILDCARD,
};
use msgq_core::protocol::{Envelope, Value};

use crate::session::{ReplyFilter, Session};
use crate::transport::Transport;

/// Addressing for [`Session::group_sendmsg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOptions {
    /// Instance within the group (default `*`).
    pub instance: String,
    /// Direct recipient local name (default `*`, anyone in the group).
    pub to: String,
    /// Ask the recipient for an answer. Without a recipient the broker
    /// answers with an error instead.
    pub want_answer: bool,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            instance: INSTANCE_WILDCARD.to_owned(),
            to: TO_WILDCARD.to_owned(),
            want_answer: false,
        }
    }
}

impl SendOptions {
    pub fn instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into();
        self
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = to.into();
        self
    }

    pub fn want_answer(mut self, want_answer: bool) -> Self {
        self.want_answer = want_answer;
        self
    }
}

impl<T: Transport> Session<T> {
    /// Join `group` (all instances when `instance` is `None`).
    pub fn group_subscribe(&self, group: &str, instance: Option<&str>) -> Result<()> {
        let env = Envelope::subscribe(group, instance.unwrap_or(INSTANCE_WILDCARD));
        self.sendmsg(&env, None)
    }

    /// Leave `group`.
    pub fn group_unsubscribe(&self, group: &str, instance: Option<&str>) -> Result<()> {
        let env = Envelope::unsubscribe(group, instance.unwrap_or(INSTANCE_WILDCARD));
        self.sendmsg(&env, None)
    }

    /// Send `payload` to `group`. Returns the correlation number to wait on
    /// with [`group_recvmsg`](Self::group_recvmsg).
    pub fn group_sendmsg(&self, payload: &Value, group: &str, opts: &SendOptions) -> Result<u64> {
        let seq = self.next_sequence();
        self.send_routed(
            |lname| {
                Envelope::send(lname, &opts.to, group, &opts.instance, seq)
                    .with_want_answer(opts.want_answer)
            },
            Some(payload),
        )?;
        Ok(seq)
    }

    /// Receive `(payload, envelope)`; `(None, None)` when nothing is available.
    pub fn group_recvmsg(
        &self,
        nonblock: bool,
        filter: ReplyFilter,
    ) -> Result<(Option<Value>, Option<Envelope>)> {
        Ok(match self.recvmsg(nonblock, filter)? {
            Some(msg) => (msg.payload, Some(msg.envelope)),
            None => (None, None),
        })
    }

    /// Answer the message routed by `routing`. Returns the reply's own
    /// correlation number.
    pub fn group_reply(&self, routing: &Envelope, payload: &Value) -> Result<u64> {
        let to = required(routing.sender(), HEADER_FROM)?;
        let group = required(routing.group(), HEADER_GROUP)?;
        let instance = required(routing.instance(), HEADER_INSTANCE)?;
        let answers = required(routing.seq(), HEADER_SEQ)?;

        let seq = self.next_sequence();
        self.send_routed(
            |lname| Envelope::send(lname, to, group, instance, seq).with_reply(answers),
            Some(payload),
        )?;
        Ok(seq)
    }
}

fn required<V>(field: Option<V>, name: &str) -> Result<V> {
    field.ok_or_else(|| MsgqError::Protocol(format!("reply routing lacks `{name}`")))
}
