//! Routing/control envelope.
//!
//! An envelope is a mapping of named header fields. Not every field is present
//! on every envelope: control frames carry only a `type` (plus group/instance),
//! routed messages carry the full set, replies add `reply`.
//!
//! The map itself is the stored form, so any JSON object the broker sends
//! decodes and encodes back unchanged. The typed accessors are lenient: a
//! well-known key holding a value of an unexpected type reads as absent
//! through its accessor but stays in the map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::header::{
    COMMAND_GET_LNAME, COMMAND_SEND, COMMAND_SUBSCRIBE, COMMAND_UNSUBSCRIBE, HEADER_FROM,
    HEADER_GROUP, HEADER_INSTANCE, HEADER_REPLY, HEADER_SEQ, HEADER_TO, HEADER_TYPE,
    HEADER_WANT_ANSWER,
};

/// Envelope (header segment of a frame).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope {
    fields: Map<String, Value>,
}

impl Envelope {
    /// Empty envelope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Header-only control envelope carrying just a command.
    pub fn command(cmd: &str) -> Self {
        let mut env = Self::new();
        env.insert(HEADER_TYPE, cmd);
        env
    }

    /// `{type: getlname}`
    pub fn get_lname() -> Self {
        Self::command(COMMAND_GET_LNAME)
    }

    /// `{type: subscribe, group, instance}`
    pub fn subscribe(group: &str, instance: &str) -> Self {
        Self::membership(COMMAND_SUBSCRIBE, group, instance)
    }

    /// `{type: unsubscribe, group, instance}`
    pub fn unsubscribe(group: &str, instance: &str) -> Self {
        Self::membership(COMMAND_UNSUBSCRIBE, group, instance)
    }

    fn membership(cmd: &str, group: &str, instance: &str) -> Self {
        let mut env = Self::command(cmd);
        env.insert(HEADER_GROUP, group);
        env.insert(HEADER_INSTANCE, instance);
        env
    }

    /// Routed `send` envelope addressed to `to` within `group`/`instance`.
    /// `from` is left out when the session has no name yet.
    pub fn send(from: Option<&str>, to: &str, group: &str, instance: &str, seq: u64) -> Self {
        let mut env = Self::command(COMMAND_SEND);
        if let Some(from) = from {
            env.insert(HEADER_FROM, from);
        }
        env.insert(HEADER_TO, to);
        env.insert(HEADER_GROUP, group);
        env.insert(HEADER_INSTANCE, instance);
        env.insert(HEADER_SEQ, seq);
        env
    }

    /// Mark this envelope as the answer to `seq`.
    pub fn with_reply(mut self, seq: u64) -> Self {
        self.insert(HEADER_REPLY, seq);
        self
    }

    pub fn with_want_answer(mut self, want_answer: bool) -> Self {
        self.insert(HEADER_WANT_ANSWER, want_answer);
        self
    }

    /// Raw header value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Set a header, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Message type / command.
    pub fn msg_type(&self) -> Option<&str> {
        self.str_field(HEADER_TYPE)
    }

    pub fn group(&self) -> Option<&str> {
        self.str_field(HEADER_GROUP)
    }

    pub fn instance(&self) -> Option<&str> {
        self.str_field(HEADER_INSTANCE)
    }

    /// Sender local name.
    pub fn sender(&self) -> Option<&str> {
        self.str_field(HEADER_FROM)
    }

    /// Recipient local name or wildcard.
    pub fn recipient(&self) -> Option<&str> {
        self.str_field(HEADER_TO)
    }

    /// Correlation number of this message.
    pub fn seq(&self) -> Option<u64> {
        self.get(HEADER_SEQ).and_then(Value::as_u64)
    }

    /// Correlation number this message answers.
    pub fn reply(&self) -> Option<u64> {
        self.get(HEADER_REPLY).and_then(Value::as_u64)
    }

    pub fn want_answer(&self) -> Option<bool> {
        self.get(HEADER_WANT_ANSWER).and_then(Value::as_bool)
    }

    /// True if the `reply` key is present, whatever its value.
    pub fn is_reply(&self) -> bool {
        self.contains(HEADER_REPLY)
    }
}

impl From<Map<String, Value>> for Envelope {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
