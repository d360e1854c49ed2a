//! Header vocabulary shared with the broker.

/// Envelope key: message type / command.
pub const HEADER_TYPE: &str = "type";
/// Envelope key: sender local name.
pub const HEADER_FROM: &str = "from";
/// Envelope key: recipient local name (or wildcard).
pub const HEADER_TO: &str = "to";
/// Envelope key: group.
pub const HEADER_GROUP: &str = "group";
/// Envelope key: instance within the group.
pub const HEADER_INSTANCE: &str = "instance";
/// Envelope key: correlation number of this message.
pub const HEADER_SEQ: &str = "seq";
/// Envelope key: correlation number this message answers.
pub const HEADER_REPLY: &str = "reply";
/// Envelope key: sender expects an answer.
pub const HEADER_WANT_ANSWER: &str = "want_answer";

/// Ask the broker to assign a local name.
pub const COMMAND_GET_LNAME: &str = "getlname";
/// Route a message to a group or recipient.
pub const COMMAND_SEND: &str = "send";
/// Join a group.
pub const COMMAND_SUBSCRIBE: &str = "subscribe";
/// Leave a group.
pub const COMMAND_UNSUBSCRIBE: &str = "unsubscribe";

/// Any instance of a group.
pub const INSTANCE_WILDCARD: &str = "*";
/// Any recipient.
pub const TO_WILDCARD: &str = "*";

/// Payload key of the handshake reply holding the assigned name.
pub const PAYLOAD_LNAME: &str = "lname";
