//! Fake broker on the far end of a socket pair.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::{self, Read, Write};
use std::os::unix::net::UnixStream;
use std::time::Duration;

use bytes::Bytes;
use serde_json::{json, Value};

use msgq_client::{Session, SessionConfig};
use msgq_core::protocol::frame::{decode_frame, encode_frame};
use msgq_core::protocol::{Envelope, Message};

pub struct Broker {
    pub sock: UnixStream,
}

impl Broker {
    /// Queue a frame for the client to read.
    pub fn push(&mut self, env: &Envelope, payload: Option<Value>) {
        let frame = encode_frame(env, payload.as_ref()).unwrap();
        self.sock.write_all(&frame).unwrap();
    }

    pub fn push_raw(&mut self, bytes: &[u8]) {
        self.sock.write_all(bytes).unwrap();
    }

    /// Read one frame the client sent.
    pub fn pop(&mut self) -> Message {
        let mut len = [0u8; 4];
        self.sock.read_exact(&mut len).unwrap();
        let mut body = vec![0u8; u32::from_be_bytes(len) as usize];
        self.sock.read_exact(&mut body).unwrap();
        decode_frame(Bytes::from(body)).unwrap()
    }

    /// True once the client side has shut the socket. A client that closes
    /// with unread data left shows up as a reset rather than a clean EOF.
    pub fn peer_closed(&mut self) -> bool {
        self.sock
            .set_read_timeout(Some(Duration::from_millis(500)))
            .unwrap();
        let mut rest = Vec::new();
        match self.sock.read_to_end(&mut rest) {
            Ok(_) => true,
            Err(e) => e.kind() == io::ErrorKind::ConnectionReset,
        }
    }
}

pub fn frame(env: &Envelope, payload: Option<Value>) -> Vec<u8> {
    encode_frame(env, payload.as_ref()).unwrap().to_vec()
}

/// Message with a `tag` payload, optionally a reply to `reply`.
pub fn tagged(tag: &str, reply: Option<u64>) -> (Envelope, Value) {
    let env = Envelope::send(Some("peer"), "abc123", "g", "*", 100);
    let env = match reply {
        Some(seq) => env.with_reply(seq),
        None => env,
    };
    (env, json!({ "tag": tag }))
}

pub fn tag_of(payload: &Option<Value>) -> String {
    payload.as_ref().unwrap()["tag"].as_str().unwrap().to_owned()
}

/// Session already through the handshake, with the `getlname` request consumed.
pub fn connected_with(cfg: &SessionConfig) -> (Session, Broker) {
    let (client, sock) = UnixStream::pair().unwrap();
    let mut broker = Broker { sock };
    broker.push(&Envelope::get_lname(), Some(json!({ "lname": "abc123" })));

    let session = Session::establish(client, cfg).unwrap();
    let hello = broker.pop();
    assert_eq!(hello.envelope, Envelope::get_lname());
    (session, broker)
}

pub fn connected() -> (Session, Broker) {
    connected_with(&SessionConfig::default())
}
