//! Wire frame vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use msgq_core::protocol::frame::{decode_frame, encode_frame, LENGTH_PREFIX_SIZE};
use msgq_core::protocol::header::HEADER_REPLY;

mod vector_loader;
use vector_loader::load;

const VECTORS: [&str; 9] = [
    "getlname_request.json",
    "getlname_reply.json",
    "send_want_answer.json",
    "reply_frame.json",
    "odd_header_values.json",
    "bad_header_json.json",
    "bad_payload_json.json",
    "header_len_overflow.json",
    "too_short.json",
];

#[test]
fn frame_vectors() {
    for name in VECTORS {
        let v = load(name);
        let res = decode_frame(v.frame.split_prefix());

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.kind().as_str(), err.code, "vector={} note={:?}", v.description, v.note);
            continue;
        }

        let msg = res.expect("expected ok frame");
        let want = v.expect.expect("missing expect block").into_message();
        assert_eq!(msg, want, "vector={}", v.description);

        // re-encoding yields a frame that decodes to the same message
        let again = encode_frame(&msg.envelope, msg.payload.as_ref()).unwrap();
        let round = decode_frame(again.slice(LENGTH_PREFIX_SIZE..)).unwrap();
        assert_eq!(round, msg, "vector={}", v.description);
    }
}

#[test]
fn odd_header_values_are_readable_as_absent() {
    let msg = decode_frame(load("odd_header_values.json").frame.split_prefix()).unwrap();
    let env = &msg.envelope;

    assert_eq!(env.msg_type(), Some("send"));
    assert_eq!(env.group(), None);
    assert_eq!(env.seq(), None);
    assert!(env.is_reply());
    assert_eq!(env.reply(), None);
    assert!(env.as_map()[HEADER_REPLY].is_null());
}
