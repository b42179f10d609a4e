/// PROPERTY-BASED TESTS: call framing
///
/// Key invariants:
/// 1. Any call decodes to the function, id and arguments it was encoded from
/// 2. Fragmenting and reassembling restores the exact bytes
/// 3. Every fragment but the last is exactly one chunk

use proptest::prelude::*;

use glrelay_shared::{
    decode_call, encode_call, fragment, function_index, Reassembler, Value, CALL_SENTINEL,
    MAX_CHUNK_SIZE, REMOTE_FUNCTIONS,
};

fn wire_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(Value::Int),
        any::<u32>().prop_map(Value::UInt),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e9f64..1.0e9f64).prop_map(Value::Double),
        "[a-zA-Z0-9_ ]{0,24}".prop_map(Value::String),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Value::Bytes),
        Just(Value::Null),
    ]
}

fn round_trip(payload: &[u8], chunk_size: usize) -> Vec<u8> {
    let mut reassembler = Reassembler::new(chunk_size);
    let mut message = None;
    for piece in fragment(payload, chunk_size) {
        assert!(message.is_none(), "fragment after the closing one");
        message = reassembler.push(piece).unwrap();
    }
    message.expect("no closing fragment")
}

proptest! {
    #[test]
    fn prop_calls_decode_to_what_was_encoded(
        function in 0..REMOTE_FUNCTIONS.len(),
        id in any::<u32>(),
        arguments in prop::collection::vec(wire_value(), 0..12),
    ) {
        let remote = &REMOTE_FUNCTIONS[function];
        let correlation_id = remote.expects_reply.then_some(id);
        let bytes = encode_call(function as u8, correlation_id, &arguments).unwrap();
        prop_assert_eq!(&bytes[bytes.len() - 4..], &CALL_SENTINEL.to_be_bytes()[..]);

        let decoded = decode_call(&bytes).unwrap();
        prop_assert_eq!(decoded.function_name(), remote.name);
        prop_assert_eq!(decoded.correlation_id, correlation_id);
        prop_assert_eq!(decoded.arguments, arguments);
    }

    #[test]
    fn prop_fragments_reassemble(
        payload in prop::collection::vec(any::<u8>(), 0..5000),
        chunk_size in 16usize..2048,
    ) {
        let pieces = fragment(&payload, chunk_size).collect::<Vec<_>>();
        let (last, full) = pieces.split_last().unwrap();
        prop_assert!(full.iter().all(|piece| piece.len() == chunk_size));
        prop_assert!(last.len() < chunk_size);
        prop_assert_eq!(round_trip(&payload, chunk_size), payload);
    }
}

#[test]
fn empty_bytes_and_null_are_distinct() {
    let index = function_index("bufferData").unwrap();
    let arguments = vec![Value::Bytes(Vec::new()), Value::Null];
    let bytes = encode_call(index, None, &arguments).unwrap();
    assert_eq!(decode_call(&bytes).unwrap().arguments, arguments);
}

#[test]
fn exact_multiple_gets_an_empty_closing_fragment() {
    let payload = vec![7u8; MAX_CHUNK_SIZE * 2];
    let sizes = fragment(&payload, MAX_CHUNK_SIZE)
        .map(<[u8]>::len)
        .collect::<Vec<_>>();
    assert_eq!(sizes, vec![MAX_CHUNK_SIZE, MAX_CHUNK_SIZE, 0]);
    assert_eq!(round_trip(&payload, MAX_CHUNK_SIZE), payload);
}
