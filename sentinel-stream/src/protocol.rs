//! # Message Protocol
//!
//! Every message in either direction is the raw payload followed by one
//! sentinel byte. There is no escaping: payloads must not contain `0x00`.

/// End-of-message marker appended to every outgoing payload and expected at
/// the end of every incoming reply.
pub const SENTINEL: u8 = 0x00;

/// Encode a payload for the wire by appending the sentinel
pub fn encode_message(payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(payload.len() + 1);
    bytes.extend_from_slice(payload);
    bytes.push(SENTINEL);
    bytes
}

/// Returns true if the payload can be sent without being cut short by the
/// receiving framer.
pub fn is_transparent(payload: &[u8]) -> bool {
    !payload.contains(&SENTINEL)
}
