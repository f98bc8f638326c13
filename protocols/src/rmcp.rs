//! RMCP framing and the RMCP+ Open Session exchange.
//!
//! All multi-byte integer fields on this wire are little-endian.

use crate::WireError;

pub const RMCP_VERSION_1: u8 = 0x06;
pub const RMCP_SEQ_NONE: u8 = 0xff;
pub const RMCP_CLASS_IPMI: u8 = 0x07;

pub const AUTH_TYPE_RMCP_PLUS: u8 = 0x06;

pub const PAYLOAD_TYPE_OPEN_SESSION_REQUEST: u8 = 0x10;
pub const PAYLOAD_TYPE_RAKP_1: u8 = 0x12;

/// RMCP header (4) plus RMCP+ session header (12).
pub const SESSION_HDR_LEN: usize = 16;
/// Offset of the little-endian u16 message-length field.
pub const OFF_MSG_LEN: usize = 14;

/// Fixed slot where an Open Session Response echoes the console session ID:
/// session header (16) plus message tag, status code and two reserved bytes.
const OFF_ECHOED_SESSION_ID: usize = 20;
/// Echo slot plus the 4-byte managed-system session ID that follows it.
const MIN_OPEN_SESSION_RESPONSE: usize = OFF_ECHOED_SESSION_ID + 8;

const OPEN_SESSION_PAYLOAD_LEN: usize = 32;

/// Algorithm proposals sent with every Open Session Request: RAKP-HMAC-SHA1
/// authentication, HMAC-SHA1-96 integrity, AES-CBC-128 confidentiality.
/// Each block is payload type, three reserved/length bytes, algorithm, and
/// three reserved bytes.
const ALGORITHM_PROPOSALS: [u8; 24] = [
    0x00, 0x00, 0x00, 0x08, 0x01, 0x00, 0x00, 0x00, // authentication
    0x01, 0x00, 0x00, 0x08, 0x01, 0x00, 0x00, 0x00, // integrity
    0x02, 0x00, 0x00, 0x08, 0x01, 0x00, 0x00, 0x00, // confidentiality
];

/// Writes the RMCP header and the RMCP+ session header shared by both
/// outbound packet types. The BMC session ID and sequence number fields are
/// zero: no session exists yet in either handshake phase.
pub(crate) fn session_header(payload_type: u8, msg_len: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SESSION_HDR_LEN);
    buf.extend_from_slice(&[RMCP_VERSION_1, 0x00, RMCP_SEQ_NONE, RMCP_CLASS_IPMI]);
    buf.push(AUTH_TYPE_RMCP_PLUS);
    buf.push(payload_type);
    buf.extend_from_slice(&[0u8; 4]); // BMC session ID, unknown at send time
    buf.extend_from_slice(&[0u8; 4]); // session sequence number
    buf.extend_from_slice(&msg_len.to_le_bytes());
    buf
}

/// Builds an RMCP+ Open Session Request carrying `console_session_id`.
pub fn open_session_request(console_session_id: [u8; 4]) -> Vec<u8> {
    let mut buf = session_header(
        PAYLOAD_TYPE_OPEN_SESSION_REQUEST,
        OPEN_SESSION_PAYLOAD_LEN as u16,
    );
    buf.extend_from_slice(&[0u8; 4]); // message tag, requested privilege, reserved
    buf.extend_from_slice(&console_session_id);
    buf.extend_from_slice(&ALGORITHM_PROPOSALS);
    buf
}

/// Parsed Open Session Response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSessionResponse {
    /// Managed-system session ID assigned by the BMC; quoted back in RAKP
    /// Message 1 and part of the cracked hash material.
    pub request_id: [u8; 4],
    /// Whether the fixed echo slot held exactly the session ID we sent.
    /// Some controllers echo a stale ID there on internal retries, so a
    /// mismatch is reported rather than treated as a failure.
    pub echo_matched: bool,
}

/// Extracts the managed-system session ID from an Open Session Response.
///
/// The BMC echoes the console session ID and follows it with its own; the
/// echo is located by value so that replies with nonstandard padding still
/// parse.
pub fn parse_open_session_response(
    data: &[u8],
    console_session_id: [u8; 4],
) -> Result<OpenSessionResponse, WireError> {
    if data.len() < MIN_OPEN_SESSION_RESPONSE {
        return Err(WireError::UnexpectedResponse("reply too short"));
    }

    let pos = find(data, &console_session_id)
        .ok_or(WireError::UnexpectedResponse("console session ID not echoed"))?;
    let id_end = pos + 4;
    if data.len() < id_end + 4 {
        return Err(WireError::UnexpectedResponse("no session ID after echo"));
    }

    let mut request_id = [0u8; 4];
    request_id.copy_from_slice(&data[id_end..id_end + 4]);

    let echo_matched =
        data[OFF_ECHOED_SESSION_ID..OFF_ECHOED_SESSION_ID + 4] == console_session_id;

    Ok(OpenSessionResponse {
        request_id,
        echo_matched,
    })
}

/// First occurrence of `needle` in `haystack`.
pub(crate) fn find(haystack: &[u8], needle: &[u8; 4]) -> Option<usize> {
    haystack.windows(4).position(|w| w == needle)
}
