//! RAKP Messages 1 and 2.
//!
//! RAKP Message 1 names a user and hands the BMC a console-side random
//! salt; the Message 2 reply either rejects the user with an 8-byte stub or
//! returns the BMC's own salt material and an HMAC keyed with the user's
//! password. That HMAC is the whole point: it is crackable offline.

use crate::WireError;
use crate::rmcp::{self, OFF_MSG_LEN, PAYLOAD_TYPE_RAKP_1, SESSION_HDR_LEN};

pub const CONSOLE_SALT_LEN: usize = 16;
/// BMC-side salt material: 16-byte random number followed by the 16-byte
/// system GUID, kept together exactly as the cracking tools expect.
pub const BMC_SALT_LEN: usize = 32;
pub const HMAC_LEN: usize = 20;

/// Administrator, username lookup disabled.
pub const PRIV_ADMIN_NO_LOOKUP: u8 = 0x14;

/// RAKP Message 1 length before the username bytes.
pub const RAKP1_BASE_LEN: usize = 28;

/// Portion of the declared RAKP Message 2 length covering the message tag,
/// status, reserved bytes and echoed session ID.
const RAKP2_HDR_LEN: usize = 8;
/// Declared length of a stub rejection (header only, no material).
const NO_SUCH_USER_LEN: u8 = 8;
/// Declared length of a hash-bearing reply.
const AUTHENTICATED_LEN: u8 = 60;

/// Builds RAKP Message 1 for `username`.
///
/// The embedded message length is `28 + username byte length`; usernames
/// longer than IPMI's 16-byte limit are the caller's mistake but still
/// frame correctly up to 255 bytes.
pub fn rakp_message_1(
    request_id: [u8; 4],
    console_salt: [u8; CONSOLE_SALT_LEN],
    username: &str,
) -> Vec<u8> {
    let msg_len = (RAKP1_BASE_LEN + username.len()) as u16;
    let mut buf = rmcp::session_header(PAYLOAD_TYPE_RAKP_1, msg_len);
    buf.extend_from_slice(&[0u8; 4]); // message tag, reserved
    buf.extend_from_slice(&request_id);
    buf.extend_from_slice(&console_salt);
    buf.push(PRIV_ADMIN_NO_LOOKUP);
    buf.extend_from_slice(&[0u8; 2]); // reserved
    buf.push(username.len() as u8);
    buf.extend_from_slice(username.as_bytes());
    buf
}

/// Outcome of a RAKP Message 2 parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RakpMessage2 {
    /// Stub rejection: the username is unknown to the controller.
    NoSuchUser,
    /// The controller produced authentication material for the user.
    Authenticated {
        bmc_salt: [u8; BMC_SALT_LEN],
        hmac: [u8; HMAC_LEN],
    },
}

/// Parses a RAKP Message 2 reply.
///
/// The declared message length counts an 8-byte header that precedes the
/// response body; the body itself is everything after the echoed console
/// session ID. A declared length of 8 is a rejection and is accepted
/// without inspecting the body, matching observed controller behavior.
pub fn parse_rakp_message_2(
    data: &[u8],
    console_session_id: [u8; 4],
) -> Result<RakpMessage2, WireError> {
    if data.len() < SESSION_HDR_LEN {
        return Err(WireError::UnexpectedResponse("reply too short"));
    }
    let declared = data[OFF_MSG_LEN];
    if declared == NO_SUCH_USER_LEN {
        return Ok(RakpMessage2::NoSuchUser);
    }

    let pos = rmcp::find(data, &console_session_id)
        .ok_or(WireError::UnexpectedResponse("console session ID not echoed"))?;
    let body = &data[pos + 4..];

    let expected = (declared as usize)
        .checked_sub(RAKP2_HDR_LEN)
        .ok_or(WireError::UnrecognizedLength(declared))?;
    if body.len() != expected {
        return Err(WireError::TruncatedResponse {
            expected,
            actual: body.len(),
        });
    }

    if declared != AUTHENTICATED_LEN {
        return Err(WireError::UnrecognizedLength(declared));
    }

    let mut bmc_salt = [0u8; BMC_SALT_LEN];
    bmc_salt.copy_from_slice(&body[..BMC_SALT_LEN]);
    let mut hmac = [0u8; HMAC_LEN];
    hmac.copy_from_slice(&body[BMC_SALT_LEN..BMC_SALT_LEN + HMAC_LEN]);

    Ok(RakpMessage2::Authenticated { bmc_salt, hmac })
}
