//! Pure RMCP+/RAKP wire codec.
//!
//! Encodes the two requests and parses the two replies of the RMCP+ session
//! establishment handshake, up to and including RAKP Message 2 — the reply
//! that leaks the salted HMAC this tool is after. No I/O and no randomness
//! live here; callers supply session IDs and salts and own the sockets.

use thiserror::Error;

pub mod rakp;
pub mod rmcp;

/// Wire-level parse failures. None of these are fatal to a sweep; the
/// client maps them onto per-attempt outcomes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// Reply too short, or the echoed console session ID never appears.
    #[error("response does not look like an RMCP+ reply ({0})")]
    UnexpectedResponse(&'static str),
    /// Payload after the echoed session ID does not match the declared
    /// message length.
    #[error("response body is {actual} bytes, declared length implies {expected}")]
    TruncatedResponse { expected: usize, actual: usize },
    /// Declared message length is neither the stub-rejection nor the
    /// hash-bearing size.
    #[error("unrecognized RAKP message length {0}")]
    UnrecognizedLength(u8),
}
