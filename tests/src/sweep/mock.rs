//! An in-process BMC double speaking just enough RMCP+/RAKP for the
//! handshake: it answers Open Session Requests with a fixed request ID and
//! RAKP Message 1 with either authentication material or a stub rejection,
//! depending on whether the named user is on its list.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

pub const REQUEST_ID: [u8; 4] = [0xaa, 0xbb, 0xcc, 0xdd];
pub const BMC_SALT: [u8; 32] = [0x42; 32];
pub const HMAC: [u8; 20] = [0x99; 20];

pub struct MockBmc {
    pub port: u16,
    /// Every datagram that reached the mock, replies or not.
    pub datagrams_seen: Arc<AtomicUsize>,
    /// Console session IDs observed in Open Session Requests, in order.
    pub session_ids_seen: Arc<Mutex<Vec<[u8; 4]>>>,
    handle: JoinHandle<()>,
}

impl MockBmc {
    /// Spawns a responding controller knowing the given usernames.
    pub async fn spawn(valid_users: &[&str]) -> anyhow::Result<Self> {
        Self::bind(valid_users, true).await
    }

    /// Spawns a controller that receives but never answers.
    pub async fn silent() -> anyhow::Result<Self> {
        Self::bind(&[], false).await
    }

    async fn bind(valid_users: &[&str], responsive: bool) -> anyhow::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let port = socket.local_addr()?.port();
        let valid: Vec<Vec<u8>> = valid_users.iter().map(|u| u.as_bytes().to_vec()).collect();
        let datagrams_seen = Arc::new(AtomicUsize::new(0));
        let session_ids_seen = Arc::new(Mutex::new(Vec::new()));

        let handle = tokio::spawn(serve(
            socket,
            valid,
            responsive,
            datagrams_seen.clone(),
            session_ids_seen.clone(),
        ));

        Ok(Self {
            port,
            datagrams_seen,
            session_ids_seen,
            handle,
        })
    }

    pub fn datagrams(&self) -> usize {
        self.datagrams_seen.load(Ordering::SeqCst)
    }
}

impl Drop for MockBmc {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    socket: UdpSocket,
    valid_users: Vec<Vec<u8>>,
    responsive: bool,
    datagrams_seen: Arc<AtomicUsize>,
    session_ids_seen: Arc<Mutex<Vec<[u8; 4]>>>,
) {
    let mut sessions: HashMap<SocketAddr, [u8; 4]> = HashMap::new();
    let mut buf = [0u8; 1024];

    loop {
        let Ok((n, peer)) = socket.recv_from(&mut buf).await else {
            break;
        };
        datagrams_seen.fetch_add(1, Ordering::SeqCst);
        if !responsive || n < 24 {
            continue;
        }
        let data = &buf[..n];

        match data[5] {
            // Open Session Request: remember the console session ID and
            // hand out our managed-system session ID.
            0x10 => {
                let mut csid = [0u8; 4];
                csid.copy_from_slice(&data[20..24]);
                session_ids_seen.lock().unwrap().push(csid);
                sessions.insert(peer, csid);
                let _ = socket.send_to(&open_session_response(csid), peer).await;
            }
            // RAKP Message 1: answer with material or a stub rejection.
            0x12 => {
                let Some(&csid) = sessions.get(&peer) else {
                    continue;
                };
                let ulen = data[43] as usize;
                if data.len() < 44 + ulen {
                    continue;
                }
                let reply = if valid_users.iter().any(|u| u == &data[44..44 + ulen]) {
                    rakp2_with_hash(csid)
                } else {
                    rakp2_rejection(csid)
                };
                let _ = socket.send_to(&reply, peer).await;
            }
            _ => {}
        }
    }
}

fn header(payload_type: u8, msg_len: u16) -> Vec<u8> {
    let mut buf = vec![0x06, 0x00, 0xff, 0x07, 0x06, payload_type];
    buf.extend_from_slice(&[0u8; 8]);
    buf.extend_from_slice(&msg_len.to_le_bytes());
    buf
}

fn open_session_response(csid: [u8; 4]) -> Vec<u8> {
    let mut buf = header(0x11, 36);
    buf.extend_from_slice(&[0u8; 4]); // tag, status, reserved
    buf.extend_from_slice(&csid);
    buf.extend_from_slice(&REQUEST_ID);
    buf.extend_from_slice(&[0u8; 24]); // accepted algorithm payloads
    buf
}

fn rakp2_with_hash(csid: [u8; 4]) -> Vec<u8> {
    let mut buf = header(0x13, 60);
    buf.extend_from_slice(&[0u8; 4]);
    buf.extend_from_slice(&csid);
    buf.extend_from_slice(&BMC_SALT);
    buf.extend_from_slice(&HMAC);
    buf
}

fn rakp2_rejection(csid: [u8; 4]) -> Vec<u8> {
    let mut buf = header(0x13, 8);
    buf.extend_from_slice(&[0x00, 0x12, 0x00, 0x00]); // status: unauthorized name
    buf.extend_from_slice(&csid);
    buf
}
