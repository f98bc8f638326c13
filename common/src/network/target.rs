//! # Scan Target Model
//!
//! A [`Target`] pins down everything one handshake attempt needs to know
//! about the remote side: the controller's address, the destination UDP
//! port and the per-receive timeout. Targets are built once per address by
//! the orchestrator and never mutated.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub addr: Ipv4Addr,
    pub port: u16,
    pub timeout: Duration,
}

impl Target {
    pub fn new(addr: Ipv4Addr, port: u16, timeout: Duration) -> Self {
        Self {
            addr,
            port,
            timeout,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.addr, self.port))
    }
}
