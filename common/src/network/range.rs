//! Expansion of target range specifications into concrete addresses.
//!
//! A range spec is either a literal dotted-quad address (treated as a /32)
//! or CIDR notation `a.b.c.d/N`. Expansion covers the full block, network
//! and broadcast addresses included: management controllers regularly sit
//! on point-to-point or oddly carved subnets, so no address is excluded.

use std::net::Ipv4Addr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedRangeError {
    #[error("invalid address '{0}'")]
    Address(String),
    #[error("invalid prefix '{0}': expected a number between 0 and 32")]
    Prefix(String),
}

/// An inclusive range of IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> u64 {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        u64::from(end - start) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Expands a range spec into the covered block.
///
/// The top N bits of the given address are held fixed and every value of
/// the remaining bits is included, in ascending order. A spec without a
/// `/N` suffix yields exactly that one address.
pub fn expand(spec: &str) -> Result<Ipv4Range, MalformedRangeError> {
    let Some((addr_str, prefix_str)) = spec.split_once('/') else {
        let addr = parse_addr(spec)?;
        return Ok(Ipv4Range::new(addr, addr));
    };

    let addr = parse_addr(addr_str)?;
    let prefix: u8 = prefix_str
        .parse()
        .ok()
        .filter(|p| *p <= 32)
        .ok_or_else(|| MalformedRangeError::Prefix(prefix_str.to_string()))?;

    let mask: u32 = if prefix == 0 { 0 } else { u32::MAX << (32 - prefix) };
    let network: u32 = u32::from(addr) & mask;
    let broadcast: u32 = network | !mask;

    Ok(Ipv4Range::new(network.into(), broadcast.into()))
}

fn parse_addr(s: &str) -> Result<Ipv4Addr, MalformedRangeError> {
    s.parse()
        .map_err(|_| MalformedRangeError::Address(s.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
