//! Handshake client and sweep orchestration.
//!
//! [`client`] drives one RMCP+/RAKP exchange against one controller;
//! [`sweep`] fans the client out over many addresses under a bounded pool
//! and streams [`hash::HashRecord`]s into a caller-supplied [`sink`].

pub mod client;
pub mod hash;
pub mod sink;
pub mod sweep;
