//! Rendering of captured authentication material for offline cracking.

use std::net::Ipv4Addr;

use rakpdump_protocols::rakp::{BMC_SALT_LEN, CONSOLE_SALT_LEN, HMAC_LEN, PRIV_ADMIN_NO_LOOKUP};

/// Everything a successful handshake leaked about one user on one
/// controller. Constructed once by the client, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashRecord {
    pub addr: Ipv4Addr,
    pub username: String,
    pub console_session_id: [u8; 4],
    pub request_id: [u8; 4],
    pub console_salt: [u8; CONSOLE_SALT_LEN],
    pub bmc_salt: [u8; BMC_SALT_LEN],
    pub hmac: [u8; HMAC_LEN],
}

impl HashRecord {
    /// The salt material both tools consume: both session IDs, both salts,
    /// the requested privilege byte, and the length-prefixed username, in
    /// wire order.
    fn salt_hex(&self) -> String {
        let mut bytes = Vec::with_capacity(
            8 + CONSOLE_SALT_LEN + BMC_SALT_LEN + 2 + self.username.len(),
        );
        bytes.extend_from_slice(&self.console_session_id);
        bytes.extend_from_slice(&self.request_id);
        bytes.extend_from_slice(&self.console_salt);
        bytes.extend_from_slice(&self.bmc_salt);
        bytes.push(PRIV_ADMIN_NO_LOOKUP);
        bytes.push(self.username.len() as u8);
        bytes.extend_from_slice(self.username.as_bytes());
        hex::encode(bytes)
    }

    /// Hashcat mode 7300 line: salt material, a colon, the HMAC.
    pub fn hashcat_line(&self) -> String {
        format!("{}:{}", self.salt_hex(), hex::encode(self.hmac))
    }

    /// John the Ripper `rakp` line, prefixed with the address and username
    /// for auditing; `$` separates the tag, material and HMAC.
    pub fn john_line(&self) -> String {
        format!(
            "{} {}:$rakp${}${}",
            self.addr,
            self.username,
            self.salt_hex(),
            hex::encode(self.hmac)
        )
    }
}
