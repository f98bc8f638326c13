use std::time::Duration;

/// Usernames tried against every host when no custom list is supplied.
///
/// Covers the factory defaults of the most common BMC vendors
/// (Supermicro, HP iLO, Dell iDRAC, IBM IMM, APC, VMware).
pub const DEFAULT_USERNAMES: &[&str] = &[
    "admin",
    "root",
    "ADMIN",
    "Admin",
    "Administrator",
    "USERID",
    "guest",
    "vmware",
    "ups",
];

pub const DEFAULT_PORT: u16 = 623;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_WORKERS: usize = 64;

/// Immutable sweep configuration, built once by the caller and handed
/// down to the orchestrator.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Destination UDP port on the managed controllers.
    pub port: u16,
    /// Per-receive timeout; two receives happen per handshake attempt.
    pub timeout: Duration,
    /// Upper bound on addresses probed concurrently.
    pub workers: usize,
    /// Username candidates, tried in this exact order per host.
    pub usernames: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            workers: DEFAULT_WORKERS,
            usernames: DEFAULT_USERNAMES.iter().map(|u| u.to_string()).collect(),
        }
    }
}
