pub mod sweep;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "rakpdump")]
#[command(about = "Dump crackable RAKP hashes from IPMI controllers, no credentials needed.")]
pub struct CommandLine {
    /// Single address, CIDR block, or a file with one address/CIDR per line
    pub target: String,

    /// Target UDP port
    #[arg(short, long, default_value_t = rakpdump_common::config::DEFAULT_PORT)]
    pub port: u16,

    /// Custom username list, one per line (e.g. metasploit's ipmi_users.txt)
    #[arg(short, long)]
    pub list: Option<PathBuf>,

    /// Append hashes to RAKP-HASH-John.txt and RAKP-HASH-HashCat.txt
    #[arg(short, long)]
    pub output: bool,

    /// Per-receive timeout in seconds
    #[arg(short, long, default_value_t = 3)]
    pub timeout: u64,

    /// Maximum number of addresses probed concurrently
    #[arg(short, long, default_value_t = rakpdump_common::config::DEFAULT_WORKERS)]
    pub workers: usize,

    /// Verbosity; per-step diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
