//! Loading of username lists and target specifications from disk.

use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use rakpdump_common::network::range;

/// Reads a username candidate file, one name per line, skipping blanks.
pub fn load_usernames(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading username list {}", path.display()))?;
    let usernames: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    anyhow::ensure!(!usernames.is_empty(), "username list {} is empty", path.display());
    Ok(usernames)
}

/// Expands the target argument into concrete addresses.
///
/// The argument is a path to a file of one address/CIDR per line when such
/// a file exists, otherwise it is parsed as an address/CIDR itself. Any
/// malformed entry is fatal here, before the sweep starts.
pub fn resolve_targets(spec: &str) -> anyhow::Result<Vec<Ipv4Addr>> {
    if Path::new(spec).is_file() {
        info!("Parsing file {spec} for addresses/networks");
        return expand_file(spec);
    }
    let expanded = range::expand(spec).with_context(|| format!("parsing target '{spec}'"))?;
    Ok(expanded.iter().collect())
}

fn expand_file(path: &str) -> anyhow::Result<Vec<Ipv4Addr>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading target file {path}"))?;
    let mut addrs = Vec::new();
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let expanded = range::expand(line)
            .with_context(|| format!("parsing target '{line}' from {path}"))?;
        addrs.extend(expanded.iter());
    }
    Ok(addrs)
}
