//! Console and file reporting of captured hashes.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use anyhow::Context;
use tracing::{info, warn};

use rakpdump_core::hash::HashRecord;
use rakpdump_core::sink::ResultSink;

/// crack with: john RAKP-HASH-John.txt --wordlist=...
const JOHN_FILE: &str = "RAKP-HASH-John.txt";
/// crack with: hashcat -a 0 -m 7300 RAKP-HASH-HashCat.txt ...
const HASHCAT_FILE: &str = "RAKP-HASH-HashCat.txt";

/// Prints every hash to the console and, when enabled, appends it to the
/// two cracking-tool files. Workers report concurrently; the files sit
/// behind mutexes so lines never interleave.
pub struct HashReporter {
    files: Option<OutputFiles>,
}

struct OutputFiles {
    john: Mutex<File>,
    hashcat: Mutex<File>,
}

impl HashReporter {
    pub fn new(to_files: bool) -> anyhow::Result<Self> {
        let files = if to_files {
            Some(OutputFiles {
                john: Mutex::new(open_append(JOHN_FILE)?),
                hashcat: Mutex::new(open_append(HASHCAT_FILE)?),
            })
        } else {
            None
        };
        Ok(Self { files })
    }
}

impl ResultSink for HashReporter {
    fn hash_found(&self, record: &HashRecord) {
        info!("Hash (John format):");
        println!("{}", record.john_line());
        info!("Hash (Hashcat format):");
        println!("{}", record.hashcat_line());

        if let Some(files) = &self.files {
            append_line(&files.john, JOHN_FILE, &record.john_line());
            append_line(&files.hashcat, HASHCAT_FILE, &record.hashcat_line());
        }
    }
}

fn open_append(path: &str) -> anyhow::Result<File> {
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("opening output file {path}"))
}

fn append_line(file: &Mutex<File>, path: &str, line: &str) {
    let Ok(mut file) = file.lock() else {
        warn!("output file {path} lock poisoned, hash not persisted");
        return;
    };
    if let Err(err) = writeln!(file, "{line}") {
        warn!("failed to write to {path}: {err}");
    }
}
