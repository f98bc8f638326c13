//! Outbound port for captured hashes.

use crate::hash::HashRecord;

/// Receives hash records as workers produce them. Implementations must be
/// safe to call from many workers at once; the sweep holds no lock around
/// calls.
pub trait ResultSink: Send + Sync {
    fn hash_found(&self, record: &HashRecord);
}
