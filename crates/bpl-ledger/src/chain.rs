//! Chain position computation shared by the ledger backends.

use bpl_types::{ChainLink, Digest, LedgerEntry};
use chrono::Utc;

/// Build the entry that extends the chain whose tail is `tail`.
///
/// - `index` is the tail's index + 1 (1 for an empty ledger).
/// - `previous_digest` links to the tail's digest (genesis sentinel for an
///   empty ledger).
/// - `timestamp` is clamped against the tail so it never decreases even if
///   the wall clock steps backwards between appends.
pub(crate) fn next_entry(tail: Option<&LedgerEntry>, subject: &str, digest: Digest) -> LedgerEntry {
    let now = Utc::now();
    let (index, previous_digest, timestamp) = match tail {
        Some(prev) => (prev.index + 1, ChainLink::Link(prev.digest), now.max(prev.timestamp)),
        None => (1, ChainLink::Genesis, now),
    };

    LedgerEntry {
        index,
        subject: subject.to_owned(),
        digest,
        timestamp,
        previous_digest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn digest(data: &[u8]) -> Digest {
        Digest::from_bytes(data)
    }

    #[test]
    fn first_entry_is_genesis() {
        let entry = next_entry(None, "seq1.fasta", digest(b"a"));
        assert_eq!(entry.index, 1);
        assert_eq!(entry.previous_digest, ChainLink::Genesis);
        assert_eq!(entry.subject, "seq1.fasta");
    }

    #[test]
    fn second_entry_links_to_tail() {
        let first = next_entry(None, "seq1.fasta", digest(b"a"));
        let second = next_entry(Some(&first), "seq2.fasta", digest(b"b"));
        assert_eq!(second.index, 2);
        assert_eq!(second.previous_digest, ChainLink::Link(first.digest));
        assert!(second.timestamp >= first.timestamp);
    }

    #[test]
    fn timestamp_never_decreases_past_tail() {
        let mut first = next_entry(None, "seq1.fasta", digest(b"a"));
        // Tail claims a timestamp from the future; the next entry must not
        // step back behind it.
        first.timestamp = Utc::now() + Duration::hours(1);
        let second = next_entry(Some(&first), "seq2.fasta", digest(b"b"));
        assert_eq!(second.timestamp, first.timestamp);
    }
}
