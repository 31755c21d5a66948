use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::digest::Digest;
use crate::error::TypeError;

/// Sentinel stored in `previous_digest` for the first entry of a ledger.
pub const GENESIS_SENTINEL: &str = "GENESIS";

/// An entry's reference to its predecessor in the chain.
///
/// The first entry of a ledger carries the literal sentinel `"GENESIS"`;
/// every later entry carries the hex digest of the entry before it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ChainLink {
    /// No predecessor; this is the first entry.
    Genesis,
    /// Digest of the immediately preceding entry.
    Link(Digest),
}

impl ChainLink {
    /// The linked digest, or `None` for genesis.
    pub fn digest(&self) -> Option<&Digest> {
        match self {
            ChainLink::Genesis => None,
            ChainLink::Link(d) => Some(d),
        }
    }

    pub fn is_genesis(&self) -> bool {
        matches!(self, ChainLink::Genesis)
    }

    /// Parse the wire form: the genesis sentinel or a hex digest.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s == GENESIS_SENTINEL {
            Ok(ChainLink::Genesis)
        } else {
            Digest::from_hex(s).map(ChainLink::Link)
        }
    }
}

impl From<Digest> for ChainLink {
    fn from(d: Digest) -> Self {
        ChainLink::Link(d)
    }
}

impl fmt::Display for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainLink::Genesis => f.write_str(GENESIS_SENTINEL),
            ChainLink::Link(d) => write!(f, "{d}"),
        }
    }
}

impl Serialize for ChainLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ChainLink {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ChainLink::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// One immutable record in the ingestion ledger.
///
/// Entries are created exclusively by the ledger's append operation and are
/// never mutated or removed afterwards. Decoding is strict: a persisted
/// document with unknown or missing fields is corrupt, not silently accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerEntry {
    /// 1-based position in the ledger; contiguous, no gaps.
    pub index: u64,
    /// Identifier of the ingested artifact (filename). Not unique.
    pub subject: String,
    /// Content digest of the artifact at ingestion time.
    pub digest: Digest,
    /// UTC creation instant; non-decreasing across entries.
    pub timestamp: DateTime<Utc>,
    /// Digest of the previous entry, or the genesis sentinel.
    pub previous_digest: ChainLink,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> LedgerEntry {
        LedgerEntry {
            index: 1,
            subject: "seq1.fasta".into(),
            digest: Digest::from_bytes(b"content"),
            timestamp: "2026-01-15T10:30:00Z".parse().unwrap(),
            previous_digest: ChainLink::Genesis,
        }
    }

    #[test]
    fn genesis_serializes_as_sentinel() {
        let json = serde_json::to_string(&ChainLink::Genesis).unwrap();
        assert_eq!(json, "\"GENESIS\"");
    }

    #[test]
    fn link_serializes_as_hex() {
        let d = Digest::from_bytes(b"prev");
        let json = serde_json::to_string(&ChainLink::Link(d)).unwrap();
        assert_eq!(json, format!("\"{}\"", d.to_hex()));
    }

    #[test]
    fn chain_link_parse_roundtrip() {
        let d = Digest::from_bytes(b"prev");
        assert_eq!(ChainLink::parse("GENESIS").unwrap(), ChainLink::Genesis);
        assert_eq!(
            ChainLink::parse(&d.to_hex()).unwrap(),
            ChainLink::Link(d)
        );
        assert!(ChainLink::parse("genesis").is_err());
    }

    #[test]
    fn entry_json_roundtrip() {
        let entry = sample_entry();
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: LedgerEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }

    #[test]
    fn entry_rejects_unknown_fields() {
        let d = Digest::from_bytes(b"x").to_hex();
        let json = format!(
            r#"{{"index":1,"subject":"a.fasta","digest":"{d}","timestamp":"2026-01-15T10:30:00Z","previous_digest":"GENESIS","extra":true}}"#
        );
        let result: Result<LedgerEntry, _> = serde_json::from_str(&json);
        assert!(result.is_err());
    }

    #[test]
    fn entry_rejects_missing_fields() {
        let json = r#"{"index":1,"subject":"a.fasta"}"#;
        let result: Result<LedgerEntry, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn timestamp_serializes_as_rfc3339() {
        let entry = sample_entry();
        let value = serde_json::to_value(&entry).unwrap();
        let ts = value["timestamp"].as_str().unwrap();
        assert!(ts.starts_with("2026-01-15T10:30:00"));
    }
}
