use bpl_types::{ChainLink, LedgerEntry};
use serde::Serialize;

use crate::error::LedgerError;

/// Result of a chain validation walk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub entry_count: u64,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// 1-based index of the first entry that breaks an invariant.
    pub fn first_bad_index(&self) -> Option<u64> {
        self.violations.first().map(|v| v.index)
    }

    /// Error form of the report: the first violation as an
    /// [`LedgerError::Integrity`].
    pub fn ensure_valid(&self) -> Result<(), LedgerError> {
        match self.violations.first() {
            None => Ok(()),
            Some(v) => Err(LedgerError::Integrity {
                index: v.index,
                reason: v.description.clone(),
            }),
        }
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// 1-based position of the offending entry.
    pub index: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ViolationKind {
    /// The entry's `index` field does not match its position.
    IndexGap,
    /// The first entry does not carry the genesis sentinel.
    GenesisLink,
    /// `previous_digest` does not match the preceding entry's digest.
    ChainBreak,
}

/// Chain integrity validator.
///
/// Walks a sequence of entries in order, checking index contiguity, the
/// genesis sentinel, and every previous-digest link. All violations are
/// collected rather than stopping at the first, so an audit can report the
/// full extent of the damage.
pub struct ChainValidator;

impl ChainValidator {
    pub fn validate(entries: &[LedgerEntry]) -> ValidationReport {
        let mut violations = Vec::new();

        for (i, entry) in entries.iter().enumerate() {
            let position = (i + 1) as u64;

            if entry.index != position {
                violations.push(Violation {
                    index: position,
                    kind: ViolationKind::IndexGap,
                    description: format!("expected index {position}, found {}", entry.index),
                });
            }

            match (i, &entry.previous_digest) {
                (0, ChainLink::Genesis) => {}
                (0, ChainLink::Link(_)) => violations.push(Violation {
                    index: position,
                    kind: ViolationKind::GenesisLink,
                    description: "first entry does not carry the genesis sentinel".into(),
                }),
                (_, link) => {
                    let expected = entries[i - 1].digest;
                    if link.digest() != Some(&expected) {
                        violations.push(Violation {
                            index: position,
                            kind: ViolationKind::ChainBreak,
                            description: format!(
                                "previous digest does not match entry {} ({})",
                                position - 1,
                                expected.short_hex()
                            ),
                        });
                    }
                }
            }
        }

        ValidationReport {
            entry_count: entries.len() as u64,
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpl_types::{ChainLink, Digest};
    use chrono::Utc;
    use proptest::prelude::*;

    fn build_chain(count: usize) -> Vec<LedgerEntry> {
        let mut entries = Vec::new();
        let mut prev: Option<Digest> = None;

        for i in 0..count {
            let digest = Digest::from_bytes(format!("artifact-{i}").as_bytes());
            entries.push(LedgerEntry {
                index: (i + 1) as u64,
                subject: format!("seq{i}.fasta"),
                digest,
                timestamp: Utc::now(),
                previous_digest: prev.map(ChainLink::Link).unwrap_or(ChainLink::Genesis),
            });
            prev = Some(digest);
        }

        entries
    }

    #[test]
    fn empty_chain_is_valid() {
        let report = ChainValidator::validate(&[]);
        assert!(report.is_valid());
        assert_eq!(report.entry_count, 0);
        assert_eq!(report.first_bad_index(), None);
    }

    #[test]
    fn single_entry_chain_is_valid() {
        let report = ChainValidator::validate(&build_chain(1));
        assert!(report.is_valid());
    }

    #[test]
    fn multi_entry_chain_is_valid() {
        let report = ChainValidator::validate(&build_chain(10));
        assert!(report.is_valid());
        assert_eq!(report.entry_count, 10);
    }

    #[test]
    fn mutated_digest_flags_the_successor() {
        let mut chain = build_chain(5);
        chain[2].digest = Digest::from_bytes(b"tampered");
        let report = ChainValidator::validate(&chain);
        assert!(!report.is_valid());
        // Entry 3's digest changed, so entry 4's link no longer matches.
        assert_eq!(report.first_bad_index(), Some(4));
        assert_eq!(report.violations[0].kind, ViolationKind::ChainBreak);
    }

    #[test]
    fn mutated_tail_digest_goes_undetected_by_links_alone() {
        // The tail has no successor; its digest is only pinned once another
        // entry is appended on top of it.
        let mut chain = build_chain(3);
        chain[2].digest = Digest::from_bytes(b"tampered");
        assert!(ChainValidator::validate(&chain).is_valid());
    }

    #[test]
    fn wrong_genesis_sentinel_detected() {
        let mut chain = build_chain(2);
        chain[0].previous_digest = ChainLink::Link(Digest::from_bytes(b"bogus"));
        let report = ChainValidator::validate(&chain);
        assert_eq!(report.first_bad_index(), Some(1));
        assert_eq!(report.violations[0].kind, ViolationKind::GenesisLink);
    }

    #[test]
    fn index_gap_detected() {
        let mut chain = build_chain(3);
        chain[1].index = 7;
        let report = ChainValidator::validate(&chain);
        assert_eq!(report.first_bad_index(), Some(2));
        assert_eq!(report.violations[0].kind, ViolationKind::IndexGap);
    }

    #[test]
    fn broken_link_detected() {
        let mut chain = build_chain(4);
        chain[2].previous_digest = ChainLink::Link(Digest::from_bytes(b"wrong"));
        let report = ChainValidator::validate(&chain);
        assert_eq!(report.first_bad_index(), Some(3));
        assert_eq!(report.violations[0].kind, ViolationKind::ChainBreak);
    }

    #[test]
    fn ensure_valid_surfaces_the_first_violation() {
        assert!(ChainValidator::validate(&build_chain(3))
            .ensure_valid()
            .is_ok());

        let mut chain = build_chain(3);
        chain[0].digest = Digest::from_bytes(b"tampered");
        let err = ChainValidator::validate(&chain).ensure_valid().unwrap_err();
        assert!(matches!(err, LedgerError::Integrity { index: 2, .. }));
    }

    #[test]
    fn all_violations_are_collected() {
        let mut chain = build_chain(5);
        chain[1].digest = Digest::from_bytes(b"tampered");
        chain[3].index = 99;
        let report = ChainValidator::validate(&chain);
        assert_eq!(report.violations.len(), 2);
    }

    proptest! {
        #[test]
        fn built_chains_always_validate(len in 0usize..64) {
            let report = ChainValidator::validate(&build_chain(len));
            prop_assert!(report.is_valid());
        }

        #[test]
        fn digest_mutation_is_always_caught(len in 2usize..32, victim in 0usize..31) {
            let victim = victim % (len - 1); // any entry except the tail
            let mut chain = build_chain(len);
            chain[victim].digest = Digest::from_bytes(b"mutated by test");
            let report = ChainValidator::validate(&chain);
            prop_assert!(!report.is_valid());
            prop_assert_eq!(report.first_bad_index(), Some((victim + 2) as u64));
        }
    }
}
