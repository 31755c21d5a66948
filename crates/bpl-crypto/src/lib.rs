//! Content hashing for the Bio-Pipeline ledger.
//!
//! Provides the [`ContentHasher`]: a streaming BLAKE3 digest over arbitrary
//! byte sources. The digest of an artifact doubles as its chain-link value in
//! the ingestion ledger, so hashing is raw content only — no domain tags, no
//! framing. Identical bytes always produce identical digests regardless of
//! how they are delivered.

pub mod hasher;

pub use hasher::ContentHasher;
