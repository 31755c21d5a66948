//! Foundation types for the Bio-Pipeline ledger (BPL).
//!
//! This crate provides the digest, chain-link, and entry types used
//! throughout the BPL system. Every other BPL crate depends on `bpl-types`.
//!
//! # Key Types
//!
//! - [`Digest`] — 256-bit content hash (BLAKE3), hex-encoded on the wire
//! - [`ChainLink`] — an entry's reference to its predecessor (or genesis)
//! - [`LedgerEntry`] — one immutable record in the ingestion ledger

pub mod digest;
pub mod entry;
pub mod error;

pub use digest::Digest;
pub use entry::{ChainLink, LedgerEntry, GENESIS_SENTINEL};
pub use error::TypeError;
