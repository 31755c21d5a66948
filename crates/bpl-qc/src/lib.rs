//! FASTA parsing and quality-control statistics for the Bio-Pipeline.
//!
//! Pure, stateless functions over sequence data: parse a FASTA document into
//! records, compute per-record QC rows (length, GC%, invalid bases), filter
//! them, and build the aggregate summary the analysis endpoint returns.

pub mod error;
pub mod fasta;
pub mod stats;

pub use error::QcError;
pub use fasta::{parse_fasta, FastaRecord};
pub use stats::{compute_qc, filter_records, summarize, QcSummary, RecordQc};
