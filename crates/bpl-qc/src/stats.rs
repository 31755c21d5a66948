use serde::Serialize;

use crate::error::QcError;
use crate::fasta::FastaRecord;

/// Length of the sequence preview included in analysis summaries.
const PREVIEW_LEN: usize = 120;

/// Per-record quality-control row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordQc {
    pub id: String,
    pub length: u64,
    /// GC percentage over the record, rounded to 2 decimals.
    pub gc_percent: f64,
    /// Number of bases outside A/T/G/C (case-insensitive).
    pub invalid_count: u64,
}

/// Aggregate summary over a whole FASTA document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QcSummary {
    /// Total length across all records.
    pub length: u64,
    /// Mean GC percentage over informative (non-empty) records, 2 decimals.
    pub gc_percent: f64,
    /// First record's sequence, truncated to 120 characters with an ellipsis.
    pub sequence_preview: String,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn gc_percent(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc = seq
        .chars()
        .filter(|c| matches!(c, 'G' | 'C' | 'g' | 'c'))
        .count();
    round2(gc as f64 / seq.len() as f64 * 100.0)
}

/// Compute length, GC percentage, and invalid-base counts per record.
pub fn compute_qc(records: &[FastaRecord]) -> Vec<RecordQc> {
    records
        .iter()
        .map(|rec| {
            let invalid = rec
                .sequence
                .chars()
                .filter(|c| !matches!(c.to_ascii_uppercase(), 'A' | 'T' | 'G' | 'C'))
                .count();
            RecordQc {
                id: rec.id.clone(),
                length: rec.sequence.len() as u64,
                gc_percent: gc_percent(&rec.sequence),
                invalid_count: invalid as u64,
            }
        })
        .collect()
}

/// Filter QC rows by minimum length and invalid-base threshold.
pub fn filter_records(rows: &[RecordQc], min_len: u64, max_invalid: u64) -> Vec<RecordQc> {
    rows.iter()
        .filter(|row| row.length >= min_len && row.invalid_count <= max_invalid)
        .cloned()
        .collect()
}

/// Build the aggregate summary the analysis endpoint returns.
///
/// Total length is summed over every record; GC percentage is the mean over
/// informative (non-empty) records. Fails with `NoRecords` for an empty
/// document and `NoInformativeBases` when every record is empty.
pub fn summarize(records: &[FastaRecord]) -> Result<QcSummary, QcError> {
    if records.is_empty() {
        return Err(QcError::NoRecords);
    }

    let mut total_length = 0u64;
    let mut total_gc = 0.0f64;
    let mut informative = 0u64;

    for rec in records {
        if rec.sequence.is_empty() {
            continue;
        }
        total_length += rec.sequence.len() as u64;
        total_gc += gc_percent(&rec.sequence);
        informative += 1;
    }

    if informative == 0 {
        return Err(QcError::NoInformativeBases);
    }

    let first = &records[0].sequence;
    let preview = if first.chars().count() > PREVIEW_LEN {
        let truncated: String = first.chars().take(PREVIEW_LEN).collect();
        format!("{truncated}...")
    } else {
        first.clone()
    };

    Ok(QcSummary {
        length: total_length,
        gc_percent: round2(total_gc / informative as f64),
        sequence_preview: preview,
    })
}
