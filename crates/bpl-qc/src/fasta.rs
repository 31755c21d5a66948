use crate::error::QcError;

/// One sequence record from a FASTA document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastaRecord {
    /// First whitespace-delimited token of the header line.
    pub id: String,
    /// Remainder of the header line, if any.
    pub description: Option<String>,
    /// Concatenated sequence lines, stored as read (case preserved).
    pub sequence: String,
}

/// Parse a FASTA document into records.
///
/// Header lines start with `>`; the id is the first token and the rest of
/// the line becomes the description. Sequence lines between headers are
/// concatenated. Blank lines are ignored. Sequence data before the first
/// header is malformed. An empty document parses to an empty record list —
/// whether that is an error is the caller's decision.
pub fn parse_fasta(input: &str) -> Result<Vec<FastaRecord>, QcError> {
    let mut records: Vec<FastaRecord> = Vec::new();

    for line in input.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            let header = header.trim();
            let mut parts = header.splitn(2, char::is_whitespace);
            let id = parts.next().unwrap_or_default().to_owned();
            let description = parts
                .next()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_owned);
            records.push(FastaRecord {
                id,
                description,
                sequence: String::new(),
            });
        } else {
            match records.last_mut() {
                Some(record) => record.sequence.push_str(line.trim()),
                None => {
                    return Err(QcError::Malformed(
                        "sequence data before first header".into(),
                    ))
                }
            }
        }
    }

    Ok(records)
}
