//! Curated remote FASTA datasets offered by the fetch endpoint.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FastaSource {
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
}

/// The predefined datasets clients can fetch by id.
pub fn predefined() -> Vec<FastaSource> {
    vec![
        FastaSource {
            id: "covid_spike".into(),
            name: "SARS-CoV-2 Spike Protein".into(),
            url: "https://raw.githubusercontent.com/biopython/biopython/master/Doc/examples/ls_orchid.fasta".into(),
            description: "Reference spike sequence (demo dataset).".into(),
        },
        FastaSource {
            id: "human_mtDNA".into(),
            name: "Human Mitochondrial DNA".into(),
            url: "https://raw.githubusercontent.com/plotly/datasets/master/fasta/sample.fasta".into(),
            description: "Mitochondrial genome reference sample.".into(),
        },
        FastaSource {
            id: "arabidopsis".into(),
            name: "Arabidopsis Chloroplast".into(),
            url: "https://raw.githubusercontent.com/NCBI-Codeathons/Using-BLAST/master/example_data/arabidopsis.fasta".into(),
            description: "Plant chloroplast FASTA sample.".into(),
        },
    ]
}

/// Look up a predefined source by id.
pub fn find(id: &str) -> Option<FastaSource> {
    predefined().into_iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let sources = predefined();
        let mut ids: Vec<_> = sources.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), sources.len());
    }

    #[test]
    fn find_known_and_unknown() {
        assert!(find("covid_spike").is_some());
        assert!(find("nonexistent").is_none());
    }
}
