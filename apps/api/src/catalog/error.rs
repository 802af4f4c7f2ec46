use std::path::PathBuf;

use thiserror::Error;

/// Startup failures while loading catalog artifacts or skill tables.
/// Any of these keeps the service from accepting requests.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Missing {artifact} artifact at {}", path.display())]
    Missing { artifact: &'static str, path: PathBuf },

    #[error("Failed to read {artifact} artifact at {}: {source}", path.display())]
    Io {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {artifact} artifact: {source}")]
    Parse {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid vectorizer: {0}")]
    InvalidVectorizer(String),

    #[error("Invalid job vector matrix: {0}")]
    InvalidMatrix(String),

    #[error("Feature space mismatch: vectorizer has {vectorizer} features, job matrix has {matrix}")]
    FeatureMismatch { vectorizer: usize, matrix: usize },

    #[error("Misaligned catalog: job matrix has {matrix_rows} rows but jobs table has {postings} postings")]
    Misaligned { matrix_rows: usize, postings: usize },

    #[error("Invalid skill vocabulary: {0}")]
    InvalidSkills(String),

    #[error("Synonym '{alias}' maps to unknown skill '{target}'")]
    UnknownSynonymTarget { alias: String, target: String },
}
