use thiserror::Error;

/// Per-request failures raised by the matching pipeline.
///
/// `Vectorization` is recoverable for the caller (the request is rejected,
/// nothing else is affected). `InvalidTopN` and `MisalignedInput` are
/// contract violations between pipeline stages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("Vectorization failed: {0}")]
    Vectorization(String),

    #[error("top_n must be at least 1, got {0}")]
    InvalidTopN(usize),

    #[error("Misaligned input: {postings} postings but {scores} scores")]
    MisalignedInput { postings: usize, scores: usize },
}
