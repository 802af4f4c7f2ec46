//! Cosine similarity between a resume and every job vector.

use serde::Deserialize;

use crate::catalog::error::LoadError;
use crate::matching::error::MatchError;
use crate::matching::vectorizer::Vectorizer;

/// Sparse feature vector with strictly increasing indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Caller guarantees `entries` are sorted by index without duplicates.
    pub(crate) fn from_sorted(entries: Vec<(usize, f64)>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two index lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ai, aw) = self.entries[i];
            let (bi, bw) = other.entries[j];
            match ai.cmp(&bi) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += aw * bw;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Cosine of the angle between two vectors. Zero-length input scores 0.0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    a.dot(b) / denom
}

// ────────────────────────────────────────────────────────────────────────────
// Job vector matrix
// ────────────────────────────────────────────────────────────────────────────

/// One stored row: either all `n_features` values, or parallel index/value lists.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RowRepr {
    Dense(Vec<f64>),
    Sparse { indices: Vec<usize>, values: Vec<f64> },
}

/// On-disk form of the pre-computed job matrix.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixArtifact {
    pub n_features: usize,
    pub rows: Vec<RowRepr>,
}

/// Pre-computed job vectors, one row per job posting, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct JobVectorMatrix {
    n_features: usize,
    rows: Vec<SparseVector>,
}

impl JobVectorMatrix {
    pub fn from_artifact(artifact: MatrixArtifact) -> Result<Self, LoadError> {
        let n_features = artifact.n_features;
        let rows = artifact
            .rows
            .into_iter()
            .enumerate()
            .map(|(row, repr)| row_to_sparse(row, repr, n_features))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { n_features, rows })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn row_to_sparse(row: usize, repr: RowRepr, n_features: usize) -> Result<SparseVector, LoadError> {
    let entries: Vec<(usize, f64)> = match repr {
        RowRepr::Dense(values) => {
            if values.len() != n_features {
                return Err(LoadError::InvalidMatrix(format!(
                    "row {row} has {} values, expected {n_features}",
                    values.len()
                )));
            }
            values
                .into_iter()
                .enumerate()
                .filter(|(_, w)| *w != 0.0)
                .collect()
        }
        RowRepr::Sparse { indices, values } => {
            if indices.len() != values.len() {
                return Err(LoadError::InvalidMatrix(format!(
                    "row {row} has {} indices but {} values",
                    indices.len(),
                    values.len()
                )));
            }
            let mut entries: Vec<(usize, f64)> = indices.into_iter().zip(values).collect();
            entries.sort_by_key(|(index, _)| *index);
            if entries.windows(2).any(|w| w[0].0 == w[1].0) {
                return Err(LoadError::InvalidMatrix(format!(
                    "row {row} repeats a feature index"
                )));
            }
            entries
        }
    };

    if let Some((index, _)) = entries.iter().find(|(index, _)| *index >= n_features) {
        return Err(LoadError::InvalidMatrix(format!(
            "row {row} references feature {index}, matrix width is {n_features}"
        )));
    }
    if entries.iter().any(|(_, w)| !w.is_finite()) {
        return Err(LoadError::InvalidMatrix(format!(
            "row {row} contains non-finite values"
        )));
    }

    Ok(SparseVector::from_sorted(entries))
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Vectorizes `raw` and scores it against every job row.
///
/// The returned scores are in matrix row order. Scores are raw cosine values
/// and may overshoot 1.0 by floating-point error; clamping is a display concern.
pub fn score(
    vectorizer: &dyn Vectorizer,
    matrix: &JobVectorMatrix,
    raw: &str,
) -> Result<Vec<f64>, MatchError> {
    if matrix.is_empty() {
        return Err(MatchError::Vectorization(
            "job vector matrix is empty".to_string(),
        ));
    }

    let resume = vectorizer.transform(raw)?;
    if let Some((index, _)) = resume.iter().find(|(index, _)| *index >= matrix.n_features) {
        return Err(MatchError::Vectorization(format!(
            "resume vector uses feature {index}, job matrix width is {}",
            matrix.n_features
        )));
    }

    let scores: Vec<f64> = matrix
        .rows
        .iter()
        .map(|row| cosine_similarity(&resume, row))
        .collect();

    if scores.iter().any(|s| !s.is_finite()) {
        return Err(MatchError::Vectorization(
            "similarity produced non-finite scores".to_string(),
        ));
    }

    Ok(scores)
}
