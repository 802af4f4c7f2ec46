//! Orders job postings by similarity and keeps the top N.

use serde::Serialize;

use crate::matching::error::MatchError;
use crate::models::job::JobPosting;

/// A posting paired with its score for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// Row index of the posting in the catalog.
    pub index: usize,
    pub posting: JobPosting,
    pub score: f64,
}

/// Postings sorted by score, highest first, at most `top_n` long.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedResult {
    pub entries: Vec<RankedEntry>,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sorts postings by descending score and truncates to `min(top_n, postings.len())`.
///
/// The sort is stable: postings with equal scores keep their catalog order.
/// Scores are ranked as given; display clamping never feeds back into ordering.
pub fn rank(
    postings: &[JobPosting],
    scores: &[f64],
    top_n: usize,
) -> Result<RankedResult, MatchError> {
    if top_n < 1 {
        return Err(MatchError::InvalidTopN(top_n));
    }
    if postings.len() != scores.len() {
        return Err(MatchError::MisalignedInput {
            postings: postings.len(),
            scores: scores.len(),
        });
    }

    let mut order: Vec<usize> = (0..postings.len()).collect();
    // slice::sort_by is stable
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(top_n);

    let entries = order
        .into_iter()
        .map(|index| RankedEntry {
            index,
            posting: postings[index].clone(),
            score: scores[index],
        })
        .collect();

    Ok(RankedResult { entries })
}
