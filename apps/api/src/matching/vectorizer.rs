//! Turns one document into a feature vector in the catalog's space.
//!
//! The fitted vocabulary and weights are produced offline and loaded from a
//! JSON artifact. Nothing here learns or updates them.
//!
//! `MatchContext` holds a `Box<dyn Vectorizer>`; `TfidfVectorizer` is the
//! backend the loader builds.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::error::LoadError;
use crate::matching::error::MatchError;
use crate::matching::similarity::SparseVector;

/// A fitted text vectorizer exposing a single-document transform.
pub trait Vectorizer: Send + Sync {
    fn transform(&self, document: &str) -> Result<SparseVector, MatchError>;

    /// Width of the feature space every output vector lives in.
    fn n_features(&self) -> usize;
}

// ────────────────────────────────────────────────────────────────────────────
// Artifact format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of a fitted TF-IDF vectorizer.
///
/// ```json
/// { "vocabulary": {"python": 0, "sql": 1}, "idf": [1.4, 1.9],
///   "lowercase": true, "ngram_range": [1, 1], "stop_words": ["and"],
///   "sublinear_tf": false, "norm": "l2" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub vocabulary: BTreeMap<String, usize>,
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

// ────────────────────────────────────────────────────────────────────────────
// TfidfVectorizer
// ────────────────────────────────────────────────────────────────────────────

/// Term-frequency × inverse-document-frequency vectorizer.
///
/// Tokens are maximal runs of word characters (alphanumeric or `_`) at least
/// two characters long. Stop words are dropped before n-grams are formed.
/// Terms outside the fitted vocabulary are ignored.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    lowercase: bool,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    sublinear_tf: bool,
    norm: Option<Norm>,
    n_features: usize,
}

impl TfidfVectorizer {
    /// Validates an artifact: vocabulary indices must cover `0..len` exactly,
    /// `idf` (if present) must have one finite weight per feature.
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, LoadError> {
        let n_features = artifact.vocabulary.len();
        if n_features == 0 {
            return Err(LoadError::InvalidVectorizer(
                "vocabulary is empty".to_string(),
            ));
        }

        let mut seen = vec![false; n_features];
        for (term, &index) in &artifact.vocabulary {
            if index >= n_features {
                return Err(LoadError::InvalidVectorizer(format!(
                    "term '{term}' has index {index}, vocabulary size is {n_features}"
                )));
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(LoadError::InvalidVectorizer(format!(
                    "index {index} is assigned to more than one term"
                )));
            }
        }

        if let Some(idf) = &artifact.idf {
            if idf.len() != n_features {
                return Err(LoadError::InvalidVectorizer(format!(
                    "idf has {} weights for {n_features} features",
                    idf.len()
                )));
            }
            if idf.iter().any(|w| !w.is_finite()) {
                return Err(LoadError::InvalidVectorizer(
                    "idf contains non-finite weights".to_string(),
                ));
            }
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(LoadError::InvalidVectorizer(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let lowercase = artifact.lowercase;
        let stop_words = artifact
            .stop_words
            .into_iter()
            .map(|w| if lowercase { w.to_lowercase() } else { w })
            .collect();

        Ok(Self {
            vocabulary: artifact.vocabulary.into_iter().collect(),
            idf: artifact.idf,
            lowercase,
            ngram_range: artifact.ngram_range,
            stop_words,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            n_features,
        })
    }

    fn tokens<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|t| t.chars().count() >= 2)
            .filter(|t| !self.stop_words.contains(*t))
            .collect()
    }

    fn term_counts(&self, tokens: &[&str]) -> BTreeMap<usize, f64> {
        let mut counts = BTreeMap::new();
        let (min_n, max_n) = self.ngram_range;

        for n in min_n..=max_n {
            for gram in tokens.windows(n) {
                let term = gram.join(" ");
                if let Some(&index) = self.vocabulary.get(&term) {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }

        counts
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, document: &str) -> Result<SparseVector, MatchError> {
        let text = if self.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };
        let tokens = self.tokens(&text);
        let counts = self.term_counts(&tokens);

        let mut weighted = Vec::with_capacity(counts.len());
        for (index, tf) in counts {
            if index >= self.n_features {
                return Err(MatchError::Vectorization(format!(
                    "feature index {index} outside vocabulary of {}",
                    self.n_features
                )));
            }
            let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
            let idf = self.idf.as_ref().map_or(1.0, |idf| idf[index]);
            weighted.push((index, tf * idf));
        }

        let scale = match self.norm {
            Some(Norm::L2) => weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => weighted.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        if scale > 0.0 {
            for (_, w) in weighted.iter_mut() {
                *w /= scale;
            }
        }

        if weighted.iter().any(|(_, w)| !w.is_finite()) {
            return Err(MatchError::Vectorization(
                "document produced non-finite feature weights".to_string(),
            ));
        }

        Ok(SparseVector::from_sorted(weighted))
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}
