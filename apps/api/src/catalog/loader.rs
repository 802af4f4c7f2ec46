//! Reads the fitted vectorizer, job vectors, and jobs table
//! from disk and checks that they describe the same catalog.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::catalog::error::LoadError;
use crate::catalog::skills::{MatchMode, SkillTable};
use crate::catalog::MatchContext;
use crate::matching::similarity::{JobVectorMatrix, MatrixArtifact};
use crate::matching::vectorizer::{TfidfVectorizer, Vectorizer, VectorizerArtifact};
use crate::models::job::JobPosting;

/// Where the catalog artifacts live.
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    pub vectorizer: PathBuf,
    pub job_vectors: PathBuf,
    pub jobs: PathBuf,
    /// Custom skills file; the built-in table is used when absent.
    pub skills: Option<PathBuf>,
    pub match_mode: MatchMode,
}

impl CatalogPaths {
    /// Default file names inside a single catalog directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vectorizer: dir.join("vectorizer.json"),
            job_vectors: dir.join("job_vectors.json"),
            jobs: dir.join("jobs.json"),
            skills: None,
            match_mode: MatchMode::default(),
        }
    }
}

/// Loads every artifact, failing on the first one that is missing or invalid.
pub fn load_context(paths: &CatalogPaths) -> Result<MatchContext, LoadError> {
    let vectorizer: VectorizerArtifact = read_json("vectorizer", &paths.vectorizer)?;
    let vectorizer = TfidfVectorizer::from_artifact(vectorizer)?;

    let matrix: MatrixArtifact = read_json("job vectors", &paths.job_vectors)?;
    let matrix = JobVectorMatrix::from_artifact(matrix)?;

    let postings: Vec<JobPosting> = read_json("jobs", &paths.jobs)?;

    let skills = match &paths.skills {
        Some(path) => SkillTable::from_file(path, paths.match_mode)?,
        None => SkillTable::builtin(paths.match_mode)?,
    };

    let context = assemble(Box::new(vectorizer), matrix, postings, skills)?;
    info!(
        "Catalog loaded: {} postings, {} features, {} skills, {} synonyms",
        context.postings.len(),
        context.matrix.n_features(),
        context.skills.vocabulary.len(),
        context.skills.synonyms.len(),
    );
    Ok(context)
}

/// Checks cross-artifact consistency and builds the shared context.
pub fn assemble(
    vectorizer: Box<dyn Vectorizer>,
    matrix: JobVectorMatrix,
    postings: Vec<JobPosting>,
    skills: SkillTable,
) -> Result<MatchContext, LoadError> {
    if matrix.n_features() != vectorizer.n_features() {
        return Err(LoadError::FeatureMismatch {
            vectorizer: vectorizer.n_features(),
            matrix: matrix.n_features(),
        });
    }
    if matrix.len() != postings.len() {
        return Err(LoadError::Misaligned {
            matrix_rows: matrix.len(),
            postings: postings.len(),
        });
    }

    Ok(MatchContext {
        skills,
        vectorizer,
        matrix,
        postings,
        loaded_at: Utc::now(),
    })
}

pub(crate) fn read_json<T: DeserializeOwned>(
    artifact: &'static str,
    path: &Path,
) -> Result<T, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::Missing {
                artifact,
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                artifact,
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse { artifact, source })
}
