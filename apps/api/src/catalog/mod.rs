// Catalog: everything loaded once at startup and shared read-only by every request.
// Built by loader::load_context in main, handed to handlers as Arc<MatchContext>.

pub mod defaults;
pub mod error;
pub mod loader;
pub mod skills;

use chrono::{DateTime, Utc};

use crate::catalog::skills::SkillTable;
use crate::matching::similarity::JobVectorMatrix;
use crate::matching::vectorizer::Vectorizer;
use crate::models::job::JobPosting;

/// Immutable artifacts for the matching pipeline.
///
/// `postings[i]` is described by row `i` of `matrix`; the loader refuses to
/// build a context where the two disagree in length.
pub struct MatchContext {
    pub skills: SkillTable,
    pub vectorizer: Box<dyn Vectorizer>,
    pub matrix: JobVectorMatrix,
    pub postings: Vec<JobPosting>,
    pub loaded_at: DateTime<Utc>,
}

impl std::fmt::Debug for MatchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchContext")
            .field("skills", &self.skills.vocabulary.len())
            .field("features", &self.vectorizer.n_features())
            .field("postings", &self.postings.len())
            .field("loaded_at", &self.loaded_at)
            .finish_non_exhaustive()
    }
}
