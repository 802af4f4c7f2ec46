//! Matching pipeline: normalize → extract skills → vectorize → score → rank → format.
//!
//! Every stage is synchronous and works only on data owned by the request plus
//! the read-only `MatchContext`. A failure in any stage aborts the request and
//! nothing downstream runs.

pub mod error;
pub mod formatter;
pub mod handlers;
pub mod normalizer;
pub mod ranker;
pub mod similarity;
pub mod skills;
pub mod vectorizer;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use crate::catalog::MatchContext;
use crate::matching::error::MatchError;
use crate::matching::formatter::{format_results, MatchRecord, MatchSummary};
use crate::matching::normalizer::is_blank;
use crate::matching::skills::{extract_skills, MatchSource};

pub const NOTHING_TO_PROCESS_MESSAGE: &str = "Please enter some resume text first.";

/// Complete result for one resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub skills: Vec<String>,
    pub skill_sources: BTreeMap<String, BTreeSet<MatchSource>>,
    pub matches: Vec<MatchRecord>,
    pub summary: MatchSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// Input was empty or whitespace-only; no stage past normalization ran.
    NothingToProcess,
    Matched(MatchReport),
}

/// Runs the full pipeline for one resume.
pub fn run_pipeline(
    ctx: &MatchContext,
    raw: &str,
    top_n: usize,
) -> Result<PipelineOutcome, MatchError> {
    if is_blank(raw) {
        debug!("Empty resume text, nothing to process");
        return Ok(PipelineOutcome::NothingToProcess);
    }
    if top_n < 1 {
        return Err(MatchError::InvalidTopN(top_n));
    }

    let extracted = extract_skills(&ctx.skills, raw);
    debug!(skills = extracted.len(), "Skills extracted");

    let scores = similarity::score(ctx.vectorizer.as_ref(), &ctx.matrix, raw)?;
    debug!(postings = scores.len(), "Similarity computed");

    let ranked = ranker::rank(&ctx.postings, &scores, top_n)?;
    let formatted = format_results(&ranked);
    debug!(
        returned = formatted.matches.len(),
        mean = formatted.summary.mean_similarity,
        "Ranking complete"
    );

    Ok(PipelineOutcome::Matched(MatchReport {
        skills: extracted.skills(),
        skill_sources: extracted.sources().clone(),
        matches: formatted.matches,
        summary: formatted.summary,
    }))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::catalog::loader::assemble;
    use crate::catalog::skills::{MatchMode, SkillTable};
    use crate::catalog::MatchContext;
    use crate::matching::similarity::{JobVectorMatrix, MatrixArtifact};
    use crate::matching::vectorizer::{TfidfVectorizer, VectorizerArtifact};
    use crate::models::job::JobPosting;

    /// Four-posting catalog over a six-term vocabulary.
    pub fn sample_context() -> MatchContext {
        let vectorizer: VectorizerArtifact = serde_json::from_value(serde_json::json!({
            "vocabulary": {"python": 0, "sql": 1, "java": 2, "spring": 3, "excel": 4, "docker": 5},
            "idf": [1.3, 1.2, 1.6, 1.9, 1.7, 1.5]
        }))
        .unwrap();
        let matrix: MatrixArtifact = serde_json::from_value(serde_json::json!({
            "n_features": 6,
            "rows": [
                [0.0, 0.8, 0.0, 0.0, 0.6, 0.0],
                [0.6, 0.8, 0.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.6, 0.8, 0.0, 0.0],
                [0.6, 0.0, 0.0, 0.0, 0.0, 0.8]
            ]
        }))
        .unwrap();
        let postings = vec![
            JobPosting::new("Data Analyst", "SQL and Excel reporting"),
            JobPosting::new("Data Engineer", "Python and SQL pipelines"),
            JobPosting::new("Backend Engineer", "Java and Spring services"),
            JobPosting::new("DevOps Engineer", "Python tooling and Docker"),
        ];
        let skills = SkillTable::new(
            ["python", "sql", "java", "docker", "excel"],
            [("k8s", ""), ("py3", "python")],
            MatchMode::Substring,
        )
        .unwrap();

        assemble(
            Box::new(TfidfVectorizer::from_artifact(vectorizer).unwrap()),
            JobVectorMatrix::from_artifact(matrix).unwrap(),
            postings,
            skills,
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::catalog::loader::assemble;
    use crate::catalog::skills::{MatchMode, SkillTable};
    use crate::matching::similarity::{JobVectorMatrix, MatrixArtifact, SparseVector};
    use crate::matching::test_support::sample_context;
    use crate::matching::vectorizer::Vectorizer;
    use crate::models::job::JobPosting;

    struct CountingVectorizer {
        calls: Arc<AtomicUsize>,
    }

    impl Vectorizer for CountingVectorizer {
        fn transform(&self, _document: &str) -> Result<SparseVector, MatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SparseVector::from_sorted(vec![(0, 1.0)]))
        }
        fn n_features(&self) -> usize {
            2
        }
    }

    fn tied_context(calls: Arc<AtomicUsize>) -> MatchContext {
        let matrix: MatrixArtifact = serde_json::from_value(serde_json::json!({
            "n_features": 2,
            "rows": [[0.3, 0.9539392014169456], [0.3, 0.9539392014169456]]
        }))
        .unwrap();
        assemble(
            Box::new(CountingVectorizer { calls }),
            JobVectorMatrix::from_artifact(matrix).unwrap(),
            vec![
                JobPosting::new("Data Analyst", "Reports"),
                JobPosting::new("Backend Engineer", "Services"),
            ],
            SkillTable::new(["python"], Vec::<(&str, &str)>::new(), MatchMode::Substring)
                .unwrap(),
        )
        .unwrap()
    }

    fn matched(outcome: PipelineOutcome) -> MatchReport {
        match outcome {
            PipelineOutcome::Matched(report) => report,
            PipelineOutcome::NothingToProcess => panic!("expected a match report"),
        }
    }

    #[test]
    fn test_empty_input_short_circuits_before_vectorizer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let ctx = tied_context(calls.clone());

        for input in ["", "   ", "\n\r\t"] {
            assert_eq!(
                run_pipeline(&ctx, input, 3).unwrap(),
                PipelineOutcome::NothingToProcess
            );
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_tied_scores_keep_catalog_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let ctx = tied_context(calls.clone());
        let report = matched(run_pipeline(&ctx, "anything", 2).unwrap());

        let roles: Vec<&str> = report.matches.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["Data Analyst", "Backend Engineer"]);
        assert_eq!(report.matches[0].similarity, report.matches[1].similarity);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_full_pipeline_ranks_and_extracts() {
        let ctx = sample_context();
        let report = matched(run_pipeline(&ctx, "Python developer\nSQL, Docker", 3).unwrap());

        assert_eq!(report.skills, vec!["docker", "python", "sql"]);
        assert_eq!(report.matches.len(), 3);
        assert_eq!(report.matches[0].rank, 1);
        // Backend Engineer shares no terms with the resume.
        assert!(report.matches.iter().all(|m| m.role != "Backend Engineer"));
        assert_eq!(
            report.summary.top_match.as_ref().map(|m| m.role.as_str()),
            Some(report.matches[0].role.as_str())
        );
    }

    #[test]
    fn test_top_n_larger_than_catalog_returns_all() {
        let ctx = sample_context();
        let report = matched(run_pipeline(&ctx, "python", 5).unwrap());
        assert_eq!(report.matches.len(), 4);
    }

    #[test]
    fn test_zero_top_n_is_rejected() {
        let ctx = sample_context();
        assert_eq!(
            run_pipeline(&ctx, "python", 0),
            Err(MatchError::InvalidTopN(0))
        );
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let ctx = sample_context();
        let text = "Java Spring engineer with SQL and Excel";
        assert_eq!(
            run_pipeline(&ctx, text, 4).unwrap(),
            run_pipeline(&ctx, text, 4).unwrap()
        );
    }

    #[test]
    fn test_percentages_within_bounds() {
        let ctx = sample_context();
        let report = matched(run_pipeline(&ctx, "python sql java docker excel spring", 4).unwrap());
        for m in &report.matches {
            assert!(m.progress <= 100);
            let pct: f64 = m.similarity_pct.parse().unwrap();
            assert!((0.0..=100.0).contains(&pct));
        }
    }
}
