//! Shapes ranked results into presentation-ready records.

use serde::Serialize;

use crate::matching::ranker::RankedResult;

/// Shown when a posting has no role name.
pub const UNKNOWN_ROLE: &str = "Unknown role";
/// Shown when a posting has no description.
pub const MISSING_DESCRIPTION: &str = "No description provided.";

/// One match, ready to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub role: String,
    pub description: String,
    /// Raw similarity, unclamped.
    pub similarity: f64,
    /// Clamped percentage with exactly two decimals, e.g. `"42.17"`.
    pub similarity_pct: String,
    /// Clamped integer percentage in 0..=100 for progress indicators.
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub top_match: Option<MatchRecord>,
    /// Arithmetic mean of the raw similarities; 0.0 when there are no matches.
    pub mean_similarity: f64,
    pub match_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedResults {
    pub matches: Vec<MatchRecord>,
    pub summary: MatchSummary,
}

pub fn format_results(ranked: &RankedResult) -> FormattedResults {
    let matches: Vec<MatchRecord> = ranked
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let pct = clamped_percent(entry.score);
            MatchRecord {
                rank: i + 1,
                role: text_or(entry.posting.role.as_deref(), UNKNOWN_ROLE),
                description: text_or(entry.posting.description.as_deref(), MISSING_DESCRIPTION),
                similarity: entry.score,
                similarity_pct: format!("{pct:.2}"),
                progress: pct.round() as u8,
            }
        })
        .collect();

    let mean_similarity = if ranked.is_empty() {
        0.0
    } else {
        ranked.entries.iter().map(|e| e.score).sum::<f64>() / ranked.len() as f64
    };

    FormattedResults {
        summary: MatchSummary {
            top_match: matches.first().cloned(),
            mean_similarity,
            match_count: matches.len(),
        },
        matches,
    }
}

/// Similarity as a percentage clamped to [0, 100]. Display only.
pub fn clamped_percent(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    (score * 100.0).clamp(0.0, 100.0)
}

fn text_or(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => placeholder.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::ranker::RankedEntry;
    use crate::models::job::JobPosting;

    fn ranked(rows: Vec<(JobPosting, f64)>) -> RankedResult {
        RankedResult {
            entries: rows
                .into_iter()
                .enumerate()
                .map(|(index, (posting, score))| RankedEntry {
                    index,
                    posting,
                    score,
                })
                .collect(),
        }
    }

    #[test]
    fn test_percentage_two_decimals() {
        let out = format_results(&ranked(vec![(JobPosting::new("Data Analyst", "SQL"), 0.421_73)]));
        let m = &out.matches[0];
        assert_eq!(m.rank, 1);
        assert_eq!(m.similarity_pct, "42.17");
        assert_eq!(m.progress, 42);
        assert_eq!(m.role, "Data Analyst");
    }

    #[test]
    fn test_zero_similarity_formats_as_zero() {
        let out = format_results(&ranked(vec![(JobPosting::new("A", "B"), 0.0)]));
        assert_eq!(out.matches[0].similarity_pct, "0.00");
        assert_eq!(out.matches[0].progress, 0);
    }

    #[test]
    fn test_overshoot_clamped_for_display_only() {
        let score = 1.0 + f64::EPSILON;
        let out = format_results(&ranked(vec![(JobPosting::new("A", "B"), score)]));
        let m = &out.matches[0];
        assert_eq!(m.similarity_pct, "100.00");
        assert_eq!(m.progress, 100);
        assert_eq!(m.similarity, score);
    }

    #[test]
    fn test_negative_clamped_to_zero() {
        assert_eq!(clamped_percent(-0.02), 0.0);
        assert_eq!(clamped_percent(f64::NAN), 0.0);
    }

    #[test]
    fn test_progress_always_within_bounds() {
        for score in [-1.0, -1e-9, 0.0, 0.004_9, 0.5, 0.995, 1.0, 1.5] {
            let out = format_results(&ranked(vec![(JobPosting::new("A", "B"), score)]));
            assert!(out.matches[0].progress <= 100);
        }
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let posting = JobPosting {
            role: None,
            description: Some("   ".to_string()),
        };
        let out = format_results(&ranked(vec![(posting, 0.5)]));
        assert_eq!(out.matches[0].role, UNKNOWN_ROLE);
        assert_eq!(out.matches[0].description, MISSING_DESCRIPTION);
    }

    #[test]
    fn test_summary_top_match_and_mean() {
        let out = format_results(&ranked(vec![
            (JobPosting::new("A", "a"), 0.6),
            (JobPosting::new("B", "b"), 0.3),
            (JobPosting::new("C", "c"), 0.0),
        ]));
        assert_eq!(out.summary.match_count, 3);
        assert_eq!(out.summary.top_match.as_ref().unwrap().role, "A");
        assert!((out.summary.mean_similarity - 0.3).abs() < 1e-12);
        assert_eq!(
            out.matches.iter().map(|m| m.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_empty_result_summary() {
        let out = format_results(&RankedResult::default());
        assert!(out.matches.is_empty());
        assert_eq!(out.summary.top_match, None);
        assert_eq!(out.summary.mean_similarity, 0.0);
        assert_eq!(out.summary.match_count, 0);
    }
}
