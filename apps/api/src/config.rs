use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::catalog::loader::CatalogPaths;
use crate::catalog::skills::MatchMode;

/// Application configuration loaded from environment variables.
/// Fails at startup if a value is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_dir: PathBuf,
    pub vectorizer_path: Option<PathBuf>,
    pub job_vectors_path: Option<PathBuf>,
    pub jobs_path: Option<PathBuf>,
    pub skills_path: Option<PathBuf>,
    pub skill_match_mode: MatchMode,
    pub default_top_n: usize,
    pub max_resume_chars: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let skill_match_mode = optional_env("SKILL_MATCH_MODE")
            .map(|v| v.parse::<MatchMode>().map_err(anyhow::Error::msg))
            .transpose()
            .context("SKILL_MATCH_MODE is invalid")?
            .unwrap_or_default();

        let default_top_n = parse_env("DEFAULT_TOP_N", 3)?;
        if default_top_n == 0 {
            anyhow::bail!("DEFAULT_TOP_N must be at least 1");
        }

        Ok(Config {
            catalog_dir: optional_env("CATALOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            vectorizer_path: optional_env("VECTORIZER_PATH").map(PathBuf::from),
            job_vectors_path: optional_env("JOB_VECTORS_PATH").map(PathBuf::from),
            jobs_path: optional_env("JOBS_PATH").map(PathBuf::from),
            skills_path: optional_env("SKILLS_PATH").map(PathBuf::from),
            skill_match_mode,
            default_top_n,
            max_resume_chars: parse_env("MAX_RESUME_CHARS", 20_000)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Artifact locations: explicit paths win over files in `catalog_dir`.
    pub fn catalog_paths(&self) -> CatalogPaths {
        let defaults = CatalogPaths::in_dir(&self.catalog_dir);
        CatalogPaths {
            vectorizer: self.vectorizer_path.clone().unwrap_or(defaults.vectorizer),
            job_vectors: self.job_vectors_path.clone().unwrap_or(defaults.job_vectors),
            jobs: self.jobs_path.clone().unwrap_or(defaults.jobs),
            skills: self.skills_path.clone(),
            match_mode: self.skill_match_mode,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            catalog_dir: PathBuf::from("/srv/catalog"),
            vectorizer_path: None,
            job_vectors_path: None,
            jobs_path: None,
            skills_path: None,
            skill_match_mode: MatchMode::Substring,
            default_top_n: 3,
            max_resume_chars: 20_000,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_catalog_paths_default_to_catalog_dir() {
        let paths = config().catalog_paths();
        assert_eq!(paths.vectorizer, PathBuf::from("/srv/catalog/vectorizer.json"));
        assert_eq!(paths.job_vectors, PathBuf::from("/srv/catalog/job_vectors.json"));
        assert_eq!(paths.jobs, PathBuf::from("/srv/catalog/jobs.json"));
        assert_eq!(paths.skills, None);
    }

    #[test]
    fn test_explicit_paths_override_catalog_dir() {
        let mut cfg = config();
        cfg.jobs_path = Some(PathBuf::from("/tmp/jobs.json"));
        cfg.skills_path = Some(PathBuf::from("/tmp/skills.json"));
        cfg.skill_match_mode = MatchMode::WordBoundary;

        let paths = cfg.catalog_paths();
        assert_eq!(paths.jobs, PathBuf::from("/tmp/jobs.json"));
        assert_eq!(paths.vectorizer, PathBuf::from("/srv/catalog/vectorizer.json"));
        assert_eq!(paths.skills, Some(PathBuf::from("/tmp/skills.json")));
        assert_eq!(paths.match_mode, MatchMode::WordBoundary);
    }
}
