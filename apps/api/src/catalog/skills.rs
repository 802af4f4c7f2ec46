//! Skill vocabulary and synonym tables, validated once at load time.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::defaults::{DEFAULT_SKILLS, DEFAULT_SYNONYMS};
use crate::catalog::error::LoadError;

/// How vocabulary and alias phrases are located inside normalized text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain substring search. "sql" matches inside "mysql".
    #[default]
    Substring,
    /// Phrase must be flanked by non-alphanumeric characters or the text edges.
    WordBoundary,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "word_boundary" | "word-boundary" | "boundary" => Ok(MatchMode::WordBoundary),
            other => Err(format!(
                "unknown skill match mode '{other}' (expected 'substring' or 'word_boundary')"
            )),
        }
    }
}

/// Ordered set of canonical skill names. Names are lower-case and unique.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillVocabulary {
    skills: Vec<String>,
    index: HashSet<String>,
}

impl SkillVocabulary {
    pub fn new<I, S>(skills: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut index = HashSet::new();

        for raw in skills {
            let skill = raw.as_ref().trim().to_lowercase();
            if skill.is_empty() {
                return Err(LoadError::InvalidSkills(
                    "skill names must not be empty".to_string(),
                ));
            }
            if !index.insert(skill.clone()) {
                return Err(LoadError::InvalidSkills(format!(
                    "duplicate skill '{skill}' (names are compared case-insensitively)"
                )));
            }
            ordered.push(skill);
        }

        Ok(Self {
            skills: ordered,
            index,
        })
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.index.contains(skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Alias phrase → canonical skill. `None` marks an alias that is recognized
/// but deliberately maps to nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynonymMap {
    entries: BTreeMap<String, Option<String>>,
}

impl SynonymMap {
    /// Builds the map, rejecting any non-empty target missing from `vocabulary`.
    pub fn new<I, A, T>(pairs: I, vocabulary: &SkillVocabulary) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (A, T)>,
        A: AsRef<str>,
        T: AsRef<str>,
    {
        let mut entries = BTreeMap::new();

        for (alias, target) in pairs {
            let alias = alias.as_ref().trim().to_lowercase();
            if alias.is_empty() {
                return Err(LoadError::InvalidSkills(
                    "synonym aliases must not be empty".to_string(),
                ));
            }
            let target = target.as_ref().trim().to_lowercase();
            let target = if target.is_empty() {
                None
            } else if vocabulary.contains(&target) {
                Some(target)
            } else {
                return Err(LoadError::UnknownSynonymTarget { alias, target });
            };
            entries.insert(alias, target);
        }

        Ok(Self { entries })
    }

    /// Looks up the canonical target of an alias, if any.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).and_then(|t| t.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(alias, target)| (alias.as_str(), target.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// On-disk shape of a skills file: `{ "skills": [...], "synonyms": { alias: target } }`.
/// An empty-string target means "recognized, maps to nothing".
#[derive(Debug, Clone, Deserialize)]
pub struct SkillTableFile {
    pub skills: Vec<String>,
    #[serde(default)]
    pub synonyms: BTreeMap<String, String>,
}

/// The validated skill configuration shared by every request.
#[derive(Debug, Clone)]
pub struct SkillTable {
    pub vocabulary: SkillVocabulary,
    pub synonyms: SynonymMap,
    pub mode: MatchMode,
}

impl SkillTable {
    pub fn new<S, A, T>(
        skills: impl IntoIterator<Item = S>,
        synonyms: impl IntoIterator<Item = (A, T)>,
        mode: MatchMode,
    ) -> Result<Self, LoadError>
    where
        S: AsRef<str>,
        A: AsRef<str>,
        T: AsRef<str>,
    {
        let vocabulary = SkillVocabulary::new(skills)?;
        let synonyms = SynonymMap::new(synonyms, &vocabulary)?;
        Ok(Self {
            vocabulary,
            synonyms,
            mode,
        })
    }

    /// The built-in skill list and aliases.
    pub fn builtin(mode: MatchMode) -> Result<Self, LoadError> {
        Self::new(
            DEFAULT_SKILLS.iter().copied(),
            DEFAULT_SYNONYMS.iter().copied(),
            mode,
        )
    }

    /// Loads and validates a skills file.
    pub fn from_file(path: &Path, mode: MatchMode) -> Result<Self, LoadError> {
        let file: SkillTableFile = crate::catalog::loader::read_json("skills", path)?;
        Self::new(file.skills, file.synonyms, mode)
    }
}
