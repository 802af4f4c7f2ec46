//! Resolves resume text into canonical skills.
//!
//! Three independent passes run over the normalized text and are unioned:
//! 1. alias pass: every synonym phrase found in the text adds its target
//! 2. canonical pass: every vocabulary skill found in the text adds itself
//! 3. token pass: every whitespace/`/` token that is itself a synonym key adds its target
//!
//! A skill may be found by several passes. The sources are kept per skill so
//! callers can show why a skill was detected.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::skills::{MatchMode, SkillTable};
use crate::matching::normalizer::normalize;

/// Which pass detected a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Alias,
    Canonical,
    Token,
}

/// Skills detected in one resume, keyed (and therefore sorted) by canonical name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedSkills {
    sources: BTreeMap<String, BTreeSet<MatchSource>>,
}

impl ExtractedSkills {
    fn add(&mut self, skill: &str, source: MatchSource) {
        self.sources
            .entry(skill.to_string())
            .or_default()
            .insert(source);
    }

    fn merge(&mut self, hits: Vec<(String, MatchSource)>) {
        for (skill, source) in hits {
            self.add(&skill, source);
        }
    }

    /// Canonical skill names in lexicographic order.
    pub fn skills(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    pub fn sources(&self) -> &BTreeMap<String, BTreeSet<MatchSource>> {
        &self.sources
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.sources.contains_key(skill)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Extracts canonical skills from raw resume text.
pub fn extract_skills(table: &SkillTable, raw: &str) -> ExtractedSkills {
    let text = normalize(raw);
    let mut extracted = ExtractedSkills::default();
    if text.is_empty() {
        return extracted;
    }

    extracted.merge(alias_pass(table, &text));
    extracted.merge(canonical_pass(table, &text));
    extracted.merge(token_pass(table, &text));
    extracted
}

/// Synonym phrases found anywhere in the text.
pub fn alias_pass(table: &SkillTable, text: &str) -> Vec<(String, MatchSource)> {
    table
        .synonyms
        .iter()
        .filter_map(|(alias, target)| {
            let target = target?;
            (table.vocabulary.contains(target) && contains_phrase(text, alias, table.mode))
                .then(|| (target.to_string(), MatchSource::Alias))
        })
        .collect()
}

/// Vocabulary skills found anywhere in the text.
pub fn canonical_pass(table: &SkillTable, text: &str) -> Vec<(String, MatchSource)> {
    table
        .vocabulary
        .iter()
        .filter(|skill| contains_phrase(text, skill, table.mode))
        .map(|skill| (skill.to_string(), MatchSource::Canonical))
        .collect()
}

/// Whole tokens (split on whitespace and `/`, longer than one char) that are synonym keys.
pub fn token_pass(table: &SkillTable, text: &str) -> Vec<(String, MatchSource)> {
    tokenize(text)
        .filter_map(|token| table.synonyms.resolve(token))
        .filter(|target| table.vocabulary.contains(target))
        .map(|target| (target.to_string(), MatchSource::Token))
        .collect()
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == '/')
        .filter(|token| token.chars().count() > 1)
}

fn contains_phrase(text: &str, phrase: &str, mode: MatchMode) -> bool {
    if phrase.is_empty() {
        return false;
    }
    match mode {
        MatchMode::Substring => text.contains(phrase),
        MatchMode::WordBoundary => text.match_indices(phrase).any(|(start, matched)| {
            let end = start + matched.len();
            let before = text[..start].chars().next_back();
            let after = text[end..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        }),
    }
}
