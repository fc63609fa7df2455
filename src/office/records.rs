//! Candidate records (the CV collection)
//!
//! Records are read-only from the game's point of view and are addressed by
//! candidate identity: candidate `#n` always shows record `n`.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use super::error::OfficeError;
use super::types::PersonColor;

/// Features shown on every generated CV, in score order
pub const DEFAULT_FEATURES: [&str; 4] = ["education", "experience", "skills", "referral"];

/// Highest score a single feature can have
pub const MAX_FEATURE_SCORE: u32 = 10;

const FIRST_NAMES: [&str; 16] = [
    "Ada", "Bruno", "Chen", "Dalia", "Emeka", "Farah", "Goran", "Hana", "Ivo", "Jun", "Kemi",
    "Luis", "Mira", "Noor", "Omar", "Priya",
];

const LAST_NAMES: [&str; 12] = [
    "Adams", "Baptiste", "Costa", "Dubois", "Eriksen", "Fischer", "Gupta", "Haddad", "Ito",
    "Jensen", "Kowalski", "Lindqvist",
];

/// A single applicant's CV
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub color: PersonColor,
    /// One score per feature, aligned with `RecordSource::features`
    #[serde(default)]
    pub scores: Vec<u32>,
}

impl CandidateRecord {
    /// Sum of all feature scores
    pub fn total_score(&self) -> u32 {
        self.scores.iter().sum()
    }
}

#[derive(Debug, Deserialize)]
struct RecordFile {
    #[serde(default)]
    features: Vec<String>,
    records: Vec<CandidateRecord>,
}

/// Ordered, externally populated list of CVs
#[derive(Debug, Clone)]
pub struct RecordSource {
    features: Arc<Vec<String>>,
    records: Arc<Vec<CandidateRecord>>,
}

impl RecordSource {
    pub fn new(features: Vec<String>, records: Vec<CandidateRecord>) -> Self {
        Self {
            features: Arc::new(features),
            records: Arc::new(records),
        }
    }

    /// Generate `count` records deterministically from `seed`
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let records = (0..count)
            .map(|_| {
                let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Alex");
                let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Smith");
                let color = if rng.random_bool(0.5) {
                    PersonColor::Yellow
                } else {
                    PersonColor::Blue
                };
                let scores = DEFAULT_FEATURES
                    .iter()
                    .map(|_| rng.random_range(0..=MAX_FEATURE_SCORE))
                    .collect();
                CandidateRecord {
                    name: format!("{} {}", first, last),
                    color,
                    scores,
                }
            })
            .collect();

        Self::new(
            DEFAULT_FEATURES.iter().map(|f| f.to_string()).collect(),
            records,
        )
    }

    /// Parse a `{ "features": [...], "records": [...] }` document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: RecordFile =
            serde_json::from_str(json).context("Candidate record file is not valid JSON")?;
        let features = if file.features.is_empty() {
            DEFAULT_FEATURES.iter().map(|f| f.to_string()).collect()
        } else {
            file.features
        };
        Ok(Self::new(features, file.records))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read candidate records from {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn get(&self, index: usize) -> Result<&CandidateRecord, OfficeError> {
        self.records.get(index).ok_or(OfficeError::RecordExhausted {
            index,
            available: self.records.len(),
        })
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
