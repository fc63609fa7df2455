//! Hiring model trained on the player's office decisions
//!
//! The model scores a CV as a weighted sum of its features plus a term for
//! the candidate's visual class. Training copies whatever preference the
//! player showed, including any preference for one colour over the other.

use crate::office::{CandidateRecord, Decision, PersonColor, RecordSource, MAX_FEATURE_SCORE};

/// How strongly a difference in acceptance rate between colours is learned
pub const COLOR_BIAS_SCALE: f32 = 10.0;

/// Anything that can accept or reject a CV
pub trait Predictor {
    fn predict(&self, record: &CandidateRecord) -> Decision;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedModel {
    pub weights: Vec<f32>,
    pub threshold: f32,
    /// Added to a yellow candidate's score (negative means penalised)
    pub color_bias: f32,
}

impl WeightedModel {
    /// Unbiased model: every feature counts the same, pass at half marks
    pub fn unbiased(feature_count: usize) -> Self {
        Self {
            weights: vec![1.0; feature_count],
            threshold: feature_count as f32 * MAX_FEATURE_SCORE as f32 / 2.0,
            color_bias: 0.0,
        }
    }

    /// Learn from `(record index, decision)` pairs
    ///
    /// Falls back to the unbiased model unless both outcomes are present.
    pub fn train(records: &RecordSource, history: &[(usize, Decision)]) -> Self {
        let feature_count = records.features().len();
        let labelled: Vec<(&CandidateRecord, Decision)> = history
            .iter()
            .filter_map(|(index, decision)| records.get(*index).ok().map(|r| (r, *decision)))
            .collect();

        let accepted: Vec<&CandidateRecord> = labelled
            .iter()
            .filter(|(_, d)| *d == Decision::Accepted)
            .map(|(r, _)| *r)
            .collect();
        let rejected: Vec<&CandidateRecord> = labelled
            .iter()
            .filter(|(_, d)| *d == Decision::Rejected)
            .map(|(r, _)| *r)
            .collect();

        if accepted.is_empty() || rejected.is_empty() {
            return Self::unbiased(feature_count);
        }

        let weights = (0..feature_count)
            .map(|i| feature_mean(&accepted, i) - feature_mean(&rejected, i))
            .collect();

        let color_bias = (acceptance_rate(&labelled, PersonColor::Yellow)
            - acceptance_rate(&labelled, PersonColor::Blue))
            * COLOR_BIAS_SCALE;

        let mut model = Self {
            weights,
            threshold: 0.0,
            color_bias,
        };
        let accepted_mean = mean(accepted.iter().map(|r| model.score(r)));
        let rejected_mean = mean(rejected.iter().map(|r| model.score(r)));
        model.threshold = (accepted_mean + rejected_mean) / 2.0;
        model
    }

    pub fn score(&self, record: &CandidateRecord) -> f32 {
        let features: f32 = self
            .weights
            .iter()
            .zip(&record.scores)
            .map(|(w, s)| w * *s as f32)
            .sum();
        match record.color {
            PersonColor::Yellow => features + self.color_bias,
            PersonColor::Blue => features,
        }
    }
}

impl Predictor for WeightedModel {
    fn predict(&self, record: &CandidateRecord) -> Decision {
        if self.score(record) >= self.threshold {
            Decision::Accepted
        } else {
            Decision::Rejected
        }
    }
}

fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

fn feature_mean(records: &[&CandidateRecord], feature: usize) -> f32 {
    mean(
        records
            .iter()
            .map(|r| r.scores.get(feature).copied().unwrap_or(0) as f32),
    )
}

/// Share of accepted candidates among those of `color`; 0.5 when unseen
fn acceptance_rate(labelled: &[(&CandidateRecord, Decision)], color: PersonColor) -> f32 {
    let seen: Vec<Decision> = labelled
        .iter()
        .filter(|(r, _)| r.color == color)
        .map(|(_, d)| *d)
        .collect();
    if seen.is_empty() {
        return 0.5;
    }
    let accepted = seen.iter().filter(|d| **d == Decision::Accepted).count();
    accepted as f32 / seen.len() as f32
}
