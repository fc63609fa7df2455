//! Deterministic tween manager standing in for the rendering engine's
//! animation library.
//!
//! Each tween moves one candidate between two positions. Completions carry
//! the stage epoch they were started in so that a completion arriving after
//! the stage was torn down can be recognised and dropped.

use std::f32::consts::PI;

use super::types::{CandidateId, Exit, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    InOutSine,
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// Why a tween was started; decides what happens when it ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenPurpose {
    ToSpotlight,
    ReturnToLine,
    Exit(Exit),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub id: TweenId,
    pub target: CandidateId,
    pub from: Position,
    pub to: Position,
    pub time_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
    pub purpose: TweenPurpose,
    pub epoch: u64,
    elapsed_ms: u32,
}

impl Tween {
    /// Position at the current elapsed time
    pub fn sample(&self) -> Position {
        if self.elapsed_ms <= self.delay_ms {
            return self.from;
        }
        let t = if self.time_ms == 0 {
            1.0
        } else {
            (self.elapsed_ms - self.delay_ms) as f32 / self.time_ms as f32
        };
        self.from.lerp(&self.to, self.easing.apply(t))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.delay_ms + self.time_ms
    }
}

/// Notification that a tween ran to completion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenEnded {
    pub tween: TweenId,
    pub candidate: CandidateId,
    pub purpose: TweenPurpose,
    pub epoch: u64,
}

/// Result of advancing all tweens
#[derive(Debug, Clone, Default)]
pub struct TweenFrame {
    /// New position per animated candidate, with the tween's epoch
    pub positions: Vec<(CandidateId, Position, u64)>,
    pub ended: Vec<TweenEnded>,
}

#[derive(Debug, Clone, Default)]
pub struct TweenManager {
    tweens: Vec<Tween>,
    next_id: usize,
}

impl TweenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween; any tween already driving `target` is stopped first
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        target: CandidateId,
        from: Position,
        to: Position,
        time_ms: u32,
        delay_ms: u32,
        easing: Easing,
        purpose: TweenPurpose,
        epoch: u64,
    ) -> TweenId {
        self.tweens.retain(|t| t.target != target);

        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.push(Tween {
            id,
            target,
            from,
            to,
            time_ms,
            delay_ms,
            easing,
            purpose,
            epoch,
            elapsed_ms: 0,
        });
        id
    }

    /// Stop a tween without firing its completion
    pub fn stop(&mut self, id: TweenId) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.id != id);
        self.tweens.len() != before
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    pub fn active_for(&self, candidate: CandidateId) -> Option<&Tween> {
        self.tweens.iter().find(|t| t.target == candidate)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Advance every tween by `delta_ms`, dropping and reporting finished ones
    pub fn tick(&mut self, delta_ms: u32) -> TweenFrame {
        let mut frame = TweenFrame::default();

        self.tweens.retain_mut(|tween| {
            tween.elapsed_ms = tween.elapsed_ms.saturating_add(delta_ms);
            frame
                .positions
                .push((tween.target, tween.sample(), tween.epoch));

            if tween.is_finished() {
                frame.ended.push(TweenEnded {
                    tween: tween.id,
                    candidate: tween.target,
                    purpose: tween.purpose,
                    epoch: tween.epoch,
                });
                false
            } else {
                true
            }
        });

        frame
    }
}
