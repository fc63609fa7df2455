//! Scrolling line of people waiting for the trained model in the ML lab
//!
//! The head of the line is evaluated, leaves, and a new person joins at the
//! tail, so the line always has the same length.

use log::debug;
use std::collections::VecDeque;

use super::model::Predictor;
use super::MlError;
use crate::office::{
    CandidateId, CandidateRecord, Decision, EventBus, GameEvent, RecordSource, Viewport,
};

/// Horizontal gap between two people, in pixels
pub const PERSON_X_OFFSET: f32 = 70.0;
/// Share of the screen width the line covers
pub const LINE_WIDTH_UV: f32 = 0.85;
/// Left edge of the line, in uv units
pub const LINE_START_UV: f32 = 0.25;
pub const SCROLL_DELAY_MS: u32 = 200;
pub const SCROLL_TIME_MS: u32 = 700;

#[derive(Debug, Clone, PartialEq)]
pub struct MlPerson {
    pub id: CandidateId,
    /// Offset inside the line container, in pixels
    pub x: f32,
    pub record: CandidateRecord,
}

/// Container shift played after every evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTween {
    pub from_x: f32,
    pub to_x: f32,
    pub delay_ms: u32,
    pub time_ms: u32,
}

#[derive(Debug, Clone)]
pub struct PeopleLine {
    people: VecDeque<MlPerson>,
    person_count: usize,
    /// Container position, in pixels
    pub container_x: f32,
    records: RecordSource,
    evaluated: Vec<(CandidateId, Decision)>,
}

impl PeopleLine {
    pub fn new(viewport: Viewport, records: RecordSource) -> Result<Self, MlError> {
        let num_of_people =
            (viewport.uv_to_px_x(LINE_WIDTH_UV) / PERSON_X_OFFSET).floor() as usize * 2;
        let mut line = Self {
            people: VecDeque::with_capacity(num_of_people),
            person_count: 0,
            container_x: viewport.uv_to_px_x(LINE_START_UV),
            records,
            evaluated: Vec::new(),
        };
        for _ in 0..num_of_people {
            line.add_new_person()?;
        }
        Ok(line)
    }

    fn add_new_person(&mut self) -> Result<(), MlError> {
        let record = self.records.get(self.person_count)?.clone();
        self.people.push_back(MlPerson {
            id: CandidateId(self.person_count),
            x: self.person_count as f32 * PERSON_X_OFFSET,
            record,
        });
        self.person_count += 1;
        Ok(())
    }

    /// Tween that scrolls the container one person to the left
    pub fn scroll_tween(&self) -> ScrollTween {
        ScrollTween {
            from_x: self.container_x,
            to_x: self.container_x - PERSON_X_OFFSET,
            delay_ms: SCROLL_DELAY_MS,
            time_ms: SCROLL_TIME_MS,
        }
    }

    /// Finish a scroll started with `scroll_tween`
    pub fn apply_scroll(&mut self, tween: &ScrollTween) {
        self.container_x = tween.to_x;
    }

    pub fn first(&self) -> Option<&MlPerson> {
        self.people.front()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn people(&self) -> impl Iterator<Item = &MlPerson> {
        self.people.iter()
    }

    /// Let the model judge the head of the line and announce the result
    pub fn evaluate_first_person(
        &mut self,
        model: &dyn Predictor,
        bus: &mut EventBus,
    ) -> Result<Decision, MlError> {
        let first = self.people.front().ok_or(MlError::EmptyLine)?;
        // The line must be refillable before anyone leaves it
        self.records.get(self.person_count)?;

        let status = model.predict(&first.record);
        bus.publish(GameEvent::DatasetViewNewCv {
            status,
            data: first.record.clone(),
        });
        debug!("Model {} candidate {}", status, first.id);

        if let Some(person) = self.people.pop_front() {
            self.evaluated.push((person.id, status));
        }
        self.add_new_person()?;
        Ok(status)
    }

    /// Every evaluation so far, in order
    pub fn evaluated(&self) -> &[(CandidateId, Decision)] {
        &self.evaluated
    }
}
