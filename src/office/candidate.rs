//! A single applicant walking around the office

use super::types::{CandidateId, Exit, PersonColor, Position};

/// Where a candidate is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateState {
    /// Waiting in line (possibly still walking back to its slot)
    InLine,
    /// Occupying the evaluation tray
    InSpotlight,
    /// Walking out through a door
    Leaving(Exit),
    /// Removed from display; the arena slot stays
    Gone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: CandidateId,
    pub color: PersonColor,
    /// Slot in line, reused by the replacement when this candidate leaves
    pub line_x: f32,
    pub original_x: f32,
    pub original_y: f32,
    /// Current drawn position
    pub position: Position,
    pub in_spotlight: bool,
    pub state: CandidateState,
}

impl Candidate {
    pub fn new(id: CandidateId, color: PersonColor, x: f32, y: f32) -> Self {
        Self {
            id,
            color,
            line_x: x,
            original_x: x,
            original_y: y,
            position: Position::new(x, y),
            in_spotlight: false,
            state: CandidateState::InLine,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state != CandidateState::Gone
    }

    pub fn home(&self) -> Position {
        Position::new(self.original_x, self.original_y)
    }
}
