//! The spotlight where one candidate at a time waits for a decision

use super::error::OfficeError;
use super::types::CandidateId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationTray {
    /// The candidate currently under evaluation (if any)
    occupant: Option<CandidateId>,
}

impl EvaluationTray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a candidate in the spotlight
    pub fn occupy(&mut self, candidate: CandidateId) -> Result<(), OfficeError> {
        match self.occupant {
            None => {
                self.occupant = Some(candidate);
                Ok(())
            }
            Some(occupant) => Err(OfficeError::TrayAlreadyOccupied { occupant }),
        }
    }

    /// Remove and return the occupant, leaving the tray empty
    pub fn take(&mut self) -> Option<CandidateId> {
        self.occupant.take()
    }

    pub fn occupant(&self) -> Option<CandidateId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn clear(&mut self) {
        self.occupant = None;
    }
}
