//! Errors raised by the office game core

use super::types::CandidateId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfficeError {
    #[error("stage index {0} is out of range (expected 0, 1 or 2)")]
    InvalidStageIndex(usize),
    #[error("no candidate record at index {index} ({available} records available)")]
    RecordExhausted { index: usize, available: usize },
    #[error("evaluation tray is already occupied by candidate {occupant}")]
    TrayAlreadyOccupied { occupant: CandidateId },
    #[error("unknown candidate {0}")]
    UnknownCandidate(CandidateId),
    #[error("candidate {0} is not waiting in line")]
    CandidateNotInLine(CandidateId),
}

impl OfficeError {
    /// Errors caused by a stray player action rather than a broken game
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            OfficeError::TrayAlreadyOccupied { .. }
                | OfficeError::UnknownCandidate(_)
                | OfficeError::CandidateNotInLine(_)
        )
    }
}
