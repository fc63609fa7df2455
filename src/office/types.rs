//! Core types for the office hiring game
//!
//! These are standalone types that don't depend on Bevy.

use serde::Deserialize;
use std::fmt;

/// Unique, monotonically increasing identity of a candidate.
/// Doubles as the candidate's slot in the office arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateId(pub usize);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visual class of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonColor {
    Blue,
    Yellow,
}

impl PersonColor {
    /// Name of the texture used to draw this class in the asset catalog
    pub fn texture_name(&self) -> &'static str {
        match self {
            PersonColor::Blue => "personBlue",
            PersonColor::Yellow => "personYellow",
        }
    }
}

/// Outcome of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Rejected,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Accepted => write!(f, "accepted"),
            Decision::Rejected => write!(f, "rejected"),
        }
    }
}

/// One of the three office stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageIndex {
    /// Intro stage, no timer, tutorial instructions
    Small,
    Medium,
    Large,
}

impl StageIndex {
    pub const ALL: [StageIndex; 3] = [StageIndex::Small, StageIndex::Medium, StageIndex::Large];

    pub fn as_usize(&self) -> usize {
        match self {
            StageIndex::Small => 0,
            StageIndex::Medium => 1,
            StageIndex::Large => 2,
        }
    }

    /// The stage that follows this one, if any
    pub fn next(&self) -> Option<StageIndex> {
        match self {
            StageIndex::Small => Some(StageIndex::Medium),
            StageIndex::Medium => Some(StageIndex::Large),
            StageIndex::Large => None,
        }
    }
}

impl TryFrom<usize> for StageIndex {
    type Error = super::OfficeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(StageIndex::Small),
            1 => Ok(StageIndex::Medium),
            2 => Ok(StageIndex::Large),
            other => Err(super::OfficeError::InvalidStageIndex(other)),
        }
    }
}

impl fmt::Display for StageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageIndex::Small => write!(f, "small office (0)"),
            StageIndex::Medium => write!(f, "medium office (1)"),
            StageIndex::Large => write!(f, "large office (2)"),
        }
    }
}

/// Which door a leaving candidate walks towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exit {
    /// Entry door, used by hired candidates
    Entry,
    /// Exit door, used by rejected candidates
    Rejection,
}

/// A 2D position in uv units (fractions of the screen size)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(&self, other: &Position, t: f32) -> Position {
        Position {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Screen size used to convert uv units into pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn uv_to_px_x(&self, u: f32) -> f32 {
        u * self.width
    }

    pub fn uv_to_px_y(&self, v: f32) -> f32 {
        v * self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
