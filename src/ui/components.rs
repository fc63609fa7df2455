//! UI components and resources for linking Bevy entities to game state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::office::{CandidateId, Exit, OfficeGame, Position};

/// Window size the uv layout is mapped onto
pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

/// Seed used when the app starts without an inserted game
const DEFAULT_SEED: u64 = 7;

/// Resource wrapper for the office game
#[derive(Resource)]
pub struct OfficeGameResource(pub OfficeGame);

impl Default for OfficeGameResource {
    fn default() -> Self {
        Self(OfficeGame::new_with_seed(DEFAULT_SEED))
    }
}

/// Links a Bevy entity to a candidate
#[derive(Component)]
pub struct CandidateLink(pub CandidateId);

/// Links a Bevy entity to one of the office doors
#[derive(Component)]
pub struct DoorLink(pub Exit);

/// Resource to track Bevy entities mapped to candidates
#[derive(Resource, Default)]
pub struct CandidateMappings {
    pub candidates: HashMap<CandidateId, Entity>,
}

/// Marker for heads-up display text elements
#[derive(Component)]
pub enum HudText {
    /// Stage name and phase
    Stage,
    /// Hires against the goal, plus the timer
    Progress,
    /// Instructions or retry prompt
    Prompt,
    /// CV of the last clicked candidate
    Resume,
}

/// Convert a uv position (origin top-left, y down) to world space
pub fn uv_to_world(position: Position, z: f32) -> Vec3 {
    Vec3::new(
        (position.x - 0.5) * SCREEN_WIDTH,
        (0.5 - position.y) * SCREEN_HEIGHT,
        z,
    )
}
