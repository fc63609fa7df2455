//! Office layout and per-stage configuration
//!
//! Defaults reproduce the shipped game. A JSON file can override any stage or
//! the layout as a whole.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use super::types::{Exit, Position, StageIndex};

/// Candidates in line for each stage
pub const SMALL_STAGE_POOL: usize = 7;
pub const MEDIUM_STAGE_POOL: usize = 10;
pub const LARGE_STAGE_POOL: usize = 15;

/// Exit walks end this far past the door anchor
pub const DOOR_WALK_OVERSHOOT: f32 = 0.04;
/// Duration of horizontal walks in milliseconds
pub const WALK_TIME_MS: u32 = 1200;
/// Vertical anchor of the first floor
pub const FIRST_FLOOR_Y: f32 = 0.87;

/// Where things live on screen, in uv units
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OfficeLayout {
    pub entry_door_x: f32,
    pub exit_door_x: f32,
    pub person_start_x: f32,
    pub person_start_y: f32,
    /// Horizontal gap between two people in line
    pub x_offset: f32,
    pub spotlight_x: f32,
    pub spotlight_y: f32,
}

impl Default for OfficeLayout {
    fn default() -> Self {
        Self {
            entry_door_x: 0.1,
            exit_door_x: 0.6,
            person_start_x: 0.22,
            person_start_y: FIRST_FLOOR_Y,
            x_offset: 0.05,
            spotlight_x: 0.4,
            spotlight_y: FIRST_FLOOR_Y - 0.13,
        }
    }
}

impl OfficeLayout {
    pub fn spotlight(&self) -> Position {
        Position::new(self.spotlight_x, self.spotlight_y)
    }

    /// Line slot `order` places from the head of the line
    pub fn line_x(&self, order: usize) -> f32 {
        self.person_start_x + self.x_offset * order as f32
    }

    /// Where a candidate leaving through `exit` stops walking
    pub fn walk_target(&self, exit: Exit) -> f32 {
        match exit {
            Exit::Entry => self.entry_door_x + DOOR_WALK_OVERSHOOT,
            Exit::Rejection => self.exit_door_x + DOOR_WALK_OVERSHOOT,
        }
    }
}

/// Immutable descriptor of one stage
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StageConfig {
    /// Acceptances required to complete the stage
    pub hiring_goal: u32,
    /// Time budget; `None` means no timer
    #[serde(default)]
    pub duration_secs: Option<u32>,
    pub pool_size: usize,
    pub task_description: String,
    #[serde(default)]
    pub instructions: String,
    pub retry_message: String,
    #[serde(default)]
    pub retry_responses: Vec<String>,
}

impl StageConfig {
    pub fn small() -> Self {
        Self {
            hiring_goal: 3,
            duration_secs: None,
            pool_size: SMALL_STAGE_POOL,
            task_description: "Hire 3 people for your new startup".to_string(),
            instructions: "Click a person to see their CV. Drag them into the spotlight, \
                           then accept or reject them."
                .to_string(),
            retry_message: "You ran out of time. Give it another go?".to_string(),
            retry_responses: vec!["Try again".to_string()],
        }
    }

    pub fn medium() -> Self {
        Self {
            hiring_goal: 5,
            duration_secs: Some(30),
            pool_size: MEDIUM_STAGE_POOL,
            task_description: "Business is growing! Hire 5 more people in 30 seconds".to_string(),
            instructions: "Your office is growing. You have a time limit now.".to_string(),
            retry_message: "Hiring takes time. You didn't fill all the desks, try again."
                .to_string(),
            retry_responses: vec!["Retry".to_string()],
        }
    }

    pub fn large() -> Self {
        Self {
            hiring_goal: 10,
            duration_secs: Some(45),
            pool_size: LARGE_STAGE_POOL,
            task_description: "You're a big company now. Hire 10 people in 45 seconds"
                .to_string(),
            instructions: "Too many applicants to read every CV. Move fast!".to_string(),
            retry_message: "Too slow! Maybe there is a faster way to hire...".to_string(),
            retry_responses: vec!["Retry".to_string()],
        }
    }
}

/// Full office configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OfficeConfig {
    #[serde(default)]
    pub layout: OfficeLayout,
    #[serde(default = "StageConfig::small")]
    pub small: StageConfig,
    #[serde(default = "StageConfig::medium")]
    pub medium: StageConfig,
    #[serde(default = "StageConfig::large")]
    pub large: StageConfig,
}

impl Default for OfficeConfig {
    fn default() -> Self {
        Self {
            layout: OfficeLayout::default(),
            small: StageConfig::small(),
            medium: StageConfig::medium(),
            large: StageConfig::large(),
        }
    }
}

impl OfficeConfig {
    pub fn stage(&self, stage: StageIndex) -> &StageConfig {
        match stage {
            StageIndex::Small => &self.small,
            StageIndex::Medium => &self.medium,
            StageIndex::Large => &self.large,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: OfficeConfig =
            serde_json::from_str(json).context("Office config is not valid JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read office config from {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Reject layouts that stack the line and stages that could never start
    /// or never finish
    pub fn validate(&self) -> Result<()> {
        let offset = self.layout.x_offset;
        if !offset.is_finite() || offset <= 0.0 {
            anyhow::bail!("Line offset must be positive, got {}", offset);
        }
        for stage in StageIndex::ALL {
            let config = self.stage(stage);
            if config.pool_size == 0 {
                anyhow::bail!("Stage {} has an empty candidate pool", stage);
            }
            if config.hiring_goal == 0 {
                anyhow::bail!("Stage {} has a hiring goal of zero", stage);
            }
            if config.duration_secs == Some(0) {
                anyhow::bail!("Stage {} has a zero second timer", stage);
            }
        }
        Ok(())
    }
}
