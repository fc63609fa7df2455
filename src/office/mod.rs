//! Standalone office hiring game
//!
//! This module contains all the stage, queue and spotlight logic of the
//! office minigame. It runs independently of the Bevy game engine, so it can
//! be played and tested from the console.

mod autoplay;
mod candidate;
mod config;
mod door;
mod error;
mod events;
mod game;
mod queue;
mod records;
mod stage;
mod task;
mod tray;
mod tween;
mod types;

pub use autoplay::AutoPlayer;
pub use candidate::{Candidate, CandidateState};
pub use config::{
    OfficeConfig, OfficeLayout, StageConfig, DOOR_WALK_OVERSHOOT, FIRST_FLOOR_Y,
    LARGE_STAGE_POOL, MEDIUM_STAGE_POOL, SMALL_STAGE_POOL, WALK_TIME_MS,
};
pub use door::{Door, DoorDirection, DOOR_FRAMES, DOOR_FRAME_MS};
pub use error::OfficeError;
pub use events::{Delivery, EventBus, GameEvent, ListenerId, SubscriptionId, Topic};
pub use game::{OfficeGame, DEFAULT_RECORD_COUNT, SESSION_LISTENER};
pub use queue::CandidateQueue;
pub use records::{CandidateRecord, RecordSource, DEFAULT_FEATURES, MAX_FEATURE_SCORE};
pub use stage::{
    Instructions, Office, ResumeView, RetryPrompt, StagePhase, OFFICE_LISTENER, OFFICE_TOPICS,
};
pub use task::TaskTimer;
pub use tray::EvaluationTray;
pub use tween::{Easing, Tween, TweenEnded, TweenFrame, TweenId, TweenManager, TweenPurpose};
pub use types::{CandidateId, Decision, Exit, PersonColor, Position, StageIndex, Viewport};
