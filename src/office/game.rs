//! Office game session that ties everything together
//!
//! Owns the event bus, the office and the tween manager, and routes events
//! between them. This is the entry point for playing the office minigame
//! without any Bevy dependencies.

use anyhow::{Context, Result};
use log::{debug, info, warn};

use super::config::OfficeConfig;
use super::events::{EventBus, GameEvent, ListenerId, Topic};
use super::records::RecordSource;
use super::stage::{Office, StagePhase, OFFICE_LISTENER};
use super::tween::TweenManager;
use super::types::{CandidateId, Decision, StageIndex};

/// Listener id of the session itself
pub const SESSION_LISTENER: ListenerId = ListenerId(0);

/// Records generated when no record file is given
pub const DEFAULT_RECORD_COUNT: usize = 500;

pub struct OfficeGame {
    pub bus: EventBus,
    office: Office,
    tweens: TweenManager,
    completed_stages: Vec<StageIndex>,
    /// Game time in milliseconds
    pub time_ms: u64,
}

impl OfficeGame {
    pub fn new(config: OfficeConfig, records: RecordSource) -> Self {
        let mut bus = EventBus::new();
        let mut office = Office::new(config, records);
        office.listener_setup(&mut bus);
        bus.subscribe(SESSION_LISTENER, Topic::ManualStageComplete);
        office.reveal_instructions(StageIndex::Small);

        Self {
            bus,
            office,
            tweens: TweenManager::new(),
            completed_stages: Vec::new(),
            time_ms: 0,
        }
    }

    /// Default configuration with generated records
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new(
            OfficeConfig::default(),
            RecordSource::generate(DEFAULT_RECORD_COUNT, seed),
        )
    }

    /// Deliver queued events until the bus is empty; returns how many were handled
    pub fn dispatch(&mut self) -> Result<usize> {
        let mut handled = 0;
        while let Some(delivery) = self.bus.next_delivery() {
            handled += 1;
            for listener in &delivery.listeners {
                match *listener {
                    OFFICE_LISTENER => {
                        if let Err(e) =
                            self.office
                                .handle(&delivery.event, &mut self.bus, &mut self.tweens)
                        {
                            if e.is_recoverable() {
                                warn!("Ignored {:?}: {}", delivery.event.topic(), e);
                            } else {
                                return Err(e).with_context(|| {
                                    format!("Office failed to handle {:?}", delivery.event.topic())
                                });
                            }
                        }
                    }
                    SESSION_LISTENER => self.on_session_event(&delivery.event),
                    other => debug!("No handler for listener {:?}", other),
                }
            }
        }
        Ok(handled)
    }

    fn on_session_event(&mut self, event: &GameEvent) {
        if let GameEvent::ManualStageComplete { stage_number } = event {
            info!("Stage complete: {}", stage_number);
            self.completed_stages.push(*stage_number);
        }
    }

    /// Advance animations and timers by `delta_ms`, then dispatch
    pub fn tick(&mut self, delta_ms: u64) -> Result<()> {
        self.time_ms += delta_ms;

        let frame = self
            .tweens
            .tick(u32::try_from(delta_ms).unwrap_or(u32::MAX));
        self.office.apply_positions(&frame.positions);
        for ended in frame.ended {
            self.bus.publish(GameEvent::TweenEnded(ended));
        }
        self.office.tick(delta_ms, &mut self.bus);

        self.dispatch()?;
        Ok(())
    }

    /// Publish one event and run it to completion
    pub fn send(&mut self, event: GameEvent) -> Result<()> {
        self.bus.publish(event);
        self.dispatch()?;
        Ok(())
    }

    pub fn acknowledge_instructions(&mut self) -> Result<()> {
        let stage = self.office.current_stage();
        self.send(GameEvent::InstructionAcked { stage })
    }

    pub fn acknowledge_retry(&mut self) -> Result<()> {
        let stage = self.office.current_stage();
        self.send(GameEvent::RetryInstructionAcked { stage })
    }

    pub fn view_cv(&mut self, candidate: CandidateId) -> Result<()> {
        self.send(GameEvent::DisplayThisCv { candidate })
    }

    pub fn spotlight(&mut self, candidate: CandidateId) -> Result<()> {
        self.send(GameEvent::SpotlightCandidate { candidate })
    }

    pub fn accept(&mut self) -> Result<()> {
        self.send(GameEvent::Accepted)
    }

    pub fn reject(&mut self) -> Result<()> {
        self.send(GameEvent::Rejected)
    }

    pub fn return_candidate(&mut self) -> Result<()> {
        self.send(GameEvent::ReturnCandidate)
    }

    /// Tick until no animation is running (or `max_ms` has passed)
    pub fn settle(&mut self, step_ms: u64, max_ms: u64) -> Result<()> {
        let mut waited = 0;
        while !self.tweens.is_empty() && waited < max_ms {
            self.tick(step_ms)?;
            waited += step_ms;
        }
        Ok(())
    }

    /// Unsubscribe everything and clear the office
    pub fn shutdown(&mut self) {
        self.office.delete(&mut self.bus, &mut self.tweens);
        self.bus.unsubscribe_listener(SESSION_LISTENER);
    }

    pub fn office(&self) -> &Office {
        &self.office
    }

    pub fn tweens(&self) -> &TweenManager {
        &self.tweens
    }

    pub fn completed_stages(&self) -> &[StageIndex] {
        &self.completed_stages
    }

    pub fn is_finished(&self) -> bool {
        self.office.is_finished()
    }

    /// Hiring decisions so far as (record index, decision) pairs
    pub fn hiring_history(&self) -> Vec<(usize, Decision)> {
        self.office
            .decisions()
            .iter()
            .map(|(id, decision)| (id.0, *decision))
            .collect()
    }

    /// Get a summary string for display
    pub fn summary(&self) -> String {
        let office = &self.office;
        let goal = office.stage_config().hiring_goal;
        let timer = office
            .task()
            .and_then(|task| task.remaining_ms())
            .map(|ms| format!("{:.1}s left", ms as f32 / 1000.0))
            .unwrap_or_else(|| "no timer".to_string());
        let phase = match office.phase() {
            StagePhase::Idle => "idle",
            StagePhase::Instructed => "reading instructions",
            StagePhase::Running => "hiring",
            StagePhase::Completed => "completed",
            StagePhase::RetryPrompted => "retry prompt",
        };
        format!(
            "{} | {} | Hired: {}/{} | In line: {} | Total hired: {} | {} | Time: {:.1}s",
            office.current_stage(),
            phase,
            office.taken_desks(),
            goal,
            office.queue().in_line().len(),
            office.hired().len(),
            timer,
            self.time_ms as f32 / 1000.0
        )
    }
}
