//! Office stage controller
//!
//! Owns the current stage's configuration, candidate line, spotlight and
//! progress counters, and reacts to the player's decisions.

use log::{debug, info, warn};

use super::candidate::CandidateState;
use super::config::{OfficeConfig, StageConfig, WALK_TIME_MS};
use super::door::{Door, DoorDirection};
use super::error::OfficeError;
use super::events::{EventBus, GameEvent, ListenerId, SubscriptionId, Topic};
use super::queue::CandidateQueue;
use super::records::{CandidateRecord, RecordSource};
use super::task::TaskTimer;
use super::tray::EvaluationTray;
use super::tween::{Easing, TweenEnded, TweenManager, TweenPurpose};
use super::types::{CandidateId, Decision, Exit, Position, StageIndex};

/// Listener id the office subscribes under
pub const OFFICE_LISTENER: ListenerId = ListenerId(1);

/// Topics the office reacts to
pub const OFFICE_TOPICS: [Topic; 9] = [
    Topic::Accepted,
    Topic::Rejected,
    Topic::ReturnCandidate,
    Topic::InstructionAcked,
    Topic::RetryInstructionAcked,
    Topic::StageIncomplete,
    Topic::DisplayThisCv,
    Topic::SpotlightCandidate,
    Topic::TweenEnded,
];

/// Walks into and out of the spotlight are quicker than door walks
const SPOTLIGHT_WALK_MS: u32 = WALK_TIME_MS / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagePhase {
    Idle,
    Instructed,
    Running,
    Completed,
    RetryPrompted,
}

/// Instructions shown before a stage starts
#[derive(Debug, Clone, PartialEq)]
pub struct Instructions {
    pub stage: StageIndex,
    pub content: String,
    /// The intro stage explains the controls
    pub tutorial: bool,
}

/// Shown when a timed stage runs out
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPrompt {
    pub stage: StageIndex,
    pub message: String,
    pub responses: Vec<String>,
}

/// The CV of a clicked candidate
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeView {
    pub candidate: CandidateId,
    pub record: CandidateRecord,
    pub features: Vec<String>,
}

pub struct Office {
    config: OfficeConfig,
    records: RecordSource,
    current_stage: StageIndex,
    phase: StagePhase,
    taken_desks: u32,
    queue: CandidateQueue,
    tray: EvaluationTray,
    hired: Vec<CandidateId>,
    decisions: Vec<(CandidateId, Decision)>,
    doors: [Door; 2],
    task: Option<TaskTimer>,
    /// Bumped on every teardown so stale tween completions can be told apart
    epoch: u64,
    subscriptions: Vec<SubscriptionId>,
    instructions: Option<Instructions>,
    retry_prompt: Option<RetryPrompt>,
    resume: Option<ResumeView>,
    candidate_clicked: Option<CandidateId>,
    finished: bool,
}

impl Office {
    pub fn new(config: OfficeConfig, records: RecordSource) -> Self {
        let doors = [
            Door::new(Exit::Entry, config.layout.entry_door_x),
            Door::new(Exit::Rejection, config.layout.exit_door_x),
        ];
        Self {
            config,
            records,
            current_stage: StageIndex::Small,
            phase: StagePhase::Idle,
            taken_desks: 0,
            queue: CandidateQueue::new(),
            tray: EvaluationTray::new(),
            hired: Vec::new(),
            decisions: Vec::new(),
            doors,
            task: None,
            epoch: 0,
            subscriptions: Vec::new(),
            instructions: None,
            retry_prompt: None,
            resume: None,
            candidate_clicked: None,
            finished: false,
        }
    }

    /// Subscribe the office to every topic it handles
    pub fn listener_setup(&mut self, bus: &mut EventBus) {
        self.subscriptions = OFFICE_TOPICS
            .iter()
            .map(|topic| bus.subscribe(OFFICE_LISTENER, *topic))
            .collect();
    }

    /// Show the instructions for `stage` and wait for acknowledgment
    pub fn reveal_instructions(&mut self, stage: StageIndex) {
        let config = self.config.stage(stage);
        self.current_stage = stage;
        self.phase = StagePhase::Instructed;
        self.instructions = Some(Instructions {
            stage,
            content: config.instructions.clone(),
            tutorial: stage == StageIndex::Small,
        });
    }

    /// Start (or restart) the stage with the given index
    pub fn start(&mut self, stage_num: usize, tweens: &mut TweenManager) -> Result<(), OfficeError> {
        let stage = StageIndex::try_from(stage_num)?;
        self.start_stage(stage, tweens)
    }

    pub fn start_stage(
        &mut self,
        stage: StageIndex,
        tweens: &mut TweenManager,
    ) -> Result<(), OfficeError> {
        // Nothing is torn down unless the new line can be filled
        self.queue
            .ensure_records(self.config.stage(stage).pool_size, &self.records)?;
        self.teardown_stage(tweens);
        self.draw(stage)?;
        info!(
            "Started {} with {} candidates, hiring goal {}",
            stage,
            self.queue.visible().count(),
            self.stage_config().hiring_goal
        );
        Ok(())
    }

    fn teardown_stage(&mut self, tweens: &mut TweenManager) {
        self.task = None;
        tweens.clear();
        self.epoch += 1;
        self.tray.clear();
        self.doors.iter_mut().for_each(Door::reset);
        self.instructions = None;
        self.retry_prompt = None;
        self.resume = None;
        self.candidate_clicked = None;
    }

    /// Replace the visible line with a fresh pool for `stage`
    ///
    /// Identities keep counting across stages and replays, so a replayed
    /// stage shows new CVs and earlier decisions stay in the history.
    fn draw(&mut self, stage: StageIndex) -> Result<(), OfficeError> {
        let config = self.config.stage(stage);
        self.queue.hide_all();
        let start = self.queue.next_index();
        self.queue
            .add_people(start, config.pool_size, &self.config.layout, &self.records)?;

        self.taken_desks = 0;
        self.current_stage = stage;
        self.finished = false;
        self.task = Some(TaskTimer::new(
            config.hiring_goal,
            config.duration_secs,
            &config.task_description,
        ));
        self.phase = StagePhase::Running;
        Ok(())
    }

    /// React to one delivered event
    pub fn handle(
        &mut self,
        event: &GameEvent,
        bus: &mut EventBus,
        tweens: &mut TweenManager,
    ) -> Result<(), OfficeError> {
        match event {
            GameEvent::Accepted => {
                self.on_accept(bus, tweens)?;
            }
            GameEvent::Rejected => {
                self.on_reject(tweens)?;
            }
            GameEvent::ReturnCandidate => {
                self.on_return_candidate(tweens);
            }
            GameEvent::InstructionAcked { stage } | GameEvent::RetryInstructionAcked { stage } => {
                self.start_stage(*stage, tweens)?;
            }
            GameEvent::StageIncomplete => self.on_stage_incomplete(),
            GameEvent::DisplayThisCv { candidate } => {
                self.display_record(*candidate)?;
            }
            GameEvent::SpotlightCandidate { candidate } => {
                self.spotlight(*candidate, tweens)?;
            }
            GameEvent::TweenEnded(ended) => self.on_tween_ended(ended),
            other => debug!("Office ignores {:?}", other.topic()),
        }
        Ok(())
    }

    /// Move a waiting candidate into the spotlight
    pub fn spotlight(
        &mut self,
        id: CandidateId,
        tweens: &mut TweenManager,
    ) -> Result<(), OfficeError> {
        if self.phase != StagePhase::Running {
            warn!("Ignoring spotlight request while the stage is {:?}", self.phase);
            return Ok(());
        }
        let person = self.queue.get(id).ok_or(OfficeError::UnknownCandidate(id))?;
        if person.state != CandidateState::InLine {
            return Err(OfficeError::CandidateNotInLine(id));
        }
        self.tray.occupy(id)?;

        let from = person.position;
        let to = self.config.layout.spotlight();
        if let Some(person) = self.queue.get_mut(id) {
            person.state = CandidateState::InSpotlight;
            person.in_spotlight = true;
        }
        tweens.create(
            id,
            from,
            to,
            SPOTLIGHT_WALK_MS,
            0,
            Easing::InOutSine,
            TweenPurpose::ToSpotlight,
            self.epoch,
        );
        debug!("Candidate {} stepped into the spotlight", id);
        Ok(())
    }

    /// Hire the candidate in the spotlight
    ///
    /// Returns the hired candidate, or `None` when there was nobody to hire.
    pub fn on_accept(
        &mut self,
        bus: &mut EventBus,
        tweens: &mut TweenManager,
    ) -> Result<Option<CandidateId>, OfficeError> {
        let Some(hired) = self.dismiss(Exit::Entry, tweens)? else {
            return Ok(None);
        };

        self.taken_desks += 1;
        self.hired.push(hired);
        self.decisions.push((hired, Decision::Accepted));
        info!(
            "Hired candidate {} ({}/{})",
            hired,
            self.taken_desks,
            self.stage_config().hiring_goal
        );

        if self.taken_desks == self.stage_config().hiring_goal {
            bus.publish(GameEvent::ManualStageComplete {
                stage_number: self.current_stage,
            });
            if let Some(task) = self.task.as_mut() {
                task.reset();
            }
            self.complete_stage();
        }
        Ok(Some(hired))
    }

    /// Turn down the candidate in the spotlight
    pub fn on_reject(
        &mut self,
        tweens: &mut TweenManager,
    ) -> Result<Option<CandidateId>, OfficeError> {
        let rejected = self.dismiss(Exit::Rejection, tweens)?;
        if let Some(id) = rejected {
            self.decisions.push((id, Decision::Rejected));
            info!("Rejected candidate {}", id);
        }
        Ok(rejected)
    }

    /// Send the spotlit candidate out through `exit` and refill their slot
    fn dismiss(
        &mut self,
        exit: Exit,
        tweens: &mut TweenManager,
    ) -> Result<Option<CandidateId>, OfficeError> {
        if self.phase != StagePhase::Running {
            warn!("Ignoring decision while the stage is {:?}", self.phase);
            return Ok(None);
        }
        let Some(id) = self.tray.occupant() else {
            debug!("No candidate in the spotlight, nothing to decide");
            return Ok(None);
        };
        let person = self.queue.get(id).ok_or(OfficeError::UnknownCandidate(id))?;
        let slot_x = person.line_x;
        let from = person.position;

        // Placed first so a missing record leaves the spotlight untouched
        self.queue
            .place_candidate(slot_x, self.config.layout.person_start_y, &self.records)?;

        self.tray.take();
        if let Some(person) = self.queue.get_mut(id) {
            person.in_spotlight = false;
            person.state = CandidateState::Leaving(exit);
        }
        tweens.create(
            id,
            from,
            Position::new(self.config.layout.walk_target(exit), from.y),
            WALK_TIME_MS,
            0,
            Easing::InOutSine,
            TweenPurpose::Exit(exit),
            self.epoch,
        );
        self.door_mut(exit).play_animation(DoorDirection::Forward);
        Ok(Some(id))
    }

    /// Walk the spotlit candidate back to their place in line
    pub fn on_return_candidate(&mut self, tweens: &mut TweenManager) -> Option<CandidateId> {
        let id = self.tray.take()?;
        let person = self.queue.get_mut(id)?;
        person.in_spotlight = false;
        person.state = CandidateState::InLine;
        let (from, home) = (person.position, person.home());
        tweens.create(
            id,
            from,
            home,
            SPOTLIGHT_WALK_MS,
            0,
            Easing::InOutSine,
            TweenPurpose::ReturnToLine,
            self.epoch,
        );
        debug!("Candidate {} returned to the line", id);
        Some(id)
    }

    /// The stage timer ran out before the goal was reached
    pub fn on_stage_incomplete(&mut self) {
        if self.phase != StagePhase::Running {
            debug!("Stage incomplete while {:?}, ignoring", self.phase);
            return;
        }
        if let Some(task) = self.task.as_mut() {
            task.reset();
        }
        let config = self.config.stage(self.current_stage);
        self.retry_prompt = Some(RetryPrompt {
            stage: self.current_stage,
            message: config.retry_message.clone(),
            responses: config.retry_responses.clone(),
        });
        self.phase = StagePhase::RetryPrompted;
        info!(
            "{} incomplete with {}/{} hires, waiting for retry",
            self.current_stage, self.taken_desks, config.hiring_goal
        );
    }

    /// Open the CV of a clicked candidate
    pub fn display_record(&mut self, id: CandidateId) -> Result<ResumeView, OfficeError> {
        if self.queue.get(id).is_none() {
            return Err(OfficeError::UnknownCandidate(id));
        }
        let record = self.records.get(id.0)?.clone();
        let view = ResumeView {
            candidate: id,
            record,
            features: self.records.features().to_vec(),
        };
        self.candidate_clicked = Some(id);
        self.resume = Some(view.clone());
        Ok(view)
    }

    /// Apply the end of an animation
    pub fn on_tween_ended(&mut self, ended: &TweenEnded) {
        if ended.epoch != self.epoch {
            warn!(
                "Dropping stale tween completion for candidate {} (epoch {} != {})",
                ended.candidate, ended.epoch, self.epoch
            );
            return;
        }
        let Some(person) = self.queue.get_mut(ended.candidate) else {
            warn!("Tween ended for unknown candidate {}", ended.candidate);
            return;
        };

        match ended.purpose {
            TweenPurpose::Exit(exit) => {
                person.state = CandidateState::Gone;
                self.door_mut(exit).play_animation(DoorDirection::Reverse);
            }
            TweenPurpose::ReturnToLine => {
                person.position = person.home();
            }
            TweenPurpose::ToSpotlight => {}
        }
    }

    /// Copy animated positions onto candidates of the current stage
    pub fn apply_positions(&mut self, positions: &[(CandidateId, Position, u64)]) {
        for (id, position, epoch) in positions {
            if *epoch != self.epoch {
                continue;
            }
            if let Some(person) = self.queue.get_mut(*id) {
                if person.is_visible() {
                    person.position = *position;
                }
            }
        }
    }

    /// Advance door animations and the stage timer
    pub fn tick(&mut self, delta_ms: u64, bus: &mut EventBus) {
        for door in self.doors.iter_mut() {
            door.step(delta_ms);
        }
        let expired = self
            .task
            .as_mut()
            .map(|task| task.tick(delta_ms))
            .unwrap_or(false);
        if expired && self.phase == StagePhase::Running {
            bus.publish(GameEvent::StageIncomplete);
        }
    }

    fn complete_stage(&mut self) {
        self.phase = StagePhase::Completed;
        info!("Completed {}", self.current_stage);
        match self.current_stage.next() {
            Some(next) => self.reveal_instructions(next),
            None => {
                self.finished = true;
                info!("All office stages complete");
            }
        }
    }

    /// Unsubscribe from the bus and take everything off screen
    pub fn delete(&mut self, bus: &mut EventBus, tweens: &mut TweenManager) {
        for id in self.subscriptions.drain(..) {
            bus.unsubscribe(id);
        }
        bus.unsubscribe_listener(OFFICE_LISTENER);
        self.teardown_stage(tweens);
        self.queue.hide_all();
        self.phase = StagePhase::Idle;
    }

    fn door_mut(&mut self, exit: Exit) -> &mut Door {
        match exit {
            Exit::Entry => &mut self.doors[0],
            Exit::Rejection => &mut self.doors[1],
        }
    }

    pub fn door(&self, exit: Exit) -> &Door {
        match exit {
            Exit::Entry => &self.doors[0],
            Exit::Rejection => &self.doors[1],
        }
    }

    pub fn stage_config(&self) -> &StageConfig {
        self.config.stage(self.current_stage)
    }

    pub fn config(&self) -> &OfficeConfig {
        &self.config
    }

    pub fn records(&self) -> &RecordSource {
        &self.records
    }

    pub fn current_stage(&self) -> StageIndex {
        self.current_stage
    }

    pub fn phase(&self) -> StagePhase {
        self.phase
    }

    pub fn taken_desks(&self) -> u32 {
        self.taken_desks
    }

    pub fn queue(&self) -> &CandidateQueue {
        &self.queue
    }

    pub fn tray(&self) -> &EvaluationTray {
        &self.tray
    }

    pub fn hired(&self) -> &[CandidateId] {
        &self.hired
    }

    /// Every decision taken since the intro stage, in order
    pub fn decisions(&self) -> &[(CandidateId, Decision)] {
        &self.decisions
    }

    pub fn task(&self) -> Option<&TaskTimer> {
        self.task.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn instructions(&self) -> Option<&Instructions> {
        self.instructions.as_ref()
    }

    pub fn retry_prompt(&self) -> Option<&RetryPrompt> {
        self.retry_prompt.as_ref()
    }

    pub fn resume(&self) -> Option<&ResumeView> {
        self.resume.as_ref()
    }

    pub fn candidate_clicked(&self) -> Option<CandidateId> {
        self.candidate_clicked
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
