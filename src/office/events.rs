//! Typed publish/subscribe channel shared by the game's widgets
//!
//! Events are queued in publish order and delivered one at a time: every
//! listener reacts to an event before the next one is popped, and anything a
//! listener publishes while reacting lands behind what is already queued.

use log::debug;
use std::collections::{BTreeMap, VecDeque};

use super::records::CandidateRecord;
use super::tween::TweenEnded;
use super::types::{CandidateId, Decision, StageIndex};

/// Event topic names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    Accepted,
    Rejected,
    ReturnCandidate,
    InstructionAcked,
    RetryInstructionAcked,
    StageIncomplete,
    DisplayThisCv,
    SpotlightCandidate,
    TweenEnded,
    ManualStageComplete,
    DatasetViewNewCv,
}

/// An event together with its payload
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The player hired the candidate in the spotlight
    Accepted,
    /// The player turned down the candidate in the spotlight
    Rejected,
    /// The candidate in the spotlight goes back to the line
    ReturnCandidate,
    InstructionAcked { stage: StageIndex },
    RetryInstructionAcked { stage: StageIndex },
    /// The stage timer ran out before the hiring goal was met
    StageIncomplete,
    /// The player clicked a candidate to read their CV
    DisplayThisCv { candidate: CandidateId },
    /// The player dragged a candidate into the spotlight
    SpotlightCandidate { candidate: CandidateId },
    TweenEnded(TweenEnded),
    ManualStageComplete { stage_number: StageIndex },
    DatasetViewNewCv {
        status: Decision,
        data: CandidateRecord,
    },
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::Accepted => Topic::Accepted,
            GameEvent::Rejected => Topic::Rejected,
            GameEvent::ReturnCandidate => Topic::ReturnCandidate,
            GameEvent::InstructionAcked { .. } => Topic::InstructionAcked,
            GameEvent::RetryInstructionAcked { .. } => Topic::RetryInstructionAcked,
            GameEvent::StageIncomplete => Topic::StageIncomplete,
            GameEvent::DisplayThisCv { .. } => Topic::DisplayThisCv,
            GameEvent::SpotlightCandidate { .. } => Topic::SpotlightCandidate,
            GameEvent::TweenEnded(_) => Topic::TweenEnded,
            GameEvent::ManualStageComplete { .. } => Topic::ManualStageComplete,
            GameEvent::DatasetViewNewCv { .. } => Topic::DatasetViewNewCv,
        }
    }
}

/// Identifies a party that reacts to events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub usize);

/// Handle returned by `subscribe`, needed to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub usize);

/// One event ready to be handled, with the listeners it goes to
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub event: GameEvent,
    pub listeners: Vec<ListenerId>,
}

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    subscriptions: BTreeMap<SubscriptionId, (ListenerId, Topic)>,
    next_subscription: usize,
    queue: VecDeque<GameEvent>,
    counts: BTreeMap<Topic, usize>,
    /// Only kept by buses built with `recording`
    history: Option<Vec<GameEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus that also keeps every published event
    pub fn recording() -> Self {
        Self {
            history: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Register `listener` for `topic`
    ///
    /// Subscribing the same pair twice returns the existing subscription, so a
    /// listener never receives an event more than once.
    pub fn subscribe(&mut self, listener: ListenerId, topic: Topic) -> SubscriptionId {
        if let Some((id, _)) = self
            .subscriptions
            .iter()
            .find(|(_, entry)| **entry == (listener, topic))
        {
            return *id;
        }

        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.insert(id, (listener, topic));
        debug!("{:?} subscribed to {:?} as {:?}", listener, topic, id);
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    /// Drop every subscription held by `listener`; returns how many were removed
    pub fn unsubscribe_listener(&mut self, listener: ListenerId) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|_, (owner, _)| *owner != listener);
        before - self.subscriptions.len()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscriptions
            .values()
            .filter(|(_, t)| *t == topic)
            .count()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_subscribed(&self, listener: ListenerId, topic: Topic) -> bool {
        self.subscriptions
            .values()
            .any(|entry| *entry == (listener, topic))
    }

    /// Queue an event for delivery
    pub fn publish(&mut self, event: GameEvent) {
        debug!("Published {:?}", event.topic());
        *self.counts.entry(event.topic()).or_insert(0) += 1;
        if let Some(history) = self.history.as_mut() {
            history.push(event.clone());
        }
        self.queue.push_back(event);
    }

    /// Pop the oldest queued event along with its current subscribers
    pub fn next_delivery(&mut self) -> Option<Delivery> {
        let event = self.queue.pop_front()?;
        let topic = event.topic();
        let listeners = self
            .subscriptions
            .values()
            .filter(|(_, t)| *t == topic)
            .map(|(listener, _)| *listener)
            .collect();
        Some(Delivery { event, listeners })
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Every event published so far, in order; empty unless `recording`
    pub fn history(&self) -> &[GameEvent] {
        self.history.as_deref().unwrap_or(&[])
    }

    /// Number of published events on `topic`
    pub fn count(&self, topic: Topic) -> usize {
        self.counts.get(&topic).copied().unwrap_or(0)
    }

    /// Number of published events on any topic
    pub fn published(&self) -> usize {
        self.counts.values().sum()
    }
}
