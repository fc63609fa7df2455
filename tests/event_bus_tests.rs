use hiring_sim::office::{
    CandidateId, EventBus, GameEvent, ListenerId, StageIndex, Topic,
};

#[test]
fn test_subscribe_twice_returns_same_subscription() {
    let mut bus = EventBus::new();
    let first = bus.subscribe(ListenerId(1), Topic::Accepted);
    let second = bus.subscribe(ListenerId(1), Topic::Accepted);

    assert_eq!(first, second);
    assert_eq!(bus.subscription_count(), 1);
    assert_eq!(bus.subscriber_count(Topic::Accepted), 1);

    bus.publish(GameEvent::Accepted);
    let delivery = bus.next_delivery().unwrap();
    assert_eq!(delivery.listeners, vec![ListenerId(1)]);
}

#[test]
fn test_delivery_goes_only_to_topic_subscribers() {
    let mut bus = EventBus::new();
    bus.subscribe(ListenerId(1), Topic::Accepted);
    bus.subscribe(ListenerId(2), Topic::Rejected);
    bus.subscribe(ListenerId(3), Topic::Accepted);

    bus.publish(GameEvent::Accepted);
    let delivery = bus.next_delivery().unwrap();
    assert_eq!(delivery.event, GameEvent::Accepted);
    assert_eq!(delivery.listeners, vec![ListenerId(1), ListenerId(3)]);

    bus.publish(GameEvent::StageIncomplete);
    assert!(bus.next_delivery().unwrap().listeners.is_empty());
}

#[test]
fn test_events_are_delivered_in_publish_order() {
    let mut bus = EventBus::new();
    bus.publish(GameEvent::SpotlightCandidate {
        candidate: CandidateId(3),
    });
    bus.publish(GameEvent::Rejected);
    bus.publish(GameEvent::InstructionAcked {
        stage: StageIndex::Medium,
    });
    assert_eq!(bus.pending(), 3);

    let topics: Vec<Topic> = std::iter::from_fn(|| bus.next_delivery())
        .map(|d| d.event.topic())
        .collect();
    assert_eq!(
        topics,
        vec![Topic::SpotlightCandidate, Topic::Rejected, Topic::InstructionAcked]
    );
    assert_eq!(bus.pending(), 0);
    assert!(bus.next_delivery().is_none());
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let mut bus = EventBus::new();
    let id = bus.subscribe(ListenerId(1), Topic::Rejected);
    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));
    assert!(!bus.is_subscribed(ListenerId(1), Topic::Rejected));

    bus.publish(GameEvent::Rejected);
    assert!(bus.next_delivery().unwrap().listeners.is_empty());
}

#[test]
fn test_unsubscribe_listener_drops_all_its_topics() {
    let mut bus = EventBus::new();
    bus.subscribe(ListenerId(1), Topic::Accepted);
    bus.subscribe(ListenerId(1), Topic::Rejected);
    bus.subscribe(ListenerId(1), Topic::TweenEnded);
    bus.subscribe(ListenerId(0), Topic::ManualStageComplete);

    assert_eq!(bus.unsubscribe_listener(ListenerId(1)), 3);
    assert_eq!(bus.subscription_count(), 1);
    assert!(bus.is_subscribed(ListenerId(0), Topic::ManualStageComplete));
    assert_eq!(bus.unsubscribe_listener(ListenerId(1)), 0);
}

#[test]
fn test_history_counts_published_events() {
    let mut bus = EventBus::recording();
    bus.publish(GameEvent::Accepted);
    bus.publish(GameEvent::Rejected);
    bus.publish(GameEvent::Accepted);
    while bus.next_delivery().is_some() {}

    assert_eq!(bus.history().len(), 3);
    assert_eq!(bus.count(Topic::Accepted), 2);
    assert_eq!(bus.count(Topic::Rejected), 1);
    assert_eq!(bus.count(Topic::DatasetViewNewCv), 0);
    assert_eq!(bus.published(), 3);
}

#[test]
fn test_default_bus_counts_without_keeping_events() {
    let mut bus = EventBus::new();
    for _ in 0..1_000 {
        bus.publish(GameEvent::Rejected);
        bus.next_delivery();
    }
    bus.publish(GameEvent::Accepted);

    assert!(bus.history().is_empty());
    assert_eq!(bus.count(Topic::Rejected), 1_000);
    assert_eq!(bus.count(Topic::Accepted), 1);
    assert_eq!(bus.published(), 1_001);
}
