//! Office stage lifecycle tests
//!
//! Drives the stage controller directly and through the game session to
//! check pools, hiring counters, stage completion and teardown.

use hiring_sim::office::{
    AutoPlayer, CandidateId, CandidateState, Decision, EventBus, Exit, Office,
    OfficeConfig, OfficeError, OfficeGame, RecordSource, StageConfig, StageIndex, StagePhase,
    Topic, TweenEnded, TweenId, TweenManager, TweenPurpose, OFFICE_TOPICS,
};

fn setup() -> (Office, EventBus, TweenManager) {
    let mut bus = EventBus::new();
    let mut office = Office::new(OfficeConfig::default(), RecordSource::generate(200, 42));
    office.listener_setup(&mut bus);
    (office, bus, TweenManager::new())
}

fn visible_ids(office: &Office) -> Vec<usize> {
    office.queue().visible().map(|c| c.id.0).collect()
}

fn head_of_line(game: &OfficeGame) -> CandidateId {
    game.office()
        .queue()
        .in_line()
        .first()
        .map(|c| c.id)
        .expect("line should not be empty")
}

fn hire_next(game: &mut OfficeGame) {
    let id = head_of_line(game);
    game.spotlight(id).unwrap();
    game.accept().unwrap();
}

#[test]
fn test_stage_pools_have_expected_sizes_and_contiguous_ids() {
    let (mut office, _bus, mut tweens) = setup();

    office.start(0, &mut tweens).unwrap();
    assert_eq!(visible_ids(&office), (0..7).collect::<Vec<_>>());
    assert_eq!(office.phase(), StagePhase::Running);

    office.start(1, &mut tweens).unwrap();
    assert_eq!(visible_ids(&office), (7..17).collect::<Vec<_>>());

    office.start(2, &mut tweens).unwrap();
    assert_eq!(visible_ids(&office), (17..32).collect::<Vec<_>>());
    assert_eq!(office.queue().next_index(), 32);
}

#[test]
fn test_replaying_intro_stage_keeps_numbering_and_history() {
    let (mut office, mut bus, mut tweens) = setup();
    office.start(0, &mut tweens).unwrap();
    office.spotlight(CandidateId(0), &mut tweens).unwrap();
    office.on_accept(&mut bus, &mut tweens).unwrap();
    assert_eq!(office.queue().next_index(), 8);

    office.start(0, &mut tweens).unwrap();
    assert_eq!(visible_ids(&office), (8..15).collect::<Vec<_>>());
    assert_eq!(office.taken_desks(), 0);
    assert_eq!(office.hired(), &[CandidateId(0)]);
    assert_eq!(office.decisions(), &[(CandidateId(0), Decision::Accepted)]);
}

#[test]
fn test_failed_start_leaves_the_running_stage_untouched() {
    let mut bus = EventBus::new();
    let mut office = Office::new(OfficeConfig::default(), RecordSource::generate(12, 1));
    office.listener_setup(&mut bus);
    let mut tweens = TweenManager::new();

    office.start(0, &mut tweens).unwrap();
    office.spotlight(CandidateId(0), &mut tweens).unwrap();
    office.on_reject(&mut tweens).unwrap();
    let visible_before = visible_ids(&office);
    let epoch_before = office.epoch();

    assert_eq!(
        office.start(1, &mut tweens),
        Err(OfficeError::RecordExhausted {
            index: 17,
            available: 12
        })
    );

    assert_eq!(office.current_stage(), StageIndex::Small);
    assert_eq!(office.phase(), StagePhase::Running);
    assert_eq!(visible_ids(&office), visible_before);
    assert_eq!(office.queue().next_index(), 8);
    assert_eq!(office.epoch(), epoch_before);
    assert_eq!(office.stage_config().hiring_goal, StageConfig::small().hiring_goal);
    assert!(office.task().is_some());
    assert_eq!(
        tweens.active_for(CandidateId(0)).map(|t| t.purpose),
        Some(TweenPurpose::Exit(Exit::Rejection))
    );
}

#[test]
fn test_session_stops_when_next_stage_cannot_be_filled() {
    let mut game = OfficeGame::new(OfficeConfig::default(), RecordSource::generate(12, 4));
    game.acknowledge_instructions().unwrap();
    for _ in 0..3 {
        hire_next(&mut game);
    }
    assert_eq!(game.office().phase(), StagePhase::Instructed);

    assert!(game.acknowledge_instructions().is_err());
    assert_eq!(game.office().phase(), StagePhase::Instructed);
    assert_eq!(game.office().current_stage(), StageIndex::Medium);
    assert_eq!(game.office().queue().next_index(), 10);
}

#[test]
fn test_invalid_stage_index_is_rejected() {
    let (mut office, _bus, mut tweens) = setup();
    assert_eq!(
        office.start(3, &mut tweens),
        Err(OfficeError::InvalidStageIndex(3))
    );
    assert_eq!(office.phase(), StagePhase::Idle);
}

#[test]
fn test_accept_hires_and_refills_the_slot() {
    let (mut office, mut bus, mut tweens) = setup();
    office.start(0, &mut tweens).unwrap();

    office.spotlight(CandidateId(0), &mut tweens).unwrap();
    let hired = office.on_accept(&mut bus, &mut tweens).unwrap();

    assert_eq!(hired, Some(CandidateId(0)));
    assert_eq!(office.taken_desks(), 1);
    assert_eq!(office.hired(), &[CandidateId(0)]);
    assert!(!office.tray().is_occupied());

    let leaving = office.queue().get(CandidateId(0)).unwrap();
    assert_eq!(leaving.state, CandidateState::Leaving(Exit::Entry));
    assert!(!leaving.in_spotlight);

    let replacement = office.queue().get(CandidateId(7)).unwrap();
    assert_eq!(replacement.state, CandidateState::InLine);
    assert!((replacement.line_x - leaving.line_x).abs() < 1e-6);

    assert_eq!(office.door(Exit::Entry).openings, 1);
    assert_eq!(
        tweens.active_for(CandidateId(0)).map(|t| t.purpose),
        Some(TweenPurpose::Exit(Exit::Entry))
    );
}

#[test]
fn test_reject_never_changes_taken_desks() {
    let (mut office, mut bus, mut tweens) = setup();
    office.start(0, &mut tweens).unwrap();

    office.spotlight(CandidateId(2), &mut tweens).unwrap();
    let rejected = office.on_reject(&mut tweens).unwrap();

    assert_eq!(rejected, Some(CandidateId(2)));
    assert_eq!(office.taken_desks(), 0);
    assert!(office.hired().is_empty());
    assert_eq!(
        office.queue().get(CandidateId(2)).unwrap().state,
        CandidateState::Leaving(Exit::Rejection)
    );
    assert_eq!(office.door(Exit::Rejection).openings, 1);
    assert_eq!(office.decisions(), &[(CandidateId(2), Decision::Rejected)]);
    assert_eq!(bus.pending(), 0);
}

#[test]
fn test_reject_with_empty_tray_is_a_no_op() {
    let (mut office, mut bus, mut tweens) = setup();
    office.start(0, &mut tweens).unwrap();

    assert_eq!(office.on_reject(&mut tweens), Ok(None));
    assert_eq!(office.on_accept(&mut bus, &mut tweens), Ok(None));

    assert_eq!(office.taken_desks(), 0);
    assert_eq!(office.queue().len(), 7);
    assert_eq!(bus.published(), 0);
    assert!(tweens.is_empty());
}

#[test]
fn test_second_spotlight_is_refused_while_tray_is_occupied() {
    let (mut office, _bus, mut tweens) = setup();
    office.start(0, &mut tweens).unwrap();

    office.spotlight(CandidateId(0), &mut tweens).unwrap();
    assert_eq!(
        office.spotlight(CandidateId(1), &mut tweens),
        Err(OfficeError::TrayAlreadyOccupied {
            occupant: CandidateId(0)
        })
    );
    assert_eq!(office.tray().occupant(), Some(CandidateId(0)));
    assert_eq!(
        office.queue().get(CandidateId(1)).unwrap().state,
        CandidateState::InLine
    );
}

#[test]
fn test_spotlight_validates_the_candidate() {
    let (mut office, mut bus, mut tweens) = setup();
    office.start(0, &mut tweens).unwrap();

    assert_eq!(
        office.spotlight(CandidateId(999), &mut tweens),
        Err(OfficeError::UnknownCandidate(CandidateId(999)))
    );

    office.spotlight(CandidateId(0), &mut tweens).unwrap();
    office.on_accept(&mut bus, &mut tweens).unwrap();
    assert_eq!(
        office.spotlight(CandidateId(0), &mut tweens),
        Err(OfficeError::CandidateNotInLine(CandidateId(0)))
    );
}

#[test]
fn test_return_candidate_frees_the_tray_without_using_a_slot() {
    let (mut office, _bus, mut tweens) = setup();
    office.start(0, &mut tweens).unwrap();

    office.spotlight(CandidateId(3), &mut tweens).unwrap();
    assert!(office.queue().get(CandidateId(3)).unwrap().in_spotlight);

    assert_eq!(office.on_return_candidate(&mut tweens), Some(CandidateId(3)));
    let person = office.queue().get(CandidateId(3)).unwrap();
    assert!(!person.in_spotlight);
    assert_eq!(person.state, CandidateState::InLine);
    assert!(!office.tray().is_occupied());
    assert_eq!(office.queue().len(), 7);
    assert_eq!(
        tweens.active_for(CandidateId(3)).map(|t| t.purpose),
        Some(TweenPurpose::ReturnToLine)
    );

    // Nothing left to return
    assert_eq!(office.on_return_candidate(&mut tweens), None);
}

#[test]
fn test_three_hires_complete_the_intro_stage_once() {
    let mut game = OfficeGame::new_with_seed(3);
    assert_eq!(game.office().phase(), StagePhase::Instructed);
    assert!(game.office().instructions().unwrap().tutorial);

    game.acknowledge_instructions().unwrap();
    assert_eq!(game.office().phase(), StagePhase::Running);

    for _ in 0..3 {
        hire_next(&mut game);
    }

    assert_eq!(game.bus.count(Topic::ManualStageComplete), 1);
    assert_eq!(game.completed_stages(), &[StageIndex::Small]);
    assert_eq!(game.office().current_stage(), StageIndex::Medium);
    assert_eq!(game.office().phase(), StagePhase::Instructed);

    // Decisions after completion are ignored
    game.accept().unwrap();
    assert_eq!(game.bus.count(Topic::ManualStageComplete), 1);

    // Each hire placed a replacement, so numbering continues from 10
    assert_eq!(game.office().queue().next_index(), 10);
    game.acknowledge_instructions().unwrap();
    assert_eq!(visible_ids(game.office()), (10..20).collect::<Vec<_>>());
    assert_eq!(game.office().taken_desks(), 0);
    assert_eq!(game.office().hired().len(), 3);
}

#[test]
fn test_taken_desks_only_grow_on_accepts() {
    let mut game = OfficeGame::new_with_seed(5);
    game.acknowledge_instructions().unwrap();

    let mut previous = 0;
    for accept in [false, true, false, false, true] {
        let id = head_of_line(&game);
        game.spotlight(id).unwrap();
        if accept {
            game.accept().unwrap();
            assert_eq!(game.office().taken_desks(), previous + 1);
        } else {
            game.reject().unwrap();
            assert_eq!(game.office().taken_desks(), previous);
        }
        assert!(game.office().taken_desks() >= previous);
        previous = game.office().taken_desks();
    }
    assert_eq!(game.bus.count(Topic::ManualStageComplete), 0);
}

#[test]
fn test_exit_animation_removes_candidate_from_display() {
    let mut game = OfficeGame::new_with_seed(9);
    game.acknowledge_instructions().unwrap();
    let id = head_of_line(&game);
    game.spotlight(id).unwrap();
    game.reject().unwrap();

    game.settle(100, 5_000).unwrap();

    let person = game.office().queue().get(id).unwrap();
    assert_eq!(person.state, CandidateState::Gone);
    assert!(!game.office().queue().visible().any(|c| c.id == id));
    // Slot stays in the arena
    assert_eq!(game.office().queue().len(), 8);
    assert_eq!(game.bus.count(Topic::TweenEnded), 1);
}

#[test]
fn test_stale_tween_completion_is_ignored_after_restart() {
    let (mut office, mut bus, mut tweens) = setup();
    office.start(0, &mut tweens).unwrap();
    office.spotlight(CandidateId(0), &mut tweens).unwrap();
    office.on_accept(&mut bus, &mut tweens).unwrap();

    let stale = TweenEnded {
        tween: TweenId(0),
        candidate: CandidateId(0),
        purpose: TweenPurpose::Exit(Exit::Entry),
        epoch: office.epoch(),
    };

    office.start(0, &mut tweens).unwrap();
    assert!(tweens.is_empty());

    office.on_tween_ended(&stale);
    // A handled exit would close the entry door again
    assert_eq!(office.door(Exit::Entry).playing, None);
    assert_eq!(
        office.queue().get(CandidateId(0)).unwrap().state,
        CandidateState::Gone
    );
}

#[test]
fn test_timer_expiry_prompts_a_clean_retry() {
    let mut game = OfficeGame::new_with_seed(21);
    game.acknowledge_instructions().unwrap();
    for _ in 0..3 {
        hire_next(&mut game);
    }
    game.acknowledge_instructions().unwrap();
    assert_eq!(game.office().current_stage(), StageIndex::Medium);

    hire_next(&mut game);
    assert_eq!(game.office().taken_desks(), 1);

    for _ in 0..300 {
        game.tick(100).unwrap();
    }
    assert_eq!(game.bus.count(Topic::StageIncomplete), 1);
    assert_eq!(game.office().phase(), StagePhase::RetryPrompted);

    let prompt = game.office().retry_prompt().unwrap();
    assert_eq!(prompt.stage, StageIndex::Medium);
    assert_eq!(prompt.message, StageConfig::medium().retry_message);

    // The stopped timer does not fire again
    for _ in 0..50 {
        game.tick(100).unwrap();
    }
    assert_eq!(game.bus.count(Topic::StageIncomplete), 1);

    let next_index = game.office().queue().next_index();
    game.acknowledge_retry().unwrap();
    assert_eq!(game.office().phase(), StagePhase::Running);
    assert_eq!(game.office().taken_desks(), 0);
    assert_eq!(
        visible_ids(game.office()),
        (next_index..next_index + 10).collect::<Vec<_>>()
    );
    assert!(game.office().retry_prompt().is_none());
}

#[test]
fn test_intro_stage_has_no_timer() {
    let mut game = OfficeGame::new_with_seed(1);
    game.acknowledge_instructions().unwrap();
    assert!(!game.office().task().unwrap().shows_timer());

    for _ in 0..1_000 {
        game.tick(100).unwrap();
    }
    assert_eq!(game.bus.count(Topic::StageIncomplete), 0);
    assert_eq!(game.office().phase(), StagePhase::Running);
}

#[test]
fn test_display_record_opens_the_matching_cv() {
    let records = RecordSource::generate(50, 8);
    let mut game = OfficeGame::new(OfficeConfig::default(), records.clone());
    game.acknowledge_instructions().unwrap();

    game.view_cv(CandidateId(4)).unwrap();
    let view = game.office().resume().unwrap();
    assert_eq!(view.candidate, CandidateId(4));
    assert_eq!(&view.record, records.get(4).unwrap());
    assert_eq!(view.features, records.features());
    assert_eq!(game.office().candidate_clicked(), Some(CandidateId(4)));

    // Unknown candidates are ignored by the session rather than aborting it
    game.view_cv(CandidateId(400)).unwrap();
    assert_eq!(game.office().candidate_clicked(), Some(CandidateId(4)));
}

#[test]
fn test_listeners_are_registered_once_and_removed_on_delete() {
    let (mut office, mut bus, mut tweens) = setup();
    office.listener_setup(&mut bus);
    assert_eq!(bus.subscription_count(), OFFICE_TOPICS.len());
    for topic in OFFICE_TOPICS {
        assert_eq!(bus.subscriber_count(topic), 1);
    }

    office.start(0, &mut tweens).unwrap();
    office.delete(&mut bus, &mut tweens);

    assert_eq!(bus.subscription_count(), 0);
    assert_eq!(office.queue().visible().count(), 0);
    assert_eq!(office.phase(), StagePhase::Idle);
}

#[test]
fn test_session_shutdown_leaves_no_subscriptions() {
    let mut game = OfficeGame::new_with_seed(2);
    assert_eq!(game.bus.subscription_count(), OFFICE_TOPICS.len() + 1);
    game.shutdown();
    assert_eq!(game.bus.subscription_count(), 0);
}

#[test]
fn test_tray_never_holds_more_than_one_candidate() {
    let mut game = OfficeGame::new_with_seed(13);
    game.acknowledge_instructions().unwrap();

    for step in 0..40 {
        let id = head_of_line(&game);
        game.spotlight(id).unwrap();
        // A second request while occupied is refused and logged
        let other = game.office().queue().in_line().first().map(|c| c.id);
        if let Some(other) = other {
            game.spotlight(other).unwrap();
        }
        assert_eq!(game.office().tray().occupant(), Some(id));

        match step % 3 {
            0 => game.reject().unwrap(),
            1 => game.return_candidate().unwrap(),
            _ => game.reject().unwrap(),
        }
        assert!(!game.office().tray().is_occupied());
        game.tick(100).unwrap();
    }
}

#[test]
fn test_autoplayer_finishes_every_stage() {
    let mut game = OfficeGame::new_with_seed(11);
    let ticks = AutoPlayer::default().play(&mut game, 100, 20_000).unwrap();

    assert!(game.is_finished(), "stopped after {} ticks", ticks);
    assert_eq!(
        game.completed_stages(),
        &[StageIndex::Small, StageIndex::Medium, StageIndex::Large]
    );
    assert_eq!(game.bus.count(Topic::ManualStageComplete), 3);
    assert_eq!(game.hiring_history().len(), game.office().decisions().len());
    assert_eq!(game.office().phase(), StagePhase::Completed);
}
