//! Full runs through the public API

use rhythm_fps::driver::FixedStepDriver;
use rhythm_fps::sim::{
    PowerUpKind, PromotionReason, RoundPhase, Session, SessionEvent, SessionState, format_clock,
};
use rhythm_fps::{Difficulty, HighScores, Rank, SessionError, rank};

#[test]
fn test_menu_to_game_over_to_menu() {
    let mut session = Session::new();
    let snap = session.snapshot();
    assert_eq!(snap.state, SessionState::Idle);
    assert_eq!(snap.health, 100);

    session.start(3, "hard".parse().unwrap()).unwrap();
    assert_eq!(session.snapshot().level.name(), "Synth Storm");

    for _ in 0..20 {
        session.apply_hit(100).unwrap();
    }
    session.tick(1.0).unwrap();
    session.apply_damage(40).unwrap();
    session.apply_damage(40).unwrap();
    assert_eq!(session.state(), SessionState::Playing);
    session.apply_damage(40).unwrap();
    assert_eq!(session.state(), SessionState::GameOver);

    let summary = session.summary().cloned().unwrap();
    // 9 x 100, then 10 x 150 (hits 10-19), then 200 at the 2.0x step
    assert_eq!(summary.score, 900 + 10 * 150 + 200);
    assert_eq!(summary.rank, Rank::Sharpshooter);
    assert_eq!(summary.difficulty, Difficulty::Hard);
    assert_eq!(summary.enemies_killed, 20);

    let events = session.drain_events();
    assert!(matches!(events.last(), Some(SessionEvent::GameOver { .. })));

    let mut scores = HighScores::new();
    assert_eq!(scores.add_summary(&summary, 0.0), Some(1));

    session.restart().unwrap();
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.drain_events().is_empty());
}

#[test]
fn test_rank_contract() {
    assert_eq!(rank(999), Rank::Rookie);
    assert_eq!(rank(1000), Rank::Sharpshooter);
    assert_eq!(rank(4999), Rank::Expert);
    assert_eq!(rank(10000), Rank::Legend);
}

#[test]
fn test_round_progression_to_boss_and_beyond() {
    let mut session = Session::new();
    session.start(1, Difficulty::Normal).unwrap();

    for _ in 0..4 {
        session.tick(60.0).unwrap();
        assert_eq!(session.snapshot().round_phase, RoundPhase::Transition);
        session.tick(2.0).unwrap();
    }
    assert_eq!(session.snapshot().round_phase, RoundPhase::Boss);
    assert_eq!(session.snapshot().current_round, 5);

    // Boss round times out on its own
    session.tick(90.0).unwrap();
    let events = session.drain_events();
    assert!(events.contains(&SessionEvent::RoundAdvanced {
        round: 6,
        reason: PromotionReason::BossTimedOut
    }));
    assert!(events.contains(&SessionEvent::PhaseSettled {
        round: 5,
        phase: RoundPhase::Boss
    }));
}

#[test]
fn test_power_up_window_through_driver() {
    let mut session = Session::new();
    session.start(1, Difficulty::Easy).unwrap();
    let mut driver = FixedStepDriver::with_step(0.25, 8, 1.0);

    session.collect_power_up(PowerUpKind::RapidFire).unwrap();
    session.collect_power_up(PowerUpKind::Shield).unwrap();

    // 10 seconds of frames
    for _ in 0..10 {
        driver.advance(&mut session, 1.0);
    }
    let names: Vec<_> = session
        .snapshot()
        .active_power_ups
        .iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Rapid Fire"]);
    assert_eq!(format_clock(session.survival_time()), "0:10");

    let expired: Vec<_> = session
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            SessionEvent::PowerUpExpired { kind } => Some(kind),
            _ => None,
        })
        .collect();
    assert_eq!(expired, vec![PowerUpKind::Shield]);
}

#[test]
fn test_invalid_transitions_leave_session_unchanged() {
    let mut session = Session::new();
    let idle = session.snapshot();

    assert!(session.tick(1.0).is_err());
    assert!(session.apply_hit(10).is_err());
    assert!(session.apply_damage(10).is_err());
    assert!(session.collect_power_up(PowerUpKind::Speed).is_err());
    assert!(session.pause().is_err());
    assert!(session.resume().is_err());
    assert!(session.notify_boss_defeated().is_err());
    assert_eq!(session.snapshot(), idle);

    assert_eq!(
        "ultra".parse::<Difficulty>(),
        Err(SessionError::UnknownDifficulty("ultra".into()))
    );
}
