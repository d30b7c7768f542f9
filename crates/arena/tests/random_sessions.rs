//! Count invariants over seeded random sessions

use llm_arena::{GameConfig, Session, SessionConfig, DEFAULT_RATING};
use random_engine::{RandomEngine, RandomModel};

fn session() -> Session {
    Session::new(SessionConfig {
        game: GameConfig {
            eval_time: None,
            ..Default::default()
        },
        ..Default::default()
    })
}

#[test]
fn counts_add_up() {
    for seed in 0..4 {
        let mut engine = RandomEngine::seeded(seed);
        let mut model = RandomModel::seeded(seed + 100).with_error_rate(0.05);
        let report = session().run(&mut engine, &mut model, 6);
        let s = &report.stats;

        assert_eq!(s.games_played, 6);
        assert_eq!(s.wins + s.losses + s.draws + s.aborted, s.games_played);
        assert_eq!(s.aborted, 0, "random engine never fails mid-game");
        assert_eq!(s.histogram_total(), s.invalid_moves);
        assert_eq!(s.malformed + s.illegal, s.invalid_moves);
        assert!(s.invalid_moves <= s.losses);
        assert_eq!(
            s.rating,
            DEFAULT_RATING + 50 * s.wins as i32 - 50 * s.losses as i32
        );
        assert_eq!(report.games.len(), 6);
    }
}

#[test]
fn legal_only_model_never_forfeits() {
    let mut engine = RandomEngine::seeded(11);
    let mut model = RandomModel::seeded(12);
    let report = session().run(&mut engine, &mut model, 3);

    assert_eq!(report.stats.invalid_moves, 0);
    assert!(report.stats.histogram.is_empty());
    for game in &report.games {
        assert!(game.failing_move_number.is_none());
        assert!(!game.moves.is_empty());
    }
}

#[test]
fn same_seeds_same_session() {
    let play = || {
        let mut engine = RandomEngine::seeded(5);
        let mut model = RandomModel::seeded(6).with_error_rate(0.02);
        session().run(&mut engine, &mut model, 3)
    };
    let a = play();
    let b = play();
    assert_eq!(a.stats, b.stats);
    assert_eq!(a.games, b.games);
}
