//! Full matches between player threads.

use proptest::prelude::*;
use std::io::Write;
use std::sync::Arc;
use turnstile::{
    ConsoleRenderer, GameRecord, GameSession, Mark, Match, MatchConfig, MoveObserver, Outcome,
    Player, RandomGuess, Sequential, StrategyKind,
};
use turnstile_tictactoe::{InvariantSet, TicTacToeInvariants};

fn quick(config: MatchConfig) -> MatchConfig {
    config.with_move_delay_ms(0)
}

fn assert_finished_consistently(report: &turnstile::MatchReport) {
    assert!(report.outcome().is_terminal());
    let replayed = GameRecord::replay(report.history()[0].mark, report.history())
        .expect("history replays");
    assert_eq!(replayed.outcome(), *report.outcome());
    assert_eq!(replayed.board(), report.board());
    assert_eq!(TicTacToeInvariants::check_all(&replayed), Ok(()));

    let accepted: usize = report.players().iter().map(|p| *p.accepted()).sum();
    assert_eq!(accepted, report.history().len());
}

#[test]
fn test_default_match_finishes() {
    let report = Match::from_config(&quick(MatchConfig::default().with_seed(11)), None)
        .run()
        .expect("match runs");
    assert_finished_consistently(&report);
    assert_eq!(*report.players()[0].mark(), Mark::X);
    assert_eq!(*report.players()[0].strategy(), StrategyKind::Sequential);
    assert_eq!(*report.players()[1].strategy(), StrategyKind::Random);
}

#[test]
fn test_random_against_random_finishes() {
    let config = quick(MatchConfig::default())
        .with_strategy(Mark::X, StrategyKind::Random)
        .with_seed(1234);
    let report = Match::from_config(&config, None).run().expect("match runs");
    assert_finished_consistently(&report);
}

#[test]
fn test_o_first_match() {
    let config = quick(MatchConfig::default())
        .with_first(Mark::O)
        .with_strategy(Mark::O, StrategyKind::Sequential);
    let report = Match::from_config(&config, None).run().expect("match runs");

    // Both sequential, O first: O takes the anti-diagonal on move seven.
    assert_eq!(*report.outcome(), Outcome::Won(Mark::O));
    assert_eq!(report.history()[0].mark, Mark::O);
    assert_eq!(report.history().len(), 7);
}

#[test]
fn test_hand_built_match() {
    let session = Arc::new(GameSession::new());
    let x = Player::new(Arc::clone(&session), Mark::X, Box::new(RandomGuess::seeded(3)))
        .with_move_delay(std::time::Duration::ZERO);
    let o = Player::new(Arc::clone(&session), Mark::O, Box::new(Sequential))
        .with_move_delay(std::time::Duration::ZERO);
    let game = Match::new(Arc::clone(&session), x, o);
    assert!(!game.session().is_over());

    let report = game.run().expect("match runs");
    assert_finished_consistently(&report);
    assert_eq!(session.outcome(), *report.outcome());
}

#[test]
fn test_renderer_sees_every_move_in_order() {
    let renderer = Arc::new(ConsoleRenderer::new(Vec::new()));
    let observer: Box<dyn MoveObserver> = Box::new(Arc::clone(&renderer));
    let config = quick(MatchConfig::default().with_seed(8));
    let report = Match::from_config(&config, Some(observer)).run().expect("match runs");

    let renderer = Arc::try_unwrap(renderer).expect("session dropped with match");
    let text = String::from_utf8(renderer.into_inner()).expect("utf8 output");
    let mut cursor = 0;
    for mv in report.history() {
        let line = mv.to_string();
        let found = text[cursor..].find(&line).expect("move rendered");
        cursor += found + line.len();
    }
    assert_eq!(text.matches("---+---+---").count(), 2 * report.history().len());
}

#[test]
fn test_config_file_drives_match() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
first = "X"
move_delay_ms = 0

[player_x]
strategy = "sequential"

[player_o]
strategy = "sequential"
"#
    )
    .expect("write config");

    let config = MatchConfig::from_file(file.path()).expect("config loads");
    let report = Match::from_config(&config, None).run().expect("match runs");
    assert_eq!(*report.outcome(), Outcome::Won(Mark::X));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = MatchConfig::from_file(dir.path().join("absent.toml")).expect_err("missing file");
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_report_serializes_to_json() {
    let report = Match::from_config(&quick(MatchConfig::default().with_seed(2)), None)
        .run()
        .expect("match runs");
    let json = serde_json::to_value(&report).expect("serializes");
    assert!(json.get("outcome").is_some());
    assert_eq!(
        json["history"].as_array().map(Vec::len),
        Some(report.history().len())
    );
    assert_eq!(json["players"][0]["strategy"], "sequential");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn seeded_random_matches_always_terminate(seed in any::<u64>(), x_random in any::<bool>()) {
        let mut config = quick(MatchConfig::default()).with_seed(seed);
        if x_random {
            config = config.with_strategy(Mark::X, StrategyKind::Random);
        }
        let report = Match::from_config(&config, None).run().expect("match runs");
        let replayed = GameRecord::replay(Mark::X, report.history()).expect("history replays");
        prop_assert_eq!(replayed.outcome(), *report.outcome());
        prop_assert!(report.outcome().is_terminal());
        prop_assert_eq!(TicTacToeInvariants::check_all(&replayed), Ok(()));
    }
}
