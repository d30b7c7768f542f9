use super::*;

#[test]
fn empty_file_gives_defaults() {
    let config = ArenaConfig::from_toml_str("").unwrap();
    assert_eq!(config, ArenaConfig::default());
    assert_eq!(config.games, 1);
    assert_eq!(config.engine.path, "stockfish");
    assert_eq!(config.model.name, "gpt-4o");
    assert_eq!(config.model.max_tokens, 100);
    assert_eq!(config.model.temperature, 0.0);
    assert_eq!(config.move_time(), Duration::from_secs(2));
    assert_eq!(config.eval_time(), Some(Duration::from_millis(500)));
    assert_eq!(config.rating_rule(), RatingRule::default());
}

#[test]
fn full_file() {
    let config = ArenaConfig::from_toml_str(
        r#"
        games = 20

        [engine]
        path = "/usr/games/stockfish"
        move_time_secs = 0.25
        eval_time_secs = 0.0
        timeout_margin_ms = 500
        options = { Threads = "2", Hash = "64" }

        [model]
        name = "gpt-4o-mini"
        base_url = "http://localhost:8080/v1"
        api_key_env = "LOCAL_KEY"
        temperature = 0.7
        max_tokens = 8
        timeout_secs = 5
        prompt_template = "FEN: {fen}. Move?"
        notation = "human"

        [rating]
        initial = 1200
        win_increment = 25
        loss_decrement = 10
        "#,
    )
    .unwrap();

    assert_eq!(config.games, 20);
    assert_eq!(config.eval_time(), None);
    assert_eq!(config.engine.options.get("Hash").map(String::as_str), Some("64"));

    let session = config.session_config();
    assert_eq!(session.game.move_time, Duration::from_millis(250));
    assert_eq!(session.game.eval_time, None);
    assert_eq!(session.game.prompt_template, "FEN: {fen}. Move?");
    assert_eq!(session.game.black_notation, Notation::Human);
    assert_eq!(session.initial_rating, 1200);
    assert_eq!(session.rating.win_increment, 25);
    assert_eq!(session.rating.loss_decrement, 10);

    let uci = config.uci_config();
    assert_eq!(uci.path, PathBuf::from("/usr/games/stockfish"));
    assert_eq!(uci.timeout_margin, Duration::from_millis(500));
    assert_eq!(uci.options.len(), 2);

    let chat = config.chat_config();
    assert_eq!(chat.model, "gpt-4o-mini");
    assert_eq!(chat.base_url, "http://localhost:8080/v1");
    assert_eq!(chat.max_tokens, 8);
    assert_eq!(chat.timeout, Duration::from_secs(5));
    assert!(chat.api_key.is_empty());
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(matches!(
        ArenaConfig::from_toml_str("gmaes = 3"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        ArenaConfig::from_toml_str("[engine]\nmovetime = 1.0"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn bad_values_are_rejected() {
    for (text, key) in [
        ("[engine]\nmove_time_secs = 0.0", "engine.move_time_secs"),
        ("[engine]\nmove_time_secs = -1.0", "engine.move_time_secs"),
        ("[engine]\neval_time_secs = -0.5", "engine.eval_time_secs"),
        ("[engine]\nmove_time_secs = 1e30", "engine.move_time_secs"),
        ("[engine]\nmove_time_secs = nan", "engine.move_time_secs"),
        ("[engine]\nmove_time_secs = inf", "engine.move_time_secs"),
        ("[engine]\neval_time_secs = 1e30", "engine.eval_time_secs"),
        ("[engine]\npath = \"\"", "engine.path"),
        ("[model]\nmax_tokens = 0", "model.max_tokens"),
        ("[model]\ntemperature = 3.5", "model.temperature"),
        ("[model]\nprompt_template = \" \"", "model.prompt_template"),
    ] {
        match ArenaConfig::from_toml_str(text) {
            Err(ConfigError::Invalid { key: got, .. }) => assert_eq!(got, key, "{text}"),
            other => panic!("{text}: expected invalid {key}, got {other:?}"),
        }
    }
}

#[test]
fn longest_budget_is_accepted() {
    let config = ArenaConfig::from_toml_str("[engine]\nmove_time_secs = 3600.0").unwrap();
    assert_eq!(config.move_time(), Duration::from_secs(3600));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ArenaConfig::load(Path::new("/nonexistent/arena.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
