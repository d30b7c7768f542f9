use super::*;

#[test]
fn bestmove_lines() {
    assert_eq!(parse_bestmove("bestmove e2e4"), Some(Some("e2e4".to_string())));
    assert_eq!(
        parse_bestmove("bestmove e7e8q ponder a2a1"),
        Some(Some("e7e8q".to_string()))
    );
    assert_eq!(parse_bestmove("bestmove (none)"), Some(None));
    assert_eq!(parse_bestmove("bestmove 0000"), Some(None));
    assert_eq!(parse_bestmove("info depth 1"), None);
    assert_eq!(parse_bestmove(""), None);
}

#[test]
fn info_scores() {
    assert_eq!(
        parse_score("info depth 20 seldepth 28 multipv 1 score cp 31 nodes 123 pv e2e4"),
        Some(Score::Centipawns(31))
    );
    assert_eq!(
        parse_score("info depth 12 score mate -3 pv h7h8"),
        Some(Score::Mate(-3))
    );
    assert_eq!(
        parse_score("info depth 9 score cp -15 upperbound nodes 10"),
        Some(Score::Centipawns(-15))
    );
    assert_eq!(parse_score("info string NNUE enabled"), None);
    assert_eq!(parse_score("bestmove e2e4"), None);
}

#[test]
fn engine_name() {
    assert_eq!(parse_id_name("id name Stockfish 16.1"), Some("Stockfish 16.1"));
    assert_eq!(parse_id_name("id author the authors"), None);
}
