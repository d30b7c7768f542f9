use super::*;

#[test]
fn startpos_has_twenty_moves() {
    let pos = Position::startpos();
    assert_eq!(pos.legal_moves().len(), 20);
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(
        pos.fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
    assert!(!pos.is_terminal());
    assert_eq!(pos.result(), GameResult::Undetermined);
}

#[test]
fn kiwipete_move_count() {
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    assert_eq!(pos.legal_moves().len(), 48);
}

#[test]
fn castling_uses_standard_notation() {
    let mut pos =
        Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let texts: Vec<String> = pos.legal_moves().iter().map(|m| m.to_string()).collect();
    assert!(texts.contains(&"e1g1".to_string()));
    assert!(texts.contains(&"e1c1".to_string()));
    assert!(!texts.contains(&"e1h1".to_string()));

    pos.play("e1g1".parse().unwrap()).unwrap();
    assert_eq!(pos.fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");

    pos.play("e8c8".parse().unwrap()).unwrap();
    assert_eq!(pos.fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 2");
}

#[test]
fn illegal_move_leaves_position_untouched() {
    let mut pos = Position::startpos();
    let before = pos.fen();
    let mv: Move = "e2e5".parse().unwrap();
    assert_eq!(pos.play(mv), Err(IllegalMoveError { mv }));
    assert_eq!(pos.fen(), before);
}

#[test]
fn checkmate_is_a_win_for_the_mating_side() {
    let mut pos = Position::startpos();
    for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        pos.play(text.parse().unwrap()).unwrap();
    }
    assert_eq!(pos.termination(), Some(Termination::Checkmate));
    assert_eq!(pos.result(), GameResult::BlackWin);
}

#[test]
fn promotion_moves_are_listed_per_piece() {
    let pos = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
    let promos: Vec<Move> = pos
        .legal_moves()
        .into_iter()
        .filter(|m| m.promotion.is_some())
        .collect();
    assert_eq!(promos.len(), 4);
    assert!(pos.is_legal("e7e8n".parse().unwrap()));
    assert!(!pos.is_legal("e7e8".parse().unwrap()));
}

#[test]
fn diagram_of_start_position() {
    let expected = "\
r n b q k b n r
p p p p p p p p
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
P P P P P P P P
R N B Q K B N R";
    assert_eq!(Position::startpos().to_string(), expected);
}

#[test]
fn bad_fen_is_an_error() {
    assert!(Position::from_fen("not a fen").is_err());
}
