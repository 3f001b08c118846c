use line98_engine::cells::Color;
use line98_engine::engine::Engine;
use line98_engine::errors::CodecError;
use line98_engine::game::{GameStatus, Session, SessionRecord, SpawnQueue};
use line98_engine::grid::{Board, TOTAL_CELLS};

#[test]
fn session_round_trips_through_json() {
    let mut engine = Engine::new(Some(31));
    let session = engine.create_session("user-9");

    let json = serde_json::to_string(&session).expect("serialize");
    let restored: Session = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, session);
}

#[test]
fn session_json_uses_persisted_field_names() {
    let mut engine = Engine::new(Some(31));
    let session = engine.create_session("user-9");
    let value = serde_json::to_value(&session).expect("serialize");

    assert_eq!(value["owner_id"], "user-9");
    assert_eq!(value["status"], "IN_PROGRESS");
    assert_eq!(value["score"], 0);
    let board = value["board"].as_str().expect("board string");
    assert_eq!(board.len(), TOTAL_CELLS);
    assert_eq!(board.chars().filter(|c| *c != '-').count(), 5);
    assert_eq!(value["next_balls"].as_str().map(str::len), Some(3));
}

#[test]
fn stored_record_decodes_into_a_session() {
    let board = format!("RRRR{}", "-".repeat(TOTAL_CELLS - 4));
    let json = format!(
        r#"{{"owner_id":"u1","board":"{board}","next_balls":"CMY","score":40,"status":"IN_PROGRESS"}}"#
    );
    let session: Session = serde_json::from_str(&json).expect("decode");

    assert_eq!(session.owner_id().as_str(), "u1");
    assert_eq!(session.score(), 40);
    assert_eq!(session.status(), GameStatus::InProgress);
    assert_eq!(session.board().color_at(3), Some(Color::Red));
    assert_eq!(
        session.spawn_queue(),
        &SpawnQueue::new([Color::Cyan, Color::Magenta, Color::Yellow])
    );

    let record = SessionRecord::from(session);
    assert_eq!(record.board.to_string(), board);
}

#[test]
fn malformed_board_strings_are_rejected() {
    assert_eq!(
        "RGB".parse::<Board>(),
        Err(CodecError::Length {
            expected: TOTAL_CELLS,
            actual: 3
        })
    );
    let bad = format!("{}x{}", "-".repeat(10), "-".repeat(70));
    assert_eq!(
        bad.parse::<Board>(),
        Err(CodecError::InvalidSymbol {
            index: 10,
            symbol: 'x'
        })
    );
    // lowercase letters are not part of the palette
    let lower = format!("r{}", "-".repeat(80));
    assert!(lower.parse::<Board>().is_err());
}

#[test]
fn malformed_json_board_is_a_decode_error() {
    let json = r#"{"owner_id":"u1","board":"RGB","next_balls":"CMY","score":0,"status":"IN_PROGRESS"}"#;
    let err = serde_json::from_str::<Session>(json).unwrap_err();
    assert!(err.to_string().contains("Expected 81 symbols"));
}
