//! Transaction descriptor tests: builders must match the deployed
//! contract's function names and argument encodings.

use xox_engine::tx::{self, RematchError, TxArg, CONTRACT_NAME};
use xox_engine::{GameEngine, Principal, TIMEOUT_BLOCKS};

#[test]
fn test_create_game_descriptor() {
    let desc = tx::create_game(100, 0, 1);
    assert_eq!(desc.contract(), CONTRACT_NAME);
    assert_eq!(desc.function(), "create-game");
    assert_eq!(
        desc.args(),
        &vec![TxArg::Uint(100), TxArg::Uint(0), TxArg::Uint(1)]
    );
}

#[test]
fn test_join_game_descriptor() {
    let desc = tx::join_game(7, 4, 2);
    assert_eq!(desc.function(), "join-game");
    assert_eq!(
        desc.args(),
        &vec![TxArg::Uint(7), TxArg::Uint(4), TxArg::Uint(2)]
    );
}

#[test]
fn test_play_descriptor() {
    let desc = tx::play(3, 8, 1);
    assert_eq!(desc.function(), "play");
    assert_eq!(
        desc.args(),
        &vec![TxArg::Uint(3), TxArg::Uint(8), TxArg::Uint(1)]
    );
}

#[test]
fn test_claim_timeout_descriptor() {
    let desc = tx::claim_timeout(5);
    assert_eq!(desc.function(), "claim-timeout");
    assert_eq!(desc.args(), &vec![TxArg::Uint(5)]);
}

#[test]
fn test_descriptor_serialization_round_trip() {
    let desc = tx::create_game(250, 4, 1);
    let json = serde_json::to_string(&desc).expect("serializes");
    let back = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(desc, back);
}

fn settled_engine() -> (GameEngine, Principal, Principal) {
    let mut engine = GameEngine::new(Principal::new("xox-contract"));
    let alice = Principal::new("alice");
    let bob = Principal::new("bob");
    engine.fund(&alice, 1_000);
    engine.fund(&bob, 1_000);
    (engine, alice, bob)
}

#[test]
fn test_rematch_of_settled_game() {
    let (mut engine, alice, bob) = settled_engine();
    let id = engine.create_game(&alice, 100, 0, 1).unwrap();
    engine.join_game(&bob, id, 3, 2).unwrap();
    engine.play(&alice, id, 1, 1).unwrap();
    engine.play(&bob, id, 4, 2).unwrap();
    engine.play(&alice, id, 2, 1).unwrap();

    // Bob opens the rematch with the same stake, roles swapped.
    let desc = tx::rematch(engine.get_game(id).unwrap(), 4, 1).expect("rematch allowed");
    assert_eq!(desc.function(), "create-game");
    assert_eq!(
        desc.args(),
        &vec![TxArg::Uint(100), TxArg::Uint(4), TxArg::Uint(1)]
    );
}

#[test]
fn test_rematch_of_unfinished_game_rejected() {
    let (mut engine, alice, bob) = settled_engine();
    let id = engine.create_game(&alice, 100, 0, 1).unwrap();
    engine.join_game(&bob, id, 3, 2).unwrap();

    let err = tx::rematch(engine.get_game(id).unwrap(), 4, 1).unwrap_err();
    assert_eq!(err, RematchError::Unsettled);
}

#[test]
fn test_rematch_of_timeout_win_allowed() {
    let (mut engine, alice, bob) = settled_engine();
    let id = engine.create_game(&alice, 100, 0, 1).unwrap();
    engine.join_game(&bob, id, 1, 2).unwrap();
    engine.play(&alice, id, 2, 1).unwrap();
    engine.advance_blocks(TIMEOUT_BLOCKS);
    engine.claim_timeout(&bob, id).unwrap();

    assert!(tx::rematch(engine.get_game(id).unwrap(), 0, 1).is_ok());
}

#[test]
fn test_rematch_of_draw_rejected() {
    let (mut engine, alice, bob) = settled_engine();
    let id = engine.create_game(&alice, 100, 0, 1).unwrap();
    engine.join_game(&bob, id, 4, 2).unwrap();
    engine.play(&alice, id, 2, 1).unwrap();
    engine.play(&bob, id, 1, 2).unwrap();
    engine.play(&alice, id, 3, 1).unwrap();
    engine.play(&bob, id, 5, 2).unwrap();
    engine.play(&alice, id, 7, 1).unwrap();
    engine.play(&bob, id, 6, 2).unwrap();
    engine.play(&alice, id, 8, 1).unwrap();

    // Drawn games carry no winner to rematch against.
    let err = tx::rematch(engine.get_game(id).unwrap(), 0, 1).unwrap_err();
    assert_eq!(err, RematchError::Unsettled);
}
