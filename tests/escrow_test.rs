//! Escrow and payout conservation: the pot that goes into a game's
//! custody comes back out exactly once, and failed calls move nothing.

use xox_engine::{EngineError, GameEngine, Principal, TIMEOUT_BLOCKS};

const BET: u128 = 100;
const FUNDS: u128 = 1_000;

fn setup() -> (GameEngine, Principal, Principal) {
    let mut engine = GameEngine::new(Principal::new("xox-contract"));
    let alice = Principal::new("alice");
    let bob = Principal::new("bob");
    engine.fund(&alice, FUNDS);
    engine.fund(&bob, FUNDS);
    (engine, alice, bob)
}

fn custody(engine: &GameEngine) -> u128 {
    let contract = engine.contract().clone();
    engine.balance_of(&contract)
}

#[test]
fn test_bets_are_escrowed() {
    let (mut engine, alice, bob) = setup();

    engine.create_game(&alice, BET, 0, 1).unwrap();
    assert_eq!(engine.balance_of(&alice), FUNDS - BET);
    assert_eq!(custody(&engine), BET);

    engine.join_game(&bob, 0, 1, 2).unwrap();
    assert_eq!(engine.balance_of(&bob), FUNDS - BET);
    assert_eq!(custody(&engine), 2 * BET);
}

#[test]
fn test_win_pays_full_pot() {
    let (mut engine, alice, bob) = setup();
    engine.create_game(&alice, BET, 0, 1).unwrap();
    engine.join_game(&bob, 0, 3, 2).unwrap();
    engine.play(&alice, 0, 1, 1).unwrap();
    engine.play(&bob, 0, 4, 2).unwrap();
    engine.play(&alice, 0, 2, 1).unwrap();

    assert_eq!(engine.balance_of(&alice), FUNDS + BET);
    assert_eq!(engine.balance_of(&bob), FUNDS - BET);
    assert_eq!(custody(&engine), 0);
}

#[test]
fn test_draw_refunds_each_bet() {
    let (mut engine, alice, bob) = setup();
    engine.create_game(&alice, BET, 0, 1).unwrap();
    engine.join_game(&bob, 0, 4, 2).unwrap();
    engine.play(&alice, 0, 2, 1).unwrap();
    engine.play(&bob, 0, 1, 2).unwrap();
    engine.play(&alice, 0, 3, 1).unwrap();
    engine.play(&bob, 0, 5, 2).unwrap();
    engine.play(&alice, 0, 7, 1).unwrap();
    engine.play(&bob, 0, 6, 2).unwrap();
    engine.play(&alice, 0, 8, 1).unwrap();

    assert_eq!(engine.balance_of(&alice), FUNDS);
    assert_eq!(engine.balance_of(&bob), FUNDS);
    assert_eq!(custody(&engine), 0);
}

#[test]
fn test_timeout_pays_full_pot() {
    let (mut engine, alice, bob) = setup();
    engine.create_game(&alice, BET, 0, 1).unwrap();
    engine.join_game(&bob, 0, 1, 2).unwrap();
    engine.play(&alice, 0, 2, 1).unwrap();
    engine.advance_blocks(TIMEOUT_BLOCKS);
    engine.claim_timeout(&bob, 0).unwrap();

    assert_eq!(engine.balance_of(&bob), FUNDS + BET);
    assert_eq!(engine.balance_of(&alice), FUNDS - BET);
    assert_eq!(custody(&engine), 0);
}

#[test]
fn test_rejected_calls_move_no_funds() {
    let (mut engine, alice, bob) = setup();
    engine.create_game(&alice, BET, 0, 1).unwrap();
    engine.join_game(&bob, 0, 1, 2).unwrap();

    // Occupied cell, out of turn, premature timeout: all rejected.
    engine.play(&alice, 0, 1, 1).unwrap_err();
    engine.play(&bob, 0, 2, 2).unwrap_err();
    engine.claim_timeout(&bob, 0).unwrap_err();

    assert_eq!(engine.balance_of(&alice), FUNDS - BET);
    assert_eq!(engine.balance_of(&bob), FUNDS - BET);
    assert_eq!(custody(&engine), 2 * BET);
}

#[test]
fn test_underfunded_create_allocates_nothing() {
    let (mut engine, _, _) = setup();
    let pauper = Principal::new("pauper");
    engine.fund(&pauper, BET - 1);

    let err = engine.create_game(&pauper, BET, 0, 1).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));
    assert_eq!(err.code(), 1);

    assert_eq!(engine.latest_game_id(), 0);
    assert_eq!(engine.balance_of(&pauper), BET - 1);
    assert_eq!(custody(&engine), 0);
}

#[test]
fn test_underfunded_join_leaves_game_open() {
    let (mut engine, alice, _) = setup();
    let pauper = Principal::new("pauper");
    engine.fund(&pauper, BET - 1);

    engine.create_game(&alice, BET, 0, 1).unwrap();
    let err = engine.join_game(&pauper, 0, 1, 2).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));

    let game = engine.get_game(0).unwrap();
    assert!(game.is_open());
    assert_eq!(game.board().codes(), [1, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(custody(&engine), BET);
}

#[test]
fn test_conservation_across_many_games() {
    let (mut engine, alice, bob) = setup();
    let total = engine.balance_of(&alice) + engine.balance_of(&bob);

    for _ in 0..3 {
        let id = engine.create_game(&alice, BET, 0, 1).unwrap();
        engine.join_game(&bob, id, 3, 2).unwrap();
        engine.play(&alice, id, 1, 1).unwrap();
        engine.play(&bob, id, 4, 2).unwrap();
        engine.play(&alice, id, 2, 1).unwrap();
    }

    // All pots settled, custody empty, no funds created or destroyed.
    assert_eq!(custody(&engine), 0);
    assert_eq!(engine.balance_of(&alice) + engine.balance_of(&bob), total);
    assert_eq!(engine.balance_of(&alice), FUNDS + 3 * BET);
}
