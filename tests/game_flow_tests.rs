//! Turn flow tests: dealing, the phase machine, turn ownership and
//! atomic rejection.

mod common;

use common::*;
use rummy_engine::{
    Action, DrawPile, GameError, GameStatus, PlayerId, Seat, TurnPhase, PLAYER_COUNT,
};

/// Hands are [8, 7, 7, 7] counting seats from the starting player.
#[test]
fn test_deal_sizes_from_start_seat() {
    for seed in 0..20 {
        let game = started(seed);
        let start = game.turns().starting_seat();

        let sizes: Vec<usize> = (0..PLAYER_COUNT)
            .map(|step| {
                let seat = start.offset(step, PLAYER_COUNT);
                game.player_at(seat).unwrap().hand_size()
            })
            .collect();

        assert_eq!(sizes, vec![8, 7, 7, 7]);
        assert_eq!(game.current_player().hand_size(), 8);
        assert!(!game.turns().first_player_discarded());
        assert_eq!(game.deck().remaining(), 22);
        game.verify_card_conservation().unwrap();
    }
}

#[test]
fn test_joker_designation() {
    let game = started(5);
    let jokers = game.jokers().unwrap();
    let reference = jokers.reference();

    let in_play: Vec<_> = game
        .deck()
        .cards()
        .iter()
        .chain(game.players().iter().flat_map(|p| p.hand()))
        .collect();

    assert_eq!(in_play.len(), 51);
    assert!(in_play.iter().all(|c| c.id() != reference.id()));
    let marked: Vec<_> = in_play.iter().filter(|c| c.is_joker()).collect();
    assert_eq!(marked.len(), 3);
    assert!(marked.iter().all(|c| c.rank() == reference.rank()));
}

#[test]
fn test_first_player_must_discard_first() {
    let mut game = started(1);
    let first = current_id(&game);

    assert_eq!(game.draw_card(&first, false, None), Err(GameError::MustDiscardFirst));
    assert_eq!(game.draw_card(&first, true, Some(1)), Err(GameError::MustDiscardFirst));
    assert!(matches!(
        game.skip_meld_phase(&first),
        Err(GameError::WrongPhase { .. })
    ));

    let card = game.current_player().hand()[0].id();
    game.discard_card(&first, card).unwrap();

    let first_seat = game.seat_of(&first).unwrap();
    assert_eq!(game.player_at(first_seat).unwrap().hand_size(), 7);
    assert_eq!(game.turns().current(), first_seat.offset(1, PLAYER_COUNT));
    assert_eq!(game.phase(), TurnPhase::Draw);
    assert!(game.turns().first_player_discarded());
}

#[test]
fn test_not_your_turn() {
    let mut game = after_opening(2);
    let current = current_id(&game);
    let other = game
        .players()
        .iter()
        .map(|p| p.id().clone())
        .find(|id| *id != current)
        .unwrap();

    let err = game.draw_card(&other, false, None).unwrap_err();
    assert!(err.is_turn_error());
    assert_eq!(err.to_string(), "not your turn");
    assert_eq!(
        err,
        GameError::NotYourTurn {
            player: other,
            current
        }
    );
}

#[test]
fn test_wrong_phase_errors() {
    let mut game = after_opening(3);
    let id = current_id(&game);
    let hand: Vec<_> = game.current_player().hand().iter().map(|c| c.id()).collect();

    assert!(game.create_meld(&id, &hand[..3]).unwrap_err().is_phase_error());
    assert!(game.discard_card(&id, hand[0]).unwrap_err().is_phase_error());
    assert!(game.skip_meld_phase(&id).unwrap_err().is_phase_error());

    game.draw_card(&id, false, None).unwrap();
    assert!(game.draw_card(&id, false, None).unwrap_err().is_phase_error());
    assert!(game.discard_card(&id, hand[0]).unwrap_err().is_phase_error());

    game.skip_meld_phase(&id).unwrap();
    assert!(game.skip_meld_phase(&id).unwrap_err().is_phase_error());
    game.discard_card(&id, hand[0]).unwrap();
}

#[test]
fn test_draw_count_validation() {
    let mut game = after_opening(4);
    let id = current_id(&game);

    assert_eq!(
        game.draw_card(&id, false, Some(2)),
        Err(GameError::InvalidDrawCount { count: 2 })
    );
    assert_eq!(
        game.draw_card(&id, true, Some(0)),
        Err(GameError::InvalidDrawCount { count: 0 })
    );
    assert_eq!(
        game.draw_card(&id, true, Some(4)),
        Err(GameError::InvalidDrawCount { count: 4 })
    );
    assert_eq!(
        game.draw_card(&id, true, Some(2)),
        Err(GameError::NotEnoughDiscards {
            requested: 2,
            available: 1
        })
    );
}

#[test]
fn test_single_discard_pickup_is_optional() {
    let mut game = after_opening(5);
    let id = current_id(&game);
    let top = *game.discard_pile().top().unwrap();

    let drawn = game.draw_card(&id, true, Some(1)).unwrap();
    assert_eq!(drawn, vec![top]);
    assert!(game.discard_pile().is_empty());
    assert!(game.turns().last_draw_from_discard());
    assert!(game.turns().mandatory_pickup().is_none());

    game.skip_meld_phase(&id).unwrap();
    assert_eq!(game.phase(), TurnPhase::Discard);
}

#[test]
fn test_rejected_actions_leave_state_unchanged() {
    let mut game = after_opening(6);
    let before = game.to_snapshot();
    let id = current_id(&game);
    let stranger = PlayerId::new("nobody");
    let not_held = game
        .players()
        .iter()
        .find(|p| p.id() != &id)
        .map(|p| p.hand()[0].id())
        .unwrap();

    assert!(game.draw_card(&stranger, false, None).is_err());
    assert!(game.draw_card(&id, true, Some(3)).is_err());
    assert!(game.discard_card(&id, not_held).is_err());
    assert!(game.create_meld(&id, &[not_held]).is_err());
    assert_eq!(game.to_snapshot(), before);

    game.draw_card(&id, false, None).unwrap();
    let before = game.to_snapshot();
    assert!(game.discard_card(&id, not_held).unwrap_err().is_phase_error());
    assert_eq!(
        game.create_meld(&id, &[not_held, not_held, not_held]),
        Err(GameError::DuplicateCard(not_held))
    );
    assert_eq!(game.to_snapshot(), before);
}

#[test]
fn test_turns_pass_clockwise() {
    let mut game = after_opening(8);
    let mut seat = game.turns().current();

    for _ in 0..6 {
        pass_turn(&mut game);
        let next = game.turns().current();
        assert_eq!(next, seat.offset(1, PLAYER_COUNT));
        seat = next;
        game.verify_card_conservation().unwrap();
    }

    // opening discard plus six full turns
    assert_eq!(game.turns().history().len(), 7);
    assert_eq!(game.turns().turn_number(), 8);
    assert_eq!(game.turns().cycle(), 1);
}

#[test]
fn test_action_log() {
    let mut game = after_opening(9);
    let id = current_id(&game);
    let seat = game.turns().current();

    game.draw_card(&id, false, None).unwrap();
    game.skip_meld_phase(&id).unwrap();

    let log = game.turns().current_actions();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].player, id);
    assert_eq!(log[0].seat, seat);
    assert_eq!(
        log[0].action,
        Action::Draw {
            pile: DrawPile::Deck,
            count: 1
        }
    );
    assert_eq!(log[1].action, Action::SkipMeld);
    assert_eq!(log[1].sequence, 1);
    assert_eq!(log[0].turn, 2);

    let idle = game.turns().idle_millis(log[1].timestamp_ms + 1_500);
    assert_eq!(idle, Some(1_500));
}

/// Replaying the recorded actions on an identically seeded game ends in
/// the same card placement.
#[test]
fn test_replay_through_apply_action() {
    let mut original = after_opening(10);
    for _ in 0..5 {
        pass_turn(&mut original);
    }

    let mut replica = started(10);
    let records: Vec<_> = original
        .turns()
        .history()
        .iter()
        .flat_map(|t| t.actions.clone())
        .collect();
    for record in &records {
        replica.apply_action(&record.player, &record.action).unwrap();
    }

    let (a, b) = (original.to_snapshot(), replica.to_snapshot());
    assert_eq!(a.players, b.players);
    assert_eq!(a.deck, b.deck);
    assert_eq!(a.discard_pile, b.discard_pile);
    assert_eq!(a.current_seat, b.current_seat);
}

#[test]
fn test_finished_game_rejects_everything() {
    let mut snapshot = after_opening(11).to_snapshot();
    drain_deck(&mut snapshot, 1, "ana");
    let mut game = rebuild(snapshot);
    draw_from_deck(&mut game);

    assert_eq!(game.status(), GameStatus::Finished);
    let frozen = game.to_snapshot();
    for player in game.players().to_vec() {
        let id = player.id().clone();
        let card = player.hand()[0].id();
        assert!(matches!(
            game.draw_card(&id, false, None),
            Err(GameError::GameNotInProgress(GameStatus::Finished))
        ));
        assert!(game.discard_card(&id, card).is_err());
        assert!(game.create_meld(&id, &[card]).is_err());
        assert!(game.skip_meld_phase(&id).is_err());
    }
    assert_eq!(game.to_snapshot(), frozen);
}

#[test]
fn test_next_round_keeps_scores() {
    let mut snapshot = after_opening(12).to_snapshot();
    drain_deck(&mut snapshot, 1, "ana");
    let mut game = rebuild(snapshot);

    assert_eq!(game.start_next_round(), Err(GameError::RoundNotFinished));
    draw_from_deck(&mut game);
    let totals: Vec<i32> = game.players().iter().map(|p| p.score()).collect();

    game.start_next_round().unwrap();
    assert_eq!(game.round(), 2);
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.winner(), None);
    assert_eq!(
        game.players().iter().map(|p| p.score()).collect::<Vec<_>>(),
        totals
    );
    assert!(game.players().iter().all(|p| p.melds().is_empty()));
    assert_eq!(game.current_player().hand_size(), 8);
    assert_eq!(game.phase(), TurnPhase::Discard);
    game.verify_card_conservation().unwrap();
}

#[test]
fn test_session_flags_do_not_touch_round_state() {
    let mut game = after_opening(13);
    let before = game.to_snapshot();
    let id = PlayerId::new(IDS[2]);

    game.set_connected(&id, false).unwrap();
    game.set_ready(&id, true).unwrap();

    let after = game.to_snapshot();
    assert_eq!(after.deck, before.deck);
    assert_eq!(after.turns, before.turns);
    let seat = game.seat_of(&id).unwrap();
    assert_eq!(seat, Seat::new(2));
    assert!(!after.players[2].connected);
    assert!(after.players[2].ready);
}
