//! Shared helpers for integration tests.
//!
//! Scenario tests start a real game, export it, rearrange cards inside the
//! snapshot and import it again. Every helper moves cards (never copies),
//! so the imported game still passes the conservation check.

#![allow(dead_code)]

use std::sync::Once;

use rummy_engine::{Card, CardId, Game, GameBuilder, GameSnapshot, PlayerId, Rank, Suit};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install a test subscriber. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub const IDS: [&str; 4] = ["ana", "budi", "citra", "dewi"];

pub fn builder(seed: u64) -> GameBuilder {
    IDS.iter()
        .fold(GameBuilder::new(format!("game-{seed}")), |b, id| {
            b.player(*id, id.to_uppercase())
        })
        .seed(seed)
}

/// A started game.
pub fn started(seed: u64) -> Game {
    init_logging();
    let mut game = builder(seed).build().unwrap();
    game.start().unwrap();
    game
}

/// A started game where the opening discard has been made, so the
/// current player is about to draw.
pub fn after_opening(seed: u64) -> Game {
    let mut game = started(seed);
    let first = current_id(&game);
    let card = game.current_player().hand()[0].id();
    game.discard_card(&first, card).unwrap();
    game
}

pub fn current_id(game: &Game) -> PlayerId {
    game.current_player().id().clone()
}

/// Draw from the deck, skip the meld and discard the first card.
pub fn pass_turn(game: &mut Game) {
    let id = current_id(game);
    game.draw_card(&id, false, None).unwrap();
    game.skip_meld_phase(&id).unwrap();
    let card = game.current_player().hand()[0].id();
    game.discard_card(&id, card).unwrap();
}

/// Current player draws from the deck. With one card left this ends the
/// round.
pub fn draw_from_deck(game: &mut Game) -> Vec<Card> {
    let id = current_id(game);
    game.draw_card(&id, false, None).unwrap()
}

pub fn id(suit: Suit, rank: Rank) -> CardId {
    CardId::new(suit, rank)
}

pub fn joker_rank(snapshot: &GameSnapshot) -> Rank {
    snapshot
        .joker_reference
        .map(|c| c.rank())
        .expect("dealt game")
}

/// First rank (from Two) that is not the joker rank nor in `avoid`.
pub fn free_rank(joker: Rank, avoid: &[Rank]) -> Rank {
    Rank::ALL[1..]
        .iter()
        .copied()
        .find(|r| *r != joker && !avoid.contains(r))
        .expect("free rank")
}

/// Three consecutive ranks, none of them the joker rank nor in `avoid`.
pub fn free_run(joker: Rank, avoid: &[Rank]) -> [Rank; 3] {
    Rank::ALL
        .windows(3)
        .find(|w| w.iter().all(|r| *r != joker && !avoid.contains(r)))
        .map(|w| [w[0], w[1], w[2]])
        .expect("free run")
}

/// Remove a card from wherever it sits outside the melds.
pub fn take(snapshot: &mut GameSnapshot, card: CardId) -> Card {
    if let Some(pos) = snapshot.deck.iter().position(|c| c.id() == card) {
        return snapshot.deck.remove(pos);
    }
    if let Some(pos) = snapshot.discard_pile.iter().position(|c| c.id() == card) {
        snapshot.discard_attribution.retain(|(id, _)| *id != card);
        return snapshot.discard_pile.remove(pos);
    }
    for player in &mut snapshot.players {
        if let Some(pos) = player.hand.iter().position(|c| c.id() == card) {
            return player.hand.remove(pos);
        }
    }
    panic!("card {card} is not in play");
}

/// Replace a seat's hand with exactly `cards`. The old hand goes to the
/// bottom of the deck.
pub fn set_hand(snapshot: &mut GameSnapshot, seat: usize, cards: &[CardId]) {
    let old = std::mem::take(&mut snapshot.players[seat].hand);
    for card in old.into_iter().rev() {
        snapshot.deck.insert(0, card);
    }
    for &card in cards {
        let card = take(snapshot, card);
        snapshot.players[seat].hand.push(card);
    }
}

/// Put `cards` on top of the discard pile, last one on top.
pub fn stack_discards(snapshot: &mut GameSnapshot, cards: &[CardId], by: &str) {
    for &card in cards {
        let card = take(snapshot, card);
        snapshot.discard_pile.push(card);
        snapshot
            .discard_attribution
            .push((card.id(), PlayerId::new(by)));
    }
}

/// Move cards from the deck's bottom to the discard pile until only
/// `remaining` are left.
pub fn drain_deck(snapshot: &mut GameSnapshot, remaining: usize, by: &str) {
    while snapshot.deck.len() > remaining {
        let card = snapshot.deck.remove(0);
        snapshot.discard_pile.insert(0, card);
        snapshot
            .discard_attribution
            .push((card.id(), PlayerId::new(by)));
    }
}

/// Seat index of the current player in a snapshot.
pub fn current_seat(snapshot: &GameSnapshot) -> usize {
    snapshot.current_seat.index()
}

pub fn rebuild(snapshot: GameSnapshot) -> Game {
    Game::from_snapshot(snapshot).unwrap()
}
