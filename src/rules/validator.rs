//! Action legality checks.
//!
//! `GameValidator` reads the turn state, rules configuration and the
//! round's joker rank, and answers whether an action may be applied. It
//! never mutates anything: `Game` runs every check before touching state,
//! so a rejected action leaves the game unchanged.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::scoring::FinishReason;
use crate::cards::{Card, CardId, Rank};
use crate::core::{DrawPile, GameError, Player, RulesConfig, Seat};
use crate::game::GameStatus;
use crate::melds::{
    can_form_meld_with, is_valid_meld, satisfies_pickup, MeldType, MAX_MELD_SIZE, MIN_MELD_SIZE,
};
use crate::turns::{TurnManager, TurnPhase};
use crate::zones::{Deck, DiscardPile};

/// A draw that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawPlan {
    pub pile: DrawPile,
    pub count: usize,
}

/// A meld that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeldPlan {
    pub kind: MeldType,
    pub cards: SmallVec<[CardId; MAX_MELD_SIZE]>,
}

/// Read-only rule checks over one game's state.
pub struct GameValidator<'a> {
    config: &'a RulesConfig,
    turns: &'a TurnManager,
    joker_rank: Option<Rank>,
}

impl<'a> GameValidator<'a> {
    #[must_use]
    pub fn new(config: &'a RulesConfig, turns: &'a TurnManager, joker_rank: Option<Rank>) -> Self {
        Self {
            config,
            turns,
            joker_rank,
        }
    }

    /// Actions are only accepted while a round is being played.
    pub fn check_status(status: GameStatus) -> Result<(), GameError> {
        match status {
            GameStatus::Playing => Ok(()),
            other => Err(GameError::GameNotInProgress(other)),
        }
    }

    /// The acting player must hold the current seat.
    ///
    /// `players` is indexed by seat and always holds a full table.
    pub fn check_turn(&self, seat: Seat, players: &[Player]) -> Result<(), GameError> {
        let current = self.turns.current();
        if seat == current {
            return Ok(());
        }
        Err(GameError::NotYourTurn {
            player: players[seat.index()].id().clone(),
            current: players[current.index()].id().clone(),
        })
    }

    fn expect_phase(&self, expected: TurnPhase) -> Result<(), GameError> {
        let actual = self.turns.phase();
        if actual == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase { expected, actual })
        }
    }

    /// Validate a draw of `count` cards (default 1) from a pile.
    pub fn check_draw(
        &self,
        player: &Player,
        deck: &Deck,
        discard: &DiscardPile,
        from_discard: bool,
        count: Option<usize>,
    ) -> Result<DrawPlan, GameError> {
        if self.turns.awaiting_opening_discard() {
            return Err(GameError::MustDiscardFirst);
        }
        self.expect_phase(TurnPhase::Draw)?;

        let count = count.unwrap_or(1);
        if !from_discard {
            if count != 1 {
                return Err(GameError::InvalidDrawCount { count });
            }
            if deck.is_empty() {
                return Err(GameError::EmptyDeck {
                    requested: 1,
                    remaining: 0,
                });
            }
            return Ok(DrawPlan {
                pile: DrawPile::Deck,
                count,
            });
        }

        if count == 0 || count > self.config.max_discard_pickup {
            return Err(GameError::InvalidDrawCount { count });
        }
        let picked = discard.get_last_cards(count)?;
        if count > 1
            && !can_form_meld_with(
                picked,
                player.hand(),
                self.joker_rank,
                self.config.pickup_policy,
                !player.has_laid_run(),
            )
        {
            return Err(GameError::PickupCannotFormMeld);
        }

        Ok(DrawPlan {
            pile: DrawPile::DiscardPile,
            count,
        })
    }

    /// Validate declaring `ids` as a new meld.
    pub fn check_meld(&self, player: &Player, ids: &[CardId]) -> Result<MeldPlan, GameError> {
        self.expect_phase(TurnPhase::Meld)?;

        if !(MIN_MELD_SIZE..=MAX_MELD_SIZE).contains(&ids.len()) {
            return Err(GameError::InvalidMeldSize {
                min: MIN_MELD_SIZE,
                max: MAX_MELD_SIZE,
                actual: ids.len(),
            });
        }

        let mut seen = FxHashSet::default();
        let mut cards: SmallVec<[Card; MAX_MELD_SIZE]> = SmallVec::new();
        for &id in ids {
            if !seen.insert(id) {
                return Err(GameError::DuplicateCard(id));
            }
            let card = player.card(id).ok_or(GameError::CardNotInHand(id))?;
            cards.push(*card);
        }

        if ids.len() >= player.hand_size() {
            return Err(GameError::MeldWouldEmptyHand);
        }

        let kind = is_valid_meld(&cards, self.joker_rank).ok_or(GameError::InvalidMeld)?;
        if kind == MeldType::Set && !player.has_laid_run() {
            return Err(GameError::FirstMeldMustBeRun);
        }

        if let Some(picked) = self.turns.mandatory_pickup() {
            if !satisfies_pickup(ids, picked, self.config.pickup_policy) {
                return Err(GameError::PickupNotMelded);
            }
        }

        Ok(MeldPlan {
            kind,
            cards: SmallVec::from_slice(ids),
        })
    }

    /// Skipping the meld is allowed unless a multi-card pickup is owed.
    pub fn check_skip_meld(&self) -> Result<(), GameError> {
        self.expect_phase(TurnPhase::Meld)?;
        if self.turns.mandatory_pickup().is_some() {
            return Err(GameError::MandatoryMeldPending);
        }
        Ok(())
    }

    /// Validate discarding `id`.
    pub fn check_discard(&self, player: &Player, id: CardId) -> Result<(), GameError> {
        if self.turns.phase() != TurnPhase::Discard && self.turns.mandatory_pickup().is_some() {
            return Err(GameError::MandatoryMeldPending);
        }
        self.expect_phase(TurnPhase::Discard)?;
        if !player.has_card(id) {
            return Err(GameError::CardNotInHand(id));
        }
        Ok(())
    }

    /// Terminal check run after every accepted action.
    ///
    /// Memukul by the actor wins over deck exhaustion. The round ends as
    /// soon as an action leaves the deck empty.
    #[must_use]
    pub fn check_game_over(
        &self,
        actor: Seat,
        players: &[Player],
        deck: &Deck,
    ) -> Option<(FinishReason, Option<Seat>)> {
        if players.get(actor.index()).is_some_and(Player::can_win) {
            return Some((FinishReason::Memukul, Some(actor)));
        }
        if deck.is_empty() {
            return Some((FinishReason::DeckEmpty, None));
        }
        None
    }
}
