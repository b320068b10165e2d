//! The game orchestrator.
//!
//! `Game` owns the deck, the discard pile, the four players, the joker
//! designation and the turn manager. The four action methods (`draw_card`,
//! `discard_card`, `create_meld`, `skip_meld_phase`) are the only way to
//! change round state. Each one:
//!
//! 1. checks the game is in progress and the caller holds the turn
//! 2. validates the action with `GameValidator`
//! 3. mutates state
//! 4. re-checks whether the round is over, scoring it if so
//!
//! Validation always completes before the first mutation, so a rejected
//! action leaves the game exactly as it was.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{Card, CardId, JokerDesignation, Rank};
use crate::core::{
    Action, ActionRecord, DrawPile, GameError, GameRng, GameRngState, Player, PlayerId,
    RulesConfig, Seat, PLAYER_COUNT,
};
use crate::melds::{Meld, MeldId};
use crate::rules::{
    FinishReason, GameValidator, JokerPrivilegeHook, NoJokerPrivilege, RoundSummary,
    ScoreManager,
};
use crate::turns::{DrawSource, TurnManager, TurnPhase};
use crate::zones::{Deck, DiscardPile};

/// Cards in play each round: the full deck minus the joker reference card.
pub const CARDS_IN_CIRCULATION: usize = CardId::COUNT - 1;

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Seated, not yet dealt.
    Lobby,
    /// A round is in progress.
    Playing,
    /// The last round ended; the next one can be dealt.
    Finished,
}

/// Builder for creating a `Game`.
///
/// ```
/// use rummy_engine::game::{GameBuilder, GameStatus};
///
/// let mut game = GameBuilder::new("table-1")
///     .player("a", "Ana")
///     .player("b", "Budi")
///     .player("c", "Citra")
///     .player("d", "Dewi")
///     .seed(42)
///     .build()
///     .unwrap();
/// game.start().unwrap();
/// assert_eq!(game.status(), GameStatus::Playing);
/// ```
pub struct GameBuilder {
    id: String,
    players: Vec<Player>,
    config: RulesConfig,
    seed: Option<u64>,
}

impl GameBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            players: Vec::with_capacity(PLAYER_COUNT),
            config: RulesConfig::default(),
            seed: None,
        }
    }

    /// Seat a player at the next free seat.
    pub fn player(mut self, id: impl Into<PlayerId>, display_name: impl Into<String>) -> Self {
        self.players.push(Player::new(id, display_name));
        self
    }

    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the shuffle. Unseeded games draw from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the game in the lobby.
    pub fn build(self) -> Result<Game, GameError> {
        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Game::new(self.id, self.players, self.config, rng)
    }
}

/// A four-player Rummy game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub(crate) id: String,
    pub(crate) config: RulesConfig,
    pub(crate) players: Vec<Player>,
    pub(crate) deck: Deck,
    pub(crate) discard: DiscardPile,
    pub(crate) joker: Option<JokerDesignation>,
    pub(crate) turns: TurnManager,
    pub(crate) status: GameStatus,
    pub(crate) round: u32,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) finish_reason: Option<FinishReason>,
    pub(crate) last_summary: Option<RoundSummary>,
    pub(crate) next_meld_id: u32,
    pub(crate) rng: GameRng,
}

impl Game {
    /// Create a game in the lobby.
    ///
    /// Fails unless exactly four distinct players are seated and the
    /// configuration is dealable.
    pub fn new(
        id: impl Into<String>,
        players: Vec<Player>,
        config: RulesConfig,
        rng: GameRng,
    ) -> Result<Self, GameError> {
        validate_table(&players)?;
        config.validate()?;

        Ok(Self {
            id: id.into(),
            config,
            players,
            deck: Deck::default(),
            discard: DiscardPile::new(),
            joker: None,
            turns: TurnManager::new(PLAYER_COUNT),
            status: GameStatus::Lobby,
            round: 0,
            winner: None,
            finish_reason: None,
            last_summary: None,
            next_meld_id: 0,
            rng,
        })
    }

    /// Create a builder.
    pub fn builder(id: impl Into<String>) -> GameBuilder {
        GameBuilder::new(id)
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    #[must_use]
    pub fn player_at(&self, seat: Seat) -> Option<&Player> {
        self.players.get(seat.index())
    }

    /// Seat of a player.
    pub fn seat_of(&self, id: &PlayerId) -> Result<Seat, GameError> {
        self.players
            .iter()
            .position(|p| p.id() == id)
            .map(|i| Seat::new(i as u8))
            .ok_or_else(|| GameError::UnknownPlayer(id.clone()))
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.turns.current().index()]
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn discard_pile(&self) -> &DiscardPile {
        &self.discard
    }

    /// This round's joker designation; `None` before the first deal.
    #[must_use]
    pub fn jokers(&self) -> Option<&JokerDesignation> {
        self.joker.as_ref()
    }

    #[must_use]
    pub fn joker_rank(&self) -> Option<Rank> {
        self.joker.as_ref().map(JokerDesignation::rank)
    }

    #[must_use]
    pub fn turns(&self) -> &TurnManager {
        &self.turns
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.turns.phase()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// 1-based round number; 0 in the lobby.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }

    #[must_use]
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    /// Result of the most recently finished round.
    #[must_use]
    pub fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }

    #[must_use]
    pub fn last_action(&self) -> Option<&ActionRecord> {
        self.turns.last_action()
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === Lifecycle ===

    /// Deal the first round.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.status != GameStatus::Lobby {
            return Err(GameError::AlreadyStarted);
        }
        self.deal_round()
    }

    /// Deal the next round after one has finished. Scores carry over.
    pub fn start_next_round(&mut self) -> Result<(), GameError> {
        self.start_next_round_with(&mut NoJokerPrivilege)
    }

    /// Deal the next round, passing the previous round's joker privilege
    /// grantee (if any) to `hook`.
    pub fn start_next_round_with<H: JokerPrivilegeHook + ?Sized>(
        &mut self,
        hook: &mut H,
    ) -> Result<(), GameError> {
        match self.status {
            GameStatus::Finished => {}
            GameStatus::Playing => return Err(GameError::RoundNotFinished),
            GameStatus::Lobby => return Err(GameError::GameNotInProgress(GameStatus::Lobby)),
        }

        let grantee = self
            .last_summary
            .as_ref()
            .and_then(|s| s.joker_privilege.clone());
        self.deal_round()?;

        if let (Some(grantee), Some(joker)) = (grantee, self.joker.as_ref()) {
            debug!(game_id = %self.id, round = self.round, grantee = %grantee, "joker privilege hook");
            hook.on_round_start(&grantee, self.round, joker);
        }
        Ok(())
    }

    /// Shuffle, designate jokers, pick the starting seat and deal.
    fn deal_round(&mut self) -> Result<(), GameError> {
        let mut deck = Deck::standard();
        deck.shuffle(&mut self.rng);

        let reference = deck
            .take_random(&mut self.rng)
            .ok_or(GameError::EmptyDeck {
                requested: 1,
                remaining: 0,
            })?;
        let joker = JokerDesignation::from_reference(reference);
        deck.apply_jokers(&joker);
        deck.shuffle(&mut self.rng);

        let start = Seat::new(self.rng.gen_range_usize(0..PLAYER_COUNT) as u8);
        let mut hands: Vec<Vec<Card>> = vec![Vec::new(); PLAYER_COUNT];
        for _ in 0..self.config.hand_size {
            for step in 0..PLAYER_COUNT {
                hands[start.offset(step, PLAYER_COUNT).index()].push(deck.draw_one()?);
            }
        }
        hands[start.index()].push(deck.draw_one()?);

        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.reset_for_round();
            player.receive(hand);
        }

        self.deck = deck;
        self.discard = DiscardPile::new();
        self.turns.reset(start);
        self.round += 1;
        self.status = GameStatus::Playing;
        self.winner = None;
        self.finish_reason = None;

        info!(
            game_id = %self.id,
            round = self.round,
            start_seat = start.0,
            reference = %joker.reference(),
            joker_rank = %joker.rank(),
            deck = self.deck.remaining(),
            "round dealt"
        );
        self.joker = Some(joker);
        Ok(())
    }

    // === Session flags ===

    /// Mark a player ready. Session bookkeeping only.
    pub fn set_ready(&mut self, player: &PlayerId, ready: bool) -> Result<(), GameError> {
        let seat = self.seat_of(player)?;
        self.players[seat.index()].set_ready(ready);
        Ok(())
    }

    /// Mark a player connected or not. Session bookkeeping only.
    pub fn set_connected(&mut self, player: &PlayerId, connected: bool) -> Result<(), GameError> {
        let seat = self.seat_of(player)?;
        self.players[seat.index()].set_connected(connected);
        Ok(())
    }

    #[must_use]
    pub fn all_ready(&self) -> bool {
        self.players.iter().all(Player::is_ready)
    }

    // === Actions ===

    /// Draw from the deck (always one card) or take the top `count`
    /// cards (1 to the configured maximum, default 1) from the discard
    /// pile. Returns the drawn cards.
    ///
    /// Taking two or more discards is rejected up front unless a meld can
    /// be formed with them; the meld is then compulsory this turn.
    pub fn draw_card(
        &mut self,
        player: &PlayerId,
        from_discard_pile: bool,
        count: Option<usize>,
    ) -> Result<Vec<Card>, GameError> {
        self.try_draw(player, from_discard_pile, count)
            .inspect_err(|err| self.log_rejection(player, "draw", err))
    }

    fn try_draw(
        &mut self,
        player: &PlayerId,
        from_discard_pile: bool,
        count: Option<usize>,
    ) -> Result<Vec<Card>, GameError> {
        let seat = self.check_actor(player)?;
        let plan = self.validator().check_draw(
            &self.players[seat.index()],
            &self.deck,
            &self.discard,
            from_discard_pile,
            count,
        )?;

        let (cards, source) = match plan.pile {
            DrawPile::Deck => (self.deck.draw(plan.count)?, DrawSource::Deck),
            DrawPile::DiscardPile => {
                let cards = self.discard.take_cards(plan.count)?;
                let taken = cards.iter().map(Card::id).collect();
                (cards, DrawSource::DiscardPile { taken })
            }
        };

        self.players[seat.index()].receive(cards.iter().copied());
        self.turns.complete_draw(source);
        self.record(
            seat,
            Action::Draw {
                pile: plan.pile,
                count: plan.count,
            },
        );
        self.check_round_end(seat);
        Ok(cards)
    }

    /// Move a card from hand to the discard pile and end the turn.
    ///
    /// Going down to one card with a Run declared wins the round on the
    /// spot (Memukul); the turn does not pass.
    pub fn discard_card(&mut self, player: &PlayerId, card: CardId) -> Result<(), GameError> {
        self.try_discard(player, card)
            .inspect_err(|err| self.log_rejection(player, "discard", err))
    }

    fn try_discard(&mut self, player: &PlayerId, card: CardId) -> Result<(), GameError> {
        let seat = self.check_actor(player)?;
        self.validator()
            .check_discard(&self.players[seat.index()], card)?;

        let actor = &mut self.players[seat.index()];
        let removed = actor
            .remove_card(card)
            .ok_or(GameError::CardNotInHand(card))?;
        let wins = actor.can_win();
        self.discard.push(removed, player.clone());
        self.record(seat, Action::Discard { card });

        if !wins {
            self.turns.advance();
        }
        self.check_round_end(seat);
        Ok(())
    }

    /// Declare a meld from hand cards. Returns the new meld's id.
    ///
    /// After a deck draw the player stays in the meld phase and may declare
    /// further melds until `skip_meld_phase`. The compulsory meld after a
    /// multi-card pickup moves straight to the discard phase.
    pub fn create_meld(&mut self, player: &PlayerId, cards: &[CardId]) -> Result<MeldId, GameError> {
        self.try_meld(player, cards)
            .inspect_err(|err| self.log_rejection(player, "meld", err))
    }

    fn try_meld(&mut self, player: &PlayerId, ids: &[CardId]) -> Result<MeldId, GameError> {
        let seat = self.check_actor(player)?;
        let plan = self
            .validator()
            .check_meld(&self.players[seat.index()], ids)?;

        let actor = &mut self.players[seat.index()];
        let cards = actor.remove_cards(&plan.cards).ok_or(GameError::InvalidMeld)?;
        let id = MeldId(self.next_meld_id);
        self.next_meld_id += 1;
        actor.declare_meld(Meld::new(id, plan.kind, cards, player.clone()));

        self.turns.complete_meld();
        self.record(seat, Action::Meld { cards: plan.cards });
        self.check_round_end(seat);
        Ok(id)
    }

    /// End the meld phase without (further) melding. Not allowed while a
    /// multi-card pickup is still owed a meld.
    pub fn skip_meld_phase(&mut self, player: &PlayerId) -> Result<(), GameError> {
        self.try_skip_meld(player)
            .inspect_err(|err| self.log_rejection(player, "skip_meld", err))
    }

    fn try_skip_meld(&mut self, player: &PlayerId) -> Result<(), GameError> {
        let seat = self.check_actor(player)?;
        self.validator().check_skip_meld()?;

        self.turns.skip_meld();
        self.record(seat, Action::SkipMeld);
        Ok(())
    }

    /// Apply a recorded action through the matching action method.
    pub fn apply_action(&mut self, player: &PlayerId, action: &Action) -> Result<(), GameError> {
        match action {
            Action::Draw { pile, count } => self
                .draw_card(player, *pile == DrawPile::DiscardPile, Some(*count))
                .map(|_| ()),
            Action::Discard { card } => self.discard_card(player, *card),
            Action::Meld { cards } => self.create_meld(player, cards).map(|_| ()),
            Action::SkipMeld => self.skip_meld_phase(player),
        }
    }

    // === Invariants ===

    /// Check that the 51 circulating cards are each in exactly one place,
    /// the reference card is out of play and exactly its three rank-mates
    /// are marked as jokers.
    pub fn verify_card_conservation(&self) -> Result<(), GameError> {
        let Some(joker) = &self.joker else {
            return Ok(());
        };

        let all_cards = self
            .deck
            .cards()
            .iter()
            .chain(self.discard.cards())
            .chain(self.players.iter().flat_map(|p| p.hand()))
            .chain(
                self.players
                    .iter()
                    .flat_map(|p| p.melds().iter().flat_map(Meld::cards)),
            );

        let mut seen = FxHashSet::default();
        let mut jokers = 0;
        for card in all_cards {
            if !card.is_consistent() {
                return Err(violation(format!("card {} has mismatched id", card)));
            }
            if !seen.insert(card.id()) {
                return Err(violation(format!("card {} appears twice", card.id())));
            }
            if card.id() == joker.reference().id() {
                return Err(violation(format!("reference card {} is in play", card.id())));
            }
            if card.is_joker() != joker.is_joker_id(card.id()) {
                return Err(violation(format!("card {} has the wrong joker flag", card.id())));
            }
            if card.is_joker() {
                jokers += 1;
            }
        }

        if seen.len() != CARDS_IN_CIRCULATION {
            return Err(violation(format!(
                "{} cards in play, expected {}",
                seen.len(),
                CARDS_IN_CIRCULATION
            )));
        }
        if jokers != joker.joker_ids().len() {
            return Err(violation(format!("{} jokers in play", jokers)));
        }
        Ok(())
    }

    // === Internals ===

    fn validator(&self) -> GameValidator<'_> {
        GameValidator::new(&self.config, &self.turns, self.joker_rank())
    }

    /// Common checks: game in progress, player seated, player's turn.
    fn check_actor(&self, player: &PlayerId) -> Result<Seat, GameError> {
        GameValidator::check_status(self.status)?;
        let seat = self.seat_of(player)?;
        self.validator().check_turn(seat, &self.players)?;
        Ok(seat)
    }

    fn record(&mut self, seat: Seat, action: Action) {
        debug!(
            game_id = %self.id,
            seat = seat.0,
            action = action.name(),
            turn = self.turns.turn_number(),
            "action accepted"
        );
        let record = ActionRecord::new(
            self.players[seat.index()].id().clone(),
            seat,
            action,
            self.turns.turn_number(),
            self.turns.next_sequence(),
        );
        self.turns.record(record);
    }

    fn check_round_end(&mut self, actor: Seat) {
        let outcome = self
            .validator()
            .check_game_over(actor, &self.players, &self.deck);
        if let Some((reason, winner)) = outcome {
            self.finish_round(reason, winner);
        }
    }

    fn finish_round(&mut self, reason: FinishReason, winner: Option<Seat>) {
        let summary = ScoreManager::score_round(&mut self.players, self.round, reason, winner);

        info!(
            game_id = %self.id,
            round = self.round,
            reason = ?reason,
            winner = ?summary.winner,
            scores = ?summary.round_scores,
            "round finished"
        );

        self.status = GameStatus::Finished;
        self.winner = summary.winner.clone();
        self.finish_reason = Some(reason);
        self.last_summary = Some(summary);
    }

    fn log_rejection(&self, player: &PlayerId, action: &str, err: &GameError) {
        debug!(game_id = %self.id, player = %player, action, error = %err, "action rejected");
    }
}

/// Exactly four distinct players.
pub(crate) fn validate_table(players: &[Player]) -> Result<(), GameError> {
    if players.len() != PLAYER_COUNT {
        return Err(GameError::InvalidPlayerCount {
            expected: PLAYER_COUNT,
            actual: players.len(),
        });
    }
    let mut ids = FxHashSet::default();
    for player in players {
        if !ids.insert(player.id()) {
            return Err(GameError::DuplicatePlayer(player.id().clone()));
        }
    }
    Ok(())
}

fn violation(message: String) -> GameError {
    GameError::ConservationViolated(message)
}
