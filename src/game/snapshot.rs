//! Plain-data export and import of a whole game.
//!
//! `GameSnapshot` holds only owned values, so a persistence layer can
//! store it verbatim (JSON through serde, or compact bytes through
//! bincode). Importing a snapshot rebuilds a `Game` that continues exactly
//! like the exported one, RNG position included.

use serde::{Deserialize, Serialize};

use super::game::{validate_table, Game, GameStatus};
use crate::cards::{Card, CardId, JokerDesignation};
use crate::core::{
    ActionRecord, GameError, GameRng, GameRngState, Player, PlayerId, RulesConfig, Seat,
};
use crate::melds::{can_form_meld_with, is_valid_meld, Meld, MeldType};
use crate::rules::{FinishReason, RoundSummary};
use crate::turns::{TurnManager, TurnPhase};
use crate::zones::{Deck, DiscardPile};

/// One seat's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub display_name: String,
    pub hand: Vec<Card>,
    pub melds: Vec<Meld>,
    pub score: i32,
    pub ready: bool,
    pub connected: bool,
    pub has_laid_run: bool,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id().clone(),
            display_name: player.display_name().to_string(),
            hand: player.hand().to_vec(),
            melds: player.melds().to_vec(),
            score: player.score(),
            ready: player.is_ready(),
            connected: player.is_connected(),
            has_laid_run: player.has_laid_run(),
        }
    }
}

impl From<PlayerSnapshot> for Player {
    fn from(s: PlayerSnapshot) -> Self {
        Player::from_parts(
            s.id,
            s.display_name,
            s.hand,
            s.melds,
            s.score,
            s.ready,
            s.connected,
            s.has_laid_run,
        )
    }
}

/// Complete, self-contained game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub id: String,
    pub status: GameStatus,
    pub round: u32,
    pub config: RulesConfig,
    /// Seat order.
    pub players: Vec<PlayerSnapshot>,
    /// Bottom to top.
    pub deck: Vec<Card>,
    /// Bottom to top.
    pub discard_pile: Vec<Card>,
    pub discard_attribution: Vec<(CardId, PlayerId)>,
    pub joker_reference: Option<Card>,
    pub joker_cards: Vec<CardId>,
    pub current_seat: Seat,
    pub phase: TurnPhase,
    pub turns: TurnManager,
    pub winner: Option<PlayerId>,
    pub finish_reason: Option<FinishReason>,
    pub last_action: Option<ActionRecord>,
    pub last_summary: Option<RoundSummary>,
    pub next_meld_id: u32,
    pub rng: GameRngState,
}

impl GameSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        bincode::serialize(self).map_err(|e| GameError::Encoding(e.to_string()))
    }

    /// Decode bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        bincode::deserialize(bytes).map_err(|e| GameError::Encoding(e.to_string()))
    }
}

impl Game {
    /// Export the full state.
    #[must_use]
    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id.clone(),
            status: self.status,
            round: self.round,
            config: self.config.clone(),
            players: self.players.iter().map(PlayerSnapshot::from).collect(),
            deck: self.deck.cards().to_vec(),
            discard_pile: self.discard.cards().to_vec(),
            discard_attribution: self.discard.attribution(),
            joker_reference: self.joker.as_ref().map(JokerDesignation::reference),
            joker_cards: self
                .joker
                .as_ref()
                .map(|j| j.joker_ids().to_vec())
                .unwrap_or_default(),
            current_seat: self.turns.current(),
            phase: self.turns.phase(),
            turns: self.turns.clone(),
            winner: self.winner.clone(),
            finish_reason: self.finish_reason,
            last_action: self.turns.last_action().cloned(),
            last_summary: self.last_summary.clone(),
            next_meld_id: self.next_meld_id,
            rng: self.rng.state(),
        }
    }

    /// Rebuild a game from a snapshot.
    ///
    /// Rejects snapshots whose table, turn state or card placement is
    /// inconsistent.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, GameError> {
        let players: Vec<Player> = snapshot.players.into_iter().map(Player::from).collect();
        validate_table(&players).map_err(|e| GameError::InvalidSnapshot(e.to_string()))?;
        snapshot
            .config
            .validate()
            .map_err(|e| GameError::InvalidSnapshot(e.to_string()))?;

        if snapshot.turns.player_count() != players.len()
            || snapshot.turns.current().index() >= players.len()
        {
            return Err(invalid("turn state does not match the table"));
        }
        if snapshot.current_seat != snapshot.turns.current()
            || snapshot.phase != snapshot.turns.phase()
        {
            return Err(invalid("current seat or phase disagrees with turn state"));
        }

        let joker = snapshot.joker_reference.map(JokerDesignation::from_reference);
        match &joker {
            Some(j) if j.joker_ids() != snapshot.joker_cards.as_slice() => {
                return Err(invalid("joker cards do not match the reference card"));
            }
            None if snapshot.status != GameStatus::Lobby => {
                return Err(invalid("dealt game without a joker reference"));
            }
            _ => {}
        }

        let game = Game {
            id: snapshot.id,
            config: snapshot.config,
            players,
            deck: Deck::new(snapshot.deck),
            discard: DiscardPile::from_parts(snapshot.discard_pile, snapshot.discard_attribution),
            joker,
            turns: snapshot.turns,
            status: snapshot.status,
            round: snapshot.round,
            winner: snapshot.winner,
            finish_reason: snapshot.finish_reason,
            last_summary: snapshot.last_summary,
            next_meld_id: snapshot.next_meld_id,
            rng: GameRng::from_state(&snapshot.rng),
        };

        game.verify_card_conservation()
            .map_err(|e| GameError::InvalidSnapshot(e.to_string()))?;
        game.verify_melds()?;
        game.verify_round_state()?;
        Ok(game)
    }

    /// Every meld is owned by its holder and still classifies as declared,
    /// and `has_laid_run` agrees with the declared melds.
    fn verify_melds(&self) -> Result<(), GameError> {
        let joker_rank = self.joker_rank();
        for player in &self.players {
            for meld in player.melds() {
                if meld.owner() != player.id() {
                    return Err(invalid("meld held by a player who does not own it"));
                }
                if is_valid_meld(meld.cards(), joker_rank) != Some(meld.kind()) {
                    return Err(invalid("meld cards do not form the declared meld type"));
                }
            }
            let laid_run = player.melds().iter().any(|m| m.kind() == MeldType::Run);
            if player.has_laid_run() != laid_run {
                return Err(invalid("run flag disagrees with declared melds"));
            }
        }
        Ok(())
    }

    /// A round in play still has cards to draw, and an owed pickup meld is
    /// still in hand and can still be declared.
    fn verify_round_state(&self) -> Result<(), GameError> {
        if self.status != GameStatus::Playing {
            return Ok(());
        }
        if self.deck.is_empty() {
            return Err(invalid("round in play with an empty deck"));
        }

        let Some(owed) = self.turns.mandatory_pickup() else {
            return Ok(());
        };
        let player = self.current_player();
        let (picked, rest): (Vec<Card>, Vec<Card>) =
            player.hand().iter().partition(|c| owed.contains(&c.id()));
        if picked.len() != owed.len() {
            return Err(invalid("picked-up cards are no longer in hand"));
        }
        if !can_form_meld_with(
            &picked,
            &rest,
            self.joker_rank(),
            self.config.pickup_policy,
            !player.has_laid_run(),
        ) {
            return Err(invalid("picked-up cards cannot be melded"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> GameError {
    GameError::InvalidSnapshot(message.to_string())
}
